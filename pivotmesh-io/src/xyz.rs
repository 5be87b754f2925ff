//! Oriented XYZ point cloud format support
//!
//! One vertex per line, six whitespace-separated floating point values:
//! `x y z nx ny nz` (position, then normal). Any non-empty line with a
//! different field count aborts the whole load; partial clouds are not
//! accepted.

use crate::error::{IoError, Result};
use pivotmesh_core::{NormalPoint3f, NormalPointCloud3f, Point3f, PointCloud, Vector3f};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Read an oriented point cloud from an ASCII XYZ file.
pub fn read_xyz<P: AsRef<Path>>(path: P) -> Result<NormalPointCloud3f> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut cloud = PointCloud::new();
    for (index, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }
        cloud.push(parse_line(&line, index + 1)?);
    }

    Ok(cloud)
}

/// Write an oriented point cloud as ASCII XYZ.
pub fn write_xyz<P: AsRef<Path>>(path: P, cloud: &NormalPointCloud3f) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for point in cloud.iter() {
        writeln!(
            writer,
            "{} {} {} {} {} {}",
            point.position.x,
            point.position.y,
            point.position.z,
            point.normal.x,
            point.normal.y,
            point.normal.z
        )?;
    }
    writer.flush()?;

    Ok(())
}

fn parse_line(line: &str, line_number: usize) -> Result<NormalPoint3f> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 6 {
        return Err(IoError::ParseError {
            line: line_number,
            message: format!("expected 6 fields (x y z nx ny nz), found {}", fields.len()),
        });
    }

    let mut values = [0.0_f32; 6];
    for (value, field) in values.iter_mut().zip(&fields) {
        *value = field.parse().map_err(|_| IoError::ParseError {
            line: line_number,
            message: format!("invalid floating point value {field:?}"),
        })?;
    }

    Ok(NormalPoint3f {
        position: Point3f::new(values[0], values[1], values[2]),
        normal: Vector3f::new(values[3], values[4], values[5]),
    })
}
