//! Binary STL mesh output
//!
//! Little-endian layout: an 80-byte header, a u32 triangle count, then per
//! triangle a 3xf32 normal, three 3xf32 vertices, and a u16 attribute byte
//! count fixed at zero.

use crate::error::Result;
use byteorder::{LittleEndian, WriteBytesExt};
use pivotmesh_core::Triangle;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const HEADER_TEXT: &[u8] = b"pivotmesh STL";

/// Write triangles as binary STL.
pub fn write_stl<P: AsRef<Path>>(path: P, triangles: &[Triangle]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let mut header = [0u8; 80];
    header[..HEADER_TEXT.len()].copy_from_slice(HEADER_TEXT);
    writer.write_all(&header)?;
    writer.write_u32::<LittleEndian>(triangles.len() as u32)?;

    for triangle in triangles {
        let normal = triangle.normal();
        writer.write_f32::<LittleEndian>(normal.x)?;
        writer.write_f32::<LittleEndian>(normal.y)?;
        writer.write_f32::<LittleEndian>(normal.z)?;

        for vertex in &triangle.vertices {
            writer.write_f32::<LittleEndian>(vertex.x)?;
            writer.write_f32::<LittleEndian>(vertex.y)?;
            writer.write_f32::<LittleEndian>(vertex.z)?;
        }

        writer.write_u16::<LittleEndian>(0)?;
    }
    writer.flush()?;

    Ok(())
}
