//! pivotmesh command-line tool: reconstruct a triangle mesh from an
//! oriented point cloud and save it as binary STL.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "pivotmesh", version, about = "Ball-pivoting surface reconstruction")]
struct Args {
    /// Input point cloud (ASCII XYZ: `x y z nx ny nz` per line)
    input_file: PathBuf,

    /// Ball radius used for reconstruction
    radius: f32,

    /// Output mesh path; defaults to the input path with an `.stl` extension
    output_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let output_file = args
        .output_file
        .unwrap_or_else(|| args.input_file.with_extension("stl"));

    let cloud = pivotmesh_io::read_xyz(&args.input_file)
        .with_context(|| format!("failed to load {}", args.input_file.display()))?;
    info!(points = cloud.len(), "point cloud loaded");

    let triangles = pivotmesh_reconstruction::reconstruct(&cloud, args.radius)
        .context("reconstruction failed")?;

    println!("Number of mesh faces created: {}", triangles.len());

    pivotmesh_io::write_stl(&output_file, &triangles)
        .with_context(|| format!("failed to write {}", output_file.display()))?;
    info!(output = %output_file.display(), "mesh written");

    Ok(())
}
