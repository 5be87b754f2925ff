//! I/O operations for pivotmesh
//!
//! Reads oriented point clouds from ASCII XYZ files (`x y z nx ny nz` per
//! line) and writes reconstructed meshes as binary STL.

pub mod error;
pub mod stl;
pub mod xyz;

pub use error::*;
pub use stl::write_stl;
pub use xyz::{read_xyz, write_xyz};
