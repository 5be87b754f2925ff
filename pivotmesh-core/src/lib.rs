//! Core data structures for pivotmesh
//!
//! This crate provides the fundamental types shared by the reconstruction
//! and I/O crates: point and vector aliases, oriented points, point cloud
//! containers, and the positional triangle emitted by reconstruction.

pub mod point;
pub mod point_cloud;
pub mod mesh;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use mesh::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};
