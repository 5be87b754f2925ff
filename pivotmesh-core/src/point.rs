//! Point types and related functionality

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A 3D vector with integer components, used for voxel indices
pub type Vector3i = Vector3<i32>;

/// A point with an oriented normal vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalPoint3f {
    pub position: Point3f,
    pub normal: Vector3f,
}

impl NormalPoint3f {
    pub fn new(position: Point3f, normal: Vector3f) -> Self {
        Self { position, normal }
    }
}

impl Default for NormalPoint3f {
    fn default() -> Self {
        Self {
            position: Point3f::origin(),
            normal: Vector3f::new(0.0, 0.0, 1.0),
        }
    }
}
