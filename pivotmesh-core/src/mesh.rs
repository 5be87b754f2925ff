//! Output mesh primitives

use crate::point::*;
use serde::{Deserialize, Serialize};

/// A positional triangle emitted by surface reconstruction.
///
/// Carries raw vertex positions only; it keeps no back-reference into the
/// point cloud it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [Point3f; 3],
}

impl Triangle {
    pub fn new(v0: Point3f, v1: Point3f, v2: Point3f) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Outward normal derived from the vertex winding.
    pub fn normal(&self) -> Vector3f {
        let edge1 = self.vertices[0] - self.vertices[1];
        let edge2 = self.vertices[0] - self.vertices[2];
        edge1.cross(&edge2).normalize()
    }
}
