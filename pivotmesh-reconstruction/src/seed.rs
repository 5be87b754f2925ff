//! Seed-triangle search: bootstraps the advancing front.

use crate::front::{Front, VertexId};
use crate::geometry::{ball_center, face_normal, is_ball_empty};
use crate::grid::SpatialGrid;
use pivotmesh_core::{Point3f, Vector3f};
use std::cmp::Ordering;

/// A valid seed triangle and the center of the ball resting on it.
#[derive(Debug, Clone)]
pub struct SeedResult {
    pub face: [VertexId; 3],
    pub ball_center: Point3f,
}

/// Scan the grid voxel by voxel for the first triangle a ball of the given
/// radius can rest on without enclosing any neighboring point.
///
/// Candidate neighbors are ordered by ascending distance to the anchor
/// vertex (stable sort, distance only), which makes the first-success choice
/// reproducible. Triangles whose normal disagrees with the voxel's mean
/// vertex normal are rejected to keep the seed oriented with the cloud.
///
/// `None` means the cloud admits no seed at this radius; the reconstruction
/// then produces an empty mesh.
pub fn find_seed_triangle(
    front: &mut Front,
    grid: &SpatialGrid,
    radius: f32,
) -> Option<SeedResult> {
    for voxel in grid.voxels() {
        let mut accumulated = Vector3f::zeros();
        for &id in voxel {
            accumulated += front.vertex(id).normal;
        }
        // Empty voxels and voxels whose normals cancel out have no usable
        // orientation; skip them.
        let Some(mean_normal) = accumulated.try_normalize(1e-6) else {
            continue;
        };

        for &v1 in voxel {
            let anchor = front.vertex(v1).position;
            let mut neighbors = grid.neighborhood(&anchor, &[anchor], front.vertices());
            if neighbors.is_empty() {
                continue;
            }
            neighbors.sort_by(|&a, &b| {
                let da = (front.vertex(a).position - anchor).norm_squared();
                let db = (front.vertex(b).position - anchor).norm_squared();
                da.partial_cmp(&db).unwrap_or(Ordering::Equal)
            });

            for &v2 in &neighbors {
                for &v3 in &neighbors {
                    if v2 == v3 {
                        continue;
                    }
                    let p2 = front.vertex(v2).position;
                    let p3 = front.vertex(v3).position;
                    if face_normal(&anchor, &p2, &p3).dot(&mean_normal) < 0.0 {
                        continue;
                    }
                    let Some(center) = ball_center(&anchor, &p2, &p3, radius) else {
                        continue;
                    };
                    if is_ball_empty(&center, &neighbors, front.vertices(), radius) {
                        front.mark_used(v1);
                        front.mark_used(v2);
                        front.mark_used(v3);
                        return Some(SeedResult {
                            face: [v1, v2, v3],
                            ball_center: center,
                        });
                    }
                }
            }
        }
    }

    None
}
