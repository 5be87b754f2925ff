//! # pivotmesh-reconstruction
//!
//! Ball-pivoting surface reconstruction for oriented point clouds.
//!
//! A sphere of fixed radius rolls over the point set, emitting a triangle
//! each time it comes to rest on three points without enclosing any other.
//! The advancing front — the boundary of the partially reconstructed mesh —
//! is maintained as circular doubly-linked edge loops consumed through a
//! LIFO stack.

pub mod front;
pub mod geometry;
pub mod grid;
pub mod pivot;
pub mod seed;

pub use front::{Edge, EdgeId, EdgeStatus, Front, Vertex, VertexId};
pub use geometry::{ball_center, face_normal, is_ball_empty, EMPTY_BALL_EPSILON};
pub use grid::SpatialGrid;
pub use pivot::{ball_pivot, PivotResult};
pub use seed::{find_seed_triangle, SeedResult};

use pivotmesh_core::{Error, NormalPoint3f, PointCloud, Result, Triangle};
use tracing::debug;

/// Reconstruct a triangle mesh from an oriented point cloud by rolling a
/// ball of the given radius over it.
///
/// The triangle sequence is deterministic for a given point order and
/// radius. An empty cloud, or one that admits no seed triangle at this
/// radius, yields an empty mesh rather than an error.
///
/// A single front is grown from the first seed found; on multi-component
/// clouds, points unreachable from that front are left untriangulated.
pub fn reconstruct(cloud: &PointCloud<NormalPoint3f>, radius: f32) -> Result<Vec<Triangle>> {
    if radius <= 0.0 {
        return Err(Error::InvalidData(
            "ball radius must be positive".to_string(),
        ));
    }
    if cloud.is_empty() {
        return Ok(Vec::new());
    }

    let mut front = Front::new(cloud);
    let grid = SpatialGrid::build(front.vertices(), radius)?;

    let Some(seed) = find_seed_triangle(&mut front, &grid, radius) else {
        debug!("no seed triangle found");
        return Ok(Vec::new());
    };
    debug!(
        v0 = seed.face[0].index(),
        v1 = seed.face[1].index(),
        v2 = seed.face[2].index(),
        "seed triangle found"
    );

    let mut triangles = vec![Triangle::new(
        front.vertex(seed.face[0]).position,
        front.vertex(seed.face[1]).position,
        front.vertex(seed.face[2]).position,
    )];
    front.seed(seed.face, seed.ball_center);

    while let Some(e_ij) = front.active_edge() {
        match ball_pivot(&front, &grid, e_ij, radius) {
            Some(pivot) if !front.vertex(pivot.vertex).used || front.on_front(pivot.vertex) => {
                let edge = front.edge(e_ij);
                triangles.push(Triangle::new(
                    front.vertex(edge.start).position,
                    front.vertex(pivot.vertex).position,
                    front.vertex(edge.end).position,
                ));

                let (e_ik, e_kj) = front.join(e_ij, pivot.vertex, pivot.ball_center);
                if let Some(e_ki) = front.reverse_edge_on_front(e_ik) {
                    front.glue(e_ik, e_ki);
                }
                if let Some(e_jk) = front.reverse_edge_on_front(e_kj) {
                    front.glue(e_kj, e_jk);
                }
            }
            _ => front.mark_boundary(e_ij),
        }
    }

    debug!(triangles = triangles.len(), "front exhausted");
    Ok(triangles)
}
