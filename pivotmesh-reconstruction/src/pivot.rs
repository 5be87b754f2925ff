//! The ball-pivot test: rotate the supporting sphere around a front edge
//! until it rests on a new point.

use crate::front::{EdgeId, EdgeStatus, Front, VertexId};
use crate::geometry::{ball_center, face_normal, is_ball_empty};
use crate::grid::SpatialGrid;
use pivotmesh_core::Point3f;
use std::f32::consts::PI;

/// The vertex the pivoting ball came to rest on, with the new ball center.
#[derive(Debug, Clone)]
pub struct PivotResult {
    pub vertex: VertexId,
    pub ball_center: Point3f,
}

/// Pivot the ball around the hinge edge `edge_id`.
///
/// Every neighbor of the edge midpoint is tried as the third vertex of a new
/// triangle; the candidate reached by the smallest rotation from the edge's
/// current ball position wins, provided its ball is empty. The rotation
/// angle is unwrapped past a half turn using the hinge direction, since the
/// sphere can roll through more than pi before touching a point.
///
/// `None` retires the edge as a boundary: no candidate admits a resting
/// ball, or the winning ball encloses another neighbor.
pub fn ball_pivot(
    front: &Front,
    grid: &SpatialGrid,
    edge_id: EdgeId,
    radius: f32,
) -> Option<PivotResult> {
    let edge = front.edge(edge_id);
    let start = front.vertex(edge.start).position;
    let end = front.vertex(edge.end).position;
    let opposite = front.vertex(edge.opposite).position;

    let midpoint = Point3f::from((start.coords + end.coords) / 2.0);
    let old_direction = (edge.center - midpoint).normalize();

    let neighbors = grid.neighborhood(&midpoint, &[start, end, opposite], front.vertices());

    let mut smallest_angle = f32::INFINITY;
    let mut best: Option<(VertexId, Point3f)> = None;

    for &candidate_id in &neighbors {
        let candidate = front.vertex(candidate_id);

        // The new face (end, start, candidate) must agree with the
        // candidate's own orientation.
        let normal = face_normal(&end, &start, &candidate.position);
        if normal.dot(&candidate.normal) < 0.0 {
            continue;
        }

        let Some(center) = ball_center(&end, &start, &candidate.position, radius) else {
            continue;
        };

        // Anti-oscillation: a candidate already tied to either hinge
        // endpoint through a retired edge would re-close a triangle the
        // front just consumed.
        if linked_through_inner_edge(front, candidate_id, edge.start, edge.end) {
            continue;
        }

        let new_direction = (center - midpoint).normalize();
        let mut angle = old_direction.dot(&new_direction).clamp(-1.0, 1.0).acos();
        if new_direction.cross(&old_direction).dot(&(start - end)) < 0.0 {
            angle += PI;
        }

        if angle < smallest_angle {
            smallest_angle = angle;
            best = Some((candidate_id, center));
        }
    }

    let (vertex, center) = best?;
    // Verify against every neighbor gathered above, not just the winner's
    // own query.
    if is_ball_empty(&center, &neighbors, front.vertices(), radius) {
        Some(PivotResult {
            vertex,
            ball_center: center,
        })
    } else {
        None
    }
}

fn linked_through_inner_edge(
    front: &Front,
    candidate: VertexId,
    start: VertexId,
    end: VertexId,
) -> bool {
    front.vertex(candidate).edges.iter().any(|&id| {
        let edge = front.edge(id);
        let far_end = if edge.start == candidate {
            edge.end
        } else {
            edge.start
        };
        edge.status == EdgeStatus::Inner && (far_end == start || far_end == end)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::find_seed_triangle;
    use approx::assert_relative_eq;
    use pivotmesh_core::{NormalPoint3f, PointCloud, Vector3f};

    fn seeded_square() -> (Front, SpatialGrid) {
        let cloud: PointCloud<NormalPoint3f> = [
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (1.0, 1.0, 0.0),
            (0.0, 1.0, 0.0),
        ]
        .iter()
        .map(|&(x, y, z)| NormalPoint3f {
            position: Point3f::new(x, y, z),
            normal: Vector3f::new(0.0, 0.0, 1.0),
        })
        .collect();

        let mut front = Front::new(&cloud);
        let grid = SpatialGrid::build(front.vertices(), 1.0).unwrap();
        let seed = find_seed_triangle(&mut front, &grid, 1.0).unwrap();
        front.seed(seed.face, seed.ball_center);
        (front, grid)
    }

    #[test]
    fn test_pivot_reaches_remaining_corner() {
        let (front, grid) = seeded_square();
        // Seed face is (v0, v1, v3); its middle edge (v1, v3) pivots onto
        // the far corner v2.
        let result = ball_pivot(&front, &grid, EdgeId::new(1), 1.0).expect("pivot expected");
        assert_eq!(result.vertex.index(), 2);
        assert_relative_eq!(result.ball_center.x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(result.ball_center.y, 0.5, epsilon = 1e-6);
        assert_relative_eq!(result.ball_center.z, 0.5_f32.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn test_pivot_skips_candidate_behind_retired_edge() {
        let (mut front, grid) = seeded_square();
        // A retired edge between the far corner and hinge endpoint v1, as
        // an earlier join would leave behind. Pivoting onto the corner
        // would re-close that triangle.
        let candidate = VertexId::new(2);
        let link = front.alloc_edge(
            candidate,
            VertexId::new(1),
            VertexId::new(0),
            Point3f::origin(),
        );
        front.edges[link.index()].status = EdgeStatus::Inner;
        front.vertices[candidate.index()].edges.push(link);

        assert!(ball_pivot(&front, &grid, EdgeId::new(1), 1.0).is_none());
    }

    #[test]
    fn test_pivot_accepts_candidate_with_live_link() {
        let (mut front, grid) = seeded_square();
        // The same link left active does not block the pivot.
        let candidate = VertexId::new(2);
        let link = front.alloc_edge(
            candidate,
            VertexId::new(1),
            VertexId::new(0),
            Point3f::origin(),
        );
        front.vertices[candidate.index()].edges.push(link);

        let result = ball_pivot(&front, &grid, EdgeId::new(1), 1.0).expect("pivot expected");
        assert_eq!(result.vertex.index(), 2);
    }

    #[test]
    fn test_pivot_rejects_misoriented_candidate() {
        let (front, grid) = seeded_square();
        // Around edge (v3, v0) the only candidate triangle would face
        // downward, against the cloud normals.
        assert!(ball_pivot(&front, &grid, EdgeId::new(2), 1.0).is_none());
    }
}
