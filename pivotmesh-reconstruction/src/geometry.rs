//! Ball-placement predicates shared by the seed search and the pivot test.

use crate::front::{Vertex, VertexId};
use pivotmesh_core::{Point3f, Vector3f};

/// Numerical slack of the empty-ball test: tolerates points lying exactly on
/// the sphere, such as the supporting triangle's own vertices.
pub const EMPTY_BALL_EPSILON: f32 = 1e-4;

/// Rejection threshold for near-collinear triangles, below which the
/// circumcenter is numerically undefined.
const DEGENERACY_EPSILON: f32 = 1e-8;

/// Normal of the oriented face (p0, p1, p2).
pub fn face_normal(p0: &Point3f, p1: &Point3f, p2: &Point3f) -> Vector3f {
    let edge1 = p0 - p1;
    let edge2 = p0 - p2;
    edge1.cross(&edge2).normalize()
}

/// Center of the radius-`radius` ball resting on the oriented face
/// (p0, p1, p2), on the outward-normal side.
///
/// `None` means no such ball exists: either the face's circumradius exceeds
/// `radius` or the face is degenerate. Both are ordinary candidate
/// rejections, not errors.
pub fn ball_center(p0: &Point3f, p1: &Point3f, p2: &Point3f, radius: f32) -> Option<Point3f> {
    let edge1 = p2 - p0;
    let edge2 = p1 - p0;
    let normal = edge2.cross(&edge1);
    let normal_sq = normal.norm_squared();
    if normal_sq < DEGENERACY_EPSILON {
        return None;
    }

    // Vector from p0 to the triangle's circumcenter.
    let to_circumcenter = (normal.cross(&edge2) * edge1.norm_squared()
        + edge1.cross(&normal) * edge2.norm_squared())
        / (2.0 * normal_sq);

    let h_squared = radius * radius - to_circumcenter.norm_squared();
    if h_squared < 0.0 {
        return None;
    }

    Some(p0 + to_circumcenter + face_normal(p0, p1, p2) * h_squared.sqrt())
}

/// True when no candidate vertex lies strictly inside the ball, with
/// [`EMPTY_BALL_EPSILON`] of slack for points on its surface.
pub fn is_ball_empty(
    center: &Point3f,
    candidates: &[VertexId],
    vertices: &[Vertex],
    radius: f32,
) -> bool {
    let limit = radius * radius - EMPTY_BALL_EPSILON;
    candidates
        .iter()
        .all(|&id| !((vertices[id.index()].position - center).norm_squared() < limit))
}
