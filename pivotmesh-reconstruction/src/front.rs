//! Advancing-front topology: vertex/edge arenas and the active-edge stack.
//!
//! Edges form circular doubly-linked loops through `prev`/`next` links, and
//! vertices keep back-references to the edges incident on them. Both kinds of
//! link are cyclic, so vertices and edges live in append-only arenas addressed
//! by stable integer handles instead of owned pointers. Retired edges stay in
//! the arena; their status transition to [`EdgeStatus::Inner`] or
//! [`EdgeStatus::Boundary`] is terminal.

use pivotmesh_core::{NormalPoint3f, Point3f, PointCloud, Vector3f};

/// Stable handle into the vertex arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexId(u32);

impl VertexId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Stable handle into the edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(u32);

impl EdgeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Lifecycle of a front edge. `Active` edges await a pivot attempt; `Inner`
/// edges were consumed by a join or glue; `Boundary` edges failed their pivot.
/// Both retired states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStatus {
    Active,
    Inner,
    Boundary,
}

/// A reconstruction vertex: one per input point, never destroyed.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub position: Point3f,
    pub normal: Vector3f,
    /// Set once the vertex participates in any emitted triangle.
    pub used: bool,
    /// Every edge ever created with this vertex as an endpoint, retired or not.
    pub edges: Vec<EdgeId>,
}

/// A directed front edge together with the ball center that produced it.
#[derive(Debug, Clone)]
pub struct Edge {
    pub start: VertexId,
    pub end: VertexId,
    /// The third vertex of the triangle this edge was created from.
    pub opposite: VertexId,
    pub prev: EdgeId,
    pub next: EdgeId,
    pub status: EdgeStatus,
    pub center: Point3f,
}

/// The advancing front: vertex and edge arenas plus the LIFO stack of edges
/// awaiting a pivot attempt.
///
/// The stack is pruned lazily: retired edges are dropped when they surface,
/// not when they retire. The LIFO order is a locality heuristic that keeps
/// the front completing one region before drifting to another.
#[derive(Debug)]
pub struct Front {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) edges: Vec<Edge>,
    stack: Vec<EdgeId>,
}

impl Front {
    /// Build the vertex arena from an oriented point cloud. No edges exist
    /// until [`Front::seed`] installs the initial loop.
    pub fn new(cloud: &PointCloud<NormalPoint3f>) -> Self {
        let vertices = cloud
            .iter()
            .map(|p| Vertex {
                position: p.position,
                normal: p.normal,
                used: false,
                edges: Vec::new(),
            })
            .collect();

        Self {
            vertices,
            edges: Vec::new(),
            stack: Vec::new(),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn mark_used(&mut self, id: VertexId) {
        self.vertices[id.index()].used = true;
    }

    /// A vertex is on the front while any incident edge is still active.
    pub fn on_front(&self, id: VertexId) -> bool {
        self.vertex(id)
            .edges
            .iter()
            .any(|&e| self.edge(e).status == EdgeStatus::Active)
    }

    /// Install the seed triangle's three edges as a closed loop and push them
    /// onto the active stack.
    pub fn seed(&mut self, face: [VertexId; 3], ball_center: Point3f) {
        let [v0, v1, v2] = face;
        let e0 = self.alloc_edge(v0, v1, v2, ball_center);
        let e1 = self.alloc_edge(v1, v2, v0, ball_center);
        let e2 = self.alloc_edge(v2, v0, v1, ball_center);

        self.edges[e0.index()].prev = e2;
        self.edges[e0.index()].next = e1;
        self.edges[e1.index()].prev = e0;
        self.edges[e1.index()].next = e2;
        self.edges[e2.index()].prev = e1;
        self.edges[e2.index()].next = e0;

        self.vertices[v0.index()].edges.extend([e0, e2]);
        self.vertices[v1.index()].edges.extend([e0, e1]);
        self.vertices[v2.index()].edges.extend([e1, e2]);

        self.stack.extend([e0, e1, e2]);
    }

    /// The next edge to pivot around: the topmost active stack entry.
    /// Retired entries on top are discarded; the returned edge stays on the
    /// stack until it retires too. `None` means the front is exhausted.
    pub fn active_edge(&mut self) -> Option<EdgeId> {
        while let Some(&top) = self.stack.last() {
            if self.edges[top.index()].status == EdgeStatus::Active {
                return Some(top);
            }
            self.stack.pop();
        }
        None
    }

    /// A failed pivot retires the edge permanently.
    pub fn mark_boundary(&mut self, id: EdgeId) {
        self.edges[id.index()].status = EdgeStatus::Boundary;
    }

    /// Split edge (i,j) into (i,k) and (k,j) after a successful pivot onto
    /// `pivot`: the two new edges are spliced into the loop in place of the
    /// retired original, registered on their endpoints, and pushed onto the
    /// stack. Returns them for reverse-edge gluing.
    pub fn join(&mut self, e_ij: EdgeId, pivot: VertexId, ball_center: Point3f) -> (EdgeId, EdgeId) {
        let (start, end, prev, next) = {
            let e = &self.edges[e_ij.index()];
            (e.start, e.end, e.prev, e.next)
        };

        let e_ik = self.alloc_edge(start, pivot, end, ball_center);
        let e_kj = self.alloc_edge(pivot, end, start, ball_center);

        self.edges[e_ik.index()].next = e_kj;
        self.edges[e_ik.index()].prev = prev;
        self.edges[prev.index()].next = e_ik;
        self.vertices[start.index()].edges.push(e_ik);

        self.edges[e_kj.index()].prev = e_ik;
        self.edges[e_kj.index()].next = next;
        self.edges[next.index()].prev = e_kj;
        self.vertices[end.index()].edges.push(e_kj);

        self.vertices[pivot.index()].used = true;
        self.vertices[pivot.index()].edges.extend([e_ik, e_kj]);

        self.stack.extend([e_ik, e_kj]);

        self.retire(e_ij);

        (e_ik, e_kj)
    }

    /// Merge two edges known to be reverse-direction duplicates of the same
    /// undirected pair, retiring both.
    ///
    /// The four structural cases must stay distinct: a two-edge loop collapses
    /// entirely, the two adjacent cases splice around the pair in opposite
    /// directions, and only the general case cross-splices both loops.
    pub fn glue(&mut self, edge1: EdgeId, edge2: EdgeId) {
        let (e1_prev, e1_next) = {
            let e = &self.edges[edge1.index()];
            (e.prev, e.next)
        };
        let (e2_prev, e2_next) = {
            let e = &self.edges[edge2.index()];
            (e.prev, e.next)
        };

        // Two-edge loop: nothing survives.
        if e1_next == edge2 && e1_prev == edge2 && e2_next == edge1 && e2_prev == edge1 {
            self.retire(edge1);
            self.retire(edge2);
            return;
        }

        // Adjacent, edge2 follows edge1.
        if e1_next == edge2 && e2_prev == edge1 {
            self.edges[e1_prev.index()].next = e2_next;
            self.edges[e2_next.index()].prev = e1_prev;
            self.retire(edge1);
            self.retire(edge2);
            return;
        }

        // Adjacent, edge2 precedes edge1.
        if e1_prev == edge2 && e2_next == edge1 {
            self.edges[e1_next.index()].prev = e2_prev;
            self.edges[e2_prev.index()].next = e1_next;
            self.retire(edge1);
            self.retire(edge2);
            return;
        }

        // General case: cross-splice the neighbors of both edges.
        self.edges[e1_prev.index()].next = e2_next;
        self.edges[e2_next.index()].prev = e1_prev;
        self.edges[e1_next.index()].prev = e2_prev;
        self.edges[e2_prev.index()].next = e1_next;

        self.retire(edge1);
        self.retire(edge2);
    }

    /// Find a reverse-direction duplicate of `id` by scanning the start
    /// vertex's incident edges for one that starts at `id`'s end.
    pub fn reverse_edge_on_front(&self, id: EdgeId) -> Option<EdgeId> {
        let edge = self.edge(id);
        self.vertex(edge.start)
            .edges
            .iter()
            .copied()
            .find(|&candidate| self.edge(candidate).start == edge.end)
    }

    fn retire(&mut self, id: EdgeId) {
        self.edges[id.index()].status = EdgeStatus::Inner;
    }

    /// New edges are born active and self-looped until spliced in.
    pub(crate) fn alloc_edge(
        &mut self,
        start: VertexId,
        end: VertexId,
        opposite: VertexId,
        center: Point3f,
    ) -> EdgeId {
        let id = EdgeId::new(self.edges.len());
        self.edges.push(Edge {
            start,
            end,
            opposite,
            prev: id,
            next: id,
            status: EdgeStatus::Active,
            center,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planar_cloud(positions: &[(f32, f32, f32)]) -> PointCloud<NormalPoint3f> {
        positions
            .iter()
            .map(|&(x, y, z)| NormalPoint3f {
                position: Point3f::new(x, y, z),
                normal: Vector3f::new(0.0, 0.0, 1.0),
            })
            .collect()
    }

    fn seeded_front() -> Front {
        let cloud = planar_cloud(&[
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (0.0, 1.0, 0.0),
            (1.0, 1.0, 0.0),
        ]);
        let mut front = Front::new(&cloud);
        front.seed(
            [VertexId::new(0), VertexId::new(1), VertexId::new(2)],
            Point3f::new(0.5, 0.5, 0.7),
        );
        front
    }

    fn assert_loops_valid(front: &Front) {
        for index in 0..front.edge_count() {
            let id = EdgeId::new(index);
            let edge = front.edge(id);
            if edge.status == EdgeStatus::Inner {
                continue;
            }
            assert_eq!(front.edge(edge.next).prev, id, "next.prev broken at {index}");
            assert_eq!(front.edge(edge.prev).next, id, "prev.next broken at {index}");
        }
    }

    #[test]
    fn test_seed_builds_closed_three_loop() {
        let front = seeded_front();
        assert_eq!(front.edge_count(), 3);
        assert_loops_valid(&front);

        let e0 = front.edge(EdgeId::new(0));
        assert_eq!(e0.start, VertexId::new(0));
        assert_eq!(e0.end, VertexId::new(1));
        assert_eq!(e0.opposite, VertexId::new(2));
        assert_eq!(front.vertex(VertexId::new(0)).edges.len(), 2);
    }

    #[test]
    fn test_active_edge_is_lifo_and_lazy() {
        let mut front = seeded_front();
        // Top of the stack is the last seed edge.
        assert_eq!(front.active_edge(), Some(EdgeId::new(2)));
        // Retiring it makes the next pick skip over it lazily.
        front.mark_boundary(EdgeId::new(2));
        assert_eq!(front.active_edge(), Some(EdgeId::new(1)));
    }

    #[test]
    fn test_active_edge_exhaustion() {
        let mut front = seeded_front();
        for index in 0..3 {
            front.mark_boundary(EdgeId::new(index));
        }
        assert_eq!(front.active_edge(), None);
    }

    #[test]
    fn test_join_splices_and_retires() {
        let mut front = seeded_front();
        let e1 = EdgeId::new(1);
        let pivot = VertexId::new(3);

        let (e_ik, e_kj) = front.join(e1, pivot, Point3f::new(0.5, 0.5, 0.7));

        assert_eq!(front.edge(e1).status, EdgeStatus::Inner);
        assert!(front.vertex(pivot).used);
        assert_loops_valid(&front);

        let ik = front.edge(e_ik);
        assert_eq!(ik.start, VertexId::new(1));
        assert_eq!(ik.end, pivot);
        assert_eq!(ik.opposite, VertexId::new(2));
        let kj = front.edge(e_kj);
        assert_eq!(kj.start, pivot);
        assert_eq!(kj.end, VertexId::new(2));
        assert_eq!(kj.opposite, VertexId::new(1));

        // The loop grew from three edges to four live ones.
        let live = (0..front.edge_count())
            .filter(|&i| front.edge(EdgeId::new(i)).status == EdgeStatus::Active)
            .count();
        assert_eq!(live, 4);
    }

    #[test]
    fn test_join_pushes_new_edges_on_stack() {
        let mut front = seeded_front();
        let (_, e_kj) = front.join(EdgeId::new(2), VertexId::new(3), Point3f::origin());
        assert_eq!(front.active_edge(), Some(e_kj));
    }

    #[test]
    fn test_glue_two_edge_loop_collapses() {
        let mut front = seeded_front();
        let a = front.alloc_edge(VertexId::new(0), VertexId::new(1), VertexId::new(2), Point3f::origin());
        let b = front.alloc_edge(VertexId::new(1), VertexId::new(0), VertexId::new(3), Point3f::origin());
        front.edges[a.index()].prev = b;
        front.edges[a.index()].next = b;
        front.edges[b.index()].prev = a;
        front.edges[b.index()].next = a;

        front.glue(a, b);
        assert_eq!(front.edge(a).status, EdgeStatus::Inner);
        assert_eq!(front.edge(b).status, EdgeStatus::Inner);
    }

    #[test]
    fn test_glue_adjacent_pair_splices_around() {
        let mut front = seeded_front();
        // e1 directly follows e0 in the seed loop.
        let e0 = EdgeId::new(0);
        let e1 = EdgeId::new(1);
        front.glue(e0, e1);
        assert_eq!(front.edge(e0).status, EdgeStatus::Inner);
        assert_eq!(front.edge(e1).status, EdgeStatus::Inner);
        // The survivor is self-looped.
        let e2 = front.edge(EdgeId::new(2));
        assert_eq!(e2.prev, EdgeId::new(2));
        assert_eq!(e2.next, EdgeId::new(2));
    }

    #[test]
    fn test_glue_reversed_adjacent_pair_splices_around() {
        let mut front = seeded_front();
        // e0 directly precedes e1, so the pair is handed over in the
        // opposite order from the test above.
        let e0 = EdgeId::new(0);
        let e1 = EdgeId::new(1);
        front.glue(e1, e0);
        assert_eq!(front.edge(e0).status, EdgeStatus::Inner);
        assert_eq!(front.edge(e1).status, EdgeStatus::Inner);
        let e2 = front.edge(EdgeId::new(2));
        assert_eq!(e2.prev, EdgeId::new(2));
        assert_eq!(e2.next, EdgeId::new(2));
        assert_loops_valid(&front);
    }

    #[test]
    fn test_glue_nonadjacent_pair_cross_splices() {
        let cloud = planar_cloud(&[
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (1.0, 1.0, 0.0),
            (0.0, 1.0, 0.0),
        ]);
        let mut front = Front::new(&cloud);
        let a = front.alloc_edge(VertexId::new(0), VertexId::new(1), VertexId::new(2), Point3f::origin());
        let b = front.alloc_edge(VertexId::new(1), VertexId::new(2), VertexId::new(3), Point3f::origin());
        let c = front.alloc_edge(VertexId::new(2), VertexId::new(3), VertexId::new(0), Point3f::origin());
        let d = front.alloc_edge(VertexId::new(3), VertexId::new(0), VertexId::new(1), Point3f::origin());
        let cycle = [a, b, c, d];
        for (index, &id) in cycle.iter().enumerate() {
            front.edges[id.index()].next = cycle[(index + 1) % 4];
            front.edges[id.index()].prev = cycle[(index + 3) % 4];
        }

        // a and c sit on opposite sides of the loop, so gluing them
        // splices both neighbor pairs across the gap.
        front.glue(a, c);
        assert_eq!(front.edge(a).status, EdgeStatus::Inner);
        assert_eq!(front.edge(c).status, EdgeStatus::Inner);
        let b_edge = front.edge(b);
        assert_eq!(b_edge.prev, b);
        assert_eq!(b_edge.next, b);
        let d_edge = front.edge(d);
        assert_eq!(d_edge.prev, d);
        assert_eq!(d_edge.next, d);
        assert_loops_valid(&front);
    }

    #[test]
    fn test_reverse_edge_lookup() {
        let mut front = seeded_front();
        let forward = EdgeId::new(0);
        assert_eq!(front.reverse_edge_on_front(forward), None);

        let reverse = front.alloc_edge(
            VertexId::new(1),
            VertexId::new(0),
            VertexId::new(3),
            Point3f::origin(),
        );
        front.vertices[0].edges.push(reverse);
        front.vertices[1].edges.push(reverse);
        assert_eq!(front.reverse_edge_on_front(forward), Some(reverse));
    }

    #[test]
    fn test_on_front_tracks_active_incident_edges() {
        let mut front = seeded_front();
        assert!(front.on_front(VertexId::new(0)));
        assert!(!front.on_front(VertexId::new(3)));

        front.mark_boundary(EdgeId::new(0));
        front.mark_boundary(EdgeId::new(2));
        // v0's incident edges are now all retired.
        assert!(!front.on_front(VertexId::new(0)));
    }
}
