//! Uniform voxel grid for radius-bounded neighbor queries.
//!
//! Voxels have edge length 2r so that every point within r of a query point
//! is guaranteed to fall inside the 3x3x3 voxel block around it. Each vertex
//! is assigned to exactly one voxel at build time and never reassigned.

use crate::front::{Vertex, VertexId};
use pivotmesh_core::{Error, Point3f, Result, Vector3i};

/// Voxel hash over the vertex set, bucket size 2x ball radius.
#[derive(Debug)]
pub struct SpatialGrid {
    voxel_size: f32,
    min_corner: Point3f,
    dims: Vector3i,
    voxels: Vec<Vec<VertexId>>,
}

impl SpatialGrid {
    /// Bucket every vertex by position. The grid dimensions are clamped to at
    /// least one voxel per axis so coincident or coplanar inputs still hash.
    pub fn build(vertices: &[Vertex], radius: f32) -> Result<Self> {
        if vertices.is_empty() {
            return Err(Error::InvalidData(
                "cannot build a spatial grid over an empty vertex set".to_string(),
            ));
        }

        let voxel_size = radius * 2.0;
        let mut min_corner = vertices[0].position;
        let mut max_corner = vertices[0].position;
        for vertex in vertices {
            for axis in 0..3 {
                min_corner[axis] = min_corner[axis].min(vertex.position[axis]);
                max_corner[axis] = max_corner[axis].max(vertex.position[axis]);
            }
        }

        let extent = max_corner - min_corner;
        let dims = Vector3i::new(
            ((extent.x / voxel_size).ceil() as i32).max(1),
            ((extent.y / voxel_size).ceil() as i32).max(1),
            ((extent.z / voxel_size).ceil() as i32).max(1),
        );

        let mut grid = Self {
            voxel_size,
            min_corner,
            dims,
            voxels: vec![Vec::new(); (dims.x * dims.y * dims.z) as usize],
        };

        for (index, vertex) in vertices.iter().enumerate() {
            let voxel = grid.voxel_index(&vertex.position);
            let flat = grid.flat_index(&voxel);
            grid.voxels[flat].push(VertexId::new(index));
        }

        Ok(grid)
    }

    pub fn dims(&self) -> Vector3i {
        self.dims
    }

    pub fn voxel_size(&self) -> f32 {
        self.voxel_size
    }

    /// Iterate the voxel buckets in flat index order.
    pub fn voxels(&self) -> impl Iterator<Item = &[VertexId]> {
        self.voxels.iter().map(|bucket| bucket.as_slice())
    }

    /// All vertices within `voxel_size` of `point` whose position is not in
    /// `ignore`, gathered from the 3x3x3 voxel block around `point`'s voxel.
    /// Block offsets that leave the grid are skipped, not wrapped.
    ///
    /// The ignore list matches by position, so duplicate input points at an
    /// ignored position are filtered with it.
    pub fn neighborhood(
        &self,
        point: &Point3f,
        ignore: &[Point3f],
        vertices: &[Vertex],
    ) -> Vec<VertexId> {
        let center = self.voxel_index(point);
        let limit = self.voxel_size * self.voxel_size;
        let mut result = Vec::new();

        for x_offset in -1..=1 {
            for y_offset in -1..=1 {
                for z_offset in -1..=1 {
                    let index = Vector3i::new(
                        center.x + x_offset,
                        center.y + y_offset,
                        center.z + z_offset,
                    );
                    if index.x < 0
                        || index.x >= self.dims.x
                        || index.y < 0
                        || index.y >= self.dims.y
                        || index.z < 0
                        || index.z >= self.dims.z
                    {
                        continue;
                    }
                    for &id in &self.voxels[self.flat_index(&index)] {
                        let position = vertices[id.index()].position;
                        if (position - point).norm_squared() < limit && !ignore.contains(&position)
                        {
                            result.push(id);
                        }
                    }
                }
            }
        }

        result
    }

    /// Voxel coordinates of `point`, clamped into the grid.
    fn voxel_index(&self, point: &Point3f) -> Vector3i {
        let relative = (point - self.min_corner) / self.voxel_size;
        Vector3i::new(
            (relative.x as i32).clamp(0, self.dims.x - 1),
            (relative.y as i32).clamp(0, self.dims.y - 1),
            (relative.z as i32).clamp(0, self.dims.z - 1),
        )
    }

    fn flat_index(&self, index: &Vector3i) -> usize {
        (index.z * self.dims.x * self.dims.y + index.y * self.dims.x + index.x) as usize
    }
}
