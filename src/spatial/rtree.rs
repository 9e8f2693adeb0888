//! R-tree based spatial index using the rstar crate.
//!
//! Provides O(log n) spatial queries over vertex positions for:
//! - Nearest neighbor (root picking)
//! - Point-in-radius

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::mesh::{Point3, VertexId};

/// A point in the spatial index with associated vertex ID.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexPoint {
    /// The vertex identifier.
    pub id: VertexId,
    /// Object-space position.
    pub position: [f32; 3],
}

impl VertexPoint {
    /// Create a new VertexPoint.
    pub fn new(id: VertexId, position: Point3) -> Self {
        Self {
            id,
            position: [position.x, position.y, position.z],
        }
    }
}

impl RTreeObject for VertexPoint {
    type Envelope = AABB<[f32; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for VertexPoint {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        let dz = self.position[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

/// Spatial index for mesh vertices.
///
/// Uses an R*-tree for efficient spatial queries.
pub struct SpatialIndex {
    tree: RTree<VertexPoint>,
}

impl SpatialIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Find the nearest vertex within a maximum distance.
    pub fn nearest_within(&self, point: Point3, max_distance: f32) -> Option<VertexId> {
        let query = [point.x, point.y, point.z];
        let max_distance_sq = max_distance * max_distance;
        self.tree
            .nearest_neighbor(&query)
            .filter(|vertex| vertex.distance_2(&query) <= max_distance_sq)
            .map(|vertex| vertex.id)
    }

    /// Find all vertices within a radius of a point.
    pub fn in_radius(&self, point: Point3, radius: f32) -> Vec<VertexId> {
        self.tree
            .locate_within_distance([point.x, point.y, point.z], radius * radius)
            .map(|vertex| vertex.id)
            .collect()
    }

    /// Rebuild the index from a list of (id, position) pairs.
    ///
    /// This is more efficient than incremental inserts for bulk updates.
    pub fn rebuild(&mut self, points: &[(VertexId, Point3)]) {
        let vertex_points: Vec<_> = points
            .iter()
            .map(|&(id, position)| VertexPoint::new(id, position))
            .collect();

        self.tree = RTree::bulk_load(vertex_points);
    }

    /// Clear all vertices from the index.
    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }

    /// Get the number of vertices in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
