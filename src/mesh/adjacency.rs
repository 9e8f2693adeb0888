//! The read-only view of a mesh that the tree builder walks.

use super::vertex::{Point3, VertexId};

/// Source of vertex connectivity and positions.
///
/// `neighbors` must yield the same order for the same vertex within a run;
/// traversal is only as deterministic as this ordering.
pub trait AdjacencyProvider {
    /// All vertices of the mesh, in ascending id order.
    fn vertices(&self) -> Vec<VertexId>;

    /// Vertices directly connected to `vertex` by an edge.
    fn neighbors(&self, vertex: VertexId) -> Vec<VertexId>;

    /// Position of `vertex`, or `None` if the vertex is unknown.
    fn position(&self, vertex: VertexId) -> Option<Point3>;
}
