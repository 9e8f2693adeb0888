//! Mesh connectivity and positions.
//!
//! This module provides the vertex/edge store the UV tree is grown over,
//! using petgraph's StableGraph for topology with SoA position buffers.
//! [`MeshEngine`] implements [`AdjacencyProvider`], the only view of the
//! mesh the tree builder needs.

mod adjacency;
mod engine;
mod vertex;

pub use adjacency::AdjacencyProvider;
pub use engine::MeshEngine;
pub use vertex::{Point3, VertexId, VertexState};
