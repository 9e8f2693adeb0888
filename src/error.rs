//! Error type shared by the tree builder, the layout engine and the pipeline.

use thiserror::Error;

use crate::mesh::VertexId;

/// Errors produced while growing or laying out a UV tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UvTreeError {
    /// The root selection was empty.
    #[error("no root vertices selected")]
    EmptyRoots,

    /// A root does not exist in the mesh.
    #[error("root {0} is not a vertex of the mesh")]
    UnknownRoot(VertexId),

    /// A root was listed more than once.
    #[error("root {0} was selected more than once")]
    DuplicateRoot(VertexId),

    /// The traversal was still producing generations when the round cap was reached.
    ///
    /// Indicates adjacency data that never exhausts the unvisited set.
    #[error("traversal still growing after {limit} generations ({unvisited} vertices unvisited)")]
    GenerationLimit {
        /// The configured round cap.
        limit: u32,
        /// Vertices still unvisited when the cap was hit.
        unvisited: usize,
    },

    /// Layout was requested for a forest that already carries coordinates.
    #[error("forest has already been laid out")]
    AlreadyLaidOut,

    /// A configuration value could not be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
