//! Spatial indexing for nearest-vertex picking.
//!
//! This module provides an R-tree based spatial index over 3D vertex
//! positions, used to choose traversal roots by location.

mod rtree;

pub use rtree::SpatialIndex;
