//! Connectivity-driven UV layout.
//!
//! This module grows a forest of tree nodes over the mesh adjacency and lays
//! it out in UV space: u spreads sibling branches apart, v measures distance
//! travelled from the nearest root. The resulting coordinates are written to
//! a per-corner UV channel.

pub mod builder;
pub mod channel;
pub mod forest;
pub mod uv;
pub mod uv_tree;

pub use builder::{DEFAULT_MAX_GENERATIONS, GrowthDirection};
pub use channel::{SENTINEL_UV, UvChannel};
pub use forest::{Forest, NodeIndex, TreeNode};
pub use uv::ChildOrder;
pub use uv_tree::{UvTreeConfig, UvTreeLayout, UvTreeResult, UvTreeStats};
