//! Connectivity UV pipeline: grow, lay out, write the corner channel.
//!
//! # Algorithm Overview
//!
//! 1. **Grow (breadth-first):** Starting from the roots, claim unvisited
//!    neighbours one generation at a time, subject to the growth direction.
//! 2. **Lay out (top-down):** Spread roots across (0, 1), then split each
//!    parent's u-range among its children; v is path length to the root.
//! 3. **Write:** Copy each vertex's (u, v) to its face corners, with the
//!    sentinel for vertices the traversal never reached.

use serde::{Deserialize, Serialize};

use super::builder::{DEFAULT_MAX_GENERATIONS, GrowthDirection, build};
use super::channel::{SENTINEL_UV, UvChannel, vertex_uvs};
use super::forest::Forest;
use super::uv::{ChildOrder, layout};
use crate::diag::{console_log, console_warn};
use crate::error::UvTreeError;
use crate::mesh::{AdjacencyProvider, VertexId};

/// Configuration for the UV tree pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UvTreeConfig {
    /// Which neighbours may become children.
    pub direction: GrowthDirection,
    /// Cap on traversal rounds after the roots (default: 999).
    pub max_generations: u32,
    /// How siblings are spread across their parent's u-range.
    pub child_order: ChildOrder,
    /// UV written for unreached vertices (default: [-1, -1]).
    pub sentinel: [f32; 2],
}

impl Default for UvTreeConfig {
    fn default() -> Self {
        Self {
            direction: GrowthDirection::Omnidirectional,
            max_generations: DEFAULT_MAX_GENERATIONS,
            child_order: ChildOrder::Mirrored,
            sentinel: SENTINEL_UV,
        }
    }
}

impl UvTreeConfig {
    /// Check values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), UvTreeError> {
        if self.max_generations == 0 {
            return Err(UvTreeError::InvalidConfig(
                "maxGenerations must be at least 1".into(),
            ));
        }
        if !self.sentinel.iter().all(|c| c.is_finite()) {
            return Err(UvTreeError::InvalidConfig("sentinel must be finite".into()));
        }
        Ok(())
    }
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UvTreeStats {
    /// Number of roots.
    pub roots: usize,
    /// Number of generations, including the roots.
    pub generations: usize,
    /// Vertices that received coordinates.
    pub visited: usize,
    /// Vertices that did not.
    pub unvisited: usize,
    /// Corners that received real coordinates.
    pub reached_corners: usize,
    /// Total corners written.
    pub corner_count: usize,
}

/// Result of the UV tree computation.
#[derive(Debug, Clone)]
pub struct UvTreeResult {
    /// The laid-out forest.
    pub forest: Forest,
    /// One UV per face corner.
    pub channel: UvChannel,
    /// Run summary.
    pub stats: UvTreeStats,
}

/// The UV tree pipeline.
#[derive(Debug, Clone, Default)]
pub struct UvTreeLayout {
    config: UvTreeConfig,
}

impl UvTreeLayout {
    /// Create a pipeline with the given configuration.
    pub fn new(config: UvTreeConfig) -> Self {
        Self { config }
    }

    /// Create a pipeline with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(UvTreeConfig::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &UvTreeConfig {
        &self.config
    }

    /// Grow and lay out a forest from `roots`.
    pub fn grow<P>(&self, provider: &P, roots: &[VertexId]) -> Result<Forest, UvTreeError>
    where
        P: AdjacencyProvider + ?Sized,
    {
        self.config.validate()?;
        let mut forest = build(
            provider,
            roots,
            self.config.direction,
            self.config.max_generations,
        )
        .inspect_err(|err| console_warn!("uv tree traversal failed: {err}"))?;
        layout(&mut forest, self.config.child_order)?;
        Ok(forest)
    }

    /// Compute the per-corner UV channel.
    ///
    /// # Arguments
    ///
    /// * `provider` - Mesh adjacency and positions
    /// * `roots` - Traversal roots, in the order that sets their u spacing
    /// * `corner_vertices` - Owning vertex of each face corner
    pub fn compute<P>(
        &self,
        provider: &P,
        roots: &[VertexId],
        corner_vertices: &[VertexId],
    ) -> Result<UvTreeResult, UvTreeError>
    where
        P: AdjacencyProvider + ?Sized,
    {
        let forest = self.grow(provider, roots)?;
        let channel = UvChannel::from_forest(&forest, corner_vertices, self.config.sentinel);

        let vertex_total = provider.vertices().len();
        let stats = UvTreeStats {
            roots: roots.len(),
            generations: forest.generation_count(),
            visited: forest.len(),
            unvisited: vertex_total.saturating_sub(forest.len()),
            reached_corners: channel.reached_corners(),
            corner_count: channel.len(),
        };

        console_log!(
            "uv tree: {} generations, {} / {} vertices reached",
            stats.generations,
            stats.visited,
            vertex_total
        );
        if stats.unvisited > 0 {
            console_warn!(
                "{} vertices unreachable from the roots were given sentinel UVs",
                stats.unvisited
            );
        }

        Ok(UvTreeResult {
            forest,
            channel,
            stats,
        })
    }

    /// Compute per-vertex UVs as [u0, v0, u1, v1, ...] over `0..vertex_count`.
    pub fn compute_vertex_uvs<P>(
        &self,
        provider: &P,
        roots: &[VertexId],
        vertex_count: usize,
    ) -> Result<Vec<f32>, UvTreeError>
    where
        P: AdjacencyProvider + ?Sized,
    {
        let forest = self.grow(provider, roots)?;
        Ok(vertex_uvs(&forest, vertex_count, self.config.sentinel))
    }
}
