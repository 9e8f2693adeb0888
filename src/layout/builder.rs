//! Breadth-first tree builder.
//!
//! Grows a [`Forest`] outward from the root vertices, one generation per
//! round. A vertex is claimed by the first node (in generation order, then
//! adjacency order) that reaches it and passes the growth direction test;
//! nothing is ever revisited or rerouted, so vertices that can only be
//! reached through a rejected edge stay unvisited.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::forest::{Forest, NodeIndex};
use crate::diag::{console_debug, console_log};
use crate::error::UvTreeError;
use crate::mesh::{AdjacencyProvider, Point3, VertexId};

/// Default cap on traversal rounds.
pub const DEFAULT_MAX_GENERATIONS: u32 = 999;

/// Which neighbours may become children, by elevation relative to the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GrowthDirection {
    /// Any neighbour.
    #[default]
    Omnidirectional,
    /// Neighbours at or above the parent.
    Upward,
    /// Neighbours at or below the parent.
    Downward,
}

impl GrowthDirection {
    /// Whether an edge from `parent` to `candidate` may be followed.
    #[inline]
    pub fn accepts(self, parent: Point3, candidate: Point3) -> bool {
        match self {
            Self::Omnidirectional => true,
            Self::Upward => candidate.z >= parent.z,
            Self::Downward => candidate.z <= parent.z,
        }
    }
}

/// Grow a forest from `roots` over the provider's adjacency.
///
/// # Errors
///
/// - [`UvTreeError::EmptyRoots`] if `roots` is empty
/// - [`UvTreeError::UnknownRoot`] / [`UvTreeError::DuplicateRoot`] for bad roots
/// - [`UvTreeError::GenerationLimit`] if a round beyond `max_generations`
///   would still add nodes
pub fn build<P>(
    provider: &P,
    roots: &[VertexId],
    direction: GrowthDirection,
    max_generations: u32,
) -> Result<Forest, UvTreeError>
where
    P: AdjacencyProvider + ?Sized,
{
    if roots.is_empty() {
        return Err(UvTreeError::EmptyRoots);
    }

    let mut root_set = HashSet::with_capacity(roots.len());
    let mut seeded = Vec::with_capacity(roots.len());
    for &root in roots {
        let position = provider
            .position(root)
            .ok_or(UvTreeError::UnknownRoot(root))?;
        if !root_set.insert(root) {
            return Err(UvTreeError::DuplicateRoot(root));
        }
        seeded.push((root, position));
    }

    let all_vertices = provider.vertices();
    let total = all_vertices.len();
    let mut unvisited: HashSet<VertexId> = all_vertices
        .into_iter()
        .filter(|vertex| !root_set.contains(vertex))
        .collect();

    console_log!("{} / {} vertices selected as roots", roots.len(), total);

    let mut forest = Forest::with_roots(seeded);

    let mut round = 0;
    loop {
        console_debug!(
            "generation {}: {} / {} remaining",
            forest.generation_count(),
            unvisited.len(),
            total
        );

        let remaining = unvisited.len();
        let frontier = forest.generations().last().cloned().unwrap_or_default();
        let next = grow_round(provider, &mut forest, &frontier, &mut unvisited, direction);

        if next.is_empty() {
            return Ok(forest);
        }
        if round == max_generations {
            return Err(UvTreeError::GenerationLimit {
                limit: max_generations,
                unvisited: remaining,
            });
        }
        forest.push_generation(next);
        round += 1;
    }
}

/// Run one traversal round, returning the newly created nodes in discovery order.
fn grow_round<P>(
    provider: &P,
    forest: &mut Forest,
    frontier: &[NodeIndex],
    unvisited: &mut HashSet<VertexId>,
    direction: GrowthDirection,
) -> Vec<NodeIndex>
where
    P: AdjacencyProvider + ?Sized,
{
    let mut next = Vec::new();

    for &parent in frontier {
        let (parent_vertex, parent_position) = {
            let node = forest.node(parent);
            (node.vertex, node.position)
        };

        for candidate in provider.neighbors(parent_vertex) {
            if !unvisited.contains(&candidate) {
                continue;
            }
            let Some(position) = provider.position(candidate) else {
                continue;
            };
            if !direction.accepts(parent_position, position) {
                continue;
            }

            unvisited.remove(&candidate);
            next.push(forest.add_child(parent, candidate, position));
        }
    }

    next
}
