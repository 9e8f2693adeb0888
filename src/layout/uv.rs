//! UV layout over a grown forest.
//!
//! Roots are spread evenly across (0, 1) at v = 0. Each later generation is
//! placed parent by parent: a parent's children share the parent's u-range,
//! and every node's v is its path length back to its root.
//!
//! A node's u-range runs from the midpoint with its left sibling to the
//! midpoint with its right sibling, falling back to the parent's range (and
//! finally to [0, 1]) at the ends of the chain. Sibling chains follow
//! discovery order. With [`ChildOrder::Mirrored`] children are placed in the
//! reverse of that order, so the chain and the numeric u order disagree and
//! a range's min can exceed its max; placement still interpolates between
//! the two endpoints.

use serde::{Deserialize, Serialize};

use super::forest::{Forest, NodeIndex};
use crate::error::UvTreeError;

/// How children are distributed across their parent's u-range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChildOrder {
    /// The j-th of m children gets `min * r + max * (1 - r)` with
    /// `r = (j + 1) / (m + 1)`: the first child lands nearest `max`.
    #[default]
    Mirrored,
    /// Endpoints swapped: the first child lands nearest `min`.
    Discovery,
}

impl ChildOrder {
    #[inline]
    fn place(self, (min, max): (f32, f32), ratio: f32) -> f32 {
        match self {
            Self::Mirrored => min * ratio + max * (1.0 - ratio),
            Self::Discovery => max * ratio + min * (1.0 - ratio),
        }
    }
}

/// Assign u and v to every node of the forest.
///
/// # Errors
///
/// [`UvTreeError::AlreadyLaidOut`] if the forest already carries coordinates;
/// the memoized ranges and distances are never recomputed.
pub fn layout(forest: &mut Forest, child_order: ChildOrder) -> Result<(), UvTreeError> {
    if forest.is_laid_out() {
        return Err(UvTreeError::AlreadyLaidOut);
    }

    let roots = forest.generations().first().cloned().unwrap_or_default();
    let slots = (roots.len() + 1) as f32;
    for (i, &root) in roots.iter().enumerate() {
        let node = forest.node_mut(root);
        node.u = Some((i + 1) as f32 / slots);
        node.v = Some(0.0);
        if i > 0 {
            forest.chain(roots[i - 1], root);
        }
    }

    for k in 1..forest.generation_count() {
        let parents = forest.generations()[k - 1].clone();
        for parent in parents {
            let children = forest.node(parent).children.clone();
            if children.is_empty() {
                continue;
            }
            // Parents were placed in the previous pass.
            let range = u_range(forest, parent);
            debug_assert!(range.is_some(), "parent {parent} has no u-range");
            let Some(range) = range else {
                continue;
            };

            let slots = (children.len() + 1) as f32;
            for (j, &child) in children.iter().enumerate() {
                let ratio = (j + 1) as f32 / slots;
                forest.node_mut(child).u = Some(child_order.place(range, ratio));
                let v = distance_from_root(forest, child);
                forest.node_mut(child).v = Some(v);
                if j > 0 {
                    forest.chain(children[j - 1], child);
                }
            }
        }
    }

    forest.mark_laid_out();
    Ok(())
}

/// The u interval `index` hands down to its children, as (min, max).
///
/// Returns `None` until the node itself has a u. Computed once per node.
pub fn u_range(forest: &mut Forest, index: NodeIndex) -> Option<(f32, f32)> {
    let node = forest.node(index);
    if let Some(range) = node.cached_u_range {
        return Some(range);
    }
    let own_u = node.u?;
    let (left, right, parent) = (node.left_neighbour, node.right_neighbour, node.parent);

    let min = match (left, parent) {
        (Some(left), _) => midpoint(own_u, forest.node(left).u?),
        (None, Some(parent)) => u_range(forest, parent)?.0,
        (None, None) => 0.0,
    };
    let max = match (right, parent) {
        (Some(right), _) => midpoint(own_u, forest.node(right).u?),
        (None, Some(parent)) => u_range(forest, parent)?.1,
        (None, None) => 1.0,
    };

    forest.node_mut(index).cached_u_range = Some((min, max));
    Some((min, max))
}

/// Path length from `index` back to its root along parent links. Computed once per node.
pub fn distance_from_root(forest: &mut Forest, index: NodeIndex) -> f32 {
    let node = forest.node(index);
    if let Some(distance) = node.cached_distance_from_root {
        return distance;
    }
    let (parent, position) = (node.parent, node.position);

    let distance = match parent {
        None => 0.0,
        Some(parent) => {
            let step = position.distance(&forest.node(parent).position);
            distance_from_root(forest, parent) + step
        }
    };

    forest.node_mut(index).cached_distance_from_root = Some(distance);
    distance
}

#[inline]
fn midpoint(a: f32, b: f32) -> f32 {
    (a + b) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::builder::{GrowthDirection, build};
    use crate::mesh::{MeshEngine, VertexId};

    const EPS: f32 = 1e-5;

    fn assert_close(actual: f32, expected: f32, what: &str) {
        assert!(
            (actual - expected).abs() < EPS,
            "{what}: expected {expected}, got {actual}"
        );
    }

    fn grow(mesh: &MeshEngine, roots: &[u32]) -> Forest {
        let roots: Vec<_> = roots.iter().map(|&r| VertexId(r)).collect();
        build(mesh, &roots, GrowthDirection::Omnidirectional, 999).unwrap()
    }

    fn uv_of(forest: &Forest, vertex: u32) -> (f32, f32) {
        forest.uv(VertexId(vertex)).unwrap()
    }

    /// Root 0 with children 1 and 2 (discovered in that order), each with one child.
    fn fork() -> MeshEngine {
        let mut mesh = MeshEngine::new();
        mesh.add_vertices_from_positions(&[
            0.0, 0.0, 0.0, //
            -1.0, 0.0, 1.0, //
            1.0, 0.0, 1.0, //
            -1.0, 0.0, 3.0, //
            1.0, 0.0, 2.0,
        ]);
        mesh.add_edges_from_pairs(&[0, 1, 0, 2, 1, 3, 2, 4]);
        mesh
    }

    #[test]
    fn test_chain_scenario() {
        let mut mesh = MeshEngine::new();
        mesh.add_vertices_from_positions(&[
            0.0, 0.0, 0.0, //
            3.0, 4.0, 0.0, //
            3.0, 4.0, 2.0, //
            3.0, 5.0, 2.0,
        ]);
        mesh.add_edges_from_pairs(&[0, 1, 1, 2, 2, 3]);

        let mut forest = grow(&mesh, &[0]);
        layout(&mut forest, ChildOrder::Mirrored).unwrap();

        assert_eq!(uv_of(&forest, 0), (0.5, 0.0));
        assert_close(uv_of(&forest, 1).1, 5.0, "B.v");
        assert_close(uv_of(&forest, 2).1, 7.0, "C.v");
        assert_close(uv_of(&forest, 3).1, 8.0, "D.v");
        for vertex in 1..4 {
            assert_close(uv_of(&forest, vertex).0, 0.5, "single children stay centred");
        }
    }

    /// Four unconnected roots along x, each with two children above it.
    fn grove() -> MeshEngine {
        let mut mesh = MeshEngine::new();
        for i in 0..4 {
            mesh.add_vertex(i as f32, 0.0, 0.0);
        }
        for i in 0..4 {
            let x = i as f32;
            let left = mesh.add_vertex(x - 0.2, 0.0, 1.0);
            let right = mesh.add_vertex(x + 0.2, 0.0, 1.0);
            mesh.add_edge(VertexId(i), left);
            mesh.add_edge(VertexId(i), right);
        }
        mesh
    }

    #[test]
    fn test_children_split_their_roots_range() {
        let mesh = grove();
        let mut forest = grow(&mesh, &[0, 1, 2, 3]);
        layout(&mut forest, ChildOrder::Mirrored).unwrap();

        let expected_ranges = [(0.0, 0.3), (0.3, 0.5), (0.5, 0.7), (0.7, 1.0)];
        for (root, (min, max)) in expected_ranges.into_iter().enumerate() {
            let (actual_min, actual_max) = u_range(&mut forest, root).unwrap();
            assert_close(actual_min, min, "root range min");
            assert_close(actual_max, max, "root range max");

            let first = (4 + 2 * root) as u32;
            assert_close(
                uv_of(&forest, first).0,
                min / 3.0 + max * 2.0 / 3.0,
                "first child",
            );
            assert_close(
                uv_of(&forest, first + 1).0,
                min * 2.0 / 3.0 + max / 3.0,
                "second child",
            );
        }
        assert_close(uv_of(&forest, 4).0, 0.2, "first child of the first root");
        assert_close(uv_of(&forest, 5).0, 0.1, "second child of the first root");

        for node in forest.nodes() {
            assert!(node.uv().is_some(), "{} was not placed", node.vertex);
        }
    }

    #[test]
    fn test_two_children_are_mirrored() {
        let mesh = fork();
        let mut forest = grow(&mesh, &[0]);
        layout(&mut forest, ChildOrder::Mirrored).unwrap();

        assert_eq!(u_range(&mut forest, 0), Some((0.0, 1.0)));
        assert_close(uv_of(&forest, 1).0, 2.0 / 3.0, "X.u");
        assert_close(uv_of(&forest, 2).0, 1.0 / 3.0, "Y.u");
        assert!(uv_of(&forest, 1).0 > uv_of(&forest, 2).0, "first child ends up right");
    }

    #[test]
    fn test_sibling_chain_follows_discovery_order() {
        let mesh = fork();
        let mut forest = grow(&mesh, &[0]);
        layout(&mut forest, ChildOrder::Mirrored).unwrap();

        let x = forest.node_for_vertex(VertexId(1)).unwrap();
        let y = forest.node_for_vertex(VertexId(2)).unwrap();
        assert_eq!(forest.node(x).right_neighbour, Some(y));
        assert_eq!(forest.node(y).left_neighbour, Some(x));

        // Cousins are not chained across parents.
        let x_child = forest.node_for_vertex(VertexId(3)).unwrap();
        let y_child = forest.node_for_vertex(VertexId(4)).unwrap();
        assert_eq!(forest.node(x_child).right_neighbour, None);
        assert_eq!(forest.node(y_child).left_neighbour, None);
    }

    #[test]
    fn test_grandchildren_use_sibling_midpoints() {
        let mesh = fork();
        let mut forest = grow(&mesh, &[0]);
        layout(&mut forest, ChildOrder::Mirrored).unwrap();

        let x = forest.node_for_vertex(VertexId(1)).unwrap();
        let y = forest.node_for_vertex(VertexId(2)).unwrap();
        let (x_min, x_max) = u_range(&mut forest, x).unwrap();
        assert_close(x_min, 0.0, "X inherits the root's min");
        assert_close(x_max, 0.5, "X max is the midpoint with Y");
        let (y_min, y_max) = u_range(&mut forest, y).unwrap();
        assert_close(y_min, 0.5, "Y min is the midpoint with X");
        assert_close(y_max, 1.0, "Y inherits the root's max");

        assert_close(uv_of(&forest, 3).0, 0.25, "X's child");
        assert_close(uv_of(&forest, 4).0, 0.75, "Y's child");
    }

    #[test]
    fn test_discovery_order_keeps_children_left_to_right() {
        let mesh = fork();
        let mut forest = grow(&mesh, &[0]);
        layout(&mut forest, ChildOrder::Discovery).unwrap();

        assert_close(uv_of(&forest, 1).0, 1.0 / 3.0, "X.u");
        assert_close(uv_of(&forest, 2).0, 2.0 / 3.0, "Y.u");
        assert_close(uv_of(&forest, 3).0, 0.25, "X's child");
        assert_close(uv_of(&forest, 4).0, 0.75, "Y's child");
    }

    #[test]
    fn test_root_spacing_and_chain() {
        let mut mesh = MeshEngine::new();
        mesh.add_vertices_from_positions(&[0.0; 12]);

        let mut forest = grow(&mesh, &[2, 0, 3, 1]);
        layout(&mut forest, ChildOrder::Mirrored).unwrap();

        let roots = forest.generations()[0].clone();
        for (i, &root) in roots.iter().enumerate() {
            let node = forest.node(root);
            assert_close(node.u.unwrap(), (i + 1) as f32 / 5.0, "root u");
            assert_eq!(node.v, Some(0.0));
            assert_eq!(node.left_neighbour, i.checked_sub(1).map(|l| roots[l]));
        }

        // Outer roots fall back to [0, 1]; inner ones use midpoints.
        let (min, max) = u_range(&mut forest, roots[0]).unwrap();
        assert_close(min, 0.0, "first root min");
        assert_close(max, 0.3, "first root max");
        let (min, max) = u_range(&mut forest, roots[3]).unwrap();
        assert_close(min, 0.7, "last root min");
        assert_close(max, 1.0, "last root max");
    }

    #[test]
    fn test_range_containment_and_monotonic_distance() {
        // A bushier tree: 0 -> 1,2,3; 1 -> 4,5; 3 -> 6; 5 -> 7.
        let mut mesh = MeshEngine::new();
        for i in 0..8 {
            mesh.add_vertex(i as f32 * 0.5, (i % 3) as f32, i as f32);
        }
        mesh.add_edges_from_pairs(&[0, 1, 0, 2, 0, 3, 1, 4, 1, 5, 3, 6, 5, 7]);

        let mut forest = grow(&mesh, &[0]);
        layout(&mut forest, ChildOrder::Mirrored).unwrap();

        for index in 0..forest.len() {
            let Some(parent) = forest.node(index).parent else {
                continue;
            };
            let (a, b) = u_range(&mut forest, parent).unwrap();
            let u = forest.node(index).u.unwrap();
            assert!(u >= a.min(b) - EPS && u <= a.max(b) + EPS, "u {u} outside ({a}, {b})");
            assert!(distance_from_root(&mut forest, index) >= distance_from_root(&mut forest, parent));
            let v = forest.node(index).v;
            assert_eq!(v, Some(distance_from_root(&mut forest, index)));
        }
    }

    #[test]
    fn test_u_range_needs_u() {
        let mesh = fork();
        let mut forest = grow(&mesh, &[0]);

        assert_eq!(u_range(&mut forest, 0), None);
        assert_eq!(distance_from_root(&mut forest, 0), 0.0);
    }

    #[test]
    fn test_second_layout_is_rejected() {
        let mesh = fork();
        let mut forest = grow(&mesh, &[0]);
        layout(&mut forest, ChildOrder::Mirrored).unwrap();
        let before: Vec<_> = forest.nodes().iter().map(|n| n.uv()).collect();

        assert_eq!(
            layout(&mut forest, ChildOrder::Discovery),
            Err(UvTreeError::AlreadyLaidOut)
        );
        let after: Vec<_> = forest.nodes().iter().map(|n| n.uv()).collect();
        assert_eq!(before, after);
    }
}
