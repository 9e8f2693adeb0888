//! Arena of tree nodes grown from the root vertices.
//!
//! Every node lives in one `Vec<TreeNode>` owned by the [`Forest`]; parent,
//! child and sibling links are indices into it, so the whole forest drops as
//! one unit and no link owns another node.

use std::collections::HashMap;

use crate::mesh::{Point3, VertexId};

/// Index of a node within its forest.
pub type NodeIndex = usize;

/// One traversed vertex.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// The mesh vertex this node stands for.
    pub vertex: VertexId,
    /// Position of the vertex, captured when the node was discovered.
    pub position: Point3,
    /// The node that discovered this one (None for roots).
    pub parent: Option<NodeIndex>,
    /// Discovered children, in discovery order.
    pub children: Vec<NodeIndex>,
    /// Previous node in the sibling chain.
    ///
    /// The chain follows discovery order, which is not necessarily
    /// left-to-right order in u.
    pub left_neighbour: Option<NodeIndex>,
    /// Next node in the sibling chain.
    pub right_neighbour: Option<NodeIndex>,
    /// Horizontal coordinate, once laid out.
    pub u: Option<f32>,
    /// Vertical coordinate, once laid out.
    pub v: Option<f32>,
    /// Memoized horizontal interval available to this node's children.
    pub(crate) cached_u_range: Option<(f32, f32)>,
    /// Memoized path length back to the root.
    pub(crate) cached_distance_from_root: Option<f32>,
}

impl TreeNode {
    pub(crate) fn new(vertex: VertexId, position: Point3, parent: Option<NodeIndex>) -> Self {
        Self {
            vertex,
            position,
            parent,
            children: Vec::new(),
            left_neighbour: None,
            right_neighbour: None,
            u: None,
            v: None,
            cached_u_range: None,
            cached_distance_from_root: None,
        }
    }

    /// True for generation 0.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// The (u, v) pair, if both coordinates are assigned.
    #[inline]
    pub fn uv(&self) -> Option<(f32, f32)> {
        self.u.zip(self.v)
    }
}

/// The result of a traversal: all tree nodes, layered into generations.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    nodes: Vec<TreeNode>,
    generations: Vec<Vec<NodeIndex>>,
    by_vertex: HashMap<VertexId, NodeIndex>,
    laid_out: bool,
}

impl Forest {
    /// Create a forest whose generation 0 holds the given roots.
    pub(crate) fn with_roots(roots: impl IntoIterator<Item = (VertexId, Point3)>) -> Self {
        let mut forest = Self::default();
        let mut first = Vec::new();
        for (vertex, position) in roots {
            first.push(forest.push_node(TreeNode::new(vertex, position, None)));
        }
        forest.generations.push(first);
        forest
    }

    fn push_node(&mut self, node: TreeNode) -> NodeIndex {
        let index = self.nodes.len();
        self.by_vertex.insert(node.vertex, index);
        self.nodes.push(node);
        index
    }

    /// Create a child of `parent` and link both directions.
    pub(crate) fn add_child(
        &mut self,
        parent: NodeIndex,
        vertex: VertexId,
        position: Point3,
    ) -> NodeIndex {
        let child = self.push_node(TreeNode::new(vertex, position, Some(parent)));
        self.nodes[parent].children.push(child);
        child
    }

    /// Append a finished traversal round.
    pub(crate) fn push_generation(&mut self, generation: Vec<NodeIndex>) {
        self.generations.push(generation);
    }

    pub(crate) fn node_mut(&mut self, index: NodeIndex) -> &mut TreeNode {
        &mut self.nodes[index]
    }

    pub(crate) fn mark_laid_out(&mut self) {
        self.laid_out = true;
    }

    /// Link `left` and `right` as adjacent entries of a sibling chain.
    pub(crate) fn chain(&mut self, left: NodeIndex, right: NodeIndex) {
        self.nodes[right].left_neighbour = Some(left);
        self.nodes[left].right_neighbour = Some(right);
    }

    /// Get a node.
    #[inline]
    pub fn node(&self, index: NodeIndex) -> &TreeNode {
        &self.nodes[index]
    }

    /// All nodes, in creation order.
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Generations in traversal order; generation 0 is the roots.
    pub fn generations(&self) -> &[Vec<NodeIndex>] {
        &self.generations
    }

    /// Number of generations, including the roots.
    pub fn generation_count(&self) -> usize {
        self.generations.len()
    }

    /// The node created for `vertex`, if the traversal reached it.
    pub fn node_for_vertex(&self, vertex: VertexId) -> Option<NodeIndex> {
        self.by_vertex.get(&vertex).copied()
    }

    /// The assigned (u, v) of `vertex`, if it was reached and laid out.
    pub fn uv(&self, vertex: VertexId) -> Option<(f32, f32)> {
        self.node_for_vertex(vertex)
            .and_then(|index| self.nodes[index].uv())
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the forest has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether coordinates have been assigned.
    pub fn is_laid_out(&self) -> bool {
        self.laid_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Point3 {
        Point3::default()
    }

    #[test]
    fn test_roots_form_generation_zero() {
        let forest = Forest::with_roots([(VertexId(4), origin()), (VertexId(2), origin())]);

        assert_eq!(forest.generations(), &[vec![0, 1]]);
        assert_eq!(forest.node(0).vertex, VertexId(4));
        assert!(forest.node(1).is_root());
        assert_eq!(forest.node_for_vertex(VertexId(2)), Some(1));
    }

    #[test]
    fn test_add_child_links_both_ways() {
        let mut forest = Forest::with_roots([(VertexId(0), origin())]);
        let a = forest.add_child(0, VertexId(1), origin());
        let b = forest.add_child(0, VertexId(2), origin());
        forest.push_generation(vec![a, b]);

        assert_eq!(forest.node(0).children, vec![a, b]);
        assert_eq!(forest.node(a).parent, Some(0));
        assert_eq!(forest.node(b).parent, Some(0));
        assert_eq!(forest.generation_count(), 2);
    }

    #[test]
    fn test_children_are_not_shared() {
        let mut forest = Forest::with_roots([(VertexId(0), origin()), (VertexId(1), origin())]);
        forest.add_child(0, VertexId(2), origin());

        assert_eq!(forest.node(0).children.len(), 1);
        assert!(forest.node(1).children.is_empty());
    }

    #[test]
    fn test_chain() {
        let mut forest = Forest::with_roots([(VertexId(0), origin()), (VertexId(1), origin())]);
        forest.chain(0, 1);

        assert_eq!(forest.node(0).right_neighbour, Some(1));
        assert_eq!(forest.node(1).left_neighbour, Some(0));
        assert_eq!(forest.node(0).left_neighbour, None);
    }

    #[test]
    fn test_uv_requires_both_coordinates() {
        let mut forest = Forest::with_roots([(VertexId(0), origin())]);
        assert_eq!(forest.uv(VertexId(0)), None);

        forest.node_mut(0).u = Some(0.5);
        assert_eq!(forest.uv(VertexId(0)), None);

        forest.node_mut(0).v = Some(0.0);
        assert_eq!(forest.uv(VertexId(0)), Some((0.5, 0.0)));
        assert_eq!(forest.uv(VertexId(9)), None);
    }
}
