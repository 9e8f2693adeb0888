//! MeshEngine - Core mesh connectivity store.
//!
//! The MeshEngine stores the vertex/edge topology using petgraph's StableGraph
//! and keeps positions in SoA (Structure of Arrays) buffers. It also owns the
//! corner table (one vertex reference per face corner), which is what the UV
//! channel is written against.

use petgraph::Undirected;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;

use super::adjacency::AdjacencyProvider;
use super::vertex::{Point3, VertexId, VertexState};
use crate::spatial::SpatialIndex;

/// The core mesh engine.
///
/// This struct manages:
/// - Mesh topology via petgraph
/// - Position buffers in SoA layout
/// - Vertex state (selection)
/// - The corner → vertex table
/// - Spatial index for root picking
pub struct MeshEngine {
    /// The underlying edge graph.
    /// Nodes store their stable VertexId, edges carry no weight.
    graph: StableGraph<VertexId, (), Undirected>,

    /// Next vertex ID to assign
    next_vertex_id: u32,

    /// X positions (SoA layout)
    pos_x: Vec<f32>,

    /// Y positions (SoA layout)
    pos_y: Vec<f32>,

    /// Z positions / elevation (SoA layout)
    pos_z: Vec<f32>,

    /// Vertex states (selected)
    states: Vec<VertexState>,

    /// Owning vertex of every face corner
    corners: Vec<VertexId>,

    /// Spatial index for nearest-vertex picking
    spatial: SpatialIndex,

    /// Whether the spatial index needs rebuilding
    spatial_dirty: bool,
}

impl MeshEngine {
    /// Create a new empty mesh engine.
    pub fn new() -> Self {
        Self {
            graph: StableGraph::default(),
            next_vertex_id: 0,
            pos_x: Vec::new(),
            pos_y: Vec::new(),
            pos_z: Vec::new(),
            states: Vec::new(),
            corners: Vec::new(),
            spatial: SpatialIndex::new(),
            spatial_dirty: false,
        }
    }

    /// Create a mesh engine with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            graph: StableGraph::with_capacity(vertex_capacity, edge_capacity),
            next_vertex_id: 0,
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            pos_z: Vec::with_capacity(vertex_capacity),
            states: Vec::with_capacity(vertex_capacity),
            corners: Vec::new(),
            spatial: SpatialIndex::new(),
            spatial_dirty: false,
        }
    }

    fn index_of(&self, id: VertexId) -> Option<NodeIndex> {
        let index = NodeIndex::new(id.0 as usize);
        self.graph.contains_node(index).then_some(index)
    }

    // =========================================================================
    // Vertex Operations
    // =========================================================================

    /// Add a vertex at the specified position.
    pub fn add_vertex(&mut self, x: f32, y: f32, z: f32) -> VertexId {
        let id = VertexId(self.next_vertex_id);
        self.next_vertex_id += 1;

        self.graph.add_node(id);

        self.pos_x.push(x);
        self.pos_y.push(y);
        self.pos_z.push(z);
        self.states.push(VertexState::new());

        self.spatial_dirty = true;
        id
    }

    /// Add multiple vertices from a positions array [x0, y0, z0, x1, y1, z1, ...].
    ///
    /// A trailing partial triple is ignored.
    pub fn add_vertices_from_positions(&mut self, positions: &[f32]) -> u32 {
        let count = positions.len() / 3;

        self.pos_x.reserve(count);
        self.pos_y.reserve(count);
        self.pos_z.reserve(count);
        self.states.reserve(count);

        for chunk in positions.chunks_exact(3) {
            self.add_vertex(chunk[0], chunk[1], chunk[2]);
        }

        count as u32
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> u32 {
        self.graph.node_count() as u32
    }

    /// Get a vertex's position.
    pub fn get_position(&self, id: VertexId) -> Option<Point3> {
        self.index_of(id).map(|index| {
            let i = index.index();
            Point3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
        })
    }

    /// Set a vertex's position.
    pub fn set_position(&mut self, id: VertexId, x: f32, y: f32, z: f32) {
        if let Some(index) = self.index_of(id) {
            let i = index.index();
            self.pos_x[i] = x;
            self.pos_y[i] = y;
            self.pos_z[i] = z;
            self.spatial_dirty = true;
        }
    }

    // =========================================================================
    // Edge Operations
    // =========================================================================

    /// Connect two vertices.
    ///
    /// Returns false for unknown vertices, self-loops, and edges that already exist.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> bool {
        let (Some(a_index), Some(b_index)) = (self.index_of(a), self.index_of(b)) else {
            return false;
        };
        if a_index == b_index || self.graph.find_edge(a_index, b_index).is_some() {
            return false;
        }

        self.graph.add_edge(a_index, b_index, ());
        true
    }

    /// Add edges from pairs [a0, b0, a1, b1, ...].
    pub fn add_edges_from_pairs(&mut self, edges: &[u32]) -> u32 {
        let mut added = 0;

        for pair in edges.chunks_exact(2) {
            if self.add_edge(VertexId(pair[0]), VertexId(pair[1])) {
                added += 1;
            }
        }

        added
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> u32 {
        self.graph.edge_count() as u32
    }

    /// Get neighbors of a vertex, in edge insertion order.
    pub fn get_neighbors(&self, id: VertexId) -> Vec<VertexId> {
        let Some(index) = self.index_of(id) else {
            return Vec::new();
        };

        let mut incident: Vec<_> = self
            .graph
            .edges(index)
            .map(|edge| {
                let other = if edge.source() == index {
                    edge.target()
                } else {
                    edge.source()
                };
                (edge.id().index(), other)
            })
            .collect();
        incident.sort_unstable_by_key(|&(edge, _)| edge);

        incident
            .into_iter()
            .filter_map(|(_, other)| self.graph.node_weight(other).copied())
            .collect()
    }

    // =========================================================================
    // Corner Operations
    // =========================================================================

    /// Replace the corner table with one owning vertex per face corner.
    ///
    /// If any corner references an unknown vertex the table is left unchanged
    /// and 0 is returned.
    pub fn set_corner_vertices(&mut self, corners: &[u32]) -> u32 {
        if corners
            .iter()
            .any(|&v| self.index_of(VertexId(v)).is_none())
        {
            return 0;
        }

        self.corners = corners.iter().map(|&v| VertexId(v)).collect();
        self.corners.len() as u32
    }

    /// Get the corner table.
    pub fn corner_vertices(&self) -> &[VertexId] {
        &self.corners
    }

    /// Get the number of corners.
    pub fn corner_count(&self) -> u32 {
        self.corners.len() as u32
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select a vertex. Returns false if the vertex is unknown.
    pub fn select_vertex(&mut self, id: VertexId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.states[index.index()].set_selected(true);
                true
            }
            None => false,
        }
    }

    /// Deselect a vertex.
    pub fn deselect_vertex(&mut self, id: VertexId) {
        if let Some(index) = self.index_of(id) {
            self.states[index.index()].set_selected(false);
        }
    }

    /// Check if a vertex is selected.
    pub fn is_vertex_selected(&self, id: VertexId) -> bool {
        self.index_of(id)
            .map(|index| self.states[index.index()].is_selected())
            .unwrap_or(false)
    }

    /// Deselect every vertex.
    pub fn clear_selection(&mut self) {
        for state in &mut self.states {
            state.set_selected(false);
        }
    }

    /// Selected vertices in ascending id order.
    pub fn selected_vertices(&self) -> Vec<VertexId> {
        self.graph
            .node_indices()
            .filter(|index| self.states[index.index()].is_selected())
            .filter_map(|index| self.graph.node_weight(index).copied())
            .collect()
    }

    /// Select every vertex whose elevation is within `tolerance` of the lowest one.
    ///
    /// Returns the number of newly selected vertices.
    pub fn select_lowest(&mut self, tolerance: f32) -> u32 {
        let Some(min_z) = self
            .graph
            .node_indices()
            .map(|index| self.pos_z[index.index()])
            .reduce(f32::min)
        else {
            return 0;
        };

        let threshold = min_z + tolerance.max(0.0);
        let mut selected = 0;
        let indices: Vec<_> = self.graph.node_indices().collect();
        for index in indices {
            let i = index.index();
            if self.pos_z[i] <= threshold && !self.states[i].is_selected() {
                self.states[i].set_selected(true);
                selected += 1;
            }
        }
        selected
    }

    /// Select the vertex nearest to a point, if one lies within `max_distance`.
    pub fn select_nearest(&mut self, x: f32, y: f32, z: f32, max_distance: f32) -> Option<VertexId> {
        let id = self.find_nearest_vertex_within(x, y, z, max_distance)?;
        self.select_vertex(id);
        Some(id)
    }

    /// Select every vertex within `radius` of a point.
    ///
    /// Returns the number of newly selected vertices.
    pub fn select_within_radius(&mut self, x: f32, y: f32, z: f32, radius: f32) -> u32 {
        let mut selected = 0;
        for id in self.find_vertices_in_radius(x, y, z, radius) {
            if !self.is_vertex_selected(id) && self.select_vertex(id) {
                selected += 1;
            }
        }
        selected
    }

    // =========================================================================
    // Spatial Queries
    // =========================================================================

    /// Find all vertices within `radius` of a point.
    pub fn find_vertices_in_radius(
        &mut self,
        x: f32,
        y: f32,
        z: f32,
        radius: f32,
    ) -> Vec<VertexId> {
        self.ensure_spatial_index_up_to_date();
        self.spatial.in_radius(Point3::new(x, y, z), radius)
    }

    /// Find the nearest vertex within a maximum distance.
    pub fn find_nearest_vertex_within(
        &mut self,
        x: f32,
        y: f32,
        z: f32,
        max_distance: f32,
    ) -> Option<VertexId> {
        self.ensure_spatial_index_up_to_date();
        self.spatial.nearest_within(Point3::new(x, y, z), max_distance)
    }

    /// Rebuild the spatial index.
    pub fn rebuild_spatial_index(&mut self) {
        let points: Vec<_> = self
            .graph
            .node_indices()
            .filter_map(|index| {
                let id = *self.graph.node_weight(index)?;
                let i = index.index();
                Some((id, Point3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])))
            })
            .collect();

        self.spatial.rebuild(&points);
        self.spatial_dirty = false;
    }

    fn ensure_spatial_index_up_to_date(&mut self) {
        if self.spatial_dirty {
            self.rebuild_spatial_index();
        }
    }

    // =========================================================================
    // Utilities
    // =========================================================================

    /// Get the axis-aligned bounding box of all vertices as (min, max).
    pub fn get_bounds(&self) -> Option<(Point3, Point3)> {
        let mut points = self
            .graph
            .node_indices()
            .map(|index| {
                let i = index.index();
                Point3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
            });

        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), p| {
            (
                Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
            )
        }))
    }

    /// Clear all vertices, edges and corners, resetting the engine to its initial state.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.next_vertex_id = 0;
        self.pos_x.clear();
        self.pos_y.clear();
        self.pos_z.clear();
        self.states.clear();
        self.corners.clear();
        self.spatial.clear();
        self.spatial_dirty = false;
    }
}

impl Default for MeshEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AdjacencyProvider for MeshEngine {
    fn vertices(&self) -> Vec<VertexId> {
        self.graph
            .node_indices()
            .filter_map(|index| self.graph.node_weight(index).copied())
            .collect()
    }

    fn neighbors(&self, vertex: VertexId) -> Vec<VertexId> {
        self.get_neighbors(vertex)
    }

    fn position(&self, vertex: VertexId) -> Option<Point3> {
        self.get_position(vertex)
    }
}
