//! Tree UV - WASM Module
//!
//! This module assigns UV coordinates to tree-like meshes (branches, roots,
//! vascular and coral structures) from their connectivity alone. It is
//! compiled to WebAssembly and exposes a JavaScript-friendly API via
//! wasm-bindgen.
//!
//! # Architecture
//!
//! - `mesh`: Vertex/edge store using petgraph's StableGraph, plus the corner table
//! - `spatial`: R-tree spatial index for picking root vertices by position
//! - `layout`: Breadth-first tree growth and the u/v layout over it
//! - `error`: The crate error type

use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

mod diag;
pub mod error;
pub mod layout;
pub mod mesh;
pub mod spatial;

use error::UvTreeError;
use layout::{UvTreeConfig, UvTreeLayout, UvTreeResult, UvTreeStats};
use mesh::{MeshEngine, Point3, VertexId};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Main entry point for UV generation.
///
/// This struct wraps the internal MeshEngine and provides the public API
/// exposed to JavaScript.
#[wasm_bindgen]
pub struct TreeUvWasm {
    engine: MeshEngine,
    last_stats: Option<UvTreeStats>,
}

#[wasm_bindgen]
impl TreeUvWasm {
    /// Create a new empty mesh.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            engine: MeshEngine::new(),
            last_stats: None,
        }
    }

    /// Create a mesh with pre-allocated capacity.
    ///
    /// # Arguments
    ///
    /// * `vertex_capacity` - Expected number of vertices
    /// * `edge_capacity` - Expected number of edges
    #[wasm_bindgen(js_name = withCapacity)]
    pub fn with_capacity(vertex_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            engine: MeshEngine::with_capacity(vertex_capacity, edge_capacity),
            last_stats: None,
        }
    }

    // =========================================================================
    // Mesh Input
    // =========================================================================

    /// Add a vertex at the specified position.
    ///
    /// Returns the stable vertex ID.
    #[wasm_bindgen(js_name = addVertex)]
    pub fn add_vertex(&mut self, x: f32, y: f32, z: f32) -> u32 {
        self.engine.add_vertex(x, y, z).0
    }

    /// Add multiple vertices from a Float32Array of positions.
    ///
    /// The positions array should be [x0, y0, z0, x1, y1, z1, ...].
    /// Returns the number of vertices added.
    #[wasm_bindgen(js_name = addVerticesFromPositions)]
    pub fn add_vertices_from_positions(&mut self, positions: &[f32]) -> u32 {
        self.engine.add_vertices_from_positions(positions)
    }

    /// Connect two vertices.
    ///
    /// Returns false for unknown vertices, self-loops and duplicates.
    #[wasm_bindgen(js_name = addEdge)]
    pub fn add_edge(&mut self, a: u32, b: u32) -> bool {
        self.engine.add_edge(VertexId(a), VertexId(b))
    }

    /// Add edges from a Uint32Array of pairs [a0, b0, a1, b1, ...].
    ///
    /// Returns the number of edges added. Neighbour order (and therefore
    /// traversal order) follows the order edges are added in.
    #[wasm_bindgen(js_name = addEdgesFromPairs)]
    pub fn add_edges_from_pairs(&mut self, edges: &[u32]) -> u32 {
        self.engine.add_edges_from_pairs(edges)
    }

    /// Set the owning vertex of every face corner.
    ///
    /// Returns the number of corners stored, or 0 if any corner referenced
    /// an unknown vertex (the previous table is kept).
    #[wasm_bindgen(js_name = setCornerVertices)]
    pub fn set_corner_vertices(&mut self, corners: &[u32]) -> u32 {
        self.engine.set_corner_vertices(corners)
    }

    /// Get the number of vertices.
    #[wasm_bindgen(js_name = vertexCount)]
    pub fn vertex_count(&self) -> u32 {
        self.engine.vertex_count()
    }

    /// Get the number of edges.
    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.engine.edge_count()
    }

    /// Get the number of face corners.
    #[wasm_bindgen(js_name = cornerCount)]
    pub fn corner_count(&self) -> u32 {
        self.engine.corner_count()
    }

    /// Get neighbors of a vertex, in edge insertion order.
    ///
    /// Returns a Uint32Array of vertex IDs.
    #[wasm_bindgen(js_name = getNeighbors)]
    pub fn get_neighbors(&self, vertex_id: u32) -> Vec<u32> {
        self.engine
            .get_neighbors(VertexId(vertex_id))
            .into_iter()
            .map(u32::from)
            .collect()
    }

    /// Move a vertex. Unknown IDs are ignored.
    #[wasm_bindgen(js_name = setVertexPosition)]
    pub fn set_vertex_position(&mut self, vertex_id: u32, x: f32, y: f32, z: f32) {
        self.engine.set_position(VertexId(vertex_id), x, y, z);
    }

    /// Get the mesh bounds as [minX, minY, minZ, maxX, maxY, maxZ], or None when empty.
    #[wasm_bindgen(js_name = getBounds)]
    pub fn get_bounds(&self) -> Option<Float32Array> {
        self.engine
            .get_bounds()
            .map(|(min, max)| Float32Array::from(&bounds_array(min, max)[..]))
    }

    /// Clear the mesh, the selection and the last run's stats.
    pub fn clear(&mut self) {
        self.engine.clear();
        self.last_stats = None;
    }

    // =========================================================================
    // Root Selection
    // =========================================================================

    /// Select a vertex as a root. Returns false if the vertex is unknown.
    #[wasm_bindgen(js_name = selectVertex)]
    pub fn select_vertex(&mut self, vertex_id: u32) -> bool {
        self.engine.select_vertex(VertexId(vertex_id))
    }

    /// Deselect a vertex.
    #[wasm_bindgen(js_name = deselectVertex)]
    pub fn deselect_vertex(&mut self, vertex_id: u32) {
        self.engine.deselect_vertex(VertexId(vertex_id));
    }

    /// Deselect every vertex.
    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&mut self) {
        self.engine.clear_selection();
    }

    /// Check if a vertex is selected.
    #[wasm_bindgen(js_name = isVertexSelected)]
    pub fn is_vertex_selected(&self, vertex_id: u32) -> bool {
        self.engine.is_vertex_selected(VertexId(vertex_id))
    }

    /// Get the selected vertices in ascending ID order (the root order).
    #[wasm_bindgen(js_name = selectedVertices)]
    pub fn selected_vertices(&self) -> Vec<u32> {
        self.engine
            .selected_vertices()
            .into_iter()
            .map(u32::from)
            .collect()
    }

    /// Select every vertex within `tolerance` of the lowest elevation.
    ///
    /// Returns the number of newly selected vertices.
    #[wasm_bindgen(js_name = selectLowest)]
    pub fn select_lowest(&mut self, tolerance: f32) -> u32 {
        self.engine.select_lowest(tolerance)
    }

    /// Select the vertex nearest to a point.
    ///
    /// Returns the vertex ID, or None if no vertex is within `max_distance`.
    #[wasm_bindgen(js_name = selectNearest)]
    pub fn select_nearest(&mut self, x: f32, y: f32, z: f32, max_distance: f32) -> Option<u32> {
        self.engine
            .select_nearest(x, y, z, max_distance)
            .map(u32::from)
    }

    /// Select every vertex within `radius` of a point.
    ///
    /// Returns the number of newly selected vertices.
    #[wasm_bindgen(js_name = selectWithinRadius)]
    pub fn select_within_radius(&mut self, x: f32, y: f32, z: f32, radius: f32) -> u32 {
        self.engine.select_within_radius(x, y, z, radius)
    }

    // =========================================================================
    // UV Generation
    // =========================================================================

    /// Compute connectivity UVs for every face corner.
    ///
    /// Roots are the selected vertices. `config` is an optional object with
    /// any of `direction` (`"omnidirectional"`, `"upward"`, `"downward"`),
    /// `maxGenerations`, `childOrder` (`"mirrored"`, `"discovery"`) and
    /// `sentinel` ([u, v]).
    ///
    /// Returns a Float32Array [u0, v0, u1, v1, ...] with one pair per corner.
    /// Corners of unreached vertices get the sentinel (default [-1, -1]).
    #[wasm_bindgen(js_name = computeUvs)]
    pub fn compute_uvs(&mut self, config: JsValue) -> Result<Float32Array, JsError> {
        let config = parse_config(config)?;
        let result = self.run(config)?;
        Ok(Float32Array::from(&result.channel.to_interleaved()[..]))
    }

    /// Compute connectivity UVs per vertex rather than per corner.
    ///
    /// Returns a Float32Array [u0, v0, u1, v1, ...] with one pair per vertex.
    #[wasm_bindgen(js_name = computeVertexUvs)]
    pub fn compute_vertex_uvs(&mut self, config: JsValue) -> Result<Float32Array, JsError> {
        let config = parse_config(config)?;
        let uvs = self.run_vertex_uvs(config)?;
        Ok(Float32Array::from(&uvs[..]))
    }

    /// Stats from the last successful `computeUvs` call, or null.
    #[wasm_bindgen(js_name = lastStats)]
    pub fn last_stats(&self) -> Result<JsValue, JsError> {
        match &self.last_stats {
            Some(stats) => Ok(serde_wasm_bindgen::to_value(stats)?),
            None => Ok(JsValue::NULL),
        }
    }
}

impl TreeUvWasm {
    /// Run the pipeline over the current mesh and selection.
    fn run(&mut self, config: UvTreeConfig) -> Result<UvTreeResult, UvTreeError> {
        let roots = self.engine.selected_vertices();
        let result = UvTreeLayout::new(config).compute(
            &self.engine,
            &roots,
            self.engine.corner_vertices(),
        )?;
        self.last_stats = Some(result.stats.clone());
        Ok(result)
    }

    fn run_vertex_uvs(&self, config: UvTreeConfig) -> Result<Vec<f32>, UvTreeError> {
        let roots = self.engine.selected_vertices();
        UvTreeLayout::new(config).compute_vertex_uvs(
            &self.engine,
            &roots,
            self.engine.vertex_count() as usize,
        )
    }
}

impl Default for TreeUvWasm {
    fn default() -> Self {
        Self::new()
    }
}

fn bounds_array(min: Point3, max: Point3) -> [f32; 6] {
    [min.x, min.y, min.z, max.x, max.y, max.z]
}

fn parse_config(config: JsValue) -> Result<UvTreeConfig, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(UvTreeConfig::default());
    }
    Ok(serde_wasm_bindgen::from_value(config)?)
}
