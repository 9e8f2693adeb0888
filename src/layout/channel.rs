//! Per-corner UV output.
//!
//! A polygon mesh stores UVs per face corner, not per vertex; every corner
//! takes the (u, v) of its owning vertex. Corners whose vertex the traversal
//! never reached get the sentinel.

use super::forest::Forest;
use crate::mesh::VertexId;

/// Written for every corner (or vertex) the traversal never reached.
pub const SENTINEL_UV: [f32; 2] = [-1.0, -1.0];

/// One UV pair per face corner.
#[derive(Debug, Clone, PartialEq)]
pub struct UvChannel {
    uvs: Vec<[f32; 2]>,
    reached: usize,
}

impl UvChannel {
    /// Fill a channel for `corner_vertices` from a laid-out forest.
    pub fn from_forest(forest: &Forest, corner_vertices: &[VertexId], sentinel: [f32; 2]) -> Self {
        let mut reached = 0;
        let uvs = corner_vertices
            .iter()
            .map(|&vertex| match forest.uv(vertex) {
                Some((u, v)) => {
                    reached += 1;
                    [u, v]
                }
                None => sentinel,
            })
            .collect();

        Self { uvs, reached }
    }

    /// UV pairs, one per corner.
    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    /// Flatten to [u0, v0, u1, v1, ...] for GPU or JS upload.
    pub fn to_interleaved(&self) -> Vec<f32> {
        self.uvs.iter().flatten().copied().collect()
    }

    /// Number of corners whose vertex received real coordinates.
    pub fn reached_corners(&self) -> usize {
        self.reached
    }

    /// Number of corners.
    pub fn len(&self) -> usize {
        self.uvs.len()
    }

    /// Check if the channel has no corners.
    pub fn is_empty(&self) -> bool {
        self.uvs.is_empty()
    }
}

/// Per-vertex UVs as [u0, v0, u1, v1, ...] for vertex ids `0..vertex_count`.
pub fn vertex_uvs(forest: &Forest, vertex_count: usize, sentinel: [f32; 2]) -> Vec<f32> {
    let mut uvs = Vec::with_capacity(vertex_count * 2);
    for i in 0..vertex_count {
        let [u, v] = forest
            .uv(VertexId(i as u32))
            .map(|(u, v)| [u, v])
            .unwrap_or(sentinel);
        uvs.push(u);
        uvs.push(v);
    }
    uvs
}
