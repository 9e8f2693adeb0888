//! Vertex type and related structures.
//!
//! Vertices are the points of the mesh surface. Each vertex has:
//! - A stable unique identifier (survives until the mesh is cleared)
//! - Position (x, y, z) in object space, with z as elevation
//! - Selection state (selected vertices become traversal roots)

use std::fmt;

/// Stable vertex identifier.
///
/// It wraps a u32 for efficient storage and WebAssembly interop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

impl VertexId {
    /// Create a new VertexId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vertex({})", self.0)
    }
}

impl From<u32> for VertexId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<VertexId> for u32 {
    #[inline]
    fn from(id: VertexId) -> Self {
        id.0
    }
}

/// A point in object space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate (elevation).
    pub z: f32,
}

impl Point3 {
    /// Create a new point.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Straight-line distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point3) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Vertex state flags packed into a single byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct VertexState {
    flags: u8,
}

impl VertexState {
    const SELECTED: u8 = 0b0000_0001;

    /// Create a new default vertex state.
    #[inline]
    pub fn new() -> Self {
        Self { flags: 0 }
    }

    /// Check if the vertex is selected.
    #[inline]
    pub fn is_selected(self) -> bool {
        self.flags & Self::SELECTED != 0
    }

    /// Set the selected state.
    #[inline]
    pub fn set_selected(&mut self, selected: bool) {
        if selected {
            self.flags |= Self::SELECTED;
        } else {
            self.flags &= !Self::SELECTED;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_id() {
        let id = VertexId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Vertex(42)");
    }

    #[test]
    fn test_vertex_id_conversion() {
        let id: VertexId = 7.into();
        let raw: u32 = id.into();
        assert_eq!(raw, 7);
    }

    #[test]
    fn test_point_distance() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 3.0, 6.0);
        assert!((a.distance(&b) - 7.0).abs() < 1e-6);
        assert_eq!(b.distance(&b), 0.0);
    }

    #[test]
    fn test_vertex_state_selected() {
        let mut state = VertexState::new();
        assert!(!state.is_selected());

        state.set_selected(true);
        assert!(state.is_selected());

        state.set_selected(false);
        assert!(!state.is_selected());
    }
}
