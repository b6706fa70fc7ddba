//! Plain-old-data vertex types uploaded to GPU buffers.
//!
//! Positions and colors live in separate buffers, one attribute each, so both
//! types are a bare `vec3` of `f32` with no padding.

use bytemuck::{Pod, Zeroable};

/// Shader attribute location of [`Vertex::position`].
pub const POSITION_ATTRIBUTE: u32 = 0;

/// Shader attribute location of [`Color::rgb`].
pub const COLOR_ATTRIBUTE: u32 = 1;

/// A vertex position in model space.
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// `x`, `y`, `z` coordinates.
    pub position: [f32; 3],
}

impl Vertex {
    /// Shorthand used by the geometry tables.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z],
        }
    }
}

/// A per-vertex RGB color, each channel in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    /// Red, green and blue channels.
    pub rgb: [f32; 3],
}

impl Color {
    /// Shorthand used by the geometry tables.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { rgb: [r, g, b] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_color_are_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 12);
        assert_eq!(std::mem::size_of::<Color>(), 12);
    }

    #[test]
    fn cast_slice_preserves_component_order() {
        let vertices = [Vertex::new(1.0, 2.0, 3.0), Vertex::new(4.0, 5.0, 6.0)];
        let floats: &[f32] = bytemuck::cast_slice(&vertices);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }
}
