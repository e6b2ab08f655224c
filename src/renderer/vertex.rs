//! GPU data layouts

use bytemuck::{Pod, Zeroable};

/// Flat-colored vertex in field space (pixels, origin top-left, y down)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Per-frame uniforms: the field size the shader maps to clip space.
/// Padded to 16 bytes for WebGL2 uniform alignment.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FieldUniform {
    pub size: [f32; 2],
    _pad: [f32; 2],
}

impl FieldUniform {
    /// Degenerate sizes are bumped to 1px so the shader never divides by zero
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: [width.max(1.0), height.max(1.0)],
            _pad: [0.0; 2],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    /// Blue
    pub const SHIP: [f32; 4] = [0.2, 0.4, 1.0, 1.0];
    /// Red
    pub const PROJECTILE: [f32; 4] = [1.0, 0.15, 0.15, 1.0];
    /// Green
    pub const BRICK: [f32; 4] = [0.2, 0.75, 0.3, 1.0];
    pub const PARTICLE: [f32; 4] = crate::consts::PARTICLE_COLOR;

    /// Background as a clear color
    pub fn clear_color() -> wgpu::Color {
        let [r, g, b, a] = BACKGROUND;
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_struct() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[1].offset, 8);
    }

    #[test]
    fn test_field_uniform_size_and_clamp() {
        assert_eq!(size_of::<FieldUniform>(), 16);
        assert_eq!(FieldUniform::new(0.0, 320.0).size, [1.0, 320.0]);
    }
}
