// Vertex structure for 2D sprite rendering

use super::Flip;
use crate::core::math::Rect;
use bytemuck::{Pod, Zeroable};

/// Indices for one quad built by [`Vertex::quad`]
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Vertex for 2D sprite rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in screen pixels
    pub position: [f32; 2],
    /// Texture coordinates (UV)
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 2], tex_coords: [f32; 2]) -> Self {
        Self {
            position,
            tex_coords,
        }
    }

    /// Four corners of `rect` (top-left, top-right, bottom-right, bottom-left)
    /// with texture coordinates mirrored according to `flip`
    pub fn quad(rect: Rect, flip: Flip) -> [Vertex; 4] {
        let [left, top, right, bottom] = rect.edges();
        let (v0, v1) = match flip {
            Flip::None => (0.0, 1.0),
            Flip::Vertical => (1.0, 0.0),
        };

        [
            Vertex::new([left, top], [0.0, v0]),
            Vertex::new([right, top], [1.0, v0]),
            Vertex::new([right, bottom], [1.0, v1]),
            Vertex::new([left, bottom], [0.0, v1]),
        ]
    }

    /// Get the vertex buffer layout descriptor
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // Tex Coords
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_positions() {
        let quad = Vertex::quad(Rect::new(10, 20, 50, 40), Flip::None);
        assert_eq!(quad[0].position, [10.0, 20.0]);
        assert_eq!(quad[1].position, [60.0, 20.0]);
        assert_eq!(quad[2].position, [60.0, 60.0]);
        assert_eq!(quad[3].position, [10.0, 60.0]);
    }

    #[test]
    fn test_quad_uvs_unflipped() {
        let quad = Vertex::quad(Rect::new(0, 0, 1, 1), Flip::None);
        assert_eq!(quad[0].tex_coords, [0.0, 0.0]);
        assert_eq!(quad[2].tex_coords, [1.0, 1.0]);
    }

    #[test]
    fn test_vertical_flip_swaps_v() {
        let quad = Vertex::quad(Rect::new(0, 0, 1, 1), Flip::Vertical);
        assert_eq!(quad[0].tex_coords, [0.0, 1.0]);
        assert_eq!(quad[1].tex_coords, [1.0, 1.0]);
        assert_eq!(quad[2].tex_coords, [1.0, 0.0]);
        assert_eq!(quad[3].tex_coords, [0.0, 0.0]);
    }

    #[test]
    fn test_vertex_layout_stride() {
        assert_eq!(Vertex::desc().array_stride, 16);
    }
}
