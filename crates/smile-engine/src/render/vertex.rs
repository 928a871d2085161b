//! Interleaved vertex data for the two scene quads.

use bytemuck::{Pod, Zeroable};

use super::shader::ShaderBindings;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl Vertex {
    const fn new(position: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self { position, tex_coord }
    }

    /// Attribute layout with shader locations taken from reflection.
    pub fn attributes(bindings: &ShaderBindings) -> [wgpu::VertexAttribute; 2] {
        [
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: bindings.position,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: std::mem::size_of::<[f32; 3]>() as u64,
                shader_location: bindings.tex_coord,
            },
        ]
    }

    pub fn layout(attributes: &[wgpu::VertexAttribute]) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }
}

/// One of the two quads in the shared vertex buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Quad {
    Background,
    Sprite,
}

impl Quad {
    pub const ALL: [Quad; 2] = [Quad::Background, Quad::Sprite];

    pub const VERTEX_COUNT: u32 = 4;

    /// First vertex of this quad's triangle strip.
    pub const fn first_vertex(self) -> u32 {
        match self {
            Quad::Background => 0,
            Quad::Sprite => Self::VERTEX_COUNT,
        }
    }

    pub const fn vertices(self) -> std::ops::Range<u32> {
        self.first_vertex()..self.first_vertex() + Self::VERTEX_COUNT
    }

    /// Slot in the per-quad uniform and bind group arrays.
    pub const fn index(self) -> usize {
        match self {
            Quad::Background => 0,
            Quad::Sprite => 1,
        }
    }
}

/// Background (z = 0, upper-left quarter of its image) then sprite (z = 0.5).
/// Each quad is a triangle strip: top-left, bottom-left, top-right, bottom-right.
pub const QUAD_VERTICES: [Vertex; 8] = [
    Vertex::new([-2.0, 4.0, 0.0], [0.0, 0.0]),
    Vertex::new([-2.0, -4.0, 0.0], [0.0, 0.5]),
    Vertex::new([2.0, 4.0, 0.0], [0.5, 0.0]),
    Vertex::new([2.0, -4.0, 0.0], [0.5, 0.5]),
    Vertex::new([-0.3, 0.3, 0.5], [0.0, 0.0]),
    Vertex::new([-0.3, -0.3, 0.5], [0.0, 1.0]),
    Vertex::new([0.3, 0.3, 0.5], [1.0, 0.0]),
    Vertex::new([0.3, -0.3, 0.5], [1.0, 1.0]),
];
