//! Vertex layout shared by the scene flattener and the render pipeline.

/// A single interleaved vertex as the flattener emits it and the GPU
/// pipeline consumes it.
///
/// Positions are in world space (the flattener bakes each node's
/// accumulated transform in); normals, tangents and bitangents stay in
/// object space and span the TBN basis the fragment shader uses for
/// normal mapping.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// World-space position [x, y, z]
    pub position: [f32; 3],
    /// Object-space normal [nx, ny, nz]
    pub normal: [f32; 3],
    /// Texture coordinates [u, v]
    pub tex_coord: [f32; 2],
    /// Tangent [tx, ty, tz], the xyz of the source TANGENT attribute
    pub tangent: [f32; 3],
    /// Bitangent, cross(normal, tangent) scaled by the tangent's w
    pub bitangent: [f32; 3],
}

impl Vertex {
    /// Returns the vertex buffer layout for wgpu rendering.
    ///
    /// Attribute locations match the vertex shader inputs:
    /// 0 position, 1 normal, 2 tex_coord, 3 tangent, 4 bitangent.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 11]>() as wgpu::BufferAddress,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}
