// src/wgpu_utils/binding_types.rs
//! Constructors for the bind group layout entry types the engine uses.

use std::mem;
use std::num::NonZeroU64;

/// Uniform buffer binding sized to `Content`, so a too-small buffer fails at
/// bind group creation rather than at draw time.
pub fn uniform<Content: bytemuck::Pod>() -> wgpu::BindingType {
    wgpu::BindingType::Buffer {
        ty: wgpu::BufferBindingType::Uniform,
        has_dynamic_offset: false,
        min_binding_size: NonZeroU64::new(mem::size_of::<Content>() as u64),
    }
}

pub fn sampler(filtering: wgpu::SamplerBindingType) -> wgpu::BindingType {
    wgpu::BindingType::Sampler(filtering)
}

/// Filterable 2D float texture.
pub fn texture_2d() -> wgpu::BindingType {
    wgpu::BindingType::Texture {
        sample_type: wgpu::TextureSampleType::Float { filterable: true },
        view_dimension: wgpu::TextureViewDimension::D2,
        multisampled: false,
    }
}
