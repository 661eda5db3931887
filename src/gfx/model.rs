//! GPU-side form of a flattened scene.
//!
//! [`ModelGpu::upload`] turns the unified vertex and index vectors into one
//! buffer each and builds a bind group per draw. Images referenced by several
//! draws are uploaded once per role, since base color and normal data need
//! different texture formats.

use std::collections::HashMap;
use std::ops::Range;

use wgpu::util::DeviceExt;

use crate::gfx::texture::TextureResource;
use crate::scene::FlatScene;

/// One indexed range of the shared buffers together with its textures.
pub struct PrimitiveBatch {
    pub index_range: Range<u32>,
    pub bind_group: wgpu::BindGroup,
}

pub struct ModelGpu {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub batches: Vec<PrimitiveBatch>,
}

impl ModelGpu {
    /// Uploads a flattened scene. `images` must be the decoded images of the
    /// document the scene was flattened from, and `material_layout` the
    /// layout the render pipeline binds per-draw textures with.
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene: &FlatScene,
        images: &[gltf::image::Data],
        material_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Model Vertex Buffer"),
            contents: bytemuck::cast_slice(&scene.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Model Index Buffer"),
            contents: bytemuck::cast_slice(&scene.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let mut base_textures: HashMap<usize, TextureResource> = HashMap::new();
        let mut normal_textures: HashMap<usize, TextureResource> = HashMap::new();

        let batches = scene
            .draws
            .iter()
            .map(|draw| {
                let base = base_textures.entry(draw.base_color_image).or_insert_with(|| {
                    let image = &images[draw.base_color_image];
                    TextureResource::create_mipmapped(
                        device,
                        queue,
                        &image.pixels,
                        image.width,
                        image.height,
                        wgpu::TextureFormat::Rgba8UnormSrgb,
                        &format!("Base Color Texture {}", draw.base_color_image),
                    )
                });
                let normal = normal_textures.entry(draw.normal_image).or_insert_with(|| {
                    let image = &images[draw.normal_image];
                    TextureResource::create_mipmapped(
                        device,
                        queue,
                        &image.pixels,
                        image.width,
                        image.height,
                        wgpu::TextureFormat::Rgba8Unorm,
                        &format!("Normal Texture {}", draw.normal_image),
                    )
                });

                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("Primitive Material Bind Group"),
                    layout: material_layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(&base.view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(&base.sampler),
                        },
                        wgpu::BindGroupEntry {
                            binding: 2,
                            resource: wgpu::BindingResource::TextureView(&normal.view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 3,
                            resource: wgpu::BindingResource::Sampler(&normal.sampler),
                        },
                    ],
                });

                PrimitiveBatch {
                    index_range: draw.index_range(),
                    bind_group,
                }
            })
            .collect();

        if scene.is_empty() {
            log::warn!("flattened scene has no draws; the window will show only the clear color");
        }
        log::info!(
            "uploaded model: {} vertices, {} indices, {} draws",
            scene.vertices.len(),
            scene.indices.len(),
            scene.draws.len()
        );

        Self {
            vertex_buffer,
            index_buffer,
            batches,
        }
    }
}

pub trait DrawModel<'a> {
    fn draw_model(&mut self, model: &'a ModelGpu);
}

impl<'a, 'b> DrawModel<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_model(&mut self, model: &'b ModelGpu) {
        self.set_vertex_buffer(0, model.vertex_buffer.slice(..));
        self.set_index_buffer(model.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        for batch in &model.batches {
            self.set_bind_group(1, &batch.bind_group, &[]);
            self.draw_indexed(batch.index_range.clone(), 0, 0..1);
        }
    }
}
