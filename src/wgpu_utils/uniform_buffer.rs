// src/wgpu_utils/uniform_buffer.rs
//! Typed uniform buffer holding exactly one `Content` value.

use std::marker::PhantomData;

pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    last_written: Vec<u8>,
    marker: PhantomData<Content>,
}

/// Last path segment of a type name, for buffer labels.
fn short_type_name<Content>() -> &'static str {
    let full = std::any::type_name::<Content>();
    full.rsplit("::").next().unwrap_or(full)
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    /// Creates the buffer mapped and writes `initial_content` into it.
    pub fn new_with_data(device: &wgpu::Device, initial_content: &Content) -> Self {
        let bytes = bytemuck::bytes_of(initial_content);

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("UniformBuffer: {}", short_type_name::<Content>())),
            size: bytes.len() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: true,
        });
        buffer
            .slice(..)
            .get_mapped_range_mut()
            .copy_from_slice(bytes);
        buffer.unmap();

        UniformBuffer {
            buffer,
            last_written: bytes.to_vec(),
            marker: PhantomData,
        }
    }

    /// Writes `content`, skipping the queue submission when the bytes match
    /// the previous write.
    pub fn update_content(&mut self, queue: &wgpu::Queue, content: Content) {
        let bytes = bytemuck::bytes_of(&content);
        if self.last_written == bytes {
            return;
        }
        queue.write_buffer(&self.buffer, 0, bytes);
        self.last_written = bytes.to_vec();
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource {
        self.buffer.as_entire_binding()
    }
}
