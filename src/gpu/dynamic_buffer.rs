//! Growable GPU buffers for per-frame vertex and instance uploads.
//!
//! Uploads go through `queue.write_buffer`; the buffer is only reallocated
//! when the data outgrows it, doubling its capacity.

use std::marker::PhantomData;

use wgpu::util::DeviceExt;

/// A typed GPU buffer that grows on demand and tracks its item count.
///
/// Never shrinks (GPU buffers cannot be resized in place).
pub struct TypedBuffer<T> {
    buffer: wgpu::Buffer,
    capacity: usize, // in items
    count: usize,
    usage: wgpu::BufferUsages,
    label: String,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Buffer initialized from `data`. An empty slice still allocates one
    /// item so the buffer can be bound.
    pub fn new_with_data(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> Self {
        let usage = usage | wgpu::BufferUsages::COPY_DST;
        let buffer = if data.is_empty() {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: size_of::<T>().max(4) as u64,
                usage,
                mapped_at_creation: false,
            })
        } else {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(data),
                usage,
            })
        };

        Self {
            buffer,
            capacity: data.len().max(1),
            count: data.len(),
            usage,
            label: label.to_owned(),
            _marker: PhantomData,
        }
    }

    /// Write data to buffer, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated.
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let reallocated = if data.len() > self.capacity {
            let new_capacity = (data.len() * 2).max(self.capacity + 64);
            self.buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&self.label),
                size: (new_capacity * size_of::<T>()) as u64,
                usage: self.usage,
                mapped_at_creation: false,
            });
            self.capacity = new_capacity;
            log::debug!("{} grown to {new_capacity} items", self.label);
            true
        } else {
            false
        };

        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        }
        self.count = data.len();
        reallocated
    }

    /// The underlying GPU buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Items written by the last upload.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the last upload was empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
