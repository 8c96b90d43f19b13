//! CPU-side mesh generation for the scene's fixed shapes.
//!
//! Solids are produced as non-indexed triangle lists (three vertices per
//! face) so each face can carry its own normal; the wave plane is a
//! vertex grid plus a line-list index buffer for wireframe drawing.

mod plane;
mod polyhedron;

use glam::Vec3;

pub use plane::PlaneGrid;
pub use polyhedron::{Polyhedron, PolyhedronKind};

/// Interleaved position + normal vertex, matching the solid shader's vertex
/// layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space unit normal.
    pub normal: [f32; 3],
}

impl MeshVertex {
    /// Vertex buffer layout: position at location 0, normal at location 1.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> =
        wgpu::VertexBufferLayout {
            array_stride: size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
        };

    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}
