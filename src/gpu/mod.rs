//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, growable buffers, uniform
//! blocks, render attachments and shader composition.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// MSAA color and depth attachments.
pub mod texture;
/// Frame and draw uniform blocks.
pub mod uniforms;
