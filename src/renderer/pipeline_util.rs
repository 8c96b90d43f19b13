use crate::error::BackdropError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{ShaderComposer, ShaderDef};
use crate::gpu::texture::DEPTH_FORMAT;
use crate::gpu::uniforms::uniform_layout;

/// Bind group layouts shared by every scene pipeline.
pub(crate) struct PipelineLayouts {
    /// group(0): per-frame camera, fog and lights.
    pub frame: wgpu::BindGroupLayout,
    /// group(1): per-draw transform and material.
    pub draw: wgpu::BindGroupLayout,
}

impl PipelineLayouts {
    pub(crate) fn new(device: &wgpu::Device) -> Self {
        Self {
            frame: uniform_layout(device, "Frame Layout"),
            draw: uniform_layout(device, "Draw Layout"),
        }
    }
}

/// Fixed-function state that differs between the scene layers.
pub(crate) struct PipelineSpec<'a> {
    pub shader: &'a ShaderDef,
    pub buffers: &'a [wgpu::VertexBufferLayout<'a>],
    pub topology: wgpu::PrimitiveTopology,
    pub depth_write: bool,
}

/// Single alpha-blended color target in the surface format.
pub(crate) fn blended_target(
    format: wgpu::TextureFormat,
) -> [Option<wgpu::ColorTargetState>; 1] {
    [Some(wgpu::ColorTargetState {
        format,
        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
        write_mask: wgpu::ColorWrites::ALL,
    })]
}

/// Depth test against earlier layers; only opaque-ish layers write.
pub(crate) fn depth_stencil_state(depth_write: bool) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: depth_write,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

pub(crate) fn create_pipeline(
    context: &RenderContext,
    composer: &mut ShaderComposer,
    layouts: &PipelineLayouts,
    spec: &PipelineSpec<'_>,
) -> Result<wgpu::RenderPipeline, BackdropError> {
    let label = spec.shader.label;
    let shader = composer.compose(&context.device, spec.shader)?;

    let pipeline_layout =
        context
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(&format!("{label} Pipeline Layout")),
                bind_group_layouts: &[&layouts.frame, &layouts.draw],
                push_constant_ranges: &[],
            });

    Ok(context
        .device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{label} Pipeline")),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: spec.buffers,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &blended_target(context.format()),
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: spec.topology,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(depth_stencil_state(spec.depth_write)),
            multisample: wgpu::MultisampleState {
                count: context.sample_count,
                ..Default::default()
            },
            multiview: None,
            cache: None,
        }))
}
