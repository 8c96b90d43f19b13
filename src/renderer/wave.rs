use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::error::BackdropError;
use crate::gpu::dynamic_buffer::TypedBuffer;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{self, ShaderComposer};
use crate::gpu::uniforms::{DrawUniform, UniformSlot};
use crate::options::MaterialOptions;
use crate::renderer::pipeline_util::{self, PipelineLayouts, PipelineSpec};
use crate::scene::SceneState;

/// Default Phong exponent; the wave has no configurable shininess.
const WAVE_SHININESS: f32 = 30.0;

const POSITION_LAYOUT: wgpu::VertexBufferLayout<'static> =
    wgpu::VertexBufferLayout {
        array_stride: size_of::<Vec3>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3],
    };

/// Wireframe line list over the rippling plane grid.
pub(crate) struct WavePass {
    pipeline: wgpu::RenderPipeline,
    positions: TypedBuffer<Vec3>,
    indices: wgpu::Buffer,
    index_count: u32,
    draw: UniformSlot<DrawUniform>,
}

impl WavePass {
    pub(crate) fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
        layouts: &PipelineLayouts,
        scene: &SceneState,
    ) -> Result<Self, BackdropError> {
        let pipeline = pipeline_util::create_pipeline(
            context,
            composer,
            layouts,
            &PipelineSpec {
                shader: &shader_composer::WAVE,
                buffers: &[POSITION_LAYOUT],
                topology: wgpu::PrimitiveTopology::LineList,
                depth_write: false,
            },
        )?;

        let wave = scene.wave();
        let positions = TypedBuffer::new_with_data(
            &context.device,
            "Wave Positions",
            wave.positions(),
            wgpu::BufferUsages::VERTEX,
        );
        let indices = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Wave Lines"),
                contents: bytemuck::cast_slice(wave.line_indices()),
                usage: wgpu::BufferUsages::INDEX,
            },
        );
        let draw = UniformSlot::new(
            &context.device,
            &layouts.draw,
            "Wave Draw",
            &DrawUniform::lit(wave.model_matrix(), wave.color(), 0.0, 0.0, 0.0),
        );

        Ok(Self {
            pipeline,
            positions,
            indices,
            index_count: wave.line_indices().len() as u32,
            draw,
        })
    }

    /// Re-upload the displaced vertices after each ripple step.
    pub(crate) fn prepare(
        &mut self,
        context: &RenderContext,
        scene: &mut SceneState,
        materials: &MaterialOptions,
    ) {
        let wave = scene.wave_mut();
        if wave.take_dirty() {
            let _ = self.positions.write(
                &context.device,
                &context.queue,
                wave.positions(),
            );
        }
        self.draw.write(
            &context.queue,
            &DrawUniform::lit(
                wave.model_matrix(),
                wave.color(),
                materials.wave_opacity,
                materials.wave_emissive,
                WAVE_SHININESS,
            ),
        );
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(1, self.draw.bind_group(), &[]);
        pass.set_vertex_buffer(0, self.positions.buffer().slice(..));
        pass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
