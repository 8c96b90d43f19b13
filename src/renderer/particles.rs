use crate::error::BackdropError;
use crate::gpu::dynamic_buffer::TypedBuffer;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{self, ShaderComposer};
use crate::gpu::uniforms::{DrawUniform, UniformSlot};
use crate::options::MaterialOptions;
use crate::renderer::pipeline_util::{self, PipelineLayouts, PipelineSpec};
use crate::scene::{ParticleInstance, SceneState};

const VERTICES_PER_SPRITE: u32 = 6;

const INSTANCE_LAYOUT: wgpu::VertexBufferLayout<'static> =
    wgpu::VertexBufferLayout {
        array_stride: size_of::<ParticleInstance>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
    };

/// Instanced billboard sprites for the particle cloud.
pub(crate) struct ParticlePass {
    pipeline: wgpu::RenderPipeline,
    instances: TypedBuffer<ParticleInstance>,
    draw: UniformSlot<DrawUniform>,
}

impl ParticlePass {
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
                shader: &shader_composer::PARTICLES,
                buffers: &[INSTANCE_LAYOUT],
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_write: false,
            },
        )?;
        let instances = TypedBuffer::new_with_data(
            &context.device,
            "Particle Instances",
            &scene.particles().instances(),
            wgpu::BufferUsages::VERTEX,
        );
        let draw = UniformSlot::new(
            &context.device,
            &layouts.draw,
            "Particle Draw",
            &DrawUniform::sprites(
                scene.particles().model_matrix(),
                0.0,
                0.0,
            ),
        );
        Ok(Self {
            pipeline,
            instances,
            draw,
        })
    }

    /// Upload instances when positions or colors moved, and the cloud
    /// transform every frame.
    pub(crate) fn prepare(
        &mut self,
        context: &RenderContext,
        scene: &mut SceneState,
        materials: &MaterialOptions,
    ) {
        let cloud = scene.particles_mut();
        if cloud.take_dirty() {
            let _ = self.instances.write(
                &context.device,
                &context.queue,
                &cloud.instances(),
            );
        }
        self.draw.write(
            &context.queue,
            &DrawUniform::sprites(
                cloud.model_matrix(),
                materials.particle_size,
                materials.particle_opacity,
            ),
        );
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.instances.is_empty() {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(1, self.draw.bind_group(), &[]);
        pass.set_vertex_buffer(0, self.instances.buffer().slice(..));
        pass.draw(0..VERTICES_PER_SPRITE, 0..self.instances.count() as u32);
    }
}
