use wgpu::util::DeviceExt;

use crate::error::BackdropError;
use crate::geometry::{MeshVertex, Polyhedron};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{self, ShaderComposer};
use crate::gpu::uniforms::{DrawUniform, UniformSlot};
use crate::options::MaterialOptions;
use crate::renderer::pipeline_util::{self, PipelineLayouts, PipelineSpec};
use crate::scene::{FloatingSolid, SceneState, SOLID_SHAPES};

struct SolidMesh {
    vertices: wgpu::Buffer,
    vertex_count: u32,
    draw: UniformSlot<DrawUniform>,
}

/// One static mesh and draw uniform per floating solid.
pub(crate) struct SolidPass {
    pipeline: wgpu::RenderPipeline,
    meshes: Vec<SolidMesh>,
}

impl SolidPass {
    pub(crate) fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
        layouts: &PipelineLayouts,
        scene: &SceneState,
        materials: &MaterialOptions,
    ) -> Result<Self, BackdropError> {
        let pipeline = pipeline_util::create_pipeline(
            context,
            composer,
            layouts,
            &PipelineSpec {
                shader: &shader_composer::SOLIDS,
                buffers: &[MeshVertex::LAYOUT],
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_write: true,
            },
        )?;

        let meshes = SOLID_SHAPES
            .iter()
            .zip(scene.solids())
            .map(|(&(kind, radius, detail), solid)| {
                let mesh = Polyhedron::new(kind, radius, detail);
                let label = format!("{kind:?}");
                SolidMesh {
                    vertices: context.device.create_buffer_init(
                        &wgpu::util::BufferInitDescriptor {
                            label: Some(&label),
                            contents: bytemuck::cast_slice(&mesh.vertices),
                            usage: wgpu::BufferUsages::VERTEX,
                        },
                    ),
                    vertex_count: mesh.vertices.len() as u32,
                    draw: UniformSlot::new(
                        &context.device,
                        &layouts.draw,
                        &label,
                        &solid_material(solid, materials),
                    ),
                }
            })
            .collect();

        Ok(Self { pipeline, meshes })
    }

    /// Write each solid's transform and current palette color.
    pub(crate) fn prepare(
        &self,
        context: &RenderContext,
        scene: &SceneState,
        materials: &MaterialOptions,
    ) {
        for (mesh, solid) in self.meshes.iter().zip(scene.solids()) {
            mesh.draw
                .write(&context.queue, &solid_material(solid, materials));
        }
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        for mesh in &self.meshes {
            pass.set_bind_group(1, mesh.draw.bind_group(), &[]);
            pass.set_vertex_buffer(0, mesh.vertices.slice(..));
            pass.draw(0..mesh.vertex_count, 0..1);
        }
    }
}

fn solid_material(solid: &FloatingSolid, materials: &MaterialOptions) -> DrawUniform {
    DrawUniform::lit(
        solid.model_matrix(),
        solid.color(),
        materials.solid_opacity,
        materials.solid_emissive,
        materials.shininess,
    )
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::options::Options;

    #[test]
    fn solid_material_is_lit_with_palette_color() {
        let options = Options::default();
        let scene = SceneState::with_rng(&options, 800, 600, StdRng::seed_from_u64(3));
        let solid = &scene.solids()[1];
        let material = solid_material(solid, &options.materials);

        let [r, g, b] = solid.color().to_linear();
        assert_eq!(material.color, [r, g, b, 0.7]);
        assert!((material.emissive[0] - r * 0.3).abs() < 1e-6);
        assert_eq!(material.params, [100.0, 0.0, 0.0, 0.0]);
        assert_eq!(material.model, solid.model_matrix().to_cols_array_2d());
    }
}
