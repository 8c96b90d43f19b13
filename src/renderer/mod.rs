//! GPU rendering of the scene layers.
//!
//! [`SceneRenderer`] owns the wgpu context and one pass per layer. Each
//! frame it uploads whatever the scene marked dirty, then draws the wave
//! plane, the solids and the particle cloud into a single multisampled,
//! alpha-blended pass cleared to the background color.

mod particles;
pub(crate) mod pipeline_util;
mod solids;
mod wave;

use crate::error::BackdropError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::FrameTargets;
use crate::gpu::uniforms::{FrameUniform, UniformSlot};
use crate::options::Options;
use crate::palette::Rgb;
use crate::scene::SceneState;

use particles::ParticlePass;
use pipeline_util::PipelineLayouts;
use solids::SolidPass;
use wave::WavePass;

/// Draws a [`SceneState`] to a window or canvas surface.
pub struct SceneRenderer {
    context: RenderContext,
    targets: FrameTargets,
    frame: UniformSlot<FrameUniform>,
    particles: ParticlePass,
    solids: SolidPass,
    wave: WavePass,
    clear: wgpu::Color,
    options: Options,
}

impl SceneRenderer {
    /// Acquire a GPU for `target` and build every pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`BackdropError::Gpu`] when no adapter or device is
    /// available, or [`BackdropError::Shader`] when a shader fails to
    /// compose.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: &Options,
        scene: &SceneState,
    ) -> Result<Self, BackdropError> {
        let context =
            RenderContext::new(target, size, options.render.sample_count())
                .await?;
        let mut composer = ShaderComposer::new()?;
        let layouts = PipelineLayouts::new(&context.device);

        let frame = UniformSlot::new(
            &context.device,
            &layouts.frame,
            "Frame Uniform",
            &FrameUniform::new(scene, options, context.encodes_srgb()),
        );
        let particles =
            ParticlePass::new(&context, &mut composer, &layouts, scene)?;
        let solids = SolidPass::new(
            &context,
            &mut composer,
            &layouts,
            scene,
            &options.materials,
        )?;
        let wave = WavePass::new(&context, &mut composer, &layouts, scene)?;
        let targets = FrameTargets::new(
            &context.device,
            (context.width(), context.height()),
            context.format(),
            context.sample_count,
        );
        let clear = clear_color(
            Rgb(options.scene.background),
            context.encodes_srgb(),
        );

        Ok(Self {
            context,
            targets,
            frame,
            particles,
            solids,
            wave,
            clear,
            options: options.clone(),
        })
    }

    /// Reconfigure the surface and attachments for a new drawing-buffer
    /// size. Zero-sized dimensions are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.targets = FrameTargets::new(
            &self.context.device,
            (width, height),
            self.context.format(),
            self.context.sample_count,
        );
    }

    /// Current drawing-buffer size.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.context.width(), self.context.height())
    }

    /// Upload dirty scene data and draw one frame.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired.
    pub fn render(
        &mut self,
        scene: &mut SceneState,
    ) -> Result<(), wgpu::SurfaceError> {
        self.prepare(scene);

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(
                        self.targets.color_attachment(&view, self.clear),
                    )],
                    depth_stencil_attachment: Some(
                        self.targets.depth_attachment(),
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
            pass.set_bind_group(0, self.frame.bind_group(), &[]);
            self.wave.draw(&mut pass);
            self.solids.draw(&mut pass);
            self.particles.draw(&mut pass);
        }
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    fn prepare(&mut self, scene: &mut SceneState) {
        let materials = &self.options.materials;
        self.frame.write(
            &self.context.queue,
            &FrameUniform::new(
                scene,
                &self.options,
                self.context.encodes_srgb(),
            ),
        );
        self.wave.prepare(&self.context, scene, materials);
        self.solids.prepare(&self.context, scene, materials);
        self.particles.prepare(&self.context, scene, materials);
    }
}

/// Clear value for `background`: linear for sRGB surfaces, encoded when
/// the surface stores raw values.
fn clear_color(background: Rgb, encode_srgb: bool) -> wgpu::Color {
    let [r, g, b] = if encode_srgb {
        background.to_srgb()
    } else {
        background.to_linear()
    };
    wgpu::Color {
        r: f64::from(r),
        g: f64::from(g),
        b: f64::from(b),
        a: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_color_follows_surface_encoding() {
        let background = Rgb(0x0f_0f23);
        let raw = clear_color(background, true);
        assert!((raw.r - 15.0 / 255.0).abs() < 1e-6);
        assert!((raw.b - 35.0 / 255.0).abs() < 1e-6);

        let linear = clear_color(background, false);
        assert!(linear.r < raw.r && linear.b < raw.b);
        assert_eq!(linear.a, 1.0);
    }
}
