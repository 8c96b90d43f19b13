use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor, ShaderLanguage,
    ShaderType,
};

use crate::error::BackdropError;

/// Shader identity: label + embedded source + path, always passed together.
pub struct ShaderDef {
    /// Debug label for the wgpu module and pipeline.
    pub label: &'static str,
    /// WGSL source, possibly containing `#import backdrop::...` lines.
    pub source: &'static str,
    /// Virtual file path used in composer diagnostics.
    pub path: &'static str,
}

/// Floating-point sprite cloud.
pub const PARTICLES: ShaderDef = ShaderDef {
    label: "Particles",
    source: include_str!("../../assets/shaders/particles.wgsl"),
    path: "particles.wgsl",
};

/// Phong-lit translucent polyhedra.
pub const SOLIDS: ShaderDef = ShaderDef {
    label: "Solids",
    source: include_str!("../../assets/shaders/solids.wgsl"),
    path: "solids.wgsl",
};

/// Wireframe wave plane.
pub const WAVE: ShaderDef = ShaderDef {
    label: "Wave",
    source: include_str!("../../assets/shaders/wave.wgsl"),
    path: "wave.wgsl",
};

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// The shared `backdrop::frame` module (uniform blocks, fog, Phong) is
/// registered at construction; the composer produces `naga::Module` IR
/// directly, skipping WGSL re-parse at runtime.
pub struct ShaderComposer {
    composer: Composer,
}

/// Shared modules in dependency order.
const MODULES: &[(&str, &str)] = &[(
    include_str!("../../assets/shaders/modules/frame.wgsl"),
    "modules/frame.wgsl",
)];

impl ShaderComposer {
    /// Composer with every shared module registered.
    ///
    /// # Errors
    ///
    /// Returns [`BackdropError::Shader`] if a shared module fails to parse.
    pub fn new() -> Result<Self, BackdropError> {
        let mut composer = Composer::default();
        for &(source, file_path) in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source,
                    file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| {
                    BackdropError::Shader(format!(
                        "module '{file_path}': {e:?}"
                    ))
                })?;
        }
        Ok(Self { composer })
    }

    /// Compose `shader` into a `wgpu::ShaderModule` ready for pipeline
    /// creation.
    ///
    /// # Errors
    ///
    /// Returns [`BackdropError::Shader`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        shader: &ShaderDef,
    ) -> Result<wgpu::ShaderModule, BackdropError> {
        let naga_module = self.compose_naga(shader.source, shader.path)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{} Shader", shader.label)),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader source into a `naga::Module` without a device.
    ///
    /// # Errors
    ///
    /// Returns [`BackdropError::Shader`] if composition fails.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, BackdropError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| BackdropError::Shader(format!("'{file_path}': {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_shaders_compose() {
        let mut composer = ShaderComposer::new().unwrap();
        for shader in [PARTICLES, SOLIDS, WAVE] {
            let module = composer
                .compose_naga(shader.source, shader.path)
                .unwrap_or_else(|e| {
                    panic!("Shader '{}' failed to compose: {e}", shader.path)
                });
            let entry_points: Vec<&str> =
                module.entry_points.iter().map(|e| e.name.as_str()).collect();
            assert!(entry_points.contains(&"vs_main"), "{}", shader.path);
            assert!(entry_points.contains(&"fs_main"), "{}", shader.path);
        }
    }

    #[test]
    fn malformed_source_is_a_shader_error() {
        let mut composer = ShaderComposer::new().unwrap();
        let err = composer
            .compose_naga("fn x( {", "bad.wgsl")
            .unwrap_err();
        match err {
            BackdropError::Shader(message) => {
                assert!(message.contains("bad.wgsl"), "{message}");
            }
            other => panic!("expected a shader error, got {other}"),
        }
    }
}
