use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Surface parameters of the three visual layers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Materials", inline)]
#[serde(default)]
pub struct MaterialOptions {
    /// Particle sprite edge length in world units.
    #[schemars(title = "Particle Size", range(min = 0.05, max = 2.0), extend("step" = 0.05))]
    pub particle_size: f32,
    /// Particle opacity.
    #[schemars(title = "Particle Opacity", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub particle_opacity: f32,
    /// Solid opacity.
    #[schemars(title = "Solid Opacity", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub solid_opacity: f32,
    /// Fraction of the solid color added as self-illumination.
    #[schemars(title = "Solid Glow", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub solid_emissive: f32,
    /// Phong specular exponent of the solids.
    #[schemars(skip)]
    pub shininess: f32,
    /// Wave plane opacity.
    #[schemars(title = "Wave Opacity", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub wave_opacity: f32,
    /// Fraction of the wave color added as self-illumination.
    #[schemars(skip)]
    pub wave_emissive: f32,
}

impl Default for MaterialOptions {
    fn default() -> Self {
        Self {
            particle_size: 0.3,
            particle_opacity: 0.6,
            solid_opacity: 0.7,
            solid_emissive: 0.3,
            shininess: 100.0,
            wave_opacity: 0.1,
            wave_emissive: 0.2,
        }
    }
}
