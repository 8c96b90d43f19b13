use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Scene layout: layer sizes, spreads and the backdrop colors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
pub struct SceneOptions {
    /// Number of particles in the cloud.
    #[schemars(title = "Particles", range(min = 0, max = 5000))]
    pub particle_count: u32,
    /// Edge length of the cube particles are scattered in.
    #[schemars(title = "Particle Spread", range(min = 10.0, max = 400.0), extend("step" = 1.0))]
    pub particle_spread: f32,
    /// Edge length of the cube the solids rest in.
    #[schemars(title = "Solid Spread", range(min = 10.0, max = 200.0), extend("step" = 1.0))]
    pub solid_spread: f32,
    /// Clear color as `0xRRGGBB`.
    #[schemars(skip)]
    pub background: u32,
    /// Linear fog color as `0xRRGGBB`.
    #[schemars(skip)]
    pub fog_color: u32,
    /// View distance where fog starts.
    #[schemars(title = "Fog Near", range(min = 0.0, max = 1000.0), extend("step" = 10.0))]
    pub fog_near: f32,
    /// View distance where fog is opaque.
    #[schemars(title = "Fog Far", range(min = 10.0, max = 2000.0), extend("step" = 10.0))]
    pub fog_far: f32,
    /// Fixed base color of the wave plane as `0xRRGGBB`.
    #[schemars(skip)]
    pub wave_color: u32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            particle_count: 200,
            particle_spread: 100.0,
            solid_spread: 60.0,
            background: 0x0f_0f23,
            fog_color: 0x0f_0f23,
            fog_near: 100.0,
            fog_far: 1000.0,
            wave_color: 0x66_7eea,
        }
    }
}
