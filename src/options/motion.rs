use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-frame animation rates. Motion is stepped per frame, not per second,
/// so speeds scale with the display refresh rate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Motion", inline)]
#[serde(default)]
pub struct MotionOptions {
    /// Scene clock increment per frame.
    #[schemars(title = "Time Step", range(min = 0.0, max = 0.01), extend("step" = 0.0001))]
    pub time_step: f32,
    /// Particle cloud Y rotation per frame (X turns at half this rate).
    #[schemars(title = "Cloud Rotation", range(min = 0.0, max = 0.01), extend("step" = 0.0001))]
    pub cloud_rotation: f32,
    /// Vertical drift applied to each particle per frame.
    #[schemars(title = "Particle Bob", range(min = 0.0, max = 0.1), extend("step" = 0.001))]
    pub particle_bob: f32,
    /// Vertical bob amplitude of the solids.
    #[schemars(title = "Solid Bob", range(min = 0.0, max = 10.0), extend("step" = 0.1))]
    pub solid_bob: f32,
    /// Horizontal sway amplitude of the solids.
    #[schemars(title = "Solid Sway", range(min = 0.0, max = 10.0), extend("step" = 0.1))]
    pub solid_sway: f32,
    /// Peak ripple height of the wave plane.
    #[schemars(title = "Wave Height", range(min = 0.0, max = 10.0), extend("step" = 0.1))]
    pub wave_amplitude: f32,
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            time_step: 0.001,
            cloud_rotation: 0.0005,
            particle_bob: 0.01,
            solid_bob: 3.0,
            solid_sway: 2.0,
            wave_amplitude: 2.0,
        }
    }
}
