use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Light rig: one ambient, two palette-tinted point lights and one white
/// directional light.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
pub struct LightingOptions {
    /// White ambient intensity.
    #[schemars(title = "Ambient", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub ambient: f32,
    /// Intensity of each point light.
    #[schemars(title = "Point Lights", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub point_intensity: f32,
    /// Distance at which point lights fade to zero.
    #[schemars(skip)]
    pub point_range: f32,
    /// Positions of the two point lights.
    #[schemars(skip)]
    pub point_positions: [[f32; 3]; 2],
    /// Intensity of the white directional light.
    #[schemars(title = "Directional", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub directional: f32,
    /// Position the directional light shines from (toward the origin).
    #[schemars(skip)]
    pub directional_position: [f32; 3],
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient: 0.4,
            point_intensity: 1.0,
            point_range: 100.0,
            point_positions: [[20.0, 30.0, 20.0], [-20.0, -30.0, 10.0]],
            directional: 0.3,
            directional_position: [10.0, 20.0, 10.0],
        }
    }
}
