use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output surface settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Render", inline)]
#[serde(default)]
pub struct RenderOptions {
    /// MSAA sample count (1 disables antialiasing).
    #[schemars(title = "MSAA Samples", range(min = 1, max = 4))]
    pub msaa_samples: u32,
    /// Upper bound on the device pixel ratio used for the drawing buffer.
    #[schemars(title = "Max Pixel Ratio", range(min = 1.0, max = 4.0), extend("step" = 0.25))]
    pub max_pixel_ratio: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            msaa_samples: 4,
            max_pixel_ratio: 2.0,
        }
    }
}

impl RenderOptions {
    /// Sample count the pipelines and targets are built with: 4 when
    /// requested above 1, otherwise 1. wgpu only guarantees 1 and 4.
    #[must_use]
    pub fn sample_count(&self) -> u32 {
        if self.msaa_samples > 1 {
            4
        } else {
            1
        }
    }

    /// Drawing-buffer size for a CSS-pixel viewport at `pixel_ratio`.
    #[must_use]
    pub fn drawing_buffer_size(
        &self,
        css_width: f64,
        css_height: f64,
        pixel_ratio: f64,
    ) -> (u32, u32) {
        let ratio = pixel_ratio.clamp(1.0, f64::from(self.max_pixel_ratio.max(1.0)));
        (
            ((css_width * ratio).round() as u32).max(1),
            ((css_height * ratio).round() as u32).max(1),
        )
    }
}
