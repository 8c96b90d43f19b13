//! Centralized scene, motion, lighting and material options with TOML
//! preset support.
//!
//! Every tweakable constant of the backdrop lives here. Defaults reproduce
//! the stock look; presets serialize to/from TOML so a page (or the native
//! viewer) can ship an alternative mood without code changes.

mod camera;
mod lighting;
mod materials;
mod motion;
mod render;
mod scene;

use std::path::Path;

pub use camera::CameraOptions;
pub use lighting::LightingOptions;
pub use materials::MaterialOptions;
pub use motion::MotionOptions;
pub use render::RenderOptions;
pub use scene::SceneOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::BackdropError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[motion]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Layer sizes, spreads and backdrop colors.
    pub scene: SceneOptions,
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Per-frame animation rates.
    pub motion: MotionOptions,
    /// Light rig parameters.
    pub lighting: LightingOptions,
    /// Surface parameters of particles, solids and the wave plane.
    pub materials: MaterialOptions,
    /// Output surface settings.
    pub render: RenderOptions,
}

impl Options {
    /// Generate JSON Schema describing the tunable options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BackdropError::OptionsParse`] on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, BackdropError> {
        toml::from_str(content)
            .map_err(|e| BackdropError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BackdropError::Io`] if the file cannot be read, or
    /// [`BackdropError::OptionsParse`] on malformed TOML.
    pub fn load(path: &Path) -> Result<Self, BackdropError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`BackdropError`] if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), BackdropError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| BackdropError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(BackdropError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[motion]
time_step = 0.002
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.motion.time_step, 0.002);
        // Everything else should be default
        assert_eq!(opts.motion.cloud_rotation, 0.0005);
        assert_eq!(opts.scene.particle_count, 200);
        assert_eq!(opts.camera.fovy, 75.0);
    }

    #[test]
    fn malformed_toml_is_reported() {
        let err = Options::from_toml("[scene\nparticle_count = ").unwrap_err();
        assert!(matches!(err, BackdropError::OptionsParse(_)));
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("backdrop-presets-{}", std::process::id()));
        let mut calm = Options::default();
        calm.motion.time_step = 0.0005;
        calm.save(&dir.join("calm.toml")).unwrap();
        Options::default().save(&dir.join("stock.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        assert_eq!(Options::list_presets(&dir), vec!["calm", "stock"]);
        assert_eq!(Options::load(&dir.join("calm.toml")).unwrap(), calm);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn sample_count_is_one_or_four() {
        let mut render = RenderOptions::default();
        assert_eq!(render.sample_count(), 4);
        render.msaa_samples = 1;
        assert_eq!(render.sample_count(), 1);
        render.msaa_samples = 8;
        assert_eq!(render.sample_count(), 4);
    }

    #[test]
    fn drawing_buffer_clamps_pixel_ratio() {
        let render = RenderOptions::default();
        assert_eq!(render.drawing_buffer_size(800.0, 600.0, 1.0), (800, 600));
        assert_eq!(render.drawing_buffer_size(800.0, 600.0, 3.0), (1600, 1200));
        assert_eq!(render.drawing_buffer_size(0.0, 0.0, 1.0), (1, 1));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        for section in
            ["scene", "camera", "motion", "lighting", "materials", "render"]
        {
            assert!(props.contains_key(section), "missing {section}");
        }

        // Skipped fields stay out of the schema
        let scene = &props["scene"]["properties"];
        assert!(scene.get("particle_count").is_some());
        assert!(scene.get("background").is_none());
        let lighting = &props["lighting"]["properties"];
        assert!(lighting.get("ambient").is_some());
        assert!(lighting.get("point_positions").is_none());
    }
}
