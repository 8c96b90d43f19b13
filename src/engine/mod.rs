//! The per-frame driver.
//!
//! [`Engine`] pairs the CPU [`SceneState`] with an optional GPU
//! [`SceneRenderer`]. When GPU initialization fails the engine keeps
//! running in a degraded mode: the scene still advances and accepts
//! palette changes, but nothing is drawn and hosts are expected to show
//! [`Engine::background_css`] instead.

mod handle;
mod lifecycle;

use web_time::Duration;

pub use handle::Ready;
pub use lifecycle::Lifecycle;

use crate::error::BackdropError;
use crate::menu::PaletteTarget;
use crate::options::Options;
use crate::palette::{PaletteId, Rgb};
use crate::renderer::SceneRenderer;
use crate::scene::SceneState;
use crate::util::frame_timing::FrameTiming;

/// Handle through which the menu and host code reach an engine that may
/// still be initializing.
pub type EngineHandle = Ready<Engine>;

const FPS_REPORT_INTERVAL: Duration = Duration::from_secs(10);

/// Scene state, renderer and loop lifecycle.
pub struct Engine {
    scene: SceneState,
    renderer: Option<SceneRenderer>,
    lifecycle: Lifecycle,
    timing: FrameTiming,
    options: Options,
}

impl Engine {
    /// Build the scene and try to acquire a GPU for `target`.
    ///
    /// Never fails: without a usable adapter the engine is created
    /// [degraded](Self::is_degraded) and a warning is logged.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Self {
        let scene = SceneState::new(&options, size.0, size.1);
        let renderer =
            match SceneRenderer::new(target, size, &options, &scene).await {
                Ok(renderer) => Some(renderer),
                Err(e) => {
                    log::warn!(
                        "GPU rendering unavailable, showing static background: {e}"
                    );
                    None
                }
            };
        Self::assemble(scene, renderer, options)
    }

    /// An engine with no GPU surface, e.g. for tests or when the host
    /// already knows rendering is impossible.
    #[must_use]
    pub fn headless(options: Options, size: (u32, u32)) -> Self {
        let scene = SceneState::new(&options, size.0, size.1);
        Self::assemble(scene, None, options)
    }

    /// Wrap an existing scene (for example one built from a seeded RNG).
    #[must_use]
    pub fn from_scene(scene: SceneState, options: Options) -> Self {
        Self::assemble(scene, None, options)
    }

    fn assemble(
        scene: SceneState,
        renderer: Option<SceneRenderer>,
        options: Options,
    ) -> Self {
        Self {
            scene,
            renderer,
            lifecycle: Lifecycle::Running,
            timing: FrameTiming::new(FPS_REPORT_INTERVAL),
            options,
        }
    }

    /// Advance the scene one step and draw it.
    ///
    /// Returns `false` while suspended, in which case nothing happens and
    /// the host should stop requesting frames.
    pub fn tick(&mut self) -> bool {
        if !self.lifecycle.is_running() {
            return false;
        }
        self.scene.advance_frame();

        if let Some(renderer) = &mut self.renderer {
            match renderer.render(&mut self.scene) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                    let (width, height) = renderer.size();
                    renderer.resize(width, height);
                }
                Err(wgpu::SurfaceError::Timeout) => {
                    log::debug!("surface timeout, frame skipped");
                }
                Err(e) => log::error!("render error: {e:?}"),
            }
        }

        if let Some(fps) = self.timing.end_frame() {
            log::debug!("{fps:.1} fps at t={:.3}", self.scene.time());
        }
        true
    }

    /// Switch the live scene to `id`; visible on the next rendered frame.
    pub fn change_palette(&mut self, id: PaletteId) {
        log::info!("palette -> {id}");
        self.scene.apply_palette(id);
    }

    /// [`change_palette`](Self::change_palette) from a string key.
    ///
    /// # Errors
    ///
    /// Returns [`BackdropError::UnknownPalette`] for a key naming no
    /// palette; nothing changes.
    pub fn change_palette_key(
        &mut self,
        key: &str,
    ) -> Result<PaletteId, BackdropError> {
        let id = key.parse()?;
        self.change_palette(id);
        Ok(id)
    }

    /// Resize to a `width` x `height` drawing buffer in physical pixels.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        log::info!("resize to {width}x{height}");
        self.scene.resize(width, height);
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(width, height);
        }
    }

    /// Stop advancing the scene clock.
    pub fn suspend(&mut self) {
        if self.lifecycle.suspend() {
            log::debug!("frame loop suspended at t={:.3}", self.scene.time());
        }
    }

    /// Resume after [`suspend`](Self::suspend). Returns `true` when the
    /// loop was suspended and must be rescheduled.
    pub fn resume(&mut self) -> bool {
        let resumed = self.lifecycle.resume();
        if resumed {
            self.timing.reset();
            log::debug!("frame loop resumed");
        }
        resumed
    }

    /// Suspend or resume from a page or window visibility change. Returns
    /// `true` when the loop must be rescheduled.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        if visible {
            self.resume()
        } else {
            self.suspend();
            false
        }
    }

    /// Current loop state.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Whether GPU initialization failed and nothing is drawn.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.renderer.is_none()
    }

    /// The scene being animated.
    #[must_use]
    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    /// Size of the output buffer: the surface size when rendering,
    /// otherwise the scene viewport.
    #[must_use]
    pub fn output_size(&self) -> (u32, u32) {
        self.renderer
            .as_ref()
            .map_or_else(|| self.scene.viewport(), SceneRenderer::size)
    }

    /// Options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Smoothed frame rate.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.timing.fps()
    }

    /// CSS color for the static fallback background.
    #[must_use]
    pub fn background_css(&self) -> String {
        Rgb(self.options.scene.background).css()
    }
}

impl PaletteTarget for Engine {
    fn change_palette(&mut self, id: PaletteId) {
        Engine::change_palette(self, id);
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn engine() -> Engine {
        let options = Options::default();
        let scene =
            SceneState::with_rng(&options, 800, 600, StdRng::seed_from_u64(7));
        Engine::from_scene(scene, options)
    }

    #[test]
    fn headless_engine_is_degraded_but_animates() {
        let mut engine = Engine::headless(Options::default(), (640, 480));
        assert!(engine.is_degraded());
        assert!(engine.tick());
        assert!(engine.scene().time() > 0.0);
        assert_eq!(engine.background_css(), "#0f0f23");
    }

    #[test]
    fn suspended_ticks_do_not_advance_time() {
        let mut engine = engine();
        assert!(engine.tick());
        let time = engine.scene().time();

        engine.suspend();
        for _ in 0..5 {
            assert!(!engine.tick());
        }
        assert_eq!(engine.scene().time(), time);

        assert!(engine.resume());
        assert!(!engine.resume());
        assert!(engine.tick());
        assert!(engine.scene().time() > time);
    }

    #[test]
    fn visibility_drives_lifecycle() {
        let mut engine = engine();
        assert!(!engine.set_visible(false));
        assert_eq!(engine.lifecycle(), Lifecycle::Suspended);
        assert!(engine.set_visible(true));
        assert_eq!(engine.lifecycle(), Lifecycle::Running);
    }

    #[test]
    fn resize_updates_aspect_and_output() {
        let mut engine = engine();
        engine.resize(1024, 512);
        assert_eq!(engine.scene().camera().aspect, 2.0);
        assert_eq!(engine.output_size(), (1024, 512));
        engine.resize(0, 512);
        assert_eq!(engine.output_size(), (1024, 512));
    }

    #[test]
    fn palette_changes_recolor_solids() {
        let mut engine = engine();
        engine.change_palette(PaletteId::Palette4);
        let colors = PaletteId::Palette4.palette().colors;
        for (i, solid) in engine.scene().solids().iter().enumerate() {
            assert_eq!(solid.color(), colors[i % 4]);
        }
    }

    #[test]
    fn unknown_key_is_rejected_without_change() {
        let mut engine = engine();
        let err = engine.change_palette_key("palette9").unwrap_err();
        assert!(matches!(err, BackdropError::UnknownPalette(_)));
        assert_eq!(engine.scene().palette(), PaletteId::Palette1);
        assert_eq!(
            engine.change_palette_key("palette2").unwrap(),
            PaletteId::Palette2
        );
    }

    #[test]
    fn handle_defers_palette_until_ready() {
        let handle: EngineHandle = Ready::pending();
        handle.when_ready(|engine| engine.change_palette(PaletteId::Palette3));
        handle.resolve(engine());
        assert_eq!(
            handle.with(|engine| engine.scene().palette()),
            Some(PaletteId::Palette3)
        );
    }
}
