//! Standalone window running the background, backed by winit.
//!
//! Keys `1`-`5` select a palette and `P` toggles the (logged) menu panel.
//! The choice persists in a small TOML file, so the next launch restores
//! it the same way the web page does.
//!
//! ```no_run
//! # use backdrop::Viewer;
//! Viewer::builder()
//!     .with_title("Backdrop")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::Key;
use winit::window::{Window, WindowId};

use crate::engine::{Engine, EngineHandle, Ready};
use crate::error::BackdropError;
use crate::menu::{FileStore, PaletteMenu};
use crate::options::Options;
use crate::palette::PaletteId;

/// Default preference file, relative to the working directory.
pub const DEFAULT_PREFERENCES: &str = "backdrop-preferences.toml";

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Options,
    title: String,
    preferences: PathBuf,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: Options::default(),
            title: "Backdrop".into(),
            preferences: PathBuf::from(DEFAULT_PREFERENCES),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Where the selected palette is remembered.
    #[must_use]
    pub fn with_preferences(mut self, path: impl Into<PathBuf>) -> Self {
        self.preferences = path.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options,
            title: self.title,
            preferences: self.preferences,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A desktop window showing the animated background.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run).
pub struct Viewer {
    options: Options,
    title: String,
    preferences: PathBuf,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`BackdropError::Viewer`] if the event loop cannot be created
    /// or exits abnormally.
    pub fn run(self) -> Result<(), BackdropError> {
        let event_loop = EventLoop::new()
            .map_err(|e| BackdropError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let handle: EngineHandle = Ready::pending();
        let menu = PaletteMenu::new(
            FileStore::open_or_empty(self.preferences),
            handle.clone(),
        );
        let mut app = ViewerApp {
            window: None,
            handle,
            menu,
            options: Some(self.options),
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| BackdropError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    handle: EngineHandle,
    menu: PaletteMenu<FileStore, EngineHandle>,
    /// Taken when the engine is built.
    options: Option<Options>,
    title: String,
}

impl ViewerApp {
    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn on_key(&mut self, key: &str) {
        if key.eq_ignore_ascii_case("p") {
            let open = self.menu.toggle();
            log::info!("palette menu {}", if open { "opened" } else { "closed" });
            if open {
                for swatch in self.menu.swatches() {
                    let marker = if swatch.id == self.menu.active() { '*' } else { ' ' };
                    log::info!(
                        "{marker} {} {} ({})",
                        swatch.id.index() + 1,
                        swatch.title,
                        swatch.id
                    );
                }
            }
            return;
        }

        let digit = key.parse::<usize>().ok();
        if let Some(id) = digit
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| PaletteId::ALL.get(i).copied())
        {
            self.menu.select(id);
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(options) = self.options.take() else {
            return;
        };

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let size = (inner.width.max(1), inner.height.max(1));
        let engine =
            pollster::block_on(Engine::new(window.clone(), size, options));
        if engine.is_degraded() {
            log::warn!("no GPU available, nothing will be drawn");
        }
        self.handle.resolve(engine);

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                let _ = self
                    .handle
                    .with(|engine| engine.resize(size.width, size.height));
                self.request_redraw();
            }

            WindowEvent::Occluded(occluded) => {
                let restart = self
                    .handle
                    .with(|engine| engine.set_visible(!occluded))
                    .unwrap_or(false);
                if restart {
                    self.request_redraw();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    if let Key::Character(text) = &event.logical_key {
                        self.on_key(text.as_str());
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let keep_going = self
                    .handle
                    .with(|engine| engine.tick() && !engine.is_degraded())
                    .unwrap_or(false);
                if keep_going {
                    self.request_redraw();
                }
            }

            _ => {}
        }
    }
}
