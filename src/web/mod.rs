//! Browser entry point.
//!
//! [`start`] creates the background canvas, injects the palette switcher
//! and returns a [`Backdrop`] handle immediately; GPU initialization runs
//! in the background and resolves the engine handle when done. A stored
//! palette preference is applied at that moment rather than after a fixed
//! delay.

mod dom;
mod frame_loop;
mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsValue;

pub use storage::LocalStore;

use crate::engine::{Engine, EngineHandle, Ready};
use crate::menu::PaletteMenu;
use crate::options::Options;
use dom::WebMenu;
use frame_loop::FrameLoop;

/// Set up the animated background and palette menu on the current page.
///
/// # Errors
///
/// Fails only when the page has no window, document or body.
#[wasm_bindgen]
pub fn start() -> Result<Backdrop, JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let window =
        web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let options = Options::default();

    let canvas = dom::create_canvas(&document)?;
    let size = dom::viewport_size(&window, &options.render);
    canvas.set_width(size.0);
    canvas.set_height(size.1);

    let handle: EngineHandle = Ready::pending();
    let menu = Rc::new(RefCell::new(PaletteMenu::new(
        LocalStore::from_window(&window),
        handle.clone(),
    )));
    dom::mount_menu(&document, &menu)?;

    let frame_loop = FrameLoop::new(handle.clone());
    dom::install_listeners(
        &window,
        &document,
        &canvas,
        &handle,
        &frame_loop,
        options.render.clone(),
    )?;

    let pending = handle.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let target = wgpu::SurfaceTarget::Canvas(canvas.clone());
        let mut engine = Engine::new(target, size, options).await;
        // The window may have been resized while the GPU was initializing.
        engine.resize(canvas.width(), canvas.height());

        let degraded = engine.is_degraded();
        if degraded {
            let _ = canvas
                .style()
                .set_property("background", &engine.background_css());
        }
        if document.hidden() {
            engine.suspend();
        }
        pending.resolve(engine);
        if !degraded {
            frame_loop.schedule();
        }
    });

    Ok(Backdrop { handle, menu })
}

/// JavaScript-facing handle to the running background.
#[wasm_bindgen]
pub struct Backdrop {
    handle: EngineHandle,
    menu: Rc<RefCell<WebMenu>>,
}

#[wasm_bindgen]
impl Backdrop {
    /// Recolor the scene to the palette named `key` ("palette1".."palette5").
    ///
    /// Returns `false` for an unknown key or while the renderer is still
    /// starting; neither is an error.
    #[wasm_bindgen(js_name = changePalette)]
    pub fn change_palette(&self, key: &str) -> bool {
        match self.handle.with(|engine| engine.change_palette_key(key)) {
            Some(Ok(_)) => true,
            Some(Err(e)) => {
                log::debug!("changePalette: {e}");
                false
            }
            None => false,
        }
    }

    /// Key of the palette active in the menu.
    #[wasm_bindgen(getter, js_name = activePalette)]
    pub fn active_palette(&self) -> String {
        self.menu
            .try_borrow()
            .map(|menu| menu.active().key().to_owned())
            .unwrap_or_default()
    }

    /// Whether the renderer has finished initializing.
    #[wasm_bindgen(getter, js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.handle.is_ready()
    }

    /// Whether the page fell back to a static background.
    #[wasm_bindgen(getter, js_name = isDegraded)]
    pub fn is_degraded(&self) -> bool {
        self.handle.with(|engine| engine.is_degraded()).unwrap_or(false)
    }
}
