use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::engine::{Engine, EngineHandle};

/// `requestAnimationFrame` driver for the engine.
///
/// The callback owns a clone of the loop, so the closure keeps itself
/// alive for the lifetime of the page. At most one frame is pending at a
/// time; the loop stops when [`Engine::tick`] reports it is suspended and
/// is restarted with [`schedule`](Self::schedule).
#[derive(Clone)]
pub(crate) struct FrameLoop {
    handle: EngineHandle,
    scheduled: Rc<Cell<bool>>,
    callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameLoop {
    pub(crate) fn new(handle: EngineHandle) -> Self {
        let frame_loop = Self {
            handle,
            scheduled: Rc::new(Cell::new(false)),
            callback: Rc::new(RefCell::new(None)),
        };
        let this = frame_loop.clone();
        *frame_loop.callback.borrow_mut() =
            Some(Closure::new(move || this.on_frame()));
        frame_loop
    }

    /// Request the next frame unless one is already pending.
    pub(crate) fn schedule(&self) {
        if self.scheduled.get() {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(_) => self.scheduled.set(true),
            Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
        }
    }

    fn on_frame(&self) {
        self.scheduled.set(false);
        if self.handle.with(Engine::tick).unwrap_or(false) {
            self.schedule();
        }
    }
}
