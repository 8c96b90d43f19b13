//! Page plumbing: the background canvas, the menu fragment and the event
//! listeners that feed the engine and the menu.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use super::frame_loop::FrameLoop;
use super::storage::LocalStore;
use crate::engine::EngineHandle;
use crate::menu::PaletteMenu;
use crate::options::RenderOptions;

/// The switcher model as wired on the page.
pub(crate) type WebMenu = PaletteMenu<LocalStore, EngineHandle>;

pub(crate) const CANVAS_ID: &str = "canvas-bg";

/// Fixed full-viewport canvas behind the page content.
pub(crate) fn create_canvas(
    document: &web_sys::Document,
) -> Result<web_sys::HtmlCanvasElement, JsValue> {
    let canvas: web_sys::HtmlCanvasElement =
        document.create_element("canvas")?.dyn_into()?;
    canvas.set_id(CANVAS_ID);
    let style = canvas.style();
    for (property, value) in [
        ("position", "fixed"),
        ("top", "0"),
        ("left", "0"),
        ("width", "100%"),
        ("height", "100%"),
        ("z-index", "-1"),
        ("pointer-events", "none"),
    ] {
        style.set_property(property, value)?;
    }
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    body.prepend_with_node_1(&canvas)?;
    Ok(canvas)
}

/// Drawing-buffer size for the current viewport and device pixel ratio.
pub(crate) fn viewport_size(
    window: &web_sys::Window,
    render: &RenderOptions,
) -> (u32, u32) {
    let css = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(1.0)
    };
    render.drawing_buffer_size(
        css(window.inner_width()),
        css(window.inner_height()),
        window.device_pixel_ratio(),
    )
}

/// Append the switcher markup and route clicks into `menu`.
pub(crate) fn mount_menu(
    document: &web_sys::Document,
    menu: &Rc<RefCell<WebMenu>>,
) -> Result<(), JsValue> {
    let wrapper = document.create_element("div")?;
    wrapper.set_inner_html(&menu.borrow().markup());
    let container = wrapper
        .first_element_child()
        .ok_or_else(|| JsValue::from_str("empty menu markup"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    let _ = body.append_child(&container)?;

    let menu = Rc::clone(menu);
    let root = container.clone();
    let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(
        move |event: web_sys::Event| {
            let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            else {
                return;
            };
            let Ok(mut menu) = menu.try_borrow_mut() else {
                return;
            };
            if target.closest(".palette-toggle").ok().flatten().is_some() {
                let _ = menu.toggle();
            } else if let Some(key) = target
                .closest("[data-palette]")
                .ok()
                .flatten()
                .and_then(|button| button.get_attribute("data-palette"))
            {
                if let Err(e) = menu.select_key(&key) {
                    log::debug!("ignoring swatch click: {e}");
                }
            } else {
                return;
            }
            sync_classes(&root, &menu);
        },
    );
    container
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

/// Mirror the model's open and active state onto the existing elements.
fn sync_classes(root: &web_sys::Element, menu: &WebMenu) {
    let set = |selector: &str, on: bool| {
        if let Ok(Some(element)) = root.query_selector(selector) {
            let _ = element.class_list().toggle_with_force("active", on);
        }
    };
    set(".palette-toggle", menu.is_open());
    set(".palette-menu", menu.is_open());
    for swatch in menu.swatches() {
        let selector = format!("[data-palette=\"{}\"]", swatch.id.key());
        set(&selector, swatch.id == menu.active());
    }
}

/// Resize the canvas and engine with the window, and suspend the loop
/// while the page is hidden.
pub(crate) fn install_listeners(
    window: &web_sys::Window,
    document: &web_sys::Document,
    canvas: &web_sys::HtmlCanvasElement,
    handle: &EngineHandle,
    frame_loop: &FrameLoop,
    render: RenderOptions,
) -> Result<(), JsValue> {
    let on_resize = {
        let canvas = canvas.clone();
        let handle = handle.clone();
        Closure::<dyn FnMut()>::new(move || {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = viewport_size(&window, &render);
            canvas.set_width(width);
            canvas.set_height(height);
            let _ = handle.with(|engine| engine.resize(width, height));
        })
    };
    window.add_event_listener_with_callback(
        "resize",
        on_resize.as_ref().unchecked_ref(),
    )?;
    on_resize.forget();

    let on_visibility = {
        let document = document.clone();
        let handle = handle.clone();
        let frame_loop = frame_loop.clone();
        Closure::<dyn FnMut()>::new(move || {
            let visible = !document.hidden();
            let restart = handle
                .with(|engine| engine.set_visible(visible) && !engine.is_degraded())
                .unwrap_or(false);
            if restart {
                frame_loop.schedule();
            }
        })
    };
    document.add_event_listener_with_callback(
        "visibilitychange",
        on_visibility.as_ref().unchecked_ref(),
    )?;
    on_visibility.forget();
    Ok(())
}
