#![cfg(target_arch = "wasm32")]
mod dom;
mod fetch;
mod frame;
mod load;
mod page;
mod render;
mod scroll;

use instant::Instant;
use scroll::ScrollTracker;
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::constants::{DEBUG_REPORT_DELAY_MS, ORIENTATION_SETTLE_MS};
use viewer_core::{Viewer, ViewerParams};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

const CANVAS_ID: &str = "model-canvas";

#[derive(Clone)]
struct Session {
    viewer: Rc<RefCell<Viewer>>,
    tracker: Rc<RefCell<ScrollTracker>>,
}

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

fn session() -> Option<Session> {
    SESSION.with(|s| s.borrow().clone())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("viewer-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    page::init_nav(&document);
    page::init_hero(&document);
    if let Err(e) = page::init_reveal(&document) {
        log::warn!("[page] reveal disabled: {:?}", e);
    }

    // pages without the viewer still get the page behaviours
    let Some(canvas_el) = document.get_element_by_id(CANVAS_ID) else {
        log::info!("[page] no #{CANVAS_ID}, viewer not started");
        return Ok(());
    };
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let viewport = dom::viewport();
    dom::size_canvas_for(&canvas, viewport);
    log::info!(
        "[framing] viewport {}x{} classified as {:?}",
        viewport.width,
        viewport.height,
        viewport.class()
    );

    let viewer = Rc::new(RefCell::new(Viewer::new(ViewerParams::default(), viewport)));
    let tracker = Rc::new(RefCell::new(ScrollTracker::default()));
    SESSION.with(|s| {
        *s.borrow_mut() = Some(Session {
            viewer: viewer.clone(),
            tracker: tracker.clone(),
        })
    });
    register_page_globals(&window);

    {
        let on_resize = {
            let canvas = canvas.clone();
            let viewer = viewer.clone();
            let tracker = tracker.clone();
            move || {
                let viewport = dom::viewport();
                dom::fill_canvas(&canvas, viewport);
                viewer.borrow_mut().on_resize(viewport);
                if tracker.borrow().is_armed() {
                    tracker.borrow_mut().refresh();
                }
            }
        };
        let resize = on_resize.clone();
        dom::add_listener(&window, "resize", resize);
        dom::add_listener(&window, "orientationchange", move || {
            dom::set_timeout(ORIENTATION_SETTLE_MS, on_resize.clone());
        });
    }

    {
        let viewer = viewer.clone();
        dom::set_timeout(DEBUG_REPORT_DELAY_MS, move || {
            if let Some(report) = viewer.borrow().debug_report() {
                log::info!("[framing] model debug: {report}");
            }
        });
    }

    spawn_local(load::load_and_install(viewer.clone(), tracker.clone()));

    let gpu = frame::init_gpu(&canvas).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        viewer,
        tracker,
        canvas,
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}

/// Multiply the model scale, e.g. `scaleModel(1.2)`.
#[wasm_bindgen(js_name = scaleModel)]
pub fn scale_model(factor: f32) {
    if let Some(s) = session() {
        s.viewer.borrow_mut().scale_by(factor, dom::viewport());
    }
}

/// Restore the scale picked for the current device.
#[wasm_bindgen(js_name = resetModelScale)]
pub fn reset_model_scale() {
    if let Some(s) = session() {
        s.viewer.borrow_mut().reset_scale(dom::viewport());
    }
}

#[wasm_bindgen(js_name = scrollToSection)]
pub fn scroll_to_section(index: usize) {
    if let Some(s) = session() {
        s.tracker.borrow().scroll_to_section(index);
    }
}

/// Log and return the model/camera measurements.
#[wasm_bindgen(js_name = debugModelSize)]
pub fn debug_model_size() -> Option<String> {
    let report = session()?.viewer.borrow().debug_report()?;
    log::info!("[framing] model debug: {report}");
    Some(report.to_string())
}

/// Mirror the exports on `window` for inline page scripts.
fn register_page_globals(window: &web::Window) {
    let globals: [(&str, JsValue); 4] = [
        (
            "scaleModel",
            Closure::wrap(Box::new(scale_model) as Box<dyn FnMut(f32)>).into_js_value(),
        ),
        (
            "resetModelScale",
            Closure::wrap(Box::new(reset_model_scale) as Box<dyn FnMut()>).into_js_value(),
        ),
        (
            "scrollToSection",
            Closure::wrap(Box::new(scroll_to_section) as Box<dyn FnMut(usize)>).into_js_value(),
        ),
        (
            "debugModelSize",
            Closure::wrap(Box::new(debug_model_size) as Box<dyn FnMut() -> Option<String>>)
                .into_js_value(),
        ),
    ];
    for (name, f) in globals {
        if js_sys::Reflect::set(window, &JsValue::from_str(name), &f).is_err() {
            log::warn!("[page] could not expose {name}");
        }
    }
}
