use viewer_core::constants::{LOADER_FADE_MS, MOBILE_CANVAS_HEIGHT_RATIO, NOTICE_DIM_MS, NOTICE_HIDE_MS};
use viewer_core::progress::clamp_percent;
use viewer_core::Viewport;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Register a page-lifetime listener; the closure is leaked on purpose.
pub fn add_listener(target: &web::EventTarget, event: &str, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Like `add_listener` but hands the event over; registered non-passive so
/// the handler may call `prevent_default`.
pub fn add_event_listener(
    target: &web::EventTarget,
    event: &str,
    mut handler: impl FnMut(web::Event) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| handler(ev)) as Box<dyn FnMut(web::Event)>);
    let options = web::AddEventListenerOptions::new();
    options.set_passive(false);
    let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &options,
    );
    closure.forget();
}

pub fn set_timeout(ms: i32, handler: impl FnOnce() + 'static) {
    if let Some(w) = web::window() {
        let closure = Closure::once_into_js(handler);
        let _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(closure.unchecked_ref(), ms);
    }
}

/// Live `innerWidth` x `innerHeight`, re-read at every call.
pub fn viewport() -> Viewport {
    let (w, h) = web::window()
        .map(|w| {
            (
                w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
                w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
            )
        })
        .unwrap_or((0.0, 0.0));
    Viewport::new(w, h)
}

pub fn is_file_protocol() -> bool {
    web::window()
        .and_then(|w| w.location().protocol().ok())
        .map(|p| p == "file:")
        .unwrap_or(false)
}

pub fn pathname() -> String {
    web::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

fn html_element(el: web::Element) -> Option<web::HtmlElement> {
    el.dyn_into::<web::HtmlElement>().ok()
}

pub fn query_html(document: &web::Document, selector: &str) -> Option<web::HtmlElement> {
    document.query_selector(selector).ok().flatten().and_then(html_element)
}

pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::Element> {
    document
        .query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

pub fn elements(list: web::NodeList) -> Vec<web::Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

pub fn set_style(el: &web::HtmlElement, prop: &str, value: &str) {
    let _ = el.style().set_property(prop, value);
}

pub fn toggle_class(el: &web::Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

// ---- loader overlay ----

pub fn set_loader_message(message: &str) {
    if let Some(h3) = window_document().and_then(|d| query_html(&d, "#loader h3")) {
        h3.set_text_content(Some(message));
    }
}

pub fn set_progress(percent: f32) {
    if let Some(bar) = window_document().and_then(|d| query_html(&d, ".progress-bar")) {
        set_style(&bar, "width", &format!("{}%", clamp_percent(percent)));
    }
}

/// Fade out, then take the loader out of layout.
pub fn hide_loader() {
    let Some(loader) = window_document().and_then(|d| query_html(&d, "#loader")) else {
        return;
    };
    set_style(&loader, "opacity", "0");
    set_timeout(LOADER_FADE_MS, move || set_style(&loader, "display", "none"));
}

/// Show the notice, dim it after a while and then hide it.
pub fn show_demo_notice(text: &str) {
    let Some(notice) = window_document().and_then(|d| query_html(&d, "#demo-notice")) else {
        return;
    };
    if let Some(span) = notice.query_selector("span").ok().flatten() {
        span.set_text_content(Some(text));
    } else {
        notice.set_text_content(Some(text));
    }
    set_style(&notice, "display", "block");
    set_style(&notice, "opacity", "1");
    set_timeout(NOTICE_DIM_MS, move || {
        set_style(&notice, "opacity", "0.5");
        set_timeout(NOTICE_HIDE_MS, move || set_style(&notice, "display", "none"));
    });
}

// ---- canvas ----

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Initial CSS size: full width, shorter on mobile/vertical screens.
pub fn size_canvas_for(canvas: &web::HtmlCanvasElement, viewport: Viewport) {
    let ratio = if viewport.class().is_mobile_or_vertical() {
        MOBILE_CANVAS_HEIGHT_RATIO
    } else {
        1.0
    };
    set_canvas_size(canvas, viewport.width, viewport.height * ratio);
}

/// After a resize the canvas fills the viewport.
pub fn fill_canvas(canvas: &web::HtmlCanvasElement, viewport: Viewport) {
    set_canvas_size(canvas, viewport.width, viewport.height);
}

fn set_canvas_size(canvas: &web::HtmlCanvasElement, width: f64, height: f64) {
    set_style(canvas, "width", &format!("{width}px"));
    set_style(canvas, "height", &format!("{height}px"));
    sync_canvas_backing_size(canvas);
}
