//! Window scroll tracking for the sticky-section animation.

use crate::dom::{query_all, toggle_class, window_document};
use instant::{Duration, Instant};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use viewer_core::constants::SCROLL_IDLE_MS;
use viewer_core::scroll::{progress_from_offset, scroll_range, section_scroll_target, ScrollFrame, Section};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const ACTIVE_CLASS: &str = "active";
const INDICATOR_SELECTOR: &str = ".indicator-dot";

/// Live scroll listener; removed from the window when dropped.
pub struct ScrollTrigger {
    target: web::Window,
    closure: Closure<dyn FnMut()>,
}

impl Drop for ScrollTrigger {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback("scroll", self.closure.as_ref().unchecked_ref());
    }
}

#[derive(Default)]
pub struct ScrollTracker {
    progress: f32,
    range: f64,
    last_scroll: Option<Instant>,
    trigger: Option<ScrollTrigger>,
    indicator_count: usize,
    shown_section: Option<Section>,
    shown_indicator: Option<usize>,
}

impl ScrollTracker {
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_armed(&self) -> bool {
        self.trigger.is_some()
    }

    pub fn indicator_count(&self) -> usize {
        self.indicator_count
    }

    /// A scroll event fired within the last `SCROLL_IDLE_MS`.
    pub fn is_scrolling(&self, now: Instant) -> bool {
        self.last_scroll
            .map(|t| now.duration_since(t) < Duration::from_millis(SCROLL_IDLE_MS))
            .unwrap_or(false)
    }

    fn on_scroll(&mut self) {
        self.last_scroll = Some(Instant::now());
        self.progress = read_progress(self.range);
    }

    /// Re-measure after layout changes.
    pub fn refresh(&mut self) {
        self.range = measure_range();
        self.progress = read_progress(self.range);
    }

    /// Mark the active section and indicator dot, touching the DOM only on change.
    pub fn show(&mut self, frame: ScrollFrame) {
        let Some(document) = window_document() else {
            return;
        };
        if self.shown_section != Some(frame.section) {
            for s in Section::ALL {
                if let Some(el) = document.get_element_by_id(s.element_id()) {
                    toggle_class(&el, ACTIVE_CLASS, s == frame.section);
                }
            }
            self.shown_section = Some(frame.section);
        }
        if self.shown_indicator != Some(frame.indicator) {
            for (i, dot) in query_all(&document, INDICATOR_SELECTOR).iter().enumerate() {
                toggle_class(dot, ACTIVE_CLASS, i == frame.indicator);
            }
            self.shown_indicator = Some(frame.indicator);
        }
    }

    /// Smooth-scroll to the start of section `index`. Does nothing before the
    /// first trigger is installed.
    pub fn scroll_to_section(&self, index: usize) {
        if self.trigger.is_none() {
            log::warn!("[scroll] scrollToSection({index}) before scroll setup");
            return;
        }
        let Some(window) = web::window() else {
            return;
        };
        let top = section_scroll_target(index, measure_range());
        let opts = web::ScrollToOptions::new();
        opts.set_top(top);
        opts.set_behavior(web::ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&opts);
    }
}

/// Replace any existing trigger with a fresh one bound to `tracker`.
pub fn install(tracker: &Rc<RefCell<ScrollTracker>>) -> anyhow::Result<()> {
    // the old listener goes away before the new one is added
    tracker.borrow_mut().trigger = None;

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let weak: Weak<RefCell<ScrollTracker>> = Rc::downgrade(tracker);
    let closure = Closure::wrap(Box::new(move || {
        if let Some(t) = weak.upgrade() {
            if let Ok(mut t) = t.try_borrow_mut() {
                t.on_scroll();
            }
        }
    }) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("scroll listener: {:?}", e))?;

    let indicator_count = window_document()
        .map(|d| query_all(&d, INDICATOR_SELECTOR).len())
        .unwrap_or(0);
    let mut t = tracker.borrow_mut();
    t.refresh();
    t.indicator_count = indicator_count;
    t.shown_section = None;
    t.shown_indicator = None;
    t.trigger = Some(ScrollTrigger {
        target: window,
        closure,
    });
    log::info!(
        "[scroll] trigger installed: range={:.0}px, {} indicators",
        t.range,
        indicator_count
    );
    Ok(())
}

/// `main.scrollHeight - innerHeight`.
fn measure_range() -> f64 {
    let Some(window) = web::window() else {
        return 0.0;
    };
    let viewport_h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let scroll_h = window
        .document()
        .and_then(|d| d.query_selector("main").ok().flatten())
        .map(|m| m.scroll_height() as f64)
        .unwrap_or(0.0);
    scroll_range(scroll_h, viewport_h)
}

fn read_progress(range: f64) -> f32 {
    let offset = web::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0);
    progress_from_offset(offset, range)
}
