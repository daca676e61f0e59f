//! Page behaviours outside the 3D viewer: nav highlighting, scroll reveal
//! and the hero entrance/button effects.

use crate::dom::{self, add_event_listener, elements, query_all, set_style, toggle_class};
use viewer_core::constants::{HERO_PLAY_DELAY_MS, REVEAL_THRESHOLD};
use viewer_core::page::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub fn init_nav(document: &web::Document) {
    let page = active_page(&dom::pathname());
    let items = query_all(document, NAV_ITEM_SELECTOR);
    for item in &items {
        let active = item.get_attribute("data-page").as_deref() == Some(page.data_page());
        for class in NAV_ACTIVE_CLASSES {
            toggle_class(item, class, active);
        }
        toggle_class(item, NAV_INACTIVE_CLASS, !active);
    }
    log::info!("[page] nav: {:?} ({} items)", page, items.len());
}

/// Reveal `.animate-on-scroll` elements the first time they intersect.
pub fn init_reveal(document: &web::Document) -> anyhow::Result<()> {
    let targets = query_all(document, REVEAL_SELECTOR);
    if targets.is_empty() {
        return Ok(());
    }
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: web::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    toggle_class(&target, REVEAL_VISIBLE_CLASS, true);
                    observer.unobserve(&target);
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let options = web::IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    let observer =
        web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(|e| anyhow::anyhow!("IntersectionObserver: {:?}", e))?;
    callback.forget();
    for t in &targets {
        observer.observe(t);
    }
    log::info!("[page] reveal observing {} elements", targets.len());
    Ok(())
}

pub fn init_hero(document: &web::Document) {
    if let Some(section) = document.query_selector(HERO_SECTION_SELECTOR).ok().flatten() {
        toggle_class(&section, HERO_FADE_IN_CLASS, true);
        dom::set_timeout(HERO_PLAY_DELAY_MS, move || {
            let children = section
                .query_selector_all(HERO_FADE_UP_SELECTOR)
                .map(elements)
                .unwrap_or_default();
            for child in children {
                if let Ok(el) = child.dyn_into::<web::HtmlElement>() {
                    set_style(&el, "animation-play-state", "running");
                }
            }
        });
    }

    let (Some(button), Some(bg)) = (
        document.get_element_by_id(HERO_BUTTON_ID),
        dom::query_html(document, HERO_BG_SELECTOR),
    ) else {
        return;
    };
    for event in HeroEvent::ALL {
        let bg = bg.clone();
        add_event_listener(&button, event.dom_name(), move |ev: web::Event| {
            if event.prevents_default() {
                ev.prevent_default();
            }
            let style = hero_style(event);
            set_style(&bg, "transform", &style.transform());
            set_style(&bg, "filter", &style.filter());
            if let Some(d) = style.transition_duration() {
                set_style(&bg, "transition-duration", &d);
            }
        });
    }
}
