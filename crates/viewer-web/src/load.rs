//! Loader overlay wiring around `viewer_core::load_model`.

use crate::dom;
use crate::fetch::BrowserFetcher;
use crate::scroll::{self, ScrollTracker};
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::{load_model, LoadEvent, LoadPlan, Viewer};

pub async fn load_and_install(viewer: Rc<RefCell<Viewer>>, tracker: Rc<RefCell<ScrollTracker>>) {
    let (plan, generation) = {
        let mut v = viewer.borrow_mut();
        (LoadPlan::new(dom::is_file_protocol(), &v.params), v.begin_load())
    };

    let mut observer = |event: LoadEvent| match event {
        LoadEvent::Message(m) => dom::set_loader_message(&m),
        LoadEvent::Progress(p) => {
            dom::set_progress(p.percent);
            dom::set_loader_message(&p.message);
        }
        LoadEvent::Failed { .. } => dom::set_progress(0.0),
    };
    let outcome = load_model(&plan, &BrowserFetcher, &mut observer).await;
    log::info!("[loader] showing {}", outcome.source.name());

    let installed = viewer
        .borrow_mut()
        .install_model(generation, outcome.graph, dom::viewport());
    if !installed {
        return;
    }
    dom::set_progress(100.0);
    dom::hide_loader();
    if let Err(e) = scroll::install(&tracker) {
        log::error!("[scroll] setup failed: {:?}", e);
    }
    if let Some(text) = outcome.notice {
        dom::show_demo_notice(&text);
    }
}
