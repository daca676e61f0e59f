use crate::render;
use crate::scroll::ScrollTracker;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::Viewer;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub viewer: Rc<RefCell<Viewer>>,
    pub tracker: Rc<RefCell<ScrollTracker>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let (progress, indicators, scrolling, armed) = {
            let t = self.tracker.borrow();
            (t.progress(), t.indicator_count(), t.is_scrolling(now), t.is_armed())
        };

        let w = self.canvas.width();
        let h = self.canvas.height();
        let mut viewer = self.viewer.borrow_mut();
        if h > 0 {
            viewer.camera.aspect = w as f32 / h as f32;
        }
        if armed {
            if let Some(frame) = viewer.apply_scroll(progress, dt_sec, indicators) {
                self.tracker.borrow_mut().show(frame);
            }
        }
        viewer.idle_tick(scrolling);

        let Some(g) = &mut self.gpu else {
            return;
        };
        g.resize_if_needed(w, h);
        if viewer.take_model_dirty() {
            if let Some(graph) = viewer.graph_mut() {
                g.upload_model(graph);
            }
        }
        match g.render(&viewer.camera, viewer.graph()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
            Err(e) => log::error!("[render] frame error: {:?}", e),
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // the surface borrows the canvas for the page lifetime
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("[render] GPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
