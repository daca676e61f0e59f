//! The viewer context: everything the page mutates between frames, owned in
//! one place and handed to the controllers by reference.

use crate::camera::Camera;
use crate::constants::NOISE_EMISSIVE_INTENSITY;
use crate::device::Viewport;
use crate::framing::{self, DebugReport, ScaleState};
use crate::graph::ModelGraph;
use crate::idle::IdleAnimator;
use crate::params::ViewerParams;
use crate::scroll::{Scrub, ScrollAnimator, ScrollFrame};
use glam::Vec3;

pub struct Viewer {
    pub params: ViewerParams,
    pub camera: Camera,
    graph: Option<ModelGraph>,
    scale: ScaleState,
    rest_position: Vec3,
    animator: Option<ScrollAnimator>,
    idle: IdleAnimator,
    scrub: Scrub,
    generation: u64,
    model_dirty: bool,
}

impl Viewer {
    pub fn new(params: ViewerParams, viewport: Viewport) -> Self {
        let idle = IdleAnimator::new(params.idle_step);
        Self {
            camera: Camera::new(viewport.aspect()),
            params,
            graph: None,
            scale: ScaleState::default(),
            rest_position: Vec3::ZERO,
            animator: None,
            idle,
            scrub: Scrub::default(),
            generation: 0,
            model_dirty: false,
        }
    }

    /// Start a new load. Models finishing for an older generation are dropped.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_loaded(&self) -> bool {
        self.graph.is_some()
    }

    pub fn graph(&self) -> Option<&ModelGraph> {
        self.graph.as_ref()
    }

    pub fn graph_mut(&mut self) -> Option<&mut ModelGraph> {
        self.graph.as_mut()
    }

    /// True once per installed model, for GPU upload.
    pub fn take_model_dirty(&mut self) -> bool {
        std::mem::take(&mut self.model_dirty)
    }

    pub fn scale(&self) -> ScaleState {
        self.scale
    }

    pub fn rest_position(&self) -> Vec3 {
        self.rest_position
    }

    /// Prepare, scale and center a freshly loaded model, then arm the scroll
    /// animation. Returns false when `generation` is stale.
    pub fn install_model(&mut self, generation: u64, mut graph: ModelGraph, viewport: Viewport) -> bool {
        if generation != self.generation {
            log::warn!("[viewer] dropping model from stale load {generation}");
            return false;
        }
        graph.prepare_for_display();
        graph.apply_banding_fix(NOISE_EMISSIVE_INTENSITY);

        let class = viewport.class();
        self.camera.aspect = viewport.aspect();
        let factor = framing::auto_scale(&mut graph, class, &self.params);
        self.scale.set_baseline(factor);
        let fr = framing::center(&mut graph, &mut self.camera, class, &self.params);
        self.rest_position = fr.rest_position;
        self.graph = Some(graph);
        self.model_dirty = true;
        self.arm_scroll();
        true
    }

    /// (Re)create the scroll animator with the current scale as baseline.
    pub fn arm_scroll(&mut self) {
        if self.graph.is_none() {
            return;
        }
        self.animator = Some(ScrollAnimator::new(self.scale.current, &self.params));
        self.scrub = Scrub::default();
        log::info!("[scroll] animation armed at scale {}", self.scale.current);
    }

    pub fn scroll_armed(&self) -> bool {
        self.animator.is_some()
    }

    /// Aspect update plus device rescale. Returns true when the model scale
    /// changed.
    pub fn on_resize(&mut self, viewport: Viewport) -> bool {
        self.camera.aspect = viewport.aspect();
        let class = viewport.class();
        let Some(target) = framing::rescale_target(self.scale.current, class, &self.params) else {
            return false;
        };
        let Some(graph) = self.graph.as_mut() else {
            return false;
        };
        log::info!("[framing] device class changed to {class:?}, rescaling to {target}");
        self.scale.set_baseline(target);
        graph.transform_mut().set_uniform_scale(target);
        self.recenter(viewport);
        self.arm_scroll();
        true
    }

    /// Multiply the current scale by `factor`.
    pub fn scale_by(&mut self, factor: f32, viewport: Viewport) {
        if !factor.is_finite() || factor <= 0.0 {
            log::warn!("[framing] ignoring scale factor {factor}");
            return;
        }
        self.apply_scale(self.scale.current * factor, viewport);
    }

    /// Back to the scale chosen for the device.
    pub fn reset_scale(&mut self, viewport: Viewport) {
        self.apply_scale(self.scale.original, viewport);
    }

    fn apply_scale(&mut self, s: f32, viewport: Viewport) {
        let Some(graph) = self.graph.as_mut() else {
            return;
        };
        self.scale.current = s;
        graph.transform_mut().set_uniform_scale(s);
        log::info!("[framing] model scale set to {s}");
        // the armed animator keeps its baseline; under `ScaleLock::Baseline`
        // the next scroll update restores it
        self.recenter(viewport);
    }

    fn recenter(&mut self, viewport: Viewport) {
        if let Some(graph) = self.graph.as_mut() {
            let fr = framing::center(graph, &mut self.camera, viewport.class(), &self.params);
            self.rest_position = fr.rest_position;
        }
    }

    /// Feed the tracker's scroll progress. Returns `None` while it is
    /// unchanged (or, with a scrub lag, once the follower has caught up), so
    /// the idle spin is not overwritten between scroll gestures.
    pub fn apply_scroll(
        &mut self,
        raw_progress: f32,
        dt_sec: f32,
        indicator_count: usize,
    ) -> Option<ScrollFrame> {
        let animator = self.animator.as_ref()?;
        let graph = self.graph.as_mut()?;
        if self.scrub.is_settled(raw_progress) {
            return None;
        }
        let p = self.scrub.step(raw_progress, dt_sec, self.params.scrub_seconds);
        Some(animator.apply(p, indicator_count, graph, &mut self.camera))
    }

    /// Idle spin for one frame.
    pub fn idle_tick(&mut self, scrolling: bool) -> bool {
        match self.graph.as_mut() {
            Some(graph) => self.idle.tick(graph, scrolling),
            None => false,
        }
    }

    pub fn debug_report(&self) -> Option<DebugReport> {
        self.graph
            .as_ref()
            .map(|g| framing::debug_report(g, &self.camera))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::placeholder_model;

    fn desktop() -> Viewport {
        Viewport::new(1280.0, 800.0)
    }

    fn loaded() -> Viewer {
        let mut v = Viewer::new(ViewerParams::default(), desktop());
        let g = v.begin_load();
        assert!(v.install_model(g, placeholder_model(), desktop()));
        v
    }

    #[test]
    fn stale_loads_are_ignored() {
        let mut v = Viewer::new(ViewerParams::default(), desktop());
        let old = v.begin_load();
        let _new = v.begin_load();
        assert!(!v.install_model(old, placeholder_model(), desktop()));
        assert!(!v.is_loaded());
    }

    #[test]
    fn install_prepares_materials() {
        let v = loaded();
        let mut all = true;
        v.graph().unwrap().for_each_mesh(|_, m| {
            all &= m.cast_shadow && m.receive_shadow && m.material.dithering;
        });
        assert!(all);
        assert!(v.scroll_armed());
        assert_eq!(v.scale().original, v.params.desktop_scale);
    }

    #[test]
    fn model_upload_flag_is_taken_once() {
        let mut v = loaded();
        assert!(v.take_model_dirty());
        assert!(!v.take_model_dirty());
    }

    #[test]
    fn settled_scroll_leaves_idle_spin_alone() {
        let mut v = loaded();
        assert!(v.apply_scroll(0.0, 0.016, 5).is_some());
        v.idle_tick(false);
        let spun = v.graph().unwrap().transform().rotation.y;
        assert!(v.apply_scroll(0.0, 0.016, 5).is_none());
        assert_eq!(v.graph().unwrap().transform().rotation.y, spun);
    }

    #[test]
    fn rotating_to_portrait_rescales_once() {
        let mut v = loaded();
        let portrait = Viewport::new(1000.0, 1400.0);
        assert!(v.on_resize(portrait));
        assert_eq!(v.scale().current, v.params.mobile_scale);
        assert_eq!(v.scale().original, v.params.mobile_scale);
        assert!(!v.on_resize(portrait));
    }

    #[test]
    fn idle_does_nothing_without_model() {
        let mut v = Viewer::new(ViewerParams::default(), desktop());
        assert!(!v.idle_tick(false));
        assert!(v.apply_scroll(0.5, 0.016, 5).is_none());
        assert!(v.debug_report().is_none());
    }
}
