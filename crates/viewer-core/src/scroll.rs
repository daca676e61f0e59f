//! Scroll-progress driven animation: active section, indicator dots, model
//! rotation/bob and optional camera dolly.

use crate::camera::Camera;
use crate::constants::{SECTION_COUNT, SECTION_SPAN};
use crate::graph::ModelGraph;
use crate::params::{ScaleLock, ViewerParams, ZoomRange};
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Hero,
    Feature1,
    Feature2,
    Feature3,
    Feature4,
}

impl Section {
    pub const ALL: [Section; SECTION_COUNT] = [
        Section::Hero,
        Section::Feature1,
        Section::Feature2,
        Section::Feature3,
        Section::Feature4,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn element_id(self) -> &'static str {
        match self {
            Section::Hero => "hero-sticky-content",
            Section::Feature1 => "feature1-sticky-content",
            Section::Feature2 => "feature2-sticky-content",
            Section::Feature3 => "feature3-sticky-content",
            Section::Feature4 => "feature4-sticky-content",
        }
    }

    /// `[start, end)` in progress units; the last section also owns 1.0.
    pub fn range(self) -> (f32, f32) {
        let i = self.index() as f32;
        (i * SECTION_SPAN, (i + 1.0) * SECTION_SPAN)
    }

    pub fn contains(self, progress: f32) -> bool {
        let (start, end) = self.range();
        let last = self.index() == SECTION_COUNT - 1;
        progress >= start && (progress < end || (last && progress <= 1.0))
    }
}

/// The single section whose range holds `progress` (clamped into `[0, 1]`).
pub fn active_section(progress: f32) -> Section {
    let p = clamp_progress(progress);
    Section::ALL
        .into_iter()
        .find(|s| s.contains(p))
        .unwrap_or(Section::Feature4)
}

/// `floor(progress * count)`, pinned to the last dot at the very end.
#[inline]
pub fn indicator_index(progress: f32, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let i = (clamp_progress(progress) * SECTION_COUNT as f32).floor() as usize;
    i.min(count - 1)
}

#[inline]
pub fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// Scrollable distance of the animated region in pixels.
#[inline]
pub fn scroll_range(scroll_height: f64, viewport_height: f64) -> f64 {
    (scroll_height - viewport_height).max(0.0)
}

#[inline]
pub fn progress_from_offset(offset: f64, range: f64) -> f32 {
    if range <= 0.0 {
        return 0.0;
    }
    clamp_progress((offset / range) as f32)
}

/// Pixel offset that lands at the start of section `index`.
#[inline]
pub fn section_scroll_target(index: usize, range: f64) -> f64 {
    let i = index.min(SECTION_COUNT - 1);
    i as f64 * SECTION_SPAN as f64 * range
}

/// Optional lagging follower for the raw scroll progress. With a zero lag it
/// passes the tracker value through and only reports changes.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scrub {
    value: f32,
    initialized: bool,
}

impl Scrub {
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Nothing left to animate towards `target`.
    pub fn is_settled(&self, target: f32) -> bool {
        self.initialized && self.value == clamp_progress(target)
    }

    /// Advance toward `target`; returns the new value.
    pub fn step(&mut self, target: f32, dt_sec: f32, lag_sec: f32) -> f32 {
        let target = clamp_progress(target);
        if !self.initialized || lag_sec <= 0.0 {
            self.value = target;
            self.initialized = true;
            return self.value;
        }
        let alpha = 1.0 - (-dt_sec.max(0.0) / lag_sec).exp();
        self.value += (target - self.value) * alpha;
        if (target - self.value).abs() < 1e-4 {
            self.value = target;
        }
        self.value
    }
}

/// What a scroll update decided, for the page indicators.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollFrame {
    pub progress: f32,
    pub section: Section,
    pub indicator: usize,
}

/// Maps progress onto the model transform. Armed once a model is shown.
#[derive(Clone, Debug)]
pub struct ScrollAnimator {
    baseline_scale: f32,
    bob_amplitude: f32,
    scale_lock: ScaleLock,
    zoom: Option<ZoomRange>,
}

impl ScrollAnimator {
    pub fn new(baseline_scale: f32, params: &ViewerParams) -> Self {
        Self {
            baseline_scale,
            bob_amplitude: params.bob_amplitude,
            scale_lock: params.scale_lock,
            zoom: params.zoom,
        }
    }

    pub fn baseline_scale(&self) -> f32 {
        self.baseline_scale
    }

    /// Absolute assignment: rotation and bob do not accumulate across calls.
    pub fn apply(
        &self,
        progress: f32,
        indicator_count: usize,
        graph: &mut ModelGraph,
        camera: &mut Camera,
    ) -> ScrollFrame {
        let p = clamp_progress(progress);
        let phase = p * TAU;
        let t = graph.transform_mut();
        t.rotation.y = phase;
        t.position.y = phase.sin() * self.bob_amplitude;
        if self.scale_lock == ScaleLock::Baseline {
            t.set_uniform_scale(self.baseline_scale);
        }
        if let Some(z) = self.zoom {
            camera.eye.z = z.far + (z.near - z.far) * p;
        }
        ScrollFrame {
            progress: p,
            section: active_section(p),
            indicator: indicator_index(p, indicator_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_boundaries_are_half_open() {
        assert_eq!(active_section(0.2), Section::Feature1);
        assert_eq!(active_section(0.1999), Section::Hero);
        assert_eq!(active_section(1.0), Section::Feature4);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(active_section(-0.5), Section::Hero);
        assert_eq!(active_section(3.0), Section::Feature4);
        assert_eq!(active_section(f32::NAN), Section::Hero);
    }

    #[test]
    fn indicator_pins_to_last_dot() {
        assert_eq!(indicator_index(0.0, 5), 0);
        assert_eq!(indicator_index(0.45, 5), 2);
        assert_eq!(indicator_index(1.0, 5), 4);
        assert_eq!(indicator_index(0.9, 3), 2);
        assert_eq!(indicator_index(0.5, 0), 0);
    }

    #[test]
    fn scroll_targets_follow_sections() {
        assert_eq!(section_scroll_target(0, 1000.0), 0.0);
        assert!((section_scroll_target(3, 1000.0) - 600.0).abs() < 1e-3);
        assert!((section_scroll_target(99, 1000.0) - 800.0).abs() < 1e-3);
    }

    #[test]
    fn zero_range_reports_start() {
        assert_eq!(progress_from_offset(120.0, 0.0), 0.0);
        assert_eq!(scroll_range(500.0, 800.0), 0.0);
        assert!((progress_from_offset(250.0, 500.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn zero_lag_passes_progress_through() {
        let mut s = Scrub::default();
        assert!(!s.is_settled(0.3));
        assert_eq!(s.step(0.3, 0.016, 0.0), 0.3);
        assert!(s.is_settled(0.3));
        assert_eq!(s.step(0.99, 0.016, 0.0), 0.99);
    }

    #[test]
    fn scrub_converges_to_target() {
        let mut s = Scrub::default();
        assert_eq!(s.step(0.0, 0.016, 0.5), 0.0);
        let first = s.step(1.0, 0.016, 0.5);
        assert!(first > 0.0 && first < 0.1);
        for _ in 0..600 {
            s.step(1.0, 0.016, 0.5);
        }
        assert_eq!(s.value(), 1.0);
        assert!(s.is_settled(1.0));
        assert!(s.is_settled(7.0));
        assert!(!s.is_settled(0.5));
    }
}
