//! Device-adaptive scaling and centering of the model, plus camera placement.

use crate::camera::Camera;
use crate::constants::{CAMERA_ELEVATION_FACTOR, MOBILE_CAMERA_SIDE_FACTOR, RESCALE_EPSILON};
use crate::device::DeviceClass;
use crate::graph::ModelGraph;
use crate::params::{CameraFraming, ViewerParams};
use glam::Vec3;

/// Baseline scale chosen for the device and the scale currently applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleState {
    pub original: f32,
    pub current: f32,
}

impl Default for ScaleState {
    fn default() -> Self {
        Self {
            original: 1.0,
            current: 1.0,
        }
    }
}

impl ScaleState {
    #[inline]
    pub fn set_baseline(&mut self, s: f32) {
        self.original = s;
        self.current = s;
    }
}

#[inline]
pub fn scale_for(class: DeviceClass, params: &ViewerParams) -> f32 {
    match class {
        DeviceClass::MobileOrVertical => params.mobile_scale,
        DeviceClass::Desktop => params.desktop_scale,
    }
}

/// Apply the device scale factor uniformly to the model root and return it.
pub fn auto_scale(graph: &mut ModelGraph, class: DeviceClass, params: &ViewerParams) -> f32 {
    let before = graph.world_bounds().size();
    log::info!(
        "[framing] original dimensions w={:.2} h={:.2} d={:.2} max={:.2}",
        before.x,
        before.y,
        before.z,
        before.max_element()
    );

    let factor = scale_for(class, params);
    graph.transform_mut().set_uniform_scale(factor);

    let after = graph.world_bounds().size();
    log::info!(
        "[framing] {:?}: scale {} -> w={:.2} h={:.2} d={:.2} max={:.2}",
        class,
        factor,
        after.x,
        after.y,
        after.z,
        after.max_element()
    );
    factor
}

/// Outcome of a centering pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Framing {
    /// Root position that puts the bounding-box center on the origin.
    pub rest_position: Vec3,
    pub max_size: f32,
    pub camera_eye: Vec3,
}

pub fn camera_distance(framing: CameraFraming, class: DeviceClass, max_size: f32) -> f32 {
    match framing {
        CameraFraming::FixedByDevice { mobile, desktop } => match class {
            DeviceClass::MobileOrVertical => mobile,
            DeviceClass::Desktop => desktop,
        },
        CameraFraming::Proportional { factor, floor } => (max_size * factor).max(floor),
    }
}

/// Move the model so its bounding-box center sits on the world origin and
/// place the camera for the device class.
///
/// The current root translation is factored out first, so running this twice
/// yields the same placement.
pub fn center(
    graph: &mut ModelGraph,
    camera: &mut Camera,
    class: DeviceClass,
    params: &ViewerParams,
) -> Framing {
    let bounds = graph.world_bounds();
    let untranslated_center = bounds.center() - graph.transform().position;
    let rest_position = -untranslated_center;
    graph.transform_mut().position = rest_position;

    let max_size = bounds.max_dimension();
    let distance = camera_distance(params.framing, class, max_size);
    let side = if class.is_mobile_or_vertical() {
        max_size * MOBILE_CAMERA_SIDE_FACTOR
    } else {
        0.0
    };
    camera.eye = Vec3::new(side, max_size * CAMERA_ELEVATION_FACTOR, distance);
    camera.look_at(Vec3::ZERO);

    log::info!(
        "[framing] centered size={:.2} camera=({:.2},{:.2},{:.2})",
        max_size,
        camera.eye.x,
        camera.eye.y,
        camera.eye.z
    );
    Framing {
        rest_position,
        max_size,
        camera_eye: camera.eye,
    }
}

/// Target scale for a new device class, or `None` when the current scale
/// already matches within `RESCALE_EPSILON`.
pub fn rescale_target(current: f32, class: DeviceClass, params: &ViewerParams) -> Option<f32> {
    let target = scale_for(class, params);
    ((current - target).abs() > RESCALE_EPSILON).then_some(target)
}

/// Snapshot for troubleshooting: model and camera placement.
#[derive(Clone, Debug)]
pub struct DebugReport {
    pub position: Vec3,
    pub scale: Vec3,
    pub dimensions: Vec3,
    pub center: Vec3,
    pub camera_eye: Vec3,
    pub camera_distance: f32,
}

pub fn debug_report(graph: &ModelGraph, camera: &Camera) -> DebugReport {
    let b = graph.world_bounds();
    DebugReport {
        position: graph.transform().position,
        scale: graph.transform().scale,
        dimensions: b.size(),
        center: b.center(),
        camera_eye: camera.eye,
        camera_distance: camera.distance_to_target(),
    }
}

impl std::fmt::Display for DebugReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "position=({:.3},{:.3},{:.3}) scale=({:.3},{:.3},{:.3}) dims=({:.3},{:.3},{:.3}) center=({:.3},{:.3},{:.3}) camera=({:.3},{:.3},{:.3}) distance={:.3}",
            self.position.x, self.position.y, self.position.z,
            self.scale.x, self.scale.y, self.scale.z,
            self.dimensions.x, self.dimensions.y, self.dimensions.z,
            self.center.x, self.center.y, self.center.z,
            self.camera_eye.x, self.camera_eye.y, self.camera_eye.z,
            self.camera_distance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::placeholder_model;

    #[test]
    fn proportional_distance_respects_floor() {
        let f = CameraFraming::Proportional {
            factor: 1.8,
            floor: 3.0,
        };
        assert_eq!(camera_distance(f, DeviceClass::Desktop, 1.0), 3.0);
        assert!((camera_distance(f, DeviceClass::Desktop, 10.0) - 18.0).abs() < 1e-5);
    }

    #[test]
    fn rescale_target_ignores_tiny_changes() {
        let p = ViewerParams::default();
        assert_eq!(rescale_target(0.0505, DeviceClass::Desktop, &p), None);
        assert_eq!(
            rescale_target(0.05, DeviceClass::MobileOrVertical, &p),
            Some(p.mobile_scale)
        );
    }

    #[test]
    fn mobile_camera_is_offset_sideways() {
        let p = ViewerParams::default();
        let mut g = placeholder_model();
        let mut cam = Camera::new(1.0);
        let fr = center(&mut g, &mut cam, DeviceClass::MobileOrVertical, &p);
        assert!(cam.eye.x > 0.0);
        assert_eq!(cam.eye.z, 4.0);
        assert!((cam.eye.y - fr.max_size * 0.2).abs() < 1e-6);
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn debug_report_measures_distance_to_target() {
        let p = ViewerParams::default();
        let mut g = placeholder_model();
        let mut cam = Camera::new(1.0);
        center(&mut g, &mut cam, DeviceClass::Desktop, &p);
        cam.look_at(Vec3::new(0.0, cam.eye.y, 0.0));
        let report = debug_report(&g, &cam);
        assert!((report.camera_distance - cam.eye.z).abs() < 1e-6);
    }
}
