use crate::constants::*;

/// How the camera is placed after the model is centered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraFraming {
    /// Fixed distance per device class.
    FixedByDevice { mobile: f32, desktop: f32 },
    /// `max(size * factor, floor)` so big models stay in frame.
    Proportional { factor: f32, floor: f32 },
}

/// Whether scroll updates pin the model scale to the value captured when the
/// scroll animation was armed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleLock {
    Baseline,
    Free,
}

/// Camera dolly driven by scroll progress (disabled by default).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomRange {
    pub near: f32,
    pub far: f32,
}

#[derive(Clone, Debug)]
pub struct ViewerParams {
    pub mobile_scale: f32,
    pub desktop_scale: f32,
    pub framing: CameraFraming,
    pub bob_amplitude: f32,
    pub idle_step: f32,
    pub scale_lock: ScaleLock,
    pub zoom: Option<ZoomRange>,
    pub scrub_seconds: f32,
    pub local_model_path: String,
    pub catalog_index: usize,
    pub local_assumed_max_bytes: u64,
    pub remote_assumed_max_bytes: u64,
}

impl Default for ViewerParams {
    fn default() -> Self {
        Self {
            mobile_scale: MOBILE_SCALE,
            desktop_scale: DESKTOP_SCALE,
            framing: CameraFraming::FixedByDevice {
                mobile: MOBILE_CAMERA_DISTANCE,
                desktop: DESKTOP_CAMERA_DISTANCE,
            },
            bob_amplitude: BOB_AMPLITUDE,
            idle_step: IDLE_ROTATION_STEP,
            scale_lock: ScaleLock::Baseline,
            zoom: None,
            scrub_seconds: SCRUB_SECONDS,
            local_model_path: LOCAL_MODEL_PATH.to_string(),
            catalog_index: DEFAULT_CATALOG_INDEX,
            local_assumed_max_bytes: LOCAL_ASSUMED_MAX_BYTES,
            remote_assumed_max_bytes: REMOTE_ASSUMED_MAX_BYTES,
        }
    }
}
