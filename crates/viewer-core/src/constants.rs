// Shared tuning constants for the viewer logic and the web frontend.

// Device classification
pub const MOBILE_MAX_WIDTH: f64 = 768.0; // inclusive

// Auto-scale factors applied to the model root
pub const MOBILE_SCALE: f32 = 0.02;
pub const DESKTOP_SCALE: f32 = 0.05;
pub const RESCALE_EPSILON: f32 = 0.001; // ignore rescale requests closer than this

// Camera framing
pub const CAMERA_FOV_DEG: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const INITIAL_CAMERA_Z: f32 = 5.0;
pub const MOBILE_CAMERA_DISTANCE: f32 = 4.0;
pub const DESKTOP_CAMERA_DISTANCE: f32 = 5.0;
pub const PROPORTIONAL_DISTANCE_FACTOR: f32 = 1.8;
pub const PROPORTIONAL_DISTANCE_FLOOR: f32 = 3.0;
pub const CAMERA_ELEVATION_FACTOR: f32 = 0.2; // of max model size
pub const MOBILE_CAMERA_SIDE_FACTOR: f32 = 0.3; // 3/4 view on mobile
pub const MOBILE_CANVAS_HEIGHT_RATIO: f64 = 0.9;

// Scroll animation
pub const SECTION_COUNT: usize = 5;
pub const SECTION_SPAN: f32 = 1.0 / SECTION_COUNT as f32;
pub const BOB_AMPLITUDE: f32 = 0.1;
pub const SCRUB_SECONDS: f32 = 0.0; // 0 drives the model with the raw tracker progress
pub const SCROLL_IDLE_MS: u64 = 150; // quiet time before scrolling counts as stopped

// Idle rotation (radians per frame)
pub const IDLE_ROTATION_STEP: f32 = 0.001;

// Loading
pub const LOCAL_MODEL_PATH: &str = "models/product/product.glb";
pub const DEFAULT_CATALOG_INDEX: usize = 1; // Flight Helmet
pub const BYTES_PER_MB: u64 = 1024 * 1024;
pub const LOCAL_ASSUMED_MAX_BYTES: u64 = 5 * BYTES_PER_MB;
pub const REMOTE_ASSUMED_MAX_BYTES: u64 = 10 * BYTES_PER_MB;
pub const MAX_PREALLOC_BYTES: u64 = 64 * BYTES_PER_MB; // Content-Length is not trusted beyond this

// Lighting and look
pub const BACKGROUND_COLOR: [f32; 3] = [0.0, 0.0, 0.0];
pub const AMBIENT_INTENSITY: f32 = 0.6;
pub const DIRECTIONAL_INTENSITY: f32 = 0.8;
pub const DIRECTIONAL_POSITION: [f32; 3] = [5.0, 10.0, 7.0];
pub const FOG_NEAR: f32 = 15.0;
pub const FOG_FAR: f32 = 30.0;
pub const TONE_MAPPING_EXPOSURE: f32 = 1.0;
pub const NOISE_TEXTURE_SIZE: u32 = 256;
pub const NOISE_EMISSIVE_INTENSITY: f32 = 0.01;

// Page timings (milliseconds)
pub const LOADER_FADE_MS: i32 = 500;
pub const NOTICE_DIM_MS: i32 = 5000;
pub const NOTICE_HIDE_MS: i32 = 3000;
pub const ORIENTATION_SETTLE_MS: i32 = 100;
pub const HERO_PLAY_DELAY_MS: i32 = 100;
pub const DEBUG_REPORT_DELAY_MS: i32 = 2000;
pub const REVEAL_THRESHOLD: f64 = 0.1;
