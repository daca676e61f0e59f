pub mod asset;
pub mod bounds;
pub mod camera;
pub mod constants;
pub mod device;
pub mod fallback;
pub mod framing;
pub mod graph;
pub mod idle;
pub mod loader;
pub mod noise;
pub mod page;
pub mod params;
pub mod primitives;
pub mod progress;
pub mod scroll;
pub mod viewer;
pub static MODEL_WGSL: &str = include_str!("../shaders/model.wgsl");

pub use bounds::Aabb;
pub use camera::Camera;
pub use device::{classify, DeviceClass, Viewport};
pub use graph::*;
pub use loader::{load_model, AssetFetcher, LoadError, LoadEvent, LoadOutcome, LoadPlan, ModelSource};
pub use params::*;
pub use viewer::Viewer;
