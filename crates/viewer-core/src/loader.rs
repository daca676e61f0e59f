//! Ordered model-loading strategies: local asset, one remote demo asset, and
//! the built-in placeholder. Each failure falls through to the next strategy
//! exactly once; the placeholder cannot fail.

use crate::asset::{self, BufferSource};
use crate::fallback::placeholder_model;
use crate::graph::ModelGraph;
use crate::params::ViewerParams;
use crate::progress::{progress_report, ProgressReport};
use crate::constants::DEFAULT_CATALOG_INDEX;

/// One entry of the public demo-asset list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CatalogEntry {
    pub url: &'static str,
    pub name: &'static str,
    /// Pre-scale applied before device auto-scaling.
    pub manual_scale: f32,
    /// Needs Draco decompression, which is not bundled.
    pub requires_decoder: bool,
}

pub const REMOTE_CATALOG: [CatalogEntry; 4] = [
    CatalogEntry {
        url: "https://raw.githubusercontent.com/mrdoob/three.js/dev/examples/models/gltf/Duck/glTF/Duck.gltf",
        name: "Duck",
        manual_scale: 0.8,
        requires_decoder: false,
    },
    CatalogEntry {
        url: "https://raw.githubusercontent.com/mrdoob/three.js/dev/examples/models/gltf/FlightHelmet/glTF/FlightHelmet.gltf",
        name: "Flight Helmet",
        manual_scale: 0.7,
        requires_decoder: false,
    },
    CatalogEntry {
        url: "https://raw.githubusercontent.com/mrdoob/three.js/dev/examples/models/gltf/Suzanne/glTF/Suzanne.gltf",
        name: "Suzanne",
        manual_scale: 1.0,
        requires_decoder: false,
    },
    CatalogEntry {
        url: "https://raw.githubusercontent.com/mrdoob/three.js/dev/examples/models/gltf/LittlestTokyo/glTF/LittlestTokyo.gltf",
        name: "Tokyo Scene",
        manual_scale: 0.01,
        requires_decoder: false,
    },
];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("request for {url} failed: {reason}")]
    Fetch { url: String, reason: String },
    #[error("{url} answered HTTP {status}")]
    Http { url: String, status: u16 },
    #[error("could not decode asset: {0}")]
    Decode(String),
    #[error("Draco-compressed asset needs a DRACOLoader: {0}")]
    DecoderMissing(String),
    #[error("asset contains no renderable geometry: {0}")]
    Empty(String),
}

impl LoadError {
    /// Message-based check, so decoder failures reported by any layer (for
    /// instance as a plain fetch or decode error) are recognised too.
    pub fn is_decoder_missing(&self) -> bool {
        let msg = self.to_string();
        msg.contains("DRACOLoader") || msg.contains("Draco")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ModelSource {
    Local { path: String, assumed_max_bytes: u64 },
    Remote { entry: CatalogEntry, assumed_max_bytes: u64 },
    Placeholder,
}

impl ModelSource {
    pub fn name(&self) -> &str {
        match self {
            ModelSource::Local { path, .. } => path,
            ModelSource::Remote { entry, .. } => entry.name,
            ModelSource::Placeholder => "built-in model",
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ModelSource::Local { path, .. } => Some(path),
            ModelSource::Remote { entry, .. } => Some(entry.url),
            ModelSource::Placeholder => None,
        }
    }

    fn assumed_max_bytes(&self) -> u64 {
        match self {
            ModelSource::Local {
                assumed_max_bytes, ..
            }
            | ModelSource::Remote {
                assumed_max_bytes, ..
            } => *assumed_max_bytes,
            ModelSource::Placeholder => 0,
        }
    }

    pub fn start_message(&self) -> String {
        match self {
            ModelSource::Local { .. } => "Loading 3D model...".to_string(),
            ModelSource::Remote { entry, .. } => format!("Loading: {}...", entry.name),
            ModelSource::Placeholder => "Using built-in model...".to_string(),
        }
    }

    pub fn progress_label(&self) -> &'static str {
        match self {
            ModelSource::Remote { .. } => "Loading demo",
            _ => "Loading model",
        }
    }

    pub fn failure_message(&self, err: &LoadError) -> &'static str {
        match self {
            ModelSource::Local { .. } if err.is_decoder_missing() => {
                "Model requires special decoder. Loading demonstration..."
            }
            ModelSource::Local { .. } => "Local model not found. Loading demonstration...",
            _ => "Demo model failed. Using built-in model.",
        }
    }

    /// Banner text once this source is on screen.
    pub fn notice(&self) -> Option<String> {
        match self {
            ModelSource::Local { .. } => None,
            ModelSource::Remote { entry, .. } => {
                Some(format!("Using demonstration model: {}", entry.name))
            }
            ModelSource::Placeholder => Some("Using built-in 3D model".to_string()),
        }
    }
}

/// Strategies in the order they are tried; always ends with the placeholder.
#[derive(Clone, Debug)]
pub struct LoadPlan {
    sources: Vec<ModelSource>,
}

impl LoadPlan {
    /// Pages opened from `file:` cannot fetch relative paths, so they start
    /// with the remote demo asset.
    pub fn new(origin_is_file: bool, params: &ViewerParams) -> Self {
        let entry = REMOTE_CATALOG
            .get(params.catalog_index)
            .copied()
            .unwrap_or_else(|| {
                log::warn!(
                    "[loader] catalog index {} out of range, using {}",
                    params.catalog_index,
                    DEFAULT_CATALOG_INDEX
                );
                REMOTE_CATALOG[DEFAULT_CATALOG_INDEX]
            });
        let mut sources = Vec::with_capacity(3);
        if !origin_is_file {
            sources.push(ModelSource::Local {
                path: params.local_model_path.clone(),
                assumed_max_bytes: params.local_assumed_max_bytes,
            });
        }
        sources.push(ModelSource::Remote {
            entry,
            assumed_max_bytes: params.remote_assumed_max_bytes,
        });
        sources.push(ModelSource::Placeholder);
        Self { sources }
    }

    pub fn sources(&self) -> &[ModelSource] {
        &self.sources
    }
}

/// Streaming byte source. `on_progress(loaded, total)` is called per chunk;
/// `total` is `None` when the server did not announce a length.
#[allow(async_fn_in_trait)]
pub trait AssetFetcher {
    async fn fetch(
        &self,
        url: &str,
        on_progress: &mut dyn FnMut(u64, Option<u64>),
    ) -> Result<Vec<u8>, LoadError>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum LoadEvent {
    Message(String),
    Progress(ProgressReport),
    Failed { source: String, reason: String },
}

/// Receives every `LoadEvent` in order.
pub type LoadObserver<'a> = dyn FnMut(LoadEvent) + 'a;

pub struct LoadOutcome {
    pub graph: ModelGraph,
    pub source: ModelSource,
    pub notice: Option<String>,
}

/// Resolve `uri` against the directory of `base`.
pub fn resolve_uri(base: &str, uri: &str) -> String {
    if uri.contains("://") || uri.starts_with('/') {
        return uri.to_string();
    }
    match base.rfind('/') {
        Some(i) => format!("{}{}", &base[..=i], uri),
        None => uri.to_string(),
    }
}

/// Walk the plan until one strategy yields a graph.
pub async fn load_model<F: AssetFetcher>(
    plan: &LoadPlan,
    fetcher: &F,
    observer: &mut LoadObserver<'_>,
) -> LoadOutcome {
    for source in plan.sources() {
        if *source == ModelSource::Placeholder {
            break;
        }
        observer(LoadEvent::Message(source.start_message()));
        match load_source(source, fetcher, observer).await {
            Ok(graph) => {
                log::info!("[loader] {} loaded ({} meshes)", source.name(), graph.mesh_count());
                return LoadOutcome {
                    graph,
                    notice: source.notice(),
                    source: source.clone(),
                };
            }
            Err(e) => {
                log::error!("[loader] failed to load {}: {}", source.name(), e);
                observer(LoadEvent::Failed {
                    source: source.name().to_string(),
                    reason: e.to_string(),
                });
                observer(LoadEvent::Message(source.failure_message(&e).to_string()));
            }
        }
    }
    let source = ModelSource::Placeholder;
    LoadOutcome {
        graph: placeholder_model(),
        notice: source.notice(),
        source,
    }
}

async fn load_source<F: AssetFetcher>(
    source: &ModelSource,
    fetcher: &F,
    observer: &mut LoadObserver<'_>,
) -> Result<ModelGraph, LoadError> {
    if let ModelSource::Remote { entry, .. } = source {
        if entry.requires_decoder {
            return Err(LoadError::DecoderMissing(entry.name.to_string()));
        }
    }
    let Some(url) = source.url() else {
        return Ok(placeholder_model());
    };
    let label = source.progress_label();
    let assumed = source.assumed_max_bytes();
    let mut report = |loaded: u64, total: Option<u64>| {
        observer(LoadEvent::Progress(progress_report(label, loaded, total, assumed)));
    };

    let bytes = fetcher.fetch(url, &mut report).await?;
    let gltf = asset::parse(&bytes)?;
    let mut buffers = Vec::new();
    for src in asset::buffer_sources(&gltf)? {
        match src {
            BufferSource::Resident(b) => buffers.push(b),
            BufferSource::External(uri) => {
                let buffer_url = resolve_uri(url, &uri);
                buffers.push(fetcher.fetch(&buffer_url, &mut report).await?);
            }
        }
    }
    let mut graph = asset::build_graph(&gltf.document, &buffers, source.name())?;
    if let ModelSource::Remote { entry, .. } = source {
        graph.transform_mut().set_uniform_scale(entry.manual_scale);
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn served_pages_try_local_first() {
        let plan = LoadPlan::new(false, &ViewerParams::default());
        let kinds: Vec<&str> = plan.sources().iter().map(|s| s.progress_label()).collect();
        assert_eq!(kinds, vec!["Loading model", "Loading demo", "Loading model"]);
        assert!(matches!(plan.sources()[0], ModelSource::Local { .. }));
        assert_eq!(plan.sources().last(), Some(&ModelSource::Placeholder));
    }

    #[test]
    fn file_pages_skip_local() {
        let plan = LoadPlan::new(true, &ViewerParams::default());
        assert_eq!(plan.sources().len(), 2);
        match &plan.sources()[0] {
            ModelSource::Remote { entry, .. } => assert_eq!(entry.name, "Flight Helmet"),
            other => panic!("expected remote source, got {other:?}"),
        }
    }

    #[test]
    fn bad_catalog_index_uses_default_entry() {
        let params = ViewerParams {
            catalog_index: 42,
            ..Default::default()
        };
        let plan = LoadPlan::new(true, &params);
        assert_eq!(plan.sources()[0].name(), "Flight Helmet");
    }

    #[test]
    fn decoder_heuristic_matches_messages() {
        assert!(LoadError::DecoderMissing("x".into()).is_decoder_missing());
        assert!(LoadError::Decode("THREE.GLTFLoader: No DRACOLoader instance".into())
            .is_decoder_missing());
        assert!(!LoadError::Http {
            url: "models/product/product.glb".into(),
            status: 404
        }
        .is_decoder_missing());
    }

    #[test]
    fn uri_resolution_is_relative_to_asset_directory() {
        assert_eq!(
            resolve_uri("https://cdn.example/models/helmet/Helmet.gltf", "Helmet.bin"),
            "https://cdn.example/models/helmet/Helmet.bin"
        );
        assert_eq!(resolve_uri("product.gltf", "product.bin"), "product.bin");
        assert_eq!(
            resolve_uri("models/a.gltf", "https://other/b.bin"),
            "https://other/b.bin"
        );
    }
}
