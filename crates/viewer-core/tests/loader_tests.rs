// Fallback chain driven end to end with an in-memory fetcher.

use std::cell::RefCell;
use std::collections::HashMap;
use viewer_core::loader::{REMOTE_CATALOG, resolve_uri};
use viewer_core::{load_model, AssetFetcher, LoadError, LoadEvent, LoadPlan, ModelSource, ViewerParams};

#[derive(Default)]
struct ScriptedFetcher {
    responses: HashMap<String, Result<Vec<u8>, LoadError>>,
    requested: RefCell<Vec<String>>,
    /// Leave out the total to exercise the size estimate.
    hide_length: bool,
}

impl ScriptedFetcher {
    fn serve(mut self, url: &str, body: Vec<u8>) -> Self {
        self.responses.insert(url.to_string(), Ok(body));
        self
    }

    fn fail(mut self, url: &str, err: LoadError) -> Self {
        self.responses.insert(url.to_string(), Err(err));
        self
    }
}

impl AssetFetcher for ScriptedFetcher {
    async fn fetch(
        &self,
        url: &str,
        on_progress: &mut dyn FnMut(u64, Option<u64>),
    ) -> Result<Vec<u8>, LoadError> {
        self.requested.borrow_mut().push(url.to_string());
        let body = match self.responses.get(url) {
            Some(r) => r.clone()?,
            None => {
                return Err(LoadError::Http {
                    url: url.to_string(),
                    status: 404,
                })
            }
        };
        let total = (!self.hide_length).then_some(body.len() as u64);
        on_progress(body.len() as u64 / 2, total);
        on_progress(body.len() as u64, total);
        Ok(body)
    }
}

// Single triangle; `uri` names an external buffer or, when None, embeds it.
fn triangle(uri: Option<&str>) -> (Vec<u8>, Vec<u8>) {
    let mut bin = Vec::new();
    for v in [0.0f32, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 3.0, 1.0] {
        bin.extend_from_slice(&v.to_le_bytes());
    }
    let uri = match uri {
        Some(u) => u.to_string(),
        None => {
            use base64::Engine as _;
            format!(
                "data:application/octet-stream;base64,{}",
                base64::engine::general_purpose::STANDARD.encode(&bin)
            )
        }
    };
    let json = format!(
        r#"{{"asset":{{"version":"2.0"}},"scenes":[{{"nodes":[0]}}],
"nodes":[{{"mesh":0}}],
"meshes":[{{"primitives":[{{"attributes":{{"POSITION":0}}}}]}}],
"buffers":[{{"byteLength":36,"uri":"{uri}"}}],
"bufferViews":[{{"buffer":0,"byteLength":36}}],
"accessors":[{{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","min":[0,0,0],"max":[4,3,1]}}]}}"#
    );
    (json.into_bytes(), bin)
}

fn run(plan: &LoadPlan, fetcher: &ScriptedFetcher) -> (viewer_core::LoadOutcome, Vec<LoadEvent>) {
    let mut events = Vec::new();
    let outcome = pollster::block_on(load_model(plan, fetcher, &mut |e| events.push(e)));
    (outcome, events)
}

fn messages(events: &[LoadEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            LoadEvent::Message(m) => Some(m.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn local_model_wins_when_served() {
    let params = ViewerParams::default();
    let (gltf, _) = triangle(None);
    let fetcher = ScriptedFetcher::default().serve(&params.local_model_path, gltf);
    let (outcome, events) = run(&LoadPlan::new(false, &params), &fetcher);

    assert!(matches!(outcome.source, ModelSource::Local { .. }));
    assert_eq!(outcome.notice, None);
    assert_eq!(outcome.graph.mesh_count(), 1);
    assert_eq!(fetcher.requested.borrow().len(), 1);
    assert_eq!(messages(&events), vec!["Loading 3D model...".to_string()]);
    let last_progress = events.iter().rev().find_map(|e| match e {
        LoadEvent::Progress(p) => Some(p.clone()),
        _ => None,
    });
    let p = last_progress.expect("progress reported");
    assert_eq!(p.percent, 100.0);
    assert_eq!(p.message, "Loading model: 100%");
}

#[test]
fn missing_local_model_falls_back_to_demo() {
    let params = ViewerParams::default();
    let entry = REMOTE_CATALOG[params.catalog_index];
    let bin_url = resolve_uri(entry.url, "triangle.bin");
    let (gltf, bin) = triangle(Some("triangle.bin"));
    let fetcher = ScriptedFetcher::default()
        .serve(entry.url, gltf)
        .serve(&bin_url, bin);
    let (outcome, events) = run(&LoadPlan::new(false, &params), &fetcher);

    assert!(matches!(outcome.source, ModelSource::Remote { .. }));
    assert_eq!(
        outcome.notice.as_deref(),
        Some("Using demonstration model: Flight Helmet")
    );
    assert_eq!(outcome.graph.transform().scale.x, entry.manual_scale);
    assert_eq!(
        messages(&events),
        vec![
            "Loading 3D model...".to_string(),
            "Local model not found. Loading demonstration...".to_string(),
            "Loading: Flight Helmet...".to_string(),
        ]
    );
    assert_eq!(
        *fetcher.requested.borrow(),
        vec![params.local_model_path.clone(), entry.url.to_string(), bin_url]
    );
}

#[test]
fn decoder_failure_changes_message_only() {
    let params = ViewerParams::default();
    let fetcher = ScriptedFetcher::default().serve(
        &params.local_model_path,
        br#"{"asset":{"version":"2.0"},"extensionsRequired":["KHR_draco_mesh_compression"]}"#
            .to_vec(),
    );
    let (outcome, events) = run(&LoadPlan::new(false, &params), &fetcher);

    assert_eq!(outcome.source, ModelSource::Placeholder);
    let msgs = messages(&events);
    assert_eq!(msgs[1], "Model requires special decoder. Loading demonstration...");
    assert_eq!(msgs.last().map(String::as_str), Some("Demo model failed. Using built-in model."));
}

#[test]
fn every_failure_ends_with_placeholder() {
    let params = ViewerParams::default();
    let entry = REMOTE_CATALOG[params.catalog_index];
    let fetcher = ScriptedFetcher::default().fail(
        entry.url,
        LoadError::Fetch {
            url: entry.url.to_string(),
            reason: "offline".to_string(),
        },
    );
    let (outcome, events) = run(&LoadPlan::new(false, &params), &fetcher);

    assert_eq!(outcome.source, ModelSource::Placeholder);
    assert_eq!(outcome.notice.as_deref(), Some("Using built-in 3D model"));
    assert_eq!(outcome.graph.mesh_count(), 5);
    let failures = events
        .iter()
        .filter(|e| matches!(e, LoadEvent::Failed { .. }))
        .count();
    assert_eq!(failures, 2);
    // each strategy tried exactly once
    assert_eq!(fetcher.requested.borrow().len(), 2);
}

#[test]
fn file_origin_goes_straight_to_demo() {
    let params = ViewerParams::default();
    let fetcher = ScriptedFetcher::default();
    let (outcome, _) = run(&LoadPlan::new(true, &params), &fetcher);
    assert_eq!(outcome.source, ModelSource::Placeholder);
    assert_eq!(
        *fetcher.requested.borrow(),
        vec![REMOTE_CATALOG[params.catalog_index].url.to_string()]
    );
}

#[test]
fn unknown_length_reports_megabytes() {
    let params = ViewerParams::default();
    let (gltf, _) = triangle(None);
    let fetcher = ScriptedFetcher {
        hide_length: true,
        ..Default::default()
    }
    .serve(&params.local_model_path, gltf);
    let (_, events) = run(&LoadPlan::new(false, &params), &fetcher);
    let progress: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            LoadEvent::Progress(p) => Some(p.clone()),
            _ => None,
        })
        .collect();
    assert!(!progress.is_empty());
    for p in &progress {
        assert!(p.message.starts_with("Loading model: ") && p.message.ends_with(" MB"));
        assert!(p.percent >= 0.0 && p.percent < 1.0);
    }
}
