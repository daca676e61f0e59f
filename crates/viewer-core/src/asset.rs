//! glTF / GLB decoding into a `ModelGraph`.
//!
//! Decoding happens in two steps so the caller can fetch external buffers
//! asynchronously in between:
//! 1. `parse` the document and list its `buffer_sources`,
//! 2. `build_graph` once every buffer is resident.
//!
//! Only triangle primitives are kept. Textures are ignored; materials carry
//! their PBR factors only. Assets that require Draco compression are rejected
//! since no decoder is bundled.

use crate::graph::{Geometry, Material, Mesh, ModelGraph, Node, Transform};
use crate::loader::LoadError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use gltf::buffer::Source;
use gltf::mesh::Mode;

pub const DRACO_EXTENSION: &str = "KHR_draco_mesh_compression";

/// Where the bytes of one glTF buffer come from.
#[derive(Clone, Debug, PartialEq)]
pub enum BufferSource {
    Resident(Vec<u8>),
    External(String),
}

pub fn requires_draco(document: &gltf::Document) -> bool {
    document.extensions_required().any(|e| e == DRACO_EXTENSION)
}

/// Parse glTF JSON or GLB. Validation rejects unsupported required
/// extensions, so a failure is re-read unvalidated to name the Draco case.
pub fn parse(bytes: &[u8]) -> Result<gltf::Gltf, LoadError> {
    let draco_error = || LoadError::DecoderMissing(format!("asset requires {DRACO_EXTENSION}"));
    match gltf::Gltf::from_slice(bytes) {
        Ok(gltf) if requires_draco(&gltf.document) => Err(draco_error()),
        Ok(gltf) => Ok(gltf),
        Err(e) => match gltf::Gltf::from_slice_without_validation(bytes) {
            Ok(raw) if requires_draco(&raw.document) => Err(draco_error()),
            _ => Err(LoadError::Decode(e.to_string())),
        },
    }
}

pub fn buffer_sources(gltf: &gltf::Gltf) -> Result<Vec<BufferSource>, LoadError> {
    gltf.document
        .buffers()
        .map(|buffer| match buffer.source() {
            Source::Bin => gltf
                .blob
                .clone()
                .map(BufferSource::Resident)
                .ok_or_else(|| LoadError::Decode("GLB binary chunk missing".to_string())),
            Source::Uri(uri) if uri.starts_with("data:") => {
                decode_data_uri(uri).map(BufferSource::Resident)
            }
            Source::Uri(uri) => Ok(BufferSource::External(uri.to_string())),
        })
        .collect()
}

/// Decode a base64 `data:` URI.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, LoadError> {
    let (header, payload) = uri
        .split_once(',')
        .ok_or_else(|| LoadError::Decode("malformed data URI".to_string()))?;
    if !header.ends_with(";base64") {
        return Err(LoadError::Decode(format!(
            "unsupported data URI encoding: {header}"
        )));
    }
    BASE64
        .decode(payload)
        .map_err(|e| LoadError::Decode(format!("data URI: {e}")))
}

/// Assemble the graph of the default scene (or the first one).
pub fn build_graph(
    document: &gltf::Document,
    buffers: &[Vec<u8>],
    name: &str,
) -> Result<ModelGraph, LoadError> {
    for buffer in document.buffers() {
        let have = buffers.get(buffer.index()).map(|b| b.len()).unwrap_or(0);
        if have < buffer.length() {
            return Err(LoadError::Decode(format!(
                "buffer {} holds {} of {} bytes",
                buffer.index(),
                have,
                buffer.length()
            )));
        }
    }

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| LoadError::Decode("document has no scene".to_string()))?;

    let mut root = Node::group(name);
    for node in scene.nodes() {
        root.add(convert_node(&node, buffers));
    }
    let graph = ModelGraph::new(root);
    if graph.mesh_count() == 0 {
        return Err(LoadError::Empty(name.to_string()));
    }
    Ok(graph)
}

fn convert_node(node: &gltf::scene::Node, buffers: &[Vec<u8>]) -> Node {
    let (t, r, s) = node.transform().decomposed();
    let mut out = Node {
        name: node.name().unwrap_or("node").to_string(),
        transform: Transform::from_trs(t, r, s),
        mesh: None,
        children: Vec::new(),
    };

    if let Some(mesh) = node.mesh() {
        let mut parts: Vec<Mesh> = mesh
            .primitives()
            .filter_map(|prim| convert_primitive(&prim, buffers))
            .collect();
        if parts.len() == 1 {
            out.mesh = parts.pop();
        } else {
            for (i, part) in parts.into_iter().enumerate() {
                out.add(Node::with_mesh(
                    &format!("{}#{}", mesh.name().unwrap_or("mesh"), i),
                    part,
                    Transform::IDENTITY,
                ));
            }
        }
    }

    for child in node.children() {
        out.add(convert_node(&child, buffers));
    }
    out
}

fn convert_primitive(prim: &gltf::mesh::Primitive, buffers: &[Vec<u8>]) -> Option<Mesh> {
    if prim.mode() != Mode::Triangles {
        return None;
    }
    let reader = prim.reader(|b| buffers.get(b.index()).map(|v| v.as_slice()));
    let positions: Vec<[f32; 3]> = reader.read_positions()?.collect();
    if positions.is_empty() {
        return None;
    }
    let normals: Vec<[f32; 3]> = match reader.read_normals() {
        Some(it) => it.collect(),
        None => vec![[0.0, 1.0, 0.0]; positions.len()],
    };
    let indices: Vec<u32> = match reader.read_indices() {
        Some(it) => it.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };
    let n = positions.len() as u32;
    if indices.iter().any(|&i| i >= n) {
        log::warn!("[asset] primitive with out-of-range index skipped");
        return None;
    }

    let m = prim.material();
    let pbr = m.pbr_metallic_roughness();
    let e = m.emissive_factor();
    let material = Material {
        name: m.name().unwrap_or("material").to_string(),
        base_color: pbr.base_color_factor(),
        metalness: pbr.metallic_factor(),
        roughness: pbr.roughness_factor(),
        emissive: e,
        emissive_intensity: if e.iter().any(|c| *c > 0.0) { 1.0 } else { 0.0 },
        ..Default::default()
    };

    Some(Mesh::new(
        Geometry {
            positions,
            normals,
            indices,
        },
        material,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    // One triangle, positions only. `uri` of None embeds the buffer.
    fn triangle_gltf(uri: Option<&str>) -> String {
        let mut bytes = Vec::new();
        for v in [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 2.0, 0.0] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        let uri = match uri {
            Some(u) => u.to_string(),
            None => format!("data:application/octet-stream;base64,{}", BASE64.encode(&bytes)),
        };
        format!(
            r#"{{
  "asset": {{ "version": "2.0" }},
  "scene": 0,
  "scenes": [{{ "nodes": [0] }}],
  "nodes": [{{ "mesh": 0, "translation": [0.0, 0.0, 5.0] }}],
  "meshes": [{{ "primitives": [{{ "attributes": {{ "POSITION": 0 }} }}] }}],
  "buffers": [{{ "byteLength": 36, "uri": "{uri}" }}],
  "bufferViews": [{{ "buffer": 0, "byteLength": 36 }}],
  "accessors": [{{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
                   "min": [0.0, 0.0, 0.0], "max": [1.0, 2.0, 0.0] }}]
}}"#
        )
    }

    #[test]
    fn embedded_triangle_decodes() {
        let json = triangle_gltf(None);
        let gltf = parse(json.as_bytes()).expect("parse");
        let buffers: Vec<Vec<u8>> = buffer_sources(&gltf)
            .expect("sources")
            .into_iter()
            .map(|s| match s {
                BufferSource::Resident(b) => b,
                BufferSource::External(u) => panic!("unexpected external buffer {u}"),
            })
            .collect();
        let graph = build_graph(&gltf.document, &buffers, "triangle").expect("graph");
        assert_eq!(graph.mesh_count(), 1);
        let b = graph.world_bounds();
        assert!((b.max.y - 2.0).abs() < 1e-6);
        assert!((b.center().z - 5.0).abs() < 1e-6);
    }

    #[test]
    fn external_buffer_is_reported() {
        let json = triangle_gltf(Some("triangle.bin"));
        let gltf = parse(json.as_bytes()).expect("parse");
        assert_eq!(
            buffer_sources(&gltf).expect("sources"),
            vec![BufferSource::External("triangle.bin".to_string())]
        );
    }

    #[test]
    fn short_buffer_is_rejected() {
        let json = triangle_gltf(None);
        let gltf = parse(json.as_bytes()).expect("parse");
        let err = build_graph(&gltf.document, &[vec![0u8; 4]], "x").unwrap_err();
        assert!(matches!(err, LoadError::Decode(_)));
    }

    #[test]
    fn draco_assets_need_a_decoder() {
        let json = r#"{"asset":{"version":"2.0"},"extensionsRequired":["KHR_draco_mesh_compression"]}"#;
        let err = parse(json.as_bytes()).unwrap_err();
        assert!(err.is_decoder_missing());
    }

    #[test]
    fn draco_listed_as_used_only_still_decodes() {
        let json = triangle_gltf(None).replacen(
            "{\n",
            "{\n  \"extensionsUsed\": [\"KHR_draco_mesh_compression\"],\n",
            1,
        );
        assert!(json.contains("extensionsUsed"));
        let gltf = parse(json.as_bytes()).expect("parse");
        assert!(!requires_draco(&gltf.document));
        assert_eq!(gltf.document.meshes().count(), 1);
    }

    #[test]
    fn data_uri_requires_base64() {
        assert!(decode_data_uri("data:text/plain,hello").is_err());
        assert_eq!(
            decode_data_uri("data:application/octet-stream;base64,AQID").expect("decode"),
            vec![1, 2, 3]
        );
    }
}
