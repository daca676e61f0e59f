use crate::graph::{Material, Mesh, ModelGraph, Node, Transform};
use crate::primitives::{box_geometry, cylinder_geometry, plane_geometry};
use glam::Vec3;

const BODY_COLOR: u32 = 0x3498db;
const LENS_COLOR: u32 = 0x2c3e50;
const BUTTON_COLOR: u32 = 0x555555;

/// Built-in phone-shaped placeholder shown when no asset could be loaded.
///
/// Fixed geometry and materials, no inputs; always yields a renderable graph.
pub fn placeholder_model() -> ModelGraph {
    let mut group = Node::group("placeholder");

    let body_material = Material {
        metalness: 0.9,
        roughness: 0.1,
        clearcoat: 1.0,
        ..Material::from_hex("body", BODY_COLOR)
    };
    let mut body = Mesh::new(box_geometry(0.8, 1.6, 0.1), body_material);
    body.cast_shadow = true;
    body.receive_shadow = true;
    group.add(Node::with_mesh("body", body, Transform::IDENTITY));

    let screen_material = Material {
        unlit: true,
        ..Material::from_hex("screen", 0x000000)
    };
    group.add(Node::with_mesh(
        "screen",
        Mesh::new(plane_geometry(0.75, 1.5), screen_material),
        Transform::from_position(Vec3::new(0.0, 0.0, 0.06)),
    ));

    let lens_material = Material {
        roughness: 1.0,
        ..Material::from_hex("lens", LENS_COLOR)
    };
    group.add(Node::with_mesh(
        "camera-bump",
        Mesh::new(cylinder_geometry(0.05, 0.05, 0.02, 16), lens_material),
        Transform::from_position(Vec3::new(0.0, 0.75, 0.06)),
    ));

    let button_material = Material::from_hex("button", BUTTON_COLOR);
    for (name, y) in [("button-upper", 0.3), ("button-lower", -0.3)] {
        group.add(Node::with_mesh(
            name,
            Mesh::new(box_geometry(0.04, 0.2, 0.03), button_material.clone()),
            Transform::from_position(Vec3::new(0.42, y, 0.0)),
        ));
    }

    log::info!("[fallback] placeholder model built");
    ModelGraph::new(group)
}
