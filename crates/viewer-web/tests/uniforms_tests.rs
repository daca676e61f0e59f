// Host-side tests for the GPU uniform layouts.
// The crate is wasm-only, so the pure module is included directly.

#![allow(dead_code)]
mod uniforms {
    include!("../src/render/uniforms.rs");
}

use glam::{Mat4, Vec3};
use uniforms::*;
use viewer_core::camera::Camera;
use viewer_core::constants::{FOG_FAR, FOG_NEAR, NOISE_TEXTURE_SIZE};
use viewer_core::graph::Material;

#[test]
fn layouts_match_wgsl_sizes() {
    assert_eq!(std::mem::size_of::<Globals>(), 128);
    assert_eq!(std::mem::size_of::<DrawUniforms>(), 192);
    assert_eq!(std::mem::size_of::<Globals>() % 16, 0);
    assert_eq!(std::mem::size_of::<DrawUniforms>() % 16, 0);
}

#[test]
fn globals_carry_fog_gamma_and_noise() {
    let cam = Camera::new(16.0 / 9.0);
    let srgb = Globals::new(&cam, false);
    assert_eq!(srgb.params[1], FOG_NEAR);
    assert_eq!(srgb.params[2], FOG_FAR);
    assert_eq!(srgb.params[3], 0.0);
    assert_eq!(srgb.fog_color[3], NOISE_TEXTURE_SIZE as f32);
    assert_eq!(srgb.view_proj, cam.view_proj().to_cols_array_2d());

    let linear = Globals::new(&cam, true);
    assert_eq!(linear.params[3], 1.0);

    let l = linear.light_dir;
    let len = (l[0] * l[0] + l[1] * l[1] + l[2] * l[2]).sqrt();
    assert!((len - 1.0).abs() < 1e-5);
}

#[test]
fn draw_flags_follow_material() {
    let mut m = Material::from_hex("screen", 0x000000);
    m.unlit = true;
    m.dithering = true;
    m.emissive_intensity = 0.01;
    let u = DrawUniforms::new(Mat4::IDENTITY, &m);
    assert_eq!(u.material[3], 1.0);
    assert_eq!(u.flags[0], 1.0);
    assert_eq!(u.emissive[3], 0.01);

    m.unlit = false;
    m.dithering = false;
    let u = DrawUniforms::new(Mat4::IDENTITY, &m);
    assert_eq!(u.material[3], 0.0);
    assert_eq!(u.flags[0], 0.0);
}

#[test]
fn normal_matrix_undoes_non_uniform_scale() {
    let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
    let u = DrawUniforms::new(model, &Material::from_hex("body", 0x3366ff));
    assert!((u.normal_mat[0][0] - 0.5).abs() < 1e-6);
    assert!((u.normal_mat[1][1] - 1.0).abs() < 1e-6);
}
