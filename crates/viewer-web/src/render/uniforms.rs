// GPU-side layouts for model.wgsl. Field order and padding must match the
// WGSL structs exactly (every member is 16-byte aligned).

use glam::{Mat4, Vec3};
use viewer_core::camera::Camera;
use viewer_core::constants::{
    AMBIENT_INTENSITY, BACKGROUND_COLOR, DIRECTIONAL_INTENSITY, DIRECTIONAL_POSITION, FOG_FAR,
    FOG_NEAR, NOISE_TEXTURE_SIZE, TONE_MAPPING_EXPOSURE,
};
use viewer_core::graph::Material;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Globals {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    pub light_dir: [f32; 4],
    pub params: [f32; 4],
    pub fog_color: [f32; 4],
}

impl Globals {
    /// `encode_gamma` is set when the surface format is not sRGB.
    pub fn new(camera: &Camera, encode_gamma: bool) -> Self {
        let light = Vec3::from(DIRECTIONAL_POSITION).normalize();
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            camera_pos: [camera.eye.x, camera.eye.y, camera.eye.z, TONE_MAPPING_EXPOSURE],
            light_dir: [light.x, light.y, light.z, DIRECTIONAL_INTENSITY],
            params: [
                AMBIENT_INTENSITY,
                FOG_NEAR,
                FOG_FAR,
                if encode_gamma { 1.0 } else { 0.0 },
            ],
            fog_color: [
                BACKGROUND_COLOR[0],
                BACKGROUND_COLOR[1],
                BACKGROUND_COLOR[2],
                NOISE_TEXTURE_SIZE as f32,
            ],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniforms {
    pub model: [[f32; 4]; 4],
    pub normal_mat: [[f32; 4]; 4],
    pub base_color: [f32; 4],
    pub emissive: [f32; 4],
    pub material: [f32; 4],
    pub flags: [f32; 4],
}

impl DrawUniforms {
    pub fn new(model: Mat4, m: &Material) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal_mat: model.inverse().transpose().to_cols_array_2d(),
            base_color: m.base_color,
            emissive: [m.emissive[0], m.emissive[1], m.emissive[2], m.emissive_intensity],
            material: [
                m.metalness,
                m.roughness,
                m.clearcoat,
                if m.unlit { 1.0 } else { 0.0 },
            ],
            flags: [if m.dithering { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}
