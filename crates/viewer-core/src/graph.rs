//! Object graph for the displayed product model.
//!
//! A `ModelGraph` owns one root `Node`; the controllers only ever mutate the
//! root transform, while loaders and the placeholder synthesizer build the
//! tree underneath it. World-space queries compose the root transform with
//! every node on the path, the same way the renderer does.

use crate::bounds::Aabb;
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Local transform with Euler XYZ rotation in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn from_trs(translation: [f32; 3], rotation: [f32; 4], scale: [f32; 3]) -> Self {
        let (x, y, z) = Quat::from_array(rotation).to_euler(EulerRot::XYZ);
        Self {
            position: Vec3::from_array(translation),
            rotation: Vec3::new(x, y, z),
            scale: Vec3::from_array(scale),
        }
    }

    #[inline]
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }

    #[inline]
    pub fn set_uniform_scale(&mut self, s: f32) {
        self.scale = Vec3::splat(s);
    }
}

/// GPU-ready interleaved vertex.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub nrm: [f32; 3],
}

/// Indexed triangle list.
#[derive(Clone, Debug, Default)]
pub struct Geometry {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn local_bounds(&self) -> Aabb {
        Aabb::from_points(self.positions.iter().map(|p| Vec3::from_array(*p)))
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }

    pub fn vertices(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, p)| Vertex {
                pos: *p,
                nrm: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub metalness: f32,
    pub roughness: f32,
    pub clearcoat: f32,
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    /// Skip lighting entirely (screen-like surfaces).
    pub unlit: bool,
    pub dithering: bool,
    /// Set when material parameters changed and the GPU copy is stale.
    pub needs_update: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            base_color: [1.0, 1.0, 1.0, 1.0],
            metalness: 0.0,
            roughness: 1.0,
            clearcoat: 0.0,
            emissive: [0.0, 0.0, 0.0],
            emissive_intensity: 1.0,
            unlit: false,
            dithering: false,
            needs_update: true,
        }
    }
}

impl Material {
    /// Opaque colour from a packed `0xRRGGBB` value.
    pub fn from_hex(name: &str, hex: u32) -> Self {
        Self {
            name: name.to_string(),
            base_color: hex_to_rgba(hex),
            ..Default::default()
        }
    }
}

#[inline]
pub fn hex_to_rgba(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

#[derive(Clone, Debug)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: Material,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Mesh {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self {
            geometry,
            material,
            cast_shadow: false,
            receive_shadow: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub mesh: Option<Mesh>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn group(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_mesh(name: &str, mesh: Mesh, transform: Transform) -> Self {
        Self {
            name: name.to_string(),
            transform,
            mesh: Some(mesh),
            children: Vec::new(),
        }
    }

    pub fn add(&mut self, child: Node) {
        self.children.push(child);
    }

    fn visit<'a>(&'a self, parent: Mat4, f: &mut dyn FnMut(Mat4, &'a Mesh)) {
        let world = parent * self.transform.matrix();
        if let Some(mesh) = &self.mesh {
            f(world, mesh);
        }
        for c in &self.children {
            c.visit(world, f);
        }
    }

    fn visit_mut(&mut self, f: &mut dyn FnMut(&mut Mesh)) {
        if let Some(mesh) = &mut self.mesh {
            f(mesh);
        }
        for c in &mut self.children {
            c.visit_mut(f);
        }
    }
}

/// The displayed model: a root node whose transform the controllers drive.
#[derive(Clone, Debug)]
pub struct ModelGraph {
    root: Node,
}

impl ModelGraph {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    #[inline]
    pub fn transform(&self) -> &Transform {
        &self.root.transform
    }

    #[inline]
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.root.transform
    }

    /// Visit every mesh with its full world matrix (root transform included).
    pub fn for_each_mesh(&self, mut f: impl FnMut(Mat4, &Mesh)) {
        self.root.visit(Mat4::IDENTITY, &mut f);
    }

    /// Visit every mesh with its matrix relative to the root, i.e. excluding
    /// the root transform. The renderer pre-multiplies the root each frame.
    pub fn for_each_mesh_local(&self, mut f: impl FnMut(Mat4, &Mesh)) {
        let root_inv = self.root.transform.matrix().inverse();
        self.root.visit(Mat4::IDENTITY, &mut |world, mesh| f(root_inv * world, mesh));
    }

    pub fn for_each_mesh_mut(&mut self, mut f: impl FnMut(&mut Mesh)) {
        self.root.visit_mut(&mut f);
    }

    pub fn mesh_count(&self) -> usize {
        let mut n = 0;
        self.for_each_mesh(|_, _| n += 1);
        n
    }

    pub fn world_bounds(&self) -> Aabb {
        let mut b = Aabb::empty();
        self.for_each_mesh(|world, mesh| {
            b = b.union(&mesh.geometry.local_bounds().transform(&world));
        });
        b
    }

    /// Post-load preparation: shadows on, materials flagged for re-upload.
    pub fn prepare_for_display(&mut self) {
        self.for_each_mesh_mut(|mesh| {
            mesh.cast_shadow = true;
            mesh.receive_shadow = true;
            mesh.material.needs_update = true;
        });
    }

    /// Enable ordered dithering plus the faint noise emissive on every material.
    pub fn apply_banding_fix(&mut self, emissive_intensity: f32) {
        self.for_each_mesh_mut(|mesh| {
            mesh.material.dithering = true;
            mesh.material.emissive = [0.0, 0.0, 0.0];
            mesh.material.emissive_intensity = emissive_intensity;
            mesh.material.needs_update = true;
        });
    }
}
