//! Procedural geometry for the built-in placeholder model.

use crate::graph::Geometry;
use std::f32::consts::TAU;

/// Axis-aligned box centered on the origin, 4 vertices per face so normals
/// stay flat.
pub fn box_geometry(width: f32, height: f32, depth: f32) -> Geometry {
    let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);
    // (normal, u axis, v axis) per face
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];
    let half = [hx, hy, hz];
    let mut g = Geometry::default();
    for (n, u, v) in faces {
        let base = g.positions.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let mut p = [0.0f32; 3];
            for k in 0..3 {
                p[k] = (n[k] + u[k] * su + v[k] * sv) * half[k];
            }
            g.positions.push(p);
            g.normals.push(n);
        }
        g.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    g
}

/// Rectangle in the XY plane facing +Z.
pub fn plane_geometry(width: f32, height: f32) -> Geometry {
    let (hx, hy) = (width * 0.5, height * 0.5);
    Geometry {
        positions: vec![[-hx, -hy, 0.0], [hx, -hy, 0.0], [hx, hy, 0.0], [-hx, hy, 0.0]],
        normals: vec![[0.0, 0.0, 1.0]; 4],
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// Capped cylinder along +Y, centered on the origin.
pub fn cylinder_geometry(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
) -> Geometry {
    let segments = segments.max(3);
    let hy = height * 0.5;
    let mut g = Geometry::default();

    // side wall
    let slope = (radius_bottom - radius_top) / height.max(f32::EPSILON);
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * TAU;
        let (s, c) = theta.sin_cos();
        let n = glam::Vec3::new(s, slope, c).normalize();
        g.positions.push([radius_top * s, hy, radius_top * c]);
        g.normals.push(n.to_array());
        g.positions.push([radius_bottom * s, -hy, radius_bottom * c]);
        g.normals.push(n.to_array());
    }
    for i in 0..segments {
        let a = i * 2;
        g.indices
            .extend_from_slice(&[a, a + 1, a + 3, a, a + 3, a + 2]);
    }

    // caps
    for (y, r, ny) in [(hy, radius_top, 1.0f32), (-hy, radius_bottom, -1.0f32)] {
        let center = g.positions.len() as u32;
        g.positions.push([0.0, y, 0.0]);
        g.normals.push([0.0, ny, 0.0]);
        for i in 0..=segments {
            let theta = i as f32 / segments as f32 * TAU;
            let (s, c) = theta.sin_cos();
            g.positions.push([r * s, y, r * c]);
            g.normals.push([0.0, ny, 0.0]);
        }
        for i in 0..segments {
            let a = center + 1 + i;
            if ny > 0.0 {
                g.indices.extend_from_slice(&[center, a, a + 1]);
            } else {
                g.indices.extend_from_slice(&[center, a + 1, a]);
            }
        }
    }
    g
}
