//! Flat-shaded CPU rasterizer.
//!
//! One triangle, one color: lighting is evaluated per triangle at its
//! centroid, then the triangle is filled with an edge-function scan over
//! its bounding box. Opaque triangles write depth; translucent ones test
//! depth but keep painter order within the frame. Morph blending moves
//! positions only, so distortion reads as displacement, not relighting.
//!
//! Triangles crossing the near plane are dropped whole rather than
//! clipped. Framing keeps the model far inside the frustum, so the
//! shortcut never shows.

use glam::{Vec3, Vec4};
use rayon::prelude::*;

use crate::foundation::color::{Color, linear_rgb_to_premul_srgb8};
use crate::foundation::core::Viewport;
use crate::foundation::math::mul_div255_u8;
use crate::geometry::mesh::GeneratedMesh;
use crate::render::target::Framebuffer;
use crate::scene::framer::Camera;
use crate::scene::material::MaterialParams;
use crate::scene::model::ModelInstance;

/// Page background behind every model.
const BACKGROUND: [u8; 3] = [0x2d, 0x37, 0x48];

const AMBIENT: f32 = 0.7;

/// Clip-space w below this counts as behind the near plane.
const NEAR_EPS: f32 = 1e-4;

/// Rows per parallel band. Bands own disjoint framebuffer slices and every
/// band sees every triangle, so output is identical at any thread count.
const BAND_ROWS: usize = 64;

struct ScreenTri {
    xy: [[f32; 2]; 3],
    z: [f32; 3],
    color: [u8; 4],
}

/// Background-only frame, also used when no model is loaded.
pub(crate) fn empty_frame(viewport: Viewport) -> Framebuffer {
    let mut frame = Framebuffer::from_viewport(viewport);
    frame.clear(Color::from_srgb8(
        BACKGROUND[0],
        BACKGROUND[1],
        BACKGROUND[2],
        255,
    ));
    frame
}

/// Renders `model` through `camera` into a fresh framebuffer.
pub(crate) fn render_scene(
    model: &ModelInstance,
    camera: &Camera,
    viewport: Viewport,
) -> Framebuffer {
    let mut frame = empty_frame(viewport);

    let (opaque, translucent) = project_triangles(model, camera, viewport);
    if opaque.is_empty() && translucent.is_empty() {
        return frame;
    }

    let w = viewport.width as usize;
    let row_bytes = w * 4;
    let mut depth = vec![f32::INFINITY; viewport.pixel_count()];

    frame
        .data
        .par_chunks_mut(BAND_ROWS * row_bytes)
        .zip(depth.par_chunks_mut(BAND_ROWS * w))
        .enumerate()
        .for_each(|(band, (color_rows, depth_rows))| {
            let y0 = band * BAND_ROWS;
            let rows = depth_rows.len() / w;
            for tri in &opaque {
                raster_tri(tri, color_rows, depth_rows, w, y0, rows, true);
            }
            for tri in &translucent {
                raster_tri(tri, color_rows, depth_rows, w, y0, rows, false);
            }
        });

    frame
}

/// Projects and shades every mesh triangle, split into opaque and
/// translucent lists in mesh order.
fn project_triangles(
    model: &ModelInstance,
    camera: &Camera,
    viewport: Viewport,
) -> (Vec<ScreenTri>, Vec<ScreenTri>) {
    let view_proj = camera.projection_matrix() * camera.view_matrix();
    let width = viewport.width as f32;
    let height = viewport.height as f32;
    let lights = [
        (Vec3::new(50.0, 50.0, 50.0).normalize(), 1.0),
        (Vec3::new(-50.0, 50.0, -50.0).normalize(), 0.6),
    ];

    let weight = model.distortion.as_ref().map_or(0.0, |d| d.weight);
    let material = &model.material;

    let mut opaque = Vec::new();
    let mut translucent = Vec::new();

    for (mesh, fill) in model.meshes.iter().zip(&model.mesh_colors) {
        let fill = fill.unwrap_or(material.color);
        let albedo = fill.to_linear_rgb();
        let alpha = fill.a.clamp(0.0, 1.0) * (1.0 - 0.75 * material.transmission);
        let positions = blended_positions(mesh, weight);

        for idx in mesh.indices.chunks_exact(3) {
            let (i0, i1, i2) = (idx[0] as usize, idx[1] as usize, idx[2] as usize);
            let p = [positions[i0], positions[i1], positions[i2]];

            let clip: [Vec4; 3] = p.map(|v| view_proj * v.extend(1.0));
            if clip.iter().any(|c| c.w <= NEAR_EPS) {
                continue;
            }
            let ndc = clip.map(|c| (c / c.w).truncate());

            let xy = [0, 1, 2].map(|i| {
                [
                    (ndc[i].x * 0.5 + 0.5) * width,
                    (1.0 - (ndc[i].y * 0.5 + 0.5)) * height,
                ]
            });
            let z = [ndc[0].z, ndc[1].z, ndc[2].z];

            let normal = (Vec3::from_array(mesh.normals[i0])
                + Vec3::from_array(mesh.normals[i1])
                + Vec3::from_array(mesh.normals[i2]))
            .normalize_or(Vec3::Z);
            let centroid = (p[0] + p[1] + p[2]) / 3.0;
            let rgb = shade_flat(normal, centroid, camera.position, albedo, material, &lights);

            let tri = ScreenTri {
                xy,
                z,
                color: linear_rgb_to_premul_srgb8(rgb, alpha),
            };
            if alpha < 0.999 {
                translucent.push(tri);
            } else {
                opaque.push(tri);
            }
        }
    }

    (opaque, translucent)
}

fn blended_positions(mesh: &GeneratedMesh, weight: f32) -> Vec<Vec3> {
    let base = mesh.positions.iter().map(|p| Vec3::from_array(*p));
    match &mesh.morph_positions {
        Some(morph) if weight > 0.0 => base
            .zip(morph.iter())
            .map(|(b, m)| b + (Vec3::from_array(*m) - b) * weight)
            .collect(),
        _ => base.collect(),
    }
}

/// Ambient plus two directional lights, Lambert diffuse and a Blinn lobe.
/// Normals flip toward the camera so interior faces shade like exteriors.
fn shade_flat(
    normal: Vec3,
    centroid: Vec3,
    eye: Vec3,
    albedo: [f32; 3],
    material: &MaterialParams,
    lights: &[(Vec3, f32); 2],
) -> [f32; 3] {
    let view = (eye - centroid).normalize_or_zero();
    let n = if normal.dot(view) < 0.0 { -normal } else { normal };

    let metalness = material.metalness;
    let shininess = (1.0 - material.roughness).powi(2) * 256.0 + 4.0;
    // Fresnel reflectance at normal incidence from the index of refraction.
    let f = (material.ior - 1.0) / (material.ior + 1.0);
    let spec_base = f * f;

    let mut out = [
        albedo[0] * AMBIENT,
        albedo[1] * AMBIENT,
        albedo[2] * AMBIENT,
    ];
    for &(dir, intensity) in lights {
        let ndl = n.dot(dir).max(0.0);
        if ndl <= 0.0 {
            continue;
        }
        let diffuse = ndl * intensity * (1.0 - metalness);
        let half = (dir + view).normalize_or_zero();
        let spec = n.dot(half).max(0.0).powf(shininess) * intensity;
        for c in 0..3 {
            let spec_tint = spec_base + (albedo[c] - spec_base) * metalness;
            out[c] += albedo[c] * diffuse + spec_tint * spec;
        }
    }
    out
}

fn edge_fn(a: [f32; 2], b: [f32; 2], p: [f32; 2]) -> f32 {
    (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0])
}

/// Fills one triangle within a band of rows starting at `y0`.
fn raster_tri(
    tri: &ScreenTri,
    color: &mut [u8],
    depth: &mut [f32],
    width: usize,
    y0: usize,
    rows: usize,
    depth_write: bool,
) {
    let [a, b, c] = tri.xy;
    let area = edge_fn(a, b, c);
    if area.abs() < 1e-9 {
        return;
    }

    let x_left = a[0].min(b[0]).min(c[0]).floor();
    let x_right = a[0].max(b[0]).max(c[0]).ceil();
    if x_right < 0.0 || x_left >= width as f32 {
        return;
    }
    let px0 = x_left.max(0.0) as usize;
    let px1 = x_right.min((width - 1) as f32) as usize;

    let band_last = y0 + rows - 1;
    let y_top = a[1].min(b[1]).min(c[1]).floor();
    let y_bot = a[1].max(b[1]).max(c[1]).ceil();
    if y_bot < y0 as f32 || y_top > band_last as f32 {
        return;
    }
    let py0 = y_top.max(y0 as f32) as usize;
    let py1 = y_bot.min(band_last as f32) as usize;

    for py in py0..=py1 {
        let sy = py as f32 + 0.5;
        for px in px0..=px1 {
            let s = [px as f32 + 0.5, sy];
            let w0 = edge_fn(b, c, s) / area;
            let w1 = edge_fn(c, a, s) / area;
            let w2 = edge_fn(a, b, s) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let z = w0 * tri.z[0] + w1 * tri.z[1] + w2 * tri.z[2];
            if !(0.0..=1.0).contains(&z) {
                continue;
            }
            let di = (py - y0) * width + px;
            if z >= depth[di] {
                continue;
            }
            if depth_write {
                depth[di] = z;
            }

            let ci = di * 4;
            let src = tri.color;
            if src[3] == 255 {
                color[ci..ci + 4].copy_from_slice(&src);
            } else {
                let inv = u16::from(255 - src[3]);
                for ch in 0..4 {
                    let dst = u16::from(color[ci + ch]);
                    color[ci + ch] = src[ch].saturating_add(mul_div255_u8(dst, inv));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
