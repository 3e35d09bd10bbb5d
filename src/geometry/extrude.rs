//! Prism and bevel extrusion of classified polygons.
//!
//! The solid is built from horizontal layers. Each layer is the base outline
//! offset outward by some amount at some Z. Walls are quads between adjacent
//! layers with one flat normal per quad; caps tessellate the *original*
//! outline at the extreme planes, which is why the first and last layer
//! always carry offset zero: the walls meet the caps exactly.

use kurbo::Point;
use lyon::geom::point;
use lyon::path::FillRule;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, VertexBuffers,
};

use crate::foundation::error::{RelievoError, RelievoResult};
use crate::geometry::{mesh::GeneratedMesh, shape::Polygon};

/// Extrusion profile: depth plus an optional quarter-circle bevel.
///
/// With the bevel enabled, the outline is expanded by `bevel_size` at the
/// wall and pulled back to the original outline over `bevel_thickness` of
/// extra depth beyond each cap, sampled in `bevel_segments` steps. The total
/// solid depth is then `depth + 2 * bevel_thickness`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExtrudeSpec {
    /// Straight wall depth along +Z.
    pub depth: f32,
    /// Whether to round the rim with a bevel.
    pub bevel_enabled: bool,
    /// Extra depth consumed by each bevel, beyond the straight wall.
    pub bevel_thickness: f32,
    /// Maximum outward expansion of the outline at the wall plane.
    pub bevel_size: f32,
    /// Number of bevel steps; 0 falls back to a plain prism.
    pub bevel_segments: u32,
}

impl Default for ExtrudeSpec {
    fn default() -> Self {
        Self {
            depth: 10.0,
            bevel_enabled: true,
            bevel_thickness: 0.5,
            bevel_size: 0.5,
            bevel_segments: 2,
        }
    }
}

impl ExtrudeSpec {
    /// Reject non-finite or negative parameters.
    pub fn validate(&self) -> RelievoResult<()> {
        if !(self.depth.is_finite() && self.depth > 0.0) {
            return Err(RelievoError::validation(
                "ExtrudeSpec depth must be finite and > 0",
            ));
        }
        if !(self.bevel_thickness.is_finite() && self.bevel_thickness >= 0.0) {
            return Err(RelievoError::validation(
                "ExtrudeSpec bevel_thickness must be finite and >= 0",
            ));
        }
        if !(self.bevel_size.is_finite() && self.bevel_size >= 0.0) {
            return Err(RelievoError::validation(
                "ExtrudeSpec bevel_size must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Layer profile as `(outline offset, z)`, bottom to top.
    ///
    /// Invariant: the first and last layer have offset 0.
    fn layers(&self) -> Vec<(f64, f64)> {
        let depth = f64::from(self.depth);
        let beveled = self.bevel_enabled
            && self.bevel_segments > 0
            && (self.bevel_size > 0.0 || self.bevel_thickness > 0.0);
        if !beveled {
            return vec![(0.0, 0.0), (0.0, depth)];
        }

        let n = self.bevel_segments as usize;
        let th = f64::from(self.bevel_thickness);
        let sz = f64::from(self.bevel_size);

        let mut out = Vec::with_capacity(2 * n + 2);
        for s in 0..=n {
            let t = s as f64 / n as f64;
            let (sin, cos) = (t * std::f64::consts::FRAC_PI_2).sin_cos();
            out.push((sz * sin, -th * cos));
        }
        out.push((sz, depth));
        for s in (0..n).rev() {
            let t = s as f64 / n as f64;
            let (sin, cos) = (t * std::f64::consts::FRAC_PI_2).sin_cos();
            out.push((sz * sin, depth + th * cos));
        }
        out
    }
}

/// Extrude one polygon-with-holes into a triangle mesh.
///
/// Output is deterministic: the same polygon and spec produce byte-identical
/// buffers. A cap that fails to tessellate (pathologically self-intersecting
/// outline) leaves the solid open instead of failing the model.
pub(crate) fn extrude_polygon(
    poly: &Polygon,
    spec: &ExtrudeSpec,
    id: impl Into<String>,
) -> RelievoResult<GeneratedMesh> {
    spec.validate()?;
    let layers = spec.layers();

    let mut mesh = GeneratedMesh {
        id: id.into(),
        positions: Vec::new(),
        normals: Vec::new(),
        uvs: Vec::new(),
        indices: Vec::new(),
        morph_positions: None,
    };

    let (bmin, bmax) = outline_bounds(poly);
    let z_bottom = layers[0].1;
    let z_top = layers[layers.len() - 1].1;
    emit_caps(&mut mesh, poly, z_bottom, z_top, bmin, bmax);

    emit_walls(&mut mesh, &poly.outer, &layers);
    for hole in &poly.holes {
        emit_walls(&mut mesh, hole, &layers);
    }

    Ok(mesh)
}

fn outline_bounds(poly: &Polygon) -> (Point, Point) {
    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in &poly.outer {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    (min, max)
}

fn emit_caps(
    mesh: &mut GeneratedMesh,
    poly: &Polygon,
    z_bottom: f64,
    z_top: f64,
    bmin: Point,
    bmax: Point,
) {
    let mut pb = lyon::path::Path::builder();
    for ring in std::iter::once(&poly.outer).chain(poly.holes.iter()) {
        pb.begin(point(ring[0].x as f32, ring[0].y as f32));
        for p in &ring[1..] {
            pb.line_to(point(p.x as f32, p.y as f32));
        }
        pb.close();
    }
    let path = pb.build();

    let mut buffers: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
    let mut tess = FillTessellator::new();
    let options = FillOptions::default().with_fill_rule(FillRule::NonZero);
    let filled = tess.tessellate_path(
        &path,
        &options,
        &mut BuffersBuilder::new(&mut buffers, |v: FillVertex| {
            let p = v.position();
            [p.x, p.y]
        }),
    );
    if filled.is_err() {
        return;
    }

    emit_cap(mesh, &buffers, z_bottom, false, bmin, bmax);
    emit_cap(mesh, &buffers, z_top, true, bmin, bmax);
}

fn emit_cap(
    mesh: &mut GeneratedMesh,
    buffers: &VertexBuffers<[f32; 2], u32>,
    z: f64,
    up: bool,
    bmin: Point,
    bmax: Point,
) {
    let base = mesh.positions.len() as u32;
    let normal = [0.0, 0.0, if up { 1.0 } else { -1.0 }];
    let w = (bmax.x - bmin.x).max(1e-12);
    let h = (bmax.y - bmin.y).max(1e-12);

    for [x, y] in &buffers.vertices {
        mesh.positions.push([*x, *y, z as f32]);
        mesh.normals.push(normal);
        mesh.uvs.push([
            ((f64::from(*x) - bmin.x) / w) as f32,
            ((f64::from(*y) - bmin.y) / h) as f32,
        ]);
    }

    for tri in buffers.indices.chunks_exact(3) {
        let (i0, mut i1, mut i2) = (tri[0], tri[1], tri[2]);
        let a = buffers.vertices[i0 as usize];
        let b = buffers.vertices[i1 as usize];
        let c = buffers.vertices[i2 as usize];
        let cross = f64::from(b[0] - a[0]) * f64::from(c[1] - a[1])
            - f64::from(b[1] - a[1]) * f64::from(c[0] - a[0]);
        // Wind the triangle so it faces the cap normal.
        if (cross > 0.0) != up {
            std::mem::swap(&mut i1, &mut i2);
        }
        mesh.indices.extend([base + i0, base + i1, base + i2]);
    }
}

/// Per-vertex miter offset directions, unit edge normals averaged and
/// rescaled so a unit offset moves the edge (not the vertex) by one unit.
/// The miter length is capped at 10x to keep spikes finite.
fn miter_dirs(ring: &[Point]) -> Vec<(f64, f64)> {
    let n = ring.len();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let prev = ring[(i + n - 1) % n];
        let curr = ring[i];
        let next = ring[(i + 1) % n];

        let n0 = edge_normal(prev, curr);
        let n1 = edge_normal(curr, next);
        let (mut dx, mut dy) = (n0.0 + n1.0, n0.1 + n1.1);
        let len = (dx * dx + dy * dy).sqrt();
        if len < 1e-12 {
            // Full spike reversal: offset along the outgoing edge normal.
            out.push(n1);
            continue;
        }
        dx /= len;
        dy /= len;
        let cos_half = dx * n1.0 + dy * n1.1;
        let scale = 1.0 / cos_half.max(0.1);
        out.push((dx * scale, dy * scale));
    }
    out
}

fn edge_normal(a: Point, b: Point) -> (f64, f64) {
    let (ex, ey) = (b.x - a.x, b.y - a.y);
    let len = (ex * ex + ey * ey).sqrt();
    if len < 1e-12 {
        return (0.0, 0.0);
    }
    // Outward for CCW outers and, with CW holes, into the hole.
    (ey / len, -ex / len)
}

fn emit_walls(mesh: &mut GeneratedMesh, ring: &[Point], layers: &[(f64, f64)]) {
    let n = ring.len();
    let dirs = miter_dirs(ring);

    let mut per = vec![0.0f64; n + 1];
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        per[i + 1] = per[i] + (b - a).hypot();
    }
    let total = per[n].max(1e-12);

    let place = |i: usize, off: f64, z: f64| -> [f64; 3] {
        [
            ring[i].x + dirs[i].0 * off,
            ring[i].y + dirs[i].1 * off,
            z,
        ]
    };

    let l_last = (layers.len() - 1) as f64;
    for k in 0..layers.len() - 1 {
        let (o0, z0) = layers[k];
        let (o1, z1) = layers[k + 1];
        let v0 = (k as f64 / l_last) as f32;
        let v1 = ((k + 1) as f64 / l_last) as f32;

        for i in 0..n {
            let j = (i + 1) % n;
            let a = place(i, o0, z0);
            let b = place(j, o0, z0);
            let c = place(j, o1, z1);
            let d = place(i, o1, z1);

            let normal = quad_normal(a, b, d);
            let u0 = (per[i] / total) as f32;
            let u1 = (per[i + 1] / total) as f32;

            let base = mesh.positions.len() as u32;
            for (p, uv) in [
                (a, [u0, v0]),
                (b, [u1, v0]),
                (c, [u1, v1]),
                (d, [u0, v1]),
            ] {
                mesh.positions.push([p[0] as f32, p[1] as f32, p[2] as f32]);
                mesh.normals.push(normal);
                mesh.uvs.push(uv);
            }
            mesh.indices
                .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
        }
    }
}

fn quad_normal(a: [f64; 3], b: [f64; 3], d: [f64; 3]) -> [f32; 3] {
    let e0 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let e1 = [d[0] - a[0], d[1] - a[1], d[2] - a[2]];
    let nx = e0[1] * e1[2] - e0[2] * e1[1];
    let ny = e0[2] * e1[0] - e0[0] * e1[2];
    let nz = e0[0] * e1[1] - e0[1] * e1[0];
    let len = (nx * nx + ny * ny + nz * nz).sqrt();
    if len < 1e-12 {
        return [0.0, 0.0, 1.0];
    }
    [(nx / len) as f32, (ny / len) as f32, (nz / len) as f32]
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/extrude.rs"]
mod tests;
