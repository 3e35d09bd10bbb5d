use crate::{
    animation::anim::AnimationClip,
    distortion,
    foundation::{color::Color, core::Aabb, error::RelievoResult},
    geometry::{extrude::ExtrudeSpec, extrude::extrude_polygon, mesh::GeneratedMesh, shape},
    scene::material::MaterialParams,
    svg::extract::ExtractedShape,
};

/// Rim bevel depth and outline expansion shared by every model.
///
/// Only the step count is exposed as a control; the bevel's physical size is
/// part of the house look.
const BEVEL_THICKNESS: f32 = 0.5;
const BEVEL_SIZE: f32 = 0.5;

/// Geometry controls plus the material, as edited by a frontend.
///
/// Out-of-range values clamp instead of erroring, matching slider behavior:
/// depth to `[1, 100]`, bevel segments to `[0, 10]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BuildParams {
    /// Extrusion depth, clamped to `[1, 100]`.
    pub depth: f32,
    /// Bevel step count, clamped to `[0, 10]`. Zero disables the bevel.
    pub bevel_segments: u32,
    /// Surface material shared by every mesh.
    pub material: MaterialParams,
}

impl Default for BuildParams {
    fn default() -> Self {
        Self {
            depth: 10.0,
            bevel_segments: 2,
            material: MaterialParams::default(),
        }
    }
}

impl BuildParams {
    /// The extrusion profile these parameters resolve to, after clamping.
    pub(crate) fn extrude_spec(&self) -> ExtrudeSpec {
        let depth = if self.depth.is_finite() {
            self.depth.clamp(1.0, 100.0)
        } else {
            10.0
        };
        let segments = self.bevel_segments.min(10);
        ExtrudeSpec {
            depth,
            bevel_enabled: segments > 0,
            bevel_thickness: BEVEL_THICKNESS,
            bevel_size: BEVEL_SIZE,
            bevel_segments: segments,
        }
    }

    /// Whether switching to `other` keeps the mesh buffers valid.
    pub(crate) fn same_geometry(&self, other: &Self) -> bool {
        self.extrude_spec() == other.extrude_spec()
    }
}

/// Distortion bookkeeping attached to an active model.
#[derive(Clone, Debug)]
pub struct DistortionState {
    /// The looping flicker weight track.
    pub clip: AnimationClip,
    /// Last sampled blend weight in `[0, 1]`.
    pub weight: f32,
    /// Seed the displacement field was generated from.
    pub seed: u64,
}

/// A fully built scene model: one mesh per solid region of the source SVG,
/// recentered on the origin, plus shading and distortion state.
#[derive(Clone, Debug)]
pub struct ModelInstance {
    /// Extruded meshes in document order.
    pub meshes: Vec<GeneratedMesh>,
    /// Per-mesh albedo override carried over from each path's solid fill.
    /// Indices parallel `meshes`; `None` falls back to the material color.
    pub mesh_colors: Vec<Option<Color>>,
    /// Material shared by every mesh.
    pub material: MaterialParams,
    /// Model-space bounds over every undistorted mesh.
    pub aabb: Aabb,
    /// Present while glitch distortion is active.
    pub distortion: Option<DistortionState>,
}

impl ModelInstance {
    /// Classify, extrude, and recenter every extracted shape.
    ///
    /// Zero input shapes produce an empty model, which renders as background
    /// only. Mesh ids are `path{i}-shape{j}` over document order, so a
    /// rebuild with identical inputs is byte-identical.
    pub(crate) fn build(shapes: &[ExtractedShape], params: &BuildParams) -> RelievoResult<Self> {
        let spec = params.extrude_spec();

        let mut meshes = Vec::new();
        let mut mesh_colors = Vec::new();
        for (path_idx, shape) in shapes.iter().enumerate() {
            let polys = shape::classify_rings(shape.rings.clone());
            for (shape_idx, poly) in polys.iter().enumerate() {
                let mesh =
                    extrude_polygon(poly, &spec, format!("path{path_idx}-shape{shape_idx}"))?;
                if mesh.positions.is_empty() {
                    continue;
                }
                mesh_colors.push(shape.fill);
                meshes.push(mesh);
            }
        }

        let mut aabb = Aabb::EMPTY;
        for mesh in &meshes {
            aabb = aabb.union(&mesh.aabb());
        }

        // Recenter so framing and distortion work in model-local space.
        if !aabb.is_empty() {
            let c = aabb.center();
            for mesh in &mut meshes {
                for p in &mut mesh.positions {
                    p[0] -= c.x;
                    p[1] -= c.y;
                    p[2] -= c.z;
                }
            }
            aabb = Aabb {
                min: aabb.min - c,
                max: aabb.max - c,
            };
        }

        Ok(Self {
            meshes,
            mesh_colors,
            material: params.material.clamped(),
            aabb,
            distortion: None,
        })
    }

    /// Swap the material without touching geometry.
    pub(crate) fn set_material(&mut self, material: MaterialParams) {
        self.material = material.clamped();
    }

    /// Generate a displacement field per mesh and start the flicker clip.
    ///
    /// Re-activating with a new seed regenerates every morph buffer.
    pub(crate) fn activate_distortion(&mut self, seed: u64) {
        let strength = distortion::field::glitch_strength(&self.aabb);
        for mesh in &mut self.meshes {
            mesh.morph_positions = Some(distortion::field::displace_mesh(
                mesh, &self.aabb, seed, strength,
            ));
        }
        self.distortion = Some(DistortionState {
            clip: distortion::clip::flicker_clip(),
            weight: 0.0,
            seed,
        });
    }

    /// Drop the morph buffers and the clip; the base geometry is untouched.
    pub(crate) fn clear_distortion(&mut self) {
        for mesh in &mut self.meshes {
            mesh.morph_positions = None;
        }
        self.distortion = None;
    }

    /// Content hash over every mesh, for rebuild comparisons.
    pub fn fingerprint(&self) -> u64 {
        use xxhash_rust::xxh3::Xxh3;
        let mut h = Xxh3::with_seed(0x52e1_ab9d_77c0_3f64);
        h.update(&(self.meshes.len() as u64).to_le_bytes());
        for mesh in &self.meshes {
            h.update(&mesh.fingerprint().to_le_bytes());
        }
        h.digest()
    }

    /// Total vertex count across meshes.
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(GeneratedMesh::vertex_count).sum()
    }

    /// The active animation clips, if distortion is running.
    pub fn animation_clips(&self) -> Vec<&AnimationClip> {
        self.distortion.iter().map(|d| &d.clip).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
