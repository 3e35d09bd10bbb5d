use xxhash_rust::xxh3::Xxh3;

use crate::foundation::{
    core::Aabb,
    error::{RelievoError, RelievoResult},
};

const XXH3_SEED: u64 = 0x6c1f_93ab_0e24_d5c7;

/// Triangle mesh produced by the extruder.
///
/// Buffers are flat and non-indexed-friendly: walls carry their own vertices
/// per quad so normals stay flat, and caps share vertices only within a cap.
/// `indices` is a triangle list into the vertex arrays.
#[derive(Clone, Debug)]
pub struct GeneratedMesh {
    /// Stable identifier derived from the source path and ring ordering.
    pub id: String,
    /// Vertex positions in model space.
    pub positions: Vec<[f32; 3]>,
    /// Unit-length per-vertex normals, flat across each face.
    pub normals: Vec<[f32; 3]>,
    /// Per-vertex texture coordinates.
    pub uvs: Vec<[f32; 2]>,
    /// Triangle list indices into the vertex buffers.
    pub indices: Vec<u32>,
    /// Displaced variant of `positions`, present while distortion is active.
    ///
    /// Rendering blends `positions` toward this buffer by the clip weight.
    pub morph_positions: Option<Vec<[f32; 3]>>,
}

impl GeneratedMesh {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Model-space bounds over the undistorted positions.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_positions(&self.positions)
    }

    /// Check buffer length agreement and index bounds.
    pub fn validate(&self) -> RelievoResult<()> {
        let n = self.positions.len();
        if self.normals.len() != n || self.uvs.len() != n {
            return Err(RelievoError::geometry(format!(
                "mesh '{}' buffer lengths disagree: {} positions, {} normals, {} uvs",
                self.id,
                n,
                self.normals.len(),
                self.uvs.len()
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(RelievoError::geometry(format!(
                "mesh '{}' index count {} is not a triangle list",
                self.id,
                self.indices.len()
            )));
        }
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= n) {
            return Err(RelievoError::geometry(format!(
                "mesh '{}' index {bad} out of range for {n} vertices",
                self.id
            )));
        }
        if let Some(morph) = &self.morph_positions
            && morph.len() != n
        {
            return Err(RelievoError::geometry(format!(
                "mesh '{}' morph buffer length {} does not match {} positions",
                self.id,
                morph.len(),
                n
            )));
        }
        Ok(())
    }

    /// Stable content hash over every buffer, including the morph buffer.
    ///
    /// Float channels hash by bit pattern, so byte-identical rebuilds compare
    /// equal and any single-bit drift does not.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Xxh3::with_seed(XXH3_SEED);

        h.update(&(self.id.len() as u64).to_le_bytes());
        h.update(self.id.as_bytes());

        write_vec3s(&mut h, &self.positions);
        write_vec3s(&mut h, &self.normals);

        h.update(&(self.uvs.len() as u64).to_le_bytes());
        for uv in &self.uvs {
            h.update(&uv[0].to_bits().to_le_bytes());
            h.update(&uv[1].to_bits().to_le_bytes());
        }

        h.update(&(self.indices.len() as u64).to_le_bytes());
        for i in &self.indices {
            h.update(&i.to_le_bytes());
        }

        match &self.morph_positions {
            Some(morph) => {
                h.update(&[1]);
                write_vec3s(&mut h, morph);
            }
            None => h.update(&[0]),
        }

        h.digest()
    }
}

fn write_vec3s(h: &mut Xxh3, vs: &[[f32; 3]]) {
    h.update(&(vs.len() as u64).to_le_bytes());
    for v in vs {
        h.update(&v[0].to_bits().to_le_bytes());
        h.update(&v[1].to_bits().to_le_bytes());
        h.update(&v[2].to_bits().to_le_bytes());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/mesh.rs"]
mod tests;
