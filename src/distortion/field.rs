//! Seeded per-vertex displacement synthesis.
//!
//! Four additive rules build the field: randomized horizontal slice jitter
//! gated by a sine of the height, coordinate-hashed fine noise, a block
//! offset inside one randomly placed sphere, and a smooth vertical wave.
//! The whole field is a pure function of (seed, mesh id, geometry, bounds):
//! re-activating with the same seed reproduces it bit for bit.

use xxhash_rust::xxh3::xxh3_64;

use crate::{foundation::core::Aabb, geometry::mesh::GeneratedMesh};

const FINE_SALT_X: u64 = 0x517c_c1b7_2722_0a95;
const FINE_SALT_Y: u64 = 0x2545_f491_4f6c_dd1d;
const FINE_SALT_Z: u64 = 0x9e6c_63d0_876a_68ee;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub(crate) fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    fn next_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64_01()
    }
}

fn noise01(seed: u64, x: u64) -> f64 {
    let mut rng = Rng64::new(seed ^ x.wrapping_mul(0xD6E8_FEB8_6659_FD93));
    rng.next_f64_01()
}

/// Hash a vertex position by bit pattern. Wall quads duplicate vertices on
/// purpose; hashing the exact bits moves every copy identically, so faces
/// stay sealed under displacement.
fn vertex_key(p: [f32; 3]) -> u64 {
    let mut bytes = [0u8; 12];
    bytes[0..4].copy_from_slice(&p[0].to_bits().to_le_bytes());
    bytes[4..8].copy_from_slice(&p[1].to_bits().to_le_bytes());
    bytes[8..12].copy_from_slice(&p[2].to_bits().to_le_bytes());
    xxh3_64(&bytes)
}

/// Distortion magnitude, proportional to the model's horizontal extent with
/// a floor so small models still visibly glitch.
pub(crate) fn glitch_strength(bounds: &Aabb) -> f32 {
    (bounds.size().x / 15.0).max(0.2)
}

/// Compute the displaced position buffer for one mesh.
///
/// Per-component displacement stays within `strength * 3.35`; the individual
/// rule weights sum to that bound.
pub(crate) fn displace_mesh(
    mesh: &GeneratedMesh,
    bounds: &Aabb,
    seed: u64,
    strength: f32,
) -> Vec<[f32; 3]> {
    let mesh_seed = seed ^ xxh3_64(mesh.id.as_bytes());
    let mut rng = Rng64::new(mesh_seed);

    let size = bounds.size();
    let height = f64::from(size.y).max(1e-6);
    let min_y = f64::from(bounds.min.y);
    let s = f64::from(strength);

    // Rule parameters are drawn once per mesh, in a fixed order.
    let slice_h = (height / 10.0).max(1e-6);
    let gate_freq = std::f64::consts::TAU * rng.next_range(2.0, 6.0) / height;

    let sphere_center = [
        lerp(bounds.min.x, bounds.max.x, rng.next_f64_01()),
        lerp(bounds.min.y, bounds.max.y, rng.next_f64_01()),
        lerp(bounds.min.z, bounds.max.z, rng.next_f64_01()),
    ];
    let sphere_r2 = {
        let r = f64::from(bounds.max_dim()) * rng.next_range(0.15, 0.35);
        r * r
    };
    let block_offset = {
        let zc = rng.next_range(-1.0, 1.0);
        let theta = rng.next_range(0.0, std::f64::consts::TAU);
        let r = (1.0 - zc * zc).max(0.0).sqrt();
        [
            r * theta.cos() * s * 1.5,
            r * theta.sin() * s * 1.5,
            zc * s * 1.5,
        ]
    };

    let wave_freq = std::f64::consts::TAU * rng.next_range(1.0, 3.0) / height;
    let wave_phase = rng.next_range(0.0, std::f64::consts::TAU);

    mesh.positions
        .iter()
        .map(|&p| {
            let (x, y, z) = (f64::from(p[0]), f64::from(p[1]), f64::from(p[2]));
            let mut d = [0.0f64; 3];

            // 1. Horizontal slice jitter, gated by a sine over the height.
            let slice = ((y - min_y) / slice_h).floor().max(0.0) as u64;
            let jitter = noise01(mesh_seed, slice) * 2.0 - 1.0;
            d[0] += jitter * s * (y * gate_freq).sin();

            // 2. Coordinate-hashed fine noise on all three axes.
            let key = vertex_key(p);
            d[0] += (noise01(mesh_seed ^ FINE_SALT_X, key) * 2.0 - 1.0) * s * 0.35;
            d[1] += (noise01(mesh_seed ^ FINE_SALT_Y, key) * 2.0 - 1.0) * s * 0.35;
            d[2] += (noise01(mesh_seed ^ FINE_SALT_Z, key) * 2.0 - 1.0) * s * 0.35;

            // 3. Block corruption: one rigid offset inside the sphere.
            let dx = x - sphere_center[0];
            let dy = y - sphere_center[1];
            let dz = z - sphere_center[2];
            if dx * dx + dy * dy + dz * dz < sphere_r2 {
                d[0] += block_offset[0];
                d[1] += block_offset[1];
                d[2] += block_offset[2];
            }

            // 4. Smooth vertical wave.
            d[0] += (y * wave_freq + wave_phase).sin() * s * 0.5;

            [
                (x + d[0]) as f32,
                (y + d[1]) as f32,
                (z + d[2]) as f32,
            ]
        })
        .collect()
}

fn lerp(a: f32, b: f32, t: f64) -> f64 {
    let a = f64::from(a);
    a + (f64::from(b) - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/distortion/field.rs"]
mod tests;
