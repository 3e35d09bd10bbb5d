use xxhash_rust::xxh3::Xxh3;

use crate::foundation::color::Color;
use crate::foundation::core::Viewport;

const XXH3_SEED: u64 = 0x91f4_3d2a_6b08_c7e1;

/// CPU render target holding premultiplied sRGB RGBA8 pixels.
///
/// The scene pass writes into it and the effect chain rewrites it in
/// place; both treat the bytes as encoded premultiplied color.
#[derive(Clone, Debug)]
pub struct Framebuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl Framebuffer {
    /// Transparent-black target of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Target sized to a viewport.
    pub fn from_viewport(viewport: Viewport) -> Self {
        Self::new(viewport.width, viewport.height)
    }

    /// Fills every pixel with `color`.
    pub fn clear(&mut self, color: Color) {
        let px = color.to_premul_rgba8();
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Content digest. Equal size and pixels hash equal, so golden tests
    /// can compare frames without storing them.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh3::with_seed(XXH3_SEED);
        hasher.update(&self.width.to_le_bytes());
        hasher.update(&self.height.to_le_bytes());
        hasher.update(&self.data);
        hasher.digest()
    }
}
