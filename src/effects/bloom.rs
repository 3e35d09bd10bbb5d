//! Blurred-highlight overlay.

use crate::effects::blur;
use crate::render::target::Framebuffer;

const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// Extracts pixels above the luma threshold, blurs them, and adds the
/// result back on top, saturating per channel.
pub(crate) fn apply(frame: &mut Framebuffer, strength: f32, radius_px: u32, threshold: f32) {
    if strength <= 0.0 || frame.width == 0 || frame.height == 0 {
        return;
    }

    // Highlights only; everything below the threshold stays black in the
    // scratch buffer so the blur cannot smear midtones.
    let mut bright = frame.data.clone();
    for px in bright.chunks_exact_mut(4) {
        let luma = (f32::from(px[0]) * LUMA_R + f32::from(px[1]) * LUMA_G + f32::from(px[2]) * LUMA_B)
            / 255.0;
        if luma < threshold {
            px.copy_from_slice(&[0, 0, 0, 0]);
        }
    }

    blur::blur_rgba_in_place(&mut bright, frame.width, frame.height, radius_px);

    for (dst, glow) in frame.data.chunks_exact_mut(4).zip(bright.chunks_exact(4)) {
        for c in 0..4 {
            let add = (f32::from(glow[c]) * strength).round() as u32;
            dst[c] = (u32::from(dst[c]) + add).min(255) as u8;
        }
    }
}
