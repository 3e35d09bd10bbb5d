//! Horizontal darkening stripes.

use crate::render::target::Framebuffer;

/// How deep the stripes bite; rows keep at least 65% of their color.
const DEPTH: f32 = 0.35;

/// Darkens rows by a sine wave over `y * density`. Alpha is untouched so
/// stripes never punch holes into the frame.
pub(crate) fn apply(frame: &mut Framebuffer, density: f32) {
    if frame.width == 0 || frame.height == 0 {
        return;
    }
    let row_bytes = frame.width as usize * 4;
    for (y, row) in frame.data.chunks_exact_mut(row_bytes).enumerate() {
        let wave = 0.5 + 0.5 * (y as f32 * density).sin();
        let scale = 1.0 - DEPTH * wave;
        for px in row.chunks_exact_mut(4) {
            for c in 0..3 {
                px[c] = (f32::from(px[c]) * scale).round() as u8;
            }
        }
    }
}
