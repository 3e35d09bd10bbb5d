//! Block-average mosaic.

use crate::render::target::Framebuffer;

/// Replaces each `block_size` square with its rounded channel average.
/// Blocks at the right and bottom edges shrink to fit. A block size of
/// 0 or 1 changes nothing.
pub(crate) fn apply(frame: &mut Framebuffer, block_size: u32) {
    if block_size <= 1 || frame.width == 0 || frame.height == 0 {
        return;
    }
    let w = frame.width as usize;
    let h = frame.height as usize;
    let b = block_size as usize;

    for by in (0..h).step_by(b) {
        for bx in (0..w).step_by(b) {
            let x1 = (bx + b).min(w);
            let y1 = (by + b).min(h);
            let count = ((x1 - bx) * (y1 - by)) as u64;

            let mut acc = [0u64; 4];
            for y in by..y1 {
                for x in bx..x1 {
                    let o = (y * w + x) * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(frame.data[o + c]);
                    }
                }
            }
            let mut avg = [0u8; 4];
            for c in 0..4 {
                avg[c] = ((acc[c] + count / 2) / count) as u8;
            }

            for y in by..y1 {
                for x in bx..x1 {
                    let o = (y * w + x) * 4;
                    frame.data[o..o + 4].copy_from_slice(&avg);
                }
            }
        }
    }
}
