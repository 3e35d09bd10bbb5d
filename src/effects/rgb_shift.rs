//! Channel separation along an angle.

use crate::render::target::Framebuffer;

/// Shifts the red channel by `amount * width` pixels along `angle` and the
/// blue channel the opposite way; green and alpha stay put. Samples clamp
/// at the frame edges. Assumes an opaque frame.
pub(crate) fn apply(frame: &mut Framebuffer, amount: f32, angle: f32) {
    if frame.width == 0 || frame.height == 0 {
        return;
    }
    let dx = (amount * frame.width as f32 * angle.cos()).round() as i32;
    let dy = (amount * frame.width as f32 * angle.sin()).round() as i32;
    if dx == 0 && dy == 0 {
        return;
    }

    let src = frame.data.clone();
    let w = frame.width as i32;
    let h = frame.height as i32;
    let sample = |x: i32, y: i32, c: usize| -> u8 {
        let sx = x.clamp(0, w - 1);
        let sy = y.clamp(0, h - 1);
        src[((sy * w + sx) as usize) * 4 + c]
    };

    for y in 0..h {
        for x in 0..w {
            let o = ((y * w + x) as usize) * 4;
            frame.data[o] = sample(x + dx, y + dy, 0);
            frame.data[o + 2] = sample(x - dx, y - dy, 2);
        }
    }
}
