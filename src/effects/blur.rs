//! Separable Gaussian blur in Q16 fixed point.
//!
//! Kernel weights are quantized so they sum to exactly one, which keeps a
//! constant image constant and conserves energy for the bloom overlay.

use rayon::prelude::*;

/// Blurs a premultiplied RGBA buffer in place, clamping at the edges.
///
/// Radius 0 leaves the buffer untouched. `data` must hold exactly
/// `width * height * 4` bytes.
pub(crate) fn blur_rgba_in_place(data: &mut [u8], width: u32, height: u32, radius: u32) {
    if radius == 0 || width == 0 || height == 0 {
        return;
    }
    let kernel = gaussian_kernel_q16(radius);
    let mut tmp = vec![0u8; data.len()];
    blur_rows(data, &mut tmp, width, &kernel);
    blur_columns(&tmp, data, width, height, &kernel);
}

/// Symmetric kernel of `2 * radius + 1` Q16 weights summing to 65536.
///
/// The deviation scales with the radius so wide blurs keep a full bell
/// instead of a truncated one. Rounding residue lands on the center tap.
fn gaussian_kernel_q16(radius: u32) -> Vec<u32> {
    if radius == 0 {
        return vec![1 << 16];
    }
    let sigma = f64::from(radius) * 0.5;
    let denom = 2.0 * sigma * sigma;

    let r = radius as i32;
    let mut raw = Vec::with_capacity(2 * radius as usize + 1);
    let mut sum = 0.0f64;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        raw.push(w);
        sum += w;
    }

    let mut weights = Vec::with_capacity(raw.len());
    let mut total: i64 = 0;
    for &w in &raw {
        let q = (((w / sum) * 65536.0).round() as i64).clamp(0, 65536);
        weights.push(q as u32);
        total += q;
    }
    let residue = 65536 - total;
    if residue != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + residue).clamp(0, 65536) as u32;
    }
    weights
}

fn blur_rows(src: &[u8], dst: &mut [u8], width: u32, kernel: &[u32]) {
    let row = width as usize * 4;
    let half = (kernel.len() / 2) as i32;
    let w = width as i32;

    dst.par_chunks_exact_mut(row)
        .zip(src.par_chunks_exact(row))
        .for_each(|(out, line)| {
            for x in 0..w {
                let mut acc = [0u64; 4];
                for (ki, &kw) in kernel.iter().enumerate() {
                    let sx = (x + ki as i32 - half).clamp(0, w - 1) as usize * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(line[sx + c]);
                    }
                }
                let o = x as usize * 4;
                for c in 0..4 {
                    out[o + c] = q16_round(acc[c]);
                }
            }
        });
}

fn blur_columns(src: &[u8], dst: &mut [u8], width: u32, height: u32, kernel: &[u32]) {
    let row = width as usize * 4;
    let half = (kernel.len() / 2) as i32;
    let h = height as i32;

    dst.par_chunks_exact_mut(row)
        .enumerate()
        .for_each(|(y, out)| {
            for x in 0..width as usize {
                let mut acc = [0u64; 4];
                for (ki, &kw) in kernel.iter().enumerate() {
                    let sy = (y as i32 + ki as i32 - half).clamp(0, h - 1) as usize;
                    let idx = sy * row + x * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                    }
                }
                let o = x * 4;
                for c in 0..4 {
                    out[o + c] = q16_round(acc[c]);
                }
            }
        });
}

fn q16_round(acc: u64) -> u8 {
    ((acc + (1 << 15)) >> 16).min(255) as u8
}
