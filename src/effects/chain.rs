//! Post chain assembly.
//!
//! Passes always run in the same order: bloom, RGB-shift, pixelation,
//! scan-lines. Toggles select which of them appear; they never reorder.

use crate::effects::config::EffectConfig;
use crate::effects::{bloom, pixelate, rgb_shift, scanlines};
use crate::render::target::Framebuffer;

/// One resolved pass with its uniforms baked in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum EffectPass {
    /// Blurred-highlight overlay.
    Bloom {
        strength: f32,
        radius_px: u32,
        threshold: f32,
    },
    /// Channel separation along an angle.
    RgbShift { amount: f32, angle: f32 },
    /// Block-average mosaic.
    Pixelate { block_size: u32 },
    /// Horizontal darkening stripes.
    ScanLines { density: f32 },
}

/// Builds the pass list for one frame.
///
/// While glitch distortion is active the RGB-shift pass is always present
/// and its uniforms oscillate with `time`, overriding the static
/// `chromatic_aberration` toggle. The configured shift amount serves as the
/// oscillation base, so the driven amount sweeps `[0, 2 * amount]`.
pub(crate) fn resolve_chain(cfg: &EffectConfig, glitch_active: bool, time: f32) -> Vec<EffectPass> {
    let mut passes = Vec::new();

    if cfg.bloom {
        passes.push(EffectPass::Bloom {
            strength: cfg.bloom_params.strength,
            radius_px: cfg.bloom_params.radius_px,
            threshold: cfg.bloom_params.threshold,
        });
    }

    if glitch_active {
        let base = cfg.shift_params.amount;
        passes.push(EffectPass::RgbShift {
            amount: (time * 20.0).sin() * base + base,
            angle: (time * 5.0).sin() * std::f32::consts::PI,
        });
    } else if cfg.chromatic_aberration {
        passes.push(EffectPass::RgbShift {
            amount: cfg.shift_params.amount,
            angle: cfg.shift_params.angle,
        });
    }

    if cfg.pixelation {
        passes.push(EffectPass::Pixelate {
            block_size: cfg.pixelate_params.block_size,
        });
    }

    if cfg.scan_lines {
        passes.push(EffectPass::ScanLines {
            density: cfg.scan_params.density,
        });
    }

    passes
}

/// Applies `passes` to `frame` in order.
pub(crate) fn run_chain(frame: &mut Framebuffer, passes: &[EffectPass]) {
    for pass in passes {
        match *pass {
            EffectPass::Bloom {
                strength,
                radius_px,
                threshold,
            } => bloom::apply(frame, strength, radius_px, threshold),
            EffectPass::RgbShift { amount, angle } => rgb_shift::apply(frame, amount, angle),
            EffectPass::Pixelate { block_size } => pixelate::apply(frame, block_size),
            EffectPass::ScanLines { density } => scanlines::apply(frame, density),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/chain.rs"]
mod tests;
