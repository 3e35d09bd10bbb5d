//! The hand-authored flicker timeline that drives morph blending.

use crate::animation::{
    anim::{AnimationClip, InterpMode, Keyframe, Keyframes, LoopMode},
    ease::Ease,
};

/// Cycle length of the flicker, in seconds.
pub(crate) const FLICKER_PERIOD: f32 = 2.0;

/// Two bursts of rapid weight spikes with a long quiet gap, looping forever.
///
/// Starts and ends at weight zero so the loop seam never pops.
pub(crate) fn flicker_clip() -> AnimationClip {
    let keys = [
        (0.00, 0.00),
        (0.10, 0.00),
        (0.14, 0.95),
        (0.18, 0.10),
        (0.22, 0.80),
        (0.26, 0.00),
        (0.32, 0.65),
        (0.38, 0.00),
        (1.10, 0.00),
        (1.13, 1.00),
        (1.17, 0.15),
        (1.21, 0.90),
        (1.27, 0.00),
        (FLICKER_PERIOD, 0.00),
    ];

    AnimationClip {
        name: "glitch-flicker".to_string(),
        duration: FLICKER_PERIOD,
        mode: LoopMode::Repeat,
        track: Keyframes {
            keys: keys
                .into_iter()
                .map(|(time, value)| Keyframe {
                    time,
                    value,
                    ease: Ease::Linear,
                })
                .collect(),
            mode: InterpMode::Linear,
            default: None,
        },
    }
}
