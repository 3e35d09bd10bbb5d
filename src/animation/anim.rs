use crate::{
    animation::ease::Ease,
    foundation::error::{RelievoError, RelievoResult},
};

/// Interpolation contract for animation value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        a + (b - a) * f64::from(t)
    }
}

impl Lerp for [f32; 3] {
    fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        [
            a[0] + (b[0] - a[0]) * t,
            a[1] + (b[1] - a[1]) * t,
            a[2] + (b[2] - a[2]) * t,
        ]
    }
}

/// One keyframe in a keyframed track.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    /// Track-local time in seconds.
    pub time: f32,
    /// Value at `time`.
    pub value: T,
    /// Easing applied toward the next keyframe.
    pub ease: Ease,
}

/// Interpolation strategy between keyframes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum InterpMode {
    /// Hold the previous key value until the next keyframe.
    Hold,
    /// Interpolate between keyframes using [`Ease`].
    Linear,
}

/// Keyframed track with an optional default value.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframes<T> {
    /// Keyframes sorted by `time`.
    pub keys: Vec<Keyframe<T>>,
    /// Interpolation mode between adjacent keyframes.
    pub mode: InterpMode,
    /// Value used when `keys` is empty.
    pub default: Option<T>,
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    /// Validate key ordering, finiteness, and default/fallback requirements.
    pub fn validate(&self) -> RelievoResult<()> {
        if self.keys.is_empty() && self.default.is_none() {
            return Err(RelievoError::validation(
                "Keyframes must have at least one key or a default value",
            ));
        }
        if self.keys.iter().any(|k| !k.time.is_finite()) {
            return Err(RelievoError::validation("Keyframes times must be finite"));
        }
        if !self.keys.windows(2).all(|w| w[0].time <= w[1].time) {
            return Err(RelievoError::validation(
                "Keyframes keys must be sorted by time",
            ));
        }
        Ok(())
    }

    /// Sample the track at track-local time `t` (seconds).
    ///
    /// Times before the first key clamp to it; times after the last key clamp
    /// to it. Looping is the caller's concern (see [`AnimationClip`]).
    pub fn sample(&self, t: f32) -> RelievoResult<T> {
        if self.keys.is_empty() {
            return self
                .default
                .clone()
                .ok_or_else(|| RelievoError::validation("Keyframes has no keys and no default"));
        }

        let idx = self.keys.partition_point(|k| k.time <= t);

        if idx == 0 {
            return Ok(self.keys[0].value.clone());
        }
        if idx >= self.keys.len() {
            return Ok(self.keys[self.keys.len() - 1].value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.time - a.time;
        if denom <= 0.0 {
            return Ok(a.value.clone());
        }

        let u = (t - a.time) / denom;
        let ue = a.ease.apply(u);
        match self.mode {
            InterpMode::Hold => Ok(a.value.clone()),
            InterpMode::Linear => Ok(T::lerp(&a.value, &b.value, ue)),
        }
    }
}

/// Looping strategy for clip playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LoopMode {
    /// Wrap at the cycle boundary.
    Repeat,
    /// Bounce forward/backward across the cycle.
    PingPong,
}

/// A named, fixed-duration scalar weight track that loops indefinitely.
///
/// Clips drive morph-target blend weights: the session samples the clip with
/// its monotonic clock every frame and applies the weight uniformly to all
/// meshes of the current model.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct AnimationClip {
    /// Track name, used to address the clip from export consumers.
    pub name: String,
    /// Cycle length in seconds. Playback time wraps over this.
    pub duration: f32,
    /// Looping strategy.
    pub mode: LoopMode,
    /// The weight track, with key times inside `[0, duration]`.
    pub track: Keyframes<f32>,
}

impl AnimationClip {
    /// Build a clip, validating the track and cycle length.
    pub fn new(
        name: impl Into<String>,
        duration: f32,
        mode: LoopMode,
        track: Keyframes<f32>,
    ) -> RelievoResult<Self> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(RelievoError::validation(
                "AnimationClip duration must be > 0",
            ));
        }
        track.validate()?;
        if track
            .keys
            .iter()
            .any(|k| k.time < 0.0 || k.time > duration)
        {
            return Err(RelievoError::validation(
                "AnimationClip keys must lie within [0, duration]",
            ));
        }
        Ok(Self {
            name: name.into(),
            duration,
            mode,
            track,
        })
    }

    /// Sample the looped weight at absolute time `t` (seconds since play start).
    pub fn sample(&self, t: f32) -> RelievoResult<f32> {
        let local = match self.mode {
            LoopMode::Repeat => t.rem_euclid(self.duration),
            LoopMode::PingPong => {
                let cycle = 2.0 * self.duration;
                let p = t.rem_euclid(cycle);
                if p < self.duration { p } else { cycle - p }
            }
        };
        self.track.sample(local)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
