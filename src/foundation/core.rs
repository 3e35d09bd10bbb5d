use glam::Vec3;

use crate::foundation::error::{RelievoError, RelievoResult};

/// Output surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Build a viewport, rejecting zero-sized surfaces.
    pub fn new(width: u32, height: u32) -> RelievoResult<Self> {
        if width == 0 || height == 0 {
            return Err(RelievoError::validation("Viewport sides must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Width over height.
    pub fn aspect(self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Total pixel count.
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Axis-aligned bounding box over mesh positions.
///
/// The empty box is the identity for [`Aabb::union`]: `min` starts above
/// `max` so the first inserted point defines both corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Smallest corner.
    pub min: Vec3,
    /// Largest corner.
    pub max: Vec3,
}

impl Aabb {
    /// The empty box (contains no points).
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Whether no point has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// Grow to include `p`.
    pub fn insert(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Smallest box containing both inputs.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Box over a position buffer. Empty input yields [`Aabb::EMPTY`].
    pub fn from_positions(positions: &[[f32; 3]]) -> Self {
        let mut aabb = Self::EMPTY;
        for p in positions {
            aabb.insert(Vec3::from_array(*p));
        }
        aabb
    }

    /// Midpoint of the box. Zero for the empty box.
    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis. Zero for the empty box.
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        self.max - self.min
    }

    /// Largest extent across the three axes.
    pub fn max_dim(&self) -> f32 {
        let s = self.size();
        s.x.max(s.y).max(s.z)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
