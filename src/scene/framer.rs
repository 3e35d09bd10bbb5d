use glam::{Mat4, Vec3};

use crate::foundation::core::Aabb;

/// Perspective look-at camera.
///
/// Cameras are produced by [`Camera::framing`] whenever a model is loaded or
/// rebuilt; viewport changes touch only [`Camera::aspect`], never the
/// position, so resizing cannot drift the framing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Eye position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    /// Viewport aspect ratio, width over height.
    pub aspect: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 50.0),
            target: Vec3::ZERO,
            fov_y_deg: 75.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    /// Frame a model's bounds: back off far enough for the largest dimension
    /// to fit with margin, offset a quarter of the model's width and height
    /// for a slight three-quarter view, and aim at the center.
    ///
    /// Empty bounds return the default camera at the given aspect.
    pub fn framing(bounds: &Aabb, aspect: f32) -> Self {
        let mut cam = Self {
            aspect,
            ..Self::default()
        };
        if bounds.is_empty() {
            return cam;
        }

        let center = bounds.center();
        let size = bounds.size();
        let max_dim = bounds.max_dim();
        let half_fov = (cam.fov_y_deg * 0.5).to_radians();
        // Point-sized models still get a standoff.
        let dist = ((max_dim * 0.5 / half_fov.tan()).abs() * 1.5).max(1.0);

        cam.position = center + Vec3::new(size.x * 0.25, size.y * 0.25, dist);
        cam.target = center;
        cam
    }

    /// Right-handed world-to-view transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Right-handed perspective projection.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/framer.rs"]
mod tests;
