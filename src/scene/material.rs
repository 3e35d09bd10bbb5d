use crate::foundation::color::Color;

/// Physically-based surface parameters applied to every mesh of a model.
///
/// Meshes whose source path carried a solid fill keep that fill as albedo;
/// the remaining parameters still apply. Values outside their working range
/// are clamped by [`MaterialParams::clamped`], mirroring the editing UI
/// rather than erroring out.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MaterialParams {
    /// Albedo used for meshes without a per-path fill color.
    pub color: Color,
    /// Microfacet roughness in `[0, 1]`; 0 is a mirror finish.
    pub roughness: f32,
    /// Metalness in `[0, 1]`; metals tint their specular by the albedo.
    pub metalness: f32,
    /// Transmission in `[0, 1]`; above 0 the surface renders translucent.
    pub transmission: f32,
    /// Index of refraction in `[1, 2.3]`.
    pub ior: f32,
    /// Refraction volume thickness in `[0, 5]`.
    pub thickness: f32,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            color: Color::from_srgb8(0xcc, 0xcc, 0xcc, 255),
            roughness: 0.5,
            metalness: 0.1,
            transmission: 0.0,
            ior: 1.5,
            thickness: 0.5,
        }
    }
}

impl MaterialParams {
    /// Flat chalky gray.
    pub fn matte() -> Self {
        Self {
            color: Color::from_srgb8(0xcc, 0xcc, 0xcc, 255),
            roughness: 1.0,
            metalness: 0.0,
            transmission: 0.0,
            ..Self::default()
        }
    }

    /// Shiny white plastic.
    pub fn glossy() -> Self {
        Self {
            color: Color::rgb(1.0, 1.0, 1.0),
            roughness: 0.1,
            metalness: 0.1,
            transmission: 0.0,
            ..Self::default()
        }
    }

    /// Polished gold.
    pub fn metal() -> Self {
        Self {
            color: Color::from_srgb8(0xff, 0xd7, 0x00, 255),
            roughness: 0.2,
            metalness: 1.0,
            transmission: 0.0,
            ..Self::default()
        }
    }

    /// Clear glass.
    pub fn glass() -> Self {
        Self {
            color: Color::rgb(1.0, 1.0, 1.0),
            roughness: 0.05,
            metalness: 0.0,
            transmission: 1.0,
            ior: 1.5,
            thickness: 1.5,
        }
    }

    /// Whether the surface renders with alpha blending.
    pub fn transparent(&self) -> bool {
        self.transmission > 0.0
    }

    /// Clamp every parameter into its working range. Non-finite values fall
    /// back to the default for that parameter.
    pub fn clamped(mut self) -> Self {
        let d = Self::default();
        self.roughness = clamp_or(self.roughness, 0.0, 1.0, d.roughness);
        self.metalness = clamp_or(self.metalness, 0.0, 1.0, d.metalness);
        self.transmission = clamp_or(self.transmission, 0.0, 1.0, d.transmission);
        self.ior = clamp_or(self.ior, 1.0, 2.3, d.ior);
        self.thickness = clamp_or(self.thickness, 0.0, 5.0, d.thickness);
        self
    }
}

fn clamp_or(v: f32, lo: f32, hi: f32, fallback: f32) -> f32 {
    if v.is_finite() { v.clamp(lo, hi) } else { fallback }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/material.rs"]
mod tests;
