/// Bloom pass uniforms.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BloomParams {
    /// Additive intensity of the blurred highlights.
    pub strength: f32,
    /// Gaussian blur radius in pixels.
    pub radius_px: u32,
    /// Luma threshold in `[0, 1]`; only brighter pixels bloom.
    pub threshold: f32,
}

impl Default for BloomParams {
    fn default() -> Self {
        Self {
            strength: 0.6,
            radius_px: 8,
            threshold: 0.75,
        }
    }
}

/// RGB-shift (chromatic aberration) uniforms.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RgbShiftParams {
    /// Channel offset as a fraction of the frame width.
    pub amount: f32,
    /// Offset direction in radians; 0 shifts along +X.
    pub angle: f32,
}

impl Default for RgbShiftParams {
    fn default() -> Self {
        Self {
            amount: 0.005,
            angle: 0.0,
        }
    }
}

/// Pixelation uniforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PixelateParams {
    /// Square block edge in pixels; 1 or 0 is a no-op.
    pub block_size: u32,
}

impl Default for PixelateParams {
    fn default() -> Self {
        Self { block_size: 6 }
    }
}

/// Scan-line uniforms.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScanLineParams {
    /// Stripe frequency in radians per row.
    pub density: f32,
}

impl Default for ScanLineParams {
    fn default() -> Self {
        Self { density: 1.2 }
    }
}

/// Toggle state and uniforms for the whole post chain.
///
/// The chain order is fixed (bloom, RGB-shift, pixelation, scan-lines);
/// these flags only decide which passes run. `glitch` additionally drives
/// mesh distortion, and while distortion is active the RGB-shift pass runs
/// with time-driven uniforms regardless of `chromatic_aberration`.
#[derive(Clone, Copy, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    /// Enable the bloom pass.
    pub bloom: bool,
    /// Enable static RGB-shift.
    pub chromatic_aberration: bool,
    /// Enable the pixelation pass.
    pub pixelation: bool,
    /// Enable the scan-line pass.
    pub scan_lines: bool,
    /// Enable glitch distortion (and with it, driven RGB-shift).
    pub glitch: bool,
    /// Bloom uniforms.
    pub bloom_params: BloomParams,
    /// RGB-shift uniforms; under glitch these are the oscillation base.
    pub shift_params: RgbShiftParams,
    /// Pixelation uniforms.
    pub pixelate_params: PixelateParams,
    /// Scan-line uniforms.
    pub scan_params: ScanLineParams,
}
