pub(crate) mod bloom;
pub(crate) mod blur;
pub(crate) mod chain;
pub(crate) mod config;
pub(crate) mod pixelate;
pub(crate) mod rgb_shift;
pub(crate) mod scanlines;
