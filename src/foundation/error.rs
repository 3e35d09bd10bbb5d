/// Convenience result type used across relievo.
pub type RelievoResult<T> = Result<T, RelievoError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Empty-but-valid inputs are not errors: an SVG that parses but contains no
/// fillable shapes yields an empty model, and degenerate geometry is built
/// best-effort rather than rejected.
#[derive(thiserror::Error, Debug)]
pub enum RelievoError {
    /// The vector input could not be parsed into any path data.
    #[error("svg error: {0}")]
    Svg(String),

    /// Invalid caller-provided value objects or parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Internal mesh buffer or layout contract violations.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Errors while executing the scene pass or the effect chain.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RelievoError {
    /// Build a [`RelievoError::Svg`] value.
    pub fn svg(msg: impl Into<String>) -> Self {
        Self::Svg(msg.into())
    }

    /// Build a [`RelievoError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RelievoError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`RelievoError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
