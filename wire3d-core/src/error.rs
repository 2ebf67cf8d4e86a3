/// Error types for scene construction and rendering
use thiserror::Error;

/// Errors raised by wire3d operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("edge ({0}, {1}) references a vertex outside 0..{2}")]
    EdgeOutOfRange(usize, usize, usize),

    #[error("display surface error: {0}")]
    Surface(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type alias for wire3d operations
pub type Result<T> = std::result::Result<T, Error>;

/// Reject sizes and radii that are not strictly positive finite numbers
pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(name, format!("expected a positive finite value, got {value}")))
    }
}
