//! Boundary errors
//!
//! The simulation and compiler are infallible; these only surface where
//! untrusted input enters (JSON, CLI arguments, files).

use thiserror::Error;

/// Errors raised while decoding input or validating configuration.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },

    #[error("Malformed calendar: {0}")]
    Calendar(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        SceneError::Serialization(err.to_string())
    }
}

/// Reject non-finite or negative canvas sizes before they reach the core
pub fn check_dimensions(width: f32, height: f32) -> Result<(), SceneError> {
    if width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0 {
        Ok(())
    } else {
        Err(SceneError::InvalidDimensions { width, height })
    }
}
