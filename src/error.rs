//! Crate-level error types.

use std::fmt;

use crate::camera::CameraError;
use crate::shader::ShaderError;

/// Errors produced by the glkit crate.
#[derive(Debug)]
pub enum GlkitError {
    /// Shader compilation, validation or linking failure.
    Shader(ShaderError),
    /// Invalid camera configuration.
    Camera(CameraError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for GlkitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shader(e) => write!(f, "shader error: {e}"),
            Self::Camera(e) => write!(f, "camera error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for GlkitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Shader(e) => Some(e),
            Self::Camera(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::OptionsParse(_) => None,
        }
    }
}

impl From<ShaderError> for GlkitError {
    fn from(e: ShaderError) -> Self {
        Self::Shader(e)
    }
}

impl From<CameraError> for GlkitError {
    fn from(e: CameraError) -> Self {
        Self::Camera(e)
    }
}

impl From<std::io::Error> for GlkitError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
