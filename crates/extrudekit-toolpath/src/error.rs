//! Error types for toolpath generation.
//!
//! Generation either returns a complete program or one of these errors;
//! a partially built program is never handed back to the caller.

use extrudekit_core::GeometryError;
use extrudekit_settings::SettingsError;
use thiserror::Error;

/// Errors that can occur while generating a toolpath.
#[derive(Error, Debug)]
pub enum ToolpathError {
    /// The requested mode does not name a pattern.
    #[error("Unknown mode '{0}' (expected line, plane or cube)")]
    UnknownMode(String),

    /// Iterations are numbered from 1.
    #[error("Invalid iteration {0}: iterations start at 1")]
    InvalidIteration(u32),

    /// Shape parameters that cannot produce a printable toolpath.
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// Settings could not be resolved or failed validation.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

impl From<GeometryError> for ToolpathError {
    fn from(err: GeometryError) -> Self {
        Self::InvalidShape(err.to_string())
    }
}

impl ToolpathError {
    /// True for errors caused by how generation was invoked rather than by
    /// the settings or geometry themselves.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::UnknownMode(_) | Self::InvalidIteration(_))
    }
}

/// Result type alias for toolpath operations.
pub type ToolpathResult<T> = Result<T, ToolpathError>;
