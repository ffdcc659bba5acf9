//! Error types for flows2fim.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using FimError.
pub type FimResult<T> = Result<T, FimError>;

/// Primary error type for composing a flood-inundation mosaic.
#[derive(Debug, Error)]
pub enum FimError {
    // === Control table errors ===
    #[error("Failed to read controls file {}: {message}", path.display())]
    Read { path: PathBuf, message: String },

    #[error("Invalid controls file {}: {message}", path.display())]
    Shape { path: PathBuf, message: String },

    // === Tool errors ===
    #[error("{tool} is not available. Please install GDAL and ensure {tool} is in your PATH")]
    MissingTool { tool: String },

    #[error("{tool} failed ({status}): {stderr}")]
    ExternalTool {
        tool: String,
        status: String,
        stderr: String,
    },

    // === Output errors ===
    #[error("Requested format not supported: {0} (expected VRT, COG or GTIFF)")]
    UnsupportedFormat(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl FimError {
    /// Create a Read error for the given controls file.
    pub fn read(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Read {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a Shape error for the given controls file.
    pub fn shape(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Shape {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a MissingTool error.
    pub fn missing_tool(tool: impl Into<String>) -> Self {
        Self::MissingTool { tool: tool.into() }
    }

    /// Wrap an I/O error with a description of what was being attempted.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Short machine-friendly name of the error kind, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FimError::Read { .. } => "read",
            FimError::Shape { .. } => "shape",
            FimError::MissingTool { .. } => "missing_tool",
            FimError::ExternalTool { .. } => "external_tool",
            FimError::UnsupportedFormat(_) => "unsupported_format",
            FimError::Io { .. } => "io",
        }
    }
}
