//! Error types shared across the editor.

use thiserror::Error;

/// Image decoding errors reported by an [`ImageDecoder`](crate::loader::ImageDecoder).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("No image data")]
    Empty,
    #[error("Unsupported image format")]
    Unsupported,
    #[error("Malformed image: {0}")]
    Malformed(String),
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Editor operation errors.
///
/// None of these are fatal: the scene and selection stay in their last valid
/// state whenever an operation returns one.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Image could not be decoded: {0}")]
    Decode(#[from] DecodeError),
    #[error("Invalid geometry: {width}x{height}")]
    InvalidGeometry { width: f64, height: f64 },
    #[error("No elements selected")]
    EmptySelection,
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
