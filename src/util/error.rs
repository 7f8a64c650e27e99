//! Error types for minutiae.

use thiserror::Error;

/// Result alias for minutiae operations.
pub type MinutiaeResult<T> = std::result::Result<T, MinutiaeError>;

/// Errors that can occur when building, storing or decoding templates.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MinutiaeError {
    /// Grid dimensions are zero or overflow.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Backing buffer length does not match `width * height`.
    #[error("buffer size mismatch: needed {needed}, got {got}")]
    BufferSizeMismatch { needed: usize, got: usize },
    /// A configuration value is out of range.
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },
    /// The declared template size is not `7 + 6 * n`.
    #[error("invalid template size {count}")]
    InvalidTemplateSize { count: f64 },
    /// A template text line could not be parsed.
    #[error("template parse error on line {line}: {reason}")]
    TemplateParse { line: usize, reason: String },
    /// The template text ended before `expected` slots were filled.
    #[error("template truncated: expected {expected} slots, got {got}")]
    TemplateTruncated { expected: usize, got: usize },
    /// Reading or writing a template file failed.
    #[error("io error: {reason}")]
    Io { reason: String },
    /// Failed to load or save an image via the `image` crate.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}

impl From<std::io::Error> for MinutiaeError {
    fn from(err: std::io::Error) -> Self {
        MinutiaeError::Io {
            reason: err.to_string(),
        }
    }
}

impl MinutiaeError {
    /// True for errors caused by the content of a template record rather than
    /// by reading it.
    pub fn is_malformed_template(&self) -> bool {
        matches!(
            self,
            MinutiaeError::InvalidTemplateSize { .. }
                | MinutiaeError::TemplateParse { .. }
                | MinutiaeError::TemplateTruncated { .. }
        )
    }
}
