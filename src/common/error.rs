//! Error types for primitive_designer

use thiserror::Error;

/// Main error type for the designer
#[derive(Debug, Error)]
pub enum DesignerError {
    /// Invalid configuration value (bin count, extent, viewport, ...)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Zero-length segment has no defined heading
    #[error("Degenerate segment: head and tail coincide")]
    DegenerateSegment,
    /// Operation not allowed in the current edit mode
    #[error("Mode violation: {0}")]
    ModeViolation(String),
    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(String),
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Visualization error
    #[error("Visualization error: {0}")]
    Visualization(String),
}

/// Result type alias for designer operations
pub type DesignerResult<T> = Result<T, DesignerError>;
