use thiserror::Error;

/// Errors raised by the per-frame tracking core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    /// The frame has the wrong rank, no pixels, or is too small for the
    /// requested mode.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// A configuration value is out of range.
    #[error("invalid tracker config: {0}")]
    InvalidConfig(String),

    /// The external point detector failed or returned a malformed estimate.
    #[error("detection backend error: {0}")]
    DetectionBackend(String),
}
