use thiserror::Error;

/// Errors produced while validating inputs or assembling a system.
///
/// Numerical evaluation itself never fails once the inputs have been
/// accepted; everything here is caught up front.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpeakerError {
    /// A driver parameter is outside its physical range.
    #[error("driver parameter {name} = {value} is invalid: {constraint}")]
    InvalidDriver {
        name: &'static str,
        value: f64,
        constraint: &'static str,
    },

    /// An enclosure parameter is outside its physical range.
    #[error("enclosure: {0}")]
    InvalidEnclosure(String),

    /// A horn segment has impossible geometry.
    #[error("horn segment {index}: {reason}")]
    InvalidSegment { index: usize, reason: String },

    /// A requested frequency or sweep configuration cannot be
    /// evaluated.
    #[error("sweep: {0}")]
    InvalidSweep(String),
}

impl SpeakerError {
    pub fn is_invalid_driver(&self) -> bool {
        matches!(self, SpeakerError::InvalidDriver { .. })
    }
}

pub type Result<T> = std::result::Result<T, SpeakerError>;
