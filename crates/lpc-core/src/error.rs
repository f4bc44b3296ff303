//! Error handling for the codec library
//!
//! This module defines the error types that can occur during analysis,
//! synthesis and bitstream operations, providing detailed information
//! for debugging and error recovery.

#![allow(missing_docs)]

use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, LpcError>;

/// Error type for codec operations
#[derive(Error, Debug)]
pub enum LpcError {
    /// Invalid encoder configuration
    #[error("Invalid encoder configuration: {details}")]
    InvalidConfig { details: String },

    /// Invalid audio format
    #[error("Invalid audio format: {details}")]
    InvalidFormat { details: String },

    /// Invalid sample rate
    #[error("Invalid sample rate: {rate}Hz (minimum {min}Hz)")]
    InvalidSampleRate { rate: u32, min: u32 },

    /// Invalid channel count
    #[error("Invalid channel count: {channels} (supported: {supported:?})")]
    InvalidChannelCount { channels: u32, supported: Vec<u32> },

    /// Encoding operation failed
    #[error("Encoding failed: {reason}")]
    EncodingFailed { reason: String },

    /// Decoding operation failed
    #[error("Decoding failed: {reason}")]
    DecodingFailed { reason: String },
}

impl LpcError {
    /// Create a new invalid configuration error
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }

    /// Create a new invalid format error
    pub fn invalid_format(details: impl Into<String>) -> Self {
        Self::InvalidFormat {
            details: details.into(),
        }
    }

    /// Create a new encoding failed error
    pub fn encoding_failed(reason: impl Into<String>) -> Self {
        Self::EncodingFailed {
            reason: reason.into(),
        }
    }

    /// Create a new decoding failed error
    pub fn decoding_failed(reason: impl Into<String>) -> Self {
        Self::DecodingFailed {
            reason: reason.into(),
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Configuration and format errors are not recoverable
            Self::InvalidConfig { .. }
            | Self::InvalidFormat { .. }
            | Self::InvalidSampleRate { .. }
            | Self::InvalidChannelCount { .. } => false,

            // Operational errors may be recoverable
            Self::EncodingFailed { .. } | Self::DecodingFailed { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LpcError::invalid_config("test message");
        assert!(matches!(err, LpcError::InvalidConfig { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let err = LpcError::InvalidSampleRate {
            rate: 4000,
            min: 8000,
        };
        let display = format!("{}", err);
        assert!(display.contains("4000"));
        assert!(display.contains("8000"));
    }

    #[test]
    fn test_error_recoverability() {
        assert!(LpcError::encoding_failed("test").is_recoverable());
        assert!(!LpcError::invalid_format("test").is_recoverable());
    }
}
