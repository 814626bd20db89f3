//! Error module for the Kona Bloom crate.
//!
//! Each component defines its own error enum; [`KonaError`] gathers them for callers
//! that cross component boundaries, such as configuration loading followed by filter
//! construction.

use thiserror::Error;

use crate::data_structures::kona_bloom_filter::KonaBloomFilterError;

pub mod config;

/// Result type alias used throughout the crate.
pub type KonaResult<T> = Result<T, KonaError>;

/// Core error enum for the Kona Bloom crate.
#[derive(Error, Debug)]
pub enum KonaError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors raised by the filter itself.
    #[error("Filter error: {0}")]
    Filter(#[from] KonaBloomFilterError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/Deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_error_conversion() {
        fn build() -> KonaResult<()> {
            let validated: Result<(), KonaBloomFilterError> = Err(
                KonaBloomFilterError::InvalidConfiguration("zero elements".to_string()),
            );
            validated?;
            Ok(())
        }

        let err = build().unwrap_err();
        assert!(matches!(err, KonaError::Filter(_)));
        assert_eq!(
            err.to_string(),
            "Filter error: Invalid filter configuration: zero elements"
        );
    }
}
