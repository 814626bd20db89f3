//! Tests for the error module.
//!
//! This module contains tests for error handling and error types.

use crate::config::FilterSettings;
use crate::data_structures::kona_bloom_filter::{BitVectorStore, KonaBloomFilterError};
use crate::error::config::ConfigError;
use crate::error::{KonaError, KonaResult};

/// Test that nested errors keep their message.
#[test]
fn test_nested_errors() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let kona_error = KonaError::Io(io_error);

    let error_string = format!("{kona_error}");
    assert!(error_string.contains("file not found"));
}

/// Test that an out-of-range store access surfaces through `?`.
#[test]
fn test_out_of_range_propagates() {
    fn read_past_end() -> KonaResult<bool> {
        let store = BitVectorStore::new(4);
        Ok(store.get(4)?)
    }

    let err = read_past_end().unwrap_err();
    assert!(matches!(
        err,
        KonaError::Filter(KonaBloomFilterError::IndexOutOfRange {
            index: 4,
            length: 4
        })
    ));
}

/// Test that invalid settings surface as filter errors when building.
#[test]
fn test_build_filter_error() {
    let settings = FilterSettings {
        expected_elements: 0,
        ..Default::default()
    };
    let err = crate::build_filter(&settings).unwrap_err();
    assert!(matches!(
        err,
        KonaError::Filter(KonaBloomFilterError::InvalidConfiguration(_))
    ));
}

/// Test configuration error display and conversion.
#[test]
fn test_config_error_conversion() {
    let err: KonaError = ConfigError::ValidationError("Invalid log level: loud".to_string()).into();
    assert_eq!(
        err.to_string(),
        "Configuration error: Configuration validation error: Invalid log level: loud"
    );
}

/// Test that serde_json failures convert.
#[test]
fn test_serialization_error_conversion() {
    let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
    let err = KonaError::from(json_err);
    assert!(matches!(err, KonaError::Serialization(_)));
}
