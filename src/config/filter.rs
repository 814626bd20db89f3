//! Filter settings module.
//!
//! File and environment representation of the filter's sizing, converted into a
//! [`KonaBloomFilterConfig`] before construction.

use super::{ConfigResult, Validate};
use crate::data_structures::kona_bloom_filter::{
    KonaBloomFilterConfig, KonaBloomFilterError, DEFAULT_HASH_FUNCTIONS,
};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Filter settings.
///
/// When `bit_vector_length` is set the filter is built unsized with exactly that
/// length, and the two sizing fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterSettings {
    /// Expected number of elements
    pub expected_elements: usize,

    /// Target false positive probability, exclusive range (0.0, 1.0)
    pub false_positive_probability: f64,

    /// Explicit bit vector length for an unsized filter
    pub bit_vector_length: Option<usize>,

    /// Number of hash methods
    pub hash_functions: usize,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            expected_elements: 100_000,
            false_positive_probability: 0.01,
            bit_vector_length: None,
            hash_functions: DEFAULT_HASH_FUNCTIONS,
        }
    }
}

impl FilterSettings {
    /// Convert into the filter's builder configuration.
    pub fn to_filter_config(&self) -> KonaBloomFilterConfig {
        let config = KonaBloomFilterConfig::new().with_hash_functions(self.hash_functions);
        match self.bit_vector_length {
            Some(length) => config.with_bit_vector_length(length),
            None => config
                .with_expected_elements(self.expected_elements)
                .with_false_positive_probability(self.false_positive_probability),
        }
    }
}

impl Validate for FilterSettings {
    fn validate(&self) -> ConfigResult<()> {
        self.to_filter_config()
            .validate()
            .map_err(|e| match e {
                KonaBloomFilterError::InvalidConfiguration(message) => {
                    ConfigError::ValueOutOfRange {
                        key: "filter".to_string(),
                        message,
                    }
                }
                other => ConfigError::ValidationError(other.to_string()),
            })
    }
}
