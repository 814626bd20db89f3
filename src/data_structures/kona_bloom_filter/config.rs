// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration and sizing model for the Kona Bloom Filter.

use std::f64::consts::LN_2;

use crate::data_structures::kona_bloom_filter::bitvec::DEFAULT_BIT_VECTOR_LENGTH;
use crate::data_structures::kona_bloom_filter::error::{KonaBloomFilterError, Result};

/// Number of hash methods used unless configured otherwise.
pub const DEFAULT_HASH_FUNCTIONS: usize = 2;

/// Upper bound reported by [`KonaBloomFilterConfig::calculate_optimal_hash_functions`].
const MAX_OPTIMAL_HASH_FUNCTIONS: usize = 20;

/// Configuration for the Kona Bloom Filter.
///
/// A filter is either *sized*, when both the expected number of elements `n` and the
/// target false positive probability `p` are given, or *unsized*, in which case it
/// uses an explicit or default bit vector length and makes no accuracy promise.
///
/// The number of hash functions is fixed by configuration (2 by default) and is not
/// derived from `(n, p)`. The sizing formula assumes the optimal count, so when `p` is
/// small the realized false positive rate will be above the target. See
/// [`KonaBloomFilterConfig::calculate_optimal_hash_functions`] for the count the
/// formula has in mind.
#[derive(Debug, Clone, PartialEq)]
pub struct KonaBloomFilterConfig {
    /// Design capacity `n`
    expected_elements: Option<usize>,

    /// Target false positive probability `p`, in (0, 1)
    false_positive_probability: Option<f64>,

    /// Explicit length for unsized filters
    bit_vector_length: Option<usize>,

    /// Number of hash methods `k`
    hash_functions: usize,
}

impl KonaBloomFilterConfig {
    /// Create a new default configuration.
    ///
    /// Default values:
    /// - expected_elements: None (unsized)
    /// - false_positive_probability: None (unsized)
    /// - bit_vector_length: None ([`DEFAULT_BIT_VECTOR_LENGTH`] bits)
    /// - hash_functions: 2
    pub fn new() -> Self {
        Self {
            expected_elements: None,
            false_positive_probability: None,
            bit_vector_length: None,
            hash_functions: DEFAULT_HASH_FUNCTIONS,
        }
    }

    /// Shorthand for a sized configuration with `n` elements and probability `p`.
    pub fn sized(expected_elements: usize, false_positive_probability: f64) -> Self {
        Self::new()
            .with_expected_elements(expected_elements)
            .with_false_positive_probability(false_positive_probability)
    }

    /// Set the expected number of elements the filter is designed to hold.
    pub fn with_expected_elements(mut self, expected_elements: usize) -> Self {
        self.expected_elements = Some(expected_elements);
        self
    }

    /// Set the target false positive probability, exclusive range (0.0, 1.0).
    pub fn with_false_positive_probability(mut self, probability: f64) -> Self {
        self.false_positive_probability = Some(probability);
        self
    }

    /// Set an explicit bit vector length. Only valid for unsized filters.
    pub fn with_bit_vector_length(mut self, length: usize) -> Self {
        self.bit_vector_length = Some(length);
        self
    }

    /// Set the number of hash methods.
    pub fn with_hash_functions(mut self, hash_functions: usize) -> Self {
        self.hash_functions = hash_functions;
        self
    }

    /// Check the configuration, returning the first problem found.
    pub fn validate(&self) -> Result<()> {
        self.calculate_bit_vector_length().map(|_| ())
    }

    /// Whether both sizing parameters were supplied.
    pub fn is_sized(&self) -> bool {
        self.expected_elements.is_some() && self.false_positive_probability.is_some()
    }

    /// Calculate the bit vector length this configuration describes.
    ///
    /// For sized configurations this is `m = ceil(-n * ln(p) / ln(2)^2)`, never below 1.
    ///
    /// # Errors
    ///
    /// Returns [`KonaBloomFilterError::InvalidConfiguration`] when the configuration
    /// is inconsistent or out of range.
    pub fn calculate_bit_vector_length(&self) -> Result<usize> {
        if self.hash_functions == 0 {
            return Err(invalid("number of hash functions must be greater than 0"));
        }

        match (
            self.expected_elements,
            self.false_positive_probability,
            self.bit_vector_length,
        ) {
            (Some(n), Some(p), None) => optimal_bit_vector_length(n, p),
            (Some(_), Some(_), Some(_)) => Err(invalid(
                "an explicit bit vector length cannot be combined with expected elements and false positive probability",
            )),
            (Some(_), None, _) | (None, Some(_), _) => Err(invalid(
                "expected elements and false positive probability must be provided together",
            )),
            (None, None, Some(0)) => Err(invalid("bit vector length must be greater than 0")),
            (None, None, length) => Ok(length.unwrap_or(DEFAULT_BIT_VECTOR_LENGTH)),
        }
    }

    /// Number of hash functions that would minimize the false positive rate.
    ///
    /// Uses `k = round(m / n * ln 2)`, clamped to `[1, 20]`. Only reported; the filter
    /// always uses [`KonaBloomFilterConfig::hash_functions`]. `None` for unsized or
    /// invalid configurations.
    pub fn calculate_optimal_hash_functions(&self) -> Option<usize> {
        let n = self.expected_elements?;
        // Partial sizing fails here, so `n` below always comes with a `p`.
        let m = self.calculate_bit_vector_length().ok()?;
        let k = (m as f64 / n as f64) * LN_2;
        Some((k.round() as usize).clamp(1, MAX_OPTIMAL_HASH_FUNCTIONS))
    }

    /// Design capacity, if sized.
    pub fn expected_elements(&self) -> Option<usize> {
        self.expected_elements
    }

    /// Target false positive probability, if sized.
    pub fn false_positive_probability(&self) -> Option<f64> {
        self.false_positive_probability
    }

    /// Number of hash methods.
    pub fn hash_functions(&self) -> usize {
        self.hash_functions
    }
}

impl Default for KonaBloomFilterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Bit vector length for `n` elements at false positive probability `p`.
///
/// # Errors
///
/// Returns [`KonaBloomFilterError::InvalidConfiguration`] if `n` is zero, `p` is not in
/// (0, 1), or the result does not fit in memory addressing.
pub fn optimal_bit_vector_length(expected_elements: usize, probability: f64) -> Result<usize> {
    if expected_elements == 0 {
        return Err(invalid("expected elements must be greater than 0"));
    }
    // Written this way so NaN is rejected too.
    if !(probability > 0.0 && probability < 1.0) {
        return Err(invalid(&format!(
            "false positive probability must be between 0.0 and 1.0 exclusive, got {probability}"
        )));
    }

    let n = expected_elements as f64;
    let m = (-(n * probability.ln()) / (LN_2 * LN_2)).ceil();
    if !m.is_finite() || m >= usize::MAX as f64 {
        return Err(invalid(&format!(
            "bit vector length for {expected_elements} elements at {probability} is too large"
        )));
    }

    Ok((m as usize).max(1))
}

/// Expected false positive rate `(1 - e^(-k * inserted / m))^k` for a filter of
/// `length` bits and `hash_functions` methods holding `inserted` elements.
pub fn estimate_false_positive_rate(hash_functions: usize, inserted: usize, length: usize) -> f64 {
    if length == 0 {
        return 1.0;
    }
    let k = hash_functions as f64;
    let fill = 1.0 - (-k * inserted as f64 / length as f64).exp();
    fill.powf(k)
}

fn invalid(message: &str) -> KonaBloomFilterError {
    KonaBloomFilterError::InvalidConfiguration(message.to_string())
}
