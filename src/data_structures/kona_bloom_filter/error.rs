// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the Kona Bloom Filter.

/// Errors that can occur in Kona Bloom Filter operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum KonaBloomFilterError {
    /// The filter has an invalid configuration
    #[error("Invalid filter configuration: {0}")]
    InvalidConfiguration(String),

    /// A bit vector was addressed outside `[0, length)`
    #[error("Bit index {index} is out of range for a bit vector of length {length}")]
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// Length of the bit vector
        length: usize,
    },

    /// An operation needed state the filter does not have
    #[error("Bloom filter not initialized: {0}")]
    NotInitialized(String),

    /// An element could not be encoded into key bytes
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type for Kona Bloom Filter operations
pub type Result<T> = std::result::Result<T, KonaBloomFilterError>;
