// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Kona Bloom Filter for membership pre-checks.
//!
//! A space-efficient probabilistic set: it answers "possibly present" or "definitely
//! absent" for byte-string keys, trading a bounded false positive rate for far less
//! memory than an exact set. Typical use is skipping an expensive lookup when a key is
//! definitely absent.
//!
//! # Features
//!
//! - Sizing from expected element count and target false positive probability.
//! - Two independent hash methods by default (MurmurHash3 and FNV-1a), one bit each.
//! - No false negatives between clears.
//! - Typed elements through [`ToKeyBytes`] or any `serde::Serialize` value.
//!
//! # Example
//!
//! ```
//! use kona_bloom_lib::data_structures::kona_bloom_filter::{KonaBloomFilter, KonaBloomFilterConfig};
//!
//! // Size for 1,000 keys at a 1% target
//! let config = KonaBloomFilterConfig::new()
//!     .with_expected_elements(1_000)
//!     .with_false_positive_probability(0.01);
//! let mut filter = KonaBloomFilter::with_config(config).unwrap();
//!
//! filter.insert(b"hello");
//! assert!(filter.check(b"hello"));
//! ```
//!
//! # Skipping expensive lookups
//!
//! ```
//! use kona_bloom_lib::data_structures::kona_bloom_filter::KonaBloomFilter;
//!
//! struct Store {
//!     seen: KonaBloomFilter,
//!     // ... backing storage ...
//! }
//!
//! impl Store {
//!     fn get(&self, key: &str) -> Option<Vec<u8>> {
//!         if !self.seen.check_element(key) {
//!             // Definitely absent, no need to touch storage
//!             return None;
//!         }
//!         // Possibly present: do the real lookup
//!         None
//!     }
//! }
//! ```
//!
//! # Accuracy
//!
//! The bit vector length follows `m = ceil(-n ln(p) / ln(2)^2)`, which assumes the
//! optimal number of hash functions for `(n, p)`. The filter uses a fixed count (two
//! unless configured), so for small targets the realized rate at capacity is above
//! `p`. [`KonaBloomFilter::estimated_false_positive_rate`] reports the expected rate
//! for the actual configuration.

// Module declarations
mod bitvec;
mod config;
mod element;
mod error;
mod filter;
mod hash;

// Re-exports
pub use bitvec::{BitVectorStore, DEFAULT_BIT_VECTOR_LENGTH};
pub use config::{
    estimate_false_positive_rate, optimal_bit_vector_length, KonaBloomFilterConfig,
    DEFAULT_HASH_FUNCTIONS,
};
pub use element::ToKeyBytes;
pub use error::{KonaBloomFilterError, Result};
pub use filter::{FilterStats, KonaBloomFilter};
pub use hash::{default_hash_methods, Fnv1aHash, HashMethod, Murmur3Hash};
