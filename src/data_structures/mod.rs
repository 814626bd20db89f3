//! Data structures for the Kona Bloom crate.
//!
//! This module contains the probabilistic membership filter and its supporting
//! pieces. All implementations adhere to the project requirements:
//! - No unsafe code
//! - Explicit error propagation, no panics on caller input
//! - Single-owner mutation; sharing is the caller's decision

pub mod kona_bloom_filter;

// Re-export common data structures
pub use kona_bloom_filter::{KonaBloomFilter, KonaBloomFilterConfig, KonaBloomFilterError};
