//! Kona Bloom Library
//!
//! An embeddable probabilistic membership filter: insert byte-string keys, then ask
//! whether a key is possibly present or definitely absent. Intended as a cheap
//! pre-check in front of an expensive exact lookup.
//!
//! # Architecture
//!
//! - [`data_structures::kona_bloom_filter`]: the filter, its bit vector and hash methods
//! - [`config`]: file and environment settings for building a filter
//! - [`error`]: crate-wide error type
//! - [`logging`]: `tracing` subscriber setup for binaries and tests

pub mod config;
pub mod data_structures;
pub mod error;
pub mod logging;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for the Kona Bloom crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build a filter from loaded settings.
///
/// # Errors
///
/// Returns [`error::KonaError::Filter`] if the settings describe an invalid filter.
pub fn build_filter(
    settings: &config::FilterSettings,
) -> error::KonaResult<data_structures::KonaBloomFilter> {
    let filter = data_structures::KonaBloomFilter::with_config(settings.to_filter_config())?;
    Ok(filter)
}
