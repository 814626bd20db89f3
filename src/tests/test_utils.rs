//! Test utilities and fixtures for the Kona Bloom crate.
//!
//! Reusable proptest strategies for filter keys and a fixture for tests that touch
//! the filesystem or the environment.

use proptest::prelude::*;
use proptest::strategy::{BoxedStrategy, Strategy};
use std::path::PathBuf;
use tempfile::TempDir;

use crate::data_structures::kona_bloom_filter::KonaBloomFilter;

/// Maximum key length for generated test data.
const MAX_KEY_LENGTH: usize = 64;

/// Maximum number of keys in a generated batch.
const MAX_BATCH_SIZE: usize = 200;

/// Design capacity used by [`sized_filter`].
pub const TEST_EXPECTED_ELEMENTS: usize = 1_000;

/// Target probability used by [`sized_filter`].
pub const TEST_FALSE_POSITIVE_PROBABILITY: f64 = 0.01;

/// A filter sized for [`TEST_EXPECTED_ELEMENTS`] at [`TEST_FALSE_POSITIVE_PROBABILITY`].
pub fn sized_filter() -> KonaBloomFilter {
    KonaBloomFilter::with_capacity(TEST_EXPECTED_ELEMENTS, TEST_FALSE_POSITIVE_PROBABILITY)
        .expect("test sizing is valid")
}

/// Generate arbitrary key bytes, including the empty key.
pub fn key_strategy() -> BoxedStrategy<Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..MAX_KEY_LENGTH).boxed()
}

/// Generate a non-empty batch of keys.
pub fn keys_strategy() -> BoxedStrategy<Vec<Vec<u8>>> {
    proptest::collection::vec(key_strategy(), 1..MAX_BATCH_SIZE).boxed()
}

/// Generate valid `(expected_elements, false_positive_probability)` pairs.
pub fn sizing_strategy() -> BoxedStrategy<(usize, f64)> {
    (1usize..100_000, 0.000_001f64..0.999_999).boxed()
}

/// Test fixture for tests that write files or set environment variables.
pub struct TestFixture {
    /// Temporary directory for test files
    pub temp_dir: TempDir,
    /// Environment variables to clean up after the test
    env_vars: Vec<String>,
}

impl TestFixture {
    /// Create a new test fixture.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
            env_vars: Vec::new(),
        })
    }

    /// Set an environment variable, removed again when the fixture is dropped.
    pub fn set_env<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        std::env::set_var(&key, value.into());
        self.env_vars.push(key);
    }

    /// Write `contents` to `name` inside the fixture directory.
    pub fn write_file<C: AsRef<[u8]>>(&self, name: &str, contents: C) -> std::io::Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

impl Drop for TestFixture {
    fn drop(&mut self) {
        for key in &self.env_vars {
            std::env::remove_var(key);
        }
    }
}
