//! Test modules for the Kona Bloom crate.
//!
//! This module contains crate-internal test suites:
//! - Property-based tests for the filter's guarantees using proptest
//! - Configuration loading tests against real files and environment overrides
//! - Error conversion and display tests
//! - Shared fixtures and strategies

pub mod error_tests;
pub mod test_utils;
