// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Fixed-length bit vector backing the Kona Bloom Filter.
//!
//! Bits are packed into 64-bit words, bit `i` living in word `i / 64` at position
//! `i % 64`. Trailing bits of the last word are never addressable and always zero.

use crate::data_structures::kona_bloom_filter::error::{KonaBloomFilterError, Result};

/// Length used when a store is created without an explicit size.
pub const DEFAULT_BIT_VECTOR_LENGTH: usize = 1024;

const WORD_BITS: usize = 64;

/// A fixed-length array of single-bit flags, all initially unset.
///
/// Cloning produces a deep copy with independent storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitVectorStore {
    words: Vec<u64>,
    length: usize,
}

impl BitVectorStore {
    /// Allocate a store of `length` bits, all unset.
    pub fn new(length: usize) -> Self {
        Self {
            words: vec![0; length.div_ceil(WORD_BITS)],
            length,
        }
    }

    /// Allocate a store of `length` bits, reporting allocation failure instead of
    /// aborting.
    ///
    /// # Errors
    ///
    /// Returns [`KonaBloomFilterError::InvalidConfiguration`] if the words for `length`
    /// bits cannot be reserved.
    pub fn try_new(length: usize) -> Result<Self> {
        let word_count = length.div_ceil(WORD_BITS);
        let mut words = Vec::new();
        words.try_reserve_exact(word_count).map_err(|e| {
            KonaBloomFilterError::InvalidConfiguration(format!(
                "cannot allocate a bit vector of {length} bits: {e}"
            ))
        })?;
        words.resize(word_count, 0);
        Ok(Self { words, length })
    }

    /// Number of addressable bits.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether the store has no addressable bits.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Read the bit at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`KonaBloomFilterError::IndexOutOfRange`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<bool> {
        self.check_bounds(index)?;
        Ok(self.test(index))
    }

    /// Set the bit at `index`, returning `true` if it was previously unset.
    ///
    /// Setting a bit that is already set leaves the store unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`KonaBloomFilterError::IndexOutOfRange`] if `index >= len()`.
    pub fn set(&mut self, index: usize) -> Result<bool> {
        self.check_bounds(index)?;
        Ok(self.test_and_set(index))
    }

    /// Reset every bit to zero in place.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Unchecked read; `index` must be below `len()`.
    #[inline]
    pub(crate) fn test(&self, index: usize) -> bool {
        self.words[index / WORD_BITS] & (1u64 << (index % WORD_BITS)) != 0
    }

    /// Unchecked set; `index` must be below `len()`.
    #[inline]
    pub(crate) fn test_and_set(&mut self, index: usize) -> bool {
        let mask = 1u64 << (index % WORD_BITS);
        let word = &mut self.words[index / WORD_BITS];
        let was_unset = *word & mask == 0;
        *word |= mask;
        was_unset
    }

    fn check_bounds(&self, index: usize) -> Result<()> {
        if index >= self.length {
            return Err(KonaBloomFilterError::IndexOutOfRange {
                index,
                length: self.length,
            });
        }
        Ok(())
    }
}

impl Default for BitVectorStore {
    fn default() -> Self {
        Self::new(DEFAULT_BIT_VECTOR_LENGTH)
    }
}
