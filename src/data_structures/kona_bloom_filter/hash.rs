// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Hashing utilities for Kona Bloom Filter.
//!
//! The filter treats each hash method as an independent trial: every method maps the
//! key bytes to a 32-bit value, and that value modulo the bit vector length selects
//! one bit. Two algorithms with unrelated mixing strategies are provided, MurmurHash3
//! (x86, 32-bit) and FNV-1a, so the two default indices are not correlated.

use std::fmt;
use std::hash::Hasher;
use std::sync::Arc;

/// A deterministic mapping from a byte sequence to a 32-bit value.
///
/// Implementations must be pure: hashing the same bytes twice returns the same value.
pub trait HashMethod: Send + Sync {
    /// Stable name of the algorithm, used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Hash `bytes` to a 32-bit value.
    fn hash(&self, bytes: &[u8]) -> u32;
}

const MURMUR_C1: u32 = 0xcc9e_2d51;
const MURMUR_C2: u32 = 0x1b87_3593;

/// MurmurHash3, x86 32-bit variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Murmur3Hash {
    seed: u32,
}

impl Murmur3Hash {
    /// Create a MurmurHash3 method with the given seed.
    pub fn with_seed(seed: u32) -> Self {
        Self { seed }
    }

    /// The seed mixed into every hash.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl HashMethod for Murmur3Hash {
    fn name(&self) -> &str {
        "murmur3-32"
    }

    fn hash(&self, bytes: &[u8]) -> u32 {
        let mut h = self.seed;

        let mut blocks = bytes.chunks_exact(4);
        for block in &mut blocks {
            let k = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
            h ^= mix_k(k);
            h = h.rotate_left(13);
            h = h.wrapping_mul(5).wrapping_add(0xe654_6b64);
        }

        let tail = blocks.remainder();
        if !tail.is_empty() {
            let k = tail
                .iter()
                .enumerate()
                .fold(0u32, |acc, (i, &b)| acc | (u32::from(b) << (8 * i)));
            h ^= mix_k(k);
        }

        // Length is folded in modulo 2^32, as the reference algorithm does.
        h ^= bytes.len() as u32;
        fmix32(h)
    }
}

#[inline]
fn mix_k(k: u32) -> u32 {
    k.wrapping_mul(MURMUR_C1)
        .rotate_left(15)
        .wrapping_mul(MURMUR_C2)
}

#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// FNV-1a over the key bytes, 64-bit state xor-folded down to 32 bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fnv1aHash;

impl HashMethod for Fnv1aHash {
    fn name(&self) -> &str {
        "fnv1a-32"
    }

    fn hash(&self, bytes: &[u8]) -> u32 {
        let mut hasher = fnv::FnvHasher::default();
        hasher.write(bytes);
        let h = hasher.finish();
        ((h >> 32) ^ h) as u32
    }
}

/// Build the standard set of `count` hash methods.
///
/// Position 0 is MurmurHash3 with seed 0 and position 1 is FNV-1a. Any further
/// positions are MurmurHash3 seeded with their position. Seeds are 32-bit, so
/// positions past `u32::MAX` all share the seed `u32::MAX`.
pub fn default_hash_methods(count: usize) -> Vec<Arc<dyn HashMethod>> {
    (0..count)
        .map(|position| -> Arc<dyn HashMethod> {
            match position {
                0 => Arc::new(Murmur3Hash::default()),
                1 => Arc::new(Fnv1aHash),
                n => Arc::new(Murmur3Hash::with_seed(position_seed(n))),
            }
        })
        .collect()
}

fn position_seed(position: usize) -> u32 {
    u32::try_from(position).unwrap_or(u32::MAX)
}

/// A trait for computing one bit index per hash method from a single key.
pub(crate) trait MultiHasher {
    /// Number of indices produced per key.
    fn hash_count(&self) -> usize;

    /// Compute `hash_i(key) mod length` for every method, in method order.
    ///
    /// `length` must be non-zero.
    fn compute_indices(&self, key: &[u8], length: usize) -> Vec<usize>;
}

/// The ordered, immutable collection of hash methods owned by one filter.
///
/// Cloning shares the underlying methods, which carry no mutable state.
#[derive(Clone)]
pub(crate) struct HashMethodSet {
    methods: Vec<Arc<dyn HashMethod>>,
}

impl HashMethodSet {
    pub(crate) fn new(methods: Vec<Arc<dyn HashMethod>>) -> Self {
        Self { methods }
    }

    /// Names of the methods, in probe order.
    pub(crate) fn names(&self) -> Vec<String> {
        self.methods.iter().map(|m| m.name().to_string()).collect()
    }
}

impl MultiHasher for HashMethodSet {
    fn hash_count(&self) -> usize {
        self.methods.len()
    }

    fn compute_indices(&self, key: &[u8], length: usize) -> Vec<usize> {
        self.methods
            .iter()
            .map(|method| method.hash(key) as usize % length)
            .collect()
    }
}

impl fmt::Debug for HashMethodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.methods.iter().map(|m| m.name()))
            .finish()
    }
}
