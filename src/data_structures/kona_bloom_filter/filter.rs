// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Main implementation of the Kona Bloom Filter.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::data_structures::kona_bloom_filter::bitvec::BitVectorStore;
use crate::data_structures::kona_bloom_filter::config::{
    estimate_false_positive_rate, KonaBloomFilterConfig,
};
use crate::data_structures::kona_bloom_filter::element::{serialize_key, ToKeyBytes};
use crate::data_structures::kona_bloom_filter::error::{KonaBloomFilterError, Result};
use crate::data_structures::kona_bloom_filter::hash::{
    default_hash_methods, HashMethod, HashMethodSet, MultiHasher,
};

/// A Bloom filter for membership pre-checks.
///
/// Answers "possibly present" or "definitely absent" for byte-string keys using a
/// fixed-length bit vector and one bit per hash method. Keys are never removed
/// individually; [`KonaBloomFilter::clear`] resets the whole filter.
///
/// The filter is single-owner: mutation takes `&mut self`, and callers that share one
/// instance across threads must wrap it in their own lock. Use [`Clone`] (or
/// [`KonaBloomFilter::try_clone`]) to hand an independent copy to another owner.
///
/// # Examples
///
/// ```
/// use kona_bloom_lib::data_structures::kona_bloom_filter::KonaBloomFilter;
///
/// let mut filter = KonaBloomFilter::with_capacity(100, 0.01).unwrap();
/// filter.insert(b"hello");
///
/// assert!(filter.check(b"hello"));
/// assert_eq!(filter.bit_vector_length(), 959);
///
/// filter.clear();
/// assert!(!filter.check(b"hello"));
/// ```
#[derive(Clone)]
pub struct KonaBloomFilter {
    /// Configuration the filter was built from
    config: KonaBloomFilterConfig,

    /// Bit vector, sized once at construction
    store: BitVectorStore,

    /// Hash methods, one bit index per method
    hasher: HashMethodSet,

    /// Number of insert calls since construction or the last clear
    inserted: usize,
}

/// Point-in-time summary of a filter's sizing and load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterStats {
    /// Insert calls since construction or the last clear
    pub count: usize,
    /// Design capacity, if sized
    pub expected_elements: Option<usize>,
    /// Target false positive probability, if sized
    pub false_positive_probability: Option<f64>,
    /// Length of the bit vector
    pub bit_vector_length: usize,
    /// Hash methods in use
    pub hash_functions: usize,
    /// Hash method count that would minimize false positives, if sized
    pub optimal_hash_functions: Option<usize>,
    /// Bits currently set
    pub set_bits: usize,
    /// `set_bits / bit_vector_length`
    pub fill_ratio: f64,
    /// Expected false positive rate at the current count
    pub estimated_false_positive_rate: f64,
}

impl KonaBloomFilter {
    /// Create a filter with the default, unsized configuration.
    ///
    /// The bit vector gets the default length and two hash methods. No accuracy is
    /// promised; prefer [`KonaBloomFilter::with_capacity`] when the load is known.
    pub fn new() -> Self {
        let config = KonaBloomFilterConfig::default();
        let methods = default_hash_methods(config.hash_functions());
        warn!("Building Kona Bloom Filter without sizing; false positive rate is unbounded");
        Self::from_parts(config, BitVectorStore::default(), methods)
    }

    /// Create a filter sized for `expected_elements` at `false_positive_probability`.
    pub fn with_capacity(
        expected_elements: usize,
        false_positive_probability: f64,
    ) -> Result<Self> {
        Self::with_config(KonaBloomFilterConfig::sized(
            expected_elements,
            false_positive_probability,
        ))
    }

    /// Create a filter from a configuration, using the standard hash methods.
    ///
    /// # Errors
    ///
    /// Returns [`KonaBloomFilterError::InvalidConfiguration`] if the configuration does
    /// not validate.
    pub fn with_config(config: KonaBloomFilterConfig) -> Result<Self> {
        let methods = default_hash_methods(config.hash_functions());
        Self::with_hash_methods(config, methods)
    }

    /// Create a filter with caller-supplied hash methods.
    ///
    /// The number of methods must match the configured hash function count.
    ///
    /// # Errors
    ///
    /// Returns [`KonaBloomFilterError::InvalidConfiguration`] if the configuration does
    /// not validate, the method count disagrees with it, or the bit vector cannot be
    /// allocated.
    pub fn with_hash_methods(
        config: KonaBloomFilterConfig,
        methods: Vec<Arc<dyn HashMethod>>,
    ) -> Result<Self> {
        let length = config.calculate_bit_vector_length()?;
        if methods.len() != config.hash_functions() {
            return Err(KonaBloomFilterError::InvalidConfiguration(format!(
                "configured for {} hash functions but {} were supplied",
                config.hash_functions(),
                methods.len()
            )));
        }
        if !config.is_sized() {
            warn!(
                bit_vector_length = length,
                "Building Kona Bloom Filter without sizing; false positive rate is unbounded"
            );
        }
        let store = BitVectorStore::try_new(length)?;
        Ok(Self::from_parts(config, store, methods))
    }

    fn from_parts(
        config: KonaBloomFilterConfig,
        store: BitVectorStore,
        methods: Vec<Arc<dyn HashMethod>>,
    ) -> Self {
        let hasher = HashMethodSet::new(methods);
        debug!(
            bit_vector_length = store.len(),
            hash_functions = hasher.hash_count(),
            optimal_hash_functions = ?config.calculate_optimal_hash_functions(),
            hash_methods = ?hasher,
            "Kona Bloom Filter created"
        );
        Self {
            config,
            store,
            hasher,
            inserted: 0,
        }
    }

    /// Insert a key.
    ///
    /// Returns `true` if at least one of the key's bits was previously unset. A `false`
    /// result means every bit was already set, which does not prove the key was
    /// inserted before.
    pub fn insert(&mut self, key: &[u8]) -> bool {
        let indices = self.hasher.compute_indices(key, self.store.len());

        let mut changed = false;
        for index in indices {
            changed |= self.store.test_and_set(index);
        }

        self.inserted += 1;
        if self.config.expected_elements() == Some(self.inserted - 1) {
            warn!(
                expected_elements = self.inserted - 1,
                "Kona Bloom Filter loaded past its designed capacity"
            );
        }
        trace!(changed, count = self.inserted, "key inserted");

        changed
    }

    /// Returns true if the filter might contain the key.
    ///
    /// False positives are possible, but false negatives are not: any key inserted
    /// since the last [`KonaBloomFilter::clear`] is reported present.
    pub fn check(&self, key: &[u8]) -> bool {
        self.hasher
            .compute_indices(key, self.store.len())
            .into_iter()
            .all(|index| self.store.test(index))
    }

    /// Reset the filter to its empty state, keeping its sizing and hash methods.
    pub fn clear(&mut self) {
        self.store.clear();
        self.inserted = 0;
        debug!(bit_vector_length = self.store.len(), "Kona Bloom Filter cleared");
    }

    /// Clone the filter, failing if it has no allocated bit vector.
    ///
    /// The copy shares no mutable state with `self`.
    pub fn try_clone(&self) -> Result<Self> {
        if self.store.is_empty() {
            return Err(KonaBloomFilterError::NotInitialized(
                "bit vector store is not allocated".to_string(),
            ));
        }
        trace!(bit_vector_length = self.store.len(), "Kona Bloom Filter cloned");
        Ok(self.clone())
    }

    /// Insert a typed element through its key encoding.
    pub fn insert_element<T: ToKeyBytes + ?Sized>(&mut self, element: &T) -> bool {
        self.insert(&element.to_key_bytes())
    }

    /// Check a typed element through its key encoding.
    pub fn check_element<T: ToKeyBytes + ?Sized>(&self, element: &T) -> bool {
        self.check(&element.to_key_bytes())
    }

    /// Insert every element, returning each insert result in order.
    pub fn insert_all<I>(&mut self, elements: I) -> Vec<bool>
    where
        I: IntoIterator,
        I::Item: ToKeyBytes,
    {
        elements
            .into_iter()
            .map(|element| self.insert_element(&element))
            .collect()
    }

    /// Check every element, returning each result in order.
    pub fn check_all<I>(&self, elements: I) -> Vec<bool>
    where
        I: IntoIterator,
        I::Item: ToKeyBytes,
    {
        elements
            .into_iter()
            .map(|element| self.check_element(&element))
            .collect()
    }

    /// Insert any serializable value, keyed by its JSON encoding.
    ///
    /// # Errors
    ///
    /// Returns [`KonaBloomFilterError::SerializationError`] if the value cannot be
    /// encoded; the filter is left untouched.
    pub fn insert_serialized<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<bool> {
        let key = serialize_key(value)?;
        Ok(self.insert(&key))
    }

    /// Check any serializable value, keyed by its JSON encoding.
    pub fn check_serialized<T: Serialize + ?Sized>(&self, value: &T) -> Result<bool> {
        let key = serialize_key(value)?;
        Ok(self.check(&key))
    }

    /// Number of insert calls since construction or the last clear.
    ///
    /// Repeated inserts of the same key are all counted.
    pub fn count(&self) -> usize {
        self.inserted
    }

    /// Design capacity, `None` for unsized filters.
    pub fn expected_elements(&self) -> Option<usize> {
        self.config.expected_elements()
    }

    /// Target false positive probability, `None` for unsized filters.
    ///
    /// This is the target for an optimally hashed filter. With the default two hash
    /// methods the realized rate at capacity is higher for small targets; see
    /// [`KonaBloomFilter::estimated_false_positive_rate`].
    pub fn false_positive_probability(&self) -> Option<f64> {
        self.config.false_positive_probability()
    }

    /// Length of the bit vector.
    pub fn bit_vector_length(&self) -> usize {
        self.store.len()
    }

    /// Number of hash methods probed per key.
    pub fn hash_function_count(&self) -> usize {
        self.hasher.hash_count()
    }

    /// Names of the hash methods, in probe order.
    pub fn hash_method_names(&self) -> Vec<String> {
        self.hasher.names()
    }

    /// Get the configuration of this filter.
    pub fn config(&self) -> &KonaBloomFilterConfig {
        &self.config
    }

    /// Read-only view of the underlying bit vector.
    pub fn store(&self) -> &BitVectorStore {
        &self.store
    }

    /// Fraction of bits currently set, between 0.0 and 1.0.
    pub fn fill_ratio(&self) -> f64 {
        self.store.count_ones() as f64 / self.store.len() as f64
    }

    /// Expected false positive rate given the current count.
    pub fn estimated_false_positive_rate(&self) -> f64 {
        estimate_false_positive_rate(self.hash_function_count(), self.inserted, self.store.len())
    }

    /// Snapshot of sizing and load figures.
    pub fn stats(&self) -> FilterStats {
        FilterStats {
            count: self.inserted,
            expected_elements: self.expected_elements(),
            false_positive_probability: self.false_positive_probability(),
            bit_vector_length: self.bit_vector_length(),
            hash_functions: self.hash_function_count(),
            optimal_hash_functions: self.config.calculate_optimal_hash_functions(),
            set_bits: self.store.count_ones(),
            fill_ratio: self.fill_ratio(),
            estimated_false_positive_rate: self.estimated_false_positive_rate(),
        }
    }
}

impl Default for KonaBloomFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KonaBloomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KonaBloomFilter")
            .field("bit_vector_length", &self.store.len())
            .field("hash_methods", &self.hasher)
            .field("count", &self.inserted)
            .field("set_bits", &self.store.count_ones())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hash method that ignores its input.
    struct ConstantHash(u32);

    impl HashMethod for ConstantHash {
        fn name(&self) -> &str {
            "constant"
        }

        fn hash(&self, _bytes: &[u8]) -> u32 {
            self.0
        }
    }

    fn constant_methods(values: &[u32]) -> Vec<Arc<dyn HashMethod>> {
        values
            .iter()
            .map(|&v| Arc::new(ConstantHash(v)) as Arc<dyn HashMethod>)
            .collect()
    }

    #[test]
    fn test_bloom_filter_basic() {
        let mut filter = KonaBloomFilter::with_capacity(1_000, 0.01).unwrap();

        filter.insert(b"test1");
        filter.insert(b"test2");

        assert!(filter.check(b"test1"));
        assert!(filter.check(b"test2"));
        assert!(!filter.check(b"test3"));
    }

    #[test]
    fn test_one_bit_per_method() {
        let config = KonaBloomFilterConfig::new().with_bit_vector_length(10);
        let mut filter =
            KonaBloomFilter::with_hash_methods(config, constant_methods(&[3, 17])).unwrap();

        assert!(filter.insert(b"anything"));

        // 3 mod 10 and 17 mod 10; bit 0 is untouched.
        let set: Vec<usize> = (0..10).filter(|&i| filter.store().get(i).unwrap()).collect();
        assert_eq!(set, vec![3, 7]);
    }

    #[test]
    fn test_insert_reports_new_bits() {
        let config = KonaBloomFilterConfig::new().with_bit_vector_length(64);
        let mut filter =
            KonaBloomFilter::with_hash_methods(config, constant_methods(&[5, 9])).unwrap();

        assert!(filter.insert(b"first"));
        // Same bits, different key: nothing new is set.
        assert!(!filter.insert(b"second"));
        assert_eq!(filter.count(), 2);
    }

    #[test]
    fn test_check_requires_every_bit() {
        let config = KonaBloomFilterConfig::new().with_bit_vector_length(16);
        let mut filter =
            KonaBloomFilter::with_hash_methods(config, constant_methods(&[1, 2])).unwrap();
        filter.store.test_and_set(1);
        assert!(!filter.check(b"key"));
        filter.store.test_and_set(2);
        assert!(filter.check(b"key"));
    }

    #[test]
    fn test_method_count_must_match_config() {
        let config = KonaBloomFilterConfig::new().with_hash_functions(3);
        let result = KonaBloomFilter::with_hash_methods(config, constant_methods(&[1, 2]));
        assert!(matches!(
            result,
            Err(KonaBloomFilterError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(KonaBloomFilter::with_capacity(0, 0.01).is_err());
        assert!(KonaBloomFilter::with_capacity(10, 1.0).is_err());
        assert!(
            KonaBloomFilter::with_config(KonaBloomFilterConfig::new().with_hash_functions(0))
                .is_err()
        );
    }

    #[test]
    fn test_unallocatable_capacity_is_an_error() {
        let result = KonaBloomFilter::with_capacity(100_000_000_000_000_000, 0.01);
        assert!(matches!(
            result,
            Err(KonaBloomFilterError::InvalidConfiguration(_))
        ));

        let config = KonaBloomFilterConfig::new().with_bit_vector_length(usize::MAX - 1);
        assert!(matches!(
            KonaBloomFilter::with_config(config),
            Err(KonaBloomFilterError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_count_and_clear() {
        let mut filter = KonaBloomFilter::with_capacity(10, 0.1).unwrap();
        filter.insert(b"a");
        filter.insert(b"a");
        filter.insert(b"b");
        assert_eq!(filter.count(), 3);

        filter.clear();
        assert_eq!(filter.count(), 0);
        assert_eq!(filter.store().count_ones(), 0);
        assert_eq!(filter.expected_elements(), Some(10));
        assert_eq!(filter.false_positive_probability(), Some(0.1));
        assert_eq!(filter.bit_vector_length(), 48);
    }

    #[test]
    fn test_try_clone_without_store() {
        let filter = KonaBloomFilter {
            config: KonaBloomFilterConfig::default(),
            store: BitVectorStore::new(0),
            hasher: HashMethodSet::new(default_hash_methods(2)),
            inserted: 0,
        };
        assert!(matches!(
            filter.try_clone(),
            Err(KonaBloomFilterError::NotInitialized(_))
        ));
    }

    #[test]
    fn test_try_clone_is_independent() {
        let mut original = KonaBloomFilter::with_capacity(100, 0.01).unwrap();
        original.insert(b"shared");

        let mut copy = original.try_clone().unwrap();
        copy.insert(b"copy-only");
        original.clear();

        assert!(!original.check(b"shared"));
        assert!(copy.check(b"shared"));
        assert!(copy.check(b"copy-only"));
        assert_eq!(copy.bit_vector_length(), original.bit_vector_length());
        assert_eq!(copy.hash_method_names(), original.hash_method_names());
    }

    #[test]
    fn test_element_api() {
        let mut filter = KonaBloomFilter::with_capacity(100, 0.01).unwrap();

        assert_eq!(filter.insert_all(["a", "b", "c"]), vec![true, true, true]);
        assert_eq!(filter.check_all(["a", "c"]), vec![true, true]);
        assert!(filter.check_element("b"));
        assert!(filter.check(b"b"));

        filter.insert_element(&42u64);
        assert!(filter.check_element(&42u64));
        assert_eq!(filter.count(), 4);
    }

    #[test]
    fn test_serialized_elements() {
        #[derive(Serialize)]
        struct Session {
            user: &'static str,
            id: u32,
        }

        let mut filter = KonaBloomFilter::with_capacity(100, 0.01).unwrap();
        let session = Session { user: "kai", id: 7 };

        assert!(filter.insert_serialized(&session).unwrap());
        assert!(filter.check_serialized(&session).unwrap());
        assert!(filter.check(br#"{"user":"kai","id":7}"#));
    }

    #[test]
    fn test_fill_ratio() {
        let mut filter = KonaBloomFilter::new();
        assert_eq!(filter.fill_ratio(), 0.0);

        for i in 0..200u32 {
            filter.insert_element(&i);
        }

        let ratio = filter.fill_ratio();
        assert!(ratio > 0.0);
        assert!(ratio < 1.0);
    }

    #[test]
    fn test_stats() {
        let mut filter = KonaBloomFilter::with_capacity(100, 0.01).unwrap();
        filter.insert(b"hello");

        let stats = filter.stats();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.expected_elements, Some(100));
        assert_eq!(stats.bit_vector_length, 959);
        assert_eq!(stats.hash_functions, 2);
        assert_eq!(stats.optimal_hash_functions, Some(7));
        assert!(stats.set_bits == 1 || stats.set_bits == 2);
        assert!(stats.estimated_false_positive_rate > 0.0);
    }

    #[test]
    fn test_debug_output() {
        let filter = KonaBloomFilter::new();
        let debug = format!("{filter:?}");
        assert!(debug.contains("bit_vector_length: 1024"));
        assert!(debug.contains("murmur3-32"));
        assert!(debug.contains("fnv1a-32"));
    }
}
