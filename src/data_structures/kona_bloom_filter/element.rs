// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Conversion of typed elements into the key bytes the filter hashes.

use std::borrow::Cow;

use serde::Serialize;

use crate::data_structures::kona_bloom_filter::error::{KonaBloomFilterError, Result};

/// Types with a canonical byte encoding usable as a filter key.
///
/// Strings hash their UTF-8 bytes and integers their little-endian bytes, so
/// `"7"` and `7u32` are different keys.
pub trait ToKeyBytes {
    /// The bytes identifying this element.
    fn to_key_bytes(&self) -> Cow<'_, [u8]>;
}

impl ToKeyBytes for [u8] {
    fn to_key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

impl<const N: usize> ToKeyBytes for [u8; N] {
    fn to_key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

impl ToKeyBytes for Vec<u8> {
    fn to_key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

impl ToKeyBytes for str {
    fn to_key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl ToKeyBytes for String {
    fn to_key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl<T: ToKeyBytes + ?Sized> ToKeyBytes for &T {
    fn to_key_bytes(&self) -> Cow<'_, [u8]> {
        (**self).to_key_bytes()
    }
}

macro_rules! impl_to_key_bytes_for_int {
    ($($t:ty),*) => {
        $(
            impl ToKeyBytes for $t {
                fn to_key_bytes(&self) -> Cow<'_, [u8]> {
                    Cow::Owned(self.to_le_bytes().to_vec())
                }
            }
        )*
    };
}

impl_to_key_bytes_for_int!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

/// Encode any serializable value as JSON key bytes.
pub(crate) fn serialize_key<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| KonaBloomFilterError::SerializationError(e.to_string()))
}
