// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directed weighted relations between entities (flow map links).

extern crate alloc;

use alloc::string::String;

const SEPARATOR: u8 = 0x1f;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// A directed flow from one entity to another.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Relation {
    /// Source entity id.
    pub source: String,
    /// Target entity id.
    pub target: String,
    /// Flow magnitude.
    pub magnitude: f64,
}

impl Relation {
    /// Creates a relation.
    pub fn new(source: impl Into<String>, target: impl Into<String>, magnitude: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            magnitude,
        }
    }

    /// Returns a stable key for this relation's `(source, target)` pair.
    pub fn key(&self) -> u64 {
        pair_key(&self.source, &self.target)
    }

    /// Returns `true` if `id` is either endpoint.
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }
}

/// Stable key of an ordered `(source, target)` pair.
///
/// Continues the FNV-1a hash of `source` over a unit separator and `target`, so `("ab", "c")`
/// and `("a", "bc")` differ.
pub fn pair_key(source: &str, target: &str) -> u64 {
    let mut h = vizflow_core::stable_key(source);
    for b in core::iter::once(SEPARATOR).chain(target.bytes()) {
        h ^= u64::from(b);
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_keys_are_directional_and_unambiguous() {
        assert_ne!(pair_key("DEU", "FRA"), pair_key("FRA", "DEU"));
        assert_ne!(pair_key("ab", "c"), pair_key("a", "bc"));
        assert_eq!(
            Relation::new("DEU", "FRA", 1.0).key(),
            Relation::new("DEU", "FRA", 2.0).key()
        );
    }
}
