// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable identities.

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// A layer namespace for mark ids.
///
/// Two marks bound to the same entity in different layers (a bubble and its label, say) must
/// not collide, so ids are always derived from `(layer, key)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u32);

/// A stable mark identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Wraps a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives an id for a keyed datum within a layer.
    ///
    /// The result only depends on its inputs, so the same entity gets the same id in every
    /// frame.
    pub fn for_key(layer: LayerId, key: u64) -> Self {
        let mut h = FNV_OFFSET;
        for b in layer.0.to_le_bytes().into_iter().chain(key.to_le_bytes()) {
            h ^= u64::from(b);
            h = h.wrapping_mul(FNV_PRIME);
        }
        Self(h)
    }
}

/// Hashes an identifier string into a stable 64-bit key (FNV-1a).
///
/// Unlike `core::hash::BuildHasher` defaults this is not seeded, so keys are identical across
/// runs and processes.
pub fn stable_key(id: &str) -> u64 {
    let mut h = FNV_OFFSET;
    for b in id.bytes() {
        h ^= u64::from(b);
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_key_matches_fnv1a_reference() {
        assert_eq!(stable_key(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(stable_key("a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn layers_separate_identical_keys() {
        let key = stable_key("Germany");
        assert_ne!(
            MarkId::for_key(LayerId(1), key),
            MarkId::for_key(LayerId(2), key)
        );
        assert_eq!(
            MarkId::for_key(LayerId(1), key),
            MarkId::for_key(LayerId(1), key)
        );
    }
}
