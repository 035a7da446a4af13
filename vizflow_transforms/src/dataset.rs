// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entities and datasets.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::series::TimeSeries;

/// Index of a tracked attribute within a [`Dataset`] (and the [`crate::Frame`]s built from it).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttrId(pub usize);

/// One visualized subject: a country, a player, a graph node.
///
/// With the `serde` feature, an entity reads the flat JSON shape used by the source datasets:
/// `{"name": ..., "region": ..., "<attribute>": [[year, value | null], ...], ...}`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Entity {
    /// Stable identifier. Empty means "use the name".
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "String::is_empty"))]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category used for color and filtering.
    #[cfg_attr(feature = "serde", serde(alias = "region"))]
    pub category: String,
    /// Free-form string properties (for example a `|`-delimited ranking).
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "BTreeMap::is_empty"))]
    pub properties: BTreeMap<String, String>,
    /// Attribute name to time series.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub series: BTreeMap<String, TimeSeries>,
}

impl Entity {
    /// Creates an entity without series or properties.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            ..Self::default()
        }
    }

    /// Sets an explicit identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Adds a time series for `attr`.
    pub fn with_series(mut self, attr: impl Into<String>, series: TimeSeries) -> Self {
        self.series.insert(attr.into(), series);
        self
    }

    /// Adds a string property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Returns the identifier, falling back to the name.
    pub fn id(&self) -> &str {
        if self.id.is_empty() {
            &self.name
        } else {
            &self.id
        }
    }

    /// Returns the stable key derived from [`Entity::id`].
    pub fn key(&self) -> u64 {
        vizflow_core::stable_key(self.id())
    }

    /// Returns the series for `attr`, if any.
    pub fn series(&self, attr: &str) -> Option<&TimeSeries> {
        self.series.get(attr)
    }
}

/// An immutable collection of entities plus the attribute names frames should resolve.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    entities: Vec<Entity>,
    tracked: Vec<String>,
}

impl Dataset {
    /// Creates a dataset tracking the given attribute names, in order.
    pub fn new(
        entities: Vec<Entity>,
        tracked: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            entities,
            tracked: tracked.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the entities in input order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Returns the tracked attribute names.
    pub fn tracked(&self) -> &[String] {
        &self.tracked
    }

    /// Looks up a tracked attribute by name.
    pub fn attr(&self, name: &str) -> Option<AttrId> {
        self.tracked.iter().position(|a| a == name).map(AttrId)
    }

    /// Returns the entity with stable key `key`.
    pub fn entity_by_key(&self, key: u64) -> Option<&Entity> {
        self.entities.iter().find(|e| e.key() == key)
    }

    /// Returns the earliest and latest sample time over all tracked series.
    pub fn time_extent(&self) -> Option<(f64, f64)> {
        let mut out: Option<(f64, f64)> = None;
        for e in &self.entities {
            for name in &self.tracked {
                let Some((lo, hi)) = e.series(name).and_then(TimeSeries::time_extent) else {
                    continue;
                };
                out = Some(match out {
                    None => (lo, hi),
                    Some((a, b)) => (a.min(lo), b.max(hi)),
                });
            }
        }
        out
    }
}
