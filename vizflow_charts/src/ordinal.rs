// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Categorical color scales.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Color;

use crate::error::{ScaleError, ScaleKind};

/// The ten-color categorical palette used for region coloring.
pub const CATEGORY10: [Color; 10] = [
    Color::from_rgb8(0x1f, 0x77, 0xb4),
    Color::from_rgb8(0xff, 0x7f, 0x0e),
    Color::from_rgb8(0x2c, 0xa0, 0x2c),
    Color::from_rgb8(0xd6, 0x27, 0x28),
    Color::from_rgb8(0x94, 0x67, 0xbd),
    Color::from_rgb8(0x8c, 0x56, 0x4b),
    Color::from_rgb8(0xe3, 0x77, 0xc2),
    Color::from_rgb8(0x7f, 0x7f, 0x7f),
    Color::from_rgb8(0xbc, 0xbd, 0x22),
    Color::from_rgb8(0x17, 0xbe, 0xcf),
];

/// The twenty-color categorical palette (paired light/dark hues).
pub const CATEGORY20: [Color; 20] = [
    Color::from_rgb8(0x1f, 0x77, 0xb4),
    Color::from_rgb8(0xae, 0xc7, 0xe8),
    Color::from_rgb8(0xff, 0x7f, 0x0e),
    Color::from_rgb8(0xff, 0xbb, 0x78),
    Color::from_rgb8(0x2c, 0xa0, 0x2c),
    Color::from_rgb8(0x98, 0xdf, 0x8a),
    Color::from_rgb8(0xd6, 0x27, 0x28),
    Color::from_rgb8(0xff, 0x98, 0x96),
    Color::from_rgb8(0x94, 0x67, 0xbd),
    Color::from_rgb8(0xc5, 0xb0, 0xd5),
    Color::from_rgb8(0x8c, 0x56, 0x4b),
    Color::from_rgb8(0xc4, 0x9c, 0x94),
    Color::from_rgb8(0xe3, 0x77, 0xc2),
    Color::from_rgb8(0xf7, 0xb6, 0xd2),
    Color::from_rgb8(0x7f, 0x7f, 0x7f),
    Color::from_rgb8(0xc7, 0xc7, 0xc7),
    Color::from_rgb8(0xbc, 0xbd, 0x22),
    Color::from_rgb8(0xdb, 0xdb, 0x8d),
    Color::from_rgb8(0x17, 0xbe, 0xcf),
    Color::from_rgb8(0x9e, 0xda, 0xe5),
];

/// Maps category names to palette colors.
///
/// A category listed in the domain maps to the palette entry at its domain index (wrapping).
/// Any other category maps through a stable FNV-1a hash of its name, so the result never depends
/// on call order or on which categories were seen before.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleOrdinal {
    domain: Vec<String>,
    palette: Vec<Color>,
}

impl ScaleOrdinal {
    /// Creates an ordinal scale over `palette` with an empty domain.
    ///
    /// Fails with [`ScaleError::InvalidRange`] if the palette is empty.
    pub fn new(palette: impl IntoIterator<Item = Color>) -> Result<Self, ScaleError> {
        let palette: Vec<Color> = palette.into_iter().collect();
        if palette.is_empty() {
            return Err(ScaleError::InvalidRange {
                kind: ScaleKind::Ordinal,
            });
        }
        Ok(Self {
            domain: Vec::new(),
            palette,
        })
    }

    /// The [`CATEGORY10`] palette.
    pub fn category10() -> Self {
        Self {
            domain: Vec::new(),
            palette: CATEGORY10.to_vec(),
        }
    }

    /// The [`CATEGORY20`] palette.
    pub fn category20() -> Self {
        Self {
            domain: Vec::new(),
            palette: CATEGORY20.to_vec(),
        }
    }

    /// Fixes the category order.
    pub fn with_domain(mut self, domain: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.domain = domain.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Returns the palette.
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Returns the palette index for `category`.
    pub fn index(&self, category: &str) -> usize {
        let n = self.palette.len();
        match self.domain.iter().position(|c| c == category) {
            Some(i) => i % n,
            None => {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "the modulus is a palette length, well within usize"
                )]
                {
                    (vizflow_core::stable_key(category) % n as u64) as usize
                }
            }
        }
    }

    /// Returns the color for `category`.
    pub fn map(&self, category: &str) -> Color {
        self.palette[self.index(category)]
    }
}
