// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A static horizontal bar list.

use vizflow_charts::{BarDatum, BarMarkSpec};
use vizflow_core::LayerId;

use crate::error::InteractError;
use crate::state::InteractionState;
use crate::view::{View, ViewFrame};

/// One labelled bar per datum; hovering a bar shows its title.
#[derive(Clone, Debug)]
pub struct BarView {
    spec: BarMarkSpec,
    data: Vec<BarDatum>,
}

impl BarView {
    /// Creates a bar list `width` wide.
    pub fn new(width: f64, data: Vec<BarDatum>) -> Self {
        Self {
            spec: BarMarkSpec::new(LayerId(40), width),
            data,
        }
    }

    /// Returns the rendered height.
    pub fn height(&self) -> f64 {
        self.spec.height(self.data.len())
    }

    /// Returns the data.
    pub fn data(&self) -> &[BarDatum] {
        &self.data
    }

    /// Replaces the data; call [`crate::InteractionController::refresh`] afterwards.
    pub fn set_data(&mut self, data: Vec<BarDatum>) {
        self.data = data;
    }
}

impl View for BarView {
    fn name(&self) -> &str {
        "bar"
    }

    fn render(&self, _state: &InteractionState) -> Result<ViewFrame, InteractError> {
        Ok(ViewFrame {
            marks: self.spec.marks(&self.data),
            ..ViewFrame::default()
        })
    }

    fn popup(&self, target: u64, _state: &InteractionState) -> Option<Vec<String>> {
        let d = self.data.iter().find(|d| d.key() == target)?;
        let line = if d.title != d.label {
            d.title.clone()
        } else {
            format!("{}: {}", d.label, d.formatted)
        };
        Some(vec![line])
    }
}
