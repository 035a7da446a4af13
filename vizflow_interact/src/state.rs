// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transient interaction state.

use vizflow_core::MarkId;

use crate::popup::Popup;
use crate::transform::ViewTransform;

/// Controller phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Nothing in progress.
    #[default]
    Idle,
    /// The animation driver advances time on every tick.
    Animating,
    /// The pointer is over the scrub region and drives time directly.
    Scrubbing,
    /// The pointer is over a hoverable element.
    Hovering,
}

/// Everything views may read about the current interaction.
///
/// Only the controller mutates this; views receive it by shared reference.
#[derive(Clone, Debug, Default)]
pub struct InteractionState {
    phase: Phase,
    time: Option<f64>,
    hover: Option<Hover>,
    popup: Option<Popup>,
    transform: ViewTransform,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Hover {
    target: u64,
    mark: MarkId,
}

impl InteractionState {
    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the displayed (snapped) time, for views with a time extent.
    pub fn time(&self) -> Option<f64> {
        self.time
    }

    /// Returns the datum key of the hovered element.
    pub fn hover(&self) -> Option<u64> {
        self.hover.map(|h| h.target)
    }

    /// Returns the mark under the pointer.
    pub fn hover_mark(&self) -> Option<MarkId> {
        self.hover.map(|h| h.mark)
    }

    /// Returns the visible popup.
    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    /// Returns the zoom/pan transform.
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Returns `true` while the time label should use its active fill.
    pub fn is_scrubbing(&self) -> bool {
        self.phase == Phase::Scrubbing
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) -> Phase {
        core::mem::replace(&mut self.phase, phase)
    }

    pub(crate) fn set_time(&mut self, time: Option<f64>) {
        self.time = time;
    }

    pub(crate) fn set_hover(&mut self, target: u64, mark: MarkId) {
        self.hover = Some(Hover { target, mark });
    }

    /// Shows `popup`, returning the one it evicts.
    pub(crate) fn show_popup(&mut self, popup: Popup) -> Option<Popup> {
        self.popup.replace(popup)
    }

    pub(crate) fn clear_popup(&mut self) -> Option<Popup> {
        self.popup.take()
    }

    pub(crate) fn popup_mut(&mut self) -> Option<&mut Popup> {
        self.popup.as_mut()
    }

    /// Clears the hover target and its popup.
    pub(crate) fn clear_hover(&mut self) -> Option<Popup> {
        self.hover = None;
        self.popup.take()
    }

    pub(crate) fn transform_mut(&mut self) -> &mut ViewTransform {
        &mut self.transform
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;
    use vizflow_core::LayerId;

    use super::*;

    fn popup(target: u64) -> Popup {
        Popup {
            target,
            mark: MarkId::for_key(LayerId(1), target),
            anchor: Point::ZERO,
            lines: vec![format!("#{target}")],
        }
    }

    #[test]
    fn showing_a_popup_evicts_the_previous_one() {
        let mut s = InteractionState::default();
        assert!(s.show_popup(popup(1)).is_none());
        let evicted = s.show_popup(popup(2));
        assert_eq!(evicted.map(|p| p.target), Some(1));
        assert_eq!(s.popup().map(|p| p.target), Some(2));
    }

    #[test]
    fn clearing_hover_removes_the_popup() {
        let mut s = InteractionState::default();
        s.set_hover(2, MarkId::for_key(LayerId(1), 2));
        let _ = s.show_popup(popup(2));
        assert_eq!(s.clear_hover().map(|p| p.target), Some(2));
        assert_eq!(s.hover(), None);
        assert!(s.popup().is_none());
        assert!(s.transform().is_identity());
    }
}
