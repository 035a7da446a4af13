// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interaction state machine.

use std::time::Duration;

use kurbo::{Point, Vec2};
use tracing::{debug, trace};
use vizflow_charts::{HeuristicTextMeasurer, PopupSpec};
use vizflow_core::{Hit, LayerId, Mark, MarkDiff, Scene};

use crate::animation::{AnimationDriver, AnimationStep};
use crate::error::InteractError;
use crate::popup::Popup;
use crate::scrub::ScrubRegion;
use crate::state::{InteractionState, Phase};
use crate::transform::{ViewTransform, wheel_zoom_factor};
use crate::view::View;

/// Pointer input, in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// The pointer moved to a position.
    Move(Point),
    /// The pointer left the surface.
    Leave,
    /// A wheel gesture at `pos`; positive `delta` zooms out.
    Wheel {
        /// Pointer position.
        pos: Point,
        /// Wheel delta in pixels.
        delta: f64,
    },
    /// A drag by `delta` since the previous drag event.
    Drag {
        /// Movement since the previous drag event.
        delta: Vec2,
    },
}

/// Controller settings.
#[derive(Clone, Debug)]
pub struct ControllerConfig {
    /// Length of the automatic sweep over the time extent.
    pub duration: Duration,
    /// Horizontal inset of the scrub region.
    pub scrub_inset: f64,
    /// Offset of the popup from the hovered element's anchor.
    pub popup_offset: Vec2,
    /// Allowed zoom scale factors.
    pub zoom_extent: (f64, f64),
    /// Wheel delta to zoom exponent factor.
    pub wheel_sensitivity: f64,
    /// Id layer reserved for the popup.
    pub popup_layer: LayerId,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(5000),
            scrub_inset: ScrubRegion::DEFAULT_INSET,
            popup_offset: Vec2::new(0.0, 15.0),
            zoom_extent: (0.5, 8.0),
            wheel_sensitivity: 0.002,
            popup_layer: LayerId(u32::MAX),
        }
    }
}

impl ControllerConfig {
    /// Creates the default configuration: a 5 s sweep, a 10 px scrub inset, popups 15 px below
    /// their element, and zoom between 0.5× and 8×.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sweep duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the scrub inset.
    pub fn with_scrub_inset(mut self, inset: f64) -> Self {
        self.scrub_inset = inset;
        self
    }

    /// Sets the popup offset.
    pub fn with_popup_offset(mut self, offset: Vec2) -> Self {
        self.popup_offset = offset;
        self
    }

    /// Sets the zoom extent.
    pub fn with_zoom_extent(mut self, min: f64, max: f64) -> Self {
        self.zoom_extent = (min, max);
        self
    }

    /// Sets the wheel sensitivity.
    pub fn with_wheel_sensitivity(mut self, sensitivity: f64) -> Self {
        self.wheel_sensitivity = sensitivity;
        self
    }

    fn validate(&self) -> Result<(), InteractError> {
        if self.duration.is_zero() {
            return Err(InteractError::NonPositiveDuration);
        }
        let (min, max) = self.zoom_extent;
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(InteractError::InvalidZoomExtent { min, max });
        }
        Ok(())
    }
}

/// Drives one [`View`] and owns its scene and interaction state.
///
/// Each entry point returns the diffs the host must apply to its surface.
#[derive(Debug)]
pub struct InteractionController<V> {
    view: V,
    config: ControllerConfig,
    state: InteractionState,
    scene: Scene,
    driver: Option<AnimationDriver>,
    scrub: Option<ScrubRegion>,
    popup: PopupSpec,
    measurer: HeuristicTextMeasurer,
}

impl<V: View> InteractionController<V> {
    /// Creates an inactive controller.
    pub fn new(view: V, config: ControllerConfig) -> Result<Self, InteractError> {
        config.validate()?;
        let popup = PopupSpec::new(config.popup_layer);
        Ok(Self {
            view,
            config,
            state: InteractionState::default(),
            scene: Scene::new(),
            driver: None,
            scrub: None,
            popup,
            measurer: HeuristicTextMeasurer,
        })
    }

    /// Returns the view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Returns the view for updates; call [`Self::refresh`] afterwards.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Returns the interaction state.
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Returns the retained scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Returns the scrub region, once activated.
    pub fn scrub_region(&self) -> Option<&ScrubRegion> {
        self.scrub.as_ref()
    }

    /// Returns `true` while the animation advances on ticks.
    pub fn is_animating(&self) -> bool {
        self.driver.as_ref().is_some_and(AnimationDriver::is_running)
    }

    /// Shows the view: starts the sweep for views with a time extent, otherwise renders once.
    #[tracing::instrument(level = "debug", skip(self), fields(view = self.view.name()))]
    pub fn activate(&mut self) -> Result<Vec<MarkDiff>, InteractError> {
        self.state = InteractionState::default();
        self.driver = None;
        self.scrub = None;
        if let Some(extent) = self.view.time_extent() {
            let driver = AnimationDriver::new(extent, self.config.duration)?;
            if extent.0 < extent.1 {
                if let Some(rect) = self.view.scrub_bounds() {
                    self.scrub = Some(ScrubRegion::new(rect, extent, self.config.scrub_inset)?);
                }
            }
            self.state.set_time(Some(self.view.snap_time(driver.time())));
            self.driver = Some(driver);
            self.transition(Phase::Animating);
            debug!(
                min = extent.0,
                max = extent.1,
                duration_s = self.config.duration.as_secs_f64(),
                "animation started"
            );
        }
        self.render()
    }

    /// Advances the animation by `dt`. Returns no diffs when nothing is animating.
    pub fn tick(&mut self, dt: Duration) -> Result<Vec<MarkDiff>, InteractError> {
        let Some(driver) = self.driver.as_mut() else {
            return Ok(Vec::new());
        };
        let t = match driver.tick(dt) {
            AnimationStep::Frame(t) => t,
            AnimationStep::Finished(t) => {
                self.driver = None;
                debug!(view = self.view.name(), time = t, "animation finished");
                if self.state.phase() == Phase::Animating {
                    self.transition(Phase::Idle);
                }
                t
            }
            AnimationStep::Stopped => {
                self.driver = None;
                return Ok(Vec::new());
            }
        };
        self.state.set_time(Some(self.view.snap_time(t)));
        self.render()
    }

    /// Applies pointer input.
    pub fn handle(&mut self, event: PointerEvent) -> Result<Vec<MarkDiff>, InteractError> {
        match event {
            PointerEvent::Move(pt) => self.pointer_moved(pt),
            PointerEvent::Leave => self.pointer_left(),
            PointerEvent::Wheel { pos, delta } => {
                if !self.view.zoomable() {
                    return Ok(Vec::new());
                }
                let factor = wheel_zoom_factor(delta, self.config.wheel_sensitivity);
                let before = self.state.transform();
                self.state
                    .transform_mut()
                    .zoom_at(pos, factor, self.config.zoom_extent);
                self.transform_changed(before)
            }
            PointerEvent::Drag { delta } => {
                if !self.view.zoomable() {
                    return Ok(Vec::new());
                }
                let before = self.state.transform();
                self.state.transform_mut().pan(delta);
                self.transform_changed(before)
            }
        }
    }

    /// Re-renders the current state, e.g. after the view's data changed.
    pub fn refresh(&mut self) -> Result<Vec<MarkDiff>, InteractError> {
        self.render()
    }

    /// Tears the view down: cancels the animation, resets interaction state and empties the
    /// scene.
    pub fn deactivate(&mut self) -> Vec<MarkDiff> {
        self.cancel_animation("deactivate");
        self.scrub = None;
        self.state = InteractionState::default();
        debug!(view = self.view.name(), "view deactivated");
        self.scene.clear()
    }

    fn pointer_moved(&mut self, pt: Point) -> Result<Vec<MarkDiff>, InteractError> {
        let scrubbed = self
            .scrub
            .as_ref()
            .filter(|s| s.contains(pt))
            .map(|s| s.time_at(pt.x));
        if let Some(t) = scrubbed {
            self.cancel_animation("scrub");
            let _ = self.state.clear_hover();
            self.state.set_time(Some(self.view.snap_time(t)));
            self.transition(Phase::Scrubbing);
            return self.render();
        }

        let mut dirty = false;
        if self.state.phase() == Phase::Scrubbing {
            self.transition(Phase::Idle);
            dirty = true;
        }
        match self.scene.hit_test(pt) {
            Some(hit) if self.state.hover() == Some(hit.datum) => {}
            Some(hit) => {
                self.cancel_animation("hover");
                self.start_hover(hit);
                dirty = true;
            }
            None if self.state.hover().is_some() => {
                let _ = self.state.clear_hover();
                self.transition(Phase::Idle);
                dirty = true;
            }
            None => {}
        }
        if dirty {
            self.render()
        } else {
            Ok(Vec::new())
        }
    }

    fn pointer_left(&mut self) -> Result<Vec<MarkDiff>, InteractError> {
        let hovered = self.state.hover().is_some();
        let _ = self.state.clear_hover();
        if matches!(self.state.phase(), Phase::Scrubbing | Phase::Hovering) {
            self.transition(Phase::Idle);
        } else if !hovered {
            return Ok(Vec::new());
        }
        self.render()
    }

    fn start_hover(&mut self, hit: Hit) {
        self.state.set_hover(hit.datum, hit.id);
        let evicted = match self.view.popup(hit.datum, &self.state) {
            Some(lines) => {
                let anchor = self
                    .scene
                    .payload(hit.id)
                    .map_or(Point::ZERO, |p| p.anchor())
                    + self.config.popup_offset;
                self.state.show_popup(Popup {
                    target: hit.datum,
                    mark: hit.id,
                    anchor,
                    lines,
                })
            }
            None => self.state.clear_popup(),
        };
        if let Some(old) = evicted {
            trace!(view = self.view.name(), target = old.target, "popup evicted");
        }
        self.transition(Phase::Hovering);
    }

    fn transform_changed(&mut self, before: ViewTransform) -> Result<Vec<MarkDiff>, InteractError> {
        let after = self.state.transform();
        if after == before {
            return Ok(Vec::new());
        }
        trace!(view = self.view.name(), x = after.x, y = after.y, k = after.k, "view transform");
        self.render()
    }

    fn cancel_animation(&mut self, reason: &'static str) {
        if let Some(mut driver) = self.driver.take() {
            if driver.is_running() {
                driver.cancel();
                debug!(
                    view = self.view.name(),
                    reason,
                    time = driver.time(),
                    "animation cancelled"
                );
            }
        }
    }

    fn transition(&mut self, phase: Phase) {
        let from = self.state.set_phase(phase);
        if from != phase {
            debug!(view = self.view.name(), ?from, to = ?phase, "phase changed");
        }
    }

    fn render(&mut self) -> Result<Vec<MarkDiff>, InteractError> {
        let mut frame = self.view.render(&self.state)?;
        if let Some(mark) = self.state.hover_mark() {
            if !frame.marks.iter().any(|m| m.id == mark) {
                debug!(view = self.view.name(), "hovered element left the frame");
                let _ = self.state.clear_hover();
                if self.state.phase() == Phase::Hovering {
                    self.transition(Phase::Idle);
                }
                frame = self.view.render(&self.state)?;
            }
        }
        if frame.excluded > 0 {
            debug!(
                view = self.view.name(),
                excluded = frame.excluded,
                "elements excluded from frame"
            );
        }

        let transform = self.state.transform();
        let mut marks: Vec<Mark> = if transform.is_identity() {
            frame.marks
        } else {
            let affine = transform.to_affine();
            frame.marks.into_iter().map(|m| m.transformed(affine)).collect()
        };

        let hover_anchor = self
            .state
            .hover_mark()
            .and_then(|id| marks.iter().find(|m| m.id == id))
            .map(|m| m.payload.anchor());
        if let (Some(anchor), Some(popup)) = (hover_anchor, self.state.popup_mut()) {
            popup.anchor = anchor + self.config.popup_offset;
            marks.extend(self.popup.marks(&self.measurer, popup.anchor, &popup.lines));
        }
        marks.extend(frame.overlay);

        let diffs = self.scene.tick(marks);
        trace!(
            view = self.view.name(),
            time = ?self.state.time(),
            phase = ?self.state.phase(),
            marks = self.scene.len(),
            diffs = diffs.len(),
            "frame rendered"
        );
        Ok(diffs)
    }
}
