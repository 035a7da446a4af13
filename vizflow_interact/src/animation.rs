// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single forward sweep over a time extent.

use std::time::Duration;

use crate::error::InteractError;

/// What an [`AnimationDriver`] produced for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationStep {
    /// The sweep continues; render this time.
    Frame(f64),
    /// The sweep reached its end on this tick; render this (final) time.
    Finished(f64),
    /// The driver was already finished or cancelled; nothing to render.
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Running,
    Finished,
    Cancelled,
}

/// Drives time from `min` to `max` over a fixed duration with linear easing.
///
/// The host supplies elapsed durations; there is no hidden clock. The sweep never repeats.
#[derive(Clone, Debug)]
pub struct AnimationDriver {
    extent: (f64, f64),
    duration: Duration,
    elapsed: Duration,
    status: Status,
}

impl AnimationDriver {
    /// Creates a running driver.
    ///
    /// Fails when the extent is non-finite or runs backwards, or when `duration` is zero.
    pub fn new(extent: (f64, f64), duration: Duration) -> Result<Self, InteractError> {
        let (min, max) = extent;
        if !(min.is_finite() && max.is_finite()) || min > max {
            return Err(InteractError::EmptyTimeExtent { min, max });
        }
        if duration.is_zero() {
            return Err(InteractError::NonPositiveDuration);
        }
        Ok(Self {
            extent,
            duration,
            elapsed: Duration::ZERO,
            status: Status::Running,
        })
    }

    /// Returns the swept extent.
    pub fn extent(&self) -> (f64, f64) {
        self.extent
    }

    /// Returns the current (unsnapped) time.
    pub fn time(&self) -> f64 {
        let (min, max) = self.extent;
        let progress = (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0);
        min + (max - min) * progress
    }

    /// Returns `true` while the sweep is advancing.
    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// Returns `true` if the sweep was stopped by [`Self::cancel`].
    pub fn is_cancelled(&self) -> bool {
        self.status == Status::Cancelled
    }

    /// Advances by `dt`.
    pub fn tick(&mut self, dt: Duration) -> AnimationStep {
        if self.status != Status::Running {
            return AnimationStep::Stopped;
        }
        self.elapsed = (self.elapsed + dt).min(self.duration);
        if self.elapsed >= self.duration {
            self.status = Status::Finished;
            AnimationStep::Finished(self.extent.1)
        } else {
            AnimationStep::Frame(self.time())
        }
    }

    /// Stops advancement immediately. Has no effect once finished.
    pub fn cancel(&mut self) {
        if self.status == Status::Running {
            self.status = Status::Cancelled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweeps_linearly_and_finishes_once() {
        let mut d = AnimationDriver::new((1990.0, 2012.0), Duration::from_millis(5000)).unwrap();
        assert_eq!(d.time(), 1990.0);
        assert_eq!(d.tick(Duration::from_millis(2500)), AnimationStep::Frame(2001.0));
        assert_eq!(d.tick(Duration::from_millis(4000)), AnimationStep::Finished(2012.0));
        assert!(!d.is_running());
        assert_eq!(d.tick(Duration::from_millis(10)), AnimationStep::Stopped);
        assert_eq!(d.time(), 2012.0);
    }

    #[test]
    fn cancel_freezes_time() {
        let mut d = AnimationDriver::new((0.0, 10.0), Duration::from_secs(10)).unwrap();
        let _ = d.tick(Duration::from_secs(3));
        d.cancel();
        assert!(d.is_cancelled());
        assert_eq!(d.tick(Duration::from_secs(3)), AnimationStep::Stopped);
        assert_eq!(d.time(), 3.0);
    }

    #[test]
    fn rejects_bad_configuration() {
        assert_eq!(
            AnimationDriver::new((2012.0, 1990.0), Duration::from_secs(1)).unwrap_err(),
            InteractError::EmptyTimeExtent {
                min: 2012.0,
                max: 1990.0
            }
        );
        assert!(AnimationDriver::new((0.0, f64::NAN), Duration::from_secs(1)).is_err());
        assert_eq!(
            AnimationDriver::new((0.0, 1.0), Duration::ZERO).unwrap_err(),
            InteractError::NonPositiveDuration
        );
    }

    #[test]
    fn degenerate_extent_finishes_on_first_tick() {
        let mut d = AnimationDriver::new((2000.0, 2000.0), Duration::from_secs(1)).unwrap();
        assert_eq!(d.tick(Duration::from_secs(2)), AnimationStep::Finished(2000.0));
    }
}
