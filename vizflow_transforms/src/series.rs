// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sparse time series and the exact-sample lookup policy.

extern crate alloc;

use alloc::vec::Vec;

/// Errors returned when building a [`TimeSeries`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// A sample time is smaller than the one before it.
    #[error("sample at index {index} (t = {time}) is earlier than its predecessor")]
    Unordered {
        /// Index of the offending sample.
        index: usize,
        /// Time of the offending sample.
        time: f64,
    },
    /// A sample time is NaN or infinite.
    #[error("sample at index {index} has a non-finite time")]
    NonFiniteTime {
        /// Index of the offending sample.
        index: usize,
    },
}

/// One `(time, value)` observation. `value` is `None` when the source reported nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Sample time (typically a year).
    pub time: f64,
    /// Observed value, or `None` when explicitly absent.
    pub value: Option<f64>,
}

impl Sample {
    /// Creates a sample.
    pub fn new(time: f64, value: Option<f64>) -> Self {
        Self { time, value }
    }
}

/// A time-ordered sequence of samples for one attribute of one entity.
///
/// Samples are kept in non-decreasing time order; gaps between reporting times are normal.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "Vec<(f64, Option<f64>)>", into = "Vec<(f64, Option<f64>)>")
)]
pub struct TimeSeries {
    samples: Vec<Sample>,
}

impl TimeSeries {
    /// Builds a series, rejecting out-of-order or non-finite times.
    pub fn new(samples: Vec<Sample>) -> Result<Self, SeriesError> {
        let mut prev = f64::NEG_INFINITY;
        for (index, s) in samples.iter().enumerate() {
            if !s.time.is_finite() {
                return Err(SeriesError::NonFiniteTime { index });
            }
            if s.time < prev {
                return Err(SeriesError::Unordered {
                    index,
                    time: s.time,
                });
            }
            prev = s.time;
        }
        Ok(Self { samples })
    }

    /// Builds a series from `(time, value)` pairs.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (f64, Option<f64>)>,
    ) -> Result<Self, SeriesError> {
        Self::new(pairs.into_iter().map(|(t, v)| Sample::new(t, v)).collect())
    }

    /// Returns the samples in time order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Returns `true` if the series has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the first and last sample times.
    pub fn time_extent(&self) -> Option<(f64, f64)> {
        Some((self.samples.first()?.time, self.samples.last()?.time))
    }

    /// Returns the value reported at exactly `t`.
    ///
    /// There is no interpolation between neighbouring samples: a time without its own sample
    /// is absent, and so is a sample whose value is absent. When several samples share `t`,
    /// the first present value wins.
    pub fn value_at(&self, t: f64) -> Option<f64> {
        let start = self.samples.partition_point(|s| s.time < t);
        self.samples[start..]
            .iter()
            .take_while(|s| s.time == t)
            .find_map(|s| s.value)
    }
}

impl TryFrom<Vec<(f64, Option<f64>)>> for TimeSeries {
    type Error = SeriesError;

    fn try_from(pairs: Vec<(f64, Option<f64>)>) -> Result<Self, Self::Error> {
        Self::from_pairs(pairs)
    }
}

impl From<TimeSeries> for Vec<(f64, Option<f64>)> {
    fn from(series: TimeSeries) -> Self {
        series.samples.into_iter().map(|s| (s.time, s.value)).collect()
    }
}

/// Returns the value of `series` at exactly `t`. See [`TimeSeries::value_at`].
pub fn value_at(series: &TimeSeries, t: f64) -> Option<f64> {
    series.value_at(t)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn series(pairs: &[(f64, Option<f64>)]) -> TimeSeries {
        TimeSeries::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn exact_sample_is_returned() {
        let s = series(&[(1990.0, Some(10.0)), (2000.0, Some(30.0))]);
        assert_eq!(s.value_at(1990.0), Some(10.0));
        assert_eq!(s.value_at(2000.0), Some(30.0));
    }

    #[test]
    fn gaps_are_absent_not_interpolated() {
        let s = series(&[(1990.0, Some(10.0)), (2000.0, Some(30.0))]);
        assert_eq!(s.value_at(1995.0), None);
        assert_eq!(s.value_at(1989.0), None);
        assert_eq!(s.value_at(2001.0), None);
    }

    #[test]
    fn explicit_absence_is_kept() {
        let s = series(&[(1990.0, Some(10.0)), (1991.0, None), (1992.0, Some(0.0))]);
        assert_eq!(s.value_at(1991.0), None);
        assert_eq!(s.value_at(1992.0), Some(0.0));
    }

    #[test]
    fn exact_sample_ignores_absent_neighbours() {
        let s = series(&[(1990.0, None), (1991.0, Some(5.0)), (1992.0, None)]);
        assert_eq!(s.value_at(1991.0), Some(5.0));
    }

    #[test]
    fn duplicate_times_prefer_first_present_value() {
        let s = series(&[(1990.0, None), (1990.0, Some(2.0)), (1990.0, Some(3.0))]);
        assert_eq!(s.value_at(1990.0), Some(2.0));
    }

    #[test]
    fn unordered_samples_are_rejected() {
        let err = TimeSeries::from_pairs(vec![(2000.0, Some(1.0)), (1990.0, Some(2.0))])
            .unwrap_err();
        assert_eq!(
            err,
            SeriesError::Unordered {
                index: 1,
                time: 1990.0
            }
        );
    }

    #[test]
    fn non_finite_time_is_rejected() {
        let err = TimeSeries::from_pairs(vec![(f64::NAN, Some(1.0))]).unwrap_err();
        assert_eq!(err, SeriesError::NonFiniteTime { index: 0 });
    }

    #[test]
    fn lookup_is_order_independent() {
        let s = series(&[(1990.0, Some(1.0)), (1991.0, Some(2.0)), (1992.0, Some(3.0))]);
        let forward: Vec<_> = [1990.0, 1991.0, 1992.0].map(|t| s.value_at(t)).into();
        let backward: Vec<_> = [1992.0, 1991.0, 1990.0].map(|t| s.value_at(t)).into();
        assert_eq!(forward, vec![Some(1.0), Some(2.0), Some(3.0)]);
        assert_eq!(backward, vec![Some(3.0), Some(2.0), Some(1.0)]);
    }
}
