// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale utilities.
//!
//! Scales are pure `Copy` values: a domain and a range fixed at construction. Pan and zoom
//! never touch them; the interaction layer applies its own affine transform after all scale
//! math is done.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use vizflow_transforms::{AttrId, Frame};

use crate::error::{ScaleError, ScaleKind};
use crate::geo::GeoProjection;
use crate::ordinal::ScaleOrdinal;

/// A continuous scale specification (domain + options, no range yet).
#[derive(Clone, Copy, Debug)]
pub enum ScaleSpec {
    /// Continuous linear scale.
    Linear(ScaleLinearSpec),
    /// Continuous natural-log scale.
    Log(ScaleLogSpec),
    /// Continuous square-root scale.
    Sqrt(ScaleSqrtSpec),
}

impl ScaleSpec {
    /// Builds a concrete scale for `range`, validating the domain and range.
    pub fn instantiate(&self, range: (f64, f64)) -> Result<ScaleContinuous, ScaleError> {
        match self {
            Self::Linear(s) => s.instantiate(range).map(ScaleContinuous::Linear),
            Self::Log(s) => s.instantiate(range).map(ScaleContinuous::Log),
            Self::Sqrt(s) => s.instantiate(range).map(ScaleContinuous::Sqrt),
        }
    }
}

impl From<ScaleLinearSpec> for ScaleSpec {
    fn from(value: ScaleLinearSpec) -> Self {
        Self::Linear(value)
    }
}

impl From<ScaleLogSpec> for ScaleSpec {
    fn from(value: ScaleLogSpec) -> Self {
        Self::Log(value)
    }
}

impl From<ScaleSqrtSpec> for ScaleSpec {
    fn from(value: ScaleSqrtSpec) -> Self {
        Self::Sqrt(value)
    }
}

/// Any scale, for code that handles scale kinds uniformly.
#[derive(Clone, Debug)]
pub enum Scale {
    /// Linear scale.
    Linear(ScaleLinear),
    /// Natural-log scale.
    Log(ScaleLog),
    /// Square-root scale.
    Sqrt(ScaleSqrt),
    /// Categorical palette scale.
    Ordinal(ScaleOrdinal),
    /// Geographic projection.
    Geo(GeoProjection),
}

impl Scale {
    /// Returns the kind of this scale.
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Linear(_) => ScaleKind::Linear,
            Self::Log(_) => ScaleKind::Log,
            Self::Sqrt(_) => ScaleKind::Sqrt,
            Self::Ordinal(_) => ScaleKind::Ordinal,
            Self::Geo(_) => ScaleKind::Geo,
        }
    }

    /// Returns the numeric scale, if this is one.
    pub fn as_continuous(&self) -> Option<ScaleContinuous> {
        match self {
            Self::Linear(s) => Some(ScaleContinuous::Linear(*s)),
            Self::Log(s) => Some(ScaleContinuous::Log(*s)),
            Self::Sqrt(s) => Some(ScaleContinuous::Sqrt(*s)),
            Self::Ordinal(_) | Self::Geo(_) => None,
        }
    }

    /// Maps a numeric domain value. Fails for ordinal and geographic scales, which take
    /// categories and coordinate pairs instead.
    pub fn apply(&self, x: f64) -> Result<f64, ScaleError> {
        match self.as_continuous() {
            Some(s) => s.try_map(x),
            None => Err(ScaleError::UnsupportedOperation {
                kind: self.kind(),
                op: "numeric apply",
            }),
        }
    }

    /// Maps a range value back into the domain.
    ///
    /// Ordinal and geographic scales have no inverse and return
    /// [`ScaleError::UnsupportedOperation`].
    pub fn invert(&self, y: f64) -> Result<f64, ScaleError> {
        match self.as_continuous() {
            Some(s) => Ok(s.invert(y)),
            None => Err(ScaleError::UnsupportedOperation {
                kind: self.kind(),
                op: "invert",
            }),
        }
    }
}

impl From<ScaleContinuous> for Scale {
    fn from(value: ScaleContinuous) -> Self {
        match value {
            ScaleContinuous::Linear(s) => Self::Linear(s),
            ScaleContinuous::Log(s) => Self::Log(s),
            ScaleContinuous::Sqrt(s) => Self::Sqrt(s),
        }
    }
}

impl From<ScaleOrdinal> for Scale {
    fn from(value: ScaleOrdinal) -> Self {
        Self::Ordinal(value)
    }
}

impl From<GeoProjection> for Scale {
    fn from(value: GeoProjection) -> Self {
        Self::Geo(value)
    }
}

/// A continuous scale instance.
#[derive(Clone, Copy, Debug)]
pub enum ScaleContinuous {
    /// Linear scale.
    Linear(ScaleLinear),
    /// Log scale.
    Log(ScaleLog),
    /// Square-root scale.
    Sqrt(ScaleSqrt),
}

impl ScaleContinuous {
    /// Returns the kind of this scale.
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Linear(_) => ScaleKind::Linear,
            Self::Log(_) => ScaleKind::Log,
            Self::Sqrt(_) => ScaleKind::Sqrt,
        }
    }

    /// Maps a value from domain space into range space, failing on invalid input.
    pub fn try_map(&self, x: f64) -> Result<f64, ScaleError> {
        match self {
            Self::Linear(s) => Ok(s.map(x)),
            Self::Log(s) => s.try_map(x),
            Self::Sqrt(s) => Ok(s.map(x)),
        }
    }

    /// Maps a value from domain space into range space.
    ///
    /// Invalid input maps to the start of the range; use [`Self::try_map`] to detect it.
    pub fn map(&self, x: f64) -> f64 {
        match self {
            Self::Linear(s) => s.map(x),
            Self::Log(s) => s.map(x),
            Self::Sqrt(s) => s.map(x),
        }
    }

    /// Maps a value from range space back into domain space.
    pub fn invert(&self, y: f64) -> f64 {
        match self {
            Self::Linear(s) => s.invert(y),
            Self::Log(s) => s.invert(y),
            Self::Sqrt(s) => s.invert(y),
        }
    }

    /// Returns the minimum of the configured domain (as authored).
    pub fn domain_min(&self) -> f64 {
        self.domain().0
    }

    /// Returns the maximum of the configured domain (as authored).
    pub fn domain_max(&self) -> f64 {
        self.domain().1
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.domain,
            Self::Log(s) => s.domain,
            Self::Sqrt(s) => s.domain,
        }
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.range,
            Self::Log(s) => s.inner.range,
            Self::Sqrt(s) => s.inner.range,
        }
    }

    /// Returns tick values inside the domain, ascending.
    ///
    /// Log scales tick at powers of ten; linear and square-root scales use nice steps.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (a, b) = self.domain();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let eps = (hi - lo).abs() * 1e-9;
        let ticks = match self {
            Self::Log(_) => {
                let first = (lo.log10() - 1e-9).ceil();
                let last = (hi.log10() + 1e-9).floor();
                let mut out = Vec::new();
                let mut e = first;
                while e <= last && out.len() < 64 {
                    out.push(10_f64.powf(e));
                    e += 1.0;
                }
                out
            }
            Self::Linear(_) | Self::Sqrt(_) => nice_ticks(lo, hi, count),
        };
        ticks
            .into_iter()
            .filter(|t| *t >= lo - eps && *t <= hi + eps)
            .collect()
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

/// Specification for a linear scale (domain + options, no range yet).
#[derive(Clone, Copy, Debug)]
pub struct ScaleLinearSpec {
    /// Domain in data units.
    pub domain: (f64, f64),
    /// Whether to "nice" the domain based on tick generation.
    pub nice: bool,
    /// Whether to clamp output to the range.
    pub clamp: bool,
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values, validating both.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self, ScaleError> {
        check_domain(ScaleKind::Linear, domain)?;
        check_range(ScaleKind::Linear, range)?;
        Ok(Self {
            domain,
            range,
            clamp: false,
        })
    }

    /// Enables or disables clamping of mapped values to the range.
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = (x - d0) / (d1 - d0);
        let t = if self.clamp { t.clamp(0.0, 1.0) } else { t };
        r0 + t * (r1 - r0)
    }

    /// Maps a value from range space back into domain space.
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return d0;
        }
        let t = (y - r0) / denom;
        let t = if self.clamp { t.clamp(0.0, 1.0) } else { t };
        d0 + t * (d1 - d0)
    }

    /// Returns the minimum of the configured domain (as authored).
    pub fn domain_min(&self) -> f64 {
        self.domain.0
    }

    /// Returns the maximum of the configured domain (as authored).
    pub fn domain_max(&self) -> f64 {
        self.domain.1
    }

    /// Returns “nice-ish” tick values for the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

impl ScaleLinearSpec {
    /// Creates a new linear scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            nice: false,
            clamp: false,
        }
    }

    /// Enables or disables nice-domain behavior.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Enables or disables clamping.
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Returns the effective domain after applying `nice` (if enabled).
    pub fn resolved_domain(&self, tick_count: usize) -> (f64, f64) {
        if !self.nice {
            return self.domain;
        }
        let ticks = nice_ticks(self.domain.0, self.domain.1, tick_count);
        match (ticks.first(), ticks.last()) {
            (Some(&lo), Some(&hi)) if ticks.len() >= 2 => {
                if self.domain.0 <= self.domain.1 {
                    (lo, hi)
                } else {
                    (hi, lo)
                }
            }
            _ => self.domain,
        }
    }

    /// Instantiates a concrete scale for a given output range.
    ///
    /// A nice domain is resolved with 10 ticks, matching the usual axis density.
    pub fn instantiate(&self, range: (f64, f64)) -> Result<ScaleLinear, ScaleError> {
        Ok(ScaleLinear::new(self.resolved_domain(10), range)?.with_clamp(self.clamp))
    }
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step0 = span / count.max(1) as f64;
    let step = nice_step(step0);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;

    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };
    (0..=n).map(|i| start + step * i as f64).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// A natural-log mapping from a strictly positive domain to a range.
#[derive(Clone, Copy, Debug)]
pub struct ScaleLog {
    domain: (f64, f64),
    inner: ScaleLinear,
}

/// Specification for a log scale.
#[derive(Clone, Copy, Debug)]
pub struct ScaleLogSpec {
    /// Domain in data units (both bounds must be positive).
    pub domain: (f64, f64),
    /// Whether to clamp output to the range.
    pub clamp: bool,
}

impl ScaleLog {
    /// Creates a new log scale. Both domain bounds must be finite and positive.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self, ScaleError> {
        let (d0, d1) = domain;
        if !(d0 > 0.0 && d1 > 0.0) {
            return Err(ScaleError::InvalidDomain {
                kind: ScaleKind::Log,
                lo: d0,
                hi: d1,
            });
        }
        check_domain(ScaleKind::Log, domain)?;
        check_range(ScaleKind::Log, range)?;
        Ok(Self {
            domain,
            inner: ScaleLinear {
                domain: (d0.ln(), d1.ln()),
                range,
                clamp: false,
            },
        })
    }

    /// Enables or disables clamping of mapped values to the range.
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.inner.clamp = clamp;
        self
    }

    /// Maps a value, failing with [`ScaleError::Domain`] for `x <= 0`.
    pub fn try_map(&self, x: f64) -> Result<f64, ScaleError> {
        if x > 0.0 {
            Ok(self.inner.map(x.ln()))
        } else {
            Err(ScaleError::Domain {
                kind: ScaleKind::Log,
                value: x,
            })
        }
    }

    /// Maps a value; non-positive input maps to the start of the range.
    pub fn map(&self, x: f64) -> f64 {
        self.try_map(x).unwrap_or(self.inner.range.0)
    }

    /// Maps a range value back into the (positive) domain.
    pub fn invert(&self, y: f64) -> f64 {
        self.inner.invert(y).exp()
    }

    /// Returns the minimum of the configured domain (as authored).
    pub fn domain_min(&self) -> f64 {
        self.domain.0
    }

    /// Returns the maximum of the configured domain (as authored).
    pub fn domain_max(&self) -> f64 {
        self.domain.1
    }
}

impl ScaleLogSpec {
    /// Creates a new log scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            clamp: false,
        }
    }

    /// Enables or disables clamping.
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> Result<ScaleLog, ScaleError> {
        Ok(ScaleLog::new(self.domain, range)?.with_clamp(self.clamp))
    }
}

/// A square-root mapping.
///
/// Mapping radii through a square root makes circle *area* proportional to the value, which is
/// what readers compare. Negative input maps sign-symmetrically.
#[derive(Clone, Copy, Debug)]
pub struct ScaleSqrt {
    domain: (f64, f64),
    inner: ScaleLinear,
}

/// Specification for a square-root scale.
#[derive(Clone, Copy, Debug)]
pub struct ScaleSqrtSpec {
    /// Domain in data units.
    pub domain: (f64, f64),
    /// Whether to clamp output to the range.
    pub clamp: bool,
}

fn signed_sqrt(x: f64) -> f64 {
    if x < 0.0 { -(-x).sqrt() } else { x.sqrt() }
}

impl ScaleSqrt {
    /// Creates a new square-root scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self, ScaleError> {
        check_domain(ScaleKind::Sqrt, domain)?;
        check_range(ScaleKind::Sqrt, range)?;
        Ok(Self {
            domain,
            inner: ScaleLinear {
                domain: (signed_sqrt(domain.0), signed_sqrt(domain.1)),
                range,
                clamp: false,
            },
        })
    }

    /// Enables or disables clamping of mapped values to the range.
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.inner.clamp = clamp;
        self
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        self.inner.map(signed_sqrt(x))
    }

    /// Maps a range value back into domain space.
    pub fn invert(&self, y: f64) -> f64 {
        let s = self.inner.invert(y);
        if s < 0.0 { -(s * s) } else { s * s }
    }

    /// Returns the minimum of the configured domain (as authored).
    pub fn domain_min(&self) -> f64 {
        self.domain.0
    }

    /// Returns the maximum of the configured domain (as authored).
    pub fn domain_max(&self) -> f64 {
        self.domain.1
    }
}

impl ScaleSqrtSpec {
    /// Creates a new square-root scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            clamp: false,
        }
    }

    /// Enables or disables clamping.
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> Result<ScaleSqrt, ScaleError> {
        Ok(ScaleSqrt::new(self.domain, range)?.with_clamp(self.clamp))
    }
}

fn check_domain(kind: ScaleKind, (lo, hi): (f64, f64)) -> Result<(), ScaleError> {
    if lo.is_finite() && hi.is_finite() && lo != hi {
        Ok(())
    } else {
        Err(ScaleError::InvalidDomain { kind, lo, hi })
    }
}

fn check_range(kind: ScaleKind, (lo, hi): (f64, f64)) -> Result<(), ScaleError> {
    if lo.is_finite() && hi.is_finite() {
        Ok(())
    } else {
        Err(ScaleError::InvalidRange { kind })
    }
}

/// A discrete band scale for categorical rows or columns.
#[derive(Clone, Copy, Debug)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
    padding_inner: f64,
    padding_outer: f64,
}

impl ScaleBand {
    /// Creates a new band scale covering `count` bands over `range`.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    /// Sets inner and outer padding in band units.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.max(0.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Returns the computed band width.
    pub fn band_width(&self) -> f64 {
        let (r0, r1) = self.range;
        let n = self.count as f64;
        if n <= 0.0 {
            return 0.0;
        }
        let span = (r1 - r0).abs();
        let denom = n + self.padding_inner * (n - 1.0) + 2.0 * self.padding_outer;
        if denom == 0.0 { 0.0 } else { span / denom }
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the start position of the band at `index`.
    pub fn position(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let bw = self.band_width();
        let step = bw * (1.0 + self.padding_inner);
        let start = if r1 >= r0 { r0 } else { r1 };
        start + bw * self.padding_outer + step * index as f64
    }
}

/// Infer a `(min, max)` domain for an attribute of a frame.
///
/// Absent and non-finite values are ignored. Returns `None` if no finite values are present.
pub fn infer_domain(frame: &Frame, attr: AttrId) -> Option<(f64, f64)> {
    infer_domain_f64((0..frame.row_count()).filter_map(|row| frame.f64(row, attr)))
}

/// Infer a `(min, max)` domain from raw values, ignoring non-finite ones.
pub fn infer_domain_f64(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if !v.is_finite() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn linear_matches_formula() {
        let s = ScaleLinear::new((0.0, 100.0), (500.0, 0.0)).unwrap();
        assert!(close(s.map(0.0), 500.0));
        assert!(close(s.map(25.0), 375.0));
        assert!(close(s.map(100.0), 0.0));
    }

    #[test]
    fn continuous_scales_round_trip() {
        let scales = [
            ScaleContinuous::Linear(ScaleLinear::new((-3.0, 7.0), (10.0, 410.0)).unwrap()),
            ScaleContinuous::Log(ScaleLog::new((100.0, 2e5), (0.0, 800.0)).unwrap()),
            ScaleContinuous::Sqrt(ScaleSqrt::new((0.0, 1.5e9), (1.0, 40.0)).unwrap()),
        ];
        for s in scales {
            let (lo, hi) = s.domain();
            for i in 0..=20 {
                let x = lo + (hi - lo) * f64::from(i) / 20.0;
                if s.kind() == ScaleKind::Log && x <= 0.0 {
                    continue;
                }
                let y = s.try_map(x).unwrap();
                assert!(close(s.invert(y), x), "{:?}: {x} -> {y} -> {}", s.kind(), s.invert(y));
            }
        }
    }

    #[test]
    fn sqrt_is_area_linear() {
        let s = ScaleSqrt::new((0.0, 1e6), (0.0, 40.0)).unwrap();
        for x in [1.0, 12.5, 900.0, 2e5] {
            assert!(close(s.map(4.0 * x) / s.map(x), 2.0));
        }
    }

    #[test]
    fn log_rejects_non_positive_input() {
        let s = ScaleLog::new((1.0, 100.0), (0.0, 10.0)).unwrap();
        assert!(close(s.try_map(1.0).unwrap(), 0.0));
        assert!(close(s.try_map(100.0).unwrap(), 10.0));
        assert_eq!(
            s.try_map(0.0),
            Err(ScaleError::Domain {
                kind: ScaleKind::Log,
                value: 0.0
            })
        );
        assert!(s.try_map(-5.0).is_err());
    }

    #[test]
    fn malformed_domains_fail_at_construction() {
        assert!(matches!(
            ScaleLinear::new((1.0, 1.0), (0.0, 1.0)),
            Err(ScaleError::InvalidDomain { .. })
        ));
        assert!(matches!(
            ScaleLog::new((0.0, 100.0), (0.0, 1.0)),
            Err(ScaleError::InvalidDomain { .. })
        ));
        assert!(matches!(
            ScaleSqrt::new((0.0, f64::NAN), (0.0, 1.0)),
            Err(ScaleError::InvalidDomain { .. })
        ));
        assert!(matches!(
            ScaleLinear::new((0.0, 1.0), (0.0, f64::INFINITY)),
            Err(ScaleError::InvalidRange { .. })
        ));
    }

    #[test]
    fn clamp_limits_map_and_invert() {
        let s = ScaleLinearSpec::new((1990.0, 2012.0))
            .with_clamp(true)
            .instantiate((10.0, 120.0))
            .unwrap();
        assert!(close(s.invert(0.0), 1990.0));
        assert!(close(s.invert(500.0), 2012.0));
        assert!(close(s.map(2050.0), 120.0));
    }

    #[test]
    fn nice_domain_rounds_outward() {
        let spec = ScaleLinearSpec::new((0.0, 97.3)).with_nice(true);
        assert_eq!(spec.resolved_domain(10), (0.0, 100.0));
    }

    #[test]
    fn ordinal_and_geo_have_no_inverse() {
        let ordinal = Scale::from(ScaleOrdinal::category10());
        let geo = Scale::from(GeoProjection::mercator(960.0, (0.0, 0.0)));
        for s in [ordinal, geo] {
            assert!(matches!(
                s.invert(1.0),
                Err(ScaleError::UnsupportedOperation { op: "invert", .. })
            ));
        }
        let lin = Scale::from(ScaleContinuous::Linear(
            ScaleLinear::new((0.0, 10.0), (0.0, 100.0)).unwrap(),
        ));
        assert!(close(lin.invert(50.0).unwrap(), 5.0));
        assert!(close(lin.apply(5.0).unwrap(), 50.0));
    }

    #[test]
    fn spec_enum_builds_each_kind() {
        let s = ScaleSpec::from(ScaleLogSpec::new((100.0, 2e5)))
            .instantiate((0.0, 600.0))
            .unwrap();
        assert_eq!(s.kind(), ScaleKind::Log);
        assert_eq!(s.range(), (0.0, 600.0));
        assert!(ScaleSpec::from(ScaleSqrtSpec::new((5.0, 5.0)))
            .instantiate((0.0, 1.0))
            .is_err());
    }

    #[test]
    fn band_positions_are_monotonic() {
        let band = ScaleBand::new((0.0, 51.0), 3).with_padding(0.0, 0.0);
        assert!(close(band.band_width(), 17.0));
        assert!(close(band.position(0), 0.0));
        assert!(close(band.position(2), 34.0));
    }

    #[test]
    fn infer_domain_skips_non_finite() {
        assert_eq!(
            infer_domain_f64([3.0, f64::NAN, -1.0, f64::INFINITY]),
            Some((-1.0, 3.0))
        );
        assert_eq!(infer_domain_f64([f64::NAN]), None);
    }

    #[test]
    fn ticks_stay_inside_the_domain() {
        let log = ScaleContinuous::Log(ScaleLog::new((100.0, 2e5), (0.0, 900.0)).unwrap());
        let t = log.ticks(10);
        assert_eq!(t.len(), 4);
        assert!(close(t[0], 100.0) && close(t[3], 1e5));

        let lin = ScaleContinuous::Linear(ScaleLinear::new((0.0, 100.0), (500.0, 0.0)).unwrap());
        let t = lin.ticks(10);
        assert_eq!(t.len(), 11);
        assert!(close(t[1], 10.0));
    }
}
