//! Repair of sentinel-marked gaps in telemetry.
//!
//! Each maximal run of fill values bracketed by valid samples is replaced by
//! a linear ramp between the neighbours. Optionally, fluctuations drawn from
//! the empirical distribution of the series' small-scale residuals are added
//! to the ramp so the repaired stretch carries realistic variability instead
//! of an artificially smooth line (Owens et al., Space Weather, 2014).
//!
//! # Algorithm
//!
//! ```text
//! residual = series - gaussian_smooth(series, sigma)
//! sort residuals, p = linspace(0, 1, n)
//! cap tails below p = winsor and above p = 1 - winsor
//! filled[i] += residual[searchsorted(p, U)],  U ~ Uniform[0, 1)
//! ```

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::smoothing::gaussian_smooth;

/// Relative tolerance used when matching the fill sentinel.
const FILL_RTOL: f64 = 1e-12;

/// Errors raised by the gap filler.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GapFillError {
    /// Gap touches an end of the series, so it has no neighbour on one side
    #[error("Gap at samples {start}..={end} touches the end of a series of length {len}")]
    Unresolvable { start: usize, end: usize, len: usize },

    /// Configuration out of range
    #[error("Invalid gap-fill configuration: {reason}")]
    InvalidConfig { reason: String },
}

/// Gap-filling parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapFillConfig {
    /// Value marking a missing sample
    pub fill_value: f64,
    /// Width (in samples) of the Gaussian used to isolate fluctuations
    pub sigma: f64,
    /// Fraction trimmed from each tail of the residual distribution
    pub winsor: f64,
    /// Add fluctuations to the interpolated stretches
    pub noise: bool,
    /// Never let filled values drop below the smallest measured value
    /// (only when every measured value is positive)
    pub constrain: bool,
}

impl Default for GapFillConfig {
    fn default() -> Self {
        Self {
            fill_value: 9_999_999.0,
            sigma: 5.0,
            winsor: 0.05,
            noise: false,
            constrain: false,
        }
    }
}

impl GapFillConfig {
    /// Set the fill sentinel.
    pub fn with_fill_value(mut self, fill_value: f64) -> Self {
        self.fill_value = fill_value;
        self
    }

    /// Set the smoothing width.
    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set the winsorization fraction.
    pub fn with_winsor(mut self, winsor: f64) -> Self {
        self.winsor = winsor;
        self
    }

    /// Enable or disable noise.
    pub fn with_noise(mut self, noise: bool) -> Self {
        self.noise = noise;
        self
    }

    /// Enable or disable the positivity constraint.
    pub fn with_constrain(mut self, constrain: bool) -> Self {
        self.constrain = constrain;
        self
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), GapFillError> {
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(GapFillError::InvalidConfig {
                reason: format!("sigma must be finite and > 0, got {}", self.sigma),
            });
        }
        if !(0.0..0.5).contains(&self.winsor) {
            return Err(GapFillError::InvalidConfig {
                reason: format!("winsor must lie in [0, 0.5), got {}", self.winsor),
            });
        }
        Ok(())
    }

    fn is_fill(&self, x: f64) -> bool {
        if self.fill_value.is_nan() {
            return x.is_nan();
        }
        x == self.fill_value
            || (x - self.fill_value).abs() <= FILL_RTOL * x.abs().max(self.fill_value.abs())
    }
}

/// Summary of a gap-filling pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GapFillReport {
    /// Filled sample ranges
    pub gaps: Vec<RangeInclusive<usize>>,
    /// Total number of samples replaced
    pub n_filled: usize,
}

impl GapFillReport {
    /// Whether the series needed no repair.
    pub fn is_clean(&self) -> bool {
        self.gaps.is_empty()
    }
}

/// Locate maximal runs of fill values.
///
/// # Errors
/// `Unresolvable` if a run touches either end of the series.
pub fn find_gaps(
    data: &[f64],
    config: &GapFillConfig,
) -> Result<Vec<RangeInclusive<usize>>, GapFillError> {
    let n = data.len();
    let mut gaps = Vec::new();
    let mut i = 0;
    while i < n {
        if !config.is_fill(data[i]) {
            i += 1;
            continue;
        }
        let start = i;
        while i + 1 < n && config.is_fill(data[i + 1]) {
            i += 1;
        }
        let end = i;
        if start == 0 || end == n - 1 {
            return Err(GapFillError::Unresolvable { start, end, len: n });
        }
        gaps.push(start..=end);
        i += 1;
    }
    Ok(gaps)
}

/// Index of the first grid probability `>= q` on `linspace(0, 1, n)`.
#[inline]
fn quantile_index(q: f64, n: usize) -> usize {
    if n < 2 {
        return 0;
    }
    let last = (n - 1) as f64;
    // Smallest i with i / (n - 1) >= q
    let (mut lo, mut hi) = (0, n);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if (mid as f64 / last) < q {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Sorted, tail-capped residuals of `series` about its smoothed self.
fn residual_distribution(series: &[f64], sigma: f64, winsor: f64) -> Vec<f64> {
    let smooth = gaussian_smooth(series, sigma);
    let mut residuals: Vec<f64> = series.iter().zip(&smooth).map(|(s, m)| s - m).collect();
    residuals.sort_by(f64::total_cmp);

    let n = residuals.len();
    if n == 0 {
        return residuals;
    }
    let last = n - 1;

    let lo = quantile_index(winsor, n);
    if lo > 0 {
        let cap = residuals[(lo + 1).min(last)];
        residuals[..lo.min(n)].fill(cap);
    }
    let hi = quantile_index(1.0 - winsor, n);
    if hi < n {
        let cap = residuals[hi.saturating_sub(1)];
        residuals[hi..].fill(cap);
    }
    residuals
}

/// Fill gaps in place using the thread-local RNG for noise.
pub fn fill_gaps(data: &mut [f64], config: &GapFillConfig) -> Result<GapFillReport, GapFillError> {
    fill_gaps_with_rng(data, config, &mut rand::thread_rng())
}

/// Fill gaps in place, drawing noise from `rng`.
///
/// A series without fill values is left bit-identical.
///
/// # Errors
/// - `InvalidConfig` if the configuration is out of range
/// - `Unresolvable` if a gap touches either end of the series
pub fn fill_gaps_with_rng<R: Rng + ?Sized>(
    data: &mut [f64],
    config: &GapFillConfig,
    rng: &mut R,
) -> Result<GapFillReport, GapFillError> {
    config.validate()?;

    let gaps = find_gaps(data, config)?;
    if gaps.is_empty() {
        return Ok(GapFillReport::default());
    }

    for gap in &gaps {
        let (start, end) = (*gap.start(), *gap.end());
        let a = data[start - 1];
        let b = data[end + 1];
        let step = (b - a) / (end - start + 2) as f64;
        for (k, slot) in data[start..=end].iter_mut().enumerate() {
            *slot = a + step * (k + 1) as f64;
        }
    }

    // Linear ramps never undershoot their neighbours, so this is the
    // smallest measured value
    let floor = data.iter().copied().fold(f64::INFINITY, f64::min);

    if config.noise {
        let residuals = residual_distribution(data, config.sigma, config.winsor);
        let n = residuals.len();
        for gap in &gaps {
            for slot in &mut data[gap.clone()] {
                let u: f64 = rng.r#gen();
                let idx = quantile_index(u, n).min(n - 1);
                *slot += residuals[idx];
            }
        }
    }

    if config.constrain && floor > 0.0 {
        for gap in &gaps {
            for slot in &mut data[gap.clone()] {
                if *slot < floor {
                    *slot = floor;
                }
            }
        }
    }

    let n_filled = gaps.iter().map(|g| g.end() - g.start() + 1).sum();
    debug!(
        n_gaps = gaps.len(),
        n_filled,
        noise = config.noise,
        "filled gaps"
    );

    Ok(GapFillReport { gaps, n_filled })
}
