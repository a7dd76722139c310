//! Measurement time series and gap repair.
//!
//! This module provides tools for:
//! - Holding strictly time-ordered (time, value) samples and interpolating them
//! - Smoothing a uniformly sampled series with a Gaussian kernel
//! - Filling sentinel-marked gaps with interpolation plus realistic noise
//!
//! # Example
//!
//! ```
//! use advect1d::analysis::TimeSeries;
//!
//! let series = TimeSeries::new(&[0.0, 60.0, 120.0], &[400.0, 420.0, 410.0]).unwrap();
//! assert_eq!(series.interpolate(30.0).unwrap(), 410.0);
//! assert!(series.interpolate(200.0).is_err());
//! ```

mod gap_fill;
mod smoothing;

pub use gap_fill::{GapFillConfig, GapFillError, GapFillReport, fill_gaps, fill_gaps_with_rng, find_gaps};
pub use smoothing::gaussian_smooth;

use thiserror::Error;

/// Errors raised while building or sampling a time series.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TimeSeriesError {
    /// No samples
    #[error("Time series contains no data")]
    Empty,

    /// Times and values have different lengths
    #[error("Time series has {times} times but {values} values")]
    LengthMismatch { times: usize, values: usize },

    /// Times not strictly increasing (or not finite)
    #[error("Non-monotonic time at index {index}")]
    NonMonotonic { index: usize },

    /// Requested time outside the sampled range
    #[error("Time {t} outside series range [{start}, {end}]")]
    OutOfRange { t: f64, start: f64, end: f64 },
}

/// A single time series data point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeSeriesPoint {
    /// Time in seconds
    pub time: f64,
    /// Measured value (position in km, velocity in km/s, ...)
    pub value: f64,
}

/// Strictly time-ordered sequence of samples.
///
/// Used both for measurement-point positions and for measured quantities.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    data: Vec<TimeSeriesPoint>,
}

impl TimeSeries {
    /// Create a time series from parallel arrays of times and values.
    ///
    /// # Errors
    /// - `LengthMismatch` if the arrays differ in length
    /// - `Empty` if no samples are given
    /// - `NonMonotonic` if times are not strictly increasing
    pub fn new(times: &[f64], values: &[f64]) -> Result<Self, TimeSeriesError> {
        if times.len() != values.len() {
            return Err(TimeSeriesError::LengthMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        let data = times
            .iter()
            .zip(values)
            .map(|(&time, &value)| TimeSeriesPoint { time, value })
            .collect();
        Self::from_points(data)
    }

    /// Create a time series from points, validating the ordering.
    pub fn from_points(data: Vec<TimeSeriesPoint>) -> Result<Self, TimeSeriesError> {
        if data.is_empty() {
            return Err(TimeSeriesError::Empty);
        }
        if !data[0].time.is_finite() {
            return Err(TimeSeriesError::NonMonotonic { index: 0 });
        }
        for i in 1..data.len() {
            if !(data[i].time > data[i - 1].time) || !data[i].time.is_finite() {
                return Err(TimeSeriesError::NonMonotonic { index: i });
            }
        }
        Ok(Self { data })
    }

    /// Constant-value series sampled at `times`.
    pub fn constant(times: &[f64], value: f64) -> Result<Self, TimeSeriesError> {
        Self::new(times, &vec![value; times.len()])
    }

    /// Number of data points.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// A validated series is never empty; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The samples.
    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.data
    }

    /// First sample.
    pub fn first(&self) -> TimeSeriesPoint {
        self.data[0]
    }

    /// Last sample.
    pub fn last(&self) -> TimeSeriesPoint {
        self.data[self.data.len() - 1]
    }

    /// Time range covered, `(first, last)`.
    pub fn time_range(&self) -> (f64, f64) {
        (self.first().time, self.last().time)
    }

    /// Duration of the time series (last time - first time).
    pub fn duration(&self) -> f64 {
        let (t0, t1) = self.time_range();
        t1 - t0
    }

    /// Get times as a vector.
    pub fn times(&self) -> Vec<f64> {
        self.data.iter().map(|p| p.time).collect()
    }

    /// Get values as a vector.
    pub fn values(&self) -> Vec<f64> {
        self.data.iter().map(|p| p.value).collect()
    }

    /// Check if time `t` is within the covered range.
    pub fn contains_time(&self, t: f64) -> bool {
        let (t0, t1) = self.time_range();
        t >= t0 && t <= t1
    }

    /// Linearly interpolate the value at time `t`.
    ///
    /// # Errors
    /// `OutOfRange` if `t` lies outside the sampled range; the series is
    /// never extrapolated.
    pub fn interpolate(&self, t: f64) -> Result<f64, TimeSeriesError> {
        let (start, end) = self.time_range();
        if !self.contains_time(t) {
            return Err(TimeSeriesError::OutOfRange { t, start, end });
        }

        // First sample with time >= t
        let hi = self.data.partition_point(|p| p.time < t);
        if hi == 0 {
            return Ok(self.data[0].value);
        }
        let (p0, p1) = (self.data[hi - 1], self.data[hi]);
        let alpha = (t - p0.time) / (p1.time - p0.time);
        Ok(p0.value + alpha * (p1.value - p0.value))
    }

    /// Copy of the series with every time shifted by `-offset`.
    pub fn shifted(&self, offset: f64) -> Self {
        Self {
            data: self
                .data
                .iter()
                .map(|p| TimeSeriesPoint {
                    time: p.time - offset,
                    value: p.value,
                })
                .collect(),
        }
    }

    /// Keep only samples with `min < value < max`.
    ///
    /// # Errors
    /// `Empty` if nothing survives.
    pub fn retain_within(&self, min: f64, max: f64) -> Result<Self, TimeSeriesError> {
        let data: Vec<_> = self
            .data
            .iter()
            .copied()
            .filter(|p| p.value > min && p.value < max)
            .collect();
        if data.is_empty() {
            return Err(TimeSeriesError::Empty);
        }
        Ok(Self { data })
    }

    /// Compute the mean value.
    pub fn mean(&self) -> f64 {
        self.data.iter().map(|p| p.value).sum::<f64>() / self.data.len() as f64
    }
}
