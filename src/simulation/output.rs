//! Time series sampled at the observation point.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{TimeSeries, TimeSeriesError};
use crate::solver::VELOCITY_VAR;

/// Ram pressure coefficient: nPa per (cm^-3 * (km/s)^2), proton mass.
pub const RAM_PRESSURE_COEFF: f64 = 1.67621e-6;

/// Density variable used for derived quantities.
pub const DENSITY_VAR: &str = "rho";

/// Append-only (time, value) samples of one variable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl OutputRecord {
    /// Empty record.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, time: f64, value: f64) {
        self.times.push(time);
        self.values.push(value);
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether no samples were recorded.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Sample times, relative to the epoch.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Sampled values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate over `(time, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }

    /// Most recent sample.
    pub fn last(&self) -> Option<(f64, f64)> {
        Some((*self.times.last()?, *self.values.last()?))
    }

    /// Convert to an interpolating [`TimeSeries`].
    pub fn to_time_series(&self) -> Result<TimeSeries, TimeSeriesError> {
        TimeSeries::new(&self.times, &self.values)
    }
}

/// Records for every advected variable plus the absolute epoch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    epoch: DateTime<Utc>,
    output_x: f64,
    records: BTreeMap<String, OutputRecord>,
}

impl SimulationOutput {
    pub(crate) fn new<'a>(
        epoch: DateTime<Utc>,
        output_x: f64,
        variables: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            epoch,
            output_x,
            records: variables
                .into_iter()
                .map(|name| (name.to_string(), OutputRecord::new()))
                .collect(),
        }
    }

    pub(crate) fn record_mut(&mut self, name: &str) -> &mut OutputRecord {
        self.records.entry(name.to_string()).or_default()
    }

    /// Absolute time of relative time zero.
    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    /// Coordinate the records were sampled at.
    pub fn output_x(&self) -> f64 {
        self.output_x
    }

    /// Record for one variable.
    pub fn record(&self, name: &str) -> Option<&OutputRecord> {
        self.records.get(name)
    }

    /// All records by variable name.
    pub fn records(&self) -> &BTreeMap<String, OutputRecord> {
        &self.records
    }

    /// Recorded variable names.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Number of output samples.
    pub fn len(&self) -> usize {
        self.records.get(VELOCITY_VAR).map_or(0, OutputRecord::len)
    }

    /// Whether nothing was recorded yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Output times relative to the epoch, in seconds.
    pub fn times(&self) -> &[f64] {
        self.records
            .get(VELOCITY_VAR)
            .map_or(&[], |record| record.times())
    }

    /// Convert a relative time in seconds to an absolute timestamp.
    pub fn absolute_time(&self, t: f64) -> DateTime<Utc> {
        self.epoch + seconds_to_delta(t)
    }

    /// Output times as absolute timestamps.
    pub fn absolute_times(&self) -> Vec<DateTime<Utc>> {
        self.times().iter().map(|&t| self.absolute_time(t)).collect()
    }

    /// Solar wind ram pressure per sample, `1.67621e-6 * rho * ux^2`.
    ///
    /// `None` unless both density and velocity were advected.
    pub fn ram_pressure(&self) -> Option<Vec<f64>> {
        let rho = self.records.get(DENSITY_VAR)?;
        let ux = self.records.get(VELOCITY_VAR)?;
        Some(
            rho.values()
                .iter()
                .zip(ux.values())
                .map(|(n, u)| RAM_PRESSURE_COEFF * n * u * u)
                .collect(),
        )
    }
}

/// Seconds to a [`TimeDelta`] at microsecond resolution.
pub(crate) fn seconds_to_delta(seconds: f64) -> TimeDelta {
    TimeDelta::microseconds((seconds * 1e6).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2005, 1, 16, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_record_push_and_iter() {
        let mut record = OutputRecord::new();
        assert!(record.is_empty());
        assert_eq!(record.last(), None);

        record.push(1.0, 10.0);
        record.push(2.5, 11.0);

        assert_eq!(record.len(), 2);
        assert_eq!(record.iter().collect::<Vec<_>>(), vec![(1.0, 10.0), (2.5, 11.0)]);
        assert_eq!(record.last(), Some((2.5, 11.0)));
        assert!((record.to_time_series().unwrap().interpolate(1.75).unwrap() - 10.5).abs() < 1e-12);
    }

    #[test]
    fn test_absolute_times() {
        let mut output = SimulationOutput::new(epoch(), 0.0, ["rho", "ux"]);
        output.record_mut("ux").push(90.0, -400.0);
        output.record_mut("ux").push(3600.5, -410.0);

        let times = output.absolute_times();
        assert_eq!(times[0], Utc.with_ymd_and_hms(2005, 1, 16, 0, 1, 30).unwrap());
        assert_eq!(
            times[1],
            Utc.with_ymd_and_hms(2005, 1, 16, 1, 0, 0).unwrap() + TimeDelta::milliseconds(500)
        );
    }

    #[test]
    fn test_ram_pressure() {
        let mut output = SimulationOutput::new(epoch(), 0.0, ["rho", "ux"]);
        output.record_mut("rho").push(1.0, 5.0);
        output.record_mut("ux").push(1.0, -400.0);

        let pram = output.ram_pressure().unwrap();
        assert!((pram[0] - 1.67621e-6 * 5.0 * 160_000.0).abs() < 1e-12);

        let velocity_only = SimulationOutput::new(epoch(), 0.0, ["ux"]);
        assert!(velocity_only.ram_pressure().is_none());
    }

    #[test]
    fn test_serialises_to_json() {
        let mut output = SimulationOutput::new(epoch(), -10.0, ["ux"]);
        output.record_mut("ux").push(1.0, -400.0);

        let json = serde_json::to_string(&output).unwrap();
        let back: SimulationOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, output);
    }
}
