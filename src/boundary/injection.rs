//! Single-cell injection of a moving measurement into a grid field.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::analysis::{TimeSeries, TimeSeriesError};
use crate::mesh::Grid1D;
use crate::solver::StateField;
use crate::types::CellIndex;

/// Errors from boundary injection.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InjectionError {
    /// Position series cannot be sampled at the requested time
    #[error("Cannot sample source position: {0}")]
    Position(#[source] TimeSeriesError),

    /// Value series cannot be sampled at the requested time
    #[error("Cannot sample source value: {0}")]
    Value(#[source] TimeSeriesError),

    /// Source lies beyond the downstream end of the grid
    #[error("Source position {x} lies outside grid [{x_min}, {x_max}]")]
    OutsideGrid { x: f64, x_min: f64, x_max: f64 },
}

/// A moving measurement point: where it is and what it reads.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundarySource {
    position: TimeSeries,
    value: TimeSeries,
}

impl BoundarySource {
    /// Pair a position series with a value series.
    pub fn new(position: TimeSeries, value: TimeSeries) -> Self {
        Self { position, value }
    }

    /// Build one source per variable, all sharing one position series.
    pub fn sharing_position<K: Ord>(
        position: &TimeSeries,
        values: impl IntoIterator<Item = (K, TimeSeries)>,
    ) -> BTreeMap<K, BoundarySource> {
        values
            .into_iter()
            .map(|(name, value)| (name, BoundarySource::new(position.clone(), value)))
            .collect()
    }

    /// Position series.
    pub fn position(&self) -> &TimeSeries {
        &self.position
    }

    /// Value series.
    pub fn value(&self) -> &TimeSeries {
        &self.value
    }

    /// Earliest time at which both series are sampled.
    pub fn first_time(&self) -> f64 {
        self.position.first().time.max(self.value.first().time)
    }

    /// Latest time at which both series are sampled.
    pub fn last_time(&self) -> f64 {
        self.position.last().time.min(self.value.last().time)
    }

    /// First recorded value, used as the undisturbed initial state.
    pub fn initial_value(&self) -> f64 {
        self.value.first().value
    }

    /// Copy with both series shifted by `-offset`.
    pub fn shifted(&self, offset: f64) -> Self {
        Self {
            position: self.position.shifted(offset),
            value: self.value.shifted(offset),
        }
    }
}

/// Outcome of one injection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Injection {
    /// Cell that was overwritten
    pub cell: CellIndex,
    /// Source coordinate at the injection time
    pub x: f64,
    /// Value written
    pub value: f64,
}

/// Overwrite the cell the source currently occupies with its reading at `t`.
///
/// The position series is sampled at `t`, the first cell whose centre is
/// `>= x` is selected and its value replaced by the value series at `t`.
/// No other cell is touched.
///
/// # Errors
/// - `Position`/`Value` if either series does not cover `t`
/// - `OutsideGrid` if the source lies past the last cell centre
pub fn inject_boundary(
    grid: &Grid1D,
    field: &mut StateField,
    t: f64,
    source: &BoundarySource,
) -> Result<Injection, InjectionError> {
    let x = source
        .position
        .interpolate(t)
        .map_err(InjectionError::Position)?;
    let cell = grid.locate(x).ok_or(InjectionError::OutsideGrid {
        x,
        x_min: grid.x_min(),
        x_max: grid.x_max(),
    })?;
    let value = source.value.interpolate(t).map_err(InjectionError::Value)?;

    field.set(cell, value).ok_or(InjectionError::OutsideGrid {
        x,
        x_min: grid.x_min(),
        x_max: grid.x_max(),
    })?;
    Ok(Injection { cell, x, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid1D {
        Grid1D::uniform(0.0, 100.0, 101).unwrap()
    }

    /// Source drifting from x = 80 to x = 20 over 60 s, reading 10 + t.
    fn drifting_source() -> BoundarySource {
        BoundarySource::new(
            TimeSeries::new(&[0.0, 60.0], &[80.0, 20.0]).unwrap(),
            TimeSeries::new(&[0.0, 60.0], &[10.0, 70.0]).unwrap(),
        )
    }

    #[test]
    fn test_single_cell_changes() {
        let g = grid();
        let mut field = StateField::uniform_on(&g, -1.0);
        let before = field.clone();

        let injection = inject_boundary(&g, &mut field, 15.0, &drifting_source()).unwrap();

        assert_eq!(injection.cell, CellIndex::new(65));
        assert!((injection.value - 25.0).abs() < 1e-12);

        let changed: Vec<usize> = (0..g.len())
            .filter(|&i| field.as_slice()[i] != before.as_slice()[i])
            .collect();
        assert_eq!(changed, vec![65]);
        assert!((field.as_slice()[65] - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_between_centres_rounds_up() {
        let g = grid();
        let mut field = StateField::uniform_on(&g, 0.0);
        let source = BoundarySource::new(
            TimeSeries::constant(&[0.0, 1.0], 41.3).unwrap(),
            TimeSeries::constant(&[0.0, 1.0], 7.0).unwrap(),
        );
        let injection = inject_boundary(&g, &mut field, 0.5, &source).unwrap();
        assert_eq!(injection.cell, CellIndex::new(42));
    }

    #[test]
    fn test_index_follows_source_downstream() {
        let g = grid();
        let mut field = StateField::uniform_on(&g, 0.0);
        let source = drifting_source();

        let mut last = usize::MAX;
        for k in 0..=60 {
            let injection = inject_boundary(&g, &mut field, k as f64, &source).unwrap();
            assert!(injection.cell.get() <= last);
            last = injection.cell.get();
        }
        assert_eq!(last, 20);
    }

    #[test]
    fn test_outside_grid_and_time() {
        let g = grid();
        let mut field = StateField::uniform_on(&g, 0.0);
        let beyond = BoundarySource::new(
            TimeSeries::constant(&[0.0, 1.0], 150.0).unwrap(),
            TimeSeries::constant(&[0.0, 1.0], 1.0).unwrap(),
        );
        assert!(matches!(
            inject_boundary(&g, &mut field, 0.5, &beyond),
            Err(InjectionError::OutsideGrid { x, .. }) if x == 150.0
        ));

        assert!(matches!(
            inject_boundary(&g, &mut field, 61.0, &drifting_source()),
            Err(InjectionError::Position(TimeSeriesError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_sharing_position() {
        let position = TimeSeries::new(&[0.0, 10.0], &[50.0, 40.0]).unwrap();
        let sources = BoundarySource::sharing_position(
            &position,
            [
                ("rho", TimeSeries::new(&[2.0, 8.0], &[5.0, 6.0]).unwrap()),
                ("T", TimeSeries::new(&[-1.0, 12.0], &[1e5, 2e5]).unwrap()),
            ],
        );

        assert_eq!(sources.len(), 2);
        assert_eq!(sources["rho"].position(), &position);
        assert_eq!(sources["rho"].first_time(), 2.0);
        assert_eq!(sources["rho"].last_time(), 8.0);
        assert_eq!(sources["T"].first_time(), 0.0);
        assert_eq!(sources["T"].initial_value(), 1e5);

        let shifted = sources["rho"].shifted(2.0);
        assert_eq!(shifted.first_time(), 0.0);
        assert_eq!(shifted.value().time_range(), (0.0, 6.0));
    }
}
