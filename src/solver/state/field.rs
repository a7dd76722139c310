//! Halo-aware scalar field aligned with a 1D grid.

use crate::mesh::{Grid1D, GridError, HALO_WIDTH, MIN_CELLS};
use crate::types::CellIndex;

/// Cell values of one advected variable.
///
/// The first and last [`HALO_WIDTH`] entries are halo cells. The conservative
/// update only writes through [`interior_mut`](Self::interior_mut); halo
/// values change only through boundary injection via [`set`](Self::set).
#[derive(Clone, Debug, PartialEq)]
pub struct StateField {
    values: Vec<f64>,
}

impl StateField {
    /// Field of `n_cells` cells all set to `value`.
    pub fn uniform(n_cells: usize, value: f64) -> Result<Self, GridError> {
        if n_cells < MIN_CELLS {
            return Err(GridError::TooFewCells {
                n_cells,
                min: MIN_CELLS,
            });
        }
        Ok(Self {
            values: vec![value; n_cells],
        })
    }

    /// Field on `grid` with every cell set to `value`.
    pub fn uniform_on(grid: &Grid1D, value: f64) -> Self {
        Self {
            values: vec![value; grid.len()],
        }
    }

    /// Field from explicit cell values, which must match the grid length.
    pub fn from_values(grid: &Grid1D, values: Vec<f64>) -> Result<Self, GridError> {
        if values.len() != grid.len() {
            return Err(GridError::FieldLengthMismatch {
                expected: grid.len(),
                actual: values.len(),
            });
        }
        Ok(Self { values })
    }

    /// Field sampled from a function of the cell-centre coordinate.
    pub fn from_function<F>(grid: &Grid1D, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            values: grid.centers().iter().map(|&x| f(x)).collect(),
        }
    }

    /// Number of cells, halo included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the field holds no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All cell values, halo included.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Value of one cell, `None` if out of bounds.
    pub fn get(&self, cell: CellIndex) -> Option<f64> {
        self.values.get(cell.get()).copied()
    }

    /// Overwrite one cell, returning the previous value.
    ///
    /// Returns `None` (and writes nothing) if `cell` is out of bounds.
    pub fn set(&mut self, cell: CellIndex, value: f64) -> Option<f64> {
        let slot = self.values.get_mut(cell.get())?;
        Some(std::mem::replace(slot, value))
    }

    /// Interior cells `[HALO_WIDTH, len - HALO_WIDTH)`.
    pub fn interior(&self) -> &[f64] {
        let n = self.values.len();
        &self.values[HALO_WIDTH..n - HALO_WIDTH]
    }

    /// Mutable interior cells; the halo stays out of reach.
    pub fn interior_mut(&mut self) -> &mut [f64] {
        let n = self.values.len();
        &mut self.values[HALO_WIDTH..n - HALO_WIDTH]
    }

    /// Left halo cells (upstream-of-index-zero side).
    pub fn halo_left(&self) -> &[f64] {
        &self.values[..HALO_WIDTH]
    }

    /// Right halo cells.
    pub fn halo_right(&self) -> &[f64] {
        &self.values[self.values.len() - HALO_WIDTH..]
    }

    /// Largest absolute value over all cells.
    pub fn max_abs(&self) -> f64 {
        self.values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }

    /// Smallest and largest value over all cells.
    pub fn min_max(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Sum of interior values times `dx` (discrete integral).
    pub fn interior_integral(&self, dx: f64) -> f64 {
        self.interior().iter().sum::<f64>() * dx
    }
}
