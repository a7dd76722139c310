//! Uniform 1D cell-centred grid.
//!
//! The grid is an ordered list of cell-centre coordinates with constant
//! spacing `dx`. The outermost [`HALO_WIDTH`] cells at each end are halo
//! cells: they feed the interface stencil but are never updated by the
//! conservative step.

use thiserror::Error;

use crate::types::CellIndex;

/// Number of halo cells at each end of the grid.
pub const HALO_WIDTH: usize = 2;

/// Smallest grid that still has one interior face stencil.
pub const MIN_CELLS: usize = 2 * HALO_WIDTH;

/// Relative tolerance for the uniform-spacing check.
const SPACING_TOLERANCE: f64 = 1e-9;

/// Errors raised while building a grid or a field aligned with it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    /// Not enough cells to hold the halo on both sides
    #[error("Grid needs at least {min} cells, got {n_cells}")]
    TooFewCells { n_cells: usize, min: usize },

    /// Extent is empty, reversed or not finite
    #[error("Invalid grid extent [{x_min}, {x_max}]")]
    InvalidExtent { x_min: f64, x_max: f64 },

    /// Coordinates are not strictly increasing or not uniformly spaced
    #[error("Grid coordinates are not strictly increasing and uniform at index {index}")]
    NonMonotonic { index: usize },

    /// Field length does not match the number of grid cells
    #[error("Field length {actual} does not match grid length {expected}")]
    FieldLengthMismatch { expected: usize, actual: usize },
}

/// Uniform 1D grid of cell centres.
#[derive(Clone, Debug)]
pub struct Grid1D {
    /// Cell-centre coordinates, strictly increasing
    centers: Vec<f64>,
    /// Uniform spacing between neighbouring centres
    dx: f64,
}

impl Grid1D {
    /// Create a grid of `n_cells` centres spanning `[x_min, x_max]` inclusive.
    ///
    /// Matches `linspace(x_min, x_max, n_cells)`: the first and last centres
    /// sit exactly on the extent and `dx = (x_max - x_min) / (n_cells - 1)`.
    pub fn uniform(x_min: f64, x_max: f64, n_cells: usize) -> Result<Self, GridError> {
        if n_cells < MIN_CELLS {
            return Err(GridError::TooFewCells {
                n_cells,
                min: MIN_CELLS,
            });
        }
        if !x_min.is_finite() || !x_max.is_finite() || x_max <= x_min {
            return Err(GridError::InvalidExtent { x_min, x_max });
        }

        let dx = (x_max - x_min) / (n_cells - 1) as f64;
        let mut centers: Vec<f64> = (0..n_cells).map(|i| x_min + i as f64 * dx).collect();
        // Pin the last centre to the requested extent
        centers[n_cells - 1] = x_max;

        Ok(Self { centers, dx })
    }

    /// Create a grid that covers `[x_lo, x_hi]` with `n_cells` centres and
    /// pads it by [`HALO_WIDTH`] cell widths on each side.
    ///
    /// The padding is `HALO_WIDTH * (x_hi - x_lo) / n_cells`, so the physical
    /// extent sits (approximately) inside the interior cells.
    pub fn padded(x_lo: f64, x_hi: f64, n_cells: usize) -> Result<Self, GridError> {
        if !x_lo.is_finite() || !x_hi.is_finite() || x_hi <= x_lo {
            return Err(GridError::InvalidExtent {
                x_min: x_lo,
                x_max: x_hi,
            });
        }
        let pad = (x_hi - x_lo) * (HALO_WIDTH as f64 / n_cells.max(1) as f64);
        Self::uniform(x_lo - pad, x_hi + pad, n_cells)
    }

    /// Create a grid from explicit cell centres.
    ///
    /// # Errors
    /// - `TooFewCells` if fewer than [`MIN_CELLS`] centres are given
    /// - `NonMonotonic` if the centres are not strictly increasing with a
    ///   uniform spacing
    pub fn from_centers(centers: Vec<f64>) -> Result<Self, GridError> {
        if centers.len() < MIN_CELLS {
            return Err(GridError::TooFewCells {
                n_cells: centers.len(),
                min: MIN_CELLS,
            });
        }

        let dx = centers[1] - centers[0];
        if !(dx > 0.0) || !dx.is_finite() {
            return Err(GridError::NonMonotonic { index: 1 });
        }
        for i in 1..centers.len() {
            let step = centers[i] - centers[i - 1];
            if !(step > 0.0) || (step - dx).abs() > SPACING_TOLERANCE * dx.abs().max(1.0) {
                return Err(GridError::NonMonotonic { index: i });
            }
        }

        Ok(Self { centers, dx })
    }

    /// Number of cells, halo included.
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    /// A valid grid is never empty; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Uniform cell spacing.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Cell-centre coordinates.
    pub fn centers(&self) -> &[f64] {
        &self.centers
    }

    /// Coordinate of cell `cell`.
    pub fn center(&self, cell: CellIndex) -> f64 {
        self.centers[cell]
    }

    /// First cell centre.
    pub fn x_min(&self) -> f64 {
        self.centers[0]
    }

    /// Last cell centre.
    pub fn x_max(&self) -> f64 {
        self.centers[self.centers.len() - 1]
    }

    /// Whether `x` lies within `[x_min, x_max]`.
    pub fn contains(&self, x: f64) -> bool {
        x >= self.x_min() && x <= self.x_max()
    }

    /// First cell whose centre is `>= x` (left-sided ordered search).
    ///
    /// Returns `None` if `x` lies beyond the last centre.
    pub fn locate(&self, x: f64) -> Option<CellIndex> {
        let idx = self.centers.partition_point(|&c| c < x);
        (idx < self.centers.len()).then_some(CellIndex::new(idx))
    }

    /// Range of interior cells `[HALO_WIDTH, len - HALO_WIDTH)`.
    pub fn interior(&self) -> std::ops::Range<usize> {
        HALO_WIDTH..self.centers.len() - HALO_WIDTH
    }

    /// Whether `cell` is a halo cell.
    pub fn is_halo(&self, cell: CellIndex) -> bool {
        !self.interior().contains(&cell.get())
    }

    /// Linearly interpolate `values` (aligned with the grid) at `x`.
    ///
    /// Returns `None` if `x` is outside the grid extent or not finite.
    pub fn interpolate(&self, values: &[f64], x: f64) -> Option<f64> {
        debug_assert_eq!(values.len(), self.centers.len());
        if !self.contains(x) {
            return None;
        }
        let hi = self.centers.partition_point(|&c| c < x);
        if hi == 0 {
            return Some(values[0]);
        }
        let lo = hi - 1;
        let (x0, x1) = (self.centers[lo], self.centers[hi]);
        let alpha = (x - x0) / (x1 - x0);
        Some(values[lo] + alpha * (values[hi] - values[lo]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_grid() {
        let grid = Grid1D::uniform(0.0, 100.0, 101).unwrap();

        assert_eq!(grid.len(), 101);
        assert!((grid.dx() - 1.0).abs() < 1e-14);
        assert_eq!(grid.x_min(), 0.0);
        assert_eq!(grid.x_max(), 100.0);
        assert_eq!(grid.interior(), 2..99);
    }

    #[test]
    fn test_too_few_cells() {
        let err = Grid1D::uniform(0.0, 1.0, 3).unwrap_err();
        assert_eq!(err, GridError::TooFewCells { n_cells: 3, min: 4 });
        assert!(Grid1D::uniform(0.0, 1.0, 4).is_ok());
    }

    #[test]
    fn test_reversed_extent() {
        assert!(matches!(
            Grid1D::uniform(1.0, 0.0, 10),
            Err(GridError::InvalidExtent { .. })
        ));
        assert!(matches!(
            Grid1D::uniform(0.0, f64::NAN, 10),
            Err(GridError::InvalidExtent { .. })
        ));
    }

    #[test]
    fn test_from_centers_rejects_non_monotonic() {
        let err = Grid1D::from_centers(vec![0.0, 1.0, 2.0, 1.5, 4.0]).unwrap_err();
        assert_eq!(err, GridError::NonMonotonic { index: 3 });

        let err = Grid1D::from_centers(vec![0.0, 1.0, 2.0, 3.5]).unwrap_err();
        assert_eq!(err, GridError::NonMonotonic { index: 3 });

        assert!(Grid1D::from_centers(vec![0.0, 1.0, 2.0, 3.0]).is_ok());
    }

    #[test]
    fn test_padded_grid() {
        let grid = Grid1D::padded(0.0, 100.0, 100).unwrap();
        assert!((grid.x_min() - (-2.0)).abs() < 1e-12);
        assert!((grid.x_max() - 102.0).abs() < 1e-12);
        assert!(grid.contains(0.0));
        assert!(grid.contains(100.0));
    }

    #[test]
    fn test_locate_is_left_sided() {
        let grid = Grid1D::uniform(0.0, 10.0, 11).unwrap();

        assert_eq!(grid.locate(3.0), Some(CellIndex::new(3)));
        assert_eq!(grid.locate(3.2), Some(CellIndex::new(4)));
        assert_eq!(grid.locate(-5.0), Some(CellIndex::new(0)));
        assert_eq!(grid.locate(10.5), None);
    }

    #[test]
    fn test_interpolate() {
        let grid = Grid1D::uniform(0.0, 4.0, 5).unwrap();
        let values = vec![0.0, 10.0, 20.0, 30.0, 40.0];

        assert!((grid.interpolate(&values, 2.5).unwrap() - 25.0).abs() < 1e-12);
        assert!((grid.interpolate(&values, 0.0).unwrap() - 0.0).abs() < 1e-12);
        assert!((grid.interpolate(&values, 4.0).unwrap() - 40.0).abs() < 1e-12);
        assert!(grid.interpolate(&values, 4.1).is_none());
        assert!(grid.interpolate(&values, f64::NAN).is_none());
    }

    #[test]
    fn test_halo_cells() {
        let grid = Grid1D::uniform(0.0, 1.0, 6).unwrap();
        assert!(grid.is_halo(CellIndex::new(0)));
        assert!(grid.is_halo(CellIndex::new(1)));
        assert!(!grid.is_halo(CellIndex::new(2)));
        assert!(!grid.is_halo(CellIndex::new(3)));
        assert!(grid.is_halo(CellIndex::new(4)));
        assert!(grid.is_halo(CellIndex::new(5)));
    }
}
