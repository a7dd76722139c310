//! Grid representation.
//!
//! A single uniform, cell-centred grid with [`HALO_WIDTH`] halo cells at
//! each end. Halo cells carry boundary data and are excluded from the
//! conservative update.

mod grid1d;

pub use grid1d::{Grid1D, GridError, HALO_WIDTH, MIN_CELLS};
