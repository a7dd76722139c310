//! Boundary data injection.
//!
//! The upstream boundary is a moving virtual sensor: at every step its
//! current coordinate is found on the grid and the cell it occupies is
//! overwritten with its time-interpolated reading.
//!
//! ```
//! use advect1d::analysis::TimeSeries;
//! use advect1d::boundary::{BoundarySource, inject_boundary};
//! use advect1d::mesh::Grid1D;
//! use advect1d::solver::StateField;
//!
//! let grid = Grid1D::uniform(0.0, 10.0, 11).unwrap();
//! let mut rho = StateField::uniform_on(&grid, 1.0);
//! let source = BoundarySource::new(
//!     TimeSeries::new(&[0.0, 10.0], &[8.0, 6.0]).unwrap(),
//!     TimeSeries::new(&[0.0, 10.0], &[5.0, 7.0]).unwrap(),
//! );
//!
//! let injection = inject_boundary(&grid, &mut rho, 5.0, &source).unwrap();
//! assert_eq!(injection.cell.get(), 7);
//! assert_eq!(rho.as_slice()[7], 6.0);
//! ```

mod injection;

pub use injection::{BoundarySource, Injection, InjectionError, inject_boundary};
