//! Interface fluxes over a whole field.
//!
//! For a field of `n` cells there are `n - 3` stencil faces; face `j` sits
//! between cells `j + 1` and `j + 2` and uses the slopes
//!
//! ```text
//! slope_left  = (u[j+1] - u[j])   / dx
//! slope_right = (u[j+2] - u[j+1]) / dx
//! ```
//!
//! Faces touching the outermost halo cell are never evaluated.

use crate::solver::LimiterFn;

use super::upwind::{burgers_face_flux, linear_face_flux};

/// Number of stencil faces for a field of `n_cells` cells.
#[inline]
pub fn n_faces(n_cells: usize) -> usize {
    n_cells.saturating_sub(3)
}

/// Limited slope at the cell left of face `j`.
#[inline]
fn limited_slope(u: &[f64], j: usize, dx: f64, limiter: LimiterFn) -> f64 {
    let slope_left = (u[j + 1] - u[j]) / dx;
    let slope_right = (u[j + 2] - u[j + 1]) / dx;
    limiter(slope_left, slope_right)
}

/// Linear-advection fluxes written into `out` (length `n - 3`).
///
/// Positive velocities take the reconstructed left state, negative
/// velocities the right one.
///
/// # Panics
/// Panics if `a` and `u` differ in length or `out` has the wrong length.
pub fn tvd_flux(u: &[f64], a: &[f64], dx: f64, dt: f64, limiter: LimiterFn, out: &mut [f64]) {
    assert_eq!(u.len(), a.len(), "velocity must be aligned with the field");
    assert_eq!(out.len(), n_faces(u.len()));

    for (j, f) in out.iter_mut().enumerate() {
        let s = limited_slope(u, j, dx, limiter);
        *f = linear_face_flux(u[j + 1], u[j + 2], a[j + 1], a[j + 2], s, dx, dt);
    }
}

/// Burgers fluxes written into `out` (length `n - 3`).
pub fn tvd_flux_burgers(u: &[f64], dx: f64, dt: f64, limiter: LimiterFn, out: &mut [f64]) {
    assert_eq!(out.len(), n_faces(u.len()));

    for (j, f) in out.iter_mut().enumerate() {
        let s = limited_slope(u, j, dx, limiter);
        *f = burgers_face_flux(u[j + 1], u[j + 2], s, dx, dt);
    }
}
