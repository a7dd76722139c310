//! Numerical flux functions.
//!
//! Provides the finite-volume interface fluxes:
//! - Face-level upwind-split fluxes for linear advection and Burgers
//! - Whole-field flux evaluation over the halo stencil

mod tvd;
mod upwind;

pub use tvd::{n_faces, tvd_flux, tvd_flux_burgers};
pub use upwind::{burgers_face_flux, linear_face_flux, negative_part, positive_part};
