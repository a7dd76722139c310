//! Time integration methods.
//!
//! Explicit Euler with TVD interface fluxes; the Lax-Wendroff-type
//! predictor inside the flux supplies the second-order-in-time correction.

mod forward_euler;

pub use forward_euler::{AdvectionStepper, DEFAULT_NU_MAX, TimeStepError, compute_dt};
