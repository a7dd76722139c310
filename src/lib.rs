//! # advect1d
//!
//! One-dimensional finite-volume transport of upstream solar wind
//! measurements toward a downstream observation point.
//!
//! This crate provides the building blocks of the propagation model:
//! - TVD flux limiters selectable by name
//! - Upwind-split interface fluxes for linear advection and Burgers' equation
//! - CFL-limited explicit time stepping on a haloed uniform grid
//! - Injection of a moving measurement point into the grid
//! - Repair of sentinel-marked gaps in measured series
//! - A run orchestrator that samples every variable at the observation point

pub mod analysis;
pub mod boundary;
pub mod flux;
pub mod mesh;
pub mod simulation;
pub mod solver;
pub mod time;
pub mod types;

// Re-export main types for convenience
pub use analysis::{
    GapFillConfig, GapFillError, TimeSeries, TimeSeriesError, fill_gaps, fill_gaps_with_rng,
};
pub use boundary::{BoundarySource, InjectionError, inject_boundary};
pub use flux::{tvd_flux, tvd_flux_burgers};
pub use mesh::{Grid1D, GridError, HALO_WIDTH};
pub use simulation::{
    OutputRecord, Simulation, SimulationConfig, SimulationError, SimulationOutput,
    SimulationPhase, SimulationResult,
};
pub use solver::{FluxLimiter, SimulationState, SlopeLimiter, StateField, UnknownLimiterError};
pub use time::{AdvectionStepper, TimeStepError, compute_dt};
pub use types::CellIndex;
