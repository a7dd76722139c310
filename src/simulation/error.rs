//! Errors raised by the orchestrator.

use thiserror::Error;

use crate::analysis::TimeSeriesError;
use crate::mesh::GridError;
use crate::solver::UnknownLimiterError;

use super::SimulationPhase;

/// Errors that abort a simulation run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    /// Grid construction failed
    #[error("Invalid grid: {0}")]
    Grid(#[from] GridError),

    /// Limiter name not in the registry
    #[error(transparent)]
    UnknownLimiter(#[from] UnknownLimiterError),

    /// Velocity field is identically zero
    #[error("Velocity field is identically zero at t = {time}; cannot compute a time step")]
    DegenerateVelocity { time: f64 },

    /// CFL step is NaN or infinite
    #[error("Time step is not finite at t = {time} (dt = {dt})")]
    NonFiniteTimeStep { time: f64, dt: f64 },

    /// Output coordinate lies outside the grid
    #[error("Output coordinate {x} outside grid [{x_min}, {x_max}]")]
    OutOfRangeSample { x: f64, x_min: f64, x_max: f64 },

    /// Boundary source lies past the downstream end of the grid
    #[error("Source for '{variable}' at x = {x} lies outside grid [{x_min}, {x_max}]")]
    InjectionOutsideGrid {
        variable: String,
        x: f64,
        x_min: f64,
        x_max: f64,
    },

    /// An advected variable has no boundary source
    #[error("No boundary source for advected variable '{name}'")]
    MissingVariable { name: String },

    /// No boundary source for the velocity
    #[error("No boundary source for the velocity; it is always advected")]
    NoVelocitySource,

    /// A boundary series could not be sampled
    #[error("Boundary series for '{variable}': {source}")]
    TimeSeries {
        variable: String,
        #[source]
        source: TimeSeriesError,
    },

    /// Step limit hit before the data ran out
    #[error("Maximum step limit ({max_steps}) reached at t = {time}")]
    StepLimitReached { max_steps: usize, time: f64 },

    /// Operation not allowed in the current phase
    #[error("Cannot {operation} while {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: SimulationPhase,
    },

    /// Configuration rejected before stepping
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}
