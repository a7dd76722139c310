//! Simulation orchestration.
//!
//! Ties together the pieces of a run:
//! - Boundary injection of every advected variable
//! - CFL-limited explicit stepping (scalars first, velocity last)
//! - Sampling at the fixed observation coordinate
//!
//! # Example
//! ```ignore
//! use advect1d::simulation::{Simulation, SimulationConfig};
//!
//! let config = SimulationConfig::default().with_limiter_name("Superbee")?;
//! let mut sim = Simulation::new(config)?;
//! sim.initialize(sources, reference_epoch)?;
//! let result = sim.run()?;
//! let output = sim.into_output();
//! ```

mod config;
mod error;
mod output;
mod runner;

pub use config::{DEFAULT_ADVECT_VARS, DEFAULT_N_CELLS, DEFAULT_UPSTREAM_X, SimulationConfig};
pub use error::SimulationError;
pub use output::{DENSITY_VAR, OutputRecord, RAM_PRESSURE_COEFF, SimulationOutput};
pub use runner::{Simulation, SimulationPhase, SimulationResult};
