//! Grid-aligned state containers.
//!
//! - [`StateField`]: One variable's cell values with a fixed-width halo
//! - [`SimulationState`]: All advected variables plus the shared grid

mod field;
mod simulation_state;

pub use field::StateField;
pub use simulation_state::{SimulationState, VELOCITY_VAR};
