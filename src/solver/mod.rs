//! Finite-volume solver components.
//!
//! # Submodules
//!
//! - [`limiters`]: Flux limiters for TVD interface reconstruction
//! - [`state`]: Grid-aligned fields and the per-run simulation state

pub mod limiters;
pub mod state;

// Re-export limiter types
pub use limiters::{
    BoxedSlopeLimiter, FluxLimiter, LimiterFn, SlopeLimiter, UnknownLimiterError,
};

// Re-export state types
pub use state::{SimulationState, StateField, VELOCITY_VAR};
