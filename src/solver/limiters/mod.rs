//! Flux limiters for TVD interface reconstruction.
//!
//! Limiters blend the donor-cell and Lax-Wendroff fluxes to suppress
//! oscillations near sharp gradients.
//!
//! - [`SlopeLimiter`]: Trait for slope limiters
//! - [`FluxLimiter`]: Closed enum of the built-in limiters, resolvable by name
//! - Plain functions ([`minmod`], [`superbee`], ...) usable as [`LimiterFn`]

mod standard;
mod traits;

// Traits
pub use traits::{BoxedSlopeLimiter, LimiterFn, SlopeLimiter};

// Standard limiters and registry
pub use standard::{
    FluxLimiter, HARMONIC_EPSILON, UnknownLimiterError, first_order_upwind, geometric, harmonic,
    lax_wendroff, minmod, superbee,
};
