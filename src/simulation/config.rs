//! Run configuration.

use serde::{Deserialize, Serialize};

use crate::mesh::{GridError, MIN_CELLS};
use crate::solver::{FluxLimiter, VELOCITY_VAR};
use crate::time::DEFAULT_NU_MAX;

use super::SimulationError;

/// Default number of grid cells.
pub const DEFAULT_N_CELLS: usize = 1000;

/// Default upstream (L1) coordinate in km.
pub const DEFAULT_UPSTREAM_X: f64 = 1.6e6;

/// Variables advected when none are configured.
pub const DEFAULT_ADVECT_VARS: [&str; 8] = ["ux", "uy", "uz", "bx", "by", "bz", "rho", "T"];

/// Configuration for a simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of grid cells, halo included.
    pub n_cells: usize,
    /// Coordinate of the upstream measurement region (km).
    pub upstream_x: f64,
    /// Coordinate where output is sampled (km).
    pub output_x: f64,
    /// Maximum CFL number.
    pub nu_max: f64,
    /// Flux limiter.
    pub limiter: FluxLimiter,
    /// Variables to advect; the velocity is added if missing.
    pub advect_vars: Vec<String>,
    /// Maximum number of time steps.
    pub max_steps: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_cells: DEFAULT_N_CELLS,
            upstream_x: DEFAULT_UPSTREAM_X,
            output_x: 0.0,
            nu_max: DEFAULT_NU_MAX,
            limiter: FluxLimiter::default(),
            advect_vars: DEFAULT_ADVECT_VARS.iter().map(|s| s.to_string()).collect(),
            max_steps: None,
        }
    }
}

impl SimulationConfig {
    /// Set the number of cells.
    pub fn with_n_cells(mut self, n_cells: usize) -> Self {
        self.n_cells = n_cells;
        self
    }

    /// Set the upstream coordinate.
    pub fn with_upstream_x(mut self, upstream_x: f64) -> Self {
        self.upstream_x = upstream_x;
        self
    }

    /// Set the output coordinate.
    pub fn with_output_x(mut self, output_x: f64) -> Self {
        self.output_x = output_x;
        self
    }

    /// Set the maximum CFL number.
    pub fn with_nu_max(mut self, nu_max: f64) -> Self {
        self.nu_max = nu_max;
        self
    }

    /// Set the flux limiter.
    pub fn with_limiter(mut self, limiter: FluxLimiter) -> Self {
        self.limiter = limiter;
        self
    }

    /// Set the flux limiter by registry name.
    pub fn with_limiter_name(mut self, name: &str) -> Result<Self, SimulationError> {
        self.limiter = FluxLimiter::from_name(name)?;
        Ok(self)
    }

    /// Set the advected variables.
    pub fn with_advect_vars<I, S>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.advect_vars = vars.into_iter().map(Into::into).collect();
        self
    }

    /// Set the maximum number of steps.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Advected variables with duplicates removed and the velocity last.
    pub fn resolved_vars(&self) -> Vec<String> {
        let mut vars: Vec<String> = Vec::with_capacity(self.advect_vars.len() + 1);
        for var in &self.advect_vars {
            if var != VELOCITY_VAR && !vars.contains(var) {
                vars.push(var.clone());
            }
        }
        vars.push(VELOCITY_VAR.to_string());
        vars
    }

    /// Check the configuration before any state is built.
    ///
    /// # Errors
    /// - `Grid(TooFewCells)` if `n_cells` cannot hold the halo
    /// - `InvalidConfig` for non-finite or reversed extents, `nu_max`
    ///   outside `(0, 1]` or a zero step limit
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.n_cells < MIN_CELLS {
            return Err(GridError::TooFewCells {
                n_cells: self.n_cells,
                min: MIN_CELLS,
            }
            .into());
        }
        if !self.upstream_x.is_finite() || !self.output_x.is_finite() {
            return Err(SimulationError::InvalidConfig {
                reason: "grid coordinates must be finite".to_string(),
            });
        }
        if self.upstream_x <= self.output_x {
            return Err(SimulationError::InvalidConfig {
                reason: format!(
                    "upstream_x ({}) must exceed output_x ({})",
                    self.upstream_x, self.output_x
                ),
            });
        }
        if !(self.nu_max > 0.0 && self.nu_max <= 1.0) {
            return Err(SimulationError::InvalidConfig {
                reason: format!("nu_max = {} must lie in (0, 1]", self.nu_max),
            });
        }
        if self.max_steps == Some(0) {
            return Err(SimulationError::InvalidConfig {
                reason: "max_steps must be positive".to_string(),
            });
        }
        Ok(())
    }
}
