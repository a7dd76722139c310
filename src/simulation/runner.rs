//! Simulation orchestrator implementation.
//!
//! Drives the per-step sequence: inject boundaries, compute the CFL step,
//! advect scalars with the frozen velocity, advect the velocity, sample at
//! the observation point.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{info, trace, warn};

use crate::boundary::{BoundarySource, InjectionError, inject_boundary};
use crate::mesh::Grid1D;
use crate::solver::{SimulationState, StateField, VELOCITY_VAR};
use crate::time::{AdvectionStepper, TimeStepError, compute_dt};

use super::output::seconds_to_delta;
use super::{SimulationConfig, SimulationError, SimulationOutput};

// =============================================================================
// Phase
// =============================================================================

/// Lifecycle of a [`Simulation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationPhase {
    /// Configured, waiting for boundary data
    Initializing,
    /// Grid built, stepping until the data runs out
    Stepping,
    /// Stop time reached or a fatal error occurred
    Terminated,
}

impl fmt::Display for SimulationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SimulationPhase::Initializing => "initializing",
            SimulationPhase::Stepping => "stepping",
            SimulationPhase::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Simulation Result
// =============================================================================

/// Statistics of a completed run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationResult {
    /// Final simulation time reached (relative to the epoch).
    pub final_time: f64,
    /// Total number of time steps taken.
    pub n_steps: usize,
    /// Minimum time step used.
    pub dt_min: f64,
    /// Maximum time step used.
    pub dt_max: f64,
    /// Total wall-clock time in seconds.
    pub wall_time: f64,
}

// =============================================================================
// Simulation Runner
// =============================================================================

/// Everything built by [`Simulation::initialize`].
#[derive(Clone, Debug)]
struct ActiveRun {
    /// Advected variables, velocity last
    vars: Vec<String>,
    /// Sources with times relative to the epoch
    sources: BTreeMap<String, BoundarySource>,
    state: SimulationState,
    output: SimulationOutput,
    t: f64,
    t_max: f64,
}

/// Advects upstream measurements to the observation point.
///
/// ```
/// use std::collections::BTreeMap;
///
/// use advect1d::analysis::TimeSeries;
/// use advect1d::boundary::BoundarySource;
/// use advect1d::simulation::{Simulation, SimulationConfig, SimulationPhase};
/// use chrono::Utc;
///
/// let position = TimeSeries::constant(&[0.0, 10.0], 95.0).unwrap();
/// let sources = BoundarySource::sharing_position(
///     &position,
///     [("ux".to_string(), TimeSeries::constant(&[0.0, 10.0], -5.0).unwrap())],
/// );
///
/// let config = SimulationConfig::default()
///     .with_n_cells(50)
///     .with_upstream_x(100.0)
///     .with_advect_vars(["ux"]);
/// let mut sim = Simulation::new(config).unwrap();
/// sim.initialize(sources, Utc::now()).unwrap();
///
/// let result = sim.run().unwrap();
/// assert_eq!(sim.phase(), SimulationPhase::Terminated);
/// assert!(result.final_time >= 10.0);
/// ```
#[derive(Clone, Debug)]
pub struct Simulation {
    config: SimulationConfig,
    stepper: AdvectionStepper,
    phase: SimulationPhase,
    active: Option<ActiveRun>,
    n_steps: usize,
    dt_min: f64,
    dt_max: f64,
    wall_time: f64,
}

impl Simulation {
    /// Create a simulation in the [`SimulationPhase::Initializing`] phase.
    ///
    /// # Errors
    /// `Grid(TooFewCells)` or `InvalidConfig` if the configuration does not
    /// validate.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self {
            stepper: AdvectionStepper::new(config.limiter),
            config,
            phase: SimulationPhase::Initializing,
            active: None,
            n_steps: 0,
            dt_min: f64::INFINITY,
            dt_max: 0.0,
            wall_time: 0.0,
        })
    }

    /// Build the grid and initial state from the boundary sources.
    ///
    /// Source times are seconds after `reference`. The epoch is the latest
    /// first sample across all sources and the stop time the earliest last
    /// sample; every field starts uniform at its source's first value.
    ///
    /// # Errors
    /// - `NoVelocitySource` / `MissingVariable` for absent sources
    /// - `Grid` if the padded grid cannot be built
    /// - `InvalidPhase` unless the simulation is still initializing
    pub fn initialize(
        &mut self,
        sources: BTreeMap<String, BoundarySource>,
        reference: DateTime<Utc>,
    ) -> Result<(), SimulationError> {
        self.require_phase(SimulationPhase::Initializing, "initialize")?;

        let vars = self.config.resolved_vars();
        let velocity_source = sources
            .get(VELOCITY_VAR)
            .ok_or(SimulationError::NoVelocitySource)?;
        if let Some(missing) = vars.iter().find(|var| !sources.contains_key(var.as_str())) {
            return Err(SimulationError::MissingVariable {
                name: missing.clone(),
            });
        }

        let t0 = sources
            .values()
            .map(BoundarySource::first_time)
            .fold(f64::NEG_INFINITY, f64::max);
        let t_end = sources
            .values()
            .map(BoundarySource::last_time)
            .fold(f64::INFINITY, f64::min);

        let grid = Grid1D::padded(self.config.output_x, self.config.upstream_x, self.config.n_cells)?;
        let dx = grid.dx();
        let n_cells = grid.len();

        let mut state = SimulationState::new(grid, velocity_source.initial_value());
        for var in vars.iter().filter(|var| var.as_str() != VELOCITY_VAR) {
            if let Some(source) = sources.get(var) {
                state.insert_uniform(var.as_str(), source.initial_value());
            }
        }

        let epoch = reference + seconds_to_delta(t0);
        let output = SimulationOutput::new(epoch, self.config.output_x, vars.iter().map(String::as_str));
        let sources = sources
            .into_iter()
            .map(|(name, source)| (name, source.shifted(t0)))
            .collect();
        let t_max = t_end - t0;

        info!(
            n_cells,
            dx,
            vars = ?vars,
            limiter = %self.config.limiter,
            %epoch,
            t_max,
            "Simulation initialised"
        );

        self.active = Some(ActiveRun {
            vars,
            sources,
            state,
            output,
            t: 0.0,
            t_max,
        });
        self.phase = if t_max > 0.0 {
            SimulationPhase::Stepping
        } else {
            SimulationPhase::Terminated
        };
        Ok(())
    }

    /// Advance one step and return the step size used.
    ///
    /// Any error other than a phase mismatch terminates the simulation.
    pub fn step(&mut self) -> Result<f64, SimulationError> {
        self.require_phase(SimulationPhase::Stepping, "step")?;
        match self.advance() {
            Ok(dt) => Ok(dt),
            Err(err) => {
                self.phase = SimulationPhase::Terminated;
                Err(err)
            }
        }
    }

    /// Step until the earliest source runs out of data.
    ///
    /// # Errors
    /// `StepLimitReached` if the configured `max_steps` is hit first;
    /// otherwise any error raised by [`Simulation::step`].
    pub fn run(&mut self) -> Result<SimulationResult, SimulationError> {
        if self.phase == SimulationPhase::Initializing {
            return Err(SimulationError::InvalidPhase {
                operation: "run",
                phase: self.phase,
            });
        }
        let start_wall = Instant::now();

        while self.phase == SimulationPhase::Stepping {
            if let Some(max_steps) = self.config.max_steps
                && self.n_steps >= max_steps
            {
                let time = self.time();
                warn!(max_steps, time, "Step limit reached before end of data");
                self.wall_time += start_wall.elapsed().as_secs_f64();
                return Err(SimulationError::StepLimitReached { max_steps, time });
            }
            self.step()?;
        }

        self.wall_time += start_wall.elapsed().as_secs_f64();
        let result = self.result();
        info!(
            n_steps = result.n_steps,
            final_time = result.final_time,
            dt_min = result.dt_min,
            dt_max = result.dt_max,
            wall_time = result.wall_time,
            "Simulation complete"
        );
        Ok(result)
    }

    fn advance(&mut self) -> Result<f64, SimulationError> {
        let Self {
            config,
            stepper,
            phase,
            active,
            n_steps,
            dt_min,
            dt_max,
            ..
        } = &mut *self;
        let run = active.as_mut().ok_or(SimulationError::InvalidPhase {
            operation: "step",
            phase: SimulationPhase::Initializing,
        })?;
        let t = run.t;

        // Boundary data at the current time
        for var in &run.vars {
            let source = run
                .sources
                .get(var)
                .ok_or_else(|| SimulationError::MissingVariable { name: var.clone() })?;
            let (grid, field) = run
                .state
                .grid_and_field_mut(var)
                .ok_or_else(|| SimulationError::MissingVariable { name: var.clone() })?;
            inject_boundary(grid, field, t, source).map_err(|err| injection_error(var, err))?;
        }

        let dx = run.state.grid().dx();
        let dt = compute_dt(run.state.velocity(), dx, config.nu_max).map_err(|err| match err {
            TimeStepError::DegenerateVelocity => SimulationError::DegenerateVelocity { time: t },
            TimeStepError::NonFinite { max_speed, dx } => SimulationError::NonFiniteTimeStep {
                time: t,
                dt: config.nu_max * dx / max_speed,
            },
        })?;

        // Scalars consume the pre-step velocity; the velocity goes last
        advect_scalars(&mut run.state, stepper, dx, dt);
        stepper.advance_burgers(run.state.velocity_mut(), dx, dt);

        let grid = run.state.grid();
        let x = config.output_x;
        for var in &run.vars {
            let field = run
                .state
                .field(var)
                .ok_or_else(|| SimulationError::MissingVariable { name: var.clone() })?;
            let value = sample(grid, field, x)?;
            run.output.record_mut(var).push(t + dt, value);
        }

        run.t += dt;
        *n_steps += 1;
        *dt_min = dt_min.min(dt);
        *dt_max = dt_max.max(dt);
        trace!(step = *n_steps, t = run.t, dt, "Step complete");

        if run.t >= run.t_max {
            *phase = SimulationPhase::Terminated;
        }
        Ok(dt)
    }

    fn require_phase(
        &self,
        expected: SimulationPhase,
        operation: &'static str,
    ) -> Result<(), SimulationError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SimulationError::InvalidPhase {
                operation,
                phase: self.phase,
            })
        }
    }

    /// Current phase.
    pub fn phase(&self) -> SimulationPhase {
        self.phase
    }

    /// Run configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current simulation time relative to the epoch.
    pub fn time(&self) -> f64 {
        self.active.as_ref().map_or(0.0, |run| run.t)
    }

    /// Stop time relative to the epoch, once initialized.
    pub fn t_max(&self) -> Option<f64> {
        self.active.as_ref().map(|run| run.t_max)
    }

    /// Number of steps taken.
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Grid and fields, once initialized.
    pub fn state(&self) -> Option<&SimulationState> {
        self.active.as_ref().map(|run| &run.state)
    }

    /// Output recorded so far, once initialized.
    pub fn output(&self) -> Option<&SimulationOutput> {
        self.active.as_ref().map(|run| &run.output)
    }

    /// Consume the simulation and hand over its output.
    pub fn into_output(self) -> Option<SimulationOutput> {
        self.active.map(|run| run.output)
    }

    /// Statistics of the steps taken so far.
    pub fn result(&self) -> SimulationResult {
        SimulationResult {
            final_time: self.time(),
            n_steps: self.n_steps,
            dt_min: self.dt_min,
            dt_max: self.dt_max,
            wall_time: self.wall_time,
        }
    }
}

/// Advance every non-velocity field with the frozen velocity.
#[cfg(not(feature = "parallel"))]
fn advect_scalars(state: &mut SimulationState, stepper: &mut AdvectionStepper, dx: f64, dt: f64) {
    let (velocity, scalars) = state.split_velocity_mut();
    for (_, field) in scalars {
        stepper.advance_linear(field, velocity, dx, dt);
    }
}

/// Advance every non-velocity field with the frozen velocity, one task per field.
#[cfg(feature = "parallel")]
fn advect_scalars(state: &mut SimulationState, stepper: &mut AdvectionStepper, dx: f64, dt: f64) {
    use rayon::prelude::*;

    let limiter = stepper.limiter();
    let (velocity, scalars) = state.split_velocity_mut();
    scalars.into_par_iter().for_each_init(
        || AdvectionStepper::new(limiter),
        |local, (_, field)| local.advance_linear(field, velocity, dx, dt),
    );
}

/// Interpolate `field` at the output coordinate.
///
/// A padded grid always brackets `output_x`, so `OutOfRangeSample` only
/// fires if the grid and the configuration disagree.
fn sample(grid: &Grid1D, field: &StateField, x: f64) -> Result<f64, SimulationError> {
    grid.interpolate(field.as_slice(), x).ok_or(SimulationError::OutOfRangeSample {
        x,
        x_min: grid.x_min(),
        x_max: grid.x_max(),
    })
}

fn injection_error(variable: &str, err: InjectionError) -> SimulationError {
    match err {
        InjectionError::OutsideGrid { x, x_min, x_max } => SimulationError::InjectionOutsideGrid {
            variable: variable.to_string(),
            x,
            x_min,
            x_max,
        },
        InjectionError::Position(source) | InjectionError::Value(source) => {
            SimulationError::TimeSeries {
                variable: variable.to_string(),
                source,
            }
        }
    }
}
