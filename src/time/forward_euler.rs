//! Explicit Euler conservative update with a CFL-limited time step.
//!
//! Each interior cell is advanced as
//!
//! ```text
//! u[i] += dt/dx * (F[i - 1/2] - F[i + 1/2])
//! ```
//!
//! using the TVD interface fluxes. Halo cells are never written.

use thiserror::Error;

use crate::flux::{n_faces, tvd_flux, tvd_flux_burgers};
use crate::solver::{FluxLimiter, LimiterFn, StateField};

/// Default maximum CFL number.
pub const DEFAULT_NU_MAX: f64 = 0.5;

/// Failure to derive a usable time step.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum TimeStepError {
    /// Every velocity in the field is zero
    #[error("Velocity field is identically zero; CFL time step is undefined")]
    DegenerateVelocity,

    /// The step came out NaN or infinite
    #[error("CFL time step is not finite (max |u| = {max_speed}, dx = {dx})")]
    NonFinite { max_speed: f64, dx: f64 },
}

/// Compute the CFL-limited time step `dt = nu_max * dx / max|u|`.
///
/// # Errors
/// - `DegenerateVelocity` if `max|u|` is exactly zero
/// - `NonFinite` if the velocity holds NaN/inf or the result is not finite
pub fn compute_dt(velocity: &StateField, dx: f64, nu_max: f64) -> Result<f64, TimeStepError> {
    let max_speed = velocity.max_abs();
    let has_nan = velocity.as_slice().iter().any(|v| v.is_nan());

    if max_speed == 0.0 && !has_nan {
        return Err(TimeStepError::DegenerateVelocity);
    }

    let mut dt = nu_max * dx / max_speed;
    if has_nan || !dt.is_finite() || dt <= 0.0 {
        return Err(TimeStepError::NonFinite { max_speed, dx });
    }
    // Rounding must never push the Courant number above nu_max
    while dt > 0.0 && dt * max_speed / dx > nu_max {
        dt = dt.next_down();
    }
    Ok(dt)
}

/// Apply `u[i] += dt/dx * (f[i-2] - f[i-1])` on interior cells.
fn conservative_update(field: &mut StateField, flux: &[f64], dx: f64, dt: f64) {
    let ratio = dt / dx;
    // Interior cell HALO_WIDTH + k sits between faces k and k + 1
    for (k, u) in field.interior_mut().iter_mut().enumerate() {
        *u += ratio * (flux[k] - flux[k + 1]);
    }
}

/// Reusable stepper holding the resolved limiter and a flux scratch buffer.
#[derive(Clone, Debug)]
pub struct AdvectionStepper {
    limiter: FluxLimiter,
    limiter_fn: LimiterFn,
    flux: Vec<f64>,
}

impl AdvectionStepper {
    /// Create a stepper for the given limiter.
    pub fn new(limiter: FluxLimiter) -> Self {
        Self {
            limiter,
            limiter_fn: limiter.function(),
            flux: Vec::new(),
        }
    }

    /// Limiter in use.
    pub fn limiter(&self) -> FluxLimiter {
        self.limiter
    }

    /// Advance a passive scalar with the frozen `velocity`.
    pub fn advance_linear(&mut self, field: &mut StateField, velocity: &StateField, dx: f64, dt: f64) {
        self.flux.resize(n_faces(field.len()), 0.0);
        tvd_flux(
            field.as_slice(),
            velocity.as_slice(),
            dx,
            dt,
            self.limiter_fn,
            &mut self.flux,
        );
        conservative_update(field, &self.flux, dx, dt);
    }

    /// Advance the velocity field with the Burgers flux.
    pub fn advance_burgers(&mut self, field: &mut StateField, dx: f64, dt: f64) {
        self.flux.resize(n_faces(field.len()), 0.0);
        tvd_flux_burgers(field.as_slice(), dx, dt, self.limiter_fn, &mut self.flux);
        conservative_update(field, &self.flux, dx, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Grid1D;

    fn grid(n: usize) -> Grid1D {
        Grid1D::uniform(0.0, (n - 1) as f64, n).unwrap()
    }

    #[test]
    fn test_cfl_bound() {
        let g = grid(20);
        let velocity = StateField::from_function(&g, |x| -400.0 + 3.0 * x);
        let dt = compute_dt(&velocity, g.dx(), 0.5).unwrap();

        assert!((dt * velocity.max_abs() / g.dx() - 0.5).abs() < 1e-14);
        assert!(dt * velocity.max_abs() / g.dx() <= 0.5);
    }

    #[test]
    fn test_zero_velocity_is_error() {
        let g = grid(10);
        let velocity = StateField::uniform_on(&g, 0.0);
        assert_eq!(
            compute_dt(&velocity, g.dx(), 0.5),
            Err(TimeStepError::DegenerateVelocity)
        );
    }

    #[test]
    fn test_nan_velocity_is_error() {
        let g = grid(10);
        let mut velocity = StateField::uniform_on(&g, 1.0);
        velocity.set(crate::types::CellIndex::new(4), f64::NAN);
        assert!(matches!(
            compute_dt(&velocity, g.dx(), 0.5),
            Err(TimeStepError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_cfl_bound_holds_after_rounding() {
        // First quotient rounds one ulp above nu_max; a single nudge is not enough
        let dx = 1.0390680983274253e4;
        let nu_max = 9.147040121348551e-1;
        let g = Grid1D::uniform(0.0, 7.0 * dx, 8).unwrap();
        let velocity = StateField::uniform_on(&g, -9.898585230272076e3);

        let dt = compute_dt(&velocity, dx, nu_max).unwrap();
        assert!(dt * velocity.max_abs() / dx <= nu_max);
        assert!(nu_max - dt * velocity.max_abs() / dx < 1e-15);
    }

    #[test]
    fn test_cfl_bound_random_sweep() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(2015);
        for _ in 0..100_000 {
            let dx = 10f64.powf(rng.gen_range(-3.0..7.0));
            let speed = 10f64.powf(rng.gen_range(-2.0..4.0)) * if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            let nu_max = rng.gen_range(0.01..1.0);
            let g = Grid1D::uniform(0.0, 7.0 * dx, 8).unwrap();
            let velocity = StateField::uniform_on(&g, speed);

            let dt = compute_dt(&velocity, dx, nu_max).unwrap();
            let courant = dt * speed.abs() / dx;
            assert!(courant <= nu_max, "courant {courant} > {nu_max} (dx = {dx}, u = {speed})");
        }
    }

    #[test]
    fn test_uniform_field_unchanged_for_every_limiter() {
        let g = grid(30);
        let velocity = StateField::uniform_on(&g, -7.0);
        let dt = compute_dt(&velocity, g.dx(), 0.5).unwrap();

        for limiter in FluxLimiter::ALL {
            let mut stepper = AdvectionStepper::new(limiter);
            let mut rho = StateField::uniform_on(&g, 4.2);
            let mut u = velocity.clone();
            for _ in 0..10 {
                stepper.advance_linear(&mut rho, &u, g.dx(), dt);
                stepper.advance_burgers(&mut u, g.dx(), dt);
            }
            for &v in rho.interior() {
                assert!((v - 4.2).abs() < 1e-12, "{limiter}: drift to {v}");
            }
            for &v in u.interior() {
                assert!((v + 7.0).abs() < 1e-12, "{limiter}: velocity drift to {v}");
            }
        }
    }

    #[test]
    fn test_halo_untouched_by_step() {
        let g = grid(12);
        let mut rho = StateField::from_function(&g, |x| if x < 5.0 { 1.0 } else { 0.0 });
        rho.set(crate::types::CellIndex::new(0), 9.0);
        rho.set(crate::types::CellIndex::new(11), -9.0);
        let velocity = StateField::uniform_on(&g, 1.0);

        AdvectionStepper::new(FluxLimiter::Superbee).advance_linear(&mut rho, &velocity, g.dx(), 0.5);

        assert_eq!(rho.halo_left(), &[9.0, 1.0]);
        assert_eq!(rho.halo_right(), &[0.0, -9.0]);
    }

    #[test]
    fn test_donor_cell_shift() {
        // nu = 1 with first-order upwind shifts the profile by one cell
        let g = grid(10);
        let mut rho = StateField::from_function(&g, |x| x * x);
        let velocity = StateField::uniform_on(&g, 1.0);
        let before = rho.as_slice().to_vec();

        AdvectionStepper::new(FluxLimiter::FirstOrderUpwind).advance_linear(&mut rho, &velocity, 1.0, 1.0);

        for i in 2..8 {
            assert!((rho.as_slice()[i] - before[i - 1]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_interior_mass_conserved() {
        // Total interior mass changes only by the boundary face fluxes
        let g = grid(40);
        let mut rho = StateField::from_function(&g, |x| (-(x - 20.0).powi(2) / 8.0).exp());
        let velocity = StateField::uniform_on(&g, 2.0);
        let dt = compute_dt(&velocity, g.dx(), 0.5).unwrap();
        let mass_before = rho.interior_integral(g.dx());

        let mut stepper = AdvectionStepper::new(FluxLimiter::Harmonic);
        stepper.advance_linear(&mut rho, &velocity, g.dx(), dt);

        let mass_after = rho.interior_integral(g.dx());
        assert!((mass_after - mass_before).abs() < 1e-8);
    }

    #[test]
    fn test_stepper_reused_across_grid_sizes() {
        let mut shared = AdvectionStepper::new(FluxLimiter::Geometric);
        for n in [16, 9, 24] {
            let g = grid(n);
            let start = StateField::from_function(&g, |x| (x / 3.0).sin() - 2.0);

            let mut a = start.clone();
            let mut b = start;
            shared.advance_burgers(&mut a, g.dx(), 0.2);
            AdvectionStepper::new(FluxLimiter::Geometric).advance_burgers(&mut b, g.dx(), 0.2);
            assert_eq!(a, b, "{n} cells");
        }
    }
}
