//! Upwind-split face fluxes with a Lax-Wendroff-type TVD correction.
//!
//! At a face between a left cell (value `u_l`, velocity `a_l`) and a right
//! cell (`u_r`, `a_r`), the flux is the sum of two one-sided branches:
//!
//! ```text
//! F = max(a_l, 0) * (u_l + dx/2 * (1 - a_l dt/dx)   * S)
//!   + min(a_r, 0) * (u_r - dx/2 * (1 - |a_r| dt/dx) * S)
//! ```
//!
//! where `S` is the limited slope. Each branch vanishes when its velocity
//! has the wrong sign, so a face with a sign change needs no special case.

/// Positive part of the velocity.
#[inline]
pub fn positive_part(a: f64) -> f64 {
    a.max(0.0)
}

/// Negative part of the velocity.
#[inline]
pub fn negative_part(a: f64) -> f64 {
    a.min(0.0)
}

/// Linear-advection flux through one face.
///
/// # Arguments
/// * `u_l`, `u_r` - Cell values left and right of the face
/// * `a_l`, `a_r` - Advecting velocity in those cells
/// * `slope` - Limited slope `S(slope_left, slope_right)`
/// * `dx` - Cell size
/// * `dt` - Time step
#[inline]
pub fn linear_face_flux(u_l: f64, u_r: f64, a_l: f64, a_r: f64, slope: f64, dx: f64, dt: f64) -> f64 {
    let half = 0.5 * dx;
    let fp = positive_part(a_l) * (u_l + half * (1.0 - a_l * dt / dx) * slope);
    let fm = negative_part(a_r) * (u_r - half * (1.0 - a_r.abs() * dt / dx) * slope);
    fp + fm
}

/// Burgers flux through one face; the advected quantity is its own velocity.
///
/// Each branch carries `u/2` so a uniform state gives the flux `u²/2`.
#[inline]
pub fn burgers_face_flux(u_l: f64, u_r: f64, slope: f64, dx: f64, dt: f64) -> f64 {
    let half = 0.5 * dx;
    let fp = positive_part(u_l) * (0.5 * u_l + half * (1.0 - u_l * dt / dx) * slope);
    let fm = negative_part(u_r) * (0.5 * u_r - half * (1.0 - u_r.abs() * dt / dx) * slope);
    fp + fm
}
