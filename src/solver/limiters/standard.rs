//! Standard flux limiters and the name registry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::traits::{BoxedSlopeLimiter, LimiterFn, SlopeLimiter};

/// Regularisation of the van Leer (harmonic) limiter denominator.
pub const HARMONIC_EPSILON: f64 = 1e-12;

/// Limiter name not present in the registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown flux limiter '{name}' (expected one of: {})", FluxLimiter::NAMES.join(", "))]
pub struct UnknownLimiterError {
    /// The name that failed to resolve
    pub name: String,
}

/// Sign function with `sign(0) = 0`.
#[inline]
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Donor-cell scheme: no reconstruction.
pub fn first_order_upwind(_sm: f64, _sp: f64) -> f64 {
    0.0
}

/// Unlimited downwind slope (second order, not TVD).
pub fn lax_wendroff(_sm: f64, sp: f64) -> f64 {
    sp
}

/// Minmod: smallest magnitude of same-signed slopes, 0 at extrema.
pub fn minmod(sm: f64, sp: f64) -> f64 {
    if sm * sp <= 0.0 {
        return 0.0;
    }
    sm.abs().min(sp.abs()) * sign(sm + sp)
}

/// Van Leer harmonic-mean limiter.
pub fn harmonic(sm: f64, sp: f64) -> f64 {
    (sm * sp.abs() + sm.abs() * sp) / (sm.abs() + sp.abs() + HARMONIC_EPSILON)
}

/// Geometric-mean limiter.
pub fn geometric(sm: f64, sp: f64) -> f64 {
    let product = sm * sp;
    (0.5 * (product + product.abs())).max(0.0).sqrt() * sign(sm + sp)
}

/// Superbee: the least diffusive TVD limiter.
pub fn superbee(sm: f64, sp: f64) -> f64 {
    if sm * sp <= 0.0 {
        return 0.0;
    }
    let (a, b) = (sm.abs(), sp.abs());
    (2.0 * a).min(b).max(a.min(2.0 * b)).max(0.0) * sign(sm + sp)
}

/// Closed set of built-in flux limiters.
///
/// Selected by name once at configuration time; stepping then calls the
/// resolved function pointer directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FluxLimiter {
    /// Always 0 (pure donor cell, maximal numerical diffusion)
    FirstOrderUpwind,
    /// Right slope unmodified (unlimited, not TVD)
    LaxWendroff,
    /// Most diffusive TVD limiter
    #[default]
    Minmod,
    /// Van Leer
    Harmonic,
    /// Geometric mean of the slopes
    Geometric,
    /// Least diffusive TVD limiter
    Superbee,
}

/// Registry of limiter names and functions.
const REGISTRY: [(FluxLimiter, &str, LimiterFn); 6] = [
    (FluxLimiter::FirstOrderUpwind, "FirstOrderUpwind", first_order_upwind),
    (FluxLimiter::LaxWendroff, "LaxWendroff", lax_wendroff),
    (FluxLimiter::Minmod, "Minmod", minmod),
    (FluxLimiter::Harmonic, "Harmonic", harmonic),
    (FluxLimiter::Geometric, "Geometric", geometric),
    (FluxLimiter::Superbee, "Superbee", superbee),
];

impl FluxLimiter {
    /// All registered limiter names.
    pub const NAMES: [&'static str; 6] = [
        "FirstOrderUpwind",
        "LaxWendroff",
        "Minmod",
        "Harmonic",
        "Geometric",
        "Superbee",
    ];

    /// All variants, in registry order.
    pub const ALL: [FluxLimiter; 6] = [
        FluxLimiter::FirstOrderUpwind,
        FluxLimiter::LaxWendroff,
        FluxLimiter::Minmod,
        FluxLimiter::Harmonic,
        FluxLimiter::Geometric,
        FluxLimiter::Superbee,
    ];

    /// Resolve a limiter by its registry name.
    pub fn from_name(name: &str) -> Result<Self, UnknownLimiterError> {
        REGISTRY
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(limiter, _, _)| *limiter)
            .ok_or_else(|| UnknownLimiterError {
                name: name.to_string(),
            })
    }

    /// Function pointer implementing this limiter.
    pub fn function(self) -> LimiterFn {
        REGISTRY[self as usize].2
    }

    /// Boxed trait object for runtime polymorphism.
    pub fn boxed(self) -> BoxedSlopeLimiter {
        Box::new(self)
    }
}

impl SlopeLimiter for FluxLimiter {
    #[inline]
    fn limit(&self, slope_left: f64, slope_right: f64) -> f64 {
        (self.function())(slope_left, slope_right)
    }

    fn name(&self) -> &'static str {
        REGISTRY[*self as usize].1
    }

    fn is_tvd(&self) -> bool {
        !matches!(self, FluxLimiter::LaxWendroff)
    }
}

impl FromStr for FluxLimiter {
    type Err = UnknownLimiterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for FluxLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAME_SIGN_PAIRS: [(f64, f64); 8] = [
        (1.0, 1.0),
        (1.0, 2.0),
        (2.0, 1.0),
        (0.1, 3.0),
        (-1.0, -2.0),
        (-3.0, -0.5),
        (1e-6, 1e3),
        (-4.0, -4.0),
    ];

    #[test]
    fn test_registry_round_trip() {
        for limiter in FluxLimiter::ALL {
            assert_eq!(FluxLimiter::from_name(limiter.name()), Ok(limiter));
            assert_eq!(limiter.to_string(), limiter.name());
        }
        assert_eq!(FluxLimiter::NAMES.len(), FluxLimiter::ALL.len());
    }

    #[test]
    fn test_unknown_limiter() {
        let err = FluxLimiter::from_name("VanAlbada").unwrap_err();
        assert_eq!(err.name, "VanAlbada");
        assert!(err.to_string().contains("Superbee"));
        assert!("minmod".parse::<FluxLimiter>().is_err());
    }

    #[test]
    fn test_minmod_le_harmonic_le_superbee() {
        for (sm, sp) in SAME_SIGN_PAIRS {
            let mm = minmod(sm, sp);
            let hm = harmonic(sm, sp);
            let sb = superbee(sm, sp);

            assert!(mm.abs() <= hm.abs() + 1e-12, "minmod > harmonic for ({sm}, {sp})");
            assert!(hm.abs() <= sb.abs() + 1e-12, "harmonic > superbee for ({sm}, {sp})");

            let expected_sign = (sm + sp).signum();
            for value in [mm, hm, sb, geometric(sm, sp)] {
                assert_eq!(value.signum(), expected_sign, "sign for ({sm}, {sp})");
            }
        }
    }

    #[test]
    fn test_geometric_at_least_minmod() {
        for (sm, sp) in SAME_SIGN_PAIRS {
            assert!(minmod(sm, sp).abs() <= geometric(sm, sp).abs() + 1e-12);
        }
        // Bounded by superbee only while the slopes are within a factor of 4
        assert!(geometric(1.0, 3.0) <= superbee(1.0, 3.0));
        assert!(geometric(1.0, 16.0) > superbee(1.0, 16.0));
    }

    #[test]
    fn test_opposite_signs_give_zero() {
        let pairs = [(1.0, -1.0), (-2.0, 0.5), (3.0, -0.1), (0.0, 1.0), (1.0, 0.0)];
        for limiter in FluxLimiter::ALL {
            if limiter == FluxLimiter::LaxWendroff {
                continue;
            }
            for (sm, sp) in pairs {
                assert_eq!(limiter.limit(sm, sp), 0.0, "{limiter} at ({sm}, {sp})");
            }
        }
        assert_eq!(FluxLimiter::LaxWendroff.limit(1.0, -1.0), -1.0);
    }

    #[test]
    fn test_known_values() {
        assert_eq!(minmod(1.0, 3.0), 1.0);
        assert_eq!(minmod(-1.0, -3.0), -1.0);
        assert_eq!(superbee(1.0, 3.0), 2.0);
        assert_eq!(superbee(1.0, 1.5), 1.5);
        assert!((harmonic(1.0, 3.0) - 1.5).abs() < 1e-10);
        assert!((geometric(1.0, 4.0) - 2.0).abs() < 1e-14);
        assert!((geometric(-1.0, -4.0) + 2.0).abs() < 1e-14);
        assert_eq!(first_order_upwind(5.0, 5.0), 0.0);
        assert_eq!(lax_wendroff(5.0, 7.0), 7.0);
    }

    #[test]
    fn test_tvd_flags() {
        assert!(!FluxLimiter::LaxWendroff.is_tvd());
        assert!(FluxLimiter::Superbee.is_tvd());
        assert!(FluxLimiter::FirstOrderUpwind.boxed().is_tvd());
    }

    #[test]
    fn test_limit_all_elementwise() {
        let sm = [1.0, -1.0, 2.0];
        let sp = [2.0, 1.0, 2.0];
        let out = FluxLimiter::Minmod.limit_all(&sm, &sp);
        assert_eq!(out, vec![1.0, 0.0, 2.0]);
    }
}
