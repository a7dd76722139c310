//! Trait definitions for slope limiters.

/// Plain function form of a limiter, `S(slope_left, slope_right)`.
pub type LimiterFn = fn(f64, f64) -> f64;

/// Trait for TVD slope limiters used in interface reconstruction.
///
/// A limiter maps the one-sided slopes around a cell to the slope used for
/// the half-cell reconstruction.
///
/// # Implementation Notes
///
/// - `limit` must be pure and elementwise
/// - For opposite-signed slopes a TVD limiter returns 0 (local extremum)
pub trait SlopeLimiter: Send + Sync {
    /// Limited slope from the left and right one-sided slopes.
    fn limit(&self, slope_left: f64, slope_right: f64) -> f64;

    /// Registry name of the limiter.
    fn name(&self) -> &'static str;

    /// Whether the limiter satisfies the TVD property.
    fn is_tvd(&self) -> bool {
        true
    }

    /// Apply the limiter elementwise over equal-length slope arrays.
    ///
    /// # Panics
    /// Panics if the three slices differ in length.
    fn limit_into(&self, slope_left: &[f64], slope_right: &[f64], out: &mut [f64]) {
        assert_eq!(slope_left.len(), slope_right.len());
        assert_eq!(slope_left.len(), out.len());
        for ((o, &sm), &sp) in out.iter_mut().zip(slope_left).zip(slope_right) {
            *o = self.limit(sm, sp);
        }
    }

    /// Allocating variant of [`limit_into`](Self::limit_into).
    fn limit_all(&self, slope_left: &[f64], slope_right: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; slope_left.len()];
        self.limit_into(slope_left, slope_right, &mut out);
        out
    }
}

/// Type alias for boxed limiter (runtime polymorphism).
pub type BoxedSlopeLimiter = Box<dyn SlopeLimiter>;
