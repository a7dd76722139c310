//! Gaussian smoothing of uniformly sampled series.

/// Kernel half-width in units of `sigma`.
const TRUNCATE: f64 = 4.0;

/// Map an out-of-range index into `[0, n)` by mirror reflection that
/// repeats the edge sample (`d c b a | a b c d | d c b a`).
#[inline]
fn reflect_index(i: isize, n: usize) -> usize {
    let period = 2 * n as isize;
    let m = i.rem_euclid(period) as usize;
    if m < n { m } else { 2 * n - 1 - m }
}

/// Normalised Gaussian weights for offsets `-radius..=radius`.
fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (TRUNCATE * sigma + 0.5) as usize;
    let mut weights: Vec<f64> = (0..=2 * radius)
        .map(|k| {
            let x = k as f64 - radius as f64;
            (-0.5 * x * x / (sigma * sigma)).exp()
        })
        .collect();
    let total: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    weights
}

/// Convolve `values` with a Gaussian of standard deviation `sigma` samples.
///
/// The kernel is truncated at `4 sigma` and the series is extended by
/// reflection at both ends. A non-positive `sigma` returns the input.
pub fn gaussian_smooth(values: &[f64], sigma: f64) -> Vec<f64> {
    if values.is_empty() || !(sigma > 0.0) {
        return values.to_vec();
    }

    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as isize;
    let n = values.len();

    (0..n)
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .map(|(k, w)| {
                    let j = reflect_index(i as isize + k as isize - radius, n);
                    w * values[j]
                })
                .sum()
        })
        .collect()
}
