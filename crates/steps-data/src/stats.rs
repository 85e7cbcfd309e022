//! Descriptive statistics behind the distribution and trend charts.

use std::f64::consts::PI;

/// Bin count for the daily-total histogram.
pub const HISTOGRAM_BINS: usize = 30;

/// Points at which the density curve is evaluated.
pub const DENSITY_GRID_POINTS: usize = 200;

// ── Histogram ─────────────────────────────────────────────────────────────────

/// Equal-width histogram over the range of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `counts.len() + 1` ascending bin edges.
    pub edges: Vec<f64>,
    /// Number of values per bin.
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Width shared by every bin.
    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.get(1)) {
            (Some(lo), Some(hi)) => hi - lo,
            _ => 0.0,
        }
    }

    /// Largest bin count, zero for an empty histogram.
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Bin `values` into `bins` equal-width bins spanning `[min, max]`.
///
/// Bins are half-open except the last, which also includes `max`. When every
/// value is equal the range is widened to `[v - 0.5, v + 0.5]`. Returns `None`
/// for empty input or zero bins.
pub fn histogram(values: &[f64], bins: usize) -> Option<Histogram> {
    if values.is_empty() || bins == 0 {
        return None;
    }

    let (mut lo, mut hi) = min_max(values)?;
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0u64; bins];

    for &value in values {
        let idx = (((value - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Some(Histogram { edges, counts })
}

// ── Kernel density ────────────────────────────────────────────────────────────

/// Gaussian kernel density estimate evaluated on a regular grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityCurve {
    /// `(x, density)` pairs, ascending in `x`.
    pub points: Vec<(f64, f64)>,
    /// Kernel standard deviation used.
    pub bandwidth: f64,
}

impl DensityCurve {
    /// Rescale densities so the curve overlays a count histogram whose bins
    /// are `bin_width` wide.
    pub fn scaled_to_counts(&self, sample_size: usize, bin_width: f64) -> Vec<(f64, f64)> {
        let factor = sample_size as f64 * bin_width;
        self.points.iter().map(|&(x, d)| (x, d * factor)).collect()
    }
}

/// Gaussian KDE with Scott's rule bandwidth, `σ · n^(-1/5)`.
///
/// σ is the sample standard deviation (ddof = 1). The curve spans
/// `[min, max]` of the data in `grid_points` steps. Returns `None` for fewer
/// than two values, zero variance, or fewer than two grid points.
pub fn gaussian_kde(values: &[f64], grid_points: usize) -> Option<DensityCurve> {
    let n = values.len();
    if n < 2 || grid_points < 2 {
        return None;
    }

    let sd = sample_std_dev(values)?;
    if sd <= 0.0 || !sd.is_finite() {
        return None;
    }

    let bandwidth = sd * (n as f64).powf(-1.0 / 5.0);
    let (lo, hi) = min_max(values)?;
    let step = (hi - lo) / (grid_points - 1) as f64;
    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * PI).sqrt());

    let points = (0..grid_points)
        .map(|i| {
            let x = lo + step * i as f64;
            let sum: f64 = values
                .iter()
                .map(|&v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum();
            (x, sum * norm)
        })
        .collect();

    Some(DensityCurve { points, bandwidth })
}

// ── Linear regression ─────────────────────────────────────────────────────────

/// Ordinary least-squares line `y = slope · x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fitted value at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit `ys` against `xs` by ordinary least squares.
///
/// Uses the shorter of the two slices. Returns `None` with fewer than two
/// points or when every `x` is the same.
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> Option<LinearFit> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);

    let mean_x = mean(xs)?;
    let mean_y = mean(ys)?;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        sxx += dx * dx;
        sxy += dx * (y - mean_y);
    }

    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    Some(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── histogram ─────────────────────────────────────────────────────────────

    #[test]
    fn test_histogram_counts_every_value() {
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        let hist = histogram(&values, HISTOGRAM_BINS).unwrap();

        assert_eq!(hist.counts.len(), 30);
        assert_eq!(hist.edges.len(), 31);
        assert_eq!(hist.counts.iter().sum::<u64>(), 100);
    }

    #[test]
    fn test_histogram_max_lands_in_last_bin() {
        let hist = histogram(&[0.0, 10.0], 5).unwrap();
        assert_eq!(hist.counts, vec![1, 0, 0, 0, 1]);
        assert!((hist.bin_width() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_histogram_constant_values_widen_range() {
        let hist = histogram(&[500.0, 500.0, 500.0], 4).unwrap();
        assert_eq!(hist.edges.first().copied(), Some(499.5));
        assert_eq!(hist.edges.last().copied(), Some(500.5));
        assert_eq!(hist.counts.iter().sum::<u64>(), 3);
    }

    #[test]
    fn test_histogram_max_count() {
        let hist = histogram(&[0.0, 4.0, 4.0], 2).unwrap();
        assert_eq!(hist.counts, vec![1, 2]);
        assert_eq!(hist.max_count(), 2);
    }

    #[test]
    fn test_histogram_empty_input() {
        assert!(histogram(&[], 30).is_none());
        assert!(histogram(&[1.0], 0).is_none());
    }

    // ── gaussian_kde ──────────────────────────────────────────────────────────

    #[test]
    fn test_kde_uses_scott_bandwidth() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let curve = gaussian_kde(&values, 50).unwrap();
        // sample sd = sqrt(2.5)
        let expected = 2.5_f64.sqrt() * 5.0_f64.powf(-0.2);
        assert!((curve.bandwidth - expected).abs() < 1e-12);
    }

    #[test]
    fn test_kde_spans_data_range() {
        let values = [10.0, 20.0, 40.0];
        let curve = gaussian_kde(&values, 11).unwrap();
        assert_eq!(curve.points.len(), 11);
        assert_eq!(curve.points.first().map(|p| p.0), Some(10.0));
        assert!((curve.points.last().map(|p| p.0).unwrap() - 40.0).abs() < 1e-9);
        assert!(curve.points.iter().all(|&(_, d)| d > 0.0));
    }

    #[test]
    fn test_kde_peaks_near_cluster() {
        let values = [0.0, 0.1, 0.2, 10.0];
        let curve = gaussian_kde(&values, 101).unwrap();
        let (peak_x, _) = curve
            .points
            .iter()
            .copied()
            .fold((0.0, f64::MIN), |best, p| if p.1 > best.1 { p } else { best });
        assert!(peak_x < 5.0, "peak at {peak_x}");
    }

    #[test]
    fn test_kde_scaled_to_counts() {
        let curve = DensityCurve {
            points: vec![(0.0, 0.5)],
            bandwidth: 1.0,
        };
        assert_eq!(curve.scaled_to_counts(10, 2.0), vec![(0.0, 10.0)]);
    }

    #[test]
    fn test_kde_degenerate_inputs() {
        assert!(gaussian_kde(&[], 10).is_none());
        assert!(gaussian_kde(&[3.0], 10).is_none());
        assert!(gaussian_kde(&[3.0, 3.0, 3.0], 10).is_none());
        assert!(gaussian_kde(&[1.0, 2.0], 1).is_none());
    }

    // ── linear_fit ────────────────────────────────────────────────────────────

    #[test]
    fn test_linear_fit_exact_line() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [1.0, 3.0, 5.0, 7.0];
        let fit = linear_fit(&xs, &ys).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!((fit.predict(10.0) - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_fit_noisy_points() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [1.0, 2.0, 6.0];
        let fit = linear_fit(&xs, &ys).unwrap();
        // slope = sxy / sxx = 5 / 2
        assert!((fit.slope - 2.5).abs() < 1e-12);
        assert!((fit.intercept - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_linear_fit_degenerate() {
        assert!(linear_fit(&[1.0], &[2.0]).is_none());
        assert!(linear_fit(&[2.0, 2.0], &[1.0, 5.0]).is_none());
    }
}
