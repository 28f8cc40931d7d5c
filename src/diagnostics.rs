//! Statistical self-checks on a sequence of uniform samples.
//!
//! Both checks are descriptive: they report what they measured and never fail a run.

use std::fmt::{self, Display};

use crate::variate::clamp_unit;

/// Number of equal-width bins in the uniformity histogram.
pub const BIN_COUNT: usize = 10;

/// Lag-1 correlations with a smaller magnitude than this are considered independent.
pub const INDEPENDENCE_THRESHOLD: f64 = 0.1;

/// Histogram of uniform samples over [`BIN_COUNT`] equal-width bins of `[0, 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformityReport {
    bins: [usize; BIN_COUNT],
}

impl UniformityReport {
    /// Bin every sample, clamping values at or above 1 into the last bin.
    pub fn from_samples(samples: &[f64]) -> Self {
        let mut bins = [0; BIN_COUNT];
        for &u in samples {
            let bin = (clamp_unit(u) * BIN_COUNT as f64) as usize;
            bins[bin.min(BIN_COUNT - 1)] += 1;
        }
        Self { bins }
    }

    /// Count per bin, lowest bin first.
    pub fn bins(&self) -> &[usize; BIN_COUNT] {
        &self.bins
    }

    /// Total number of binned samples.
    pub fn total(&self) -> usize {
        self.bins.iter().sum()
    }

    /// Lower and upper bound of bin `index`.
    pub fn bin_bounds(index: usize) -> (f64, f64) {
        let width = 1.0 / BIN_COUNT as f64;
        (index as f64 * width, (index + 1) as f64 * width)
    }

    /// Pearson chi-square statistic against an equal count per bin.
    ///
    /// Returns `None` when there are no samples.
    pub fn chi_square(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let expected = total as f64 / BIN_COUNT as f64;
        Some(
            self.bins
                .iter()
                .map(|&observed| {
                    let diff = observed as f64 - expected;
                    diff * diff / expected
                })
                .sum(),
        )
    }
}

/// Outcome of the lag-1 independence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Independence {
    /// `|r| < INDEPENDENCE_THRESHOLD`.
    LikelyIndependent,
    /// `|r| >= INDEPENDENCE_THRESHOLD`.
    MightNotBeIndependent,
    /// The correlation could not be computed (too few samples or zero variance).
    Undefined,
}

impl Display for Independence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Independence::LikelyIndependent => "Likely independent.",
            Independence::MightNotBeIndependent => "Might not be independent.",
            Independence::Undefined => "Undefined (zero variance or too few samples).",
        })
    }
}

/// Pearson correlation between each sample and its successor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndependenceReport {
    correlation: f64,
    verdict: Independence,
}

impl IndependenceReport {
    /// Correlate `samples[0..n-1]` against `samples[1..n]`.
    pub fn from_samples(samples: &[f64]) -> Self {
        let correlation = lag1_correlation(samples);
        let verdict = if correlation.is_nan() {
            Independence::Undefined
        } else if correlation.abs() < INDEPENDENCE_THRESHOLD {
            Independence::LikelyIndependent
        } else {
            Independence::MightNotBeIndependent
        };
        Self {
            correlation,
            verdict,
        }
    }

    /// The coefficient, in `[-1, 1]`, or NaN when undefined.
    pub fn correlation(&self) -> f64 {
        self.correlation
    }

    /// Classification of the coefficient.
    pub fn verdict(&self) -> Independence {
        self.verdict
    }
}

/// Pearson correlation of adjacent pairs. NaN for fewer than two samples or zero variance.
fn lag1_correlation(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return f64::NAN;
    }

    let current = &samples[..samples.len() - 1];
    let next = &samples[1..];
    let pairs = current.len() as f64;

    let mean_current = current.iter().sum::<f64>() / pairs;
    let mean_next = next.iter().sum::<f64>() / pairs;

    let mut covariance = 0.0;
    let mut var_current = 0.0;
    let mut var_next = 0.0;
    for (u, v) in current.iter().zip(next) {
        let du = u - mean_current;
        let dv = v - mean_next;
        covariance += du * dv;
        var_current += du * du;
        var_next += dv * dv;
    }

    let denominator = (var_current * var_next).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return f64::NAN;
    }

    (covariance / denominator).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::RandomStream;

    #[test]
    fn test_bins_sum_to_sample_count() {
        let samples = RandomStream::new(42).uniforms(50);

        let report = UniformityReport::from_samples(&samples);

        assert_eq!(report.total(), 50);
    }

    #[test]
    fn test_binning_edges() {
        let report = UniformityReport::from_samples(&[0.0, 0.1, 0.099, 0.95, 1.0, 1.5]);

        assert_eq!(report.bins(), &[2, 1, 0, 0, 0, 0, 0, 0, 0, 3]);
    }

    #[test]
    fn test_empty_histogram() {
        let report = UniformityReport::from_samples(&[]);

        assert_eq!(report.total(), 0);
        assert_eq!(report.chi_square(), None);
    }

    #[test]
    fn test_chi_square_perfectly_uniform() {
        let samples: Vec<f64> = (0..BIN_COUNT).map(|i| i as f64 / 10.0 + 0.05).collect();

        let report = UniformityReport::from_samples(&samples);

        assert_eq!(report.chi_square(), Some(0.0));
    }

    #[test]
    fn test_bin_bounds() {
        assert_eq!(UniformityReport::bin_bounds(0), (0.0, 0.1));
        let (lo, hi) = UniformityReport::bin_bounds(9);
        assert!((lo - 0.9).abs() < 1e-12);
        assert!((hi - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfectly_correlated_sequence() {
        let samples: Vec<f64> = (0..20).map(|i| i as f64 / 20.0).collect();

        let report = IndependenceReport::from_samples(&samples);

        assert!((report.correlation() - 1.0).abs() < 1e-12);
        assert_eq!(report.verdict(), Independence::MightNotBeIndependent);
    }

    #[test]
    fn test_alternating_sequence_is_anti_correlated() {
        let samples: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { 0.2 } else { 0.8 }).collect();

        let report = IndependenceReport::from_samples(&samples);

        assert!((report.correlation() + 1.0).abs() < 1e-12);
        assert_eq!(report.verdict(), Independence::MightNotBeIndependent);
    }

    #[test]
    fn test_constant_sequence_is_undefined() {
        let report = IndependenceReport::from_samples(&[0.5; 10]);

        assert!(report.correlation().is_nan());
        assert_eq!(report.verdict(), Independence::Undefined);
    }

    #[test]
    fn test_too_few_samples_is_undefined() {
        assert_eq!(
            IndependenceReport::from_samples(&[0.3]).verdict(),
            Independence::Undefined
        );
        assert_eq!(
            IndependenceReport::from_samples(&[]).verdict(),
            Independence::Undefined
        );
    }

    #[test]
    fn test_generator_correlation_is_bounded() {
        for seed in [1, 42, 1234, -17] {
            let samples = RandomStream::new(seed).uniforms(500);

            let r = IndependenceReport::from_samples(&samples).correlation();

            assert!((-1.0..=1.0).contains(&r), "seed {seed}: {r}");
        }
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(
            Independence::LikelyIndependent.to_string(),
            "Likely independent."
        );
        assert_eq!(
            Independence::MightNotBeIndependent.to_string(),
            "Might not be independent."
        );
    }
}
