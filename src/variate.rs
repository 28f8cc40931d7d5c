//! Exponential variates by inverse-transform sampling.

use crate::error::{SimulationError, SimulationResult};

/// Largest value a uniform sample is clamped to before it is binned or transformed.
pub const UNIT_CEILING: f64 = 0.999_999;

/// Clamp a uniform sample into `[0, UNIT_CEILING]`.
pub fn clamp_unit(u: f64) -> f64 {
    u.clamp(0.0, UNIT_CEILING)
}

/// Inverse CDF of the exponential distribution: `-ln(1 - u) / rate`.
///
/// The caller must ensure `0 <= u < 1`. At `u = 1` the result is infinite.
pub fn exponential(u: f64, rate: f64) -> f64 {
    -(1.0 - u).ln() / rate
}

/// Turns uniform samples into exponentially distributed durations with a fixed rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialSampler {
    rate: f64,
}

impl ExponentialSampler {
    /// Create a sampler for the given rate (events per unit time).
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// The rate of this sampler.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// The mean duration, `1 / rate`.
    pub fn mean(&self) -> f64 {
        1.0 / self.rate
    }

    /// Transform one uniform sample, clamping it below 1 first.
    pub fn sample(&self, u: f64) -> f64 {
        exponential(clamp_unit(u), self.rate)
    }

    /// Produce `count` durations, reusing `uniforms` cyclically.
    pub fn sample_cyclic(&self, uniforms: &[f64], count: usize) -> SimulationResult<Vec<f64>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        if uniforms.is_empty() {
            return Err(SimulationError::NoUniforms);
        }

        Ok(uniforms
            .iter()
            .cycle()
            .take(count)
            .map(|&u| self.sample(u))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::RandomStream;

    #[test]
    fn test_exponential_of_zero_is_zero() {
        assert_eq!(exponential(0.0, 0.5), 0.0);
    }

    #[test]
    fn test_exponential_median() {
        // Half of the mass lies below ln(2) / rate.
        let value = exponential(0.5, 2.0);
        assert!((value - std::f64::consts::LN_2 / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_first_variates_for_seed_42() {
        let mut stream = RandomStream::new(42);
        let u_arrival = stream.next_uniform();
        let u_service = stream.next_uniform();

        assert_eq!(u_service, 0.5198187492787838);
        let interarrival = ExponentialSampler::new(0.5).sample(u_arrival);
        let service = ExponentialSampler::new(1.0).sample(u_service);
        assert!((interarrival - 1.7460199557527845).abs() < 1e-12);
        assert!((service - 0.7335916406860787).abs() < 1e-12);
    }

    #[test]
    fn test_sample_clamps_one() {
        let value = ExponentialSampler::new(1.0).sample(1.0);

        assert!(value.is_finite());
        assert!((value - exponential(UNIT_CEILING, 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_variates_non_negative() {
        let uniforms = RandomStream::new(3).uniforms(1000);
        let sampler = ExponentialSampler::new(0.5);

        let variates = sampler.sample_cyclic(&uniforms, 1000).unwrap();

        assert!(variates.iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn test_sample_cyclic_reuses_uniforms() {
        let sampler = ExponentialSampler::new(1.0);
        let uniforms = [0.1, 0.2, 0.3];

        let variates = sampler.sample_cyclic(&uniforms, 7).unwrap();

        assert_eq!(variates.len(), 7);
        assert_eq!(variates[0], variates[3]);
        assert_eq!(variates[0], variates[6]);
        assert_eq!(variates[2], variates[5]);
    }

    #[test]
    fn test_sample_cyclic_empty_uniforms() {
        let sampler = ExponentialSampler::new(1.0);

        assert!(matches!(
            sampler.sample_cyclic(&[], 3),
            Err(SimulationError::NoUniforms)
        ));
        assert_eq!(sampler.sample_cyclic(&[], 0).unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn test_mean_of_many_samples() {
        let rate = 2.0;
        let sampler = ExponentialSampler::new(rate);
        let uniforms = RandomStream::new(123).uniforms(10_000);

        let samples = sampler.sample_cyclic(&uniforms, uniforms.len()).unwrap();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;

        // Should be within 10% of expected with 10,000 samples
        let tolerance = sampler.mean() * 0.1;
        assert!(
            (mean - sampler.mean()).abs() < tolerance,
            "Mean {:.4} not within {:.4} of expected {:.4}",
            mean,
            tolerance,
            sampler.mean()
        );
    }
}
