//! Simulation parameters.

use std::fmt::{self, Display};
use std::path::Path;

use bon::bon;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::stream::LcgParams;

/// Everything needed to reproduce a run.
///
/// Build one with [`SimulationConfig::builder`], or deserialize it from TOML. Fields missing from
/// a TOML document take their default values.
///
/// ```toml
/// seed = 7
/// arrival_rate = 0.8
///
/// [lcg]
/// modulus = 2147483647
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[non_exhaustive]
pub struct SimulationConfig {
    /// Initial generator state.
    pub seed: i32,
    /// Generator constants.
    pub lcg: LcgParams,
    /// Mean customer arrivals per unit time (λ_a).
    pub arrival_rate: f64,
    /// Mean service completions per unit time while busy (λ_s).
    pub service_rate: f64,
    /// Length of each uniform sequence (interarrival and service).
    pub uniform_count: usize,
    /// Number of simulated customers. Uniforms are reused cyclically when this exceeds
    /// `uniform_count`.
    pub customer_count: usize,
}

#[bon]
impl SimulationConfig {
    #[allow(missing_docs)]
    #[builder]
    pub fn new(
        /// Initial generator state.
        #[builder(default = 42)]
        seed: i32,
        /// Generator constants.
        #[builder(default)]
        lcg: LcgParams,
        /// Mean customer arrivals per unit time.
        #[builder(default = 0.5)]
        arrival_rate: f64,
        /// Mean service completions per unit time.
        #[builder(default = 1.0)]
        service_rate: f64,
        /// Length of each uniform sequence.
        #[builder(default = 50)]
        uniform_count: usize,
        /// Number of simulated customers.
        #[builder(default = 100)]
        customer_count: usize,
    ) -> Self {
        Self {
            seed,
            lcg,
            arrival_rate,
            service_rate,
            uniform_count,
            customer_count,
        }
    }

    /// Parse a TOML document, then validate it.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file, then validate it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Check that a run with these parameters is well defined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lcg.validate()?;
        check_rate("arrival_rate", self.arrival_rate)?;
        check_rate("service_rate", self.service_rate)?;
        if self.uniform_count == 0 {
            return Err(ConfigError::ZeroCount {
                name: "uniform_count",
            });
        }
        if self.customer_count == 0 {
            return Err(ConfigError::ZeroCount {
                name: "customer_count",
            });
        }
        Ok(())
    }

    /// Offered load `λ_a / λ_s`. The queue is stable below 1.
    pub fn traffic_intensity(&self) -> f64 {
        self.arrival_rate / self.service_rate
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Display for SimulationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seed: {}, A: {}, C: {}, M: {}, arrival_rate: {}, service_rate: {}, uniforms: {}, customers: {}",
            self.seed,
            self.lcg.multiplier,
            self.lcg.increment,
            self.lcg.modulus,
            self.arrival_rate,
            self.service_rate,
            self.uniform_count,
            self.customer_count
        )
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{DEFAULT_INCREMENT, DEFAULT_MODULUS, DEFAULT_MULTIPLIER};

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();

        assert_eq!(config.seed, 42);
        assert_eq!(config.lcg.multiplier, DEFAULT_MULTIPLIER);
        assert_eq!(config.lcg.increment, DEFAULT_INCREMENT);
        assert_eq!(config.lcg.modulus, DEFAULT_MODULUS);
        assert_eq!(config.arrival_rate, 0.5);
        assert_eq!(config.service_rate, 1.0);
        assert_eq!(config.uniform_count, 50);
        assert_eq!(config.customer_count, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = SimulationConfig::builder()
            .seed(7)
            .customer_count(10)
            .build();

        assert_eq!(config.seed, 7);
        assert_eq!(config.customer_count, 10);
        assert_eq!(config.uniform_count, 50);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimulationConfig::from_toml_str(
            r#"
            seed = 7
            arrival_rate = 0.8

            [lcg]
            modulus = 2147483647
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.arrival_rate, 0.8);
        assert_eq!(config.service_rate, 1.0);
        assert_eq!(config.lcg.modulus, 2_147_483_647);
        assert_eq!(config.lcg.multiplier, DEFAULT_MULTIPLIER);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = SimulationConfig::from_toml_str("servers = 2");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_rate_rejected() {
        let config = SimulationConfig::builder().service_rate(0.0).build();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRate {
                name: "service_rate",
                ..
            })
        ));

        let config = SimulationConfig::builder().arrival_rate(f64::NAN).build();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRate {
                name: "arrival_rate",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_counts_rejected() {
        let config = SimulationConfig::builder().uniform_count(0).build();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroCount {
                name: "uniform_count"
            })
        ));

        let config = SimulationConfig::builder().customer_count(0).build();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroCount {
                name: "customer_count"
            })
        ));
    }

    #[test]
    fn test_invalid_modulus_in_toml() {
        let result = SimulationConfig::from_toml_str("[lcg]\nmodulus = -1");

        assert!(matches!(result, Err(ConfigError::InvalidModulus(-1))));
    }

    #[test]
    fn test_traffic_intensity() {
        assert_eq!(SimulationConfig::default().traffic_intensity(), 0.5);
    }
}
