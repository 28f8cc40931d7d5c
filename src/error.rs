//! Errors.

use thiserror::Error;

/// A simulation configuration that cannot be run.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// The generator modulus must be positive.
    #[error("LCG modulus must be positive, got {0}")]
    InvalidModulus(i64),

    /// A rate parameter was zero, negative or not finite.
    #[error("{name} must be a positive finite number, got {value}")]
    InvalidRate {
        /// Which rate was invalid.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A sample count was zero.
    #[error("{name} must be at least 1")]
    ZeroCount {
        /// Which count was zero.
        name: &'static str,
    },

    /// The configuration file could not be read.
    #[error("Unable to read configuration file")]
    Io(#[from] std::io::Error),

    /// The configuration file was not valid TOML for a simulation config.
    #[error("Unable to parse configuration")]
    Parse(#[from] toml::de::Error),
}

/// Something went wrong while simulating the queue.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SimulationError {
    /// The configuration was rejected before the run started.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Each customer needs exactly one interarrival and one service duration.
    #[error("Sequence lengths differ: {interarrival} interarrival times, {service} service times")]
    LengthMismatch {
        /// Length of the interarrival sequence.
        interarrival: usize,
        /// Length of the service sequence.
        service: usize,
    },

    /// Durations must be finite and non-negative.
    #[error("Invalid duration {value} at index {index}")]
    InvalidDuration {
        /// Position of the offending duration.
        index: usize,
        /// The offending duration.
        value: f64,
    },

    /// Variates were requested from an empty uniform sequence.
    #[error("Cannot draw variates from an empty uniform sequence")]
    NoUniforms,

    /// Metrics were requested for a schedule with no customers.
    #[error("Cannot aggregate metrics over an empty schedule")]
    EmptySchedule,
}

/// Something went wrong while rendering a report.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportError {
    /// Writing the report failed.
    #[error("Unable to write report")]
    Io(#[from] std::io::Error),

    /// The report needed simulation output that could not be produced.
    #[error("Simulation failed")]
    Simulation(#[from] SimulationError),
}

/// Result type for simulation operations.
pub type SimulationResult<T> = std::result::Result<T, SimulationError>;
