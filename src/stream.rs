//! Deterministic uniform random stream (linear congruential generator).

use serde::Deserialize;

use crate::error::ConfigError;

/// Default LCG multiplier.
pub const DEFAULT_MULTIPLIER: i64 = 1_103_515_245;
/// Default LCG increment.
pub const DEFAULT_INCREMENT: i64 = 12_345;
/// Default LCG modulus, 2^31.
pub const DEFAULT_MODULUS: i64 = 1 << 31;

/// Parameters of the recurrence `state = (multiplier * state + increment) mod modulus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LcgParams {
    /// Multiplier (A).
    pub multiplier: i64,
    /// Increment (C).
    pub increment: i64,
    /// Modulus (M). Must be positive.
    pub modulus: i64,
}

impl Default for LcgParams {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_MULTIPLIER,
            increment: DEFAULT_INCREMENT,
            modulus: DEFAULT_MODULUS,
        }
    }
}

impl LcgParams {
    /// Check that the parameters define a usable generator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.modulus <= 0 {
            return Err(ConfigError::InvalidModulus(self.modulus));
        }
        Ok(())
    }
}

/// A seeded stream of uniform samples in `[0, 1)`.
///
/// The state is a wrapping signed 32-bit integer. Each draw computes the next state with 64-bit
/// intermediate arithmetic and a truncating remainder, truncates it back to 32 bits, then masks the
/// low 31 bits and divides by the modulus. Two streams with the same seed and parameters produce
/// bit-identical sequences.
///
/// Draws mutate the state, so a stream is owned by exactly one consumer. Independent runs need
/// independently seeded streams.
#[derive(Debug, Clone)]
pub struct RandomStream {
    state: i32,
    params: LcgParams,
}

impl RandomStream {
    /// Create a stream with the default parameters.
    pub fn new(seed: i32) -> Self {
        Self {
            state: seed,
            params: LcgParams::default(),
        }
    }

    /// Create a stream with custom parameters.
    pub fn with_params(seed: i32, params: LcgParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            state: seed,
            params,
        })
    }

    /// The current generator state.
    pub fn state(&self) -> i32 {
        self.state
    }

    /// The generator parameters.
    pub fn params(&self) -> &LcgParams {
        &self.params
    }

    /// Advance the state and return the next uniform sample.
    pub fn next_uniform(&mut self) -> f64 {
        let LcgParams {
            multiplier,
            increment,
            modulus,
        } = self.params;

        let next = multiplier
            .wrapping_mul(i64::from(self.state))
            .wrapping_add(increment)
            % modulus;
        // Truncation to 32 bits is part of the sequence definition.
        self.state = next as i32;

        f64::from(self.state & 0x7FFF_FFFF) / modulus as f64
    }

    /// Draw `count` samples in order.
    pub fn uniforms(&mut self, count: usize) -> Vec<f64> {
        self.by_ref().take(count).collect()
    }
}

impl Iterator for RandomStream {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_uniform())
    }
}
