//! Discrete-event simulation of a single-server first-come-first-served queue.
//!
//! Think of one ATM: customers arrive with exponentially distributed gaps, wait if the machine is
//! busy, and take an exponentially distributed time to be served (an M/M/1 queue).
//!
//! A run flows through these stages, each feeding the next:
//!
//! 1. [`RandomStream`] draws reproducible uniform samples from a linear congruential generator.
//! 2. [`diagnostics`] checks those samples for uniformity and lag-1 independence.
//! 3. [`ExponentialSampler`] turns them into interarrival and service durations by inverse-transform
//!    sampling.
//! 4. [`Schedule::simulate`] computes arrival, service start and departure times.
//! 5. [`QueueMetrics`] aggregates utilization, throughput and Little's Law estimates.
//!
//! [`Simulation`] runs the whole pipeline from a [`SimulationConfig`], and [`report`] renders the
//! result.
//!
//! See the README for an example.

#![deny(missing_docs)]

#[cfg(doctest)]
use doc_comment::doctest;
#[cfg(doctest)]
doctest!("../README.md");

mod config;
pub mod diagnostics;
pub mod error;
mod metrics;
mod queue;
pub mod report;
mod simulation;
mod stream;
mod variate;

pub use config::SimulationConfig;
pub use error::{ConfigError, ReportError, SimulationError};
pub use metrics::QueueMetrics;
pub use queue::{CustomerRecord, Schedule};
pub use simulation::{Simulation, SimulationRun, UniformSeries};
pub use stream::{LcgParams, RandomStream};
pub use variate::{clamp_unit, exponential, ExponentialSampler, UNIT_CEILING};

#[cfg(test)]
mod tests {
    use tracing::Level;
    use tracing_capture::{CaptureLayer, SharedStorage};
    use tracing_subscriber::layer::SubscriberExt;

    use crate::{Simulation, SimulationConfig};

    #[test]
    fn test_tracing() {
        let subscriber = tracing_subscriber::fmt()
            .pretty()
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .finish();
        let storage = SharedStorage::default();
        let subscriber = subscriber.with(CaptureLayer::new(&storage));

        tracing::subscriber::with_default(subscriber, || {
            Simulation::new(SimulationConfig::default())
                .unwrap()
                .run()
                .unwrap();
        });

        let storage = storage.lock();

        let run_spans: Vec<_> = storage
            .all_spans()
            .filter(|span| span.metadata().name() == "simulation run")
            .collect();
        assert_eq!(run_spans.len(), 1, "Should record one span per run");
    }
}
