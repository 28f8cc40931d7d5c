//! The full pipeline: generate, check, sample, simulate, aggregate.

use tracing::{debug, info, span, warn, Level};

use crate::config::SimulationConfig;
use crate::diagnostics::{Independence, IndependenceReport, UniformityReport};
use crate::error::SimulationResult;
use crate::metrics::QueueMetrics;
use crate::queue::Schedule;
use crate::stream::RandomStream;
use crate::variate::ExponentialSampler;

/// Uniform samples feeding one kind of duration, with their diagnostics.
#[derive(Debug, Clone)]
pub struct UniformSeries {
    /// The raw samples, in draw order.
    pub samples: Vec<f64>,
    /// Histogram check.
    pub uniformity: UniformityReport,
    /// Lag-1 correlation check.
    pub independence: IndependenceReport,
}

impl UniformSeries {
    fn new(samples: Vec<f64>) -> Self {
        let uniformity = UniformityReport::from_samples(&samples);
        let independence = IndependenceReport::from_samples(&samples);
        Self {
            samples,
            uniformity,
            independence,
        }
    }
}

/// Everything produced by one run.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    /// The parameters of this run.
    pub config: SimulationConfig,
    /// Uniforms behind the interarrival times.
    pub interarrival_uniforms: UniformSeries,
    /// Uniforms behind the service times.
    pub service_uniforms: UniformSeries,
    /// Exponential interarrival durations, one per customer.
    pub interarrival_times: Vec<f64>,
    /// Exponential service durations, one per customer.
    pub service_times: Vec<f64>,
    /// Per-customer timings.
    pub schedule: Schedule,
    /// Aggregates over the schedule.
    pub metrics: QueueMetrics,
}

/// A validated, runnable simulation.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
}

impl Simulation {
    /// Validate the configuration.
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this simulation runs with.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run every stage in order.
    ///
    /// Uniforms are drawn from one stream, alternating between the interarrival and the service
    /// sequence.
    pub fn run(&self) -> SimulationResult<SimulationRun> {
        let config = self.config;
        let span = span!(Level::INFO, "simulation run", seed = config.seed);
        let _enter = span.enter();

        let mut stream = RandomStream::with_params(config.seed, config.lcg)?;
        let mut interarrival_samples = Vec::with_capacity(config.uniform_count);
        let mut service_samples = Vec::with_capacity(config.uniform_count);
        for _ in 0..config.uniform_count {
            interarrival_samples.push(stream.next_uniform());
            service_samples.push(stream.next_uniform());
        }
        debug!(
            count = config.uniform_count,
            state = stream.state(),
            "Drew uniform samples"
        );

        let interarrival_uniforms = UniformSeries::new(interarrival_samples);
        let service_uniforms = UniformSeries::new(service_samples);
        check_independence("interarrival", &interarrival_uniforms.independence);
        check_independence("service", &service_uniforms.independence);

        let interarrival_times = ExponentialSampler::new(config.arrival_rate)
            .sample_cyclic(&interarrival_uniforms.samples, config.customer_count)?;
        let service_times = ExponentialSampler::new(config.service_rate)
            .sample_cyclic(&service_uniforms.samples, config.customer_count)?;
        debug!(count = config.customer_count, "Sampled exponential variates");

        let schedule = Schedule::simulate(&interarrival_times, &service_times)?;
        let metrics = QueueMetrics::from_schedule(&schedule)?;

        info!(
            customers = metrics.customers,
            utilization = metrics.server_utilization,
            throughput = metrics.system_throughput,
            "Simulation complete"
        );

        Ok(SimulationRun {
            config,
            interarrival_uniforms,
            service_uniforms,
            interarrival_times,
            service_times,
            schedule,
            metrics,
        })
    }
}

fn check_independence(label: &str, report: &IndependenceReport) {
    match report.verdict() {
        Independence::LikelyIndependent => {
            debug!(label, correlation = report.correlation(), "Samples look independent")
        }
        Independence::MightNotBeIndependent => warn!(
            label,
            correlation = report.correlation(),
            "Samples might not be independent"
        ),
        Independence::Undefined => warn!(label, "Lag-1 correlation is undefined"),
    }
}
