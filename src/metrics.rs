//! Aggregate performance metrics of a completed schedule.

use tracing::warn;

use crate::error::{SimulationError, SimulationResult};
use crate::queue::Schedule;

/// Summary of a simulated queue.
///
/// Rates are in customers per unit time. A zero denominator (for example a single customer who
/// arrives at time zero) produces an infinite or NaN value rather than an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueMetrics {
    /// Number of customers who arrived and completed service.
    pub customers: usize,
    /// Sum of wait times.
    pub total_wait: f64,
    /// Sum of service times, which is also the time the server was busy.
    pub total_service: f64,
    /// Sum of times in system.
    pub total_time_in_system: f64,
    /// Time of the last departure.
    pub makespan: f64,
    /// `n / last arrival time` (λ).
    pub mean_arrival_rate: f64,
    /// `n / total service time` (μ).
    pub mean_service_rate: f64,
    /// Fraction of the makespan the server was busy (U).
    pub server_utilization: f64,
    /// Mean number of customers in the system, by Little's Law (N).
    pub mean_number_in_system: f64,
    /// `n / makespan` (X).
    pub system_throughput: f64,
}

impl QueueMetrics {
    /// Aggregate over every customer in the schedule.
    pub fn from_schedule(schedule: &Schedule) -> SimulationResult<Self> {
        let last = schedule.last().ok_or(SimulationError::EmptySchedule)?;
        let customers = schedule.len();
        let n = customers as f64;

        let (total_wait, total_service, total_time_in_system) = schedule.customers().iter().fold(
            (0.0, 0.0, 0.0),
            |(wait, service, system), c| {
                (wait + c.wait(), service + c.service, system + c.time_in_system())
            },
        );

        let makespan = last.end_service;
        let mean_arrival_rate = n / last.arrival;

        let metrics = Self {
            customers,
            total_wait,
            total_service,
            total_time_in_system,
            makespan,
            mean_arrival_rate,
            mean_service_rate: n / total_service,
            server_utilization: total_service / makespan,
            mean_number_in_system: mean_arrival_rate * (total_time_in_system / n),
            system_throughput: n / makespan,
        };

        if !metrics.all_finite() {
            warn!(?metrics, "Queue metrics contain non-finite values");
        }

        Ok(metrics)
    }

    /// Mean time spent queueing.
    pub fn mean_wait(&self) -> f64 {
        self.total_wait / self.customers as f64
    }

    /// Mean time from arrival to departure (W).
    pub fn mean_time_in_system(&self) -> f64 {
        self.total_time_in_system / self.customers as f64
    }

    /// Whether every rate is a finite number.
    pub fn all_finite(&self) -> bool {
        [
            self.mean_arrival_rate,
            self.mean_service_rate,
            self.server_utilization,
            self.mean_number_in_system,
            self.system_throughput,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}
