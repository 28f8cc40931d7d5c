//! Single-server first-come-first-served queue.

use tracing::debug;

use crate::error::{SimulationError, SimulationResult};

/// Timings of one customer through the queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomerRecord {
    /// When the customer arrived.
    pub arrival: f64,
    /// How long the customer was served for.
    pub service: f64,
    /// When service began.
    pub start_service: f64,
    /// When service ended and the customer left.
    pub end_service: f64,
}

impl CustomerRecord {
    /// Time spent queueing before service.
    pub fn wait(&self) -> f64 {
        self.start_service - self.arrival
    }

    /// Time from arrival to departure.
    pub fn time_in_system(&self) -> f64 {
        self.end_service - self.arrival
    }
}

/// Customer records in arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    customers: Vec<CustomerRecord>,
}

impl Schedule {
    /// Simulate the queue over paired interarrival and service durations.
    ///
    /// Arrivals are the running sum of interarrival durations. Each customer starts service at
    /// the later of their arrival and the previous departure.
    pub fn simulate(interarrival: &[f64], service: &[f64]) -> SimulationResult<Self> {
        if interarrival.len() != service.len() {
            return Err(SimulationError::LengthMismatch {
                interarrival: interarrival.len(),
                service: service.len(),
            });
        }
        check_durations(interarrival)?;
        check_durations(service)?;

        let mut customers = Vec::with_capacity(interarrival.len());
        let mut arrival = 0.0;
        let mut last_departure = 0.0_f64;

        for (&gap, &service) in interarrival.iter().zip(service) {
            arrival += gap;
            let start_service = last_departure.max(arrival);
            let end_service = start_service + service;
            last_departure = end_service;

            customers.push(CustomerRecord {
                arrival,
                service,
                start_service,
                end_service,
            });
        }

        debug!(
            customers = customers.len(),
            last_departure, "Simulated single-server queue"
        );

        Ok(Self { customers })
    }

    /// All customers, in arrival order.
    pub fn customers(&self) -> &[CustomerRecord] {
        &self.customers
    }

    /// Number of customers served.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Whether no customers were served.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// The last customer to arrive (and to leave).
    pub fn last(&self) -> Option<&CustomerRecord> {
        self.customers.last()
    }

    /// Arrival times.
    pub fn arrivals(&self) -> Vec<f64> {
        self.customers.iter().map(|c| c.arrival).collect()
    }

    /// Service start times.
    pub fn start_services(&self) -> Vec<f64> {
        self.customers.iter().map(|c| c.start_service).collect()
    }

    /// Service end times.
    pub fn end_services(&self) -> Vec<f64> {
        self.customers.iter().map(|c| c.end_service).collect()
    }

    /// Wait times.
    pub fn waits(&self) -> Vec<f64> {
        self.customers.iter().map(CustomerRecord::wait).collect()
    }
}

fn check_durations(durations: &[f64]) -> SimulationResult<()> {
    match durations
        .iter()
        .enumerate()
        .find(|(_, d)| !d.is_finite() || **d < 0.0)
    {
        Some((index, &value)) => Err(SimulationError::InvalidDuration { index, value }),
        None => Ok(()),
    }
}
