//! Rendering simulation results as CSV and as a console summary.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::diagnostics::{UniformityReport, BIN_COUNT};
use crate::error::ReportError;
use crate::simulation::{SimulationRun, UniformSeries};

/// CSV column headings, in order.
pub const CSV_HEADER: [&str; 7] = [
    "Customer",
    "Arrival Time",
    "Start Service",
    "End Service",
    "Wait Time",
    "Service Time",
    "Time in System",
];

/// Writes a run as a delimited table followed by metrics and insights sections.
pub struct CsvReport<'a> {
    run: &'a SimulationRun,
}

impl<'a> CsvReport<'a> {
    /// Create a report for a completed run.
    pub fn new(run: &'a SimulationRun) -> Self {
        Self { run }
    }

    /// Write the report to `path`, creating parent directories as needed.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;

        info!(path = %path.display(), "Wrote CSV report");
        Ok(())
    }

    /// Write the report to any writer.
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<(), ReportError> {
        let metrics = &self.run.metrics;

        writeln!(out, "{}", CSV_HEADER.join(","))?;
        for (idx, customer) in self.run.schedule.customers().iter().enumerate() {
            writeln!(
                out,
                "{},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4}",
                idx + 1,
                customer.arrival,
                customer.start_service,
                customer.end_service,
                customer.wait(),
                customer.service,
                customer.time_in_system()
            )?;
        }

        writeln!(out)?;
        writeln!(out, "Metrics,,,")?;
        writeln!(out, "Mean Arrival Rate (λ),{:.4}", metrics.mean_arrival_rate)?;
        writeln!(out, "Mean Service Rate (μ),{:.4}", metrics.mean_service_rate)?;
        writeln!(out, "Server Utilization (U),{:.4}", metrics.server_utilization)?;
        writeln!(
            out,
            "Mean Number in System (N),{:.4}",
            metrics.mean_number_in_system
        )?;
        writeln!(out, "System Throughput (X),{:.4}", metrics.system_throughput)?;

        writeln!(out)?;
        writeln!(out, "Summary of Insights,,,")?;
        writeln!(
            out,
            "The simulation shows how an M/M/1 queue behaves under load."
        )?;
        writeln!(
            out,
            "The system had {} customers arrive and complete service.",
            metrics.customers
        )?;
        writeln!(
            out,
            "Average arrival rate (λ) was {:.4} and service rate (μ) was {:.4}.",
            metrics.mean_arrival_rate, metrics.mean_service_rate
        )?;
        writeln!(
            out,
            "The server was busy {:.2}% of the time.",
            metrics.server_utilization * 100.0
        )?;
        writeln!(
            out,
            "On average, {:.4} customers were in the system.",
            metrics.mean_number_in_system
        )?;
        writeln!(
            out,
            "Average time a customer spent in the system was {:.4} units.",
            metrics.mean_time_in_system()
        )?;
        writeln!(
            out,
            "The system throughput is a good approximation of the arrival rate since all customers were served."
        )?;

        Ok(())
    }
}

/// Prints a run's configuration, diagnostics and metrics to stdout.
pub struct SimulationReporter<'a> {
    run: &'a SimulationRun,
}

impl<'a> SimulationReporter<'a> {
    /// Create a reporter for a completed run.
    pub fn new(run: &'a SimulationRun) -> Self {
        Self { run }
    }

    /// Print everything.
    pub fn print_summary(&self) {
        self.print_config();
        self.print_diagnostics("Interarrival", &self.run.interarrival_uniforms);
        self.print_diagnostics("Service", &self.run.service_uniforms);
        self.print_metrics();
    }

    fn print_config(&self) {
        let config = &self.run.config;

        println!("\n=== Simulation Configuration ===");
        println!("Seed:               {}", config.seed);
        println!(
            "LCG:                A = {}, C = {}, M = {}",
            config.lcg.multiplier, config.lcg.increment, config.lcg.modulus
        );
        println!("Arrival Rate:       {:.4}", config.arrival_rate);
        println!("Service Rate:       {:.4}", config.service_rate);
        println!("Traffic Intensity:  {:.4}", config.traffic_intensity());
        println!("Uniform Samples:    {}", config.uniform_count);
        println!("Customers:          {}", config.customer_count);
    }

    fn print_diagnostics(&self, label: &str, series: &UniformSeries) {
        println!("\nUniformity Test for {} Random Numbers:", label);
        for (idx, count) in series.uniformity.bins().iter().enumerate() {
            let (lo, hi) = UniformityReport::bin_bounds(idx);
            println!("Bin {} ({:.1}-{:.1}): {}", idx + 1, lo, hi, count);
        }
        if let Some(chi_square) = series.uniformity.chi_square() {
            println!(
                "Chi-square ({} degrees of freedom): {:.4}",
                BIN_COUNT - 1,
                chi_square
            );
        }

        println!("\nIndependence Test for {} Random Numbers:", label);
        println!(
            "Pearson Correlation Coefficient (Ui vs Ui+1): {:.4}",
            series.independence.correlation()
        );
        println!("{}", series.independence.verdict());
    }

    fn print_metrics(&self) {
        let metrics = &self.run.metrics;

        println!("\n=== Simulation Results ===");
        println!("Customers served:       {}", metrics.customers);
        println!("Simulated duration:     {:.4}", metrics.makespan);
        println!("Mean Arrival Rate (λ):  {:.4}", metrics.mean_arrival_rate);
        println!("Mean Service Rate (μ):  {:.4}", metrics.mean_service_rate);
        println!("Server Utilization (U): {:.4}", metrics.server_utilization);
        println!("Mean Number in System:  {:.4}", metrics.mean_number_in_system);
        println!("System Throughput (X):  {:.4}", metrics.system_throughput);
        println!("Mean Wait:              {:.4}", metrics.mean_wait());
        println!("Mean Time in System:    {:.4}", metrics.mean_time_in_system());
    }
}
