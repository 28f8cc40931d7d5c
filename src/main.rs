use std::path::PathBuf;

use anyhow::{Context, Result};
use atm_queue_sim::report::{CsvReport, SimulationReporter};
use atm_queue_sim::{Simulation, SimulationConfig};
use clap::Parser;
use tracing::Level;

/// Simulate a single-server FCFS queue (e.g. one ATM) and report its performance
#[derive(Parser, Debug)]
#[command(name = "atm-queue-sim")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with simulation parameters; flags below override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initial generator state
    #[arg(long)]
    seed: Option<i32>,

    /// Mean customer arrivals per unit time
    #[arg(long)]
    arrival_rate: Option<f64>,

    /// Mean service completions per unit time
    #[arg(long)]
    service_rate: Option<f64>,

    /// Length of each uniform sequence
    #[arg(long)]
    uniforms: Option<usize>,

    /// Number of simulated customers
    #[arg(long)]
    customers: Option<usize>,

    /// Where to write the CSV report
    #[arg(short, long, default_value = "ATMQueue.csv")]
    output: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn simulation_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(rate) = self.arrival_rate {
            config.arrival_rate = rate;
        }
        if let Some(rate) = self.service_rate {
            config.service_rate = rate;
        }
        if let Some(count) = self.uniforms {
            config.uniform_count = count;
        }
        if let Some(count) = self.customers {
            config.customer_count = count;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let config = args.simulation_config()?;
    let run = Simulation::new(config)?.run()?;

    SimulationReporter::new(&run).print_summary();
    CsvReport::new(&run)
        .write_file(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!(
        "\nSimulation complete. Results saved to {}",
        args.output.display()
    );

    Ok(())
}
