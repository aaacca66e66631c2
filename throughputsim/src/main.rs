use std::io::{BufWriter, Write};
use std::time::Instant;
use clap::Parser;
use serde::Serialize;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use throughputlib::config::{ModelConfig, ParameterConfig};
use throughputlib::io::{write_points, OutputFormat};
use throughputlib::latency::DerivedLatencies;
use throughputlib::model::ThroughputModel;
use throughputlib::validator::violations;

#[cfg(debug_assertions)]
const DEBUG_DEFAULT: bool = true;

#[cfg(not(debug_assertions))]
const DEBUG_DEFAULT: bool = false;

#[derive(Parser, Debug)]
#[command(about = String::from("Estimates packet processing throughput over a range of L1 cache hit ratios"))]
struct Args {
    /// JSON file with the model parameters and sweep range, the reference values are used otherwise
    config: Option<String>,

    /// First L1 hit ratio of the sweep [%]
    #[arg(long)]
    start: Option<f64>,

    /// Last L1 hit ratio of the sweep [%]
    #[arg(long)]
    stop: Option<f64>,

    /// Number of steps per unit of hit ratio
    #[arg(short, long)]
    resolution: Option<u64>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Print the parameters and derived latencies as JSON instead of sweeping
    #[arg(long)]
    dump_parameters: bool,

    #[arg(short, long)]
    performance: bool,

    #[arg(short, long, default_value_t = DEBUG_DEFAULT)]
    debug: bool,
}

impl Args {
    /// Applies the sweep overrides given on the command line
    fn apply_overrides(&self, config: &mut ModelConfig) {
        if let Some(start) = self.start {
            config.sweep.range_start_percent = start;
        }
        if let Some(stop) = self.stop {
            config.sweep.range_stop_percent = stop;
        }
        if let Some(resolution) = self.resolution {
            config.sweep.resolution = resolution;
        }
    }
}

#[derive(Serialize)]
struct ParameterDump<'a> {
    parameters: &'a ParameterConfig,
    derived: &'a DerivedLatencies,
}

/// Logs go to standard error, standard output only ever carries results
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Derives and validates the model once, logging every violated invariant on failure
fn build_model(parameters: &ParameterConfig) -> Result<ThroughputModel, String> {
    let derived = DerivedLatencies::derive(parameters).map_err(|e| {
        error!("{e}");
        format!("Invalid configuration: {e}")
    })?;
    ThroughputModel::from_derived(parameters, derived).map_err(|e| {
        // Report everything that's wrong, not just the first check to fail
        for violation in violations(parameters, &derived) {
            error!("{violation}");
        }
        format!("Invalid configuration: {e}")
    })
}

fn main() -> Result<(), String> {
    let start = Instant::now();
    let args = Args::parse();
    init_logging(args.debug);
    #[cfg(debug_assertions)]
    debug!("Running the debug binary, debug mode is enabled by default. If benchmarking, do not use this binary, re-compile with the --release argument when using cargo run");

    let mut config = match &args.config {
        Some(path) => ModelConfig::from_path(path).map_err(|e| format!("Couldn't load the config file at path {path}: {e}"))?,
        None => ModelConfig::default(),
    };
    args.apply_overrides(&mut config);
    debug!("Parsed input configuration: {config:?}");

    let model = build_model(&config.parameters)?;

    let stdout = std::io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    if args.dump_parameters {
        let dump = ParameterDump { parameters: model.parameters(), derived: model.derived() };
        serde_json::to_writer_pretty(&mut writer, &dump).map_err(|e| format!("Couldn't serialise the parameters {e}"))?;
        writeln!(writer).map_err(|e| format!("Couldn't write the output: {e}"))?;
        return writer.flush().map_err(|e| format!("Couldn't write the output: {e}"));
    }

    let sweep = model.sweep(&config.sweep).map_err(|e| format!("Invalid configuration: {e}"))?;
    let sweep_start = Instant::now();
    let count = write_points(&mut writer, sweep, args.format)?;
    writer.flush().map_err(|e| format!("Couldn't write the output: {e}"))?;
    let end = Instant::now();
    debug!(count, "Sweep complete");

    if args.performance {
        let sweep_time = end - sweep_start;
        let total_time = end - start;
        info!("Sweep time (includes output): {}s", sweep_time.as_nanos() as f64 / 1e9);
        info!("Total execution time (includes initial parsing, configuration, and output): {}s", total_time.as_nanos() as f64 / 1e9);
    }
    Ok(())
}
