//! # Tank Control Unit
//!
//! Fixed-period scan loop for the tank process, serving its tags from the
//! in-process tag server. Configuration comes from an optional TOML file;
//! command-line flags override the scan period and bound the run.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tank_common::tags::TagAddress;
use tank_control_unit::config::{ControlUnitConfig, load_config_or_default};
use tank_control_unit::cycle::CycleRunner;
use tank_control_unit::transport::InMemoryTagServer;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Tank Control Unit: cyclic alarm supervision and process sequence
#[derive(Parser, Debug)]
#[command(name = "tank_control_unit")]
#[command(version)]
#[command(about = "Scan engine for the heated process tank")]
struct Args {
    /// Path to the control unit configuration TOML. Falls back to
    /// config/control_unit.toml, then to built-in defaults.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the scan period [ms].
    #[arg(long, value_name = "MS")]
    cycle_time_ms: Option<u64>,

    /// Stop after this many cycles.
    #[arg(long, value_name = "N")]
    cycles: Option<u64>,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    let config = load_config_or_default(args.config.as_deref());

    let level = match &config {
        Ok(config) if !args.verbose => config.shared.log_level.as_str(),
        _ if args.verbose => "debug",
        _ => "info",
    };
    setup_tracing(level, args.json);

    info!("Tank Control Unit v{} starting...", env!("CARGO_PKG_VERSION"));

    let result = config
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
        .and_then(|config| run(&args, config));
    if let Err(e) = result {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("Tank Control Unit shutdown complete");
}

fn run(args: &Args, mut config: ControlUnitConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(cycle_time_ms) = args.cycle_time_ms {
        config.cycle_time_ms = cycle_time_ms;
    }
    config.validate()?;

    info!(
        service = %config.shared.service_name,
        cycle_time_ms = config.cycle_time_ms,
        setpoint = config.process.setpoint,
        max_temperature = config.process.max_temperature,
        min_temperature = config.process.min_temperature,
        "Config OK"
    );

    let server = InMemoryTagServer::new();
    for tag in TagAddress::all() {
        debug!(%tag, kind = %tag.kind(), "tag registered");
    }

    // Setup signal handler for graceful shutdown.
    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::Release);
    })?;

    let mut runner = CycleRunner::new(&config, server)?
        .with_running_flag(running)
        .with_cycle_limit(args.cycles);

    if let Err(e) = runner.run() {
        error!("Scan loop error: {e}");
        return Err(e.into());
    }

    Ok(())
}

/// Setup tracing subscriber. `RUST_LOG` directives take precedence.
fn setup_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
