use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use ram_monitor::{init_tracing, MemoryMonitor, MonitorConfig};

/// Exit status of `check` when available memory is below the threshold
const EXIT_LOW_MEMORY: u8 = 1;
/// Exit status for any failure (unreadable memory stats, bad threshold, bad config).
/// Matches the status clap uses for usage errors.
const EXIT_FAILURE: u8 = 2;

#[derive(Parser)]
#[command(name = "ram-monitor")]
#[command(about = "Check available memory against a fraction of total memory")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Threshold as a fraction of total memory (default: from .ram-monitor.toml or 0.2)
    #[arg(short, long, env = "RAM_MONITOR_THRESHOLD", global = true)]
    threshold: Option<f64>,

    /// Config file to load instead of searching for .ram-monitor.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Take one reading. Exits 0 when memory is fine, 1 when available memory
    /// is below the threshold, 2 when memory or config could not be read.
    Check,
    /// Print total and available memory along with the threshold
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing("ram_monitor", cli.verbose) {
        eprintln!("Failed to initialize logging: {:#}", e);
        return ExitCode::from(EXIT_FAILURE);
    }

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let config = match &cli.config {
        Some(path) => MonitorConfig::load_from_path(path)?,
        None => MonitorConfig::load()?,
    };
    let monitor = MemoryMonitor::new(config.resolve_threshold(cli.threshold))?;
    tracing::debug!("Using {}", monitor);

    match cli.command {
        Commands::Check => {
            let status = monitor.status()?;
            let verdict = if status.below_threshold { "LOW" } else { "OK" };
            println!(
                "{}: {:.2} MB available ({:.2}% of total, threshold {:.2}%)",
                verdict,
                status.available_mb,
                status.available_fraction * 100.0,
                status.threshold * 100.0
            );
            Ok(check_exit_code(status.below_threshold))
        }
        Commands::Status { json } => {
            let status = monitor.status()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("{}", status);
                println!("Remaining RAM: {:.2} MB", status.remaining_mb);
            }
            Ok(0)
        }
    }
}

fn check_exit_code(below_threshold: bool) -> u8 {
    if below_threshold {
        EXIT_LOW_MEMORY
    } else {
        0
    }
}
