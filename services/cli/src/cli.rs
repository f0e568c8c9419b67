use crate::enrich::{run_batch, run_enrich, run_monitor, BatchArgs, EnrichArgs, MonitorArgs};
use crate::presets::{run_preset, PresetArgs};
use clap::{Parser, Subcommand};
use lead_signals::config::AppConfig;
use lead_signals::error::AppError;
use lead_signals::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "lead-signals",
    about = "Score companies for buying intent from web search signals",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enrich a single company by domain
    Enrich(EnrichArgs),
    /// Enrich every lead in a CSV file and save the results
    Batch(BatchArgs),
    /// Re-score a lead list and record alerts for high-intent leads
    Monitor(MonitorArgs),
    /// Inspect industry presets
    Preset(PresetArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Enrich(args) => run_enrich(&config, args),
        Command::Batch(args) => run_batch(&config, args),
        Command::Monitor(args) => run_monitor(&config, args),
        Command::Preset(args) => run_preset(&config, args),
    }
}
