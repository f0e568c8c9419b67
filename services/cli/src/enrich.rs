use crate::infra::{dated_file_name, live_engine, report_gateway_health, timestamped_file_name};
use crate::render;
use chrono::Local;
use clap::{Args, ValueEnum};
use lead_signals::config::AppConfig;
use lead_signals::error::AppError;
use lead_signals::leads::{
    enrich_leads, write_batch_csv, write_json, write_profile_csv, BatchSummary, LeadImporter,
};
use lead_signals::monitor::collect_alerts;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum BatchFormat {
    #[default]
    Csv,
    Json,
}

impl BatchFormat {
    const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Schedule {
    Daily,
    #[default]
    Weekly,
}

impl Schedule {
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct EnrichArgs {
    /// Company domain to enrich (e.g. stripe.com)
    #[arg(long)]
    pub(crate) domain: String,
    /// Company name; derived from the domain when omitted
    #[arg(long)]
    pub(crate) company: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) output: OutputFormat,
    /// Industry preset to score with
    #[arg(long)]
    pub(crate) preset: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with a `domain` column and optional `company_name`
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Where to save results (defaults to enriched_<timestamp>.<format>)
    #[arg(long)]
    pub(crate) output_file: Option<PathBuf>,
    /// Output file format
    #[arg(long, value_enum, default_value_t = BatchFormat::Csv)]
    pub(crate) format: BatchFormat,
    /// Industry preset to score with
    #[arg(long)]
    pub(crate) preset: Option<String>,
    /// Leads scored concurrently; each worker runs one query at a time
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=16))]
    pub(crate) workers: u16,
}

#[derive(Args, Debug)]
pub(crate) struct MonitorArgs {
    /// CSV file with the leads to monitor
    #[arg(long)]
    pub(crate) leads_file: PathBuf,
    /// Cadence this run belongs to (informational; schedule runs with cron)
    #[arg(long, value_enum, default_value_t = Schedule::Weekly)]
    pub(crate) schedule: Schedule,
    /// Minimum score that raises an alert
    #[arg(long, default_value_t = 60)]
    pub(crate) alert_threshold: u32,
    /// Industry preset to score with
    #[arg(long)]
    pub(crate) preset: Option<String>,
    /// Leads scored concurrently; each worker runs one query at a time
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=16))]
    pub(crate) workers: u16,
}

pub(crate) fn run_enrich(config: &AppConfig, args: EnrichArgs) -> Result<(), AppError> {
    let EnrichArgs {
        domain,
        company,
        output,
        preset,
    } = args;

    let engine = live_engine(config, preset.as_deref())?;
    let profile = engine.enrich(&domain, company.as_deref(), None);

    let mut stdout = io::stdout().lock();
    match output {
        OutputFormat::Json => write_json(&mut stdout, &profile)?,
        OutputFormat::Csv => write_profile_csv(&mut stdout, &profile)?,
        OutputFormat::Text => stdout.write_all(render::profile_text(&profile).as_bytes())?,
    }

    report_gateway_health(engine.gateway());
    Ok(())
}

pub(crate) fn run_batch(config: &AppConfig, args: BatchArgs) -> Result<(), AppError> {
    let BatchArgs {
        input,
        output_file,
        format,
        preset,
        workers,
    } = args;

    let leads = LeadImporter::from_path(&input)?;
    let engine = live_engine(config, preset.as_deref())?;

    println!("\nEnriching {} leads...", leads.len());
    println!("{}", "-".repeat(60));

    let total = leads.len();
    let profiles = enrich_leads(&engine, &leads, usize::from(workers), |idx, profile| {
        println!(
            "[{}/{total}] {} {}/100 ({})",
            idx + 1,
            profile.domain(),
            profile.report.total_score,
            profile.report.intent_level.label()
        );
    });

    let output_file = output_file.unwrap_or_else(|| {
        PathBuf::from(timestamped_file_name(
            "enriched",
            format.extension(),
            &Local::now(),
        ))
    });

    let writer = BufWriter::new(File::create(&output_file)?);
    match format {
        BatchFormat::Csv => write_batch_csv(writer, &profiles)?,
        BatchFormat::Json => write_json(writer, &profiles)?,
    }

    println!("{}", "-".repeat(60));
    println!("Enrichment complete: {} leads", profiles.len());
    println!("Results saved to: {}", output_file.display());
    info!(path = %output_file.display(), leads = profiles.len(), "batch results written");

    print!("{}", render::batch_summary_text(&BatchSummary::from_profiles(&profiles)));
    report_gateway_health(engine.gateway());
    Ok(())
}

pub(crate) fn run_monitor(config: &AppConfig, args: MonitorArgs) -> Result<(), AppError> {
    let MonitorArgs {
        leads_file,
        schedule,
        alert_threshold,
        preset,
        workers,
    } = args;

    let leads = LeadImporter::from_path(&leads_file)?;
    let engine = live_engine(config, preset.as_deref())?;
    let started = Local::now();

    println!("\n{}", "=".repeat(60));
    println!("MONITORING RUN: {}", started.format("%Y-%m-%d %H:%M:%S"));
    println!("{}", "=".repeat(60));
    println!(
        "Monitoring {} leads (threshold: {alert_threshold})",
        leads.len()
    );
    println!("Schedule: {}", schedule.label());
    println!("{}", "-".repeat(60));

    let profiles = enrich_leads(&engine, &leads, usize::from(workers), |_, profile| {
        let marker = if profile.report.total_score >= alert_threshold {
            "ALERT:"
        } else {
            "      "
        };
        println!(
            "{marker} {} - Score {}/100",
            profile.domain(),
            profile.report.total_score
        );
    });

    let alerts = collect_alerts(&profiles, alert_threshold);
    print!("{}", render::alerts_text(&alerts));

    if !alerts.is_empty() {
        let alert_file = PathBuf::from(dated_file_name("alerts", "json", &started));
        write_json(BufWriter::new(File::create(&alert_file)?), &alerts)?;
        println!("\nAlerts saved to: {}", alert_file.display());
        info!(path = %alert_file.display(), alerts = alerts.len(), "monitor alerts written");
    }

    println!("\nNext {} check scheduled", schedule.label());
    report_gateway_health(engine.gateway());
    Ok(())
}
