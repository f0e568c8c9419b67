use chrono::{DateTime, TimeZone};
use lead_signals::config::AppConfig;
use lead_signals::error::AppError;
use lead_signals::gateway::{BrightDataClient, SerpGateway};
use lead_signals::presets::PresetLoader;
use lead_signals::signals::{EnrichmentEngine, IntentScorer, SignalCatalog};

pub(crate) type LiveGateway = SerpGateway<BrightDataClient>;

/// Scorer for this run: the named preset's catalog, or the built-in default.
pub(crate) fn build_scorer(config: &AppConfig, preset: Option<&str>) -> Result<IntentScorer, AppError> {
    let catalog = match preset {
        Some(name) => {
            let preset = PresetLoader::new(&config.presets_dir).load(name)?;
            eprintln!(
                "Using preset: {name} ({}, {} signals)",
                preset.industry,
                preset.signals.len()
            );
            preset.signals
        }
        None => SignalCatalog::standard(),
    };

    Ok(IntentScorer::new(catalog, config.scoring.thresholds)
        .with_result_count(config.search.result_count))
}

pub(crate) fn live_gateway(config: &AppConfig) -> Result<LiveGateway, AppError> {
    let settings = config.search.brightdata_settings()?;
    let client = BrightDataClient::new(settings)?;
    Ok(SerpGateway::new(client, config.search.locale()))
}

pub(crate) fn live_engine(
    config: &AppConfig,
    preset: Option<&str>,
) -> Result<EnrichmentEngine<LiveGateway>, AppError> {
    let scorer = build_scorer(config, preset)?;
    let gateway = live_gateway(config)?;
    Ok(EnrichmentEngine::new(scorer, gateway))
}

/// Printed after a run so silently lowered scores are not mistaken for real ones.
pub(crate) fn report_gateway_health(gateway: &LiveGateway) {
    let stats = gateway.stats();
    if stats.failures > 0 {
        eprintln!(
            "Warning: {} of {} search queries failed; affected signals were scored as not detected.",
            stats.failures, stats.queries
        );
    }
}

pub(crate) fn timestamped_file_name<Tz: TimeZone>(
    prefix: &str,
    extension: &str,
    now: &DateTime<Tz>,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{prefix}_{}.{extension}", now.format("%Y%m%d_%H%M%S"))
}

pub(crate) fn dated_file_name<Tz: TimeZone>(prefix: &str, extension: &str, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{prefix}_{}.{extension}", now.format("%Y%m%d"))
}
