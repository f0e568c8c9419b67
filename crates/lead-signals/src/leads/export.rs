use crate::signals::{group_label, EnrichedProfile};
use chrono::SecondsFormat;
use serde::Serialize;
use std::io::Write;

pub const BATCH_CSV_HEADERS: [&str; 6] = [
    "Company",
    "Domain",
    "Score",
    "Intent",
    "Recommendation",
    "Enrichment Date",
];

const DETECTED_MARK: &str = "✓";
const MISSING_MARK: &str = "✗";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to serialize JSON export: {0}")]
    Json(#[from] serde_json::Error),
}

/// One row per profile, in input order.
pub fn write_batch_csv<W: Write>(writer: W, profiles: &[EnrichedProfile]) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(BATCH_CSV_HEADERS)?;

    for profile in profiles {
        let report = &profile.report;
        let score = report.total_score.to_string();
        let enriched_at = profile
            .enriched_at
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        csv_writer.write_record([
            report.subject_name.as_str(),
            report.subject_domain.as_str(),
            score.as_str(),
            report.intent_level.label(),
            report.recommendation.as_str(),
            enriched_at.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Header plus a single row with one detected/missing column per signal group.
pub fn write_profile_csv<W: Write>(writer: W, profile: &EnrichedProfile) -> Result<(), ExportError> {
    let report = &profile.report;
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec![
        "Company".to_string(),
        "Domain".to_string(),
        "Score".to_string(),
        "Intent".to_string(),
    ];
    header.extend(report.signals.iter().map(|signal| group_label(&signal.group_name)));
    header.push("Recommendation".to_string());
    csv_writer.write_record(&header)?;

    let mut row = vec![
        report.subject_name.clone(),
        report.subject_domain.clone(),
        report.total_score.to_string(),
        report.intent_level.label().to_string(),
    ];
    row.extend(report.signals.iter().map(|signal| {
        if signal.detected {
            DETECTED_MARK.to_string()
        } else {
            MISSING_MARK.to_string()
        }
    }));
    row.push(report.recommendation.clone());
    csv_writer.write_record(&row)?;

    csv_writer.flush()?;
    Ok(())
}

/// Pretty-printed JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
