use chrono::SecondsFormat;
use lead_signals::leads::BatchSummary;
use lead_signals::monitor::MonitorAlert;
use lead_signals::presets::{Preset, PresetComparison, PresetInfo};
use lead_signals::signals::{group_label, EnrichedProfile};
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

fn rule(ch: char) -> String {
    ch.to_string().repeat(RULE_WIDTH)
}

pub(crate) fn profile_text(profile: &EnrichedProfile) -> String {
    let report = &profile.report;
    let mut out = String::new();

    let _ = writeln!(out, "{}", rule('='));
    let _ = writeln!(out, "ENRICHMENT RESULTS");
    let _ = writeln!(out, "{}", rule('='));
    let _ = writeln!(out, "Company: {}", report.subject_name);
    let _ = writeln!(out, "Domain: {}", report.subject_domain);
    let _ = writeln!(
        out,
        "Date: {}",
        profile.enriched_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    );

    let _ = writeln!(out, "\nSignal Score: {}/100", report.total_score);
    let _ = writeln!(out, "Intent Level: {}", report.intent_level.label());

    let _ = writeln!(out, "\nDetected Signals:");
    for signal in &report.signals {
        let status = if signal.detected { "✓" } else { "✗" };
        let _ = writeln!(
            out,
            "  {status} {} (Weight: {})",
            group_label(&signal.group_name),
            signal.weight
        );
        if signal.detected && !signal.evidence.is_empty() {
            let _ = writeln!(out, "      Evidence: {} sources", signal.evidence.len());
        }
    }

    let _ = writeln!(out, "\nRecommendation:");
    let _ = writeln!(out, "  {}", report.recommendation);

    let _ = writeln!(out, "\nConversation Starters:");
    for (idx, starter) in profile.conversation_starters.iter().enumerate() {
        let _ = writeln!(out, "  {}. {starter}", idx + 1);
    }

    out
}

pub(crate) fn batch_summary_text(summary: &BatchSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", rule('='));
    let _ = writeln!(out, "BATCH SUMMARY");
    let _ = writeln!(out, "{}", rule('='));
    let _ = writeln!(out, "Total Leads: {}", summary.total);
    for tier in &summary.tiers {
        let _ = writeln!(out, "  {} Intent: {}", tier.intent_label, tier.count);
    }
    let _ = writeln!(out, "\nAverage Score: {:.1}/100", summary.average_score);

    out
}

pub(crate) fn alerts_text(alerts: &[MonitorAlert]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", rule('='));
    if alerts.is_empty() {
        let _ = writeln!(out, "No alerts - all leads below threshold");
        let _ = writeln!(out, "{}", rule('='));
        return out;
    }

    let _ = writeln!(out, "{} HIGH-INTENT ALERTS", alerts.len());
    let _ = writeln!(out, "{}", rule('='));
    for alert in alerts {
        let _ = writeln!(out, "\n{} ({})", alert.company_name, alert.domain);
        let _ = writeln!(
            out,
            "  Score: {}/100 ({} intent)",
            alert.score,
            alert.intent.label()
        );
        let _ = writeln!(out, "  Action: {}", alert.recommendation);
    }

    out
}

pub(crate) fn preset_list_text(infos: &[Result<PresetInfo, String>]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\nAvailable Industry Presets:");
    let _ = writeln!(out, "{}", rule('-'));
    if infos.is_empty() {
        let _ = writeln!(out, "  (none found)");
    }
    for info in infos {
        match info {
            Ok(info) => {
                let _ = writeln!(out, "\n{}", info.name);
                let _ = writeln!(out, "  Industry: {}", info.industry);
                let _ = writeln!(out, "  Signals: {}", info.signal_count);
                if !info.example_companies.is_empty() {
                    let _ = writeln!(out, "  Examples: {}", info.example_companies.join(", "));
                }
            }
            Err(message) => {
                let _ = writeln!(out, "\n{message}");
            }
        }
    }

    out
}

pub(crate) fn preset_detail_text(name: &str, preset: &Preset) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", rule('='));
    let _ = writeln!(out, "PRESET: {} ({name})", preset.industry);
    let _ = writeln!(out, "{}", rule('='));
    let _ = writeln!(out, "\nDescription:\n  {}", preset.description);

    let _ = writeln!(out, "\nSignals ({}):", preset.signals.len());
    for group in preset.signals.groups() {
        let state = if group.enabled { "" } else { " [disabled]" };
        let _ = writeln!(
            out,
            "  - {}: {}% weight{state}",
            group_label(&group.name),
            group.weight
        );
        let _ = writeln!(out, "    Keywords: {}", group.keywords.join(", "));
        let _ = writeln!(out, "    Query: {}", group.query_template);
    }
    if let Some(warning) = preset.signals.weight_warning() {
        let _ = writeln!(out, "\n  Note: {warning}");
    }

    if !preset.example_companies.is_empty() {
        let _ = writeln!(out, "\nExample Companies:");
        for company in &preset.example_companies {
            let _ = writeln!(out, "  - {company}");
        }
    }

    if !preset.typical_use_case.is_empty() {
        let _ = writeln!(out, "\nTypical Use Case:\n  {}", preset.typical_use_case);
    }

    out
}

pub(crate) fn preset_comparison_text(comparison: &PresetComparison) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", rule('='));
    let _ = writeln!(
        out,
        "PRESET COMPARISON: {} vs {}",
        comparison.first.name, comparison.second.name
    );
    let _ = writeln!(out, "{}", rule('='));
    for summary in [&comparison.first, &comparison.second] {
        let _ = writeln!(out, "\n{} ({})", summary.name, summary.industry);
        for signal in &summary.signals {
            let _ = writeln!(out, "  - {}", group_label(signal));
        }
    }

    let shared = comparison.shared_signals();
    if !shared.is_empty() {
        let _ = writeln!(out, "\nShared signals: {}", shared.join(", "));
    }

    out
}
