use super::catalog::SignalCatalog;
use super::domain::{IntentLevel, IntentThresholds, ScoringReport, SignalResult};
use super::evaluator::evaluate_group;
use crate::gateway::SearchGateway;
use tracing::{debug, info, warn};

/// Results requested from the gateway per query unless overridden.
pub const DEFAULT_RESULT_COUNT: usize = 3;

/// Domain suffixes stripped when deriving a company name, in precedence order.
const STRIPPED_SUFFIXES: [&str; 3] = [".com", ".io", ".net"];

/// Stateless scorer that applies a signal catalog to one subject at a time.
#[derive(Debug, Clone)]
pub struct IntentScorer {
    catalog: SignalCatalog,
    thresholds: IntentThresholds,
    result_count: usize,
}

impl IntentScorer {
    pub fn new(catalog: SignalCatalog, thresholds: IntentThresholds) -> Self {
        if let Some(message) = catalog.weight_warning() {
            warn!(weight_sum = catalog.weight_sum(), "{message}");
        }

        Self {
            catalog,
            thresholds,
            result_count: DEFAULT_RESULT_COUNT,
        }
    }

    pub fn with_result_count(mut self, result_count: usize) -> Self {
        self.result_count = result_count;
        self
    }

    pub fn catalog(&self) -> &SignalCatalog {
        &self.catalog
    }

    pub fn thresholds(&self) -> IntentThresholds {
        self.thresholds
    }

    /// Evaluates every enabled group in declared order and sums the weights of
    /// the detected ones. The total is not clamped.
    pub fn score<G>(&self, domain: &str, company_name: Option<&str>, gateway: &G) -> ScoringReport
    where
        G: SearchGateway + ?Sized,
    {
        let subject_name = match company_name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => derive_company_name(domain),
        };

        info!(company = %subject_name, domain, "tracking buying signals");

        let mut total_score = 0u32;
        let mut signals = Vec::new();
        for group in self.catalog.enabled() {
            let result = evaluate_group(group, &subject_name, domain, gateway, self.result_count);
            if result.detected {
                total_score = total_score.saturating_add(result.weight);
                debug!(
                    group = %group.name,
                    weight = result.weight,
                    evidence = result.evidence.len(),
                    "signal detected"
                );
            }
            signals.push(result);
        }

        let intent_level = self.thresholds.classify(total_score);
        let recommendation = recommendation(intent_level, &signals);

        info!(
            company = %subject_name,
            total_score,
            intent = intent_level.label(),
            "signal scoring complete"
        );

        ScoringReport {
            subject_name,
            subject_domain: domain.to_string(),
            total_score,
            intent_level,
            signals,
            recommendation,
        }
    }
}

/// `"bright-data.io"` becomes `"Bright Data"`.
pub fn derive_company_name(domain: &str) -> String {
    let stem = STRIPPED_SUFFIXES
        .iter()
        .find_map(|suffix| domain.strip_suffix(suffix))
        .unwrap_or(domain);

    title_case(&stem.replace(['-', '_'], " "))
}

/// `"pain_point_signals"` becomes `"Pain Point Signals"`.
pub fn group_label(group_name: &str) -> String {
    title_case(&group_name.replace('_', " "))
}

/// Capitalizes every letter that follows a non-letter, lowercasing the rest:
/// `"o'reilly 3m"` becomes `"O'Reilly 3M"`.
fn title_case(value: &str) -> String {
    let mut titled = String::with_capacity(value.len());
    let mut after_letter = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if after_letter {
                titled.extend(ch.to_lowercase());
            } else {
                titled.extend(ch.to_uppercase());
            }
            after_letter = true;
        } else {
            titled.push(ch);
            after_letter = false;
        }
    }
    titled
}

pub(crate) fn recommendation(level: IntentLevel, signals: &[SignalResult]) -> String {
    match level {
        IntentLevel::High => {
            let leads: Vec<String> = signals
                .iter()
                .filter(|signal| signal.detected)
                .take(2)
                .map(|signal| group_label(&signal.group_name))
                .collect();

            if leads.is_empty() {
                "High priority lead! Prioritize immediate outreach.".to_string()
            } else {
                format!(
                    "High priority lead! Prioritize immediate outreach. Lead with: {}. Strong buying signals detected.",
                    leads.join(", ")
                )
            }
        }
        IntentLevel::Medium => {
            let detected = signals.iter().filter(|signal| signal.detected).count();
            format!(
                "Medium intent. {detected} signal(s) detected. Schedule standard outreach with personalized messaging."
            )
        }
        IntentLevel::Low => "Low intent. Add to nurture campaign or revisit in 30-60 days. Consider lightweight touchpoints.".to_string(),
    }
}
