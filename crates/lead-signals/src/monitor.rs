use crate::signals::{EnrichedProfile, IntentLevel};
use serde::Serialize;

/// A lead whose score reached the alert threshold during a monitoring run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitorAlert {
    pub domain: String,
    pub company_name: String,
    pub score: u32,
    pub intent: IntentLevel,
    pub recommendation: String,
}

impl From<&EnrichedProfile> for MonitorAlert {
    fn from(profile: &EnrichedProfile) -> Self {
        Self {
            domain: profile.domain().to_string(),
            company_name: profile.company_name().to_string(),
            score: profile.report.total_score,
            intent: profile.report.intent_level,
            recommendation: profile.report.recommendation.clone(),
        }
    }
}

/// Profiles scoring at or above `threshold`, in input order.
pub fn collect_alerts(profiles: &[EnrichedProfile], threshold: u32) -> Vec<MonitorAlert> {
    profiles
        .iter()
        .filter(|profile| profile.report.total_score >= threshold)
        .map(MonitorAlert::from)
        .collect()
}
