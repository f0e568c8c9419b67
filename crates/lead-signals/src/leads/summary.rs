use crate::signals::{EnrichedProfile, IntentLevel};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierCount {
    pub intent: IntentLevel,
    pub intent_label: &'static str,
    pub count: usize,
}

/// Tier distribution and mean score of a batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub tiers: Vec<TierCount>,
    pub average_score: f64,
}

impl BatchSummary {
    pub fn from_profiles(profiles: &[EnrichedProfile]) -> Self {
        let tiers = IntentLevel::ordered()
            .into_iter()
            .map(|intent| TierCount {
                intent,
                intent_label: intent.label(),
                count: profiles
                    .iter()
                    .filter(|profile| profile.report.intent_level == intent)
                    .count(),
            })
            .collect();

        let total_score: u64 = profiles
            .iter()
            .map(|profile| u64::from(profile.report.total_score))
            .sum();
        let average_score = if profiles.is_empty() {
            0.0
        } else {
            total_score as f64 / profiles.len() as f64
        };

        Self {
            total: profiles.len(),
            tiers,
            average_score,
        }
    }

    pub fn count(&self, intent: IntentLevel) -> usize {
        self.tiers
            .iter()
            .find(|tier| tier.intent == intent)
            .map_or(0, |tier| tier.count)
    }
}
