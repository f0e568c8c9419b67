use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One search hit as returned by the gateway after filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub description: String,
}

/// A search hit that matched one or more keywords of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub source: String,
    pub url: String,
    pub matched_keywords: Vec<String>,
    pub snippet: String,
}

impl Evidence {
    pub fn first_keyword(&self) -> Option<&str> {
        self.matched_keywords.first().map(String::as_str)
    }
}

/// Outcome of evaluating a single signal group for a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalResult {
    pub group_name: String,
    pub detected: bool,
    pub weight: u32,
    pub evidence: Vec<Evidence>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentLevel {
    High,
    Medium,
    Low,
}

impl IntentLevel {
    pub const fn ordered() -> [Self; 3] {
        [Self::High, Self::Medium, Self::Low]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Lower bounds (inclusive) of the High and Medium tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentThresholds {
    pub high: u32,
    pub medium: u32,
}

impl Default for IntentThresholds {
    fn default() -> Self {
        Self {
            high: 60,
            medium: 30,
        }
    }
}

impl IntentThresholds {
    /// High is checked first, so with `medium > high` the Medium tier is unreachable.
    pub fn classify(&self, score: u32) -> IntentLevel {
        if score >= self.high {
            IntentLevel::High
        } else if score >= self.medium {
            IntentLevel::Medium
        } else {
            IntentLevel::Low
        }
    }
}

/// Result of a scoring run for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoringReport {
    pub subject_name: String,
    pub subject_domain: String,
    pub total_score: u32,
    pub intent_level: IntentLevel,
    /// Keyed by group name in declared order.
    #[serde(serialize_with = "serialize_signal_map")]
    pub signals: Vec<SignalResult>,
    pub recommendation: String,
}

impl ScoringReport {
    pub fn signal(&self, group_name: &str) -> Option<&SignalResult> {
        self.signals
            .iter()
            .find(|signal| signal.group_name == group_name)
    }

    pub fn detected(&self) -> impl Iterator<Item = &SignalResult> {
        self.signals.iter().filter(|signal| signal.detected)
    }

    pub fn detected_count(&self) -> usize {
        self.detected().count()
    }
}

fn serialize_signal_map<S: Serializer>(
    signals: &[SignalResult],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(signals.len()))?;
    for signal in signals {
        map.serialize_entry(&signal.group_name, signal)?;
    }
    map.end()
}

/// Scoring report plus outreach material and the caller's own lead fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedProfile {
    pub enriched_at: DateTime<Utc>,
    pub report: ScoringReport,
    pub conversation_starters: Vec<String>,
    pub standard_data: serde_json::Map<String, serde_json::Value>,
}

impl EnrichedProfile {
    pub fn domain(&self) -> &str {
        &self.report.subject_domain
    }

    pub fn company_name(&self) -> &str {
        &self.report.subject_name
    }
}
