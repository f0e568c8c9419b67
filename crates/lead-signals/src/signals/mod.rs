//! Buying-signal detection and intent scoring.
//!
//! Search results are matched against weighted keyword groups; detected group
//! weights add up to a score that is classified into an intent tier and turned
//! into a recommendation and conversation starters.

mod catalog;
mod domain;
mod enrichment;
mod evaluator;
mod matcher;
mod scoring;
mod starters;
mod template;

pub use catalog::{
    CatalogError, SignalCatalog, SignalGroupConfig, StarterStyle, EXPECTED_WEIGHT_SUM,
    MAX_GROUP_WEIGHT,
};
pub use domain::{
    EnrichedProfile, Evidence, IntentLevel, IntentThresholds, ScoringReport, SearchResult,
    SignalResult,
};
pub use enrichment::EnrichmentEngine;
pub use evaluator::evaluate_group;
pub use matcher::{match_keywords, snippet, SNIPPET_CHARS};
pub use scoring::{derive_company_name, group_label, IntentScorer, DEFAULT_RESULT_COUNT};
pub use starters::{conversation_starters, MAX_STARTERS};
pub use template::{Placeholder, QueryTemplate, TemplateError, TemplateToken};
