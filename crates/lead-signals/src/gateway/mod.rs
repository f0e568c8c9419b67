//! Search backends and the failure-absorbing gateway the scorer consumes.

mod brightdata;

pub use brightdata::{BrightDataClient, BrightDataSettings};

use crate::signals::SearchResult;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Description lengths (in characters) considered meaningful enough to keep.
pub const DESCRIPTION_CHARS: RangeInclusive<usize> = 60..=600;

/// Narrow interface the scoring core depends on. Implementations never fail:
/// transport problems surface as an empty result list.
pub trait SearchGateway: Send + Sync {
    fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult>;
}

impl<T> SearchGateway for &T
where
    T: SearchGateway + ?Sized,
{
    fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        (**self).search(query, max_results)
    }
}

impl<T> SearchGateway for Box<T>
where
    T: SearchGateway + ?Sized,
{
    fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        (**self).search(query, max_results)
    }
}

/// Country (`gl`) and language (`hl`) the search engine should localize to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLocale {
    pub country: String,
    pub language: String,
}

impl Default for SearchLocale {
    fn default() -> Self {
        Self {
            country: "us".to_string(),
            language: "en".to_string(),
        }
    }
}

/// Unfiltered record as delivered by a SERP provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "SerpRecordFields")]
pub struct RawSerpRecord {
    pub title: String,
    pub url: String,
    pub description: String,
}

/// Field spellings seen across providers. `url` and `description` win over
/// `link` and `snippet` when a record carries both.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SerpRecordFields {
    title: Option<String>,
    url: Option<String>,
    link: Option<String>,
    description: Option<String>,
    snippet: Option<String>,
}

impl From<SerpRecordFields> for RawSerpRecord {
    fn from(fields: SerpRecordFields) -> Self {
        fn first_non_empty(preferred: Option<String>, fallback: Option<String>) -> String {
            preferred
                .filter(|value| !value.is_empty())
                .or(fallback)
                .unwrap_or_default()
        }

        Self {
            title: fields.title.unwrap_or_default(),
            url: first_non_empty(fields.url, fields.link),
            description: first_non_empty(fields.description, fields.snippet),
        }
    }
}

/// Decodes each entry on its own; entries that are not records are dropped
/// without discarding the rest of the response.
pub fn decode_records(entries: Vec<serde_json::Value>) -> Vec<RawSerpRecord> {
    let total = entries.len();
    let records: Vec<RawSerpRecord> = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(err) => {
                debug!(error = %err, "skipping undecodable search record");
                None
            }
        })
        .collect();

    if records.len() < total {
        debug!(kept = records.len(), total, "dropped malformed search records");
    }
    records
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("search request failed: {0}")]
    Transport(String),
    #[error("search API error (status {status}): {body}")]
    Status { status: u16, body: String },
    #[error("unreadable search response: {0}")]
    Decode(String),
    #[error("invalid search URL: {0}")]
    InvalidUrl(String),
    #[error("search runtime unavailable: {0}")]
    Runtime(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Raw SERP transport. Errors are reported, not swallowed; [`SerpGateway`]
/// decides what the scorer sees.
pub trait SerpBackend: Send + Sync + Debug {
    fn query(&self, term: &str, locale: &SearchLocale) -> Result<Vec<RawSerpRecord>, GatewayError>;
}

/// Counters that make "no evidence" and "could not check" distinguishable to
/// operators without changing what the scorer sees.
#[derive(Debug, Default)]
pub struct GatewayStats {
    queries: AtomicU64,
    failures: AtomicU64,
    empty: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GatewayStatsSnapshot {
    pub queries: u64,
    pub failures: u64,
    pub empty: u64,
}

impl GatewayStats {
    pub fn snapshot(&self) -> GatewayStatsSnapshot {
        GatewayStatsSnapshot {
            queries: self.queries.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            empty: self.empty.load(Ordering::Relaxed),
        }
    }
}

/// Wraps a [`SerpBackend`]: localizes queries, filters and bounds results, and
/// converts every failure into an empty list.
#[derive(Debug)]
pub struct SerpGateway<B> {
    backend: B,
    locale: SearchLocale,
    stats: GatewayStats,
}

impl<B> SerpGateway<B>
where
    B: SerpBackend,
{
    pub fn new(backend: B, locale: SearchLocale) -> Self {
        Self {
            backend,
            locale,
            stats: GatewayStats::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn stats(&self) -> GatewayStatsSnapshot {
        self.stats.snapshot()
    }
}

impl<B> SearchGateway for SerpGateway<B>
where
    B: SerpBackend,
{
    fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        self.stats.queries.fetch_add(1, Ordering::Relaxed);

        let records = match self.backend.query(query, &self.locale) {
            Ok(records) => records,
            Err(err) => {
                self.stats.failures.fetch_add(1, Ordering::Relaxed);
                warn!(query, error = %err, "search query failed; treating as no results");
                return Vec::new();
            }
        };

        if records.is_empty() {
            self.stats.empty.fetch_add(1, Ordering::Relaxed);
            debug!(query, "search returned no results");
            return Vec::new();
        }

        let results = filter_records(records, max_results);
        debug!(query, count = results.len(), "formatted search results");
        results
    }
}

/// Keeps records with a usable description, up to `max_results`.
pub fn filter_records(records: Vec<RawSerpRecord>, max_results: usize) -> Vec<SearchResult> {
    records
        .into_iter()
        .filter(|record| DESCRIPTION_CHARS.contains(&record.description.chars().count()))
        .take(max_results)
        .map(|record| SearchResult {
            title: record.title,
            url: record.url,
            description: record.description,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct ScriptedBackend {
        responses: Mutex<Vec<Result<Vec<RawSerpRecord>, GatewayError>>>,
        seen: Mutex<Vec<(String, SearchLocale)>>,
    }

    impl SerpBackend for ScriptedBackend {
        fn query(
            &self,
            term: &str,
            locale: &SearchLocale,
        ) -> Result<Vec<RawSerpRecord>, GatewayError> {
            self.seen
                .lock()
                .expect("seen mutex poisoned")
                .push((term.to_string(), locale.clone()));
            self.responses
                .lock()
                .expect("responses mutex poisoned")
                .remove(0)
        }
    }

    fn record(title: &str, description_len: usize) -> RawSerpRecord {
        RawSerpRecord {
            title: title.to_string(),
            url: format!("https://example.com/{title}"),
            description: "d".repeat(description_len),
        }
    }

    #[test]
    fn filters_description_length_and_bounds_count() {
        let records = vec![
            record("too-short", 59),
            record("lower-edge", 60),
            record("too-long", 601),
            record("upper-edge", 600),
            record("extra", 120),
        ];

        let results = filter_records(records, 2);

        let titles: Vec<_> = results.iter().map(|result| result.title.as_str()).collect();
        assert_eq!(titles, ["lower-edge", "upper-edge"]);
    }

    #[test]
    fn failures_become_empty_results_and_are_counted() {
        let backend = ScriptedBackend {
            responses: Mutex::new(vec![
                Err(GatewayError::Transport("timed out".to_string())),
                Ok(Vec::new()),
                Ok(vec![record("ok", 80)]),
            ]),
            ..ScriptedBackend::default()
        };
        let gateway = SerpGateway::new(backend, SearchLocale::default());

        assert!(gateway.search("acme data engineer", 3).is_empty());
        assert!(gateway.search("acme dbt", 3).is_empty());
        assert_eq!(gateway.search("acme snowflake", 3).len(), 1);

        assert_eq!(
            gateway.stats(),
            GatewayStatsSnapshot {
                queries: 3,
                failures: 1,
                empty: 1,
            }
        );
    }

    #[test]
    fn forwards_configured_locale() {
        let backend = ScriptedBackend {
            responses: Mutex::new(vec![Ok(Vec::new())]),
            ..ScriptedBackend::default()
        };
        let locale = SearchLocale {
            country: "de".to_string(),
            language: "de".to_string(),
        };
        let gateway = SerpGateway::new(backend, locale.clone());

        gateway.search("acme", 3);

        let seen = gateway.backend().seen.lock().expect("seen mutex poisoned");
        assert_eq!(seen.as_slice(), [("acme".to_string(), locale)]);
    }

    #[test]
    fn raw_records_accept_organic_field_names() {
        let record: RawSerpRecord = serde_json::from_str(
            r#"{"title": "Acme", "link": "https://acme.com", "snippet": "About Acme"}"#,
        )
        .expect("record parses");

        assert_eq!(record.url, "https://acme.com");
        assert_eq!(record.description, "About Acme");
    }

    #[test]
    fn raw_records_with_both_spellings_prefer_url_and_description() {
        let record: RawSerpRecord = serde_json::from_str(
            r#"{
                "title": "Acme",
                "url": "https://acme.com/careers",
                "link": "https://acme.com",
                "description": "Acme is hiring a Data Engineer for its analytics team.",
                "snippet": "Acme is hiring..."
            }"#,
        )
        .expect("record with duplicate spellings parses");

        assert_eq!(record.url, "https://acme.com/careers");
        assert_eq!(
            record.description,
            "Acme is hiring a Data Engineer for its analytics team."
        );
    }

    #[test]
    fn empty_description_falls_back_to_snippet() {
        let record: RawSerpRecord = serde_json::from_str(
            r#"{"title": "Acme", "description": "", "snippet": "About Acme", "url": null}"#,
        )
        .expect("record parses");

        assert_eq!(record.description, "About Acme");
        assert_eq!(record.url, "");
    }

    #[test]
    fn malformed_entries_do_not_discard_the_response() {
        let entries = vec![
            serde_json::json!({"title": "Acme", "url": "https://acme.com", "description": "ok"}),
            serde_json::json!({"title": 42}),
            serde_json::json!("not a record"),
            serde_json::json!({"title": "Beta", "link": "https://beta.io", "snippet": "fine"}),
        ];

        let records = decode_records(entries);

        let titles: Vec<_> = records.iter().map(|record| record.title.as_str()).collect();
        assert_eq!(titles, ["Acme", "Beta"]);
    }
}
