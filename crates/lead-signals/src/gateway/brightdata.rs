use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::runtime::Runtime;

use super::{decode_records, GatewayError, RawSerpRecord, SearchLocale, SerpBackend};

const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search";

/// Connection details for the Bright Data SERP request API.
#[derive(Clone)]
pub struct BrightDataSettings {
    pub endpoint: String,
    pub api_key: String,
    pub zone: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for BrightDataSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrightDataSettings")
            .field("endpoint", &self.endpoint)
            .field("zone", &self.zone)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct SerpRequest<'a> {
    zone: &'a str,
    url: &'a str,
    format: &'static str,
}

/// Bright Data answers with `results` or, for parsed Google pages, `organic`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SerpPayload {
    results: Option<Vec<Value>>,
    organic: Option<Vec<Value>>,
}

impl SerpPayload {
    fn into_records(self) -> Vec<RawSerpRecord> {
        let entries = match (self.results, self.organic) {
            (Some(results), _) if !results.is_empty() => results,
            (_, Some(organic)) => organic,
            (results, None) => results.unwrap_or_default(),
        };
        decode_records(entries)
    }
}

/// Blocking facade over the async reqwest client so the sequential scoring
/// pipeline can query Bright Data without an ambient runtime.
pub struct BrightDataClient {
    client: Client,
    runtime: Runtime,
    settings: BrightDataSettings,
}

impl BrightDataClient {
    pub fn new(settings: BrightDataSettings) -> Result<Self, GatewayError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|err| GatewayError::Runtime(err.to_string()))?;
        let client = Client::builder().timeout(settings.timeout).build()?;

        Ok(Self {
            client,
            runtime,
            settings,
        })
    }

    pub fn settings(&self) -> &BrightDataSettings {
        &self.settings
    }

    async fn fetch(&self, target: &Url) -> Result<Vec<RawSerpRecord>, GatewayError> {
        let request = SerpRequest {
            zone: &self.settings.zone,
            url: target.as_str(),
            format: "json",
        };

        let response = self
            .client
            .post(&self.settings.endpoint)
            .bearer_auth(&self.settings.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: SerpPayload = response.json().await?;
        Ok(payload.into_records())
    }
}

impl std::fmt::Debug for BrightDataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrightDataClient")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl SerpBackend for BrightDataClient {
    fn query(&self, term: &str, locale: &SearchLocale) -> Result<Vec<RawSerpRecord>, GatewayError> {
        let target = search_url(term, locale)?;
        self.runtime.block_on(self.fetch(&target))
    }
}

/// Google results page for `term`, localized with `gl`/`hl`.
pub(crate) fn search_url(term: &str, locale: &SearchLocale) -> Result<Url, GatewayError> {
    Url::parse_with_params(
        GOOGLE_SEARCH_URL,
        [
            ("q", term),
            ("gl", locale.country.as_str()),
            ("hl", locale.language.as_str()),
        ],
    )
    .map_err(|err| GatewayError::InvalidUrl(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_encodes_query_and_locale() {
        let url = search_url("Acme hiring data engineer", &SearchLocale::default())
            .expect("url builds");

        assert_eq!(
            url.as_str(),
            "https://www.google.com/search?q=Acme+hiring+data+engineer&gl=us&hl=en"
        );
    }

    #[test]
    fn payload_accepts_results_or_organic() {
        let results: SerpPayload = serde_json::from_str(
            r#"{"results": [{"title": "A", "url": "https://a.com", "description": "alpha"}]}"#,
        )
        .expect("results payload");
        let organic: SerpPayload = serde_json::from_str(
            r#"{"organic": [{"title": "B", "link": "https://b.com", "description": "beta"}]}"#,
        )
        .expect("organic payload");
        let empty: SerpPayload = serde_json::from_str("{}").expect("empty payload");

        assert_eq!(results.into_records()[0].url, "https://a.com");
        assert_eq!(organic.into_records()[0].url, "https://b.com");
        assert!(empty.into_records().is_empty());
    }

    #[test]
    fn payload_with_both_lists_prefers_results() {
        let payload: SerpPayload = serde_json::from_str(
            r#"{
                "results": [{"title": "A", "url": "https://a.com", "description": "alpha", "snippet": "al"}],
                "organic": [{"title": "B", "link": "https://b.com", "snippet": "beta"}]
            }"#,
        )
        .expect("payload with both lists parses");

        let records = payload.into_records();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "A");
        assert_eq!(records[0].description, "alpha");
    }

    #[test]
    fn empty_results_fall_back_to_organic() {
        let payload: SerpPayload = serde_json::from_str(
            r#"{"results": [], "organic": [{"title": "B", "link": "https://b.com", "snippet": "beta"}, 7]}"#,
        )
        .expect("payload parses");

        let records = payload.into_records();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, "https://b.com");
    }

    #[test]
    fn debug_output_hides_api_key() {
        let settings = BrightDataSettings {
            endpoint: "https://api.brightdata.com/request".to_string(),
            api_key: "secret-token".to_string(),
            zone: "serp".to_string(),
            timeout: Duration::from_secs(30),
        };

        let rendered = format!("{settings:?}");

        assert!(rendered.contains("serp"));
        assert!(!rendered.contains("secret-token"));
    }
}
