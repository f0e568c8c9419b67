use super::domain::EnrichedProfile;
use super::scoring::IntentScorer;
use super::starters::conversation_starters;
use crate::gateway::SearchGateway;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Composes the scorer, a search gateway, and the starter generator into a
/// single enrichment step per lead.
#[derive(Debug)]
pub struct EnrichmentEngine<G> {
    scorer: IntentScorer,
    gateway: G,
}

impl<G> EnrichmentEngine<G>
where
    G: SearchGateway,
{
    pub fn new(scorer: IntentScorer, gateway: G) -> Self {
        Self { scorer, gateway }
    }

    pub fn scorer(&self) -> &IntentScorer {
        &self.scorer
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn enrich(
        &self,
        domain: &str,
        company_name: Option<&str>,
        standard_data: Option<Map<String, Value>>,
    ) -> EnrichedProfile {
        self.enrich_at(domain, company_name, standard_data, Utc::now())
    }

    pub fn enrich_at(
        &self,
        domain: &str,
        company_name: Option<&str>,
        standard_data: Option<Map<String, Value>>,
        enriched_at: DateTime<Utc>,
    ) -> EnrichedProfile {
        let report = self.scorer.score(domain, company_name, &self.gateway);
        let conversation_starters = conversation_starters(&report, self.scorer.catalog());

        EnrichedProfile {
            enriched_at,
            report,
            conversation_starters,
            standard_data: standard_data.unwrap_or_default(),
        }
    }
}
