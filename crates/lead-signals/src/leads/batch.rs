use super::LeadRecord;
use crate::gateway::SearchGateway;
use crate::signals::{EnrichedProfile, EnrichmentEngine};
use rayon::prelude::*;
use tracing::{info, warn};

/// Enriches every lead, returning profiles in input order.
///
/// With more than one worker, leads are spread over a dedicated thread pool.
/// Each worker scores one lead at a time, so at most `workers` queries are in
/// flight. `on_enriched` is called as each lead completes, in completion order.
pub fn enrich_leads<G, F>(
    engine: &EnrichmentEngine<G>,
    leads: &[LeadRecord],
    workers: usize,
    on_enriched: F,
) -> Vec<EnrichedProfile>
where
    G: SearchGateway,
    F: Fn(usize, &EnrichedProfile) + Sync,
{
    let workers = workers.clamp(1, leads.len().max(1));
    info!(leads = leads.len(), workers, "enriching lead batch");

    let enrich_indexed = |(idx, lead): (usize, &LeadRecord)| {
        let profile = enrich_lead(engine, lead);
        on_enriched(idx, &profile);
        profile
    };

    if workers == 1 {
        return leads.iter().enumerate().map(enrich_indexed).collect();
    }

    match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => pool.install(|| leads.par_iter().enumerate().map(enrich_indexed).collect()),
        Err(err) => {
            warn!(error = %err, "worker pool unavailable; enriching sequentially");
            leads.iter().enumerate().map(enrich_indexed).collect()
        }
    }
}

fn enrich_lead<G: SearchGateway>(engine: &EnrichmentEngine<G>, lead: &LeadRecord) -> EnrichedProfile {
    engine.enrich(
        &lead.domain,
        lead.company_name.as_deref(),
        Some(lead.standard_data.clone()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::{IntentScorer, IntentThresholds, SearchResult, SignalCatalog};
    use serde_json::Map;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::thread;
    use std::time::Duration;

    /// Reports a hiring hit only for queries about "Acme".
    struct AcmeOnlyGateway;

    impl SearchGateway for AcmeOnlyGateway {
        fn search(&self, query: &str, _max_results: usize) -> Vec<SearchResult> {
            if query.starts_with("Acme") {
                vec![SearchResult {
                    title: "Acme is hiring a Data Engineer".to_string(),
                    url: "https://jobs.acme.com".to_string(),
                    description: "Join the Acme data team.".to_string(),
                }]
            } else {
                Vec::new()
            }
        }
    }

    fn lead(domain: &str) -> LeadRecord {
        LeadRecord {
            domain: domain.to_string(),
            company_name: None,
            standard_data: Map::new(),
        }
    }

    fn engine() -> EnrichmentEngine<AcmeOnlyGateway> {
        let scorer = IntentScorer::new(SignalCatalog::standard(), IntentThresholds::default());
        EnrichmentEngine::new(scorer, AcmeOnlyGateway)
    }

    #[test]
    fn parallel_results_keep_input_order() {
        let leads: Vec<_> = ["zeta.io", "acme.com", "beta.net", "gamma.com", "delta.com"]
            .into_iter()
            .map(lead)
            .collect();
        let seen = Mutex::new(Vec::new());

        let profiles = enrich_leads(&engine(), &leads, 3, |idx, _| {
            seen.lock().expect("seen mutex poisoned").push(idx);
        });

        let domains: Vec<_> = profiles.iter().map(EnrichedProfile::domain).collect();
        assert_eq!(domains, ["zeta.io", "acme.com", "beta.net", "gamma.com", "delta.com"]);
        assert_eq!(profiles[1].report.total_score, 25);
        assert!(profiles.iter().enumerate().all(|(idx, profile)| idx == 1 || profile.report.total_score == 0));

        let mut seen = seen.into_inner().expect("seen mutex poisoned");
        seen.sort_unstable();
        assert_eq!(seen, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn sequential_and_parallel_runs_agree() {
        let leads: Vec<_> = ["acme.com", "other.com"].into_iter().map(lead).collect();
        let engine = engine();

        let sequential = enrich_leads(&engine, &leads, 1, |_, _| {});
        let parallel = enrich_leads(&engine, &leads, 8, |_, _| {});

        let reports = |profiles: &[EnrichedProfile]| {
            profiles.iter().map(|profile| profile.report.clone()).collect::<Vec<_>>()
        };
        assert_eq!(reports(&sequential), reports(&parallel));
    }

    /// Records the highest number of queries running at once.
    #[derive(Default)]
    struct InFlightGateway {
        current: AtomicUsize,
        peak: AtomicUsize,
    }

    impl SearchGateway for InFlightGateway {
        fn search(&self, _query: &str, _max_results: usize) -> Vec<SearchResult> {
            let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(2));
            self.current.fetch_sub(1, Ordering::SeqCst);
            Vec::new()
        }
    }

    #[test]
    fn worker_count_bounds_queries_in_flight() {
        let leads: Vec<_> = ["a.com", "b.com", "c.com", "d.com", "e.com", "f.com"]
            .into_iter()
            .map(lead)
            .collect();
        let scorer = IntentScorer::new(SignalCatalog::standard(), IntentThresholds::default());
        let engine = EnrichmentEngine::new(scorer, InFlightGateway::default());

        let profiles = enrich_leads(&engine, &leads, 2, |_, _| {});

        assert_eq!(profiles.len(), 6);
        let peak = engine.gateway().peak.load(Ordering::SeqCst);
        assert!((1..=2).contains(&peak), "peak in-flight queries was {peak}");
    }

    #[test]
    fn passes_lead_columns_through() {
        let mut data = Map::new();
        data.insert("owner".to_string(), "sam".into());
        let leads = vec![LeadRecord {
            domain: "acme.com".to_string(),
            company_name: Some("Acme".to_string()),
            standard_data: data.clone(),
        }];

        let profiles = enrich_leads(&engine(), &leads, 0, |_, _| {});

        assert_eq!(profiles[0].standard_data, data);
        assert_eq!(profiles[0].company_name(), "Acme");
    }
}
