use super::catalog::SignalGroupConfig;
use super::domain::SignalResult;
use super::matcher::match_keywords;
use crate::gateway::SearchGateway;
use tracing::debug;

/// Runs one query per keyword of `group` and merges the evidence.
///
/// Queries are issued sequentially in keyword order. Each query's results are
/// matched against the keyword that produced it only. A gateway that failed is
/// indistinguishable from one that found nothing.
pub fn evaluate_group<G>(
    group: &SignalGroupConfig,
    company_name: &str,
    domain: &str,
    gateway: &G,
    max_results: usize,
) -> SignalResult
where
    G: SearchGateway + ?Sized,
{
    let mut evidence = Vec::new();

    for keyword in &group.keywords {
        let query = group.query_template.render(company_name, domain, keyword);
        let results = gateway.search(&query, max_results);
        let (matched, found) = match_keywords(&results, std::slice::from_ref(keyword));

        debug!(
            group = %group.name,
            query = %query,
            results = results.len(),
            matched,
            "evaluated signal keyword"
        );

        evidence.extend(found);
    }

    SignalResult {
        group_name: group.name.clone(),
        detected: !evidence.is_empty(),
        weight: group.weight,
        evidence,
    }
}
