use chrono::{TimeZone, Utc};
use lead_signals::gateway::{
    GatewayError, RawSerpRecord, SearchGateway, SearchLocale, SerpBackend, SerpGateway,
};
use lead_signals::signals::{
    EnrichmentEngine, IntentLevel, IntentScorer, IntentThresholds, QueryTemplate, SearchResult,
    SignalCatalog, SignalGroupConfig,
};
use serde_json::{json, Map};

/// Returns every fixture whose trigger phrase appears in the query.
struct FixtureGateway {
    fixtures: Vec<(&'static str, SearchResult)>,
}

impl FixtureGateway {
    fn buying_signals() -> Self {
        let hit = |trigger, title: &str, description: &str| {
            (
                trigger,
                SearchResult {
                    title: title.to_string(),
                    url: format!("https://news.example.com/{}", title.len()),
                    description: description.to_string(),
                },
            )
        };

        Self {
            fixtures: vec![
                hit(
                    "data engineer",
                    "Acme careers: Senior Data Engineer",
                    "Acme is hiring a Data Engineer to build batch and streaming pipelines.",
                ),
                hit(
                    "data quality issues",
                    "Acme engineering blog",
                    "How we tackled data quality issues across our reporting layer.",
                ),
                hit(
                    "snowflake",
                    "Acme moves its warehouse",
                    "Acme completed its migration to Snowflake this quarter.",
                ),
                hit(
                    "analytics transformation",
                    "Acme 2026 analytics transformation",
                    "Leadership outlines an analytics transformation program.",
                ),
            ],
        }
    }

    fn empty() -> Self {
        Self {
            fixtures: Vec::new(),
        }
    }
}

impl SearchGateway for FixtureGateway {
    fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        let query = query.to_lowercase();
        self.fixtures
            .iter()
            .filter(|(trigger, _)| query.contains(trigger))
            .map(|(_, result)| result.clone())
            .take(max_results)
            .collect()
    }
}

fn template() -> QueryTemplate {
    QueryTemplate::parse("{company_name} {keyword}").expect("template parses")
}

fn standard_scorer() -> IntentScorer {
    IntentScorer::new(SignalCatalog::standard(), IntentThresholds::default())
}

#[test]
fn all_default_groups_detected_scores_one_hundred() {
    let engine = EnrichmentEngine::new(standard_scorer(), FixtureGateway::buying_signals());

    let profile = engine.enrich("acme.com", None, None);
    let report = &profile.report;

    assert_eq!(report.subject_name, "Acme");
    assert_eq!(report.total_score, 100);
    assert_eq!(report.intent_level, IntentLevel::High);
    assert_eq!(report.detected_count(), 4);
    assert!(report
        .recommendation
        .contains("Lead with: Hiring Signals, Pain Point Signals."));

    assert_eq!(
        profile.conversation_starters,
        [
            "Saw you're hiring for roles involving data engineer - are you expanding your team?",
            "Read some feedback about data quality issues - is this still a challenge?",
            "Noticed you're working with Snowflake - how's that migration going?",
        ]
    );
}

#[test]
fn zero_evidence_yields_low_intent_and_fallback_starters() {
    let engine = EnrichmentEngine::new(standard_scorer(), FixtureGateway::empty());

    let profile = engine.enrich("acme.com", Some("Acme Corp"), None);

    assert_eq!(profile.report.total_score, 0);
    assert_eq!(profile.report.intent_level, IntentLevel::Low);
    assert!(profile.report.signals.iter().all(|signal| !signal.detected && signal.evidence.is_empty()));
    assert_eq!(profile.conversation_starters.len(), 3);
    assert!(profile
        .conversation_starters
        .iter()
        .all(|line| line.contains("Acme Corp")));
}

#[test]
fn overweight_catalog_is_not_clamped() {
    let catalog = SignalCatalog::new(vec![
        SignalGroupConfig::new("hiring_signals", 70, &["data engineer"], template()),
        SignalGroupConfig::new("tech_stack_signals", 60, &["Snowflake"], template()),
    ])
    .expect("catalog is valid");
    assert!(catalog.weight_warning().is_some());

    let scorer = IntentScorer::new(catalog, IntentThresholds::default());
    let report = scorer.score("acme.com", None, &FixtureGateway::buying_signals());

    assert_eq!(report.total_score, 130);
    assert_eq!(report.intent_level, IntentLevel::High);
}

#[test]
fn total_is_sum_of_detected_weights_in_any_order() {
    let groups = vec![
        SignalGroupConfig::new("hiring_signals", 20, &["data engineer"], template()),
        SignalGroupConfig::new("compliance_needs", 30, &["SOC 2"], template()),
        SignalGroupConfig::new("strategic_signals", 15, &["analytics transformation"], template()),
        SignalGroupConfig::new("tech_stack_signals", 35, &["Snowflake"], template()).disabled(),
    ];
    let mut reversed = groups.clone();
    reversed.reverse();

    let gateway = FixtureGateway::buying_signals();
    let forward = IntentScorer::new(
        SignalCatalog::new(groups).expect("catalog is valid"),
        IntentThresholds::default(),
    )
    .score("acme.com", None, &gateway);
    let backward = IntentScorer::new(
        SignalCatalog::new(reversed).expect("catalog is valid"),
        IntentThresholds::default(),
    )
    .score("acme.com", None, &gateway);

    assert_eq!(forward.total_score, 35);
    assert_eq!(backward.total_score, 35);
    assert_eq!(forward.intent_level, IntentLevel::Medium);
    assert!(forward.signal("tech_stack_signals").is_none());
    assert!(!forward
        .signal("compliance_needs")
        .expect("compliance evaluated")
        .detected);
}

#[test]
fn custom_thresholds_change_the_tier() {
    let scorer = IntentScorer::new(
        SignalCatalog::standard(),
        IntentThresholds {
            high: 101,
            medium: 100,
        },
    );

    let report = scorer.score("acme.com", None, &FixtureGateway::buying_signals());

    assert_eq!(report.total_score, 100);
    assert_eq!(report.intent_level, IntentLevel::Medium);
    assert!(report.recommendation.contains("4 signal(s) detected"));
}

#[derive(Debug)]
struct UnreachableBackend;

impl SerpBackend for UnreachableBackend {
    fn query(&self, _term: &str, _locale: &SearchLocale) -> Result<Vec<RawSerpRecord>, GatewayError> {
        Err(GatewayError::Transport("connection refused".to_string()))
    }
}

#[test]
fn gateway_outage_scores_zero_but_is_counted() {
    let gateway = SerpGateway::new(UnreachableBackend, SearchLocale::default());
    let engine = EnrichmentEngine::new(standard_scorer(), gateway);

    let profile = engine.enrich("acme.com", None, None);

    assert_eq!(profile.report.total_score, 0);
    assert_eq!(profile.report.intent_level, IntentLevel::Low);
    let stats = engine.gateway().stats();
    assert_eq!(stats.queries, 12);
    assert_eq!(stats.failures, 12);
}

#[test]
fn profiles_pass_lead_data_through_and_serialize() {
    let engine = EnrichmentEngine::new(standard_scorer(), FixtureGateway::buying_signals());
    let mut data = Map::new();
    data.insert("owner".to_string(), json!("sam"));
    let at = Utc
        .with_ymd_and_hms(2026, 10, 18, 8, 0, 0)
        .single()
        .expect("valid timestamp");

    let profile = engine.enrich_at("acme.com", Some("Acme"), Some(data.clone()), at);
    let value = serde_json::to_value(&profile).expect("profile serializes");

    assert_eq!(profile.standard_data, data);
    assert_eq!(value["enriched_at"], "2026-10-18T08:00:00Z");
    assert_eq!(value["report"]["intent_level"], "High");
    assert_eq!(value["report"]["signals"]["hiring_signals"]["detected"], true);
    assert_eq!(value["standard_data"]["owner"], "sam");
}
