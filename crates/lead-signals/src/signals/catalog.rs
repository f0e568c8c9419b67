use super::template::{Placeholder, QueryTemplate, TemplateToken};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

/// Upper bound for a single group's weight.
pub const MAX_GROUP_WEIGHT: u32 = 100;

/// Weight total a well-formed catalog distributes across enabled groups.
pub const EXPECTED_WEIGHT_SUM: u32 = 100;

/// Sentence shape used when a detected group is turned into a conversation starter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarterStyle {
    Hiring,
    PainPoint,
    TechStack,
    Strategic,
    Generic,
}

impl StarterStyle {
    /// Guesses the style from a group name such as `hiring_signals`.
    pub fn infer(group_name: &str) -> Self {
        let name = group_name.to_ascii_lowercase();
        if name.contains("hiring") {
            Self::Hiring
        } else if name.contains("pain") || name.contains("challenge") {
            Self::PainPoint
        } else if ["tech", "stack", "adoption", "infrastructure"]
            .iter()
            .any(|marker| name.contains(marker))
        {
            Self::TechStack
        } else if name.contains("strategic") {
            Self::Strategic
        } else {
            Self::Generic
        }
    }
}

/// One named, weighted cluster of keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalGroupConfig {
    pub name: String,
    pub enabled: bool,
    pub weight: u32,
    pub keywords: Vec<String>,
    pub query_template: QueryTemplate,
    pub starter: Option<StarterStyle>,
}

impl SignalGroupConfig {
    pub fn new(
        name: impl Into<String>,
        weight: u32,
        keywords: &[&str],
        query_template: QueryTemplate,
    ) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            weight,
            keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
            query_template,
            starter: None,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn starter_style(&self) -> StarterStyle {
        self.starter
            .unwrap_or_else(|| StarterStyle::infer(&self.name))
    }
}

/// Group body as it appears in preset files, keyed by group name.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SignalGroupBody {
    #[serde(default)]
    enabled: bool,
    weight: u32,
    keywords: Vec<String>,
    query_template: QueryTemplate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    starter: Option<StarterStyle>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("signal group '{0}' is defined more than once")]
    DuplicateGroup(String),
    #[error("signal group names must not be empty")]
    EmptyName,
    #[error("signal group '{0}' has no keywords")]
    EmptyKeywords(String),
    #[error("signal group '{0}' has a blank keyword")]
    BlankKeyword(String),
    #[error("signal group '{group}' weight {weight} exceeds 100")]
    WeightOutOfRange { group: String, weight: u32 },
}

/// Immutable, ordered set of signal groups used for one scoring run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignalCatalog {
    groups: Vec<SignalGroupConfig>,
}

impl SignalCatalog {
    pub fn new(groups: Vec<SignalGroupConfig>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for group in &groups {
            if group.name.trim().is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if !seen.insert(group.name.as_str()) {
                return Err(CatalogError::DuplicateGroup(group.name.clone()));
            }
            if group.keywords.is_empty() {
                return Err(CatalogError::EmptyKeywords(group.name.clone()));
            }
            if group.keywords.iter().any(|keyword| keyword.trim().is_empty()) {
                return Err(CatalogError::BlankKeyword(group.name.clone()));
            }
            if group.weight > MAX_GROUP_WEIGHT {
                return Err(CatalogError::WeightOutOfRange {
                    group: group.name.clone(),
                    weight: group.weight,
                });
            }
        }

        Ok(Self { groups })
    }

    /// Baseline data-platform catalog: hiring, pain points, tech stack, strategy.
    pub fn standard() -> Self {
        let groups = vec![
            SignalGroupConfig::new(
                "hiring_signals",
                25,
                &["data engineer", "machine learning engineer", "Snowflake", "dbt"],
                company_keyword(" hiring "),
            ),
            SignalGroupConfig::new(
                "pain_point_signals",
                35,
                &["manual data processes", "data quality issues", "slow reporting"],
                company_keyword(" "),
            ),
            SignalGroupConfig::new(
                "tech_stack_signals",
                25,
                &["Snowflake", "Databricks", "modern data stack"],
                company_keyword(" uses "),
            ),
            SignalGroupConfig::new(
                "strategic_signals",
                15,
                &["data strategy", "analytics transformation"],
                company_keyword(" "),
            ),
        ];

        Self { groups }
    }

    pub fn groups(&self) -> &[SignalGroupConfig] {
        &self.groups
    }

    pub fn enabled(&self) -> impl Iterator<Item = &SignalGroupConfig> {
        self.groups.iter().filter(|group| group.enabled)
    }

    pub fn get(&self, name: &str) -> Option<&SignalGroupConfig> {
        self.groups.iter().find(|group| group.name == name)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn weight_sum(&self) -> u32 {
        self.enabled().map(|group| group.weight).sum()
    }

    /// Non-fatal notice when enabled weights do not add up to 100.
    pub fn weight_warning(&self) -> Option<String> {
        let total = self.weight_sum();
        (total != EXPECTED_WEIGHT_SUM).then(|| {
            format!(
                "signal weights sum to {total}, not {EXPECTED_WEIGHT_SUM}; scores may fall outside 0-100"
            )
        })
    }
}

/// `{company_name}<infix>{keyword}`
fn company_keyword(infix: &str) -> QueryTemplate {
    QueryTemplate::from_tokens(vec![
        TemplateToken::Placeholder(Placeholder::CompanyName),
        TemplateToken::Literal(infix.to_string()),
        TemplateToken::Placeholder(Placeholder::Keyword),
    ])
}

impl Serialize for SignalCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            let body = SignalGroupBody {
                enabled: group.enabled,
                weight: group.weight,
                keywords: group.keywords.clone(),
                query_template: group.query_template.clone(),
                starter: group.starter,
            };
            map.serialize_entry(&group.name, &body)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SignalCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = SignalCatalog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of signal group name to group definition")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut groups = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, body)) = access.next_entry::<String, SignalGroupBody>()? {
                    groups.push(SignalGroupConfig {
                        name,
                        enabled: body.enabled,
                        weight: body.weight,
                        keywords: body.keywords,
                        query_template: body.query_template,
                        starter: body.starter,
                    });
                }
                SignalCatalog::new(groups).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}
