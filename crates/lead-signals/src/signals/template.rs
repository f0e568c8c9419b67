use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Values a query template may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    CompanyName,
    Domain,
    Keyword,
}

impl Placeholder {
    pub const fn name(self) -> &'static str {
        match self {
            Self::CompanyName => "company_name",
            Self::Domain => "domain",
            Self::Keyword => "keyword",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "company_name" => Some(Self::CompanyName),
            "domain" => Some(Self::Domain),
            "keyword" => Some(Self::Keyword),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
    Literal(String),
    Placeholder(Placeholder),
}

/// Search query pattern such as `{company_name} hiring {keyword}`, parsed once
/// into literal and placeholder tokens so rendering cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QueryTemplate {
    tokens: Vec<TemplateToken>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unknown placeholder '{{{0}}}' (expected company_name, domain or keyword)")]
    UnknownPlaceholder(String),
    #[error("placeholder opened at byte {0} is never closed")]
    Unterminated(usize),
    #[error("unmatched '}}' at byte {0}")]
    StrayClosingBrace(usize),
}

impl QueryTemplate {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((index, ch)) = chars.next() {
            match ch {
                '{' => {
                    if matches!(chars.peek(), Some((_, '{'))) {
                        chars.next();
                        literal.push('{');
                        continue;
                    }

                    let mut name = String::new();
                    let mut closed = false;
                    for (_, next) in chars.by_ref() {
                        if next == '}' {
                            closed = true;
                            break;
                        }
                        name.push(next);
                    }
                    if !closed {
                        return Err(TemplateError::Unterminated(index));
                    }

                    let placeholder = Placeholder::from_name(&name)
                        .ok_or(TemplateError::UnknownPlaceholder(name))?;
                    if !literal.is_empty() {
                        tokens.push(TemplateToken::Literal(std::mem::take(&mut literal)));
                    }
                    tokens.push(TemplateToken::Placeholder(placeholder));
                }
                '}' => {
                    if matches!(chars.peek(), Some((_, '}'))) {
                        chars.next();
                        literal.push('}');
                        continue;
                    }
                    return Err(TemplateError::StrayClosingBrace(index));
                }
                other => literal.push(other),
            }
        }

        if !literal.is_empty() {
            tokens.push(TemplateToken::Literal(literal));
        }

        Ok(Self { tokens })
    }

    /// Builds a template from already-typed tokens, which cannot be malformed.
    pub fn from_tokens(tokens: Vec<TemplateToken>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[TemplateToken] {
        &self.tokens
    }

    pub fn references(&self, placeholder: Placeholder) -> bool {
        self.tokens
            .iter()
            .any(|token| *token == TemplateToken::Placeholder(placeholder))
    }

    pub fn render(&self, company_name: &str, domain: &str, keyword: &str) -> String {
        let mut query = String::new();
        for token in &self.tokens {
            match token {
                TemplateToken::Literal(text) => query.push_str(text),
                TemplateToken::Placeholder(Placeholder::CompanyName) => query.push_str(company_name),
                TemplateToken::Placeholder(Placeholder::Domain) => query.push_str(domain),
                TemplateToken::Placeholder(Placeholder::Keyword) => query.push_str(keyword),
            }
        }
        query
    }
}

impl fmt::Display for QueryTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            match token {
                TemplateToken::Literal(text) => {
                    write!(f, "{}", text.replace('{', "{{").replace('}', "}}"))?
                }
                TemplateToken::Placeholder(placeholder) => write!(f, "{{{}}}", placeholder.name())?,
            }
        }
        Ok(())
    }
}

impl FromStr for QueryTemplate {
    type Err = TemplateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for QueryTemplate {
    type Error = TemplateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<QueryTemplate> for String {
    fn from(value: QueryTemplate) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_all_placeholders_in_order() {
        let template = QueryTemplate::parse("{company_name} hiring {keyword} site:{domain}")
            .expect("template parses");

        assert_eq!(
            template.render("Acme", "acme.com", "data engineer"),
            "Acme hiring data engineer site:acme.com"
        );
        assert!(template.references(Placeholder::Keyword));
    }

    #[test]
    fn doubled_braces_are_literal() {
        let template = QueryTemplate::parse("{{{keyword}}}").expect("template parses");

        assert_eq!(template.render("Acme", "acme.com", "dbt"), "{dbt}");
        assert_eq!(template.to_string(), "{{{keyword}}}");
    }

    #[test]
    fn rejects_unknown_placeholder_at_construction() {
        let err = QueryTemplate::parse("{company} uses {keyword}").unwrap_err();
        assert_eq!(err, TemplateError::UnknownPlaceholder("company".to_string()));
    }

    #[test]
    fn rejects_unbalanced_braces() {
        assert_eq!(
            QueryTemplate::parse("{company_name").unwrap_err(),
            TemplateError::Unterminated(0)
        );
        assert_eq!(
            QueryTemplate::parse("acme }").unwrap_err(),
            TemplateError::StrayClosingBrace(5)
        );
    }

    #[test]
    fn deserializes_from_json_string() {
        let template: QueryTemplate =
            serde_json::from_str("\"{company_name} {keyword}\"").expect("valid template");
        assert_eq!(template.render("Acme", "acme.com", "SOC 2"), "Acme SOC 2");

        let invalid = serde_json::from_str::<QueryTemplate>("\"{name} {keyword}\"");
        assert!(invalid.is_err());
    }
}
