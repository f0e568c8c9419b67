use super::catalog::{SignalCatalog, StarterStyle};
use super::domain::{Evidence, ScoringReport};

/// Maximum number of starters produced for one report.
pub const MAX_STARTERS: usize = 3;

/// Derives up to three opening lines from the first evidence of each detected
/// group, walking groups in declared order. Falls back to generic lines naming
/// the subject when nothing usable was detected.
pub fn conversation_starters(report: &ScoringReport, catalog: &SignalCatalog) -> Vec<String> {
    let mut starters = Vec::with_capacity(MAX_STARTERS);

    for signal in report.detected() {
        if starters.len() == MAX_STARTERS {
            break;
        }

        let Some(evidence) = signal.evidence.first() else {
            continue;
        };
        let style = catalog
            .get(&signal.group_name)
            .map(|group| group.starter_style())
            .unwrap_or_else(|| StarterStyle::infer(&signal.group_name));

        if let Some(line) = starter_line(style, evidence, &report.subject_name) {
            starters.push(line);
        }
    }

    if starters.is_empty() {
        return fallback_starters(&report.subject_name);
    }

    starters
}

fn starter_line(style: StarterStyle, evidence: &Evidence, company_name: &str) -> Option<String> {
    if style == StarterStyle::Strategic {
        let source = match evidence.source.trim() {
            "" => "your recent update",
            title => title,
        };
        return Some(format!(
            "Just saw your post about {source} - how does this fit into your roadmap?"
        ));
    }

    let keyword = evidence.first_keyword()?;
    let line = match style {
        StarterStyle::Hiring => {
            format!("Saw you're hiring for roles involving {keyword} - are you expanding your team?")
        }
        StarterStyle::PainPoint => {
            format!("Read some feedback about {keyword} - is this still a challenge?")
        }
        StarterStyle::TechStack => {
            format!("Noticed you're working with {keyword} - how's that migration going?")
        }
        StarterStyle::Generic | StarterStyle::Strategic => format!(
            "Came across {company_name} in connection with {keyword} - is that a priority for your team right now?"
        ),
    };
    Some(line)
}

fn fallback_starters(company_name: &str) -> Vec<String> {
    vec![
        format!("Interested in learning more about {company_name}'s data strategy"),
        format!(
            "Would love to connect with the {company_name} team and discuss potential collaboration opportunities"
        ),
        format!("Noticed {company_name}'s growth - how are you handling data at scale?"),
    ]
}
