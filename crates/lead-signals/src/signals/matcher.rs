use super::domain::{Evidence, SearchResult};

/// Characters of the description kept in an evidence snippet.
pub const SNIPPET_CHARS: usize = 150;

/// Case-insensitive keyword detection over result titles and descriptions.
///
/// Each matching result yields one [`Evidence`] entry listing every keyword it
/// contains, in keyword order. Evidence follows the input result order.
pub fn match_keywords<K: AsRef<str>>(
    results: &[SearchResult],
    keywords: &[K],
) -> (bool, Vec<Evidence>) {
    if results.is_empty() || keywords.is_empty() {
        return (false, Vec::new());
    }

    let needles: Vec<(&str, String)> = keywords
        .iter()
        .map(|keyword| (keyword.as_ref(), keyword.as_ref().to_lowercase()))
        .filter(|(_, lowered)| !lowered.is_empty())
        .collect();

    let mut evidence = Vec::new();
    for result in results {
        let title = result.title.to_lowercase();
        let description = result.description.to_lowercase();

        let mut matched_keywords: Vec<String> = Vec::new();
        for (keyword, lowered) in &needles {
            let hit = title.contains(lowered.as_str()) || description.contains(lowered.as_str());
            if hit && !matched_keywords.iter().any(|seen| seen == keyword) {
                matched_keywords.push(keyword.to_string());
            }
        }

        if !matched_keywords.is_empty() {
            evidence.push(Evidence {
                source: result.title.clone(),
                url: result.url.clone(),
                matched_keywords,
                snippet: snippet(&result.description),
            });
        }
    }

    (!evidence.is_empty(), evidence)
}

/// Leading slice of a description, marked with `...` when truncated.
pub fn snippet(description: &str) -> String {
    match description.char_indices().nth(SNIPPET_CHARS) {
        Some((cut, _)) => format!("{}...", &description[..cut]),
        None => description.to_string(),
    }
}
