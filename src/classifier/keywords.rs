use super::linguistic::normalize;

/// One entry of a parser's ordered keyword table.
#[derive(Debug, Clone, Copy)]
pub struct KeywordGroup {
    pub category: &'static str,
    pub keywords: &'static [&'static str],
    pub confidence: f64,
}

/// The group and keyword that won the keyword tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordMatch {
    pub category: &'static str,
    pub keyword: &'static str,
    pub confidence: f64,
}

/// Scans `groups` in declaration order and returns the first group with a
/// keyword contained in the normalised input.
///
/// This is first-match, not best-match: an earlier group wins even when a
/// later group would match more keywords.
pub fn first_match(groups: &[KeywordGroup], input: &str) -> Option<KeywordMatch> {
    let text = normalize(input);
    groups.iter().find_map(|group| {
        group
            .keywords
            .iter()
            .find(|keyword| text.contains(*keyword))
            .map(|keyword| KeywordMatch {
                category: group.category,
                keyword,
                confidence: group.confidence,
            })
    })
}

/// Returns every group with at least one contained keyword, in declaration order.
pub fn all_matches(groups: &[KeywordGroup], input: &str) -> Vec<&'static str> {
    let text = normalize(input);
    groups
        .iter()
        .filter(|group| group.keywords.iter().any(|k| text.contains(k)))
        .map(|group| group.category)
        .collect()
}
