//! Location scoring for notable areas named in the prompt.

use std::collections::BTreeSet;

use sofra_corpus::RestaurantRecord;

use super::MatchSignal;
use crate::normalize::contains_term;

struct AreaRule {
    label: &'static str,
    keywords: &'static [&'static str],
    tag: Option<&'static str>,
    weight: f64,
}

/// Notable areas. A rule fires when the prompt mentions one of its keywords
/// and the restaurant either carries the associated tag or names the keyword
/// in one of its free-text fields.
static AREA_RULES: &[AreaRule] = &[
    AreaRule {
        label: "old city",
        keywords: &["old city", "icheri sheher", "icherisheher"],
        tag: Some("old-city"),
        weight: 1.0,
    },
    AreaRule {
        label: "boulevard",
        keywords: &["boulevard", "waterfront", "seaside park"],
        tag: Some("boulevard"),
        weight: 1.0,
    },
    AreaRule {
        label: "fountain square",
        keywords: &["fountain square", "fountains square"],
        tag: Some("fountain-square"),
        weight: 1.0,
    },
    AreaRule {
        label: "downtown",
        keywords: &["downtown", "city center", "city centre"],
        tag: Some("downtown"),
        weight: 1.0,
    },
    AreaRule {
        label: "white city",
        keywords: &["white city", "port baku"],
        tag: Some("white-city"),
        weight: 1.0,
    },
    AreaRule {
        label: "bayil",
        keywords: &["bayil"],
        tag: None,
        weight: 1.0,
    },
];

/// Score notable-area matches for one restaurant.
#[must_use]
pub fn score_location(
    prompt: &str,
    record: &RestaurantRecord,
    tags: &BTreeSet<String>,
) -> (f64, Vec<MatchSignal>) {
    let free_text: Vec<String> = record
        .free_text_fields()
        .iter()
        .map(|field| field.to_lowercase())
        .collect();

    let mut score = 0.0;
    let mut signals = Vec::new();
    for rule in AREA_RULES {
        let Some(keyword) = rule
            .keywords
            .iter()
            .find(|kw| contains_term(prompt, kw))
        else {
            continue;
        };
        let tag_hit = rule.tag.is_some_and(|tag| tags.contains(tag));
        let text_hit = free_text.iter().any(|field| contains_term(field, keyword));
        if tag_hit || text_hit {
            score += rule.weight;
            signals.push(MatchSignal::Area { label: rule.label });
        }
    }
    (score, signals)
}
