//! Vibe scoring: prompt keywords against the restaurant's tag set.

use std::collections::BTreeSet;

use super::MatchSignal;
use crate::normalize::contains_term;

/// Default contribution per fired vibe rule.
const VIBE_WEIGHT: f64 = 1.5;

struct VibeRule {
    label: &'static str,
    keywords: &'static [&'static str],
    tags: &'static [&'static str],
}

/// Keyword/tag pairs for the vibes the concierge understands. A rule fires
/// when the prompt mentions one of its keywords and the restaurant carries
/// one of its tags; multiple rules may fire and their contributions sum.
static VIBE_RULES: &[VibeRule] = &[
    VibeRule {
        label: "romantic",
        keywords: &["romantic", "date", "date night", "anniversary", "intimate"],
        tags: &["romantic", "intimate", "cozy"],
    },
    VibeRule {
        label: "family",
        keywords: &["family", "kids", "children", "child-friendly"],
        tags: &["family", "family-friendly", "kids"],
    },
    VibeRule {
        label: "heritage",
        keywords: &["traditional", "authentic", "national", "heritage"],
        tags: &["traditional", "heritage", "national"],
    },
    VibeRule {
        label: "tea-house",
        keywords: &["tea", "tea house", "chai", "backgammon", "nard", "dominoes"],
        tags: &["tea-house", "teahouse", "tea", "games"],
    },
    VibeRule {
        label: "hookah",
        keywords: &["hookah", "shisha", "nargile"],
        tags: &["hookah", "shisha"],
    },
    VibeRule {
        label: "live-music",
        keywords: &["live music", "music", "jazz", "nightlife", "dj", "band"],
        tags: &["live-music", "nightlife", "jazz", "bar"],
    },
    VibeRule {
        label: "waterfront",
        keywords: &["waterfront", "seaside", "sea view", "caspian", "by the sea"],
        tags: &["waterfront", "sea-view", "seaside"],
    },
    VibeRule {
        label: "rooftop",
        keywords: &["rooftop", "skyline", "terrace", "view"],
        tags: &["rooftop", "skyline", "terrace", "view"],
    },
    VibeRule {
        label: "garden",
        keywords: &["garden", "outdoor", "courtyard", "open air", "alfresco"],
        tags: &["garden", "outdoor", "courtyard"],
    },
    VibeRule {
        label: "old-city",
        keywords: &["old city", "icheri sheher", "icherisheher", "historic", "medieval"],
        tags: &["old-city", "historic"],
    },
    VibeRule {
        label: "steakhouse",
        keywords: &["steak", "steakhouse", "ribeye"],
        tags: &["steakhouse", "grill", "steak"],
    },
    VibeRule {
        label: "seafood",
        keywords: &["seafood", "fish", "oysters"],
        tags: &["seafood", "fish"],
    },
    VibeRule {
        label: "dessert",
        keywords: &["dessert", "sweets", "pastry", "cake", "baklava"],
        tags: &["dessert", "patisserie", "sweets"],
    },
    VibeRule {
        label: "wine",
        keywords: &["wine", "winery", "sommelier"],
        tags: &["wine", "wine-bar"],
    },
    VibeRule {
        label: "casual",
        keywords: &["casual", "relaxed", "laid back", "quick bite"],
        tags: &["casual", "cafe"],
    },
];

/// Score vibe matches between the normalized prompt and a flattened tag set.
#[must_use]
pub fn score_vibes(prompt: &str, tags: &BTreeSet<String>) -> (f64, Vec<MatchSignal>) {
    let mut score = 0.0;
    let mut signals = Vec::new();
    for rule in VIBE_RULES {
        let keyword_hit = rule.keywords.iter().any(|kw| contains_term(prompt, kw));
        if !keyword_hit {
            continue;
        }
        let tag_hit = rule.tags.iter().any(|tag| tags.contains(*tag));
        if tag_hit {
            score += VIBE_WEIGHT;
            signals.push(MatchSignal::Vibe { label: rule.label });
        }
    }
    (score, signals)
}
