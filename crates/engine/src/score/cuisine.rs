//! Cuisine scoring: fires only when the restaurant lists the cuisine and
//! the prompt asks for it.

use sofra_corpus::RestaurantRecord;

use super::MatchSignal;
use crate::normalize::contains_term;

/// Contribution for a cuisine the prompt asked for.
const CUISINE_WEIGHT: f64 = 1.4;

/// Cuisine key to prompt keywords. Unlike vibe rules, both sides are strict:
/// the restaurant's cuisine list must contain the key itself.
static CUISINE_RULES: &[(&str, &[&str])] = &[
    (
        "azerbaijani",
        &["azerbaijani", "azeri", "plov", "dolma", "qutab", "national cuisine"],
    ),
    ("italian", &["italian", "pasta", "pizza", "trattoria", "risotto"]),
    ("japanese", &["japanese", "sushi", "ramen", "izakaya"]),
    ("georgian", &["georgian", "khachapuri", "khinkali"]),
    ("turkish", &["turkish", "kebab", "meze", "pide"]),
    ("french", &["french", "bistro", "brasserie"]),
    ("indian", &["indian", "curry", "tandoori"]),
    ("chinese", &["chinese", "dim sum", "noodles"]),
    ("seafood", &["seafood", "fish", "oysters"]),
    ("steakhouse", &["steak", "steakhouse", "ribeye"]),
    ("mediterranean", &["mediterranean", "mezze", "greek"]),
];

/// Score cuisine matches for one restaurant.
#[must_use]
pub fn score_cuisine(prompt: &str, record: &RestaurantRecord) -> (f64, Vec<MatchSignal>) {
    let mut score = 0.0;
    let mut signals = Vec::new();
    for (key, keywords) in CUISINE_RULES {
        let serves = record
            .cuisine
            .iter()
            .any(|cuisine| cuisine.eq_ignore_ascii_case(key));
        if !serves {
            continue;
        }
        if keywords.iter().any(|kw| contains_term(prompt, kw)) {
            score += CUISINE_WEIGHT;
            signals.push(MatchSignal::Cuisine { key });
        }
    }
    (score, signals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sofra_corpus::Tags;

    fn record_with_cuisine(cuisines: &[&str]) -> RestaurantRecord {
        RestaurantRecord {
            id: "r1".to_string(),
            slug: None,
            name: "Test".to_string(),
            cuisine: cuisines.iter().map(|c| c.to_string()).collect(),
            tags: Tags::default(),
            price_level: None,
            average_spend: None,
            short_description: String::new(),
            city: String::new(),
            neighborhood: String::new(),
            address: String::new(),
        }
    }

    #[test]
    fn test_both_sides_required() {
        let italian = record_with_cuisine(&["Italian"]);
        let (score, signals) = score_cuisine("fresh pasta tonight", &italian);
        assert!((score - CUISINE_WEIGHT).abs() < 1e-9);
        assert_eq!(signals, vec![MatchSignal::Cuisine { key: "italian" }]);

        // Prompt asks for pasta but the restaurant is not italian.
        let georgian = record_with_cuisine(&["Georgian"]);
        let (score, _) = score_cuisine("fresh pasta tonight", &georgian);
        assert_eq!(score, 0.0);

        // Restaurant is italian but the prompt never asked.
        let (score, _) = score_cuisine("somewhere quiet", &italian);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_cuisine_key_case_insensitive() {
        let record = record_with_cuisine(&["AZERBAIJANI"]);
        let (score, _) = score_cuisine("authentic plov", &record);
        assert!(score > 0.0);
    }

    #[test]
    fn test_multiple_cuisines_sum() {
        let record = record_with_cuisine(&["seafood", "japanese"]);
        let (score, signals) = score_cuisine("sushi and fresh fish", &record);
        assert!((score - 2.0 * CUISINE_WEIGHT).abs() < 1e-9);
        assert_eq!(signals.len(), 2);
    }
}
