//! Description overlap scoring over a small fixed vocabulary.

use super::MatchSignal;
use crate::normalize::contains_term;

/// Contribution per vocabulary term present on both sides.
const OVERLAP_WEIGHT: f64 = 0.8;

/// Vocabulary groups; aliases within a group count once.
static OVERLAP_VOCAB: &[&[&str]] = &[
    &["waterfront"],
    &["garden"],
    &["rooftop"],
    &["brunch"],
    &["breakfast"],
    &["cocktail", "cocktails"],
    &["heritage"],
    &["seafood"],
    &["hookah", "shisha", "nargile"],
    &["tea", "tea house"],
    &["backgammon"],
    &["dominoes"],
    &["dessert", "desserts"],
];

/// Score vocabulary overlap between the prompt and the restaurant's
/// description. Adds `0.8` per overlapping vocabulary group.
#[must_use]
pub fn score_overlap(prompt: &str, description: &str) -> (f64, Option<MatchSignal>) {
    let description = description.to_lowercase();
    let mut terms = Vec::new();
    for group in OVERLAP_VOCAB {
        let in_prompt = group.iter().any(|term| contains_term(prompt, term));
        if !in_prompt {
            continue;
        }
        if let Some(term) = group
            .iter()
            .find(|term| contains_term(&description, term))
        {
            terms.push(*term);
        }
    }
    if terms.is_empty() {
        return (0.0, None);
    }
    let score = OVERLAP_WEIGHT * terms.len() as f64;
    (score, Some(MatchSignal::DescriptionOverlap { terms }))
}
