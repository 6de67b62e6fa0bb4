//! Recommendation engine: aggregate scorer outputs, filter, rank, truncate.

use std::cmp::Ordering;

use sofra_corpus::{RestaurantRecord, ScoreBreakdown, ScoredCandidate};

use crate::normalize::normalize;
use crate::score::{
    cuisine::score_cuisine, fallback::fallback_score, generate_explanation,
    location::score_location, overlap::score_overlap, price::score_price_fit, vibe::score_vibes,
    MatchSignal,
};

/// Minimum semantic score (total minus the fallback term) a candidate must
/// exceed to stay in the shortlist. Filtering on the semantic portion keeps
/// pure-fallback matches out regardless of corpus position; the weakest real
/// signal (a single 0.8 overlap hit) clears it comfortably.
pub const SCORE_FLOOR: f64 = 0.1;

/// Score one restaurant against an already-normalized prompt.
///
/// `position` is the record's zero-based index in the input corpus and only
/// feeds the deterministic fallback term.
#[must_use]
pub fn score_restaurant(
    normalized_prompt: &str,
    record: &RestaurantRecord,
    position: usize,
) -> ScoredCandidate {
    let tags = record.tags.flatten();

    let (price_fit, price_signal) = score_price_fit(normalized_prompt, record);
    let (vibe, vibe_signals) = score_vibes(normalized_prompt, &tags);
    let (cuisine, cuisine_signals) = score_cuisine(normalized_prompt, record);
    let (location, location_signals) = score_location(normalized_prompt, record, &tags);
    let (overlap, overlap_signal) = score_overlap(normalized_prompt, &record.short_description);
    let fallback = fallback_score(position);

    let mut signals: Vec<MatchSignal> = Vec::new();
    signals.extend(price_signal);
    signals.extend(vibe_signals);
    signals.extend(cuisine_signals);
    signals.extend(location_signals);
    signals.extend(overlap_signal);
    signals.push(MatchSignal::Fallback { position });

    let breakdown = ScoreBreakdown {
        price_fit,
        vibe,
        cuisine,
        location,
        overlap,
        fallback,
    };
    let match_reasons = signals
        .iter()
        .filter(|s| !s.is_fallback())
        .map(MatchSignal::label)
        .collect();
    let explanation = generate_explanation(&signals);

    ScoredCandidate {
        restaurant: record.clone(),
        score: breakdown.total(),
        breakdown,
        match_reasons,
        explanation: Some(explanation),
    }
}

/// Rank the corpus against a raw prompt and return at most `limit` candidates.
///
/// An empty (or whitespace-only) prompt means "no intent" and returns an
/// empty shortlist. If every candidate falls below the score floor but the
/// corpus is non-empty, the first `limit` records are returned in corpus
/// order so callers always have something to show.
#[must_use]
pub fn rank(prompt: &str, corpus: &[RestaurantRecord], limit: usize) -> Vec<ScoredCandidate> {
    let normalized = normalize(prompt);
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut candidates: Vec<ScoredCandidate> = corpus
        .iter()
        .enumerate()
        .map(|(position, record)| score_restaurant(&normalized, record, position))
        .collect();

    candidates.retain(|candidate| candidate.score - candidate.breakdown.fallback > SCORE_FLOOR);
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.restaurant.name.cmp(&b.restaurant.name))
    });
    candidates.truncate(limit);

    if candidates.is_empty() && !corpus.is_empty() {
        tracing::debug!(
            prompt = %normalized,
            corpus_len = corpus.len(),
            "no candidate cleared the score floor; returning corpus head unranked"
        );
        return corpus
            .iter()
            .enumerate()
            .take(limit)
            .map(|(position, record)| score_restaurant(&normalized, record, position))
            .collect();
    }

    candidates
}
