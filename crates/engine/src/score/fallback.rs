//! Deterministic corpus-position fallback score.

/// Base value for the first corpus entry.
const FALLBACK_BASE: f64 = 0.2;
/// Decrement per corpus position.
const FALLBACK_STEP: f64 = 0.001;

/// Tiny strictly-decreasing score from the record's corpus position.
///
/// Guarantees a strict total ordering even when no semantic signal fires
/// for anyone. Positive for the first 200 positions, clamped to zero past
/// that so scores stay non-negative.
#[must_use]
pub fn fallback_score(position: usize) -> f64 {
    (FALLBACK_BASE - position as f64 * FALLBACK_STEP).max(0.0)
}
