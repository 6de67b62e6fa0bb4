//! Deterministic on-device scoring and ranking for the sofra concierge.
//!
//! This crate provides:
//! - Prompt normalization (lowercase + trim, nothing else)
//! - Six pure signal scorers (price fit, vibe tags, cuisine, location,
//!   description overlap, corpus-position fallback)
//! - The recommendation engine that aggregates, filters, ranks, and truncates
//!
//! Everything here is synchronous and free of shared mutable state; identical
//! `(prompt, corpus, limit)` inputs always produce identical output.

pub mod engine;
pub mod normalize;
pub mod score;

pub use engine::{rank, score_restaurant, SCORE_FLOOR};
pub use normalize::{contains_term, normalize};
pub use score::{generate_explanation, MatchSignal};
