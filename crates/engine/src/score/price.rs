//! Price-fit scoring: infer a budget bucket from the prompt and reward
//! restaurants whose price tier sits close to it.

use std::sync::LazyLock;

use regex::Regex;
use sofra_corpus::{PriceBucket, RestaurantRecord};

use super::MatchSignal;
use crate::normalize::contains_term;

/// Score for an exact bucket match.
const PRICE_FIT_MAX: f64 = 2.5;
/// Penalty per bucket of distance; decays to zero at roughly two buckets.
const BUCKET_DISTANCE_PENALTY: f64 = 1.2;

/// Negated phrasing that contradicts the naive keyword table, so it is
/// checked first: "not too expensive" must not read as "expensive".
static PHRASE_OVERRIDES: LazyLock<Vec<(Regex, u8)>> = LazyLock::new(|| {
    vec![
        (
            Regex::new(r"not\s+(?:too|that|very)\s+(?:expensive|pricey|fancy)").unwrap(),
            2,
        ),
        (Regex::new(r"not\s+(?:too\s+)?cheap").unwrap(), 3),
        (Regex::new(r"nothing\s+(?:too\s+)?fancy").unwrap(), 2),
    ]
});

/// "under/below/max N" style explicit budget ceilings.
static BUDGET_LIMIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:under|below|less\s+than|max(?:imum)?|up\s+to|at\s+most)\s*(\d{1,5})").unwrap()
});

/// "N-M" budget ranges; the upper bound wins.
static BUDGET_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,5})\s*(?:-|–|to)\s*(\d{1,5})").unwrap());

/// A standalone number, only trusted as a budget behind the currency gate.
static BARE_AMOUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{1,5})\b").unwrap());

/// Currency context required before a bare number is read as a budget;
/// without it "table for 2" or "2 people" would turn into price intent.
static CURRENCY_CONTEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"azn|manat|₼|\$|price|budget|spend|per\s+person|\bpp\b").unwrap()
});

/// Keyword fallback when no phrasing or number gave a bucket.
static KEYWORD_BUCKETS: &[(&str, u8)] = &[
    ("cheap", 1),
    ("budget", 1),
    ("affordable", 1),
    ("inexpensive", 1),
    ("wallet-friendly", 1),
    ("wallet friendly", 1),
    ("moderate", 2),
    ("mid-range", 2),
    ("midrange", 2),
    ("reasonable", 2),
    ("upscale", 3),
    ("fancy", 3),
    ("stylish", 3),
    ("luxury", 4),
    ("luxurious", 4),
    ("splurge", 4),
    ("fine dining", 4),
    ("high-end", 4),
    ("expensive", 4),
];

/// Infer the desired price bucket from a normalized prompt, if any.
///
/// Priority order: phrase overrides, explicit budget ceilings, gated
/// ranges/bare amounts, then the keyword table. Returns `None` when no
/// price intent is expressed.
#[must_use]
pub fn detect_price_preference(prompt: &str) -> Option<PriceBucket> {
    for (pattern, bucket) in PHRASE_OVERRIDES.iter() {
        if pattern.is_match(prompt) {
            return Some(PriceBucket::new(*bucket));
        }
    }

    if let Some(caps) = BUDGET_LIMIT.captures(prompt) {
        if let Ok(amount) = caps[1].parse::<f64>() {
            return Some(PriceBucket::from_amount(amount));
        }
    }

    if CURRENCY_CONTEXT.is_match(prompt) {
        if let Some(caps) = BUDGET_RANGE.captures(prompt) {
            if let Ok(upper) = caps[2].parse::<f64>() {
                return Some(PriceBucket::from_amount(upper));
            }
        }
        if let Some(caps) = BARE_AMOUNT.captures(prompt) {
            if let Ok(amount) = caps[1].parse::<f64>() {
                return Some(PriceBucket::from_amount(amount));
            }
        }
    }

    for (keyword, bucket) in KEYWORD_BUCKETS {
        if contains_term(prompt, keyword) {
            return Some(PriceBucket::new(*bucket));
        }
    }

    None
}

/// Score the restaurant's price tier against the prompt's inferred budget.
///
/// No detected preference contributes zero; it is not an error.
#[must_use]
pub fn score_price_fit(prompt: &str, record: &RestaurantRecord) -> (f64, Option<MatchSignal>) {
    let Some(preference) = detect_price_preference(prompt) else {
        return (0.0, None);
    };
    let restaurant = record.price_bucket();
    let distance = f64::from(preference.distance(restaurant));
    let score = (PRICE_FIT_MAX - distance * BUCKET_DISTANCE_PENALTY).max(0.0);
    (
        score,
        Some(MatchSignal::PriceFit {
            preference,
            restaurant,
        }),
    )
}
