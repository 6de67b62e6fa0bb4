//! Core types shared across the concierge engine crates.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::ConciergeError;

/// Coarse ordinal price tier clamped to the 1-4 range.
///
/// Bucket 1 is the cheapest tier, bucket 4 the most expensive. Both prompt
/// budgets and restaurant spend hints are mapped into the same bucket space
/// so the price-fit scorer can compare them by ordinal distance.
///
/// # Examples
///
/// ```
/// use sofra_corpus::PriceBucket;
///
/// let b = PriceBucket::new(3);
/// assert_eq!(b.value(), 3);
///
/// // Out-of-range values are clamped.
/// assert_eq!(PriceBucket::new(0).value(), 1);
/// assert_eq!(PriceBucket::new(9).value(), 4);
///
/// // Monotonic amount bucketing shared by prompt and record sides.
/// assert_eq!(PriceBucket::from_amount(35.0).value(), 1);
/// assert_eq!(PriceBucket::from_amount(150.0).value(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceBucket(u8);

impl PriceBucket {
    /// Create a bucket, clamping the value into `1..=4`.
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 4))
    }

    /// Get the inner tier value (always in `1..=4`).
    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Map a monetary amount into a bucket: <=40 -> 1, <=70 -> 2, <=100 -> 3,
    /// else 4. Monotonic in the amount.
    #[must_use]
    pub fn from_amount(amount: f64) -> Self {
        if amount <= 40.0 {
            Self(1)
        } else if amount <= 70.0 {
            Self(2)
        } else if amount <= 100.0 {
            Self(3)
        } else {
            Self(4)
        }
    }

    /// Ordinal distance between two buckets.
    #[must_use]
    pub fn distance(&self, other: PriceBucket) -> u8 {
        self.0.abs_diff(other.0)
    }
}

impl Default for PriceBucket {
    fn default() -> Self {
        Self(2)
    }
}

/// Restaurant tags, either a flat set or grouped by category.
///
/// Both shapes appear in corpus payloads; scorers only ever consume the
/// flattened form via [`Tags::flatten`], so the shape is branched on exactly
/// once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tags {
    /// A flat set of tag labels.
    Flat(BTreeSet<String>),
    /// Tags grouped by category name.
    Grouped(BTreeMap<String, BTreeSet<String>>),
}

impl Tags {
    /// Flatten to a single lowercased tag set, regardless of shape.
    #[must_use]
    pub fn flatten(&self) -> BTreeSet<String> {
        match self {
            Tags::Flat(tags) => tags.iter().map(|t| t.to_lowercase()).collect(),
            Tags::Grouped(groups) => groups
                .values()
                .flat_map(|tags| tags.iter().map(|t| t.to_lowercase()))
                .collect(),
        }
    }

    /// True when no tags are present in either shape.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Tags::Flat(tags) => tags.is_empty(),
            Tags::Grouped(groups) => groups.values().all(|tags| tags.is_empty()),
        }
    }
}

impl Default for Tags {
    fn default() -> Self {
        Tags::Flat(BTreeSet::new())
    }
}

/// Immutable snapshot of one restaurant in the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    /// Stable identifier.
    pub id: String,
    /// Optional URL slug; preferred over `id` for provenance keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Display name.
    pub name: String,
    /// Cuisine labels (e.g., "italian", "azerbaijani").
    #[serde(default)]
    pub cuisine: Vec<String>,
    /// Flat or grouped tag set.
    #[serde(default)]
    pub tags: Tags,
    /// Free-text price tier hint (e.g., "3" or "mid-range").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_level: Option<String>,
    /// Free-text average spend hint (e.g., "45 AZN per person").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_spend: Option<String>,
    /// Short marketing description.
    #[serde(default)]
    pub short_description: String,
    /// City name.
    #[serde(default)]
    pub city: String,
    /// Neighborhood name.
    #[serde(default)]
    pub neighborhood: String,
    /// Street address.
    #[serde(default)]
    pub address: String,
}

impl RestaurantRecord {
    /// Lowercased slug-or-id key used for remote provenance maps.
    #[must_use]
    pub fn key(&self) -> String {
        self.slug
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.id)
            .to_lowercase()
    }

    /// Free-text fields searched by the location scorer.
    #[must_use]
    pub fn free_text_fields(&self) -> [&str; 4] {
        [
            &self.short_description,
            &self.city,
            &self.neighborhood,
            &self.address,
        ]
    }

    /// Derive the record's price bucket from its price hints.
    ///
    /// A standalone digit 1-4 is taken as the tier directly; otherwise the
    /// first numeric amount goes through [`PriceBucket::from_amount`]; with no
    /// numeric hint at all the record defaults to bucket 2.
    #[must_use]
    pub fn price_bucket(&self) -> PriceBucket {
        for hint in [self.price_level.as_deref(), self.average_spend.as_deref()]
            .into_iter()
            .flatten()
        {
            if let Some(bucket) = bucket_from_hint(hint) {
                return bucket;
            }
        }
        PriceBucket::default()
    }

    /// Reject records that cannot be keyed or displayed.
    pub fn validate(&self) -> Result<(), ConciergeError> {
        if self.id.trim().is_empty() {
            return Err(ConciergeError::BadRecord {
                reason: format!("restaurant '{}' is missing an id", self.name),
            });
        }
        Ok(())
    }
}

/// Parse a price hint string into a bucket, if it carries a numeric signal.
fn bucket_from_hint(hint: &str) -> Option<PriceBucket> {
    let digits: String = hint
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if digits.is_empty() {
        return None;
    }
    if digits.len() == 1 {
        if let Some(tier @ 1..=4) = digits.chars().next().and_then(|c| c.to_digit(10)) {
            return Some(PriceBucket::new(tier as u8));
        }
    }
    digits.parse::<f64>().ok().map(PriceBucket::from_amount)
}

/// Provenance of a settled result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Produced by the on-device heuristic engine.
    Local,
    /// Produced by the remote recommendation service.
    Remote,
}

impl Source {
    /// Stable label for logs and UI disclosure.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Source::Local => "local",
            Source::Remote => "remote",
        }
    }
}

/// Routing policy for the hybrid orchestrator. Immutable per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Never call the remote service.
    Local,
    /// Prefer the remote service, falling back to local scoring.
    Remote,
    /// A/B experiment arm; routes like `Remote`.
    Ab,
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Mode::Local),
            "remote" => Ok(Mode::Remote),
            "ab" => Ok(Mode::Ab),
            other => Err(format!("unknown mode '{other}' (expected local|remote|ab)")),
        }
    }
}

/// Per-signal contributions behind a candidate's total score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Contribution from price bucket proximity.
    pub price_fit: f64,
    /// Contribution from vibe keyword/tag matches.
    pub vibe: f64,
    /// Contribution from cuisine matches.
    pub cuisine: f64,
    /// Contribution from notable-area matches.
    pub location: f64,
    /// Contribution from description vocabulary overlap.
    pub overlap: f64,
    /// Deterministic corpus-position tie-breaker.
    pub fallback: f64,
}

impl ScoreBreakdown {
    /// Total score across all signals.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.price_fit + self.vibe + self.cuisine + self.location + self.overlap + self.fallback
    }
}

/// One scored restaurant in a ranked shortlist. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// The matched restaurant.
    pub restaurant: RestaurantRecord,
    /// Non-negative combined score.
    pub score: f64,
    /// Per-signal contributions.
    #[serde(default)]
    pub breakdown: ScoreBreakdown,
    /// Short labels for the signals or remote reasons that fired.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub match_reasons: Vec<String>,
    /// Human-readable explanation, when one is available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// A settled shortlist with provenance and an optional advisory for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Ranked candidates, best first.
    pub candidates: Vec<ScoredCandidate>,
    /// Where the candidates came from.
    pub source: Source,
    /// Human-readable note about degraded or offline operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
}

/// A bookable interval for one restaurant. Provided externally, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    /// Interval start (absolute instant).
    pub start: chrono::DateTime<chrono::Utc>,
    /// Interval end (absolute instant, after `start`).
    pub end: chrono::DateTime<chrono::Utc>,
    /// Number of tables still available.
    pub count: u32,
    /// Identifiers of the available tables.
    #[serde(default)]
    pub available_table_ids: Vec<String>,
}

/// A user-chosen reservation target, resolved in a caller-supplied zone.
///
/// All three fields stay as strings until resolution; malformed values are
/// treated as "no match" by the slot locator, never as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionTarget {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Time of day, `HH:MM`.
    pub time: String,
    /// IANA zone identifier (e.g., "Asia/Baku").
    pub timezone: String,
}
