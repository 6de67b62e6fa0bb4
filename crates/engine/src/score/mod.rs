//! Pure signal scorers over a normalized prompt and one restaurant.

pub mod cuisine;
mod explain;
pub mod fallback;
pub mod location;
pub mod overlap;
pub mod price;
pub mod vibe;

pub use explain::generate_explanation;

use sofra_corpus::PriceBucket;

/// Signals that contributed to a candidate's score.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchSignal {
    /// Prompt expressed a price preference near the restaurant's bucket.
    PriceFit {
        /// Bucket inferred from the prompt.
        preference: PriceBucket,
        /// Bucket derived from the restaurant's price hints.
        restaurant: PriceBucket,
    },
    /// A vibe keyword matched one of the restaurant's tags.
    Vibe {
        /// Vibe rule label (e.g., "romantic", "rooftop").
        label: &'static str,
    },
    /// The prompt asked for a cuisine the restaurant serves.
    Cuisine {
        /// Cuisine key (e.g., "italian").
        key: &'static str,
    },
    /// The prompt named a notable area the restaurant belongs to.
    Area {
        /// Area rule label (e.g., "old city").
        label: &'static str,
    },
    /// Shared vocabulary between prompt and description.
    DescriptionOverlap {
        /// The vocabulary terms present on both sides.
        terms: Vec<&'static str>,
    },
    /// Deterministic corpus-position tie-breaker; fires for every record.
    Fallback {
        /// Zero-based position in the input corpus.
        position: usize,
    },
}

impl MatchSignal {
    /// Get a short label for this signal.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::PriceFit { .. } => "price-fit".to_string(),
            Self::Vibe { label } => format!("vibe:{label}"),
            Self::Cuisine { key } => format!("cuisine:{key}"),
            Self::Area { label } => format!("area:{label}"),
            Self::DescriptionOverlap { .. } => "description-overlap".to_string(),
            Self::Fallback { .. } => "fallback".to_string(),
        }
    }

    /// True for the corpus-position signal that carries no semantic intent.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}
