//! Shared data model for the sofra concierge matching engine.
//!
//! This crate defines:
//! - Restaurant records and the flat/grouped tag variant used by every scorer
//! - Coarse price buckets (1-4) with the shared amount-to-bucket mapping
//! - Availability slots and selection targets for reservation matching
//! - Match results with provenance (`local` vs `remote`) and advisories
//! - Typed errors separating bad input data from upstream unavailability

pub mod error;
pub mod types;

pub use error::ConciergeError;
pub use types::{
    AvailabilitySlot, MatchResult, Mode, PriceBucket, RestaurantRecord, ScoreBreakdown,
    ScoredCandidate, SelectionTarget, Source, Tags,
};
