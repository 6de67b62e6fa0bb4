//! Reservation availability utilities for the sofra concierge.
//!
//! Exact slot lookup for a (date, time, timezone) triple and proximity
//! ranking of slots around a target instant. All functions are pure: slot
//! lists are read-only inputs and any ordering happens on a derived copy.

pub mod slots;

pub use slots::{find_slot_for_time, resolve_target, suggested_slots};
