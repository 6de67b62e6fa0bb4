//! Hybrid local/remote match orchestration for the sofra concierge.
//!
//! This crate owns the routing policy between the remote recommendation
//! service and the on-device scoring engine:
//! - Remote-first routing in `remote`/`ab` mode with local fallback on
//!   failure or empty answers; local-only routing in `local` mode
//! - A staleness guard that discards late remote answers once a newer
//!   prompt has been submitted
//! - Corpus-change reactivity: local-sourced results are re-ranked when the
//!   corpus changes, without a new remote call
//! - An explicit single-slot response cache replacing module-global state

pub mod cache;
pub mod orchestrator;
pub mod remote;

pub use cache::{CacheLookup, ResponseCache};
pub use orchestrator::{HybridOrchestrator, OrchestratorConfig, QueryState};
pub use remote::{Lang, MatchRequest, MatchResponse, RemoteClient, WireMode, DEFAULT_BASE_URL};
