//! Relevance and geo-eligibility filtering for remote job postings.
//!
//! Board adapters hand the orchestrator normalized [`JobPosting`] values; this
//! crate decides which of them are worth alerting on and explains every
//! decision. Three engines cooperate:
//!
//! - [`JobFilter`] runs five ordered pass/fail gates (remote, region, title,
//!   stack, score) over a posting and produces a [`FilterOutcome`] with an
//!   auditable gate trace.
//! - [`LocationClassifier`] turns free-text locations into a closed
//!   [`LocationScope`] classification with the facts supporting it.
//! - [`GeoPolicyEngine`] applies the residency/region policy to a
//!   classification and yields an allow/deny [`GeoPolicyDecision`].
//!
//! All engines are immutable once constructed, perform no I/O, and are safe to
//! share across worker threads. Fetching, persistence, and alert delivery stay
//! with the orchestrator.

pub mod config;
pub mod domain;
pub mod filter;
pub mod geo;
pub mod telemetry;

mod text;

pub use config::{ConfigError, FilterConfig, GeoPolicyConfig};
pub use domain::JobPosting;
pub use filter::{
    FilterOutcome, Gate, GateTrace, JobFilter, KeywordMatches, ScoreBreakdown,
};
pub use geo::{
    GeoPolicyDecision, GeoPolicyEngine, LocationClassification, LocationClassifier, LocationScope,
};
