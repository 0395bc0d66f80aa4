//! The five-gate relevance pipeline.
//!
//! Gates run in a fixed order (remote, region, title, stack, score) and
//! short-circuit on the first failure; later gates are never evaluated for a
//! dropped posting, which is an observable contract, not an optimization:
//! the score breakdown must be absent when the stack gate fails.

mod gates;
mod report;
mod score;

#[cfg(test)]
mod tests;

pub use report::render_audit;
pub use score::ScoreBreakdown;

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::{ConfigError, FilterConfig, GeoPolicyConfig};
use crate::domain::JobPosting;
use crate::geo::GeoPolicyEngine;

/// Identifies one gate of the pipeline, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Gate {
    Remote,
    Region,
    Title,
    Stack,
    Score,
}

impl Gate {
    pub const fn label(self) -> &'static str {
        match self {
            Gate::Remote => "remote",
            Gate::Region => "region",
            Gate::Title => "title",
            Gate::Stack => "stack",
            Gate::Score => "score",
        }
    }
}

/// Pass/fail record for a gate that actually ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GateTrace {
    pub gate: Gate,
    pub passed: bool,
}

/// Keyword hits gathered for audit output. Populated only when explanation
/// is requested; never consulted by the gates themselves.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct KeywordMatches {
    pub stack_groups: Vec<String>,
    pub title_bonus: Vec<String>,
    pub keywords: Vec<String>,
}

/// Outcome of one pipeline evaluation for one posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOutcome {
    pub passed: bool,
    pub score: i32,
    /// Names the first failing gate and why, e.g. `"remote: contains remote
    /// negative"`. `None` when the posting passed.
    pub drop_reason: Option<String>,
    /// One entry per gate actually evaluated, in order.
    pub gates: Vec<GateTrace>,
    /// Present whenever the score gate ran, win or lose.
    pub breakdown: Option<ScoreBreakdown>,
    /// Present only when `explain` was requested.
    pub matches: Option<KeywordMatches>,
}

#[derive(Debug)]
enum RegionMode {
    /// Substring heuristic carried over from the legacy pipeline.
    Heuristic,
    /// Blocked-regions check first, then delegate to the geo policy engine.
    Policy(GeoPolicyEngine),
}

/// Multi-gate job filter with explainability.
///
/// Construction compiles the title regexes and fails fast on a malformed
/// pattern; after that, evaluation is total over arbitrary posting text.
#[derive(Debug)]
pub struct JobFilter {
    remote_positive: Vec<String>,
    remote_negative: Vec<String>,
    remote_anywhere: Vec<String>,
    allowed_regions: Vec<String>,
    blocked_regions: Vec<String>,
    title_allow: Vec<Regex>,
    title_block: Vec<Regex>,
    stack_groups: BTreeMap<String, Vec<String>>,
    min_stack_groups: usize,
    include_keywords: BTreeMap<String, i32>,
    title_bonus: BTreeMap<String, i32>,
    min_score: i32,
    require_remote: bool,
    region_mode: RegionMode,
}

impl JobFilter {
    /// Build a filter with the legacy heuristic region gate.
    pub fn new(config: FilterConfig) -> Result<Self, ConfigError> {
        Self::build(config, RegionMode::Heuristic)
    }

    /// Build a filter whose region gate delegates to [`GeoPolicyEngine`].
    ///
    /// This retires the residency-phrase heuristic: blocked regions keep
    /// priority, then the policy decision table governs. Stricter than
    /// [`JobFilter::new`] for region- and country-scoped listings.
    pub fn with_geo_policy(
        config: FilterConfig,
        policy: GeoPolicyConfig,
    ) -> Result<Self, ConfigError> {
        Self::build(config, RegionMode::Policy(GeoPolicyEngine::new(policy)))
    }

    fn build(config: FilterConfig, region_mode: RegionMode) -> Result<Self, ConfigError> {
        Ok(Self {
            remote_positive: lowercase_all(config.remote_positive),
            remote_negative: lowercase_all(config.remote_negative),
            remote_anywhere: lowercase_all(config.remote_anywhere_patterns),
            allowed_regions: lowercase_all(config.allowed_regions),
            blocked_regions: lowercase_all(config.blocked_regions),
            title_allow: compile_patterns(&config.title_allow_regex_any)?,
            title_block: compile_patterns(&config.title_block_regex_any)?,
            stack_groups: config.stack_groups,
            min_stack_groups: config.min_stack_groups,
            include_keywords: config.include_keywords,
            title_bonus: config.title_bonus,
            min_score: config.min_score,
            require_remote: config.require_remote,
            region_mode,
        })
    }

    /// Run the full pipeline over one posting.
    pub fn classify(&self, job: &JobPosting, explain: bool) -> FilterOutcome {
        let title = job.title.to_lowercase();
        let location = job.location.to_lowercase();
        let content = job.content_text.to_lowercase();
        let location_content = format!("{location} {content}");
        let full_text = format!("{title} {location} {content}");

        let mut gates = Vec::with_capacity(5);
        let mut matches = explain.then(KeywordMatches::default);

        let (passed, reason) = self.remote_gate(&location_content);
        gates.push(GateTrace {
            gate: Gate::Remote,
            passed,
        });
        if !passed {
            return self.drop_outcome(job, Gate::Remote, reason, gates, matches);
        }

        let (passed, reason) = match &self.region_mode {
            RegionMode::Heuristic => self.region_gate(&location_content),
            RegionMode::Policy(engine) => self.region_gate_policy(engine, job, &location_content),
        };
        gates.push(GateTrace {
            gate: Gate::Region,
            passed,
        });
        if !passed {
            return self.drop_outcome(job, Gate::Region, reason, gates, matches);
        }

        let (passed, reason) = self.title_gate(&title);
        gates.push(GateTrace {
            gate: Gate::Title,
            passed,
        });
        if !passed {
            return self.drop_outcome(job, Gate::Title, reason, gates, matches);
        }

        let (passed, reason, matched_groups) = self.stack_gate(&full_text);
        gates.push(GateTrace {
            gate: Gate::Stack,
            passed,
        });
        if let Some(matches) = matches.as_mut() {
            matches.stack_groups = matched_groups;
        }
        if !passed {
            return self.drop_outcome(job, Gate::Stack, reason, gates, matches);
        }

        let (breakdown, hits) = self.compute_score(&title, &content);
        let score = breakdown.total();
        if let Some(matches) = matches.as_mut() {
            matches.title_bonus = hits.title_bonus;
            matches.keywords = hits.keywords;
        }

        let passed = score >= self.min_score;
        gates.push(GateTrace {
            gate: Gate::Score,
            passed,
        });
        if !passed {
            let mut outcome = self.drop_outcome(
                job,
                Gate::Score,
                format!("{score} < min {}", self.min_score),
                gates,
                matches,
            );
            outcome.score = score;
            outcome.breakdown = Some(breakdown);
            return outcome;
        }

        FilterOutcome {
            passed: true,
            score,
            drop_reason: None,
            gates,
            breakdown: Some(breakdown),
            matches,
        }
    }

    /// Classify with explanation enabled and render the audit block.
    pub fn explain(&self, job: &JobPosting) -> String {
        let outcome = self.classify(job, true);
        render_audit(job, &outcome)
    }

    fn drop_outcome(
        &self,
        job: &JobPosting,
        gate: Gate,
        reason: String,
        gates: Vec<GateTrace>,
        matches: Option<KeywordMatches>,
    ) -> FilterOutcome {
        tracing::debug!(
            job = %job.dedup_key(),
            gate = gate.label(),
            %reason,
            "posting dropped"
        );
        FilterOutcome {
            passed: false,
            score: 0,
            drop_reason: Some(format!("{}: {reason}", gate.label())),
            gates,
            breakdown: None,
            matches,
        }
    }
}

fn lowercase_all(values: Vec<String>) -> Vec<String> {
    values.into_iter().map(|v| v.to_lowercase()).collect()
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| ConfigError::InvalidTitlePattern {
                    pattern: pattern.clone(),
                    source: Box::new(source),
                })
        })
        .collect()
}
