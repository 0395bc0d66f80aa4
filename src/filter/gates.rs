use super::JobFilter;
use crate::domain::JobPosting;
use crate::geo::GeoPolicyEngine;
use crate::text::token_set;

/// Phrases implying eligibility is limited to candidates in a named place.
const RESIDENCY_CUES: &[&str] = &[
    "must be located in",
    "must be based in",
    "must reside in",
    "only candidates located in",
    "only within",
    "must be in",
];

impl JobFilter {
    /// Remote gate over `location + content`: anywhere-cues pass outright,
    /// negative cues veto positive ones, and absence of any cue falls back
    /// to the `require_remote` default.
    pub(super) fn remote_gate(&self, text: &str) -> (bool, String) {
        if let Some(pattern) = self
            .remote_anywhere
            .iter()
            .find(|pattern| text.contains(pattern.as_str()))
        {
            return (true, format!("remote anywhere: '{pattern}'"));
        }

        let has_positive = self
            .remote_positive
            .iter()
            .any(|pattern| text.contains(pattern.as_str()));
        let has_negative = self
            .remote_negative
            .iter()
            .any(|pattern| text.contains(pattern.as_str()));

        if has_negative {
            return (false, "contains remote negative".to_string());
        }
        if has_positive {
            return (true, "contains remote positive".to_string());
        }
        if self.require_remote {
            return (false, "no remote keywords (require_remote=true)".to_string());
        }
        (true, "remote not required".to_string())
    }

    /// Legacy region gate. The blocklist always applies, even when an allowed
    /// term also matches; the allowlist is only consulted when a residency
    /// phrase shows up.
    pub(super) fn region_gate(&self, text: &str) -> (bool, String) {
        if let Some(region) = self
            .blocked_regions
            .iter()
            .find(|region| text.contains(region.as_str()))
        {
            return (false, format!("blocked region: '{region}'"));
        }

        let restricted = RESIDENCY_CUES.iter().any(|cue| text.contains(cue));
        if restricted {
            if let Some(region) = self
                .allowed_regions
                .iter()
                .find(|region| text.contains(region.as_str()))
            {
                return (true, format!("allowed region: '{region}'"));
            }
            return (false, "unknown region restriction (strict)".to_string());
        }

        (true, "no region restriction".to_string())
    }

    /// Redesigned region gate: blocklist priority is preserved, then the geo
    /// policy decision table governs instead of the residency-phrase
    /// heuristic.
    pub(super) fn region_gate_policy(
        &self,
        engine: &GeoPolicyEngine,
        job: &JobPosting,
        text: &str,
    ) -> (bool, String) {
        if let Some(region) = self
            .blocked_regions
            .iter()
            .find(|region| text.contains(region.as_str()))
        {
            return (false, format!("blocked region: '{region}'"));
        }

        let decision = engine.check(&job.location, &job.content_text);
        (decision.allowed, decision.reason)
    }

    /// Title gate over the title alone: block patterns first, then allow
    /// patterns, default deny.
    pub(super) fn title_gate(&self, title: &str) -> (bool, String) {
        if let Some(pattern) = self.title_block.iter().find(|p| p.is_match(title)) {
            return (false, format!("blocked: '{}'", pattern.as_str()));
        }
        if let Some(pattern) = self.title_allow.iter().find(|p| p.is_match(title)) {
            return (true, format!("allowed: '{}'", pattern.as_str()));
        }
        (false, "no allowed title pattern".to_string())
    }

    /// Stack gate: a group matches when any of its keywords is found, and
    /// enough distinct groups must match. Matched names are returned so the
    /// caller can record them win or lose.
    pub(super) fn stack_gate(&self, full_text: &str) -> (bool, String, Vec<String>) {
        let tokens = token_set(full_text);

        let matched: Vec<String> = self
            .stack_groups
            .iter()
            .filter(|(_, keywords)| group_matches(keywords, &tokens, full_text))
            .map(|(name, _)| name.clone())
            .collect();

        if matched.len() >= self.min_stack_groups {
            let reason = format!("{}/{} groups", matched.len(), self.stack_groups.len());
            (true, reason, matched)
        } else {
            let reason = format!("only {}/{} groups", matched.len(), self.min_stack_groups);
            (false, reason, matched)
        }
    }
}

/// Multi-word keywords match as substrings of the full text; single words
/// must appear as a standalone token.
fn group_matches(
    keywords: &[String],
    tokens: &std::collections::HashSet<&str>,
    text: &str,
) -> bool {
    keywords.iter().any(|keyword| {
        let keyword = keyword.to_lowercase();
        if keyword.contains(' ') {
            text.contains(&keyword)
        } else {
            tokens.contains(keyword.as_str())
        }
    })
}
