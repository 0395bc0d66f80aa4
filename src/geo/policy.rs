use serde::Serialize;

use super::classifier::{LocationClassification, LocationClassifier, LocationScope};
use crate::config::GeoPolicyConfig;

/// Countries treated as EU members when judging multi-country remote
/// listings.
const EU_COUNTRIES: &[&str] = &[
    "netherlands",
    "germany",
    "france",
    "spain",
    "portugal",
    "italy",
    "belgium",
    "austria",
    "poland",
    "sweden",
    "denmark",
    "finland",
    "ireland",
    "czech republic",
    "united kingdom",
];

/// Cues that widen a single-country listing into a region-wide one. Matched
/// against the raw location string only; an EMEA mention buried in the job
/// description does not count.
const BROADENING_CUES: &[&str] = &["emea", "europe", "european", " eu "];

/// Allow/deny verdict for one posting's location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeoPolicyDecision {
    pub allowed: bool,
    pub reason: String,
    pub classification: LocationClassification,
}

/// Applies the residency/region policy to classified locations.
///
/// The decision table is exhaustive over [`LocationScope`] and fail-closed:
/// anything ambiguous is denied with a reason naming the ambiguity.
#[derive(Debug, Clone)]
pub struct GeoPolicyEngine {
    config: GeoPolicyConfig,
    classifier: LocationClassifier,
}

impl GeoPolicyEngine {
    pub fn new(config: GeoPolicyConfig) -> Self {
        Self {
            config,
            classifier: LocationClassifier::new(),
        }
    }

    /// Classify the location and evaluate it in one step.
    pub fn check(&self, raw_location: &str, content: &str) -> GeoPolicyDecision {
        let classification = self.classifier.classify(raw_location, content);
        self.evaluate(classification, raw_location)
    }

    /// Run the decision table over an existing classification.
    pub fn evaluate(
        &self,
        classification: LocationClassification,
        raw_location: &str,
    ) -> GeoPolicyDecision {
        let (allowed, reason) = self.decide(&classification, raw_location);
        if !allowed {
            tracing::debug!(
                scope = classification.scope.label(),
                location = %classification.raw_norm,
                %reason,
                "geo policy denied posting"
            );
        }
        GeoPolicyDecision {
            allowed,
            reason,
            classification,
        }
    }

    fn decide(&self, loc: &LocationClassification, raw_location: &str) -> (bool, String) {
        match loc.scope {
            LocationScope::Hybrid => (false, "hybrid (not fully remote)".to_string()),
            LocationScope::Onsite => (false, "not remote".to_string()),
            LocationScope::RemoteRestricted => (
                false,
                "location restriction detected (city/state/only pattern)".to_string(),
            ),
            LocationScope::RemoteCountry => self.decide_country(loc, raw_location),
            LocationScope::RemoteRegion => {
                match loc
                    .regions
                    .iter()
                    .find(|region| self.config.allowed_regions.contains(*region))
                {
                    Some(region) => (true, format!("allowed region: {region}")),
                    None => (
                        false,
                        format!("region not allowed: {}", join(&loc.regions)),
                    ),
                }
            }
            LocationScope::RemoteGlobal => {
                if self.config.allow_worldwide_remote {
                    (true, "worldwide remote (work from anywhere)".to_string())
                } else {
                    (false, "worldwide remote (blocked by policy)".to_string())
                }
            }
            LocationScope::RemoteUnknown => {
                (false, "ambiguous remote (no region specified)".to_string())
            }
        }
    }

    /// Country-scoped listings default to deny: a single named country almost
    /// always means a residency requirement unless the location itself says
    /// the role is region-wide.
    fn decide_country(&self, loc: &LocationClassification, raw_location: &str) -> (bool, String) {
        if let Some(blocked) = loc
            .countries
            .iter()
            .find(|country| self.config.blocked_countries.contains(*country))
        {
            return (false, format!("blocked country: {blocked}"));
        }

        if loc.countries.len() == 1 {
            let country = loc
                .countries
                .iter()
                .next()
                .map(String::as_str)
                .unwrap_or_default();
            let raw_lower = raw_location.to_lowercase();
            if BROADENING_CUES.iter().any(|cue| raw_lower.contains(cue)) {
                return (true, format!("single country with region-wide context: {country}"));
            }
            return (
                false,
                format!("single-country remote (residency likely required): {country}"),
            );
        }

        if loc
            .countries
            .iter()
            .any(|country| EU_COUNTRIES.contains(&country.as_str()))
        {
            return (
                true,
                format!("multi-country eu remote: {}", join(&loc.countries)),
            );
        }

        (false, format!("unknown countries: {}", join(&loc.countries)))
    }
}

fn join(values: &std::collections::BTreeSet<String>) -> String {
    values.iter().cloned().collect::<Vec<_>>().join(", ")
}
