use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Gate pipeline configuration.
///
/// Every key is optional in the JSON source; missing keys fall back to the
/// documented defaults and unrecognized keys are ignored. Keyword tables use
/// ordered maps so repeated evaluation of the same posting is bit-identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Substring cues that mark a posting as remote.
    pub remote_positive: Vec<String>,
    /// Substring cues that veto remoteness even when a positive cue matches.
    pub remote_negative: Vec<String>,
    /// Cues that short-circuit the remote gate to a pass.
    pub remote_anywhere_patterns: Vec<String>,
    pub allowed_regions: Vec<String>,
    pub blocked_regions: Vec<String>,
    /// Case-insensitive regexes; any match passes the title gate.
    pub title_allow_regex_any: Vec<String>,
    /// Case-insensitive regexes; any match fails the title gate.
    pub title_block_regex_any: Vec<String>,
    /// Named bundles of technology keywords used as a relevance proxy.
    pub stack_groups: BTreeMap<String, Vec<String>>,
    pub min_stack_groups: usize,
    /// Keyword -> weight table summed into the score.
    pub include_keywords: BTreeMap<String, i32>,
    /// Keyword -> weight table applied to the title only.
    pub title_bonus: BTreeMap<String, i32>,
    pub min_score: i32,
    pub require_remote: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            remote_positive: Vec::new(),
            remote_negative: Vec::new(),
            remote_anywhere_patterns: Vec::new(),
            allowed_regions: Vec::new(),
            blocked_regions: Vec::new(),
            title_allow_regex_any: Vec::new(),
            title_block_regex_any: Vec::new(),
            stack_groups: BTreeMap::new(),
            min_stack_groups: 2,
            include_keywords: BTreeMap::new(),
            title_bonus: BTreeMap::new(),
            min_score: 10,
            require_remote: true,
        }
    }
}

impl FilterConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(ConfigError::Parse)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&read_config(path.as_ref())?)
    }
}

/// Residency/region policy backing the geo decision table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoPolicyConfig {
    /// Regions an explicitly region-scoped remote listing may target.
    pub allowed_regions: BTreeSet<String>,
    /// Countries denied outright regardless of other signals.
    pub blocked_countries: BTreeSet<String>,
    pub allow_worldwide_remote: bool,
    /// Reserved dial; ambiguous remote listings are denied regardless today.
    pub allow_unknown_remote: bool,
}

impl Default for GeoPolicyConfig {
    fn default() -> Self {
        Self {
            allowed_regions: BTreeSet::new(),
            blocked_countries: BTreeSet::new(),
            allow_worldwide_remote: false,
            allow_unknown_remote: false,
        }
    }
}

impl GeoPolicyConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(ConfigError::Parse)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&read_config(path.as_ref())?)
    }
}

fn read_config(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Construction-time configuration failures.
///
/// Malformed title regexes surface here exactly once, when the filter is
/// built, never per posting.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config JSON")]
    Parse(#[source] serde_json::Error),
    #[error("invalid title pattern '{pattern}'")]
    InvalidTitlePattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },
}
