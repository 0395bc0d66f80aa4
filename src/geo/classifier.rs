use std::collections::BTreeSet;

use regex::Regex;
use serde::Serialize;

use crate::text::word_tokens;

/// Substring cues marking a posting as remote-friendly.
const REMOTE_POSITIVE_CUES: &[&str] = &[
    "remote",
    "distributed",
    "work from home",
    "home based",
    "remote-first",
    "work from anywhere",
];

/// Cues pointing at hybrid or in-office arrangements. A remote cue alongside
/// one of these still classifies as remote.
const HYBRID_ONSITE_CUES: &[&str] = &["hybrid", "on-site", "onsite", "in-office", "office-based"];

/// Cues that widen a remote listing to the whole world.
const WORLDWIDE_CUES: &[&str] = &[
    "worldwide",
    "work from anywhere",
    "global remote",
    "remote worldwide",
    "home based - worldwide",
    "home based worldwide",
    "remote (global)",
    "remote global",
];

/// Regex cues implying eligibility is limited to a named place, e.g.
/// "Remote (US only)" or "Remote (Seattle, WA only)".
const RESTRICTION_CUES: &[&str] = &[
    r"remote\s*\([^)]*only\)",
    r"remote\s*\([^)]*within\)",
    r"remote\s*within",
    r"must be located in",
    r"must be based in",
    r"must reside in",
    r"only candidates located in",
    r"only within",
    r"remote\s*\([^)]*,\s*\w{2}\s*only\)",
];

/// Country cue sets. Cues with embedded spaces or punctuation avoid matching
/// inside unrelated words ("us " vs "clusters").
const COUNTRY_CUES: &[(&str, &[&str])] = &[
    (
        "united states",
        &["united states", "usa", "u.s.", "us ", " us,", " us)", "america"],
    ),
    ("canada", &["canada", "canadian"]),
    ("australia", &["australia", "australian"]),
    ("new zealand", &["new zealand", "nz"]),
    (
        "united kingdom",
        &["united kingdom", "uk", "u.k.", "great britain"],
    ),
    ("ireland", &["ireland", "irish"]),
    ("netherlands", &["netherlands", "dutch", "amsterdam"]),
    ("germany", &["germany", "german", "berlin", "munich"]),
    ("france", &["france", "french", "paris"]),
    ("spain", &["spain", "spanish", "madrid", "barcelona"]),
    ("portugal", &["portugal", "portuguese", "lisbon"]),
    ("italy", &["italy", "italian", "rome", "milan"]),
    ("sweden", &["sweden", "swedish", "stockholm"]),
    ("norway", &["norway", "norwegian", "oslo"]),
    ("denmark", &["denmark", "danish", "copenhagen"]),
    ("finland", &["finland", "finnish", "helsinki"]),
    ("poland", &["poland", "polish", "warsaw"]),
    ("belgium", &["belgium", "belgian", "brussels"]),
    ("austria", &["austria", "austrian", "vienna"]),
    ("switzerland", &["switzerland", "swiss", "zurich"]),
    ("czech republic", &["czech republic", "czech", "prague"]),
];

const REGION_CUES: &[(&str, &[&str])] = &[
    ("europe", &["europe", "european"]),
    ("emea", &["emea"]),
    ("eu", &[" eu ", " eu,", " eu)", "european union"]),
    ("americas", &["americas"]),
    ("apac", &["apac", "asia pacific"]),
    ("north america", &["north america"]),
];

/// US state tokens (postal codes and full names) treated as residency signals
/// when they appear as standalone words.
const US_STATE_TOKENS: &[&str] = &[
    "wa", "washington", "ca", "california", "ny", "new york", "tx", "texas", "fl", "florida",
    "il", "illinois", "pa", "pennsylvania", "oh", "ohio", "ga", "georgia", "nc",
    "north carolina", "mi", "michigan", "nj", "new jersey", "va", "virginia", "ma",
    "massachusetts", "az", "arizona", "tn", "tennessee", "in", "indiana", "mo", "missouri",
    "md", "maryland", "wi", "wisconsin", "co", "colorado", "mn", "minnesota", "sc",
    "south carolina", "al", "alabama", "la", "louisiana", "ky", "kentucky", "or", "oregon",
    "ok", "oklahoma", "ct", "connecticut", "ut", "utah", "ia", "iowa", "nv", "nevada", "ar",
    "arkansas", "ms", "mississippi", "ks", "kansas", "nm", "new mexico",
];

/// Major US tech-hub cities. Two or more of these in one posting reads as a
/// city-restricted listing.
const US_HUB_CITIES: &[&str] = &[
    "seattle",
    "san francisco",
    "nyc",
    "new york city",
    "chicago",
    "boston",
    "austin",
    "atlanta",
    "denver",
    "portland",
    "los angeles",
    "san diego",
    "dallas",
    "houston",
    "miami",
    "phoenix",
    "philadelphia",
    "pittsburgh",
    "raleigh",
    "salt lake city",
    "minneapolis",
    "detroit",
    "tampa",
];

const CANADIAN_HUB_CITIES: &[&str] = &[
    "toronto", "vancouver", "montreal", "ottawa", "calgary", "edmonton",
];

const AUSTRALIAN_HUB_CITIES: &[&str] = &["sydney", "melbourne", "brisbane", "perth", "adelaide"];

/// Closed set of scopes a posting's location can classify into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationScope {
    Onsite,
    Hybrid,
    RemoteUnknown,
    RemoteGlobal,
    RemoteRegion,
    RemoteCountry,
    RemoteRestricted,
}

impl LocationScope {
    pub const fn label(self) -> &'static str {
        match self {
            LocationScope::Onsite => "onsite",
            LocationScope::Hybrid => "hybrid",
            LocationScope::RemoteUnknown => "remote_unknown",
            LocationScope::RemoteGlobal => "remote_global",
            LocationScope::RemoteRegion => "remote_region",
            LocationScope::RemoteCountry => "remote_country",
            LocationScope::RemoteRestricted => "remote_restricted",
        }
    }

    pub const fn is_remote(self) -> bool {
        !matches!(self, LocationScope::Onsite | LocationScope::Hybrid)
    }
}

/// Structured view of a location string, with the facts that drove the scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationClassification {
    pub remote: bool,
    pub scope: LocationScope,
    pub countries: BTreeSet<String>,
    pub regions: BTreeSet<String>,
    pub has_us_state: bool,
    pub has_city_restriction: bool,
    /// Trimmed, lower-cased copy of the raw location string.
    pub raw_norm: String,
}

impl LocationClassification {
    fn not_remote(scope: LocationScope, raw_norm: String) -> Self {
        Self {
            remote: false,
            scope,
            countries: BTreeSet::new(),
            regions: BTreeSet::new(),
            has_us_state: false,
            has_city_restriction: false,
            raw_norm,
        }
    }
}

/// Stateless classifier mapping location text onto a [`LocationScope`].
///
/// Restriction cues are compiled once at construction; classification itself
/// allocates only the result value and is safe to call concurrently.
#[derive(Debug, Clone)]
pub struct LocationClassifier {
    restriction_cues: Vec<Regex>,
}

impl Default for LocationClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationClassifier {
    pub fn new() -> Self {
        let restriction_cues = RESTRICTION_CUES
            .iter()
            .map(|cue| Regex::new(cue).expect("built-in restriction cue compiles"))
            .collect();
        Self { restriction_cues }
    }

    /// Classify a raw location string, optionally with the posting body for
    /// extra context. Garbled input degrades to `Onsite` or `RemoteUnknown`,
    /// never an error.
    pub fn classify(&self, raw_location: &str, content: &str) -> LocationClassification {
        let text = format!("{} {}", raw_location.to_lowercase(), content.to_lowercase());
        let raw_norm = raw_location.trim().to_lowercase();

        let remote = REMOTE_POSITIVE_CUES.iter().any(|cue| text.contains(cue));
        if !remote {
            let hybrid = HYBRID_ONSITE_CUES.iter().any(|cue| text.contains(cue));
            let scope = if hybrid {
                LocationScope::Hybrid
            } else {
                LocationScope::Onsite
            };
            return LocationClassification::not_remote(scope, raw_norm);
        }

        let countries = detect_countries(&text);
        let regions = detect_regions(&text);
        let has_us_state = has_us_state_token(&text);
        let has_city_restriction = has_city_restriction(&text);
        let restriction_phrase = self
            .restriction_cues
            .iter()
            .any(|cue| cue.is_match(&text));
        let worldwide = WORLDWIDE_CUES.iter().any(|cue| text.contains(cue));

        let scope = if restriction_phrase || has_us_state || has_city_restriction {
            LocationScope::RemoteRestricted
        } else if worldwide {
            LocationScope::RemoteGlobal
        } else if !countries.is_empty() {
            LocationScope::RemoteCountry
        } else if !regions.is_empty() {
            LocationScope::RemoteRegion
        } else {
            LocationScope::RemoteUnknown
        };

        LocationClassification {
            remote: true,
            scope,
            countries,
            regions,
            has_us_state,
            has_city_restriction,
            raw_norm,
        }
    }
}

fn detect_countries(text: &str) -> BTreeSet<String> {
    COUNTRY_CUES
        .iter()
        .filter(|(_, cues)| cues.iter().any(|cue| text.contains(cue)))
        .map(|(country, _)| (*country).to_string())
        .collect()
}

fn detect_regions(text: &str) -> BTreeSet<String> {
    REGION_CUES
        .iter()
        .filter(|(_, cues)| cues.iter().any(|cue| text.contains(cue)))
        .map(|(region, _)| (*region).to_string())
        .collect()
}

/// A state token only counts in context, i.e. next to at least one other
/// token ("Seattle, WA"); a bare "WA" on its own does not.
fn has_us_state_token(text: &str) -> bool {
    let tokens: Vec<&str> = word_tokens(text).collect();
    tokens.len() > 1 && tokens.iter().any(|token| US_STATE_TOKENS.contains(token))
}

fn has_city_restriction(text: &str) -> bool {
    let us_hits = US_HUB_CITIES
        .iter()
        .filter(|city| text.contains(*city))
        .count();
    if us_hits >= 2 {
        return true;
    }
    CANADIAN_HUB_CITIES
        .iter()
        .chain(AUSTRALIAN_HUB_CITIES)
        .any(|city| text.contains(city))
}
