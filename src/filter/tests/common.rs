use std::collections::BTreeMap;

use crate::config::{FilterConfig, GeoPolicyConfig};
use crate::domain::JobPosting;
use crate::filter::JobFilter;

pub(super) fn posting(title: &str, location: &str, content: &str) -> JobPosting {
    JobPosting {
        source: "greenhouse".to_string(),
        company: "acme".to_string(),
        job_id: "42".to_string(),
        title: title.to_string(),
        location: location.to_string(),
        url: "https://boards.example.com/acme/42".to_string(),
        updated_at: None,
        content_text: content.to_string(),
    }
}

pub(super) fn sre_posting() -> JobPosting {
    posting(
        "Senior SRE",
        "Remote, Europe",
        "Manage AWS and Terraform, run Kubernetes clusters",
    )
}

/// The reference configuration most pipeline tests run against: SRE titles,
/// two stack groups, kubernetes worth 10 points at a minimum of 5.
pub(super) fn base_config() -> FilterConfig {
    FilterConfig {
        remote_positive: vec!["remote".to_string()],
        title_allow_regex_any: vec!["SRE|Site Reliability".to_string()],
        stack_groups: stack_groups(&[("cloud", &["aws", "gcp"]), ("iac", &["terraform"])]),
        min_stack_groups: 2,
        include_keywords: weights(&[("kubernetes", 10)]),
        min_score: 5,
        ..FilterConfig::default()
    }
}

pub(super) fn stack_groups(groups: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    groups
        .iter()
        .map(|(name, keywords)| {
            (
                (*name).to_string(),
                keywords.iter().map(|k| (*k).to_string()).collect(),
            )
        })
        .collect()
}

pub(super) fn weights(entries: &[(&str, i32)]) -> BTreeMap<String, i32> {
    entries
        .iter()
        .map(|(keyword, weight)| ((*keyword).to_string(), *weight))
        .collect()
}

pub(super) fn filter(config: FilterConfig) -> JobFilter {
    JobFilter::new(config).expect("config compiles")
}

pub(super) fn geo_filter(config: FilterConfig, policy: GeoPolicyConfig) -> JobFilter {
    JobFilter::with_geo_policy(config, policy).expect("config compiles")
}
