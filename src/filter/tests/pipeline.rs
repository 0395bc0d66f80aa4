use super::common::*;
use crate::config::{ConfigError, FilterConfig};
use crate::filter::{Gate, JobFilter};

#[test]
fn reference_posting_passes_every_gate() {
    let outcome = filter(base_config()).classify(&sre_posting(), true);

    assert!(outcome.passed);
    assert_eq!(outcome.score, 10);
    assert!(outcome.drop_reason.is_none());
    assert!(outcome.gates.iter().all(|trace| trace.passed));
    assert_eq!(
        outcome.gates.iter().map(|t| t.gate).collect::<Vec<_>>(),
        vec![Gate::Remote, Gate::Region, Gate::Title, Gate::Stack, Gate::Score]
    );

    let matches = outcome.matches.expect("explain requested");
    assert_eq!(matches.stack_groups, vec!["cloud", "iac"]);
    assert_eq!(matches.keywords, vec!["kubernetes"]);

    let breakdown = outcome.breakdown.expect("score gate ran");
    assert_eq!(breakdown.keywords, 10);
    assert_eq!(breakdown.title_bonus, 0);
}

#[test]
fn classification_is_deterministic() {
    let filter = filter(base_config());
    let job = sre_posting();
    assert_eq!(filter.classify(&job, true), filter.classify(&job, true));
    assert_eq!(filter.classify(&job, false), filter.classify(&job, false));
}

#[test]
fn explain_flag_never_changes_the_verdict() {
    let filter = filter(base_config());
    for job in [
        sre_posting(),
        posting("Senior SRE", "Onsite, Berlin", "AWS Terraform Kubernetes"),
        posting("Product Manager", "Remote", "roadmaps"),
    ] {
        let plain = filter.classify(&job, false);
        let explained = filter.classify(&job, true);
        assert_eq!(plain.passed, explained.passed);
        assert_eq!(plain.score, explained.score);
        assert_eq!(plain.drop_reason, explained.drop_reason);
        assert!(plain.matches.is_none());
        assert!(explained.matches.is_some());
    }
}

#[test]
fn first_failing_gate_wins_the_drop_reason() {
    // Fails remote (no cue at all) and would also fail stack; the remote
    // gate must be the one reported and later gates must not appear.
    let job = posting("Senior SRE", "Berlin HQ", "Spreadsheets all day");
    let outcome = filter(base_config()).classify(&job, false);

    assert!(!outcome.passed);
    let reason = outcome.drop_reason.expect("dropped");
    assert!(reason.starts_with("remote:"), "got {reason}");
    assert_eq!(outcome.gates.len(), 1);
    assert_eq!(outcome.gates[0].gate, Gate::Remote);
    assert!(outcome.breakdown.is_none());
}

#[test]
fn remote_anywhere_pattern_passes_outright() {
    let mut config = base_config();
    config.remote_positive = Vec::new();
    config.remote_anywhere_patterns = vec!["work from anywhere".to_string()];

    let job = posting(
        "Senior SRE",
        "Work from anywhere",
        "AWS Terraform Kubernetes",
    );
    assert!(filter(config).classify(&job, false).passed);
}

#[test]
fn remote_negative_vetoes_remote_positive() {
    let mut config = base_config();
    config.remote_negative = vec!["hybrid".to_string()];

    let job = posting(
        "Senior SRE",
        "Remote (hybrid, 2 days in office)",
        "AWS Terraform Kubernetes",
    );
    let outcome = filter(config).classify(&job, false);
    assert!(!outcome.passed);
    assert_eq!(
        outcome.drop_reason.as_deref(),
        Some("remote: contains remote negative")
    );
}

#[test]
fn missing_remote_cue_passes_when_not_required() {
    let mut config = base_config();
    config.require_remote = false;

    let job = posting("Senior SRE", "Berlin HQ", "AWS Terraform Kubernetes");
    assert!(filter(config).classify(&job, false).passed);
}

#[test]
fn blocked_region_beats_allowed_region() {
    let mut config = base_config();
    config.allowed_regions = vec!["europe".to_string()];
    config.blocked_regions = vec!["apac".to_string()];

    let job = posting(
        "Senior SRE",
        "Remote - Europe & APAC",
        "AWS Terraform Kubernetes",
    );
    let outcome = filter(config).classify(&job, false);
    assert!(!outcome.passed);
    assert_eq!(
        outcome.drop_reason.as_deref(),
        Some("region: blocked region: 'apac'")
    );
}

#[test]
fn residency_phrase_requires_an_allowed_region() {
    let mut config = base_config();
    config.allowed_regions = vec!["europe".to_string()];

    let unknown = posting(
        "Senior SRE",
        "Remote",
        "Must be located in Iceland. AWS Terraform Kubernetes",
    );
    let outcome = filter(config.clone()).classify(&unknown, false);
    assert_eq!(
        outcome.drop_reason.as_deref(),
        Some("region: unknown region restriction (strict)")
    );

    let known = posting(
        "Senior SRE",
        "Remote",
        "Must be located in Europe. AWS Terraform Kubernetes",
    );
    assert!(filter(config).classify(&known, false).passed);
}

#[test]
fn title_block_pattern_beats_allow_pattern() {
    let mut config = base_config();
    config.title_block_regex_any = vec!["Manager".to_string()];

    let job = posting(
        "SRE Manager",
        "Remote, Europe",
        "AWS Terraform Kubernetes",
    );
    let outcome = filter(config).classify(&job, false);
    assert!(!outcome.passed);
    assert_eq!(
        outcome.drop_reason.as_deref(),
        Some("title: blocked: 'Manager'")
    );
}

#[test]
fn title_without_allow_match_is_dropped() {
    let job = posting(
        "Backend Engineer",
        "Remote, Europe",
        "AWS Terraform Kubernetes",
    );
    let outcome = filter(base_config()).classify(&job, false);
    assert_eq!(
        outcome.drop_reason.as_deref(),
        Some("title: no allowed title pattern")
    );
}

#[test]
fn stack_gate_enforces_the_group_threshold() {
    // Exactly one group (cloud) matches: fail at min_stack_groups=2.
    let one_group = posting("Senior SRE", "Remote, Europe", "All in on AWS.");
    let outcome = filter(base_config()).classify(&one_group, true);
    assert!(!outcome.passed);
    assert_eq!(
        outcome.drop_reason.as_deref(),
        Some("stack: only 1/2 groups")
    );
    // Matched groups are still recorded on a loss, and the score gate never
    // ran so there is no breakdown.
    assert_eq!(
        outcome.matches.expect("explain requested").stack_groups,
        vec!["cloud"]
    );
    assert!(outcome.breakdown.is_none());

    // Exactly two groups: pass.
    let two_groups = posting("Senior SRE", "Remote, Europe", "AWS plus Terraform. Kubernetes.");
    assert!(filter(base_config()).classify(&two_groups, false).passed);
}

#[test]
fn multi_word_stack_keywords_match_as_substrings() {
    let mut config = base_config();
    config.stack_groups = stack_groups(&[
        ("observability", &["open telemetry"]),
        ("iac", &["terraform"]),
    ]);

    let job = posting(
        "Senior SRE",
        "Remote, Europe",
        "Instrument with open telemetry, provision with Terraform. Kubernetes.",
    );
    assert!(filter(config).classify(&job, false).passed);
}

#[test]
fn single_word_keywords_do_not_match_inside_other_words() {
    let mut config = base_config();
    config.stack_groups = stack_groups(&[("cloud", &["aws"]), ("lang", &["go"])]);

    // "google" must not satisfy the "go" keyword.
    let job = posting("Senior SRE", "Remote, Europe", "AWS and google workspace");
    let outcome = filter(config).classify(&job, false);
    assert_eq!(
        outcome.drop_reason.as_deref(),
        Some("stack: only 1/2 groups")
    );
}

#[test]
fn score_at_minimum_passes_and_one_below_fails() {
    let mut config = base_config();
    config.min_score = 10;

    let job = sre_posting(); // kubernetes alone scores exactly 10
    assert!(filter(config.clone()).classify(&job, false).passed);

    config.min_score = 11;
    let outcome = filter(config).classify(&job, false);
    assert!(!outcome.passed);
    assert_eq!(outcome.score, 10);
    assert_eq!(outcome.drop_reason.as_deref(), Some("score: 10 < min 11"));
    // The score gate ran, so the breakdown is attached even on a loss.
    let breakdown = outcome.breakdown.expect("score gate ran");
    assert_eq!(breakdown.total(), 10);
}

#[test]
fn title_bonus_only_applies_to_the_title() {
    let mut config = base_config();
    config.title_bonus = weights(&[("sre", 7)]);
    config.include_keywords = weights(&[("kubernetes", 3)]);
    config.min_score = 10;

    let outcome = filter(config).classify(&sre_posting(), true);
    assert!(outcome.passed);
    let breakdown = outcome.breakdown.expect("score gate ran");
    assert_eq!(breakdown.title_bonus, 7);
    assert_eq!(breakdown.keywords, 3);
    assert_eq!(
        outcome.matches.expect("explain requested").title_bonus,
        vec!["sre"]
    );
}

#[test]
fn empty_posting_fails_the_remote_gate_without_panicking() {
    let job = posting("", "", "");
    let outcome = filter(base_config()).classify(&job, false);
    assert!(!outcome.passed);
    assert!(outcome
        .drop_reason
        .expect("dropped")
        .starts_with("remote:"));
}

#[test]
fn malformed_title_pattern_fails_at_construction() {
    let config = FilterConfig {
        title_allow_regex_any: vec!["(unclosed".to_string()],
        ..FilterConfig::default()
    };

    let err = JobFilter::new(config).expect_err("must fail fast");
    match err {
        ConfigError::InvalidTitlePattern { pattern, .. } => assert_eq!(pattern, "(unclosed"),
        other => panic!("expected pattern error, got {other:?}"),
    }
}

#[test]
fn title_patterns_match_case_insensitively() {
    let job = posting(
        "site reliability engineer",
        "Remote, Europe",
        "AWS Terraform Kubernetes",
    );
    assert!(filter(base_config()).classify(&job, false).passed);
}
