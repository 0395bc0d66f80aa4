use serde::Serialize;

use super::JobFilter;
use crate::text::token_set;

/// Score contributions per fixed category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScoreBreakdown {
    pub title_bonus: i32,
    pub keywords: i32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i32 {
        self.title_bonus + self.keywords
    }
}

pub(super) struct ScoreHits {
    pub(super) title_bonus: Vec<String>,
    pub(super) keywords: Vec<String>,
}

impl JobFilter {
    /// Sum title-bonus weights over the title and include-keyword weights
    /// over title + body. Single-word keywords match as tokens, multi-word
    /// ones as substrings; map order makes the hit lists deterministic.
    pub(super) fn compute_score(&self, title: &str, content: &str) -> (ScoreBreakdown, ScoreHits) {
        let text = format!("{title} {content}");
        let tokens = token_set(&text);

        let mut breakdown = ScoreBreakdown::default();
        let mut hits = ScoreHits {
            title_bonus: Vec::new(),
            keywords: Vec::new(),
        };

        for (keyword, bonus) in &self.title_bonus {
            if title.contains(&keyword.to_lowercase()) {
                breakdown.title_bonus += bonus;
                hits.title_bonus.push(keyword.clone());
            }
        }

        for (keyword, weight) in &self.include_keywords {
            let needle = keyword.to_lowercase();
            let found = if needle.contains(' ') {
                text.contains(&needle)
            } else {
                tokens.contains(needle.as_str())
            };
            if found {
                breakdown.keywords += weight;
                hits.keywords.push(keyword.clone());
            }
        }

        (breakdown, hits)
    }
}
