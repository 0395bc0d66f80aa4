use std::collections::HashSet;

/// Splits lower-cased text into the alphanumeric word tokens used for
/// single-word keyword matching. Underscores bind tokens together, matching
/// the word-character class the rest of the matching rules assume.
pub(crate) fn word_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|token| !token.is_empty())
}

pub(crate) fn token_set(text: &str) -> HashSet<&str> {
    word_tokens(text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_split_on_punctuation() {
        let tokens: Vec<&str> = word_tokens("remote, europe (emea) - k8s_ops").collect();
        assert_eq!(tokens, vec!["remote", "europe", "emea", "k8s_ops"]);
    }

    #[test]
    fn token_set_deduplicates() {
        let set = token_set("aws and aws and gcp");
        assert_eq!(set.len(), 3);
        assert!(set.contains("aws"));
        assert!(set.contains("gcp"));
    }
}
