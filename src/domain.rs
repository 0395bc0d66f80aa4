use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Normalized job posting handed over by a board adapter.
///
/// Adapters strip markup before constructing this, so `content_text` is plain
/// text. `updated_at` stays in the provider's native format (usually ISO-8601)
/// and is only ever compared opaquely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub source: String,
    pub company: String,
    pub job_id: String,
    pub title: String,
    pub location: String,
    pub url: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub content_text: String,
}

impl JobPosting {
    /// Stable key the external state store uses for deduplication.
    pub fn dedup_key(&self) -> String {
        format!("{}:{}:{}", self.source, self.company, self.job_id)
    }

    /// Short digest over title, location, and body for change detection.
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.title.as_bytes());
        hasher.update(b"|");
        hasher.update(self.location.as_bytes());
        hasher.update(b"|");
        hasher.update(self.content_text.as_bytes());
        let digest = hex::encode(hasher.finalize());
        digest[..16].to_string()
    }

    /// Whether the posting changed relative to a previously stored snapshot.
    ///
    /// A differing provider timestamp wins; otherwise the content hash
    /// decides, so boards that never set `updated_at` still surface edits.
    pub fn is_updated(&self, old_updated_at: Option<&str>, old_hash: &str) -> bool {
        if let (Some(current), Some(previous)) = (self.updated_at.as_deref(), old_updated_at) {
            if current != previous {
                return true;
            }
        }
        self.content_hash() != old_hash
    }
}
