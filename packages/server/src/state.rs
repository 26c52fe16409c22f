use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use formbuilder_forms::Submission;
use formbuilder_renderer::Registry;
use formbuilder_storage::DocumentStore;
use tokio::sync::RwLock;

/// Submissions kept per form unless configured otherwise
pub const DEFAULT_SUBMISSION_LIMIT: usize = 1000;

#[derive(Clone)]
pub struct AppState {
    /// Read-only after startup
    pub registry: Arc<Registry>,
    pub store: Arc<dyn DocumentStore>,
    pub submissions: Arc<SubmissionLog>,
}

impl AppState {
    pub fn new(registry: Registry, store: impl DocumentStore + 'static) -> Self {
        Self::with_submission_limit(registry, store, DEFAULT_SUBMISSION_LIMIT)
    }

    pub fn with_submission_limit(
        registry: Registry,
        store: impl DocumentStore + 'static,
        limit: usize,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            store: Arc::new(store),
            submissions: Arc::new(SubmissionLog::new(limit)),
        }
    }
}

#[derive(Debug, Default)]
struct FormSubmissions {
    /// Newest last
    recent: VecDeque<Submission>,
    /// Every submission ever received, including dropped ones
    total: usize,
}

/// In-process submission records per document key.
///
/// Only the newest `limit` submissions of each form are kept; counts cover all of them.
#[derive(Debug)]
pub struct SubmissionLog {
    limit: usize,
    forms: RwLock<HashMap<String, FormSubmissions>>,
}

impl SubmissionLog {
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            forms: RwLock::new(HashMap::new()),
        }
    }

    /// Append `submission` and return how many `key` has received
    pub async fn record(&self, key: &str, submission: Submission) -> usize {
        let mut forms = self.forms.write().await;
        let form = forms.entry(key.to_string()).or_default();
        form.recent.push_back(submission);
        if form.recent.len() > self.limit {
            form.recent.pop_front();
        }
        form.total += 1;
        form.total
    }

    /// Kept submissions of `key`, oldest first
    pub async fn list(&self, key: &str) -> Vec<Submission> {
        self.forms
            .read()
            .await
            .get(key)
            .map(|form| form.recent.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub async fn count(&self, key: &str) -> usize {
        self.forms
            .read()
            .await
            .get(key)
            .map_or(0, |form| form.total)
    }

    /// Received count per key
    pub async fn counts(&self) -> HashMap<String, usize> {
        self.forms
            .read()
            .await
            .iter()
            .map(|(key, form)| (key.clone(), form.total))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::Map;

    fn submission(n: usize) -> Submission {
        Submission {
            email: Some(format!("user{}@example.com", n)),
            data: Map::new(),
            submitted_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_log_keeps_newest_and_counts_all() {
        let log = SubmissionLog::new(2);

        for n in 0..3 {
            log.record("/contact", submission(n)).await;
        }

        let kept: Vec<_> = log
            .list("/contact")
            .await
            .into_iter()
            .filter_map(|s| s.email)
            .collect();
        assert_eq!(kept, vec!["user1@example.com", "user2@example.com"]);
        assert_eq!(log.count("/contact").await, 3);
        assert_eq!(log.count("/other").await, 0);
        assert_eq!(log.counts().await.get("/contact"), Some(&3));
    }
}
