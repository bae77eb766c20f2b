/// In-memory store
///
/// Keeps users, progress and feedback in process-local maps behind a single
/// `tokio::sync::RwLock`. Nothing survives a restart. The best-attempt upsert
/// runs its read, decision and write under one write guard, which makes it
/// atomic with respect to other requests in the same process.

use super::{Store, StoreResult};
use crate::models::{
    feedback::{CreateFeedback, Feedback},
    progress::{Progress, RecordAttempt, UpsertOutcome},
    user::{CreateUser, User},
};
use crate::scoring::should_replace;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{hash_map::Entry, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<String, User>,

    /// Keyed by (user_id, module_id)
    progress: HashMap<(String, String), Progress>,

    feedback: Vec<Feedback>,
}

/// Store backed by process memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    /// Number of stored feedback entries
    pub async fn feedback_count(&self) -> usize {
        self.tables.read().await.feedback.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        let user = User::new(data);
        self.tables
            .write()
            .await
            .users
            .insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn record_attempt(&self, attempt: RecordAttempt) -> StoreResult<UpsertOutcome> {
        let mut tables = self.tables.write().await;
        let key = (attempt.user_id.clone(), attempt.module_id.clone());
        let now = Utc::now();

        let outcome = match tables.progress.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(Progress::first_attempt(&attempt, now));
                UpsertOutcome::Created
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                if should_replace(existing.score, attempt.score) {
                    existing.apply_attempt(&attempt, now);
                    UpsertOutcome::Improved
                } else {
                    UpsertOutcome::Unchanged
                }
            }
        };

        debug!(
            user_id = %attempt.user_id,
            module_id = %attempt.module_id,
            outcome = outcome.as_str(),
            "Recorded attempt in memory"
        );

        Ok(outcome)
    }

    async fn find_progress(&self, user_id: &str, module_id: &str) -> StoreResult<Option<Progress>> {
        let tables = self.tables.read().await;
        Ok(tables
            .progress
            .get(&(user_id.to_string(), module_id.to_string()))
            .cloned())
    }

    async fn list_progress(&self, user_id: &str, limit: usize) -> StoreResult<Vec<Progress>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Progress> = tables
            .progress
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();

        rows.sort_by(|a, b| a.module_id.cmp(&b.module_id));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn create_feedback(&self, data: CreateFeedback) -> StoreResult<Feedback> {
        let feedback = Feedback::new(data);
        self.tables.write().await.feedback.push(feedback.clone());
        Ok(feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;

    fn attempt(user_id: &str, module_id: &str, score: i32) -> RecordAttempt {
        RecordAttempt {
            user_id: user_id.to_string(),
            module_id: module_id.to_string(),
            score,
            total_questions: 5,
            passed: score * 100 >= 70 * 5,
        }
    }

    #[tokio::test]
    async fn test_create_user() {
        let store = MemoryStore::new();
        let user = store
            .create_user(CreateUser {
                name: "Grace".to_string(),
                role: UserRole::Staff,
            })
            .await
            .unwrap();

        assert_eq!(user.name, "Grace");
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_best_attempt_wins() {
        let store = MemoryStore::new();

        let outcome = store.record_attempt(attempt("u1", "module-1", 3)).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Created);
        let first = store.find_progress("u1", "module-1").await.unwrap().unwrap();
        assert_eq!(first.score, Some(3));
        assert!(!first.completed);

        let outcome = store.record_attempt(attempt("u1", "module-1", 5)).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Improved);
        let best = store.find_progress("u1", "module-1").await.unwrap().unwrap();
        assert_eq!(best.id, first.id);
        assert_eq!(best.score, Some(5));
        assert!(best.completed);

        let outcome = store.record_attempt(attempt("u1", "module-1", 2)).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Unchanged);
        let after = store.find_progress("u1", "module-1").await.unwrap().unwrap();
        assert_eq!(after, best);
    }

    #[tokio::test]
    async fn test_equal_score_leaves_record_untouched() {
        let store = MemoryStore::new();
        store.record_attempt(attempt("u1", "module-1", 4)).await.unwrap();
        let before = store.find_progress("u1", "module-1").await.unwrap().unwrap();

        let outcome = store.record_attempt(attempt("u1", "module-1", 4)).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Unchanged);

        let after = store.find_progress("u1", "module-1").await.unwrap().unwrap();
        assert_eq!(after.completed_at, before.completed_at);
    }

    #[tokio::test]
    async fn test_concurrent_attempts_keep_highest_score() {
        let store = MemoryStore::new();

        let handles: Vec<_> = (0..=5)
            .rev()
            .chain(0..=5)
            .map(|score| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.record_attempt(attempt("u1", "module-3", score)).await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let progress = store.find_progress("u1", "module-3").await.unwrap().unwrap();
        assert_eq!(progress.score, Some(5));
        assert!(progress.completed);
    }

    #[tokio::test]
    async fn test_list_progress_filters_and_limits() {
        let store = MemoryStore::new();
        store.record_attempt(attempt("u1", "module-2", 1)).await.unwrap();
        store.record_attempt(attempt("u1", "module-1", 1)).await.unwrap();
        store.record_attempt(attempt("u2", "module-1", 1)).await.unwrap();

        let rows = store.list_progress("u1", 100).await.unwrap();
        let modules: Vec<&str> = rows.iter().map(|p| p.module_id.as_str()).collect();
        assert_eq!(modules, vec!["module-1", "module-2"]);

        assert_eq!(store.list_progress("u1", 1).await.unwrap().len(), 1);
        assert!(store.list_progress("nobody", 100).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_feedback_is_append_only() {
        let store = MemoryStore::new();

        for rating in [5, 3] {
            store
                .create_feedback(CreateFeedback {
                    user_id: "u1".to_string(),
                    module_id: "module-1".to_string(),
                    rating,
                    comments: "again".to_string(),
                })
                .await
                .unwrap();
        }

        assert_eq!(store.feedback_count().await, 2);
    }
}
