/// PostgreSQL store
///
/// Thin adapter from [`Store`] onto the model-level queries in
/// [`crate::models`]. The pool is owned by the store; dropping the last clone
/// of the store does not close it, use [`crate::db::pool::close_pool`] at
/// shutdown.

use super::{Store, StoreError, StoreResult};
use crate::db::pool::health_check;
use crate::models::{
    feedback::{CreateFeedback, Feedback},
    progress::{Progress, RecordAttempt, UpsertOutcome},
    user::{CreateUser, User},
};
use async_trait::async_trait;
use sqlx::PgPool;

/// Store backed by a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for migrations and shutdown
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        if self.pool.is_closed() {
            return Err(StoreError::Unavailable("connection pool is closed".to_string()));
        }
        health_check(&self.pool).await?;
        Ok(())
    }

    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        Ok(User::create(&self.pool, data).await?)
    }

    async fn record_attempt(&self, attempt: RecordAttempt) -> StoreResult<UpsertOutcome> {
        Ok(Progress::record_attempt(&self.pool, &attempt).await?)
    }

    async fn find_progress(&self, user_id: &str, module_id: &str) -> StoreResult<Option<Progress>> {
        Ok(Progress::find(&self.pool, user_id, module_id).await?)
    }

    async fn list_progress(&self, user_id: &str, limit: usize) -> StoreResult<Vec<Progress>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        Ok(Progress::list_by_user(&self.pool, user_id, limit).await?)
    }

    async fn create_feedback(&self, data: CreateFeedback) -> StoreResult<Feedback> {
        Ok(Feedback::create(&self.pool, data).await?)
    }
}
