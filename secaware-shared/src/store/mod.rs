/// Persistence gateway
///
/// Handlers talk to storage through the [`Store`] trait. The process builds
/// one store at startup and hands it to the router as `Arc<dyn Store>`; there
/// is no global connection handle.
///
/// # Backends
///
/// - [`PgStore`]: PostgreSQL via sqlx (production)
/// - [`MemoryStore`]: process-local maps (development and tests)
///
/// # Example
///
/// ```
/// use secaware_shared::models::user::{CreateUser, UserRole};
/// use secaware_shared::store::{MemoryStore, Store};
///
/// # async fn example() -> Result<(), secaware_shared::store::StoreError> {
/// let store = MemoryStore::new();
/// let user = store
///     .create_user(CreateUser { name: "Ada".to_string(), role: UserRole::Student })
///     .await?;
/// assert!(store.list_progress(&user.id, 100).await?.is_empty());
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::models::{
    feedback::{CreateFeedback, Feedback},
    progress::{Progress, RecordAttempt, UpsertOutcome},
    user::{CreateUser, User},
};
use async_trait::async_trait;

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Backend cannot serve requests
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage operations for the dynamic collections
#[async_trait]
pub trait Store: Send + Sync {
    /// Backend name for diagnostics
    fn backend(&self) -> &'static str;

    /// Verifies the backend is reachable
    async fn ping(&self) -> StoreResult<()>;

    /// Creates a user with a generated id
    async fn create_user(&self, data: CreateUser) -> StoreResult<User>;

    /// Folds a scored attempt into the (user, module) best-attempt record
    ///
    /// Must be atomic: concurrent attempts for the same pair can never leave
    /// a lower score stored than the best one submitted.
    async fn record_attempt(&self, attempt: RecordAttempt) -> StoreResult<UpsertOutcome>;

    /// Finds the progress record for a (user, module) pair
    async fn find_progress(&self, user_id: &str, module_id: &str) -> StoreResult<Option<Progress>>;

    /// Lists a user's progress records, at most `limit`
    async fn list_progress(&self, user_id: &str, limit: usize) -> StoreResult<Vec<Progress>>;

    /// Appends a feedback entry
    async fn create_feedback(&self, data: CreateFeedback) -> StoreResult<Feedback>;
}
