/// Feedback model and database operations
///
/// Feedback is append-only. A user may leave any number of entries for the
/// same module; nothing is ever updated or deduplicated.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE feedback (
///     id TEXT PRIMARY KEY,
///     user_id TEXT NOT NULL,
///     module_id TEXT NOT NULL,
///     rating INTEGER NOT NULL,
///     comments TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Feedback record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Feedback {
    pub id: String,
    pub user_id: String,
    pub module_id: String,
    pub rating: i32,
    pub comments: String,
    pub created_at: DateTime<Utc>,
}

/// Input for recording feedback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFeedback {
    pub user_id: String,
    pub module_id: String,
    pub rating: i32,
    pub comments: String,
}

impl Feedback {
    /// Builds a new feedback entry with a fresh id and the current timestamp
    pub fn new(data: CreateFeedback) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: data.user_id,
            module_id: data.module_id,
            rating: data.rating,
            comments: data.comments,
            created_at: Utc::now(),
        }
    }

    /// Appends a feedback entry
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    pub async fn create(pool: &PgPool, data: CreateFeedback) -> Result<Self, sqlx::Error> {
        let feedback = Self::new(data);

        let feedback = sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO feedback (id, user_id, module_id, rating, comments, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, module_id, rating, comments, created_at
            "#,
        )
        .bind(&feedback.id)
        .bind(&feedback.user_id)
        .bind(&feedback.module_id)
        .bind(feedback.rating)
        .bind(&feedback.comments)
        .bind(feedback.created_at)
        .fetch_one(pool)
        .await?;

        Ok(feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_feedback() {
        let feedback = Feedback::new(CreateFeedback {
            user_id: "user-1".to_string(),
            module_id: "module-2".to_string(),
            rating: 4,
            comments: "Clear examples".to_string(),
        });

        assert!(Uuid::parse_str(&feedback.id).is_ok());
        assert_eq!(feedback.rating, 4);
        assert_eq!(feedback.module_id, "module-2");
    }
}
