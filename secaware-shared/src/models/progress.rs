/// Progress model and database operations
///
/// One progress row per (user, module) pair holds the best attempt the user
/// has made at that module's assessment. Scores only ever go up: a later,
/// lower-scoring attempt leaves the row untouched, including its `completed`
/// flag and timestamp.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE progress (
///     id TEXT PRIMARY KEY,
///     user_id TEXT NOT NULL,
///     module_id TEXT NOT NULL,
///     completed BOOLEAN NOT NULL,
///     score INTEGER,
///     total_questions INTEGER,
///     completed_at TIMESTAMPTZ,
///     CONSTRAINT progress_user_module_key UNIQUE (user_id, module_id)
/// );
/// ```
///
/// # Atomic upsert
///
/// [`Progress::record_attempt`] expresses the best-attempt rule as a single
/// `INSERT ... ON CONFLICT ... DO UPDATE ... WHERE` statement, so concurrent
/// submissions for the same pair cannot overwrite a higher score.

use crate::scoring::AssessmentResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Best-attempt record for a (user, module) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Progress {
    pub id: String,
    pub user_id: String,
    pub module_id: String,

    /// Whether the best attempt passed
    pub completed: bool,

    /// Best score (correct answers)
    pub score: Option<i32>,

    /// Question count at the time of the best attempt
    pub total_questions: Option<i32>,

    /// When the best attempt was recorded
    pub completed_at: Option<DateTime<Utc>>,
}

/// A scored submission to be folded into stored progress
#[derive(Debug, Clone, PartialEq)]
pub struct RecordAttempt {
    pub user_id: String,
    pub module_id: String,
    pub score: i32,
    pub total_questions: i32,
    pub passed: bool,
}

impl RecordAttempt {
    /// Builds an attempt from a scoring result
    pub fn from_result(user_id: &str, module_id: &str, result: &AssessmentResult) -> Self {
        Self {
            user_id: user_id.to_string(),
            module_id: module_id.to_string(),
            score: result.score,
            total_questions: result.total,
            passed: result.passed,
        }
    }
}

/// What an attempt did to stored progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    /// First attempt for the pair
    Created,

    /// New best score replaced the stored one
    Improved,

    /// Score was not higher; stored progress untouched
    Unchanged,
}

impl UpsertOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpsertOutcome::Created => "created",
            UpsertOutcome::Improved => "improved",
            UpsertOutcome::Unchanged => "unchanged",
        }
    }
}

impl Progress {
    /// Builds a fresh record for a first attempt
    pub fn first_attempt(attempt: &RecordAttempt, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: attempt.user_id.clone(),
            module_id: attempt.module_id.clone(),
            completed: attempt.passed,
            score: Some(attempt.score),
            total_questions: Some(attempt.total_questions),
            completed_at: Some(now),
        }
    }

    /// Overwrites the attempt fields, keeping identity
    pub fn apply_attempt(&mut self, attempt: &RecordAttempt, now: DateTime<Utc>) {
        self.completed = attempt.passed;
        self.score = Some(attempt.score);
        self.total_questions = Some(attempt.total_questions);
        self.completed_at = Some(now);
    }

    /// Records an attempt, keeping only the best score per (user, module)
    ///
    /// Inserts a new row for a first attempt. For an existing row, the update
    /// only fires when the new score is strictly greater than the stored one
    /// (a NULL stored score counts as 0). `xmax = 0` distinguishes a fresh
    /// insert from an update in the returned row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    pub async fn record_attempt(pool: &PgPool, attempt: &RecordAttempt) -> Result<UpsertOutcome, sqlx::Error> {
        let inserted: Option<bool> = sqlx::query_scalar(
            r#"
            INSERT INTO progress (id, user_id, module_id, completed, score, total_questions, completed_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            ON CONFLICT (user_id, module_id) DO UPDATE
            SET completed = EXCLUDED.completed,
                score = EXCLUDED.score,
                total_questions = EXCLUDED.total_questions,
                completed_at = EXCLUDED.completed_at
            WHERE COALESCE(progress.score, 0) < EXCLUDED.score
            RETURNING (xmax = 0) AS inserted
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&attempt.user_id)
        .bind(&attempt.module_id)
        .bind(attempt.passed)
        .bind(attempt.score)
        .bind(attempt.total_questions)
        .fetch_optional(pool)
        .await?;

        Ok(match inserted {
            Some(true) => UpsertOutcome::Created,
            Some(false) => UpsertOutcome::Improved,
            None => UpsertOutcome::Unchanged,
        })
    }

    /// Finds the progress row for a (user, module) pair
    pub async fn find(pool: &PgPool, user_id: &str, module_id: &str) -> Result<Option<Self>, sqlx::Error> {
        let progress = sqlx::query_as::<_, Progress>(
            r#"
            SELECT id, user_id, module_id, completed, score, total_questions, completed_at
            FROM progress
            WHERE user_id = $1 AND module_id = $2
            "#,
        )
        .bind(user_id)
        .bind(module_id)
        .fetch_optional(pool)
        .await?;

        Ok(progress)
    }

    /// Lists progress rows for a user, at most `limit`
    pub async fn list_by_user(pool: &PgPool, user_id: &str, limit: i64) -> Result<Vec<Self>, sqlx::Error> {
        let rows = sqlx::query_as::<_, Progress>(
            r#"
            SELECT id, user_id, module_id, completed, score, total_questions, completed_at
            FROM progress
            WHERE user_id = $1
            ORDER BY module_id
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(score: i32, passed: bool) -> RecordAttempt {
        RecordAttempt {
            user_id: "user-1".to_string(),
            module_id: "module-1".to_string(),
            score,
            total_questions: 5,
            passed,
        }
    }

    #[test]
    fn test_first_attempt_record() {
        let now = Utc::now();
        let progress = Progress::first_attempt(&attempt(3, false), now);

        assert!(Uuid::parse_str(&progress.id).is_ok());
        assert_eq!(progress.score, Some(3));
        assert_eq!(progress.total_questions, Some(5));
        assert!(!progress.completed);
        assert_eq!(progress.completed_at, Some(now));
    }

    #[test]
    fn test_apply_attempt_keeps_identity() {
        let mut progress = Progress::first_attempt(&attempt(3, false), Utc::now());
        let id = progress.id.clone();

        progress.apply_attempt(&attempt(5, true), Utc::now());

        assert_eq!(progress.id, id);
        assert_eq!(progress.score, Some(5));
        assert!(progress.completed);
    }

    #[test]
    fn test_from_result() {
        let result = AssessmentResult {
            score: 4,
            total: 5,
            percentage: 80.0,
            passed: true,
        };
        let attempt = RecordAttempt::from_result("u", "m", &result);

        assert_eq!(attempt.user_id, "u");
        assert_eq!(attempt.module_id, "m");
        assert_eq!(attempt.score, 4);
        assert_eq!(attempt.total_questions, 5);
        assert!(attempt.passed);
    }

    #[test]
    fn test_outcome_serialization() {
        assert_eq!(
            serde_json::to_string(&UpsertOutcome::Unchanged).unwrap(),
            "\"unchanged\""
        );
        assert_eq!(UpsertOutcome::Improved.as_str(), "improved");
    }
}
