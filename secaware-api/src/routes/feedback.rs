/// Feedback endpoint
///
/// - `POST /api/feedback` - Append a rating and comment for a module

use crate::{app::AppState, error::ApiResult, extract::ValidatedJson};
use axum::{extract::State, Json};
use secaware_shared::models::feedback::{CreateFeedback, Feedback};
use serde::Deserialize;
use validator::Validate;

/// Feedback request
#[derive(Debug, Deserialize, Validate)]
pub struct FeedbackRequest {
    #[validate(length(min = 1, message = "user_id must not be empty"))]
    pub user_id: String,

    #[validate(length(min = 1, message = "module_id must not be empty"))]
    pub module_id: String,

    /// 1 (poor) to 5 (excellent)
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(max = 5000, message = "Comments must be at most 5000 characters"))]
    pub comments: String,
}

/// Record feedback
///
/// Every call appends a new entry; repeated feedback for the same module is
/// kept.
///
/// # Endpoint
///
/// ```text
/// POST /api/feedback
/// Content-Type: application/json
///
/// { "user_id": "uuid", "module_id": "module-2", "rating": 5, "comments": "Great examples" }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Rating outside 1-5, empty ids, malformed body
/// - `500 Internal Server Error`: Storage failure
pub async fn submit_feedback(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<FeedbackRequest>,
) -> ApiResult<Json<Feedback>> {
    let feedback = state
        .store
        .create_feedback(CreateFeedback {
            user_id: req.user_id,
            module_id: req.module_id,
            rating: req.rating,
            comments: req.comments,
        })
        .await?;

    tracing::info!(
        feedback_id = %feedback.id,
        module_id = %feedback.module_id,
        rating = feedback.rating,
        "Feedback recorded"
    );

    Ok(Json(feedback))
}
