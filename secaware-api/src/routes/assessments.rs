/// Assessment endpoints
///
/// # Endpoints
///
/// - `GET /api/assessments/:module_id` - Get a module's quiz without answer keys
/// - `POST /api/assessments/:module_id/submit` - Score answers and record progress

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ValidatedJson,
};
use axum::{
    extract::{Path, State},
    Json,
};
use secaware_shared::{
    catalog::PublicAssessment,
    models::progress::RecordAttempt,
    scoring::{score_submission, AssessmentResult},
};
use serde::Deserialize;
use std::collections::HashMap;
use validator::Validate;

/// Assessment submission request
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAssessmentRequest {
    /// Submitting user
    #[validate(length(min = 1, message = "user_id must not be empty"))]
    pub user_id: String,

    /// Question id -> chosen answer. Unanswered questions are simply absent,
    /// but the map itself is required.
    pub answers: HashMap<String, String>,
}

/// Get the assessment for a module
///
/// Answer keys are never part of the response.
///
/// # Response
///
/// ```json
/// {
///   "id": "assessment-1",
///   "module_id": "module-1",
///   "questions": [
///     { "id": "q1-2", "question": "...", "type": "true_false", "options": ["True", "False"] }
///   ]
/// }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No assessment for this module
pub async fn get_assessment(
    State(state): State<AppState>,
    Path(module_id): Path<String>,
) -> ApiResult<Json<PublicAssessment>> {
    state
        .catalog
        .public_assessment(&module_id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Assessment not found".to_string()))
}

/// Submit answers for a module's assessment
///
/// Scores the answers, then folds the result into the user's best-attempt
/// progress for the module. The returned result always describes this
/// submission, whether or not it replaced the stored best.
///
/// # Endpoint
///
/// ```text
/// POST /api/assessments/module-1/submit
/// Content-Type: application/json
///
/// { "user_id": "uuid", "answers": { "q1-1": "...", "q1-2": "True" } }
/// ```
///
/// # Response
///
/// ```json
/// { "score": 4, "total": 5, "percentage": 80.0, "passed": true }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No assessment for this module
/// - `422 Unprocessable Entity`: Malformed body or empty `user_id`
/// - `500 Internal Server Error`: Storage failure
pub async fn submit_assessment(
    State(state): State<AppState>,
    Path(module_id): Path<String>,
    ValidatedJson(req): ValidatedJson<SubmitAssessmentRequest>,
) -> ApiResult<Json<AssessmentResult>> {
    let assessment = state
        .catalog
        .assessment(&module_id)
        .ok_or_else(|| ApiError::NotFound("Assessment not found".to_string()))?;

    let result = score_submission(assessment, &req.answers);

    let outcome = state
        .store
        .record_attempt(RecordAttempt::from_result(&req.user_id, &module_id, &result))
        .await?;

    tracing::info!(
        user_id = %req.user_id,
        module_id = %module_id,
        score = result.score,
        total = result.total,
        passed = result.passed,
        progress = outcome.as_str(),
        "Assessment scored"
    );

    Ok(Json(result))
}
