/// User endpoints
///
/// # Endpoints
///
/// - `POST /api/users` - Create a user from a name and role

use crate::{app::AppState, error::ApiResult, extract::ValidatedJson};
use axum::{extract::State, Json};
use secaware_shared::models::user::{CreateUser, User, UserRole};
use serde::Deserialize;
use validator::Validate;

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// `staff` or `student`
    pub role: UserRole,
}

/// Create a user
///
/// There is no authentication; the returned `id` is what the client sends
/// back on later calls.
///
/// # Endpoint
///
/// ```text
/// POST /api/users
/// Content-Type: application/json
///
/// { "name": "Ada", "role": "student" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "id": "uuid",
///   "name": "Ada",
///   "role": "student",
///   "created_at": "2025-01-03T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Empty name or unknown role
/// - `500 Internal Server Error`: Storage failure
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Json<User>> {
    let user = state
        .store
        .create_user(CreateUser {
            name: req.name,
            role: req.role,
        })
        .await?;

    tracing::info!(user_id = %user.id, role = user.role.as_str(), "User created");

    Ok(Json(user))
}
