/// User model and database operations
///
/// Users are identified by a client-supplied display name and role. There is
/// no authentication: the generated `id` is the only handle a client holds.
/// Users are immutable once created.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id TEXT PRIMARY KEY,
///     name TEXT NOT NULL,
///     role TEXT NOT NULL CHECK (role IN ('staff', 'student')),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use secaware_shared::models::user::{CreateUser, User, UserRole};
/// use secaware_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     name: "Ada".to_string(),
///     role: UserRole::Student,
/// }).await?;
/// println!("Created user: {}", user.id);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Role a user picks when joining
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// University staff member
    Staff,

    /// Student
    Student,
}

impl UserRole {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Staff => "staff",
            UserRole::Student => "student",
        }
    }
}

/// User record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Opaque identifier (UUID v4 text)
    pub id: String,

    /// Display name
    pub name: String,

    pub role: UserRole,

    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub role: UserRole,
}

impl User {
    /// Builds a new user with a fresh id and the current timestamp
    pub fn new(data: CreateUser) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: data.name,
            role: data.role,
            created_at: Utc::now(),
        }
    }

    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = Self::new(data);

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, role, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, role, created_at
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(user.role)
        .bind(user.created_at)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }
}
