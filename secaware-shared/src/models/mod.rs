/// Persisted records
///
/// Only the dynamic entities live in the database. Modules and assessments
/// are static and served from [`crate::catalog`].
///
/// # Models
///
/// - `user`: Learners, identified by name and role
/// - `progress`: Best attempt per (user, module)
/// - `feedback`: Append-only module ratings and comments

pub mod feedback;
pub mod progress;
pub mod user;
