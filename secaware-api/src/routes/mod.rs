/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: User creation
/// - `modules`: Training module catalog
/// - `assessments`: Quizzes and submission scoring
/// - `feedback`: Module feedback
/// - `progress`: Per-user progress and completion summary

pub mod assessments;
pub mod feedback;
pub mod health;
pub mod modules;
pub mod progress;
pub mod users;
