/// Assessment scoring
///
/// Scores a submitted answer map against an assessment's answer keys and
/// decides whether a new score should replace a stored best attempt.
///
/// # Rules
///
/// - Answers are compared with exact string equality (no trimming, no case
///   folding).
/// - `total` is the number of questions in the assessment, not the number of
///   answers submitted. Unanswered and unknown question ids are ignored.
/// - A submission passes at 70% or more.
///
/// # Example
///
/// ```
/// use secaware_shared::catalog::Catalog;
/// use secaware_shared::scoring::score_submission;
/// use std::collections::HashMap;
///
/// let catalog = Catalog::builtin().unwrap();
/// let assessment = catalog.assessment("module-1").unwrap();
///
/// let result = score_submission(assessment, &HashMap::new());
/// assert_eq!(result.score, 0);
/// assert!(!result.passed);
/// ```

use crate::catalog::Assessment;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Minimum percentage required to pass an assessment
pub const PASS_THRESHOLD_PERCENT: u32 = 70;

/// Outcome of scoring a single submission
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// Number of correctly answered questions
    pub score: i32,

    /// Number of questions in the assessment
    pub total: i32,

    /// `score / total * 100`, rounded to one decimal place
    pub percentage: f64,

    /// Whether the percentage reached [`PASS_THRESHOLD_PERCENT`]
    pub passed: bool,
}

/// Scores a submission against an assessment
pub fn score_submission(assessment: &Assessment, answers: &HashMap<String, String>) -> AssessmentResult {
    let correct = assessment
        .questions
        .iter()
        .filter(|q| answers.get(&q.id).is_some_and(|answer| *answer == q.correct_answer))
        .count();
    let total = assessment.questions.len();

    let percentage = if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64 * 100.0
    };

    // Integer comparison keeps the 70% boundary exact
    let passed = total > 0 && correct * 100 >= PASS_THRESHOLD_PERCENT as usize * total;

    AssessmentResult {
        score: correct as i32,
        total: total as i32,
        percentage: round_one_decimal(percentage),
        passed,
    }
}

/// Rounds to one decimal place
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Best-attempt policy for stored progress
///
/// A new score replaces the stored one only when strictly greater. A missing
/// stored score counts as zero.
pub fn should_replace(stored_score: Option<i32>, new_score: i32) -> bool {
    new_score > stored_score.unwrap_or(0)
}
