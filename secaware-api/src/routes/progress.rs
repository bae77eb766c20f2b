/// Progress endpoints
///
/// # Endpoints
///
/// - `GET /api/progress/:user_id` - Best attempt per module for a user
/// - `GET /api/progress/:user_id/summary` - Completed modules out of the catalog

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    Json,
};
use secaware_shared::{
    catalog::{Catalog, MAX_LIST_SIZE},
    models::progress::Progress,
    scoring::round_one_decimal,
};
use serde::{Deserialize, Serialize};

/// Completion summary for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub user_id: String,

    /// Modules in the catalog
    pub modules_total: usize,

    /// Catalog modules with a passing best attempt
    pub modules_completed: usize,

    /// `modules_completed / modules_total * 100`, one decimal
    pub completion_percentage: f64,
}

impl ProgressSummary {
    /// Summarizes a user's progress rows against the catalog
    ///
    /// Rows for modules the catalog no longer has are ignored.
    pub fn compute(user_id: &str, catalog: &Catalog, progress: &[Progress]) -> Self {
        let modules_total = catalog.module_count();
        let modules_completed = progress
            .iter()
            .filter(|p| p.completed && catalog.module(&p.module_id).is_some())
            .count();

        let completion_percentage = if modules_total == 0 {
            0.0
        } else {
            round_one_decimal(modules_completed as f64 / modules_total as f64 * 100.0)
        };

        Self {
            user_id: user_id.to_string(),
            modules_total,
            modules_completed,
            completion_percentage,
        }
    }
}

/// List a user's progress
///
/// Unknown users get an empty list. At most 100 records are returned.
pub async fn get_user_progress(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<Progress>>> {
    let progress = state.store.list_progress(&user_id, MAX_LIST_SIZE).await?;
    Ok(Json(progress))
}

/// Summarize a user's completion across the catalog
///
/// # Response
///
/// ```json
/// {
///   "user_id": "uuid",
///   "modules_total": 4,
///   "modules_completed": 1,
///   "completion_percentage": 25.0
/// }
/// ```
pub async fn get_progress_summary(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<ProgressSummary>> {
    let progress = state.store.list_progress(&user_id, MAX_LIST_SIZE).await?;
    Ok(Json(ProgressSummary::compute(&user_id, &state.catalog, &progress)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(module_id: &str, completed: bool) -> Progress {
        Progress {
            id: format!("p-{}", module_id),
            user_id: "u1".to_string(),
            module_id: module_id.to_string(),
            completed,
            score: Some(if completed { 5 } else { 1 }),
            total_questions: Some(5),
            completed_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_summary_counts_completed_modules() {
        let catalog = Catalog::builtin().unwrap();
        let summary = ProgressSummary::compute(
            "u1",
            &catalog,
            &[row("module-1", true), row("module-2", false)],
        );

        assert_eq!(summary.modules_total, 4);
        assert_eq!(summary.modules_completed, 1);
        assert_eq!(summary.completion_percentage, 25.0);
    }

    #[test]
    fn test_summary_ignores_unknown_modules() {
        let catalog = Catalog::builtin().unwrap();
        let summary = ProgressSummary::compute("u1", &catalog, &[row("retired-module", true)]);

        assert_eq!(summary.modules_completed, 0);
        assert_eq!(summary.completion_percentage, 0.0);
    }

    #[test]
    fn test_summary_rounds_percentage() {
        let catalog = Catalog::new(
            (1..=3)
                .map(|i| secaware_shared::catalog::Module {
                    id: format!("m{}", i),
                    title: String::new(),
                    description: String::new(),
                    order: i,
                    video_url: String::new(),
                    content: String::new(),
                    duration: String::new(),
                })
                .collect(),
            vec![],
        )
        .unwrap();

        let summary = ProgressSummary::compute("u1", &catalog, &[row("m1", true)]);
        assert_eq!(summary.completion_percentage, 33.3);
    }

    #[test]
    fn test_summary_empty_catalog() {
        let catalog = Catalog::new(vec![], vec![]).unwrap();
        let summary = ProgressSummary::compute("u1", &catalog, &[]);

        assert_eq!(summary.modules_total, 0);
        assert_eq!(summary.completion_percentage, 0.0);
    }
}
