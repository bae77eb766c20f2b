/// Database migration runner
///
/// Migrations live in `secaware-shared/migrations/` and are embedded into the
/// binary at compile time by `sqlx::migrate!`, so deployments need no files
/// on disk.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Applies all pending migrations
///
/// Each migration runs in its own transaction; a failing migration is rolled
/// back and reported.
///
/// # Errors
///
/// Returns an error if a migration fails or was modified after being applied.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    match sqlx::migrate!("./migrations").run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
