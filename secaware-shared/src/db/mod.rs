/// Database layer
///
/// - `pool`: PostgreSQL connection pool with health checks
/// - `migrations`: embedded schema migrations
///
/// Queries live on the model types in [`crate::models`].

pub mod migrations;
pub mod pool;
