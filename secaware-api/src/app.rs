/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use secaware_api::{app::{build_router, AppState}, config::Config};
/// use secaware_shared::{catalog::Catalog, store::MemoryStore};
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemoryStore::new()), Catalog::builtin()?, config);
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use secaware_shared::{catalog::Catalog, store::Store};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway for users, progress and feedback
    pub store: Arc<dyn Store>,

    /// Static modules and assessments
    pub catalog: Arc<Catalog>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn Store>, catalog: Catalog, config: Config) -> Self {
        Self {
            store,
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                                # Health check
/// └── /api/
///     ├── POST /users                        # Create user
///     ├── GET  /modules                      # List modules
///     ├── GET  /modules/:module_id           # Get module
///     ├── GET  /assessments/:module_id       # Get assessment (no answer keys)
///     ├── POST /assessments/:module_id/submit
///     ├── POST /feedback                     # Record feedback
///     ├── GET  /progress/:user_id            # List progress
///     └── GET  /progress/:user_id/summary    # Completion summary
/// ```
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let api_routes = Router::new()
        .route("/users", post(routes::users::create_user))
        .route("/modules", get(routes::modules::list_modules))
        .route("/modules/:module_id", get(routes::modules::get_module))
        .route("/assessments/:module_id", get(routes::assessments::get_assessment))
        .route(
            "/assessments/:module_id/submit",
            post(routes::assessments::submit_assessment),
        )
        .route("/feedback", post(routes::feedback::submit_feedback))
        .route("/progress/:user_id", get(routes::progress::get_user_progress))
        .route(
            "/progress/:user_id/summary",
            get(routes::progress::get_progress_summary),
        );

    let cors = cors_layer(&state.config);

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Builds the CORS layer from the configured origin allow-list
///
/// `*` opens the API to any origin. An explicit list admits only those
/// origins, with credentials, and echoes back whatever method and headers a
/// preflight asks for.
fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allows_any() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}
