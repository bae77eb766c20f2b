/// Common test utilities for integration tests
///
/// Builds the full router over an in-memory store and the built-in catalog,
/// and wraps request/response plumbing.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use secaware_api::app::{build_router, AppState};
use secaware_api::config::Config;
use secaware_shared::catalog::Catalog;
use secaware_shared::store::MemoryStore;
use serde_json::Value;
use std::sync::Arc;
use tower::Service as _;

/// Test context containing all necessary resources
pub struct TestContext {
    pub store: MemoryStore,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context with an empty in-memory store
    pub fn new() -> Self {
        Self::with_env(&[])
    }

    /// Creates a test context whose config reads only `vars`
    pub fn with_env(vars: &[(&str, &str)]) -> Self {
        let config = Config::from_lookup(|key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        })
        .expect("test config");
        let store = MemoryStore::new();
        let catalog = Catalog::builtin().expect("built-in catalog");

        let state = AppState::new(Arc::new(store.clone()), catalog, config);
        let app = build_router(state);

        TestContext { store, app }
    }

    /// Sends a GET request, returning status and parsed JSON body
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    /// Sends a POST request with a JSON body
    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.post_raw(uri, body.to_string()).await
    }

    /// Sends a POST request with a raw body and JSON content type
    pub async fn post_raw(&self, uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();

        self.send(request).await
    }

    /// Sends any request and returns the raw response
    pub async fn send_request(&self, request: Request<Body>) -> Response {
        self.app.clone().call(request).await.unwrap()
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.send_request(request).await;
        let status = response.status();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&body).into_owned())
            })
        };

        (status, json)
    }

    /// Creates a user through the API and returns its id
    pub async fn create_user(&self, name: &str, role: &str) -> String {
        let (status, body) = self
            .post("/api/users", serde_json::json!({ "name": name, "role": role }))
            .await;
        assert_eq!(status, StatusCode::OK, "create user failed: {}", body);

        body["id"].as_str().unwrap().to_string()
    }
}

/// Correct answers for the module-1 assessment
pub fn module_one_answer_key() -> Value {
    serde_json::json!({
        "q1-1": "Manipulating human psychology and behavior",
        "q1-2": "True",
        "q1-3": "OSINT (Open Source Intelligence)",
        "q1-4": "False",
        "q1-5": "Verify through a separate, trusted channel"
    })
}

/// Module-1 answers with exactly `correct` of the five right
pub fn module_one_answers(correct: usize) -> Value {
    let key = module_one_answer_key();
    let mut answers = serde_json::Map::new();

    for (index, (question_id, answer)) in key.as_object().unwrap().iter().enumerate() {
        let value = if index < correct {
            answer.clone()
        } else {
            Value::String("Wrong answer".to_string())
        };
        answers.insert(question_id.clone(), value);
    }

    Value::Object(answers)
}
