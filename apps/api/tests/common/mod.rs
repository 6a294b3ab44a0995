#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use moodmeter_api::analysis::{MoodAnalysis, MoodAnalyzer};
use moodmeter_api::composer::SessionRegistry;
use moodmeter_api::entries::InMemoryEntryStore;
use moodmeter_api::errors::ServiceError;
use moodmeter_api::routes::build_router;
use moodmeter_api::state::AppState;

/// Analyzer that replays queued outcomes, then answers `0.5` forever.
#[derive(Default)]
pub struct ScriptedAnalyzer {
    outcomes: Mutex<VecDeque<Result<MoodAnalysis, ServiceError>>>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedAnalyzer {
    pub fn push_energy(&self, energy: f64) {
        self.outcomes.lock().unwrap().push_back(Ok(MoodAnalysis {
            energy,
            reasoning: "Scripted reading.".to_string(),
        }));
    }

    pub fn push_error(&self, error: ServiceError) {
        self.outcomes.lock().unwrap().push_back(Err(error));
    }

    /// Texts the analyzer was called with, in order.
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl MoodAnalyzer for ScriptedAnalyzer {
    async fn analyze(&self, text: &str) -> Result<MoodAnalysis, ServiceError> {
        self.seen.lock().unwrap().push(text.to_string());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(MoodAnalysis {
                    energy: 0.5,
                    reasoning: "Scripted reading.".to_string(),
                })
            })
    }
}

pub struct TestApp {
    pub router: Router,
    pub analyzer: Arc<ScriptedAnalyzer>,
}

/// The full router over an in-memory store and a scripted analyzer.
pub fn build_test_app() -> TestApp {
    let analyzer = Arc::new(ScriptedAnalyzer::default());
    let state = AppState {
        analyzer: analyzer.clone(),
        entries: Arc::new(InMemoryEntryStore::new()),
        sessions: SessionRegistry::new(Duration::from_secs(3600)),
    };
    TestApp {
        router: build_router(state),
        analyzer,
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Asserts the status and returns the JSON body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
