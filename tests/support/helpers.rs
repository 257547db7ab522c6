// tests/support/helpers.rs
use std::collections::HashMap;

use axum::Router;
use axum::body::{self, Body};
use axum::http::{Method, Request, Response, header};
use persona_auth::config::AppConfig;
use persona_auth::presentation::http::{routes::build_router, state::HttpState};
use serde_json::Value;

use super::builders::{TEST_SECRET, TestHarness};

pub fn test_config() -> AppConfig {
    let vars: HashMap<&str, &str> = HashMap::from([("JWT_SECRET_KEY", TEST_SECRET)]);
    AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap()
}

pub fn make_router(harness: &TestHarness) -> Router {
    let state = HttpState {
        services: harness.services.clone(),
    };
    build_router(state, &test_config())
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}
