//! HTTP client for integration testing.
//!
//! Sends requests straight into the axum router with `oneshot`, no socket.

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

pub struct ApiClient {
    router: Router,
}

/// Status and decoded JSON body (`Null` when the body is empty).
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    /// Gets a value at the given dotted JSON path; numeric segments index arrays.
    ///
    /// ```ignore
    /// let title = response.get("related_posts.0.title");
    /// ```
    pub fn get(&self, path: &str) -> Value {
        let mut current = &self.body;
        for key in path.split('.') {
            current = match key.parse::<usize>() {
                Ok(index) => &current[index],
                Err(_) => &current[key],
            };
        }
        current.clone()
    }
}

impl ApiClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    pub async fn get(&self, uri: &str) -> ApiResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> ApiResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> ApiResponse {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> ApiResponse {
        self.send(Method::DELETE, uri, None).await
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> ApiResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        ApiResponse { status, body }
    }
}
