//! Scripted HTTP backend shared by the integration tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use webglobe_dns::{ApiResponse, Error, HttpClient, Result};

/// One request as seen by the backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

/// Replays queued responses in order and records every request. Clones
/// share the same queues, so tests keep a clone for inspection after the
/// session takes ownership.
#[derive(Clone, Default)]
pub struct MockClient {
    responses: Arc<Mutex<VecDeque<ApiResponse>>>,
    log: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, status: u16, body: Value) {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.responses
            .lock()
            .unwrap()
            .push_back(ApiResponse::new(status, body));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.log.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(
        &self,
        method: Method,
        url: String,
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<ApiResponse> {
        let bearer = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = body.map(|b| serde_json::from_str(&b).expect("request body is JSON"));

        self.log.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            url,
            body,
            bearer,
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::unexpected("no scripted response left"))
    }
}
