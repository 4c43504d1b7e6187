// Copyright 2025 webglobe-dns authors
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

use crate::error::Result;

/// A single API response: HTTP status plus the parsed JSON body.
///
/// The provider signals failure through a non-200 status with an `error`
/// object in the body, so callers need both halves.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }
}

/// HTTP backend used by [`Session`](crate::Session).
///
/// The default backend wraps `reqwest`; tests substitute a scripted
/// implementation to exercise the client without a network.
pub trait HttpClient: Send + Sync {
    fn request(
        &self,
        method: Method,
        url: String,
        headers: HeaderMap,
        body: Option<String>,
    ) -> impl Future<Output = Result<ApiResponse>> + Send;
}

/// Default `reqwest`-backed HTTP client.
pub struct DefaultHttpClient {
    inner: Client,
}

impl DefaultHttpClient {
    pub fn new() -> Self {
        Self {
            inner: Client::new(),
        }
    }
}

impl Default for DefaultHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for DefaultHttpClient {
    async fn request(
        &self,
        method: Method,
        url: String,
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<ApiResponse> {
        tracing::debug!(%method, %url, "webglobe api request");

        let mut req = self.inner.request(method, url).headers(headers);
        if let Some(body) = body {
            req = req.body(body);
        }
        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        // Deletes may come back with an empty body.
        let json_value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };

        Ok(ApiResponse::new(status, json_value))
    }
}

/// Reads an integer that the provider may send as a JSON number or as a
/// numeric string.
pub(crate) fn lenient_u64(value: Option<&Value>) -> Option<u64> {
    let value = value?;
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}
