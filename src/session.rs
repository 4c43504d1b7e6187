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

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::http::{ApiResponse, DefaultHttpClient, HttpClient};
use crate::result_set::ResultSet;
use crate::zone::Zone;

/// Production API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.webglobe.com";

/// Provider status marking a domain as ready/active.
const ZONE_STATUS_ACTIVE: &str = "hotovo";

/// Authenticated session against the Webglobe API.
///
/// Starts unauthenticated; [`login`](Session::login) stores the bearer token
/// used by every subsequent call. The HTTP backend is pluggable through the
/// `C` parameter, defaulting to the `reqwest`-backed client.
pub struct Session<C: HttpClient = DefaultHttpClient> {
    http: C,
    api_url: String,
    token: Option<String>,
    headers: Option<HeaderMap>,
}

impl Session<DefaultHttpClient> {
    /// Creates an unauthenticated session against `api_url`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(api_url, DefaultHttpClient::new())
    }
}

impl<C: HttpClient> Session<C> {
    /// Creates an unauthenticated session with a custom HTTP backend.
    pub fn with_client(api_url: impl Into<String>, http: C) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            token: None,
            headers: None,
        }
    }

    /// The bearer token obtained at login, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Exchanges credentials for a bearer token.
    ///
    /// `otp` and `sms_code` are attached only when given; the provider
    /// requests them for accounts with two-factor auth enabled. Any
    /// non-200 response maps to [`Error::Authentication`] with the
    /// provider's error code and message.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
        otp: Option<&str>,
        sms_code: Option<&str>,
    ) -> Result<()> {
        let mut body = json!({
            "login": username,
            "password": password,
        });
        if let Some(otp) = otp {
            body["otp"] = json!(otp);
        }
        if let Some(sms) = sms_code {
            body["sms"] = json!(sms);
        }

        let url = format!("{}/auth/login", self.api_url);
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self
            .http
            .request(Method::POST, url, headers, Some(body.to_string()))
            .await?;

        if response.status.as_u16() != 200 {
            let (code, message) = error_object(&response)?;
            return Err(Error::Authentication { code, message });
        }

        let token = response
            .body
            .pointer("/data/token")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::unexpected("login response missing data.token"))?
            .to_string();

        self.headers = Some(build_headers(&token)?);
        self.token = Some(token);
        tracing::debug!("webglobe login succeeded");
        Ok(())
    }

    /// Issues a GET against `api_url + path`.
    pub async fn get(&self, path: &str) -> Result<Value> {
        self.dispatch(Method::GET, path, None).await
    }

    /// Issues a PUT with a JSON body.
    pub async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        self.dispatch(Method::PUT, path, Some(body.to_string())).await
    }

    /// Issues a POST with a JSON body.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.dispatch(Method::POST, path, Some(body.to_string())).await
    }

    /// Issues a DELETE. No request body is sent.
    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.dispatch(Method::DELETE, path, None).await
    }

    /// Lists the account's active zones.
    ///
    /// Fetches the full domain list and surfaces only domains whose status
    /// is `"hotovo"` (the provider's ready state). Re-fetched on every
    /// call, never cached.
    pub async fn zones(&self) -> Result<ResultSet<Zone<'_, C>>> {
        let body = self.get("/domains?full=true").await?;

        let domains = body
            .pointer("/domains/reg_domains/data")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::unexpected("domain list missing domains.reg_domains.data"))?;

        let zones = domains
            .iter()
            .filter(|d| d.get("status").and_then(Value::as_str) == Some(ZONE_STATUS_ACTIVE))
            .map(|d| Zone::from_json(self, d))
            .collect::<Result<Vec<_>>>()?;

        Ok(ResultSet::new(zones))
    }

    async fn dispatch(&self, method: Method, path: &str, body: Option<String>) -> Result<Value> {
        let url = format!("{}{}", self.api_url, path);
        // Unauthenticated calls go out without headers; the server rejects
        // them with a non-200 that surfaces through raise_on_err.
        let headers = self.headers.clone().unwrap_or_default();

        let response = self.http.request(method, url, headers, body).await?;
        raise_on_err(response)
    }
}

/// Headers attached to every authenticated request.
fn build_headers(token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token))?,
    );
    Ok(headers)
}

/// Accepts the body of a 200 response, maps anything else to a typed error.
fn raise_on_err(response: ApiResponse) -> Result<Value> {
    if response.status.as_u16() == 200 {
        return Ok(response.body);
    }

    let (code, message) = error_object(&response)?;
    Err(Error::from_api_code(code, message))
}

/// Pulls `{error: {code, message}}` out of a failure response.
fn error_object(response: &ApiResponse) -> Result<(i64, String)> {
    let error = response.body.get("error").ok_or_else(|| {
        Error::unexpected(format!("HTTP {} without error body", response.status))
    })?;

    let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok((code, message))
}
