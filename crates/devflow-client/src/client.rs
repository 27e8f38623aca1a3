//! DevFlow API client core
//!
//! Request plumbing shared by every endpoint group: URL building, the
//! request-identity header, and the cross-cutting response policy.

use std::sync::Arc;

use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::identity::{DidStore, DID_HEADER};

pub(crate) const LOGIN_PATH: &str = "/auth/login";

/// API client for the DevFlow backend
///
/// One strongly-typed method per endpoint, grouped by resource across the
/// sibling modules. Calls carry no retries and no client-side deadline; a
/// failed call surfaces as an [`ApiError`].
#[derive(Clone)]
pub struct DevFlowClient {
    http: Client,
    base_url: String,
    did_store: Arc<dyn DidStore>,
}

impl DevFlowClient {
    /// Create a client for `base_url` (the backend origin plus `/api`)
    pub fn new(base_url: &str, did_store: Arc<dyn DidStore>) -> Result<Self, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            did_store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Connectivity probe against `GET /health/ping`
    pub async fn health(&self) -> Result<bool, ApiError> {
        let response = self.request(Method::GET, "/health/ping").send().await?;
        Ok(response.status().is_success())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, url);
        // The identity is read from the store on every call, never cached.
        if let Some(did) = self.did_store.current_did() {
            request = request.header(DID_HEADER, did);
        }
        request
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let request = self.request(Method::GET, path).query(query);
        self.dispatch(path, request).await
    }

    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        debug!(path = %path, "dispatching request");
        let response = self.request(Method::GET, path).send().await?;
        let response = check(path, response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).json(body);
        self.dispatch(path, request).await
    }

    pub(crate) async fn post_unit(&self, path: &str) -> Result<(), ApiError> {
        debug!(path = %path, "dispatching request");
        let response = self.request(Method::POST, path).send().await?;
        check(path, response).await.map(|_| ())
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path).json(body);
        self.dispatch(path, request).await
    }

    pub(crate) async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PATCH, path).json(body);
        self.dispatch(path, request).await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.request(Method::DELETE, path);
        self.dispatch(path, request).await
    }

    pub(crate) async fn delete_unit(&self, path: &str) -> Result<(), ApiError> {
        debug!(path = %path, "dispatching request");
        let response = self.request(Method::DELETE, path).send().await?;
        check(path, response).await.map(|_| ())
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        debug!(path = %path, "dispatching request");
        let response = request.send().await?;
        let response = check(path, response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

/// Apply the cross-cutting response policy to a completed response
async fn check(path: &str, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let error = classify_response(path, status, error_message(status, &body));
    if error.is_auth_error() {
        warn!(path = %path, status = %status, "unauthorized request");
    }
    Err(error)
}

/// Map a non-success status to the tagged error taxonomy
///
/// 401/403 on the login path means the credentials were wrong; the same
/// statuses anywhere else mean the session is gone and the caller must
/// re-authenticate. Everything else keeps the server's message.
pub(crate) fn classify_response(path: &str, status: StatusCode, message: String) -> ApiError {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        if path == LOGIN_PATH {
            ApiError::BadCredentials
        } else {
            ApiError::SessionExpired
        }
    } else {
        ApiError::Api { status, message }
    }
}

/// Server-provided `message` field when the body is JSON, the raw body text
/// otherwise, or the canonical status reason for an empty body
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.trim().to_string()
    }
}

// ============================================
// Shared response envelopes
// ============================================

/// Detail envelope used by the CRUD endpoints
#[derive(Debug, Deserialize)]
pub struct DetailResponse<T> {
    pub success: bool,
    pub data: T,
}

/// List envelope used by the CRUD endpoints
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub total: u64,
}

/// Acknowledgement envelope for deletes and batch actions
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_login_is_bad_credentials() {
        let error = classify_response(
            LOGIN_PATH,
            StatusCode::UNAUTHORIZED,
            "Invalid username or password".to_string(),
        );
        assert!(matches!(error, ApiError::BadCredentials));
    }

    #[test]
    fn test_forbidden_login_is_bad_credentials() {
        let error = classify_response(LOGIN_PATH, StatusCode::FORBIDDEN, String::new());
        assert!(matches!(error, ApiError::BadCredentials));
    }

    #[test]
    fn test_unauthorized_elsewhere_is_session_expired() {
        let error = classify_response(
            "/user-stories",
            StatusCode::UNAUTHORIZED,
            String::new(),
        );
        assert!(matches!(error, ApiError::SessionExpired));
    }

    #[test]
    fn test_other_statuses_keep_server_message() {
        let error = classify_response(
            "/projects",
            StatusCode::UNPROCESSABLE_ENTITY,
            "name must not be blank".to_string(),
        );
        match error {
            ApiError::Api { status, message } => {
                assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
                assert_eq!(message, "name must not be blank");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_message_prefers_json_message_field() {
        let message = error_message(
            StatusCode::BAD_REQUEST,
            r#"{"success":false,"message":"title is required"}"#,
        );
        assert_eq!(message, "title is required");
    }

    #[test]
    fn test_error_message_falls_back_to_body_then_reason() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, ""),
            "Bad Gateway"
        );
    }
}
