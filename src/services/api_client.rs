use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::catalog::LearningArea;
use crate::models::{Module, User, UserRegistration};
use crate::session::UserContext;

pub const UNAUTHORIZED_CODE: &str = "UNAUTHORIZED";

const REGISTER_FAILED: &str = "Failed to register user. Please try again.";
const MODULES_FAILED: &str = "Failed to fetch modules. Please try again.";
const MODULE_CONTENT_FAILED: &str = "Failed to fetch module content. Please try again.";
const PROGRESS_FAILED: &str = "Failed to update progress.";

/// Uniform envelope for every remote call, successful or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
            code: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
            code: None,
        }
    }

    pub fn unauthorized(error: impl Into<String>) -> Self {
        Self {
            code: Some(UNAUTHORIZED_CODE.to_string()),
            ..Self::failure(error)
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code.as_deref() == Some(UNAUTHORIZED_CODE)
    }

    /// Data only when the call succeeded and carried a payload; otherwise
    /// the server's error or `fallback`.
    pub fn into_data(self, fallback: &str) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self.error.unwrap_or_else(|| fallback.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },
    #[error("credentials rejected")]
    Unauthorized,
    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressUpdate<'a> {
    learning_area: LearningArea,
    module_id: &'a str,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    session: Arc<UserContext>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration, session: Arc<UserContext>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn register_user(&self, registration: &UserRegistration) -> ApiResponse<User> {
        let request = self.client.post(self.url("/users/register")).json(registration);
        let result = self.send(request).await;
        self.settle(result, "register_user", REGISTER_FAILED)
    }

    pub async fn get_modules(&self, area: LearningArea) -> ApiResponse<Vec<Module>> {
        let request = self
            .client
            .get(self.url(&format!("/learning/{}/modules", area.as_str())));
        let result = self.send(request).await;
        self.settle(result, "get_modules", MODULES_FAILED)
    }

    pub async fn get_module_content(
        &self,
        area: LearningArea,
        module_id: &str,
    ) -> ApiResponse<Module> {
        let path = format!(
            "/learning/{}/modules/{}",
            area.as_str(),
            urlencoding::encode(module_id)
        );
        let result = self.send(self.client.get(self.url(&path))).await;
        self.settle(result, "get_module_content", MODULE_CONTENT_FAILED)
    }

    /// Goes around the interceptors: no token, no 401 handling. The
    /// timestamp query keeps intermediaries from serving a cached reply.
    pub async fn update_progress(
        &self,
        area: LearningArea,
        module_id: &str,
    ) -> ApiResponse<serde_json::Value> {
        let url = self.url(&format!(
            "/learning/progress/update?_={}",
            Utc::now().timestamp_millis()
        ));
        let body = ProgressUpdate {
            learning_area: area,
            module_id,
        };

        let response = match self.client.post(&url).json(&body).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "update_progress request failed");
                return ApiResponse::failure(PROGRESS_FAILED);
            }
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(error = %err, "update_progress body read failed");
                return ApiResponse::failure(PROGRESS_FAILED);
            }
        };

        if !status.is_success() {
            let detail = error_detail(&bytes);
            warn!(%status, detail = ?detail, "update_progress rejected");
            return ApiResponse::failure(detail.unwrap_or_else(|| PROGRESS_FAILED.to_string()));
        }

        serde_json::from_slice(&bytes).unwrap_or_else(|err| {
            warn!(error = %err, "update_progress returned an unexpected body");
            ApiResponse::failure(PROGRESS_FAILED)
        })
    }

    pub async fn health_check(&self) -> bool {
        let request = self.authorize(self.client.get(self.url("/health")));
        match request.send().await {
            Ok(response) if response.status() == StatusCode::UNAUTHORIZED => {
                warn!(operation = "health_check", "api rejected credentials, session cleared");
                self.session.expire();
                false
            }
            Ok(response) => response.status() == StatusCode::OK,
            Err(err) => {
                tracing::debug!(error = %err, "health check failed");
                false
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ApiResponse<T>, ApiError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.session.expire();
            return Err(ApiError::Unauthorized);
        }

        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    fn settle<T>(
        &self,
        result: Result<ApiResponse<T>, ApiError>,
        operation: &'static str,
        fallback: &str,
    ) -> ApiResponse<T> {
        match result {
            Ok(response) => response,
            Err(ApiError::Unauthorized) => {
                warn!(operation, "api rejected credentials, session cleared");
                ApiResponse::unauthorized(fallback)
            }
            Err(err) => {
                warn!(operation, error = %err, "api call failed");
                ApiResponse::failure(fallback)
            }
        }
    }
}

fn error_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("detail")
        .and_then(|detail| detail.as_str())
        .filter(|detail| !detail.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_data_requires_success_and_payload() {
        assert_eq!(ApiResponse::ok(3).into_data("nope"), Ok(3));

        let empty: ApiResponse<i32> = ApiResponse {
            success: true,
            data: None,
            message: None,
            error: None,
            code: None,
        };
        assert_eq!(empty.into_data("nope"), Err("nope".to_string()));

        let failed: ApiResponse<i32> = ApiResponse::failure("boom");
        assert_eq!(failed.into_data("nope"), Err("boom".to_string()));
    }

    #[test]
    fn unauthorized_is_tagged() {
        let response: ApiResponse<()> = ApiResponse::unauthorized("x");
        assert!(response.is_unauthorized());
        assert!(!response.success);
        assert!(!ApiResponse::<()>::failure("x").is_unauthorized());
    }

    #[test]
    fn error_detail_reads_string_detail_only() {
        assert_eq!(
            error_detail(br#"{"detail": "Module not found"}"#).as_deref(),
            Some("Module not found")
        );
        assert!(error_detail(br#"{"detail": [{"loc": ["body"]}]}"#).is_none());
        assert!(error_detail(b"<html>").is_none());
    }

    #[test]
    fn envelope_parses_without_data_field() {
        let parsed: ApiResponse<Module> =
            serde_json::from_str(r#"{"success": true, "message": "queued"}"#).unwrap();
        assert!(parsed.success);
        assert!(parsed.data.is_none());
        assert_eq!(parsed.message.as_deref(), Some("queued"));
    }

    #[test]
    fn envelope_parses_without_optional_fields() {
        let parsed: ApiResponse<Vec<Module>> =
            serde_json::from_str(r#"{"success": false, "error": "down"}"#).unwrap();
        assert!(!parsed.success);
        assert!(parsed.data.is_none());
        assert_eq!(parsed.error.as_deref(), Some("down"));
    }
}
