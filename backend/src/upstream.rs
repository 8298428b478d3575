//! HTTP client for the upstream user-service API.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use user_console_common::{CreateUserRequest, Role, UpdateUserRequest, User};

/// Client for the user-service REST API.
///
/// One attempt per operation, bounded by the configured timeout; nothing
/// is retried at this layer.
#[derive(Clone)]
pub struct UserServiceClient {
    http_client: Client,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("resource not found")]
    NotFound,
    #[error("user-service error: {0}")]
    Upstream(String),
}

/// Raw active/inactive payload as served by the user-service. Missing
/// fields default to zero instead of failing the fetch.
#[derive(Debug, Default, Deserialize)]
pub struct RawActiveStats {
    #[serde(default)]
    pub active: u64,
    #[serde(default)]
    pub inactive: u64,
    #[serde(default)]
    pub total: u64,
}

/// One row of the role distribution payload.
#[derive(Debug, Deserialize)]
pub struct RawRoleCount {
    pub role: String,
    #[serde(default)]
    pub count: u64,
}

/// One row of the per-month registration payload. Year and month arrive
/// as separate integers.
#[derive(Debug, Deserialize)]
pub struct RawMonthlyCount {
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub month: u32,
    #[serde(default)]
    pub count: u64,
}

impl UserServiceClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, UpstreamError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| UpstreamError::RequestFailed(e.to_string()))?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn list_users(&self) -> Result<Vec<User>, UpstreamError> {
        self.get_json("/users").await
    }

    pub async fn get_user(&self, id: i64) -> Result<User, UpstreamError> {
        self.get_json(&format!("/users/{}", id)).await
    }

    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User, UpstreamError> {
        let url = format!("{}/users", self.base_url);
        tracing::debug!("POST {}", url);
        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| UpstreamError::RequestFailed(e.to_string()))?;
        Self::into_json(response).await
    }

    pub async fn update_user(
        &self,
        id: i64,
        request: &UpdateUserRequest,
    ) -> Result<User, UpstreamError> {
        let url = format!("{}/users/{}", self.base_url, id);
        tracing::debug!("PUT {}", url);
        let response = self
            .http_client
            .put(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| UpstreamError::RequestFailed(e.to_string()))?;
        Self::into_json(response).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), UpstreamError> {
        let url = format!("{}/users/{}", self.base_url, id);
        tracing::debug!("DELETE {}", url);
        let response = self
            .http_client
            .delete(&url)
            .send()
            .await
            .map_err(|e| UpstreamError::RequestFailed(e.to_string()))?;
        Self::check_status(response).await.map(|_| ())
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, UpstreamError> {
        self.get_json("/Roles").await
    }

    pub async fn get_role(&self, id: i64) -> Result<Role, UpstreamError> {
        self.get_json(&format!("/Roles/{}", id)).await
    }

    pub async fn active_stats(&self) -> Result<RawActiveStats, UpstreamError> {
        self.get_json("/Stats/active").await
    }

    pub async fn role_stats(&self) -> Result<Vec<RawRoleCount>, UpstreamError> {
        self.get_json("/Stats/roles").await
    }

    pub async fn registration_stats(&self) -> Result<Vec<RawMonthlyCount>, UpstreamError> {
        self.get_json("/Stats/registration").await
    }

    /// Fetch the generated document for a user. Returns the raw response
    /// so the caller can relay headers and stream the body.
    pub async fn user_pdf(&self, id: i64) -> Result<Response, UpstreamError> {
        let url = format!("{}/Pdf/{}", self.base_url, id);
        tracing::debug!("GET {}", url);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| UpstreamError::RequestFailed(e.to_string()))?;
        Self::check_status(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| UpstreamError::RequestFailed(e.to_string()))?;
        Self::into_json(response).await
    }

    async fn into_json<T: DeserializeOwned>(response: Response) -> Result<T, UpstreamError> {
        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))
    }

    async fn check_status(response: Response) -> Result<Response, UpstreamError> {
        match response.status() {
            StatusCode::NOT_FOUND => Err(UpstreamError::NotFound),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                Err(UpstreamError::Upstream(format!("{}: {}", status, body)))
            }
            _ => Ok(response),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = UserServiceClient::new("http://localhost:5000/api/", 5).unwrap();
        assert_eq!(client.base_url, "http://localhost:5000/api");
    }

    #[test]
    fn test_raw_active_stats_tolerates_missing_fields() {
        let raw: RawActiveStats = serde_json::from_str(r#"{"active": 7}"#).unwrap();
        assert_eq!(raw.active, 7);
        assert_eq!(raw.inactive, 0);
        assert_eq!(raw.total, 0);
    }

    #[test]
    fn test_raw_monthly_count_shape() {
        let rows: Vec<RawMonthlyCount> =
            serde_json::from_str(r#"[{"year":2023,"month":1,"count":2}]"#).unwrap();
        assert_eq!(rows[0].year, 2023);
        assert_eq!(rows[0].month, 1);
        assert_eq!(rows[0].count, 2);
    }
}
