//! Typed client for the UserConsole BFF API.
//!
//! The thin wrapper UI components talk to: it shapes outgoing form models
//! into the wire schema, parses responses into the shared types, and
//! normalizes error bodies. Statistics fetching degrades to zeroed values
//! instead of surfacing a failure to the render layer.

use bytes::Bytes;
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;

use user_console_common::{
    ActiveStats, CreateUserRequest, ErrorBody, MonthlyRegistration, Role, RoleDistribution,
    UpdateUserRequest, User, UserStats,
};

/// Error returned by the client data service.
///
/// `Api` carries the parsed uniform error body, so callers can surface
/// per-field validation messages next to their form inputs.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(String),
    #[error("invalid response body: {0}")]
    InvalidBody(String),
    #[error("{}", body.message)]
    Api { status: u16, body: ErrorBody },
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}

/// Form model produced by the user create/edit dialog.
#[derive(Debug, Clone)]
pub struct UserForm {
    pub email: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    /// `YYYY-MM-DD`, as entered in the date picker.
    pub date_of_birth: String,
    pub role_id: i64,
    pub is_active: bool,
    pub country: String,
    pub avatar_url: Option<String>,
}

impl UserForm {
    /// Shape the form model into the wire schema. An absent middle name is
    /// sent as an empty string, which is what the user-service expects.
    fn into_request(self) -> CreateUserRequest {
        CreateUserRequest {
            email: Some(self.email),
            first_name: Some(self.first_name),
            middle_name: Some(self.middle_name.unwrap_or_default()),
            last_name: Some(self.last_name),
            date_of_birth: Some(self.date_of_birth),
            role_id: Some(self.role_id),
            is_active: Some(self.is_active),
            country: Some(self.country),
            avatar_url: self.avatar_url,
        }
    }
}

/// Partial form edit; only provided fields are sent to the BFF.
#[derive(Debug, Clone, Default)]
pub struct UserFormPatch {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub role_id: Option<i64>,
    pub is_active: Option<bool>,
    pub country: Option<String>,
    pub avatar_url: Option<String>,
}

impl UserFormPatch {
    fn into_request(self) -> UpdateUserRequest {
        UpdateUserRequest {
            email: self.email,
            first_name: self.first_name,
            middle_name: self.middle_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            role_id: self.role_id,
            is_active: self.is_active,
            country: self.country,
            avatar_url: self.avatar_url,
        }
    }
}

/// A downloaded user document.
#[derive(Debug, Clone)]
pub struct UserDocument {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Client data service for the UserConsole BFF.
pub struct UserConsoleClient {
    http_client: Client,
    base_url: String,
}

impl UserConsoleClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.get_json("/users").await
    }

    pub async fn get_user(&self, id: i64) -> Result<User, ClientError> {
        self.get_json(&format!("/users/{}", id)).await
    }

    pub async fn create_user(&self, form: UserForm) -> Result<User, ClientError> {
        let url = format!("{}/users", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .json(&form.into_request())
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;
        Self::parse(response).await
    }

    pub async fn update_user(&self, id: i64, patch: UserFormPatch) -> Result<User, ClientError> {
        let url = format!("{}/users/{}", self.base_url, id);
        let response = self
            .http_client
            .put(&url)
            .json(&patch.into_request())
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;
        Self::parse(response).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ClientError> {
        let url = format!("{}/users/{}", self.base_url, id);
        let response = self
            .http_client
            .delete(&url)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;
        Self::check(response).await.map(|_| ())
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>, ClientError> {
        self.get_json("/roles").await
    }

    pub async fn get_role(&self, id: i64) -> Result<Role, ClientError> {
        self.get_json(&format!("/roles/{}", id)).await
    }

    /// Fetch the dashboard statistics. Each sub-resource that fails is
    /// replaced by zeroed/empty values so the dashboard always renders.
    pub async fn user_stats(&self) -> UserStats {
        let active: ActiveStats = match self.get_json("/stats/active").await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!("active/inactive stats unavailable: {}", e);
                ActiveStats::default()
            }
        };
        let role_distribution: RoleDistribution = match self.get_json("/stats/roles").await {
            Ok(dist) => dist,
            Err(e) => {
                tracing::warn!("role distribution unavailable: {}", e);
                RoleDistribution::default()
            }
        };
        let monthly_registrations: Vec<MonthlyRegistration> =
            match self.get_json("/stats/registration").await {
                Ok(months) => months,
                Err(e) => {
                    tracing::warn!("registration stats unavailable: {}", e);
                    Vec::new()
                }
            };

        UserStats {
            active_count: active.active_count,
            inactive_count: active.inactive_count,
            role_distribution,
            monthly_registrations,
        }
    }

    /// Download the generated document for a user. The filename comes from
    /// the disposition header, falling back to `user-<id>.pdf`.
    pub async fn download_user_pdf(&self, id: i64) -> Result<UserDocument, ClientError> {
        let url = format!("{}/pdf/{}", self.base_url, id);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;
        let response = Self::check(response).await?;

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/pdf")
            .to_string();
        let filename = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| format!("user-{}.pdf", id));

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::InvalidBody(e.to_string()))?;

        Ok(UserDocument {
            filename,
            content_type,
            bytes,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;
        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let response = Self::check(response).await?;
        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidBody(e.to_string()))
    }

    /// Turn a non-success response into a normalized [`ClientError::Api`].
    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .json::<ErrorBody>()
            .await
            .unwrap_or_else(|_| ErrorBody::message(format!("Request failed with status {}", status)));
        Err(ClientError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

/// Pull a filename out of a `Content-Disposition` header value.
fn filename_from_disposition(value: &str) -> Option<String> {
    let marker = "filename=";
    let start = value.find(marker)? + marker.len();
    let raw = value[start..].split(';').next()?.trim();
    let name = raw.trim_matches('"').trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
