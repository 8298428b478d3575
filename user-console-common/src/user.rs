//! User model and the create/update wire payloads.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Closed role enumeration used across the API.
///
/// A role string outside the catalog deserializes to [`UserRole::Unknown`]
/// so one malformed upstream record cannot fail an entire collection fetch.
/// `Unknown` never originates locally and is excluded from every
/// statistics bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    User,
    Guest,
    #[serde(other)]
    Unknown,
}

impl UserRole {
    /// Numeric role reference used by the user-service catalog.
    pub fn id(self) -> Option<i64> {
        match self {
            UserRole::Admin => Some(1),
            UserRole::User => Some(2),
            UserRole::Guest => Some(3),
            UserRole::Unknown => None,
        }
    }

    pub fn from_id(id: i64) -> Option<UserRole> {
        match id {
            1 => Some(UserRole::Admin),
            2 => Some(UserRole::User),
            3 => Some(UserRole::Guest),
            _ => None,
        }
    }

    pub fn is_known(self) -> bool {
        self != UserRole::Unknown
    }
}

/// User record as returned by the API.
///
/// `id` is unique within the store and never reassigned; `createdAt` is set
/// once at insertion and never changed by updates. `role` and `roleId`
/// stay mutually consistent whenever both are known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub role: UserRole,
    pub role_id: i64,
    pub is_active: bool,
    pub country: String,
    pub created_at: DateTime<Utc>,
    /// Opaque avatar reference; upload handling lives outside this layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Payload for `POST /users`.
///
/// Every field is optional at the serde level so that a missing field
/// surfaces as a per-field validation error instead of a body-level
/// deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Payload for `PUT /users/{id}` - partial patch.
///
/// Only fields present in the payload are applied; `id` and `createdAt`
/// are never part of this payload and can never be overwritten by it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}
