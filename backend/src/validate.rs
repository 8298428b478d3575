//! Typed request validation.
//!
//! Validation failures are collected per wire field name so the UI can
//! attach messages to the offending form inputs. Parsing and validation
//! happen together: a request that passes comes out with typed fields.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use user_console_common::{CreateUserRequest, UpdateUserRequest, UserRole};

use crate::config::UnknownRolePolicy;

const MIN_AGE: u32 = 18;
const MAX_AGE: u32 = 100;
const MIN_NAME_LEN: usize = 2;

/// Field-keyed validation error collection. Keys are wire field names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }
}

/// A create request that passed validation, with parsed field types.
#[derive(Debug, Clone)]
pub struct ValidatedUser {
    pub email: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub role: UserRole,
    pub role_id: i64,
    pub is_active: bool,
    pub country: String,
    pub avatar_url: Option<String>,
}

impl ValidatedUser {
    /// Wire payload for forwarding to the upstream user-service.
    pub fn to_request(&self) -> CreateUserRequest {
        CreateUserRequest {
            email: Some(self.email.clone()),
            first_name: Some(self.first_name.clone()),
            middle_name: Some(self.middle_name.clone().unwrap_or_default()),
            last_name: Some(self.last_name.clone()),
            date_of_birth: Some(self.date_of_birth.format("%Y-%m-%d").to_string()),
            role_id: Some(self.role_id),
            is_active: Some(self.is_active),
            country: Some(self.country.clone()),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

/// A validated partial update. `None` fields are left untouched by the store.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub role: Option<(UserRole, i64)>,
    pub is_active: Option<bool>,
    pub country: Option<String>,
    pub avatar_url: Option<String>,
}

impl UserPatch {
    /// Wire payload for forwarding to the upstream user-service. Only
    /// provided fields are serialized.
    pub fn to_request(&self) -> UpdateUserRequest {
        UpdateUserRequest {
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            middle_name: self.middle_name.clone(),
            last_name: self.last_name.clone(),
            date_of_birth: self
                .date_of_birth
                .map(|d| d.format("%Y-%m-%d").to_string()),
            role_id: self.role.map(|(_, id)| id),
            is_active: self.is_active,
            country: self.country.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

/// Validate a create request. All required fields must be present and
/// well-formed; nothing is inserted when this fails.
pub fn new_user(
    req: &CreateUserRequest,
    policy: UnknownRolePolicy,
) -> Result<ValidatedUser, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let email = require_email(req.email.as_deref(), &mut errors);
    let first_name = require_name("firstName", "First name", req.first_name.as_deref(), &mut errors);
    let last_name = require_name("lastName", "Last name", req.last_name.as_deref(), &mut errors);
    let date_of_birth = require_birth_date(req.date_of_birth.as_deref(), &mut errors);
    let role = resolve_role(req.role_id, policy, &mut errors);
    let is_active = match req.is_active {
        Some(v) => Some(v),
        None => {
            errors.push("isActive", "isActive is required");
            None
        }
    };
    let country = require_country(req.country.as_deref(), &mut errors);
    let avatar_url = check_avatar_url(req.avatar_url.as_deref(), &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    // All Nones were reported above, so the unwraps cannot be reached on
    // the error-free path.
    let (role, role_id) = role.unwrap_or((UserRole::User, 2));
    Ok(ValidatedUser {
        email: email.unwrap_or_default(),
        first_name: first_name.unwrap_or_default(),
        middle_name: normalize_optional(req.middle_name.as_deref()),
        last_name: last_name.unwrap_or_default(),
        date_of_birth: date_of_birth.unwrap_or_default(),
        role,
        role_id,
        is_active: is_active.unwrap_or_default(),
        country: country.unwrap_or_default(),
        avatar_url,
    })
}

/// Validate a partial update. Only provided fields are checked; an empty
/// payload is a valid no-op patch.
pub fn user_patch(
    req: &UpdateUserRequest,
    policy: UnknownRolePolicy,
) -> Result<UserPatch, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let mut patch = UserPatch::default();

    if let Some(email) = req.email.as_deref() {
        patch.email = require_email(Some(email), &mut errors);
    }
    if let Some(name) = req.first_name.as_deref() {
        patch.first_name = require_name("firstName", "First name", Some(name), &mut errors);
    }
    if req.middle_name.is_some() {
        patch.middle_name = normalize_optional(req.middle_name.as_deref());
    }
    if let Some(name) = req.last_name.as_deref() {
        patch.last_name = require_name("lastName", "Last name", Some(name), &mut errors);
    }
    if let Some(date) = req.date_of_birth.as_deref() {
        patch.date_of_birth = require_birth_date(Some(date), &mut errors);
    }
    if req.role_id.is_some() {
        patch.role = resolve_role(req.role_id, policy, &mut errors);
    }
    patch.is_active = req.is_active;
    if let Some(country) = req.country.as_deref() {
        patch.country = require_country(Some(country), &mut errors);
    }
    if req.avatar_url.is_some() {
        patch.avatar_url = check_avatar_url(req.avatar_url.as_deref(), &mut errors);
    }

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

fn require_email(value: Option<&str>, errors: &mut ValidationErrors) -> Option<String> {
    let Some(email) = value else {
        errors.push("email", "Email is required");
        return None;
    };
    if !is_valid_email(email) {
        errors.push("email", "Please enter a valid email address");
        return None;
    }
    Some(email.to_string())
}

/// Structural email check: `local@domain.tld`, no whitespace.
fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

fn require_name(
    field: &str,
    label: &str,
    value: Option<&str>,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let Some(name) = value else {
        errors.push(field, format!("{} is required", label));
        return None;
    };
    let name = name.trim();
    if name.chars().count() < MIN_NAME_LEN {
        errors.push(
            field,
            format!("{} must be at least {} characters", label, MIN_NAME_LEN),
        );
        return None;
    }
    Some(name.to_string())
}

fn require_country(value: Option<&str>, errors: &mut ValidationErrors) -> Option<String> {
    let Some(country) = value else {
        errors.push("country", "Country is required");
        return None;
    };
    let country = country.trim();
    if country.chars().count() < MIN_NAME_LEN {
        errors.push(
            "country",
            format!("Country must be at least {} characters", MIN_NAME_LEN),
        );
        return None;
    }
    Some(country.to_string())
}

fn require_birth_date(value: Option<&str>, errors: &mut ValidationErrors) -> Option<NaiveDate> {
    let Some(raw) = value else {
        errors.push("dateOfBirth", "Date of birth is required");
        return None;
    };
    let Some(date) = parse_iso_date(raw) else {
        errors.push(
            "dateOfBirth",
            "Invalid date format. Must be in YYYY-MM-DD format",
        );
        return None;
    };
    let today = Utc::now().date_naive();
    match today.years_since(date) {
        Some(age) if (MIN_AGE..=MAX_AGE).contains(&age) => Some(date),
        _ => {
            errors.push(
                "dateOfBirth",
                format!("Age must be between {} and {} years", MIN_AGE, MAX_AGE),
            );
            None
        }
    }
}

/// Strict `YYYY-MM-DD` shape check plus calendar validity.
fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn resolve_role(
    role_id: Option<i64>,
    policy: UnknownRolePolicy,
    errors: &mut ValidationErrors,
) -> Option<(UserRole, i64)> {
    let Some(id) = role_id else {
        errors.push("roleId", "Role ID is required");
        return None;
    };
    if id <= 0 {
        errors.push("roleId", "Role ID must be a positive number");
        return None;
    }
    match UserRole::from_id(id) {
        Some(role) => Some((role, id)),
        None => match policy {
            UnknownRolePolicy::Reject => {
                errors.push("roleId", format!("Unknown role id: {}", id));
                None
            }
            // Coerce both fields so role and roleId stay consistent.
            UnknownRolePolicy::Default => {
                Some((UserRole::User, UserRole::User.id().unwrap_or(2)))
            }
        },
    }
}

fn check_avatar_url(value: Option<&str>, errors: &mut ValidationErrors) -> Option<String> {
    let url = value?.trim();
    if url.is_empty() {
        return None;
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push("avatarUrl", "Avatar URL must be a valid http(s) URL");
        return None;
    }
    Some(url.to_string())
}

fn normalize_optional(value: Option<&str>) -> Option<String> {
    match value.map(str::trim) {
        Some("") | None => None,
        Some(v) => Some(v.to_string()),
    }
}
