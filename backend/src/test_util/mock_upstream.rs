//! JSON payload builders for a mocked user-service.

use serde_json::{json, Value};

/// Wire user as served by the user-service.
pub fn user_json(id: i64) -> Value {
    json!({
        "id": id,
        "email": format!("user{}@example.com", id),
        "firstName": "Remote",
        "lastName": format!("User{}", id),
        "dateOfBirth": "1985-07-20",
        "role": "User",
        "roleId": 2,
        "isActive": true,
        "country": "Finland",
        "createdAt": "2023-02-01T08:00:00Z"
    })
}

pub fn role_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{} role", name)
    })
}

/// Raw active/inactive payload with the upstream field names.
pub fn active_stats_json(active: u64, inactive: u64) -> Value {
    json!({
        "active": active,
        "inactive": inactive,
        "total": active + inactive
    })
}

/// Raw role distribution rows.
pub fn role_stats_json(rows: &[(&str, u64)]) -> Value {
    Value::Array(
        rows.iter()
            .map(|(role, count)| json!({"role": role, "count": count}))
            .collect(),
    )
}

/// Raw registration rows with split year/month integers.
pub fn registration_stats_json(rows: &[(i32, u32, u64)]) -> Value {
    Value::Array(
        rows.iter()
            .map(|(year, month, count)| json!({"year": year, "month": month, "count": count}))
            .collect(),
    )
}

pub fn error_json(message: &str) -> Value {
    json!({ "message": message })
}
