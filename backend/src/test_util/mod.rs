pub mod mock_upstream;

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use user_console_common::{User, UserRole};

use crate::config::{
    Config, CorsConfig, LoggingConfig, ServerConfig, StoreConfig, StoreMode, UnknownRolePolicy,
    UpstreamConfig, ValidationConfig,
};
use crate::store::{MemoryStore, RemoteStore};
use crate::upstream::UserServiceClient;
use crate::AppState;

pub fn test_config(mode: StoreMode, upstream_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        upstream: UpstreamConfig {
            base_url: upstream_url.to_string(),
            timeout_secs: 5,
        },
        store: StoreConfig { mode },
        validation: ValidationConfig {
            unknown_role_policy: UnknownRolePolicy::Reject,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
        cors: CorsConfig {
            origins: "*".to_string(),
        },
    }
}

/// State backed by the in-memory store, seeded with `users`.
pub fn memory_state(users: Vec<User>) -> Arc<AppState> {
    memory_state_with_config(
        users,
        test_config(StoreMode::Memory, "http://localhost:5000/api"),
    )
}

pub fn memory_state_with_config(users: Vec<User>, config: Config) -> Arc<AppState> {
    let upstream = UserServiceClient::new(&config.upstream.base_url, config.upstream.timeout_secs)
        .expect("reqwest client");
    Arc::new(AppState {
        config,
        store: Arc::new(MemoryStore::with_users(users)),
        upstream,
    })
}

/// State proxying everything to `upstream_url` (a wiremock server in tests).
pub fn remote_state(upstream_url: &str) -> Arc<AppState> {
    let config = test_config(StoreMode::Remote, upstream_url);
    let upstream = UserServiceClient::new(&config.upstream.base_url, config.upstream.timeout_secs)
        .expect("reqwest client");
    Arc::new(AppState {
        config,
        store: Arc::new(RemoteStore::new(upstream.clone())),
        upstream,
    })
}

/// Fixture user with a deterministic creation timestamp.
pub fn sample_user(id: i64, role: UserRole, is_active: bool, created: (i32, u32, u32)) -> User {
    User {
        id,
        email: format!("user{}@example.com", id),
        first_name: "Test".to_string(),
        middle_name: None,
        last_name: format!("User{}", id),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date"),
        role,
        role_id: role.id().unwrap_or(0),
        is_active,
        country: "Sweden".to_string(),
        created_at: Utc
            .with_ymd_and_hms(created.0, created.1, created.2, 12, 0, 0)
            .unwrap(),
        avatar_url: None,
    }
}

/// Complete, valid `POST /users` body.
pub fn valid_create_body() -> serde_json::Value {
    serde_json::json!({
        "email": "jane.doe@example.com",
        "firstName": "Jane",
        "lastName": "Doe",
        "dateOfBirth": "1990-05-14",
        "roleId": 2,
        "isActive": true,
        "country": "Norway"
    })
}
