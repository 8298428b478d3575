//! Derived statistics shapes for the dashboard.
//!
//! Canonical field names are `activeCount` / `inactiveCount`; the raw
//! `active` / `inactive` variants served by the user-service are renamed
//! at the BFF boundary and never reach consumers of these types.

use serde::{Deserialize, Serialize};

/// Active/inactive split of the user collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveStats {
    #[serde(default)]
    pub active_count: u64,
    #[serde(default)]
    pub inactive_count: u64,
}

/// Users per role bucket. Wire field names are the role names themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDistribution {
    #[serde(default, rename = "Admin")]
    pub admin: u64,
    #[serde(default, rename = "User")]
    pub user: u64,
    #[serde(default, rename = "Guest")]
    pub guest: u64,
}

impl RoleDistribution {
    /// Number of records counted into any bucket.
    pub fn total(&self) -> u64 {
        self.admin + self.user + self.guest
    }
}

/// One month of the registration histogram. `month` is `"YYYY-MM"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRegistration {
    pub month: String,
    #[serde(default)]
    pub count: u64,
}

/// Statistics snapshot for the dashboard.
///
/// Derived from the current user collection on every request; there is no
/// independent lifecycle, caching, or incremental maintenance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    #[serde(default)]
    pub active_count: u64,
    #[serde(default)]
    pub inactive_count: u64,
    #[serde(default)]
    pub role_distribution: RoleDistribution,
    #[serde(default)]
    pub monthly_registrations: Vec<MonthlyRegistration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_wire_field_names() {
        let stats = UserStats {
            active_count: 3,
            inactive_count: 1,
            role_distribution: RoleDistribution {
                admin: 1,
                user: 2,
                guest: 1,
            },
            monthly_registrations: vec![MonthlyRegistration {
                month: "2023-01".to_string(),
                count: 2,
            }],
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains(r#""activeCount":3"#));
        assert!(json.contains(r#""inactiveCount":1"#));
        assert!(json.contains(r#""roleDistribution":{"Admin":1,"User":2,"Guest":1}"#));
        assert!(json.contains(r#""monthlyRegistrations":[{"month":"2023-01","count":2}]"#));
    }

    #[test]
    fn test_missing_numeric_fields_default_to_zero() {
        let stats: ActiveStats = serde_json::from_str("{}").unwrap();
        assert_eq!(stats.active_count, 0);
        assert_eq!(stats.inactive_count, 0);

        let dist: RoleDistribution = serde_json::from_str(r#"{"Admin":4}"#).unwrap();
        assert_eq!(dist.admin, 4);
        assert_eq!(dist.user, 0);
        assert_eq!(dist.total(), 4);
    }
}
