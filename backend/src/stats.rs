//! Statistics aggregation over a user collection snapshot.
//!
//! All functions are pure and deterministic: statistics are recomputed
//! from the current snapshot on every request and never cached, and input
//! order does not affect any output.

use std::collections::BTreeMap;

use user_console_common::{ActiveStats, MonthlyRegistration, RoleDistribution, User, UserRole, UserStats};

/// Partition the collection by the active flag. The two counts always sum
/// to the collection size.
pub fn active_split(users: &[User]) -> ActiveStats {
    let active_count = users.iter().filter(|u| u.is_active).count() as u64;
    ActiveStats {
        active_count,
        inactive_count: users.len() as u64 - active_count,
    }
}

/// Count users per known role. Records with an unrecognized role land in
/// no bucket; that is a documented edge case, not an error.
pub fn role_distribution(users: &[User]) -> RoleDistribution {
    let mut dist = RoleDistribution::default();
    for user in users {
        match user.role {
            UserRole::Admin => dist.admin += 1,
            UserRole::User => dist.user += 1,
            UserRole::Guest => dist.guest += 1,
            UserRole::Unknown => {}
        }
    }
    dist
}

/// Group registrations by creation month.
///
/// Keys are `"YYYY-MM"`, so the BTreeMap's lexicographic order is the
/// chronological order. Months without registrations are omitted, never
/// zero-filled.
pub fn monthly_registrations(users: &[User]) -> Vec<MonthlyRegistration> {
    let mut by_month: BTreeMap<String, u64> = BTreeMap::new();
    for user in users {
        let key = user.created_at.format("%Y-%m").to_string();
        *by_month.entry(key).or_insert(0) += 1;
    }
    by_month
        .into_iter()
        .map(|(month, count)| MonthlyRegistration { month, count })
        .collect()
}

/// Full dashboard statistics for a snapshot. An empty collection yields
/// all-zero counts and an empty histogram.
pub fn user_stats(users: &[User]) -> UserStats {
    let active = active_split(users);
    UserStats {
        active_count: active.active_count,
        inactive_count: active.inactive_count,
        role_distribution: role_distribution(users),
        monthly_registrations: monthly_registrations(users),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn user(id: i64, role: UserRole, is_active: bool, created: (i32, u32, u32)) -> User {
        User {
            id,
            email: format!("user{}@example.com", id),
            first_name: "Test".to_string(),
            middle_name: None,
            last_name: "User".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
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

    #[test]
    fn test_empty_collection_yields_zeroes() {
        let stats = user_stats(&[]);
        assert_eq!(stats.active_count, 0);
        assert_eq!(stats.inactive_count, 0);
        assert_eq!(stats.role_distribution.total(), 0);
        assert!(stats.monthly_registrations.is_empty());
    }

    #[test]
    fn test_active_and_inactive_sum_to_collection_size() {
        let users = vec![
            user(1, UserRole::Admin, true, (2023, 1, 10)),
            user(2, UserRole::User, false, (2023, 1, 20)),
            user(3, UserRole::Guest, true, (2023, 3, 5)),
            user(4, UserRole::User, false, (2023, 3, 6)),
        ];
        let split = active_split(&users);
        assert_eq!(split.active_count, 2);
        assert_eq!(split.inactive_count, 2);
        assert_eq!(
            split.active_count + split.inactive_count,
            users.len() as u64
        );
    }

    #[test]
    fn test_unknown_role_excluded_from_every_bucket() {
        let users = vec![
            user(1, UserRole::Admin, true, (2023, 1, 10)),
            user(2, UserRole::Unknown, true, (2023, 1, 11)),
            user(3, UserRole::User, true, (2023, 1, 12)),
        ];
        let dist = role_distribution(&users);
        assert_eq!(dist.admin, 1);
        assert_eq!(dist.user, 1);
        assert_eq!(dist.guest, 0);
        // Distribution total counts only recognized roles.
        assert_eq!(dist.total(), 2);
    }

    #[test]
    fn test_monthly_histogram_sorted_and_sparse() {
        // Registrations in 2023-01 (x2) and 2023-03 must produce no
        // 2023-02 entry.
        let users = vec![
            user(3, UserRole::User, true, (2023, 3, 5)),
            user(1, UserRole::Admin, true, (2023, 1, 10)),
            user(2, UserRole::User, false, (2023, 1, 20)),
        ];
        let months = monthly_registrations(&users);
        assert_eq!(
            months,
            vec![
                MonthlyRegistration {
                    month: "2023-01".to_string(),
                    count: 2
                },
                MonthlyRegistration {
                    month: "2023-03".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_month_keys_are_zero_padded() {
        let users = vec![user(1, UserRole::User, true, (2024, 9, 30))];
        let months = monthly_registrations(&users);
        assert_eq!(months[0].month, "2024-09");
    }

    #[test]
    fn test_input_order_does_not_change_output() {
        let mut users = vec![
            user(1, UserRole::Admin, true, (2022, 12, 1)),
            user(2, UserRole::User, false, (2023, 2, 1)),
            user(3, UserRole::Guest, true, (2023, 1, 15)),
        ];
        let forward = user_stats(&users);
        users.reverse();
        let backward = user_stats(&users);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_histogram_has_no_duplicate_keys() {
        let users = vec![
            user(1, UserRole::User, true, (2023, 5, 1)),
            user(2, UserRole::User, true, (2023, 5, 15)),
            user(3, UserRole::User, true, (2023, 5, 31)),
        ];
        let months = monthly_registrations(&users);
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].count, 3);
    }
}
