//! Role catalog entry.

use serde::{Deserialize, Serialize};

/// Role catalog entry owned by the upstream user-service.
///
/// The BFF exposes these read-only; mutation goes through the service
/// that owns the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}
