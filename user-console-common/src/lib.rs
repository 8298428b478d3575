//! UserConsole Common Types
//!
//! Wire types shared by the BFF backend and the client data service.

pub mod error;
pub mod role;
pub mod stats;
pub mod user;

pub use error::ErrorBody;
pub use role::Role;
pub use stats::{ActiveStats, MonthlyRegistration, RoleDistribution, UserStats};
pub use user::{CreateUserRequest, UpdateUserRequest, User, UserRole};
