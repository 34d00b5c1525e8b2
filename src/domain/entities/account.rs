//! Account entity owning custom domains.

use crate::domain::quota::PlanTier;
use chrono::{DateTime, Utc};

/// An account that can register custom domains.
///
/// Accounts are managed outside this subsystem (the admin CLI creates them);
/// the domain flow only reads the plan tier for quota decisions.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub plan: PlanTier,
    pub created_at: DateTime<Utc>,
}
