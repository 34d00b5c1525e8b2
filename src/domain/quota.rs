//! Plan-tier quota policy for domain registration.

use std::fmt;
use std::str::FromStr;

/// Subscription tier of an account.
///
/// Tiers are stored as text in the database and parsed at the repository
/// boundary, so the policy below matches on an enum rather than comparing
/// strings. Adding a tier means adding a variant and fixing the resulting
/// compile errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanTier {
    Free,
    Paid,
}

impl PlanTier {
    /// Maximum number of domains the tier may hold, `None` meaning unbounded.
    pub fn domain_limit(&self) -> Option<i64> {
        match self {
            PlanTier::Free => Some(1),
            PlanTier::Paid => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Paid => "paid",
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for plan strings the code does not recognize.
///
/// An unknown tier in the store is a deployment defect, not user input;
/// callers surface it as an opaque internal error.
#[derive(Debug, thiserror::Error)]
#[error("unrecognized plan tier '{0}'")]
pub struct UnknownPlanTier(pub String);

impl FromStr for PlanTier {
    type Err = UnknownPlanTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(PlanTier::Free),
            "paid" => Ok(PlanTier::Paid),
            other => Err(UnknownPlanTier(other.to_string())),
        }
    }
}

/// Decides whether an owner may register another domain.
///
/// Pure function of the plan tier and the owner's current domain count;
/// no side effects.
pub fn can_add_domain(plan: PlanTier, current_count: i64) -> bool {
    match plan.domain_limit() {
        Some(limit) => current_count < limit,
        None => true,
    }
}
