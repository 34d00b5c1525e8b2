//! Repository trait for account lookups.

use crate::domain::entities::Account;
use crate::domain::quota::PlanTier;
use crate::error::AppError;
use async_trait::async_trait;

/// Read-side interface to the account store.
///
/// The account store is an external collaborator of the domain subsystem:
/// the only thing the provisioning flow needs from it is the plan tier for
/// quota decisions. The admin CLI additionally creates accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Returns the plan tier of the given account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account does not exist.
    /// Returns [`AppError::Internal`] if the stored plan string is
    /// unrecognized (a deployment defect) or on database errors.
    async fn find_plan(&self, account_id: i64) -> Result<PlanTier, AppError>;

    /// Creates an account. Used by the admin CLI, not the HTTP surface.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, email: &str, plan: PlanTier) -> Result<Account, AppError>;
}
