//! Repository trait for custom domain records.

use crate::domain::entities::{Domain, NewDomain};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the durable domain store.
///
/// Domains are keyed by id and queryable by owner. Records created here are
/// never deleted by this subsystem; the only mutation is the monotonic
/// verification flip.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgDomainRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_domain.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// Persists a new, unverified domain.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateDomain`] if the owner already holds the
    /// hostname (unique constraint).
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_domain: NewDomain) -> Result<Domain, AppError>;

    /// Finds a domain by its database ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Domain>, AppError>;

    /// Finds the owner's record for a hostname, if any.
    ///
    /// Different owners may hold the same hostname; the lookup is scoped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_hostname(
        &self,
        owner_id: i64,
        hostname: &str,
    ) -> Result<Option<Domain>, AppError>;

    /// Counts the domains an owner currently holds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_by_owner(&self, owner_id: i64) -> Result<i64, AppError>;

    /// Lists all domains owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Domain>, AppError>;

    /// Lists the owner's verified domains.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_verified_by_owner(&self, owner_id: i64) -> Result<Vec<Domain>, AppError>;

    /// Marks a domain verified and returns the updated record.
    ///
    /// The flag is monotonic: this only ever sets it to true, and there is
    /// no operation that clears it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the domain does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn mark_verified(&self, id: i64) -> Result<Domain, AppError>;
}
