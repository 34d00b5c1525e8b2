//! CNAME resolution for domain ownership checks.
//!
//! The verification flow only needs one question answered: which CNAME
//! targets does a hostname currently resolve to? The [`CnameResolver`] trait
//! keeps that seam narrow so tests can substitute canned answers; the
//! production implementation ([`HickoryCnameResolver`]) queries the system's
//! configured resolvers via `hickory-resolver`.
//!
//! No caching and no internal retries — a failed or empty answer is returned
//! to the caller, and retry policy belongs to whoever drives verification.

pub mod hickory;

pub use hickory::HickoryCnameResolver;

use async_trait::async_trait;
use std::time::Duration;

/// Failure modes of one CNAME lookup.
///
/// Covers timeouts, NXDOMAIN/no-record answers, and malformed names alike:
/// the verification flow treats them all as "resolution failed", distinct
/// from a successful answer that lacks the expected target.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("CNAME lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("CNAME lookup failed: {0}")]
    Lookup(String),
}

/// Resolves the CNAME targets of a hostname.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CnameResolver: Send + Sync {
    /// Returns every CNAME target the hostname currently resolves to.
    ///
    /// Targets are plain hostnames without the trailing root dot, so they
    /// compare equal to the configured CNAME target string.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] on timeout, lookup failure (including
    /// NXDOMAIN and empty answers), or a malformed hostname.
    async fn resolve_cname(&self, hostname: &str) -> Result<Vec<String>, ResolutionError>;
}
