//! Reverse-proxy provisioning for verified domains.
//!
//! Activating a domain means writing an nginx vhost that routes the hostname
//! to the backend and obtaining a TLS certificate for it. That work happens
//! in an external privileged script; the [`Provisioner`] trait keeps the
//! invocation behind a narrow seam so the mechanism is swappable and tests
//! can substitute a fake.
//!
//! The external procedure is required to be idempotent: re-running it for an
//! already-active hostname must neither fail nor duplicate configuration.

pub mod script;

pub use script::ScriptProvisioner;

use async_trait::async_trait;
use std::time::Duration;

/// Failure modes of one provisioning run.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("provisioning timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to launch provisioning script: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("provisioning script exited with status {code}: {stderr}")]
    ScriptFailed { code: i32, stderr: String },
}

/// Activates a verified hostname as a live entry point.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Provisioner: Send + Sync {
    /// Configures the reverse proxy and TLS certificate for `hostname`.
    ///
    /// Must only be called for hostnames whose ownership has been verified
    /// and durably recorded.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError`] if the procedure times out, cannot be
    /// launched, or reports failure. Failure detail is captured verbatim
    /// for diagnostics.
    async fn activate(&self, hostname: &str) -> Result<(), ProvisionError>;
}
