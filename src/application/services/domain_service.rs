//! Custom domain management service.

use crate::config::ProvisioningConfig;
use crate::domain::entities::{CnameRecord, Domain, NewDomain};
use crate::domain::quota;
use crate::domain::repositories::{AccountRepository, DomainRepository};
use crate::error::AppError;
use crate::infrastructure::dns::CnameResolver;
use crate::infrastructure::provision::Provisioner;
use serde_json::json;
use std::sync::Arc;
use url::Url;

/// Result of registering a domain: the stored record plus what the owner
/// has to publish in their DNS zone.
#[derive(Debug, Clone)]
pub struct DomainRegistration {
    pub domain: Domain,
    pub cname: CnameRecord,
    pub instructions: String,
}

/// Result of one verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The domain was already verified; nothing was re-checked.
    AlreadyVerified,
    /// Ownership proven and the domain activated on the edge proxy.
    Verified,
    /// Resolution succeeded but the expected CNAME target is not published
    /// yet. Not a fault — the owner retries once their DNS propagates.
    Pending,
}

impl VerificationOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::AlreadyVerified | Self::Verified)
    }
}

/// Service orchestrating the custom-domain lifecycle: registration under
/// quota, CNAME ownership verification, and reverse-proxy activation.
///
/// Verification and provisioning are two independently-failing steps. The
/// verified flag is persisted before provisioning is attempted, so a
/// provisioning failure leaves the domain verified-but-not-live and the next
/// verify call short-circuits instead of resolving DNS again.
pub struct DomainService<R: DomainRepository, A: AccountRepository> {
    domains: Arc<R>,
    accounts: Arc<A>,
    resolver: Arc<dyn CnameResolver>,
    provisioner: Arc<dyn Provisioner>,
    cname_target: String,
}

impl<R, A> DomainService<R, A>
where
    R: DomainRepository + 'static,
    A: AccountRepository + 'static,
{
    /// Creates a new domain service.
    ///
    /// `config` is the immutable provisioning block built at startup; the
    /// service only keeps the CNAME target, the provisioner owns the rest.
    pub fn new(
        domains: Arc<R>,
        accounts: Arc<A>,
        resolver: Arc<dyn CnameResolver>,
        provisioner: Arc<dyn Provisioner>,
        config: &ProvisioningConfig,
    ) -> Self {
        Self {
            domains,
            accounts,
            resolver,
            provisioner,
            cname_target: config.cname_target.clone(),
        }
    }

    /// Registers a new custom domain for `owner_id`.
    ///
    /// Checks the plan quota and per-owner uniqueness, then persists the
    /// record unverified and returns the CNAME record the owner must
    /// publish. No network calls are made here.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the hostname is malformed.
    /// Returns [`AppError::QuotaExceeded`] if the plan disallows another domain.
    /// Returns [`AppError::DuplicateDomain`] if the owner already added it.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn add_domain(
        &self,
        owner_id: i64,
        hostname: String,
    ) -> Result<DomainRegistration, AppError> {
        self.validate_hostname(&hostname)?;

        let current_count = self.domains.count_by_owner(owner_id).await?;
        let plan = self.accounts.find_plan(owner_id).await?;

        if !quota::can_add_domain(plan, current_count) {
            return Err(AppError::quota_exceeded(
                "Domain limit reached for the current plan",
                json!({"plan": plan.as_str(), "current_count": current_count}),
            ));
        }

        if self
            .domains
            .find_by_hostname(owner_id, &hostname)
            .await?
            .is_some()
        {
            return Err(AppError::duplicate_domain(
                "Domain already added",
                json!({"hostname": hostname}),
            ));
        }

        let cname = CnameRecord::for_hostname(&hostname, &self.cname_target);

        let domain = self
            .domains
            .create(NewDomain {
                hostname,
                owner_id,
                cname: cname.clone(),
            })
            .await?;

        metrics::counter!("domains_registered").increment(1);
        tracing::info!(hostname = %domain.hostname, owner_id, "domain registered");

        let instructions = format!(
            "Log in to your DNS provider's management console and add the following \
             CNAME record to your domain's DNS settings. It may take some time for \
             DNS changes to propagate. Name: {}, Value: {}",
            cname.name, cname.value
        );

        Ok(DomainRegistration {
            domain,
            cname,
            instructions,
        })
    }

    /// Verifies domain ownership via DNS and activates the domain.
    ///
    /// Already-verified domains short-circuit: no re-resolution, no
    /// re-provisioning. Otherwise the CNAME targets are resolved; when the
    /// expected target is present the verified flag is persisted first and
    /// the provisioner runs after, so partial success survives.
    ///
    /// The resolve → persist → provision sequence runs in a spawned task the
    /// handler awaits: a client disconnect cannot drop the flow between the
    /// durable write and the provisioning attempt.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] / [`AppError::Forbidden`] on the
    /// ownership guards, [`AppError::DnsResolution`] when lookup fails (no
    /// state change), and [`AppError::Provisioning`] when activation fails
    /// (the verified flag remains set).
    pub async fn verify_ownership(
        &self,
        owner_id: i64,
        domain_id: i64,
    ) -> Result<VerificationOutcome, AppError> {
        let domain = self
            .domains
            .find_by_id(domain_id)
            .await?
            .ok_or_else(|| AppError::not_found("Domain not found", json!({"id": domain_id})))?;

        if domain.owner_id != owner_id {
            return Err(AppError::forbidden(
                "Not authorized to verify this domain",
                json!({"id": domain_id}),
            ));
        }

        if domain.is_verified {
            metrics::counter!("domain_verifications", "outcome" => "already_verified")
                .increment(1);
            return Ok(VerificationOutcome::AlreadyVerified);
        }

        let domains = Arc::clone(&self.domains);
        let resolver = Arc::clone(&self.resolver);
        let provisioner = Arc::clone(&self.provisioner);
        let expected = self.cname_target.clone();

        let flow = tokio::spawn(async move {
            let targets = resolver.resolve_cname(&domain.hostname).await.map_err(|e| {
                AppError::dns_resolution(
                    "Failed to resolve CNAME records",
                    json!({"hostname": domain.hostname, "source": e.to_string()}),
                )
            })?;

            if !targets.iter().any(|target| target == &expected) {
                tracing::debug!(
                    hostname = %domain.hostname,
                    ?targets,
                    "expected CNAME target not present"
                );
                return Ok(VerificationOutcome::Pending);
            }

            // Durable before provisioning: a provisioning failure leaves the
            // domain verified-but-not-live, and the next verify call
            // short-circuits instead of resolving again.
            domains.mark_verified(domain.id).await?;

            provisioner.activate(&domain.hostname).await.map_err(|e| {
                AppError::provisioning(
                    "Domain verified, but activation on the edge proxy failed",
                    json!({"hostname": domain.hostname, "source": e.to_string()}),
                )
            })?;

            tracing::info!(hostname = %domain.hostname, "domain verified and activated");
            Ok(VerificationOutcome::Verified)
        });

        let result = flow.await.map_err(|e| {
            AppError::internal("Verification task failed", json!({"source": e.to_string()}))
        })?;

        let outcome_label = match &result {
            Ok(VerificationOutcome::Verified) => "verified",
            Ok(VerificationOutcome::Pending) => "pending",
            Ok(VerificationOutcome::AlreadyVerified) => "already_verified",
            Err(AppError::DnsResolution { .. }) => "dns_failed",
            Err(AppError::Provisioning { .. }) => "provisioning_failed",
            Err(_) => "error",
        };
        metrics::counter!("domain_verifications", "outcome" => outcome_label).increment(1);

        result
    }

    /// Retrieves a single domain, enforcing ownership.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the domain does not exist.
    /// Returns [`AppError::Forbidden`] if the caller does not own it.
    pub async fn get_domain(&self, owner_id: i64, domain_id: i64) -> Result<Domain, AppError> {
        let domain = self
            .domains
            .find_by_id(domain_id)
            .await?
            .ok_or_else(|| AppError::not_found("Domain not found", json!({"id": domain_id})))?;

        if domain.owner_id != owner_id {
            return Err(AppError::forbidden(
                "Not authorized to view this domain",
                json!({"id": domain_id}),
            ));
        }

        Ok(domain)
    }

    /// Lists all domains owned by the caller.
    pub async fn list_domains(&self, owner_id: i64) -> Result<Vec<Domain>, AppError> {
        self.domains.list_by_owner(owner_id).await
    }

    /// Lists the caller's verified domains.
    pub async fn list_verified_domains(&self, owner_id: i64) -> Result<Vec<Domain>, AppError> {
        self.domains.list_verified_by_owner(owner_id).await
    }

    /// Validates hostname format.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if validation fails.
    fn validate_hostname(&self, hostname: &str) -> Result<(), AppError> {
        if hostname.is_empty() || hostname.len() > 253 {
            return Err(AppError::bad_request(
                "Invalid hostname length",
                json!({"min": 1, "max": 253}),
            ));
        }

        // "foo:bar" and "https://foo" both parse as absolute URLs; a bare
        // hostname does not.
        if Url::parse(hostname).is_ok() {
            return Err(AppError::bad_request(
                "Expected a bare hostname",
                json!({"hint": "Strip the scheme and path, e.g. shop.example.com"}),
            ));
        }

        if !hostname.contains('.') {
            return Err(AppError::bad_request(
                "Invalid hostname format",
                json!({"hint": "Hostname must contain at least one dot"}),
            ));
        }

        if !hostname
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return Err(AppError::bad_request(
                "Invalid characters in hostname",
                json!({"allowed": "a-z, 0-9, dots, hyphens"}),
            ));
        }

        Ok(())
    }
}
