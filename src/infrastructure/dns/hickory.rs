//! System-configured CNAME resolver backed by `hickory-resolver`.

use async_trait::async_trait;
use hickory_resolver::proto::rr::{Name, RData, RecordType};
use hickory_resolver::{Resolver, TokioResolver};
use std::time::Duration;

use super::{CnameResolver, ResolutionError};

/// CNAME resolver using the host's DNS configuration (`/etc/resolv.conf`).
///
/// Every lookup is bounded by `timeout`; the resolver itself performs no
/// caching beyond what hickory does for an in-flight query.
pub struct HickoryCnameResolver {
    resolver: TokioResolver,
    timeout: Duration,
}

impl HickoryCnameResolver {
    /// Builds a resolver from the system configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the system resolver configuration cannot be read.
    pub fn from_system_conf(timeout: Duration) -> anyhow::Result<Self> {
        let resolver = Resolver::builder_tokio()
            .map_err(|e| anyhow::anyhow!("failed to read system resolver config: {e}"))?
            .build();

        Ok(Self { resolver, timeout })
    }
}

#[async_trait]
impl CnameResolver for HickoryCnameResolver {
    async fn resolve_cname(&self, hostname: &str) -> Result<Vec<String>, ResolutionError> {
        let name = Name::from_ascii(hostname)
            .map_err(|e| ResolutionError::Lookup(format!("malformed hostname: {e}")))?;

        let lookup = tokio::time::timeout(
            self.timeout,
            self.resolver.lookup(name, RecordType::CNAME),
        )
        .await
        .map_err(|_| ResolutionError::Timeout(self.timeout))?
        .map_err(|e| ResolutionError::Lookup(e.to_string()))?;

        // Answers come back fully qualified; trim the root dot so they
        // compare equal to the configured CNAME target.
        let targets = lookup
            .iter()
            .filter_map(|rdata| match rdata {
                RData::CNAME(cname) => {
                    Some(cname.0.to_utf8().trim_end_matches('.').to_string())
                }
                _ => None,
            })
            .collect();

        Ok(targets)
    }
}
