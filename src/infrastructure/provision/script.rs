//! Shell-script provisioner invoking the nginx configuration procedure.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use super::{ProvisionError, Provisioner};
use crate::config::ProvisioningConfig;

/// Provisioner that runs the configured script under `sudo`:
///
/// ```text
/// sudo <script> <hostname> <backend-service> <certbot-email>
/// ```
///
/// The script writes the vhost for `hostname`, reloads nginx, and runs
/// certbot with the given contact address. Output is not parsed beyond the
/// exit status; stderr is carried verbatim into the error on failure.
pub struct ScriptProvisioner {
    script_path: PathBuf,
    backend_service: String,
    certbot_email: String,
    timeout: Duration,
}

impl ScriptProvisioner {
    /// Creates a provisioner from the startup configuration block.
    pub fn new(config: &ProvisioningConfig) -> Self {
        Self {
            script_path: config.script_path.clone(),
            backend_service: config.backend_service.clone(),
            certbot_email: config.certbot_email.clone(),
            timeout: Duration::from_secs(config.provision_timeout),
        }
    }
}

#[async_trait]
impl Provisioner for ScriptProvisioner {
    async fn activate(&self, hostname: &str) -> Result<(), ProvisionError> {
        let mut command = Command::new("sudo");
        command
            .arg(&self.script_path)
            .arg(hostname)
            .arg(&self.backend_service)
            .arg(&self.certbot_email)
            .stdin(Stdio::null())
            // A run that outlives the timeout gets killed rather than left
            // holding the nginx config lock.
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| ProvisionError::Timeout(self.timeout))?
            .map_err(ProvisionError::Spawn)?;

        if output.status.success() {
            tracing::info!(hostname, "vhost provisioned");
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);
            tracing::warn!(hostname, code, stderr = %stderr, "provisioning script failed");
            Err(ProvisionError::ScriptFailed { code, stderr })
        }
    }
}
