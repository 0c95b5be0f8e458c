use std::{io::ErrorKind, process::Stdio};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::constants::AWS_CLI_INSTALL_URL;

/// Outcome of the ambient AWS credential check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityStatus {
    Verified,
    /// The CLI ran but could not resolve an identity
    NotConfigured,
    /// The CLI executable could not be found
    CliMissing,
}

impl IdentityStatus {
    pub fn is_verified(self) -> bool {
        matches!(self, Self::Verified)
    }

    /// Print the success or remediation message for this status
    pub fn report(self) {
        match self {
            Self::Verified => println!("✅ AWS credentials found"),
            Self::NotConfigured => {
                println!("❌ AWS credentials not configured");
                println!("Please run: aws configure");
            }
            Self::CliMissing => {
                println!("❌ AWS CLI not found");
                println!("Please install AWS CLI: {AWS_CLI_INSTALL_URL}");
            }
        }
    }
}

/// Checks whether ambient AWS credentials resolve to a valid identity
#[allow(async_fn_in_trait)]
pub trait IdentityCheck {
    async fn check_identity(&self) -> IdentityStatus;
}

/// Identity check backed by `aws sts get-caller-identity`
#[derive(Debug, Clone)]
pub struct AwsCliIdentity {
    program: String,
}

impl AwsCliIdentity {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl IdentityCheck for AwsCliIdentity {
    async fn check_identity(&self) -> IdentityStatus {
        debug!("Running {} sts get-caller-identity", self.program);

        let output = Command::new(&self.program)
            .args(["sts", "get-caller-identity"])
            .stdin(Stdio::null())
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => IdentityStatus::Verified,
            Ok(output) => {
                debug!(
                    "Identity check exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                IdentityStatus::NotConfigured
            }
            Err(e) if e.kind() == ErrorKind::NotFound => IdentityStatus::CliMissing,
            Err(e) => {
                warn!("Failed to run {}: {}", self.program, e);
                IdentityStatus::NotConfigured
            }
        }
    }
}
