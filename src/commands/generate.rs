use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use std::{
    io,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

use crate::{
    aws::BedrockTokenIssuer,
    config::{Region, Settings},
    credentials_file::CredentialsFile,
    identity::{AwsCliIdentity, IdentityCheck, IdentityStatus},
    instructions,
    session::SessionEnv,
    token::{IssueError, TokenIssuer, TokenShape, validate_shape},
};

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("AWS credentials not configured")]
    CredentialsNotConfigured,
    #[error("AWS CLI not found")]
    AwsCliMissing,
    #[error("Failed to generate API key: {0}")]
    Issue(#[from] IssueError),
    #[error("Failed to write credentials file {}: {source}", path.display())]
    Persist { path: PathBuf, source: io::Error },
}

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct Outcome {
    pub session: SessionEnv,
    pub shape: TokenShape,
    pub credentials_path: PathBuf,
}

#[derive(Debug, Clone, Default, Args)]
pub struct GenerateCommand {}

impl GenerateCommand {
    pub async fn execute(self) -> Result<()> {
        let settings = Settings::from_env()?;
        let identity = AwsCliIdentity::new(settings.aws_cli.clone());
        let issuer = BedrockTokenIssuer::new();

        generate(
            &identity,
            &issuer,
            settings.region,
            &settings.credentials_path,
        )
        .await
        .context("Bedrock API key generation failed")?;

        Ok(())
    }
}

/// Preflight, acquire, apply, validate, persist and instruct, in that order.
/// Stops at the first fatal step; a failed shape check only warns.
pub async fn generate<I, T>(
    identity: &I,
    issuer: &T,
    region: Region,
    credentials_path: &Path,
) -> Result<Outcome, GenerateError>
where
    I: IdentityCheck,
    T: TokenIssuer,
{
    println!("🚀 GudCommit Bedrock API Key Generator");
    println!("{}", "=".repeat(40));

    let status = identity.check_identity().await;
    status.report();
    if !status.is_verified() {
        return Err(match status {
            IdentityStatus::CliMissing => GenerateError::AwsCliMissing,
            _ => GenerateError::CredentialsNotConfigured,
        });
    }

    println!("🌍 Using region: {region}");
    println!("🔑 Generating short-term Bedrock API key for region: {region}");

    let token = match issuer.issue_token(&region).await {
        Ok(token) if token.is_empty() => Err(IssueError::Empty),
        other => other,
    };
    let token = match token {
        Ok(token) => token,
        Err(e) => {
            println!("❌ Failed to generate API key: {e}");
            println!("💡 Make sure you have Bedrock permissions in your AWS account");
            return Err(e.into());
        }
    };
    println!("✅ Short-term API key generated successfully!");
    println!("⏰ Key expires in 12 hours or when your session ends");

    let session = SessionEnv::new(token.clone(), region.clone());
    session.apply();

    println!("🧪 Testing API key...");
    let shape = validate_shape(&token);
    match shape {
        TokenShape::Valid => println!("✅ API key format looks valid"),
        TokenShape::Invalid => {
            warn!("API key is only {} characters long", token.len());
            println!("❌ API key format appears invalid");
            println!("⚠️  API key generated but test failed");
        }
    }

    let file = CredentialsFile::new(token, region, Local::now().naive_local());
    file.write(credentials_path)
        .await
        .map_err(|source| GenerateError::Persist {
            path: credentials_path.to_path_buf(),
            source,
        })?;
    println!("💾 API key saved to: {}", credentials_path.display());
    info!("Credentials file updated: {}", credentials_path.display());

    instructions::print_instructions(credentials_path, &session);

    Ok(Outcome {
        session,
        shape,
        credentials_path: credentials_path.to_path_buf(),
    })
}
