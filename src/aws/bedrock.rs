use aws_config::{BehaviorVersion, Region as SdkRegion};
use aws_credential_types::provider::{ProvideCredentials, error::CredentialsError};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::{
    AwsCredentials,
    sigv4::{self, PresignRequest},
};
use crate::{
    config::Region,
    constants::TOKEN_LIFETIME_HOURS,
    token::{ApiToken, IssueError, TokenIssuer},
};

const BEDROCK_HOST: &str = "bedrock.amazonaws.com";
const BEDROCK_SERVICE: &str = "bedrock";
const TOKEN_PREFIX: &str = "bedrock-api-key-";
const TOKEN_VERSION: &str = "&Version=1";

/// Issues Bedrock API keys by presigning a `CallWithBearerToken` request
/// with credentials from the AWS SDK default chain
#[derive(Debug, Clone, Default)]
pub struct BedrockTokenIssuer;

impl BedrockTokenIssuer {
    pub fn new() -> Self {
        Self
    }

    async fn load_credentials(&self, region: &Region) -> Result<AwsCredentials, IssueError> {
        // Priority: ENV vars -> Config/credentials files -> SSO -> container/IMDS
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(SdkRegion::new(region.to_string()))
            .load()
            .await;

        let provider = config.credentials_provider().ok_or_else(|| {
            IssueError::NoCredentials("no credentials provider configured".to_string())
        })?;

        let creds = provider
            .provide_credentials()
            .await
            .map_err(map_credentials_error)?;

        debug!("Loaded AWS credentials for key id {}", creds.access_key_id());

        Ok(AwsCredentials {
            access_key_id: creds.access_key_id().to_string(),
            secret_access_key: creds.secret_access_key().to_string(),
            session_token: creds.session_token().map(str::to_string),
        })
    }
}

impl TokenIssuer for BedrockTokenIssuer {
    async fn issue_token(&self, region: &Region) -> Result<ApiToken, IssueError> {
        info!("Issuing Bedrock API key for region: {}", region);

        let creds = self.load_credentials(region).await?;
        let token = bedrock_token(&creds, region.as_str(), Utc::now())?;

        if token.is_empty() {
            return Err(IssueError::Empty);
        }
        Ok(token)
    }
}

/// Build a Bedrock API key valid for 12 hours from `time`
pub fn bedrock_token(
    creds: &AwsCredentials,
    region: &str,
    time: DateTime<Utc>,
) -> Result<ApiToken, IssueError> {
    let request = PresignRequest {
        method: "POST",
        host: BEDROCK_HOST,
        path: "/",
        query: &[("Action", "CallWithBearerToken")],
        service: BEDROCK_SERVICE,
        region,
        expires_in_secs: TOKEN_LIFETIME_HOURS.unsigned_abs() * 3600,
    };

    let url = sigv4::presign_url(creds, &request, time)
        .map_err(|e| IssueError::Signing(e.to_string()))?;
    let unschemed = url.strip_prefix("https://").unwrap_or(&url);
    let encoded = STANDARD.encode(format!("{unschemed}{TOKEN_VERSION}"));

    Ok(ApiToken::new(format!("{TOKEN_PREFIX}{encoded}")))
}

fn map_credentials_error(err: CredentialsError) -> IssueError {
    let message = std::error::Error::source(&err)
        .map(|source| format!("{err}: {source}"))
        .unwrap_or_else(|| err.to_string());

    match err {
        CredentialsError::CredentialsNotLoaded(_) => IssueError::NoCredentials(message),
        CredentialsError::ProviderTimedOut(_) => IssueError::Timeout(message),
        CredentialsError::InvalidConfiguration(_) => IssueError::InvalidConfiguration(message),
        _ => IssueError::Provider(message),
    }
}
