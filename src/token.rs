use std::fmt;

use crate::{config::Region, constants::MIN_TOKEN_LENGTH};

/// Short-term Bedrock API key. Treated as an opaque bearer secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiToken(<{} chars redacted>)", self.len())
    }
}

/// Failure kinds a token issuer can report
#[derive(Debug, thiserror::Error)]
pub enum IssueError {
    #[error("no AWS credentials could be loaded: {0}")]
    NoCredentials(String),
    #[error("credentials provider timed out: {0}")]
    Timeout(String),
    #[error("invalid AWS configuration: {0}")]
    InvalidConfiguration(String),
    #[error("credentials provider failed: {0}")]
    Provider(String),
    #[error("failed to sign token request: {0}")]
    Signing(String),
    #[error("token issuer returned an empty key")]
    Empty,
}

/// Issues short-lived Bedrock bearer tokens from ambient AWS credentials
#[allow(async_fn_in_trait)]
pub trait TokenIssuer {
    async fn issue_token(&self, region: &Region) -> Result<ApiToken, IssueError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenShape {
    Valid,
    Invalid,
}

/// Length heuristic only: anything longer than 20 characters looks valid
pub fn validate_shape(token: &ApiToken) -> TokenShape {
    if token.len() > MIN_TOKEN_LENGTH {
        TokenShape::Valid
    } else {
        TokenShape::Invalid
    }
}
