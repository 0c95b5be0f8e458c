use anyhow::{Context, Result};
use std::{env, fmt, path::PathBuf};

use crate::constants::{self, AWS_CLI_ENV, DEFAULT_AWS_CLI, DEFAULT_AWS_REGION, REGION_ENV};

/// AWS region the key is generated for. Not validated against known regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region(String);

impl Region {
    pub fn new(region: impl Into<String>) -> Self {
        Self(region.into())
    }

    /// Resolve from an optional value, falling back to the default region.
    /// An empty value counts as unset.
    pub fn resolve(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Self(v),
            _ => Self(DEFAULT_AWS_REGION.to_string()),
        }
    }

    pub fn from_env() -> Self {
        Self::resolve(env::var(REGION_ENV).ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Runtime settings resolved from the environment
#[derive(Debug, Clone)]
pub struct Settings {
    pub region: Region,
    pub credentials_path: PathBuf,
    pub aws_cli: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let credentials_path = constants::get_credentials_path()
            .context("Failed to determine home directory for the credentials file")?;

        let aws_cli = env::var(AWS_CLI_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_AWS_CLI.to_string());

        Ok(Self {
            region: Region::from_env(),
            credentials_path,
            aws_cli,
        })
    }
}
