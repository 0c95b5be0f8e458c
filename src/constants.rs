use std::{env, path::PathBuf};

/// Environment variable holding the generated Bedrock API key
pub const API_KEY_ENV: &str = "GUD_BEDROCK_API_KEY";

/// Environment variable holding the AWS region
pub const REGION_ENV: &str = "AWS_REGION";

/// Overrides the credentials file location
pub const CREDENTIALS_FILE_ENV: &str = "GUD_CREDENTIALS_FILE";

/// Overrides the AWS CLI executable used for the identity check
pub const AWS_CLI_ENV: &str = "GUD_AWS_CLI";

/// Default AWS region when `AWS_REGION` is not set
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Default AWS CLI executable name
pub const DEFAULT_AWS_CLI: &str = "aws";

/// Credentials file name under the user's home directory
pub const CREDENTIALS_FILE_NAME: &str = ".gudcommit-credentials";

/// Lifetime of a short-term Bedrock API key in hours
pub const TOKEN_LIFETIME_HOURS: i64 = 12;

/// Tokens must be strictly longer than this to look valid
pub const MIN_TOKEN_LENGTH: usize = 20;

/// AWS CLI install instructions
pub const AWS_CLI_INSTALL_URL: &str = "https://aws.amazon.com/cli/";

/// Get the credentials file path
/// Respects GUD_CREDENTIALS_FILE environment variable if set
pub fn get_credentials_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CREDENTIALS_FILE_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::home_dir().map(|home| home.join(CREDENTIALS_FILE_NAME))
}
