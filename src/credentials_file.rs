use chrono::{NaiveDateTime, TimeDelta};
use std::{io, path::Path};
use tokio::fs;
use tracing::debug;

use crate::{
    config::Region,
    constants::{API_KEY_ENV, REGION_ENV, TOKEN_LIFETIME_HOURS},
    token::ApiToken,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Shell-sourceable credentials file for GudCommit
#[derive(Debug, Clone)]
pub struct CredentialsFile {
    pub token: ApiToken,
    pub region: Region,
    pub generated_at: NaiveDateTime,
    /// Advisory only, nothing checks it
    pub expires_at: NaiveDateTime,
}

impl CredentialsFile {
    pub fn new(token: ApiToken, region: Region, generated_at: NaiveDateTime) -> Self {
        Self {
            token,
            region,
            generated_at,
            expires_at: generated_at + TimeDelta::hours(TOKEN_LIFETIME_HOURS),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "# GudCommit Bedrock API Key\n\
             # Generated: {}\n\
             # Region: {}\n\
             # Expires: {}\n\
             export {API_KEY_ENV}=\"{}\"\n\
             export {REGION_ENV}=\"{}\"\n",
            self.generated_at.format(TIMESTAMP_FORMAT),
            single_line(self.region.as_str()),
            self.expires_at.format(TIMESTAMP_FORMAT),
            double_quoted(self.token.as_str()),
            double_quoted(self.region.as_str()),
        )
    }

    /// Overwrite `path` with the rendered file
    pub async fn write(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        fs::write(path, self.render()).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = fs::metadata(path).await?;
            let mut permissions = metadata.permissions();
            permissions.set_mode(0o600);
            fs::set_permissions(path, permissions).await?;
        }

        debug!("Wrote credentials file: {}", path.display());
        Ok(())
    }
}

/// Escape a value for a POSIX double-quoted string so sourcing the file
/// yields it verbatim
pub(crate) fn double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Keep comment lines on one line
fn single_line(value: &str) -> String {
    value.replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_render_format() {
        let file = CredentialsFile::new(
            ApiToken::new("bedrock-api-key-abc"),
            Region::new("us-east-1"),
            at(9, 30, 0),
        );

        assert_eq!(
            file.render(),
            "# GudCommit Bedrock API Key\n\
             # Generated: 2025-03-14 09:30:00\n\
             # Region: us-east-1\n\
             # Expires: 2025-03-14 21:30:00\n\
             export GUD_BEDROCK_API_KEY=\"bedrock-api-key-abc\"\n\
             export AWS_REGION=\"us-east-1\"\n"
        );
    }

    #[test]
    fn test_expiry_crosses_midnight() {
        let file =
            CredentialsFile::new(ApiToken::new("k"), Region::new("us-east-1"), at(18, 0, 1));
        assert_eq!(file.expires_at.to_string(), "2025-03-15 06:00:01");
    }

    #[tokio::test]
    async fn test_write_overwrites_previous_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(".gudcommit-credentials");

        let first = CredentialsFile::new(
            ApiToken::new("first-token-with-some-length"),
            Region::new("ap-northeast-1"),
            at(8, 0, 0),
        );
        first.write(&path).await.unwrap();

        let second = CredentialsFile::new(
            ApiToken::new("second"),
            Region::new("eu-west-1"),
            at(9, 0, 0),
        );
        second.write(&path).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, second.render());
        assert!(!content.contains("ap-northeast-1"));
        assert!(!content.contains("first-token"));
    }

    #[test]
    fn test_double_quoted_escapes_shell_metacharacters() {
        assert_eq!(double_quoted("us-east-1"), "us-east-1");
        assert_eq!(
            double_quoted(r#"a"b$c`d\e"#),
            r#"a\"b\$c\`d\\e"#
        );
    }

    #[test]
    fn test_render_keeps_comment_on_one_line() {
        let file = CredentialsFile::new(
            ApiToken::new("k"),
            Region::new("eu-west-1\nexport EVIL=1"),
            at(9, 30, 0),
        );
        assert!(file.render().contains("# Region: eu-west-1 export EVIL=1\n"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_sourced_values_round_trip_without_running_commands() {
        use std::process::Command;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("creds");
        let marker = dir.path().join("pwned");
        let region = format!(
            "eu-west-1\"; touch {}; echo \"$(id)`id`\\\nnext",
            marker.display()
        );
        let token = "bedrock-api-key-$HOME-`id`-\"x\"";

        CredentialsFile::new(ApiToken::new(token), Region::new(region.clone()), at(9, 0, 0))
            .write(&path)
            .await
            .unwrap();

        let output = Command::new("sh")
            .arg("-c")
            .arg(r#". "$1" && printf '%s|%s' "$AWS_REGION" "$GUD_BEDROCK_API_KEY""#)
            .arg("sh")
            .arg(&path)
            .output()
            .unwrap();
        assert!(output.status.success());

        let stdout = String::from_utf8(output.stdout).unwrap();
        let (sourced_region, sourced_token) = stdout.rsplit_once('|').unwrap();
        assert_eq!(sourced_region, region);
        assert_eq!(sourced_token, token);
        assert!(!marker.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_write_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("creds");
        CredentialsFile::new(ApiToken::new("k"), Region::new("us-east-1"), at(0, 0, 0))
            .write(&path)
            .await
            .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
