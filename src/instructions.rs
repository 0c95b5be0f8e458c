use std::{fmt::Write as _, path::Path};

use crate::{
    constants::{API_KEY_ENV, TOKEN_LIFETIME_HOURS},
    credentials_file::double_quoted,
    session::SessionEnv,
};

const RULE_WIDTH: usize = 60;
const KEY_PLACEHOLDER: &str = "your-key";

/// Follow-up instructions shown after a successful run
pub fn render_instructions(credentials_path: &Path, session: &SessionEnv) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let key = session
        .api_key
        .as_ref()
        .map_or(KEY_PLACEHOLDER.to_string(), |k| double_quoted(k.as_str()));

    let mut out = String::new();
    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(out, "🎉 GudCommit API Key Setup Complete!");
    let _ = writeln!(out, "{rule}\n");
    let _ = writeln!(out, "📋 Usage Instructions:\n");
    let _ = writeln!(out, "1. Load the credentials:");
    let _ = writeln!(out, "   source {}\n", credentials_path.display());
    let _ = writeln!(out, "2. Or set manually:");
    let _ = writeln!(out, "   export {API_KEY_ENV}=\"{key}\"\n");
    let _ = writeln!(out, "3. Use GudCommit:");
    let _ = writeln!(out, "   cd golang && make build");
    let _ = writeln!(out, "   ./bin/gudcommit\n");
    let _ = writeln!(out, "⏰ Note: API key expires in {TOKEN_LIFETIME_HOURS} hours");
    let _ = writeln!(out, "🔄 To regenerate: gudkey");
    out
}

pub fn print_instructions(credentials_path: &Path, session: &SessionEnv) {
    println!("{}", render_instructions(credentials_path, session));
}
