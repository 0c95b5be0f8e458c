use std::env;

use crate::{
    config::Region,
    constants::{API_KEY_ENV, REGION_ENV},
    token::ApiToken,
};

/// Environment produced by a run. Passed explicitly to later steps so the
/// printed instructions never depend on ambient process state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEnv {
    pub api_key: Option<ApiToken>,
    pub region: Region,
}

impl SessionEnv {
    pub fn new(api_key: ApiToken, region: Region) -> Self {
        Self {
            api_key: Some(api_key),
            region,
        }
    }

    /// Variable name/value pairs in export order
    pub fn vars(&self) -> Vec<(&'static str, &str)> {
        let mut vars = Vec::with_capacity(2);
        if let Some(key) = &self.api_key {
            vars.push((API_KEY_ENV, key.as_str()));
        }
        vars.push((REGION_ENV, self.region.as_str()));
        vars
    }

    /// Set the variables for this process and any children it spawns
    pub fn apply(&self) {
        for (name, value) in self.vars() {
            // SAFETY: the run is sequential, nothing reads the environment concurrently
            unsafe {
                env::set_var(name, value);
            }
        }
        println!("🔧 Environment variables set for current session");
    }
}
