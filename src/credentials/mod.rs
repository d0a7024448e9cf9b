pub mod prompt;

use std::fmt;
use std::io::IsTerminal;

use crate::config::ApiConfig;

/// Environment variable holding a TBA read API key
pub const ENV_KEY_VAR: &str = "TBA_KEY";

pub use prompt::prompt_for_key;

/// Check for an API key in the TBA_KEY environment variable.
/// Returns Some(key) if the env var is set and non-empty, None otherwise.
pub fn get_key_from_env() -> Option<String> {
    non_empty(std::env::var(ENV_KEY_VAR).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug)]
pub enum CredentialError {
    /// No key in the environment or config, and no terminal to ask on
    KeyNotFound,
    PromptFailed(String),
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::KeyNotFound => write!(
                f,
                "No TBA API key found. Set {} or api.key in the config file",
                ENV_KEY_VAR
            ),
            CredentialError::PromptFailed(msg) => write!(f, "Failed to read API key: {}", msg),
        }
    }
}

impl std::error::Error for CredentialError {}

/// Resolve the API key: environment first, then config, then an interactive prompt
pub fn resolve_api_key(api: &ApiConfig) -> Result<String, CredentialError> {
    resolve_from(get_key_from_env(), api.key.clone(), std::io::stdin().is_terminal())
}

fn resolve_from(
    env_key: Option<String>,
    config_key: Option<String>,
    interactive: bool,
) -> Result<String, CredentialError> {
    if let Some(key) = env_key.or_else(|| non_empty(config_key)) {
        return Ok(key);
    }

    if !interactive {
        return Err(CredentialError::KeyNotFound);
    }

    prompt_for_key().map_err(|e| CredentialError::PromptFailed(format!("{:#}", e)))
}
