use crate::errors::ConfigError;
use std::collections::BTreeMap;
use std::path::Path;

pub const API_KEY_ENV: &str = "GROQ_API_KEY";
pub const DEFAULT_SECRETS_PATH: &str = ".symcheck/secrets.yaml";

/// Where the credential came from, for the startup log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    SecretsFile,
    Manual,
}

impl CredentialSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialSource::Environment => "environment",
            CredentialSource::SecretsFile => "secrets_file",
            CredentialSource::Manual => "manual",
        }
    }
}

/// First non-empty value wins: environment, then the secrets file, then
/// manual entry. `manual` is only invoked when the other two come up empty.
pub fn resolve_api_key<F>(
    env_value: Option<String>,
    secrets_path: &Path,
    manual: F,
) -> Result<Option<(String, CredentialSource)>, ConfigError>
where
    F: FnOnce() -> Option<String>,
{
    if let Some(v) = non_empty(env_value) {
        return Ok(Some((v, CredentialSource::Environment)));
    }

    if let Some(v) = non_empty(read_secrets_key(secrets_path)?) {
        return Ok(Some((v, CredentialSource::SecretsFile)));
    }

    Ok(non_empty(manual()).map(|v| (v, CredentialSource::Manual)))
}

fn read_secrets_key(path: &Path) -> Result<Option<String>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let secrets: BTreeMap<String, serde_yaml::Value> =
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    Ok(secrets
        .get(API_KEY_ENV)
        .and_then(|v| v.as_str())
        .map(str::to_string))
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
