use crate::errors::ConfigError;
use crate::model::GenerationParams;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub mod credentials;
pub mod models;

pub const DEFAULT_CONFIG_PATH: &str = "symcheck.yaml";
pub const DEFAULT_DB_PATH: &str = "symptom_checker_history.db";
pub const DEFAULT_EXPORT_PATH: &str = "symptom_history_export.csv";
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Groq,
    /// Offline echo provider; needs no credential.
    Fake,
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "groq" => Ok(ProviderKind::Groq),
            "fake" => Ok(ProviderKind::Fake),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

/// Built once at startup and passed by reference to the pipeline and store.
#[derive(Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub provider: ProviderKind,
    pub base_url: String,
    pub params: GenerationParams,
    pub db_path: PathBuf,
    pub timeout_secs: u64,
    pub retry_transient: bool,
    pub history_limit: u32,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            provider: ProviderKind::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            params: GenerationParams::default(),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            timeout_secs: 30,
            retry_transient: true,
            history_limit: 500,
            log_level: "warn".to_string(),
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("params", &self.params)
            .field("db_path", &self.db_path)
            .field("timeout_secs", &self.timeout_secs)
            .field("retry_transient", &self.retry_transient)
            .field("history_limit", &self.history_limit)
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// Optional on-disk layer. Every field may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub top_p: Option<f32>,
    pub db_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub retry_transient: Option<bool>,
    pub history_limit: Option<u32>,
    pub log_level: Option<String>,
}

/// Reads the YAML layer at the default location. A missing file is not an
/// error there.
pub fn load_file(path: &Path) -> Result<Option<FileConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    load_required(path).map(Some)
}

/// Reads a YAML layer the user named explicitly, so a missing file is a
/// `ConfigError::Read`. Unknown keys are reported on stderr and otherwise
/// ignored.
pub fn load_required(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let mut ignored_keys = Vec::new();
    let deserializer = serde_yaml::Deserializer::from_str(&raw);
    let cfg: FileConfig = serde_ignored::deserialize(deserializer, |p| {
        ignored_keys.push(p.to_string());
    })
    .map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    if !ignored_keys.is_empty() {
        // logging may not be initialised yet: the file layer feeds log_level
        eprintln!(
            "WARN: Ignored unknown config fields in {}: {:?}",
            path.display(),
            ignored_keys
        );
    }
    Ok(cfg)
}

impl AppConfig {
    pub fn apply_file(&mut self, file: FileConfig) -> Result<(), ConfigError> {
        if let Some(p) = file.provider {
            self.provider = p.parse()?;
        }
        if let Some(m) = file.model {
            self.params.model = m;
        }
        if let Some(u) = file.base_url {
            self.base_url = u;
        }
        if let Some(t) = file.temperature {
            self.params.temperature = t;
        }
        if let Some(n) = file.max_tokens {
            self.params.max_tokens = n;
        }
        if let Some(p) = file.top_p {
            self.params.top_p = p;
        }
        if let Some(p) = file.db_path {
            self.db_path = p;
        }
        if let Some(s) = file.timeout_secs {
            self.timeout_secs = s;
        }
        if let Some(r) = file.retry_transient {
            self.retry_transient = r;
        }
        if let Some(l) = file.history_limit {
            self.history_limit = l;
        }
        if let Some(l) = file.log_level {
            self.log_level = l;
        }
        Ok(())
    }

    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|k| std::env::var(k).ok())
    }

    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SYMCHECK_MODEL") {
            self.params.model = v;
        }
        if let Some(v) = lookup("SYMCHECK_DB") {
            self.db_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("SYMCHECK_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = lookup("SYMCHECK_TIMEOUT_SECS") {
            self.timeout_secs = v.parse().map_err(|e| ConfigError::InvalidSetting {
                key: "SYMCHECK_TIMEOUT_SECS",
                value: v.clone(),
                reason: format!("{}", e),
            })?;
        }
        if let Some(v) = lookup("SYMCHECK_LOG") {
            self.log_level = v;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        models::ensure_allowed(&self.params.model)?;

        if !(0.0..=2.0).contains(&self.params.temperature) {
            return Err(ConfigError::InvalidSetting {
                key: "temperature",
                value: self.params.temperature.to_string(),
                reason: "must be within 0.0..=2.0".into(),
            });
        }
        if self.params.max_tokens == 0 {
            return Err(ConfigError::InvalidSetting {
                key: "max_tokens",
                value: "0".into(),
                reason: "must be positive".into(),
            });
        }
        if !(self.params.top_p > 0.0 && self.params.top_p <= 1.0) {
            return Err(ConfigError::InvalidSetting {
                key: "top_p",
                value: self.params.top_p.to_string(),
                reason: "must be within (0.0, 1.0]".into(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                key: "timeout_secs",
                value: "0".into(),
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }

    /// The Groq provider cannot run without a key; the fake one never needs it.
    pub fn require_credential(&self) -> Result<Option<&str>, ConfigError> {
        match (self.provider, self.api_key.as_deref()) {
            (ProviderKind::Fake, key) => Ok(key),
            (ProviderKind::Groq, Some(key)) if !key.trim().is_empty() => Ok(Some(key)),
            (ProviderKind::Groq, _) => Err(ConfigError::MissingCredential {
                secrets_hint: credentials::DEFAULT_SECRETS_PATH.to_string(),
            }),
        }
    }
}
