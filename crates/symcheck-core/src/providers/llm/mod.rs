use crate::config::{AppConfig, ProviderKind};
use crate::errors::{ConfigError, ProviderError};
use crate::model::{LlmRequest, LlmResponse};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, ProviderError>;
    fn provider_name(&self) -> &'static str;
}

pub mod fake;
pub mod groq;

/// Builds the client selected by the configuration.
pub fn client_from_config(cfg: &AppConfig) -> Result<Arc<dyn LlmClient>, ConfigError> {
    let key = cfg.require_credential()?;
    match cfg.provider {
        ProviderKind::Fake => Ok(Arc::new(fake::FakeClient::echo())),
        ProviderKind::Groq => {
            let key = key.unwrap_or_default().to_string();
            let client = groq::GroqClient::new(
                cfg.base_url.clone(),
                key,
                std::time::Duration::from_secs(cfg.timeout_secs),
                cfg.retry_transient,
            )
            .map_err(|e| ConfigError::InvalidSetting {
                key: "base_url",
                value: cfg.base_url.clone(),
                reason: format!("failed to build HTTP client: {}", e),
            })?;
            Ok(Arc::new(client))
        }
    }
}
