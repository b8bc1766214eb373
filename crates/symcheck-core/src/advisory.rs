use crate::config::AppConfig;
use crate::model::{Advisory, GenerationParams, LlmRequest};
use crate::providers::llm::LlmClient;
use crate::templates;
use std::sync::Arc;

pub const ERROR_PREFIX: &str = "Error calling LLM: ";

/// Instruction block, then the symptoms verbatim, then the format hint.
pub fn build_prompt(symptoms: &str) -> String {
    format!(
        "{}\n\n{}{}\n\n{}",
        templates::ADVISORY_INSTRUCTIONS,
        templates::SYMPTOMS_LABEL,
        symptoms,
        templates::RESPONSE_FORMAT_HINT
    )
}

/// Stateless wrapper around one completion call per submission.
#[derive(Clone)]
pub struct AdvisoryPipeline {
    client: Arc<dyn LlmClient>,
}

impl AdvisoryPipeline {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self, crate::errors::ConfigError> {
        Ok(Self::new(crate::providers::llm::client_from_config(cfg)?))
    }

    pub fn provider_name(&self) -> &'static str {
        self.client.provider_name()
    }

    /// Never fails: provider errors come back as an error surrogate text with
    /// no raw metadata.
    pub async fn analyze(&self, symptoms: &str, params: &GenerationParams) -> Advisory {
        let request = LlmRequest {
            prompt: build_prompt(symptoms),
            params: params.clone(),
        };

        match self.client.complete(&request).await {
            Ok(resp) => {
                tracing::debug!(
                    event = "symcheck.provider.complete",
                    provider = %resp.provider,
                    model = %resp.model,
                    chars = resp.text.len(),
                );
                Advisory {
                    text: resp.text,
                    raw: Some(resp.raw),
                }
            }
            Err(e) => {
                tracing::warn!(
                    event = "symcheck.provider.error",
                    provider = self.client.provider_name(),
                    model = %params.model,
                    error = %e,
                    "completion failed, returning error text"
                );
                Advisory {
                    text: format!("{}{}", ERROR_PREFIX, e),
                    raw: None,
                }
            }
        }
    }
}
