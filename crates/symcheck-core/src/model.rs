use serde::{Deserialize, Serialize};

/// One stored submission. Field order is the export column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub id: i64,
    pub timestamp: String,
    pub symptoms: String,
    pub response_text: String,
}

/// Provider-defined response envelope, kept only for diagnostics.
pub type RawMetadata = serde_json::Map<String, serde_json::Value>;

/// What the advisory pipeline hands back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Advisory {
    pub text: String,
    /// `None` when the provider call failed and `text` is an error surrogate.
    pub raw: Option<RawMetadata>,
}

impl Advisory {
    pub fn is_error(&self) -> bool {
        self.raw.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: crate::config::models::DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            max_tokens: 800,
            top_p: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub prompt: String,
    pub params: GenerationParams,
}

#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
    pub raw: RawMetadata,
}
