use super::LlmClient;
use crate::errors::ProviderError;
use crate::model::{LlmRequest, LlmResponse};
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

enum Behavior {
    Echo,
    Reply(String),
    Fail(fn() -> ProviderError),
}

/// Offline provider for tests and dry runs.
pub struct FakeClient {
    behavior: Behavior,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl FakeClient {
    /// Replies with a canned advisory that quotes the symptom line back.
    pub fn echo() -> Self {
        Self::with(Behavior::Echo)
    }

    pub fn reply(text: impl Into<String>) -> Self {
        Self::with(Behavior::Reply(text.into()))
    }

    pub fn failing(make: fn() -> ProviderError) -> Self {
        Self::with(Behavior::Fail(make))
    }

    fn with(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|p| p.clone())
    }
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut slot) = self.last_prompt.lock() {
            *slot = Some(request.prompt.clone());
        }

        let text = match &self.behavior {
            Behavior::Fail(make) => return Err(make()),
            Behavior::Reply(t) => t.clone(),
            Behavior::Echo => {
                let symptoms = request
                    .prompt
                    .lines()
                    .find_map(|l| l.strip_prefix(crate::templates::SYMPTOMS_LABEL))
                    .unwrap_or("")
                    .trim();
                format!(
                    "- Possible conditions for \"{}\": unavailable offline (low)\n- Next steps: consult a clinician.\n- This is educational only.\nSuggested follow-ups: none",
                    symptoms
                )
            }
        };

        let mut raw = serde_json::Map::new();
        raw.insert("id".into(), json!(format!("fake-{}", self.calls())));
        raw.insert("object".into(), json!("chat.completion"));
        raw.insert("model".into(), json!(request.params.model));
        raw.insert(
            "choices".into(),
            json!([
                {"index": 0, "message": {"role": "assistant", "content": text}, "finish_reason": "stop"}
            ]),
        );

        Ok(LlmResponse {
            text,
            provider: "fake".to_string(),
            model: request.params.model.clone(),
            raw,
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
