use super::LlmClient;
use crate::errors::ProviderError;
use crate::model::{LlmRequest, LlmResponse};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Groq's OpenAI-compatible chat completions endpoint.
pub struct GroqClient {
    pub base_url: String,
    api_key: String,
    pub retry_transient: bool,
    client: reqwest::Client,
}

impl GroqClient {
    pub fn new(
        base_url: String,
        api_key: String,
        timeout: Duration,
        retry_transient: bool,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url,
            api_key,
            retry_transient,
            client,
        })
    }

    async fn send_once(&self, request: &LlmRequest) -> Result<LlmResponse, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let p = &request.params;

        let body = json!({
            "messages": [
                {
                    "role": "user",
                    "content": request.prompt,
                }
            ],
            "model": p.model,
            "temperature": p.temperature,
            "max_tokens": p.max_tokens,
            "top_p": p.top_p,
            "stream": false,
        });

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => ProviderError::Unauthorized(error_text),
                429 => ProviderError::RateLimited(error_text),
                code => ProviderError::Http {
                    status: code,
                    body: error_text,
                },
            });
        }

        let json: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        parse_completion(json, &p.model)
    }
}

#[async_trait]
impl LlmClient for GroqClient {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, ProviderError> {
        match self.send_once(request).await {
            Err(e) if self.retry_transient && e.is_transient() => {
                tracing::warn!(
                    event = "symcheck.provider.retry",
                    provider = "groq",
                    error = %e,
                    "transient provider failure, retrying once"
                );
                tokio::time::sleep(RETRY_DELAY).await;
                self.send_once(request).await
            }
            other => other,
        }
    }

    fn provider_name(&self) -> &'static str {
        "groq"
    }
}

/// Pulls `choices[0].message.content` out of a completion envelope and keeps
/// the whole envelope as raw metadata.
pub(crate) fn parse_completion(
    json: serde_json::Value,
    requested_model: &str,
) -> Result<LlmResponse, ProviderError> {
    let serde_json::Value::Object(raw) = json else {
        return Err(ProviderError::MalformedResponse(
            "response is not a JSON object".into(),
        ));
    };

    let text = raw
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.pointer("/message/content"))
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            ProviderError::MalformedResponse("missing choices[0].message.content".into())
        })?
        .trim()
        .to_string();

    if text.is_empty() {
        return Err(ProviderError::MalformedResponse(
            "empty completion content".into(),
        ));
    }

    let model = raw
        .get("model")
        .and_then(|v| v.as_str())
        .unwrap_or(requested_model)
        .to_string();

    Ok(LlmResponse {
        text,
        provider: "groq".to_string(),
        model,
        raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_choice_and_keeps_envelope() {
        let json = json!({
            "id": "chatcmpl-1",
            "model": "llama-3.1-8b-instant",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "  - rest\n  "}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ],
            "usage": {"total_tokens": 42}
        });

        let resp = parse_completion(json, "fallback").unwrap();
        assert_eq!(resp.text, "- rest");
        assert_eq!(resp.model, "llama-3.1-8b-instant");
        assert_eq!(resp.raw["usage"]["total_tokens"], 42);
        assert_eq!(resp.raw["id"], "chatcmpl-1");
    }

    #[test]
    fn missing_or_empty_content_is_malformed() {
        let no_choices = json!({"choices": []});
        assert!(matches!(
            parse_completion(no_choices, "m"),
            Err(ProviderError::MalformedResponse(_))
        ));

        let blank = json!({"choices": [{"message": {"content": "   "}}]});
        assert!(matches!(
            parse_completion(blank, "m"),
            Err(ProviderError::MalformedResponse(_))
        ));

        assert!(parse_completion(json!(["not", "an", "object"]), "m").is_err());
    }

    #[test]
    fn transient_classification() {
        assert!(ProviderError::Http {
            status: 503,
            body: String::new()
        }
        .is_transient());
        assert!(!ProviderError::Unauthorized("bad key".into()).is_transient());
        assert!(!ProviderError::RateLimited("slow down".into()).is_transient());
    }
}
