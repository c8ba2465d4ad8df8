use crate::ai_types::{ChatRequest, ChatResponse, Message};
use crate::error::GenerationError;

/// Default model identifier for the local inference server.
pub const DEFAULT_MODEL: &str = "Qwen/Qwen3-0.6B";

/// Sampling and length bounds for one generation call.
#[derive(Debug, Clone, Copy)]
pub struct GenerationOptions {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl GenerationOptions {
    /// Low-randomness prose generation: context-faithful, one paragraph.
    #[must_use]
    pub const fn prose() -> Self {
        Self { max_tokens: 512, temperature: 0.1, top_p: 0.9 }
    }

    /// Deterministic structured extraction: sampling effectively disabled.
    #[must_use]
    pub const fn extraction() -> Self {
        Self { max_tokens: 256, temperature: 0.2, top_p: 1.0 }
    }
}

/// Client for the generation engine (OpenAI-compatible chat endpoint).
///
/// Constructed once at process start and injected into every request; the
/// engine's model handle lives behind this endpoint, never re-acquired
/// per request.
pub struct GenerationClient {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) model: String,
}

impl std::fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl GenerationClient {
    /// Creates a new generation client for the engine at `base_url`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(base_url: String, model: String) -> Result<Self, GenerationError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| GenerationError::ClientInit(e.to_string()))?;
        Ok(Self { client, base_url, model })
    }

    /// Returns the model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a system+user chat request and return the generated text.
    ///
    /// Retries transient failures with backoff. An engine out-of-memory
    /// signal (HTTP 507, or an error body mentioning it) maps to
    /// [`GenerationError::ResourceExhausted`] and is returned immediately.
    ///
    /// # Errors
    /// Returns an error if the request ultimately fails, the response cannot
    /// be parsed, or the choices array is empty.
    pub async fn chat(
        &self,
        system: &str,
        user: &str,
        opts: GenerationOptions,
    ) -> Result<String, GenerationError> {
        const MAX_RETRIES: usize = 3;
        const RETRY_DELAYS: [u64; 4] = [0, 1, 2, 4];

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message { role: "system".to_owned(), content: system.to_owned() },
                Message { role: "user".to_owned(), content: user.to_owned() },
            ],
            max_tokens: opts.max_tokens,
            temperature: opts.temperature,
            top_p: opts.top_p,
        };

        let mut last_error: Option<GenerationError> = None;

        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let delay_secs = RETRY_DELAYS.get(attempt).copied().unwrap_or(4);
                let delay = std::time::Duration::from_secs(delay_secs);
                tokio::time::sleep(delay).await;
                tracing::warn!("generation retry attempt {attempt}/{MAX_RETRIES} after {delay:?}");
            }

            let response_result = self
                .client
                .post(format!("{}/v1/chat/completions", self.base_url))
                .json(&request)
                .send()
                .await;

            let response = match response_result {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(GenerationError::HttpRequest(e));
                    continue;
                },
            };

            let status = response.status();
            if status.is_success() {
                let body = match response.text().await {
                    Ok(b) => b,
                    Err(e) => {
                        last_error = Some(GenerationError::HttpRequest(e));
                        continue;
                    },
                };

                let chat_response: ChatResponse =
                    serde_json::from_str(&body).map_err(|e| GenerationError::JsonParse {
                        context: format!("chat completion response (body: {})", truncate(&body, 200)),
                        source: e,
                    })?;

                let first_choice =
                    chat_response.choices.first().ok_or(GenerationError::EmptyResponse)?;

                return Ok(first_choice.message.content.clone());
            }

            let status_code = status.as_u16();
            let body =
                response.text().await.unwrap_or_else(|_| "could not read error body".to_owned());

            let err = classify_failure(status_code, body);
            if err.is_transient() {
                last_error = Some(err);
                continue;
            }
            return Err(err);
        }

        Err(GenerationError::RetriesExhausted(Box::new(
            last_error.unwrap_or(GenerationError::EmptyResponse),
        )))
    }
}

/// Map a non-success engine status to an error, recognizing the engine's
/// out-of-memory signal.
fn classify_failure(code: u16, body: String) -> GenerationError {
    if code == 507 || body.to_lowercase().contains("out of memory") {
        return GenerationError::ResourceExhausted;
    }
    GenerationError::HttpStatus { code, body }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub(crate) fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_507_as_resource_exhausted() {
        assert!(matches!(
            classify_failure(507, "insufficient storage".to_owned()),
            GenerationError::ResourceExhausted
        ));
    }

    #[test]
    fn test_classify_oom_body_as_resource_exhausted() {
        assert!(matches!(
            classify_failure(500, "CUDA error: Out of Memory".to_owned()),
            GenerationError::ResourceExhausted
        ));
    }

    #[test]
    fn test_classify_plain_500_kept_as_status() {
        assert!(matches!(
            classify_failure(500, "worker crashed".to_owned()),
            GenerationError::HttpStatus { code: 500, .. }
        ));
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        let s = "héllo";
        let t = truncate(s, 2);
        assert!(s.starts_with(t));
        assert!(t.len() <= 2);
    }
}
