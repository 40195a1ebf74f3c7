use reqwest::Client;
use tracing::{debug, warn};

use super::types::{ApiError, ChatCompletionRequest, ChatCompletionResponse, Message};
use crate::config::{ApiKey, Config};

const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("API rate limit exceeded. Please retry later.")]
    RateLimited,

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Single-message text completion.
/// Implemented by `OpenAiClient` for production; mock implementations used in tests.
pub trait Completion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    api_key: ApiKey,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(http: Client, api_key: ApiKey, model: &str, base_url: &str) -> Self {
        Self {
            http,
            api_key,
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(http: Client, config: &Config) -> Self {
        Self::new(
            http,
            config.openai_api_key.clone(),
            &config.model,
            &config.openai_base_url,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Completion for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![Message::user(prompt)],
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.api_key.expose())
            .header("User-Agent", crate::USER_AGENT)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("completion API rate limited");
            return Err(CompletionError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if let Ok(body) = serde_json::from_str::<ChatCompletionResponse>(&text)
                && let Some(err) = &body.error
            {
                let classified = classify_api_error(status.as_u16(), err);
                warn!(error = %classified, "completion API error");
                return Err(classified);
            }
            let snippet: String = text.chars().take(MAX_ERROR_BODY_CHARS).collect();
            warn!(status = %status, "completion API error (no structured body)");
            return Err(CompletionError::Api {
                code: status.as_u16(),
                message: format!("HTTP {status}: {snippet}"),
            });
        }

        let body: ChatCompletionResponse = response.json().await?;
        if let Some(err) = &body.error {
            let classified = classify_api_error(status.as_u16(), err);
            warn!(error = %classified, "completion API error in 200 response");
            return Err(classified);
        }

        let text = body.first_content().ok_or(CompletionError::EmptyResponse)?;
        debug!(model = %self.model, chars = text.len(), "completion complete");
        Ok(text)
    }
}

fn classify_api_error(status: u16, err: &ApiError) -> CompletionError {
    let message = err
        .message
        .clone()
        .unwrap_or_else(|| "Unknown error".to_string());

    match (status, err.kind.as_deref()) {
        (429, Some("insufficient_quota")) => CompletionError::Api {
            code: 429,
            message: format!("quota exhausted: {message}"),
        },
        (429, _) => CompletionError::RateLimited,
        (code, _) => CompletionError::Api { code, message },
    }
}


#[cfg(test)]
mod http_tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(uri: &str) -> OpenAiClient {
        OpenAiClient::new(Client::new(), ApiKey::new("sk-test"), "gpt-4o-mini", uri)
    }

    #[tokio::test]
    async fn complete_sends_single_user_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [{"role": "user", "content": "Vad är moms?"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-1",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "Moms är en skatt på konsumtion."},
                    "finish_reason": "stop"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server.uri()).complete("Vad är moms?").await.unwrap();
        assert_eq!(text, "Moms är en skatt på konsumtion.");
    }

    #[tokio::test]
    async fn complete_429_returns_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let result = client(&server.uri()).complete("test").await;
        assert!(matches!(result, Err(CompletionError::RateLimited)));
    }

    #[tokio::test]
    async fn complete_401_with_error_body_classified() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {
                    "message": "Incorrect API key provided",
                    "type": "invalid_request_error"
                }
            })))
            .mount(&server)
            .await;

        match client(&server.uri()).complete("test").await {
            Err(CompletionError::Api { code: 401, message }) => {
                assert!(message.contains("Incorrect API key"));
            }
            other => panic!("expected Api(401), got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn complete_500_with_invalid_body_returns_snippet() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        match client(&server.uri()).complete("test").await {
            Err(CompletionError::Api { code: 500, message }) => {
                assert!(message.contains("upstream exploded"), "got: {message}");
            }
            other => panic!("expected Api(500), got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn complete_without_choices_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let result = client(&server.uri()).complete("test").await;
        assert!(matches!(result, Err(CompletionError::EmptyResponse)));
    }
}
