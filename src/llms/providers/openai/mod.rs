//! OpenAI Chat Completions provider.
//!
//! Sends a single `POST {base_url}/chat/completions` per call via `reqwest`
//! and returns the content of the first choice's message. There is no retry
//! loop and no client-side timeout: whatever the remote service or the
//! transport reports is handed back to the caller as an [`LLMError`].

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::llms::base_llm::{BaseLLM, LLMError, LLMMessage};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI chat-completion client.
///
/// # Example
///
/// ```ignore
/// let provider = OpenAICompletion::new("gpt-4o-mini", 0.7, std::env::var("OPENAI_API_KEY").ok(), None);
/// let text = provider.acall(vec![LLMMessage::user("hello")]).await?;
/// ```
#[derive(Clone)]
pub struct OpenAICompletion {
    model: String,
    temperature: f64,
    api_key: Option<String>,
    base_url: Option<String>,
    organization: Option<String>,
    client: reqwest::Client,
}

impl OpenAICompletion {
    /// Create a new provider.
    ///
    /// `api_key` may be `None`; every call then fails with
    /// [`LLMError::MissingApiKey`] without touching the network.
    pub fn new(
        model: impl Into<String>,
        temperature: f64,
        api_key: Option<String>,
        base_url: Option<String>,
    ) -> Self {
        Self {
            model: model.into(),
            temperature,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url,
            organization: None,
            client: reqwest::Client::new(),
        }
    }

    /// Send `OpenAI-Organization: <organization>` with every request.
    pub fn with_organization(mut self, organization: Option<String>) -> Self {
        self.organization = organization.filter(|o| !o.trim().is_empty());
        self
    }

    /// Get the API base URL.
    pub fn api_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base_url())
    }

    /// Build the request body for the Chat Completions API.
    pub fn build_request_body(&self, messages: &[LLMMessage]) -> Value {
        serde_json::json!({
            "model": self.model,
            "temperature": self.temperature,
            "messages": messages,
        })
    }

    /// Extract the reply text from a Chat Completions response.
    fn parse_completions_response(response: &Value) -> Result<String, LLMError> {
        let message = response
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|choice| choice.get("message"))
            .ok_or_else(|| LLMError::MalformedResponse("no message in first choice".into()))?;

        let content = message
            .get("content")
            .and_then(|c| c.as_str())
            .ok_or_else(|| LLMError::MalformedResponse("message has no text content".into()))?;

        if let Some(usage) = response.get("usage") {
            log::debug!(
                "OpenAI token usage: prompt={}, completion={}, total={}",
                usage.get("prompt_tokens").and_then(|v| v.as_i64()).unwrap_or(0),
                usage.get("completion_tokens").and_then(|v| v.as_i64()).unwrap_or(0),
                usage.get("total_tokens").and_then(|v| v.as_i64()).unwrap_or(0),
            );
        }

        Ok(content.to_string())
    }
}

impl fmt::Debug for OpenAICompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAICompletion")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.api_base_url())
            .field("organization", &self.organization)
            .finish()
    }
}

#[async_trait]
impl BaseLLM for OpenAICompletion {
    fn model(&self) -> &str {
        &self.model
    }

    fn temperature(&self) -> f64 {
        self.temperature
    }

    async fn acall(&self, messages: Vec<LLMMessage>) -> Result<String, LLMError> {
        log::debug!(
            "OpenAICompletion.acall: model={}, messages={}",
            self.model,
            messages.len(),
        );

        let api_key = self.api_key.as_ref().ok_or(LLMError::MissingApiKey)?;
        let body = self.build_request_body(&messages);

        let mut request = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body);
        if let Some(ref org) = self.organization {
            request = request.header("OpenAI-Organization", org);
        }

        let response = request.send().await?;
        let status = response.status();
        let response_text = response.text().await?;

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(LLMError::Authentication {
                status: status.as_u16(),
                body: response_text,
            });
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LLMError::RateLimited { body: response_text });
        }
        if !status.is_success() {
            return Err(LLMError::Api {
                status: status.as_u16(),
                body: response_text,
            });
        }

        let response_json: Value = serde_json::from_str(&response_text).map_err(|e| {
            LLMError::MalformedResponse(format!(
                "{} - Body: {}",
                e,
                response_text.chars().take(500).collect::<String>()
            ))
        })?;

        Self::parse_completions_response(&response_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};

    /// Serve `router` on an ephemeral local port and return its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }

    fn provider(base_url: String) -> OpenAICompletion {
        OpenAICompletion::new("gpt-4o-mini", 0.7, Some("sk-test".into()), Some(base_url))
    }

    #[test]
    fn test_build_request_body() {
        let p = OpenAICompletion::new("gpt-4o-mini", 0.7, None, None);
        let body = p.build_request_body(&[LLMMessage::system("sys"), LLMMessage::user("hi")]);
        assert_eq!(
            body,
            serde_json::json!({
                "model": "gpt-4o-mini",
                "temperature": 0.7,
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "hi"},
                ],
            })
        );
    }

    #[test]
    fn test_base_url_defaults_and_trims_slash() {
        let p = OpenAICompletion::new("m", 0.7, None, None);
        assert_eq!(p.endpoint(), "https://api.openai.com/v1/chat/completions");

        let p = OpenAICompletion::new("m", 0.7, None, Some("http://proxy.local/v1/".into()));
        assert_eq!(p.endpoint(), "http://proxy.local/v1/chat/completions");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let p = OpenAICompletion::new("m", 0.7, Some("sk-secret".into()), None);
        let dbg = format!("{:?}", p);
        assert!(!dbg.contains("sk-secret"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn test_parse_response_returns_content_verbatim() {
        let response = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "  **bold**\n"}}],
            "usage": {"prompt_tokens": 3, "completion_tokens": 2, "total_tokens": 5},
        });
        let text = OpenAICompletion::parse_completions_response(&response).unwrap();
        assert_eq!(text, "  **bold**\n");
    }

    #[test]
    fn test_parse_response_without_choices_is_malformed() {
        let err = OpenAICompletion::parse_completions_response(&serde_json::json!({"choices": []}))
            .unwrap_err();
        assert!(matches!(err, LLMError::MalformedResponse(_)));

        let err = OpenAICompletion::parse_completions_response(&serde_json::json!({
            "choices": [{"message": {"content": null}}]
        }))
        .unwrap_err();
        assert!(matches!(err, LLMError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_request() {
        let p = OpenAICompletion::new("gpt-4o-mini", 0.7, None, Some("http://127.0.0.1:1".into()));
        let err = p.acall(vec![LLMMessage::user("hi")]).await.unwrap_err();
        assert!(matches!(err, LLMError::MissingApiKey));

        let p = OpenAICompletion::new("gpt-4o-mini", 0.7, Some("   ".into()), None);
        let err = p.acall(vec![LLMMessage::user("hi")]).await.unwrap_err();
        assert!(matches!(err, LLMError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let p = provider("http://127.0.0.1:1/v1".into());
        let err = p.acall(vec![LLMMessage::user("hi")]).await.unwrap_err();
        assert!(matches!(err, LLMError::Transport(_)));
    }

    #[tokio::test]
    async fn test_successful_call_sends_expected_request() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|headers: axum::http::HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["authorization"], "Bearer sk-test");
                let user = body["messages"][1]["content"].as_str().unwrap_or("").to_string();
                Json(serde_json::json!({
                    "choices": [{"message": {"role": "assistant", "content": format!("echo: {}", user)}}]
                }))
            }),
        );
        let p = provider(serve(router).await);

        let text = p
            .acall(vec![LLMMessage::system("sys"), LLMMessage::user("ping")])
            .await
            .unwrap();
        assert_eq!(text, "echo: ping");
    }

    #[tokio::test]
    async fn test_organization_header() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|headers: axum::http::HeaderMap| async move {
                let org = headers
                    .get("openai-organization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("<none>")
                    .to_string();
                Json(serde_json::json!({
                    "choices": [{"message": {"role": "assistant", "content": org}}]
                }))
            }),
        );
        let base = serve(router).await;

        let with_org = provider(base.clone()).with_organization(Some("org-123".into()));
        let text = with_org.acall(vec![LLMMessage::user("hi")]).await.unwrap();
        assert_eq!(text, "org-123");

        let without_org = provider(base).with_organization(Some("  ".into()));
        let text = without_org.acall(vec![LLMMessage::user("hi")]).await.unwrap();
        assert_eq!(text, "<none>");
    }

    #[tokio::test]
    async fn test_status_codes_map_to_errors() {
        let router = Router::new()
            .route(
                "/unauthorized/chat/completions",
                post(|| async { (StatusCode::UNAUTHORIZED, "bad key") }),
            )
            .route(
                "/limited/chat/completions",
                post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
            )
            .route(
                "/broken/chat/completions",
                post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route(
                "/garbage/chat/completions",
                post(|| async { "not json" }),
            );
        let base = serve(router).await;
        let root = base.trim_end_matches("/v1");
        let msgs = || vec![LLMMessage::user("hi")];

        let err = provider(format!("{}/unauthorized", root)).acall(msgs()).await.unwrap_err();
        assert!(matches!(err, LLMError::Authentication { status: 401, .. }));

        let err = provider(format!("{}/limited", root)).acall(msgs()).await.unwrap_err();
        assert!(matches!(err, LLMError::RateLimited { .. }));

        let err = provider(format!("{}/broken", root)).acall(msgs()).await.unwrap_err();
        match err {
            LLMError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let err = provider(format!("{}/garbage", root)).acall(msgs()).await.unwrap_err();
        assert!(matches!(err, LLMError::MalformedResponse(_)));
    }
}
