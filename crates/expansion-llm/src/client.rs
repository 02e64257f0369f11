// Claude API streaming client using reqwest-eventsource.
//
// Sends a single user message to the Anthropic Messages API with
// `stream: true` and collects the text deltas into one completion. The
// advisor only needs the finished text, so tokens are accumulated rather
// than forwarded.

use futures_util::StreamExt;
use reqwest_eventsource::{Event, RequestBuilderExt};
use serde_json::Value;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// Finished response text plus token usage reported by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
}

// ---------------------------------------------------------------------------
// ClaudeClient
// ---------------------------------------------------------------------------

/// Low-level Claude API streaming client.
pub struct ClaudeClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    api_url: String,
}

impl ClaudeClient {
    /// Create a new client with the given API key and model identifier.
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
            api_url: ANTHROPIC_API_URL.to_string(),
        }
    }

    /// Point the client at a different Messages endpoint.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one message and wait for the streamed response to finish.
    ///
    /// Returns an error for a missing key, a non-success status, a transport
    /// failure, or a stream that ends without producing any text.
    pub async fn complete(
        &self,
        system: &str,
        user_content: &str,
        max_tokens: u32,
    ) -> anyhow::Result<Completion> {
        if self.api_key.is_empty() {
            anyhow::bail!("API key not configured");
        }

        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": max_tokens,
            "stream": true,
            "system": system,
            "messages": [{ "role": "user", "content": user_content }]
        });

        let request = self
            .http
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body);

        let mut es = request
            .eventsource()
            .map_err(|e| anyhow::anyhow!("Failed to create event source: {e}"))?;

        let mut completion = Completion::default();

        while let Some(event) = es.next().await {
            match event {
                Ok(Event::Open) => {
                    debug!("SSE connection opened");
                }
                Ok(Event::Message(msg)) => match msg.event.as_str() {
                    "message_start" => {
                        match parse_input_tokens(&msg.data) {
                            Some(n) => completion.input_tokens = n,
                            None => warn!("failed to parse input_tokens from message_start"),
                        }
                        debug!(input_tokens = completion.input_tokens, "message_start");
                    }
                    "content_block_delta" => {
                        if let Some(text) = parse_delta_text(&msg.data) {
                            completion.text.push_str(&text);
                        }
                    }
                    "message_delta" => {
                        match parse_output_tokens(&msg.data) {
                            Some(n) => completion.output_tokens = n,
                            None => warn!("failed to parse output_tokens from message_delta"),
                        }
                        debug!(output_tokens = completion.output_tokens, "message_delta");
                    }
                    "message_stop" => {
                        debug!("message_stop, streaming complete");
                        es.close();
                        return Ok(completion);
                    }
                    "error" => {
                        es.close();
                        anyhow::bail!("API error: {}", parse_stream_error(&msg.data));
                    }
                    // ping, content_block_start, content_block_stop
                    other => {
                        debug!(event_type = other, "ignoring SSE event");
                    }
                },
                Err(reqwest_eventsource::Error::StreamEnded) if !completion.text.is_empty() => {
                    es.close();
                    break;
                }
                Err(err) => {
                    warn!(?err, "SSE stream error");
                    es.close();
                    anyhow::bail!(extract_error_message(&err));
                }
            }
        }

        if completion.text.is_empty() {
            anyhow::bail!("Stream ended unexpectedly without any content");
        }
        Ok(completion)
    }
}

// ---------------------------------------------------------------------------
// LlmClient wrapper
// ---------------------------------------------------------------------------

/// High-level wrapper that can be either an active Claude client or disabled.
pub enum LlmClient {
    /// Claude API is configured and ready.
    Active(ClaudeClient),
    /// LLM functionality is disabled (no API key configured).
    Disabled,
}

impl LlmClient {
    /// `Active` when a non-empty key is supplied, otherwise `Disabled`.
    pub fn from_key(api_key: Option<&str>, model: &str) -> Self {
        match api_key {
            Some(key) if !key.trim().is_empty() => {
                LlmClient::Active(ClaudeClient::new(key.trim().to_string(), model.to_string()))
            }
            _ => LlmClient::Disabled,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, LlmClient::Active(_))
    }

    pub async fn complete(
        &self,
        system: &str,
        user_content: &str,
        max_tokens: u32,
    ) -> anyhow::Result<Completion> {
        match self {
            LlmClient::Active(client) => client.complete(system, user_content, max_tokens).await,
            LlmClient::Disabled => anyhow::bail!("LLM not configured"),
        }
    }
}

// ---------------------------------------------------------------------------
// SSE JSON parsing helpers
// ---------------------------------------------------------------------------

/// Extract `input_tokens` from a `message_start` event's JSON.
///
/// Expected shape: `{ "type": "message_start", "message": { "usage": { "input_tokens": N } } }`
pub(crate) fn parse_input_tokens(data: &str) -> Option<u32> {
    let v: Value = serde_json::from_str(data).ok()?;
    v.get("message")?
        .get("usage")?
        .get("input_tokens")?
        .as_u64()
        .map(|n| n as u32)
}

/// Extract `delta.text` from a `content_block_delta` event's JSON.
pub(crate) fn parse_delta_text(data: &str) -> Option<String> {
    let v: Value = serde_json::from_str(data).ok()?;
    v.get("delta")?.get("text")?.as_str().map(|s| s.to_string())
}

/// Extract `output_tokens` from a `message_delta` event's JSON.
pub(crate) fn parse_output_tokens(data: &str) -> Option<u32> {
    let v: Value = serde_json::from_str(data).ok()?;
    v.get("usage")?
        .get("output_tokens")?
        .as_u64()
        .map(|n| n as u32)
}

/// Message from an in-stream `error` event, or the raw payload.
pub(crate) fn parse_stream_error(data: &str) -> String {
    serde_json::from_str::<Value>(data)
        .ok()
        .and_then(|v| {
            v.get("error")?
                .get("message")?
                .as_str()
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| data.to_string())
}

/// Extract a human-readable error message from an SSE error.
fn extract_error_message(err: &reqwest_eventsource::Error) -> String {
    match err {
        reqwest_eventsource::Error::InvalidStatusCode(status, _response) => {
            format!("API returned status {status}")
        }
        reqwest_eventsource::Error::Transport(e) => {
            format!("Network error: {e}")
        }
        other => format!("Stream error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
