//! Client for OpenAI-compatible `/chat/completions` endpoints.
//!
//! Replies are always streamed. Tool schemas are sent with every request and
//! the model is free to answer in text or elect one tool.

mod stream;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::chat::{ChatMessage, ChatProvider, ChatRole, ChunkStream, MessageType, Tool};
use crate::error::ConciergeError;
use crate::ToolCall;

pub use stream::create_completions_stream;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Client for an OpenAI-compatible chat API.
pub struct OpenAI {
    api_key: SecretString,
    base_url: reqwest::Url,
    model: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    timeout_seconds: Option<u64>,
    client: reqwest::Client,
}

/// Request payload for the chat completions endpoint.
#[derive(Serialize, Debug)]
struct CompletionsRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [Tool]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parallel_tool_calls: Option<bool>,
}

#[derive(Serialize, Debug, PartialEq)]
struct WireMessage<'a> {
    role: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<&'a [ToolCall]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<&'a str>,
}

impl<'a> WireMessage<'a> {
    fn text(role: &'a str, content: &'a str) -> Self {
        Self {
            role,
            content: Some(content),
            tool_calls: None,
            tool_call_id: None,
        }
    }
}

fn wire_messages(messages: &[ChatMessage]) -> Vec<WireMessage<'_>> {
    let mut wire = Vec::with_capacity(messages.len());
    for msg in messages {
        match (&msg.role, &msg.message_type) {
            (ChatRole::System, _) => wire.push(WireMessage::text("system", &msg.content)),
            (ChatRole::User, _) => wire.push(WireMessage::text("user", &msg.content)),
            (ChatRole::Assistant, MessageType::Text) => {
                wire.push(WireMessage::text("assistant", &msg.content))
            }
            (ChatRole::Assistant, MessageType::ToolUse(calls)) => wire.push(WireMessage {
                role: "assistant",
                content: None,
                tool_calls: Some(calls.as_slice()),
                tool_call_id: None,
            }),
            (ChatRole::Assistant, MessageType::ToolResult(results)) => {
                wire.extend(results.iter().map(|result| WireMessage {
                    role: "tool",
                    content: Some(result.function.arguments.as_str()),
                    tool_calls: None,
                    tool_call_id: Some(result.id.as_str()),
                }))
            }
        }
    }
    wire
}

impl OpenAI {
    /// Creates a new client.
    ///
    /// Fails with [`ConciergeError::AuthError`] when the key is empty and
    /// with [`ConciergeError::InvalidRequest`] when the base URL does not
    /// parse.
    pub fn new(
        api_key: SecretString,
        base_url: Option<String>,
        model: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, ConciergeError> {
        if api_key.expose_secret().trim().is_empty() {
            return Err(ConciergeError::AuthError("Missing API key".to_string()));
        }
        let base_url = parse_base_url(base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        Ok(Self {
            api_key,
            base_url,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens,
            temperature,
            timeout_seconds,
            client: reqwest::Client::new(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn completions_url(&self) -> Result<reqwest::Url, ConciergeError> {
        self.base_url
            .join("chat/completions")
            .map_err(|e| ConciergeError::HttpError(e.to_string()))
    }

    fn apply_timeout(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.timeout_seconds {
            Some(timeout) => request.timeout(Duration::from_secs(timeout)),
            None => request,
        }
    }

    fn log_request_payload<T: Serialize>(&self, label: &str, body: &T) {
        if !log::log_enabled!(log::Level::Trace) {
            return;
        }
        if let Ok(json) = serde_json::to_string(body) {
            log::trace!("{label}: {json}");
        }
    }

    async fn ensure_success_response(
        &self,
        response: reqwest::Response,
        context: &str,
    ) -> Result<reqwest::Response, ConciergeError> {
        log::debug!("{context} HTTP status: {}", response.status());
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let error_text = response.text().await?;
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ConciergeError::AuthError(error_text));
        }
        Err(ConciergeError::ResponseFormatError {
            message: format!("{context} returned error status: {status}"),
            raw_response: error_text,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<reqwest::Url, ConciergeError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    reqwest::Url::parse(&normalized)
        .map_err(|e| ConciergeError::InvalidRequest(format!("invalid base url {raw}: {e}")))
}

#[async_trait]
impl ChatProvider for OpenAI {
    async fn chat_stream_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[Tool]>,
    ) -> Result<ChunkStream, ConciergeError> {
        let tools = tools.filter(|t| !t.is_empty());
        let body = CompletionsRequest {
            model: &self.model,
            messages: wire_messages(messages),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            stream: true,
            tools,
            parallel_tool_calls: tools.map(|_| false),
        };
        self.log_request_payload("chat completions request", &body);

        let request = self
            .client
            .post(self.completions_url()?)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body);
        let response = self.apply_timeout(request).send().await?;
        let response = self
            .ensure_success_response(response, "chat completions")
            .await?;
        Ok(create_completions_stream(response))
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;
    use serde_json::json;

    use super::*;
    use crate::chat::StreamChunk;
    use crate::FunctionCall;

    fn client(base_url: &str) -> OpenAI {
        OpenAI::new(
            SecretString::new("sk-test".to_string()),
            Some(base_url.to_string()),
            Some("test-model".to_string()),
            None,
            Some(0.2),
            Some(5),
        )
        .expect("client")
    }

    #[test]
    fn empty_key_is_rejected() {
        let err = OpenAI::new(SecretString::new("  ".to_string()), None, None, None, None, None)
            .err()
            .expect("empty key must fail");
        assert!(matches!(err, ConciergeError::AuthError(_)));
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let client = client("http://localhost:9999/v1");
        assert_eq!(
            client.completions_url().expect("url").as_str(),
            "http://localhost:9999/v1/chat/completions"
        );
    }

    #[test]
    fn tool_history_is_flattened_for_the_wire() {
        let call = ToolCall {
            id: "c1".to_string(),
            call_type: "function".to_string(),
            function: FunctionCall {
                name: "showInventory".to_string(),
                arguments: "{}".to_string(),
            },
        };
        let result = ToolCall {
            function: FunctionCall {
                name: "showInventory".to_string(),
                arguments: "[]".to_string(),
            },
            ..call.clone()
        };
        let messages = vec![
            ChatMessage::system().content("persona").build(),
            ChatMessage::user().content("show me").build(),
            ChatMessage::assistant().tool_use(vec![call]).build(),
            ChatMessage::assistant().tool_result(vec![result]).build(),
        ];
        let wire = serde_json::to_value(wire_messages(&messages)).expect("serialize");
        assert_eq!(wire[0], json!({"role": "system", "content": "persona"}));
        assert_eq!(wire[2]["tool_calls"][0]["function"]["name"], "showInventory");
        assert!(wire[2].get("content").is_none());
        assert_eq!(
            wire[3],
            json!({"role": "tool", "content": "[]", "tool_call_id": "c1"})
        );
    }

    #[tokio::test]
    async fn streams_text_from_server() {
        let mut server = mockito::Server::new_async().await;
        let body = concat!(
            "data: {\"choices\":[{\"delta\":{\"content\":\"Hello\"},\"finish_reason\":null}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\" there\"},\"finish_reason\":null}]}\n\n",
            "data: {\"choices\":[{\"delta\":{},\"finish_reason\":\"stop\"}]}\n\n",
            "data: [DONE]\n\n",
        );
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(mockito::Matcher::PartialJson(json!({
                "model": "test-model",
                "stream": true,
            })))
            .with_status(200)
            .with_header("content-type", "text/event-stream")
            .with_body(body)
            .create_async()
            .await;

        let client = client(&format!("{}/v1", server.url()));
        let messages = vec![ChatMessage::user().content("hi").build()];
        let chunks: Vec<StreamChunk> = client
            .chat_stream_with_tools(&messages, None)
            .await
            .expect("stream")
            .map(|c| c.expect("chunk"))
            .collect()
            .await;

        mock.assert_async().await;
        assert_eq!(
            chunks,
            vec![
                StreamChunk::Text("Hello".to_string()),
                StreamChunk::Text(" there".to_string()),
                StreamChunk::Done {
                    stop_reason: "stop".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn error_status_is_reported_with_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = client(&server.url());
        let messages = vec![ChatMessage::user().content("hi").build()];
        let err = client
            .chat_stream_with_tools(&messages, None)
            .await
            .err()
            .expect("must fail");
        assert!(
            matches!(err, ConciergeError::ResponseFormatError { raw_response, .. } if raw_response == "boom")
        );
    }

    #[tokio::test]
    async fn unauthorized_maps_to_auth_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body("bad key")
            .create_async()
            .await;

        let client = client(&server.url());
        let messages = vec![ChatMessage::user().content("hi").build()];
        let err = client
            .chat_stream_with_tools(&messages, None)
            .await
            .err()
            .expect("must fail");
        assert!(matches!(err, ConciergeError::AuthError(_)));
    }
}
