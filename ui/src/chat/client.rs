//! HTTP clients for the chat service.
//!
//! No timeouts and no retries: a request waits until the transport itself
//! gives up, and a failure is reported once.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::core::transcript::{ChatReply, ChatRequest, QuickReply, QuickRequest};

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat service unreachable: {0}")]
    Transport(String),
    #[error("chat service answered with status {0}")]
    Status(u16),
    #[error("chat reply could not be decoded: {0}")]
    Decode(String),
}

/// Something that can carry one chat exchange.
#[allow(async_fn_in_trait)]
pub trait ChatTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ChatError>;
}

#[derive(Debug, Clone)]
pub struct HttpChatClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpChatClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl ChatTransport for HttpChatClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        post_json(&self.http, &self.endpoint, request).await
    }
}

/// Client for the single-question endpoint (`{input}` → `{response}`).
#[derive(Debug, Clone)]
pub struct QuickAskClient {
    http: reqwest::Client,
    endpoint: String,
}

impl QuickAskClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub async fn ask(&self, request: &QuickRequest) -> Result<QuickReply, ChatError> {
        let outcome = post_json(&self.http, &self.endpoint, request).await;
        if let Err(err) = &outcome {
            tracing::warn!(%err, endpoint = %self.endpoint, "quick ask failed");
        }
        outcome
    }
}

async fn post_json<B, R>(http: &reqwest::Client, endpoint: &str, body: &B) -> Result<R, ChatError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let response = http
        .post(endpoint)
        .json(body)
        .send()
        .await
        .map_err(|err| ChatError::Transport(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ChatError::Status(status.as_u16()));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|err| ChatError::Transport(err.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|err| ChatError::Decode(err.to_string()))
}

/// Send one request, logging failures before they turn into the fallback
/// message.
pub async fn deliver<T: ChatTransport>(
    transport: &T,
    request: &ChatRequest,
) -> Result<ChatReply, ChatError> {
    tracing::debug!(history = request.history.len(), "sending chat turn");
    let outcome = transport.send(request).await;
    match &outcome {
        Ok(reply) => tracing::info!(
            structured = reply.structured_data.is_some(),
            analysis = reply.analysis_results.is_some(),
            "chat reply received"
        ),
        Err(err) => tracing::warn!(%err, "chat request failed"),
    }
    outcome
}

/// Resolve a possibly relative endpoint (`/api/...`) against the origin of
/// `base`. Absolute endpoints are returned unchanged.
pub fn resolve_endpoint(base: &str, endpoint: &str) -> String {
    if !endpoint.starts_with('/') {
        return endpoint.to_string();
    }
    match reqwest::Url::parse(base).and_then(|url| url.join(endpoint)) {
        Ok(url) => url.to_string(),
        Err(_) => endpoint.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::{Transcript, TranscriptTexts};
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::{Cell, RefCell};

    struct FakeTransport {
        calls: Cell<usize>,
        seen: RefCell<Vec<ChatRequest>>,
        reply: fn() -> Result<ChatReply, ChatError>,
    }

    impl FakeTransport {
        fn new(reply: fn() -> Result<ChatReply, ChatError>) -> Self {
            Self {
                calls: Cell::new(0),
                seen: RefCell::new(Vec::new()),
                reply,
            }
        }
    }

    impl ChatTransport for FakeTransport {
        async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
            self.calls.set(self.calls.get() + 1);
            self.seen.borrow_mut().push(request.clone());
            (self.reply)()
        }
    }

    fn transcript() -> Transcript {
        Transcript::new(TranscriptTexts {
            greeting: "hello".into(),
            fallback: "fallback".into(),
            empty_reply: "empty".into(),
        })
    }

    fn turn(transport: &FakeTransport, transcript: &mut Transcript, text: &str) {
        if let Some(request) = transcript.begin_turn(text) {
            let outcome = block_on(deliver(transport, &request));
            transcript.settle(outcome);
        }
    }

    #[test]
    fn blank_submission_issues_no_request() {
        let transport = FakeTransport::new(|| Ok(ChatReply::default()));
        let mut transcript = transcript();
        turn(&transport, &mut transcript, "   ");
        assert_eq!(transport.calls.get(), 0);
        assert_eq!(transcript.messages().len(), 1);
    }

    #[test]
    fn request_carries_raw_text_and_paired_history() {
        let transport = FakeTransport::new(|| {
            Ok(serde_json::from_value(json!({ "response_text": "ok" })).unwrap())
        });
        let mut transcript = transcript();
        turn(&transport, &mut transcript, "first");
        turn(&transport, &mut transcript, "second");

        assert_eq!(transport.calls.get(), 2);
        let seen = transport.seen.borrow();
        assert_eq!(seen[1].input, "second");
        let wire = serde_json::to_value(&seen[1]).unwrap();
        assert_eq!(
            wire["history"],
            json!([["", "hello"], ["first", ""], ["", "ok"], ["second", ""]])
        );
    }

    #[test]
    fn transport_failure_becomes_one_fallback_entry() {
        let transport = FakeTransport::new(|| Err(ChatError::Transport("refused".into())));
        let mut transcript = transcript();
        turn(&transport, &mut transcript, "hi");
        let contents: Vec<&str> = transcript
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["hello", "hi", "fallback"]);
    }

    #[test]
    fn relative_endpoints_use_the_chat_origin() {
        assert_eq!(
            resolve_endpoint("http://localhost:8000/api/chatbot/response", "/api/clu/route"),
            "http://localhost:8000/api/clu/route"
        );
        assert_eq!(
            resolve_endpoint("http://localhost:8000/x", "https://other.example/ask"),
            "https://other.example/ask"
        );
    }

    #[test]
    fn errors_render_readably() {
        assert_eq!(
            ChatError::Status(503).to_string(),
            "chat service answered with status 503"
        );
    }
}
