//! Chat transcript state and the reply fan-out.
//!
//! The transcript is append-only. A turn is split in two halves so the
//! network call can happen in between: [`Transcript::begin_turn`] records the
//! user message and builds the request, [`Transcript::settle`] records the
//! outcome and hands back the analysis slices to forward.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::charts::ChartDescriptor;
use crate::chat::ChatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Body of the main chat endpoint. History entries are `[user, assistant]`
/// pairs with the other side left blank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub input: String,
    pub history: Vec<(String, String)>,
}

/// Reply of the main chat endpoint. Side fields are kept as raw JSON; one
/// with an unexpected shape is dropped when forwarding, never a decode error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response_text: Option<String>,
    #[serde(default)]
    pub structured_data: Option<Value>,
    #[serde(default)]
    pub analysis_results: Option<Value>,
    #[serde(default)]
    pub related_docu: Option<Value>,
}

/// Fixed texts the transcript writes on its own behalf.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptTexts {
    pub greeting: String,
    pub fallback: String,
    pub empty_reply: String,
}

impl TranscriptTexts {
    pub fn localized() -> Self {
        Self {
            greeting: crate::t!("chat-greeting"),
            fallback: crate::t!("chat-error-fallback"),
            empty_reply: crate::t!("chat-empty-reply"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    texts: TranscriptTexts,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(TranscriptTexts::localized())
    }
}

impl Transcript {
    pub fn new(texts: TranscriptTexts) -> Self {
        let messages = vec![ChatMessage {
            role: Role::Assistant,
            content: texts.greeting.clone(),
        }];
        Self { messages, texts }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whitespace-only input is a no-op and yields no request.
    pub fn begin_turn(&mut self, text: &str) -> Option<ChatRequest> {
        if text.trim().is_empty() {
            return None;
        }
        self.messages.push(ChatMessage {
            role: Role::User,
            content: text.to_string(),
        });
        let history = self
            .messages
            .iter()
            .map(|message| match message.role {
                Role::User => (message.content.clone(), String::new()),
                Role::Assistant => (String::new(), message.content.clone()),
            })
            .collect();
        Some(ChatRequest {
            input: text.to_string(),
            history,
        })
    }

    /// Record the outcome of one exchange. Failures append the fallback text
    /// and forward nothing.
    pub fn settle(&mut self, outcome: Result<ChatReply, ChatError>) -> Option<ReplyForwards> {
        match outcome {
            Ok(reply) => {
                let content = reply
                    .response_text
                    .clone()
                    .filter(|text| !text.is_empty())
                    .unwrap_or_else(|| self.texts.empty_reply.clone());
                self.push_assistant(content);
                Some(ReplyForwards::from_reply(reply))
            }
            Err(_) => {
                let fallback = self.texts.fallback.clone();
                self.push_assistant(fallback);
                None
            }
        }
    }

    fn push_assistant(&mut self, content: String) {
        self.messages.push(ChatMessage {
            role: Role::Assistant,
            content,
        });
    }
}

/// Analysis slices pulled out of a successful reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplyForwards {
    pub structured: Option<Map<String, Value>>,
    pub planning: Option<Value>,
    pub related_docs: Option<String>,
    /// Present whenever `analysis_results` is, empty if the path is missing.
    pub predictions: Option<Vec<ChartDescriptor>>,
}

impl ReplyForwards {
    pub fn from_reply(reply: ChatReply) -> Self {
        let predictions = reply.analysis_results.as_ref().map(forecast_series);
        Self {
            structured: match reply.structured_data {
                Some(Value::Object(fields)) => Some(fields),
                _ => None,
            },
            planning: reply.analysis_results,
            related_docs: match reply.related_docu {
                Some(Value::String(text)) => Some(text),
                _ => None,
            },
            predictions,
        }
    }

    /// Call every supplied handler whose slice is present.
    pub fn dispatch(self, handlers: &ReplyHandlers) {
        if let (Some(payload), Some(handler)) = (self.structured, &handlers.structured) {
            handler(payload);
        }
        if let (Some(payload), Some(handler)) = (self.planning, &handlers.planning) {
            handler(payload);
        }
        if let (Some(payload), Some(handler)) = (self.related_docs, &handlers.related_docs) {
            handler(payload);
        }
        if let (Some(payload), Some(handler)) = (self.predictions, &handlers.predictions) {
            handler(payload);
        }
    }
}

/// `analysis_results.accumulated_sales_planning.predictions`, one descriptor
/// per entry in order.
fn forecast_series(analysis: &Value) -> Vec<ChartDescriptor> {
    analysis
        .pointer("/accumulated_sales_planning/predictions")
        .and_then(Value::as_array)
        .map(|items| items.iter().cloned().map(ChartDescriptor::from_value).collect())
        .unwrap_or_default()
}

type Handler<T> = Option<Box<dyn Fn(T)>>;

#[derive(Default)]
pub struct ReplyHandlers {
    pub structured: Handler<Map<String, Value>>,
    pub planning: Handler<Value>,
    pub related_docs: Handler<String>,
    pub predictions: Handler<Vec<ChartDescriptor>>,
}

/// Body and reply of the secondary quick-ask endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickRequest {
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuickReply {
    #[serde(default)]
    pub response: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuickLine {
    pub sender: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuickTexts {
    pub you: String,
    pub bot: String,
    pub error: String,
}

impl QuickTexts {
    pub fn localized() -> Self {
        Self {
            you: crate::t!("quick-you"),
            bot: crate::t!("quick-bot"),
            error: crate::t!("quick-error"),
        }
    }
}

/// Line log for the quick-ask box.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickLog {
    lines: Vec<QuickLine>,
    texts: QuickTexts,
}

impl Default for QuickLog {
    fn default() -> Self {
        Self::new(QuickTexts::localized())
    }
}

impl QuickLog {
    pub fn new(texts: QuickTexts) -> Self {
        Self {
            lines: Vec::new(),
            texts,
        }
    }

    pub fn lines(&self) -> &[QuickLine] {
        &self.lines
    }

    pub fn begin(&mut self, text: &str) -> Option<QuickRequest> {
        if text.trim().is_empty() {
            return None;
        }
        self.lines.push(QuickLine {
            sender: self.texts.you.clone(),
            text: text.to_string(),
        });
        Some(QuickRequest {
            input: text.to_string(),
        })
    }

    pub fn settle(&mut self, outcome: Result<QuickReply, ChatError>) {
        let text = match outcome {
            Ok(reply) => format!("🤖 {}", reply.response),
            Err(_) => self.texts.error.clone(),
        };
        self.lines.push(QuickLine {
            sender: self.texts.bot.clone(),
            text,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn texts() -> TranscriptTexts {
        TranscriptTexts {
            greeting: "hello".into(),
            fallback: "server error".into(),
            empty_reply: "no response".into(),
        }
    }

    fn reply(raw: Value) -> ChatReply {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn whitespace_input_is_ignored() {
        let mut transcript = Transcript::new(texts());
        assert!(transcript.begin_turn("   \n\t").is_none());
        assert!(transcript.begin_turn("").is_none());
        assert_eq!(transcript.messages().len(), 1);
    }

    #[test]
    fn history_pairs_include_greeting_and_new_message() {
        let mut transcript = Transcript::new(texts());
        let request = transcript.begin_turn("뮤지컬 예측해줘").unwrap();
        assert_eq!(request.input, "뮤지컬 예측해줘");
        assert_eq!(
            request.history,
            vec![
                (String::new(), "hello".to_string()),
                ("뮤지컬 예측해줘".to_string(), String::new()),
            ]
        );
        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire["history"][0], json!(["", "hello"]));
    }

    #[test]
    fn success_appends_reply_and_forwards_predictions() {
        let mut transcript = Transcript::new(texts());
        transcript.begin_turn("hi?");
        let d1 = json!({ "chartType": "bar", "title": "d1", "data": [] });
        let d2 = json!({ "chartType": "line", "title": "d2", "data": [] });
        let forwards = transcript
            .settle(Ok(reply(json!({
                "response_text": "hi",
                "analysis_results": { "accumulated_sales_planning": { "predictions": [d1, d2] } }
            }))))
            .unwrap();

        let seen: Rc<RefCell<Vec<Vec<String>>>> = Rc::default();
        let sink = seen.clone();
        let handlers = ReplyHandlers {
            predictions: Some(Box::new(move |charts: Vec<ChartDescriptor>| {
                sink.borrow_mut()
                    .push(charts.into_iter().map(|c| c.title).collect());
            })),
            ..Default::default()
        };
        forwards.dispatch(&handlers);

        assert_eq!(*seen.borrow(), vec![vec!["d1".to_string(), "d2".to_string()]]);
        let assistant: Vec<&ChatMessage> = transcript
            .messages()
            .iter()
            .skip(2)
            .collect();
        assert_eq!(assistant.len(), 1);
        assert_eq!(assistant[0].role, Role::Assistant);
        assert_eq!(assistant[0].content, "hi");
    }

    #[test]
    fn failure_appends_fallback_and_forwards_nothing() {
        let mut transcript = Transcript::new(texts());
        transcript.begin_turn("hi?");
        let forwards = transcript.settle(Err(ChatError::Status(500)));
        assert!(forwards.is_none());
        let last = transcript.messages().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, "server error");
        assert_eq!(transcript.messages().len(), 3);
    }

    #[test]
    fn missing_text_uses_empty_reply_and_missing_path_forwards_empty_series() {
        let mut transcript = Transcript::new(texts());
        transcript.begin_turn("hi?");
        let forwards = transcript
            .settle(Ok(reply(json!({ "analysis_results": { "other": 1 } }))))
            .unwrap();
        assert_eq!(transcript.messages().last().unwrap().content, "no response");
        assert_eq!(forwards.predictions, Some(Vec::new()));
        assert!(forwards.structured.is_none());
    }

    #[test]
    fn absent_handlers_are_skipped() {
        let forwards = ReplyForwards::from_reply(reply(json!({
            "structured_data": { "genre": "연극" },
            "related_docu": "doc"
        })));
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        let handlers = ReplyHandlers {
            related_docs: Some(Box::new(move |_: String| *counter.borrow_mut() += 1)),
            ..Default::default()
        };
        forwards.dispatch(&handlers);
        assert_eq!(*calls.borrow(), 1);
    }

    fn forwarded_titles(forwards: ReplyForwards) -> Vec<String> {
        let seen: Rc<RefCell<Vec<String>>> = Rc::default();
        let sink = seen.clone();
        let handlers = ReplyHandlers {
            predictions: Some(Box::new(move |charts: Vec<ChartDescriptor>| {
                sink.borrow_mut().extend(charts.into_iter().map(|c| c.title));
            })),
            ..Default::default()
        };
        forwards.dispatch(&handlers);
        let titles = seen.borrow().clone();
        titles
    }

    #[test]
    fn incomplete_predictions_are_forwarded_in_order() {
        let d1 = json!({ "chartType": "bar", "title": "d1", "data": [] });
        let d2 = json!({
            "chartType": "boxplot", "title": "d2",
            "stats": { "min": "1", "max": "9", "q1": "3", "q3": "7", "median": "5" }
        });
        let d3 = json!({
            "chartType": "line-band", "title": "d3", "yField": "v",
            "band": { "upper": "hi" }, "data": []
        });
        let d4 = json!({ "chartType": "bar", "title": "d4", "yFields": [1] });
        let forwards = ReplyForwards::from_reply(reply(json!({
            "analysis_results": { "accumulated_sales_planning": { "predictions": [d1, d2, d3, d4] } }
        })));
        assert_eq!(forwarded_titles(forwards), vec!["d1", "d2", "d3", "d4"]);
    }

    #[test]
    fn wrong_typed_side_fields_are_not_forwarded() {
        let mut transcript = Transcript::new(texts());
        transcript.begin_turn("hi?");
        let forwards = transcript
            .settle(Ok(reply(json!({
                "response_text": "hi",
                "related_docu": ["doc a"],
                "structured_data": "genre: 연극"
            }))))
            .unwrap();
        assert_eq!(transcript.messages().last().unwrap().content, "hi");
        assert!(forwards.related_docs.is_none());
        assert!(forwards.structured.is_none());

        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        let handlers = ReplyHandlers {
            related_docs: Some(Box::new(move |_: String| *counter.borrow_mut() += 1)),
            ..Default::default()
        };
        forwards.dispatch(&handlers);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn quick_log_prefixes_bot_lines() {
        let mut log = QuickLog::new(QuickTexts {
            you: "You".into(),
            bot: "Bot".into(),
            error: "oops".into(),
        });
        assert!(log.begin("  ").is_none());
        let request = log.begin("ping").unwrap();
        assert_eq!(request.input, "ping");
        log.settle(Ok(QuickReply {
            response: "pong".into(),
        }));
        log.settle(Err(ChatError::Status(502)));
        let texts: Vec<&str> = log.lines().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["ping", "🤖 pong", "oops"]);
        assert_eq!(log.lines()[1].sender, "Bot");
    }
}
