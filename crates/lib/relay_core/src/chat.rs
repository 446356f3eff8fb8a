//! Chat shapes — the caller-facing request/response and the upstream wire format.

use serde::{Deserialize, Serialize};

/// Model requested from the upstream completion API.
pub const MODEL: &str = "deepseek-chat";

/// Number of characters of a reply kept in log previews.
pub const PREVIEW_CHARS: usize = 100;

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Successful reply to `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Body sent to the upstream chat-completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpstreamPayload<'a> {
    pub model: &'static str,
    pub messages: Vec<UpstreamMessage<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpstreamMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> UpstreamPayload<'a> {
    /// A fresh conversation holding `message` as its only user turn.
    pub fn single_turn(message: &'a str) -> Self {
        Self {
            model: MODEL,
            messages: vec![UpstreamMessage {
                role: "user",
                content: message,
            }],
        }
    }
}

/// The subset of an upstream completion the relay reads.
#[derive(Debug, Deserialize)]
pub struct Completion {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub content: String,
}

impl Completion {
    /// Content of the first choice, if there is one.
    pub fn into_reply(self) -> Option<String> {
        self.choices.into_iter().next().map(|c| c.message.content)
    }
}

/// First `max_chars` characters of `text`.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
