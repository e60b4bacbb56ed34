//! Wire types for the Cohere v2 chat endpoint, limited to what a single
//! text turn needs.
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatRequest {
    /// The name of a compatible Cohere model.
    pub model: String,
    /// A list of chat messages in chronological order.
    pub messages: Vec<ChatMessage>,
    /// Degree of randomness in the generation. Lower is more deterministic.
    pub temperature: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub id: Option<String>,
    pub finish_reason: Option<String>,
    /// Absent on throttled requests. On error bodies this is a plain string.
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResponseMessage {
    Assistant(AssistantMessage),
    Other(Value),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantMessage {
    pub role: Option<String>,
    pub content: Option<Vec<ContentItem>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub text: Option<String>,
}

impl ChatResponse {
    /// The assistant content array, if the response carries one.
    #[must_use]
    pub fn content(&self) -> Option<&[ContentItem]> {
        match &self.message {
            Some(ResponseMessage::Assistant(message)) => message.content.as_deref(),
            _ => None,
        }
    }
}
