//! Common types for completion requests and responses

use super::LlmError;
use serde::{Deserialize, Serialize};

/// Completion request
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub messages: Vec<LlmMessage>,
    pub max_tokens: Option<u32>,
}

impl LlmRequest {
    /// A request carrying one user message whose content is the whole prompt.
    pub fn single_prompt(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            messages: vec![LlmMessage {
                role: MessageRole::User,
                content: vec![ContentBlock::text(prompt)],
            }],
            max_tokens: Some(max_tokens),
        }
    }

    /// Text of the first user message, if any
    #[cfg(test)]
    pub fn prompt_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == MessageRole::User)
            .and_then(|m| m.content.first())
            .and_then(ContentBlock::as_text)
    }
}

/// Message sent to the provider
#[derive(Debug, Clone)]
pub struct LlmMessage {
    pub role: MessageRole,
    pub content: Vec<ContentBlock>,
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

/// Content block in a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    /// Any block type we don't handle (tool use, thinking, ...)
    #[serde(other)]
    Unsupported,
}

impl ContentBlock {
    pub fn text(s: impl Into<String>) -> Self {
        ContentBlock::Text { text: s.into() }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Unsupported => None,
        }
    }
}

/// Completion response
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<String>,
    pub usage: Usage,
}

impl LlmResponse {
    /// Text of the first content block.
    ///
    /// The reply is taken from the first block only; an empty response or a
    /// leading non-text block is reported as [`LlmErrorKind::InvalidResponse`].
    ///
    /// [`LlmErrorKind::InvalidResponse`]: super::LlmErrorKind::InvalidResponse
    pub fn first_text(&self) -> Result<&str, LlmError> {
        match self.content.first() {
            Some(ContentBlock::Text { text }) => Ok(text),
            Some(ContentBlock::Unsupported) => Err(LlmError::invalid_response(
                "First content block is not text",
            )),
            None => Err(LlmError::invalid_response("Response has no content blocks")),
        }
    }
}

/// Usage statistics
#[derive(Debug, Clone, Default)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
