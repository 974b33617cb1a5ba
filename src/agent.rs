//! Turn controller
//!
//! One call to [`RetailAgent::chat`] is one turn: record the customer
//! message, build the prompt, ask the model once, record the reply. A failed
//! completion is answered with a fixed apology so the conversation can carry
//! on; the cause only goes to the log.

use crate::catalog::Catalog;
use crate::config::{AssistantConfig, ConfigError};
use crate::conversation::{HistoryWindow, Session};
use crate::llm::{AnthropicService, LlmRequest, LlmService, LoggingService};
use crate::prompt::build_prompt;
use std::sync::Arc;

/// Reply used whenever the completion service fails
pub const APOLOGY: &str = "I apologize, but I encountered an error. Please try again.";

/// Where a turn's reply came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Model,
    Fallback,
}

/// Result of one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub reply: String,
    pub source: ReplySource,
}

impl TurnOutcome {
    fn model(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            source: ReplySource::Model,
        }
    }

    fn fallback() -> Self {
        Self {
            reply: APOLOGY.to_string(),
            source: ReplySource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ReplySource::Fallback
    }
}

/// Retail assistant bound to one catalog and one completion service
pub struct RetailAgent {
    catalog: Catalog,
    llm: Arc<dyn LlmService>,
    history_window: HistoryWindow,
    max_tokens: u32,
}

impl RetailAgent {
    pub fn new(
        catalog: Catalog,
        llm: Arc<dyn LlmService>,
        history_window: HistoryWindow,
        max_tokens: u32,
    ) -> Self {
        Self {
            catalog,
            llm,
            history_window,
            max_tokens,
        }
    }

    /// Build an agent backed by the Anthropic API.
    pub fn from_config(config: &AssistantConfig, catalog: Catalog) -> Result<Self, ConfigError> {
        let service = AnthropicService::new(
            config.api_key.clone(),
            config.model.clone(),
            config.base_url.as_deref(),
        )?;
        let llm: Arc<dyn LlmService> = Arc::new(LoggingService::new(Arc::new(service)));
        Ok(Self::new(
            catalog,
            llm,
            config.history_window,
            config.max_tokens,
        ))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn model_id(&self) -> &str {
        self.llm.model_id()
    }

    pub fn start_session(&self) -> Session {
        let session = Session::new();
        tracing::info!(
            session = %session.id(),
            model = %self.llm.model_id(),
            history_window = %self.history_window,
            "Session started"
        );
        session
    }

    /// Run one turn. Never fails: completion errors become [`APOLOGY`].
    pub async fn chat(&self, session: &mut Session, message: &str) -> TurnOutcome {
        session.begin_turn(message);

        let prior = session
            .history()
            .messages()
            .split_last()
            .map_or(&[][..], |(_, prior)| prior);
        let window = self.history_window.select(prior);
        let prompt = build_prompt(&self.catalog, window, message);

        tracing::debug!(
            session = %session.id(),
            window_messages = window.len(),
            prompt_bytes = prompt.len(),
            "Requesting completion"
        );

        let request = LlmRequest::single_prompt(prompt, self.max_tokens);
        let result = self
            .llm
            .complete(&request)
            .await
            .and_then(|response| response.first_text().map(str::to_string));

        let outcome = match result {
            Ok(text) => TurnOutcome::model(text),
            Err(e) => {
                tracing::error!(
                    session = %session.id(),
                    kind = ?e.kind,
                    error = %e,
                    "Error processing message"
                );
                TurnOutcome::fallback()
            }
        };

        session.complete_turn(&outcome.reply);
        outcome
    }
}
