//! Mock completion services for testing
//!
//! These mocks let the turn controller and shell run without real I/O.

use super::{ContentBlock, LlmError, LlmRequest, LlmResponse, LlmService, Usage};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Build a plain text response
pub fn text_response(text: impl Into<String>) -> LlmResponse {
    LlmResponse {
        content: vec![ContentBlock::text(text)],
        stop_reason: Some("end_turn".to_string()),
        usage: Usage {
            input_tokens: 10,
            output_tokens: 5,
        },
    }
}

/// Mock service that returns queued responses
pub struct MockLlmService {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    model_id: String,
    /// Record of all requests made
    pub requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmService {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            model_id: model_id.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn queue_response(&self, response: LlmResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue a successful plain text response
    pub fn queue_text(&self, text: impl Into<String>) {
        self.queue_response(text_response(text));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Prompt text of every recorded request, in order
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.recorded_requests()
            .iter()
            .filter_map(|r| r.prompt_text().map(str::to_string))
            .collect()
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Service that replies with the prompt it was given
pub struct EchoLlmService;

#[async_trait]
impl LlmService for EchoLlmService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        request
            .prompt_text()
            .map(text_response)
            .ok_or_else(|| LlmError::invalid_request("No prompt in request"))
    }

    fn model_id(&self) -> &str {
        "echo"
    }
}
