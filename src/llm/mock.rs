//! Scriptable in-memory LLM for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;

use super::error::{LlmError, LlmResult};
use super::{LlmService, ResponseSchema};

/// Mock LLM that replays queued responses and records prompts.
///
/// Structured and text queues are independent FIFO queues. An exhausted queue
/// is an explicit [`LlmError::MalformedResponse`] so a test that
/// under-scripts fails loudly instead of hanging on fabricated output.
#[derive(Default)]
pub struct MockLlmService {
    structured: Mutex<Vec<LlmResult<Value>>>,
    texts: Mutex<Vec<LlmResult<String>>>,
    prompts: Mutex<Vec<(String, String)>>,
    calls: AtomicUsize,
}

impl MockLlmService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a structured JSON reply.
    pub fn push_structured(&self, value: Value) {
        self.structured.lock().unwrap().push(Ok(value));
    }

    /// Queues a structured-call failure.
    pub fn push_structured_error(&self, error: LlmError) {
        self.structured.lock().unwrap().push(Err(error));
    }

    /// Queues a free-text reply.
    pub fn push_text(&self, text: &str) {
        self.texts.lock().unwrap().push(Ok(text.to_string()));
    }

    /// Total completions served (structured + text).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// All `(system, user)` prompt pairs received, in call order.
    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }

    fn record(&self, system: &str, user: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));
    }
}

#[async_trait::async_trait]
impl LlmService for MockLlmService {
    async fn complete_structured(
        &self,
        system: &str,
        user: &str,
        _schema: &ResponseSchema,
    ) -> LlmResult<Value> {
        self.record(system, user);

        let mut queue = self.structured.lock().unwrap();
        if queue.is_empty() {
            return Err(LlmError::MalformedResponse {
                reason: "mock structured queue exhausted".to_string(),
            });
        }
        queue.remove(0)
    }

    async fn complete_text(&self, system: &str, user: &str) -> LlmResult<String> {
        self.record(system, user);

        let mut queue = self.texts.lock().unwrap();
        if queue.is_empty() {
            return Err(LlmError::MalformedResponse {
                reason: "mock text queue exhausted".to_string(),
            });
        }
        queue.remove(0)
    }
}
