#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use feedback_triage::{ModelCall, ModelError};

/// Replays scripted responses, one per call; repeats the last once exhausted.
pub struct ScriptedModel {
    responses: Mutex<VecDeque<Result<String, ()>>>,
    last: Mutex<Option<Result<String, ()>>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn replying(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn failing() -> Self {
        Self::new(vec![Err(())])
    }

    pub fn new(responses: Vec<Result<String, ()>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelCall for ScriptedModel {
    async fn complete(&self, prompt: &str, _max_tokens: u32) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        let next = self.responses.lock().unwrap().pop_front();
        let response = match next {
            Some(response) => {
                *self.last.lock().unwrap() = Some(response.clone());
                response
            }
            None => self.last.lock().unwrap().clone().unwrap_or(Err(())),
        };
        response.map_err(|_| ModelError::EmptyResponse)
    }
}
