//! Scripted transport for protocol tests.

use async_trait::async_trait;
use kieai_core::{SdkError, Transport};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays scripted `data` payloads in order and records every request.
///
/// When the script runs dry, the optional `repeat` payload answers every
/// further request; without one, an unexpected request panics the test.
pub struct MockTransport {
    script: Mutex<VecDeque<Result<Value, SdkError>>>,
    repeat: Option<Value>,
    requests: Mutex<Vec<Value>>,
}

impl MockTransport {
    pub fn new(script: Vec<Result<Value, SdkError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            repeat: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn repeating(payload: Value) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            repeat: Some(payload),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    fn next(&self) -> Result<Value, SdkError> {
        if let Some(scripted) = self.script.lock().unwrap().pop_front() {
            return scripted;
        }
        match &self.repeat {
            Some(payload) => Ok(payload.clone()),
            None => panic!("unexpected request: script exhausted"),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, SdkError> {
        let query: Vec<Value> = query.iter().map(|(key, value)| json!([key, value])).collect();
        self.requests
            .lock()
            .unwrap()
            .push(json!({ "method": "GET", "path": path, "query": query }));
        self.next()
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, SdkError> {
        self.requests
            .lock()
            .unwrap()
            .push(json!({ "method": "POST", "path": path, "body": body }));
        self.next()
    }
}
