//! Test double for the [`crate::api::Transport`] capability: canned JSON
//! responses keyed by exact URL. Compiled only for tests.

use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;

use crate::api::Transport;
use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub(crate) struct StubTransport {
    responses: HashMap<String, Value>,
}

impl StubTransport {
    pub(crate) fn new() -> Self {
        StubTransport::default()
    }

    pub(crate) fn with(mut self, url: impl Into<String>, body: Value) -> Self {
        self.responses.insert(url.into(), body);
        self
    }
}

impl Transport for StubTransport {
    fn get_json(&self, url: &str) -> impl Future<Output = Result<Value>> + Send {
        let result = self
            .responses
            .get(url)
            .cloned()
            .ok_or_else(|| Error::DataShape(format!("no stubbed response for {url}")));
        async move { result }
    }
}
