//! Runtime backend selection.
//!
//! A [`Dispatcher`] owns at most one active adapter and forwards calls to it
//! verbatim, so call sites can swap backends without changing shape. One
//! dispatcher per logical call site; the adapter slot is not meant to be
//! reassigned while an execution is in flight.

use std::sync::Arc;

use crate::core::traits::{EventLog, RequestAdapter};
use crate::core::types::{Completion, CompletionRequest, Severity};

pub struct Dispatcher {
    adapter: Option<Box<dyn RequestAdapter>>,
    log: Arc<dyn EventLog>,
}

impl Dispatcher {
    pub fn new(log: Arc<dyn EventLog>) -> Self {
        Self { adapter: None, log }
    }

    /// Installs the active adapter, replacing any previous one.
    pub fn set_adapter(&mut self, adapter: Box<dyn RequestAdapter>) {
        self.adapter = Some(adapter);
    }

    /// Forwards the request to the active adapter unchanged. With no adapter
    /// set this logs an error and yields no result; it never panics.
    pub async fn execute(&self, request: CompletionRequest) -> Option<Completion> {
        match &self.adapter {
            Some(adapter) => Some(adapter.execute(request).await),
            None => {
                self.log.log_event(
                    "No request strategy object was set",
                    Severity::Error,
                    true,
                );
                None
            }
        }
    }
}
