//! One adapter per backend family, all behind [`RequestAdapter`].
//!
//! Every adapter translates between the crate's request/result types and one
//! backend's wire format, and converts every failure into a placeholder
//! result plus a log entry. Nothing in here propagates an error to the host.

pub(crate) mod api_chat;
pub(crate) mod image_gen;
pub(crate) mod local_chat;
pub(crate) mod web_chat;

pub use api_chat::ApiChatAdapter;
pub use image_gen::ImageGenAdapter;
pub use local_chat::LocalChatAdapter;
pub use web_chat::WebChatAdapter;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::messages::Message;
use crate::core::traits::{EventLog, RequestAdapter};
use crate::core::types::{Completion, CompletionRequest, Severity};

/// User-facing text substituted whenever a chat backend fails.
pub(crate) const GENERIC_FAILURE: &str = "Server was unable to process the request";

/// Request body shared by every chat-completions-style endpoint. The two
/// trailing fields exist only for the local front-end server, whose API
/// rejects requests without them; everyone else never sees them.
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequestBody {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

/// Loose parse of a chat-completions response. Everything is optional so a
/// malformed body surfaces as a protocol failure rather than a parse panic,
/// and an `error` member is carried through for the fail-soft check.
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponseBody {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub usage: Option<Value>,
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Best-effort reporting of the model and token usage a backend claims to
/// have used. Purely informational; a response without them only produces an
/// info-severity note.
pub(crate) fn report_completion_info(log: &Arc<dyn EventLog>, body: &ChatResponseBody) {
    match (&body.model, &body.usage) {
        (None, None) => log.log_event(
            "Unable to report some completion information: model, usage.",
            Severity::Info,
            true,
        ),
        (model, usage) => {
            if let Some(model) = model {
                log.log_event(&format!("Using LLM: {model}"), Severity::Info, true);
            }
            if let Some(usage) = usage {
                log.log_event(&format!("Tokens Used: {usage}"), Severity::Info, true);
            }
        }
    }
}

/// Backend reserved for future support; completes with empty text.
pub struct AnthropicAdapter;

#[async_trait]
impl RequestAdapter for AnthropicAdapter {
    async fn execute(&self, _request: CompletionRequest) -> Completion {
        Completion::Text(String::new())
    }
}
