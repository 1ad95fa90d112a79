//! Construction of the role-tagged message sequences the chat endpoints
//! expect, in the three shapes the backends diverge on.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::traits::{EventLog, ImageCodec};
use super::types::{ImageSource, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    System,
}

/// One role-tagged unit of conversational context, serialized exactly as the
/// chat-completions wire format expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(content.into()),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: MessageContent::Text(content.into()),
        }
    }
}

/// Scalar string for backends whose `content` field must be a string,
/// ordered part list for the multi-modal form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// Validates an incoming image and reduces it to the base64 string the wire
/// formats carry. A payload that is neither a tensor nor a string, or one the
/// codec cannot encode, is dropped with a warning so the request proceeds
/// without it.
pub fn resolve_image(
    image: Option<ImageSource>,
    codec: &Arc<dyn ImageCodec>,
    log: &Arc<dyn EventLog>,
) -> Option<String> {
    match image? {
        ImageSource::Base64(b64) => Some(b64),
        ImageSource::Tensor(tensor) => match codec.tensor_to_base64(&tensor) {
            Ok(b64) => Some(b64),
            Err(e) => {
                log.log_event(
                    &format!("Image could not be encoded and will be disregarded: {e}"),
                    Severity::Warning,
                    true,
                );
                None
            }
        },
        ImageSource::Opaque(_) => {
            log.log_event(
                "Image file is invalid. Image will be disregarded in the generated output.",
                Severity::Warning,
                true,
            );
            None
        }
    }
}

/// Builds the multi-modal sequence: one user message whose content is a part
/// list (image part first, then the prompt), the examples verbatim, then the
/// instruction as a trailing system message.
///
/// With no prompt and no image the user message carries an empty part list;
/// detecting that empty-request condition is the caller's job.
pub fn build_multi(
    prompt: &str,
    instruction: &str,
    examples: &[Message],
    image_b64: Option<&str>,
) -> Vec<Message> {
    let mut user_content = Vec::new();

    if let Some(b64) = image_b64 {
        user_content.push(ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: format!("data:image/jpeg;base64,{b64}"),
            },
        });
    }

    if !prompt.is_empty() {
        user_content.push(ContentPart::Text {
            text: format!("PROMPT: {prompt}"),
        });
    }

    let mut messages = vec![Message {
        role: Role::User,
        content: MessageContent::Parts(user_content),
    }];

    messages.extend_from_slice(examples);

    if !instruction.is_empty() {
        messages.push(Message::system(instruction));
    }

    messages
}

/// Same ordering as [`build_multi`] but every entry carries a plain string,
/// for backends whose `content` field must be scalar.
pub fn build_basic(prompt: &str, examples: &[Message], instruction: &str) -> Vec<Message> {
    let mut messages = Vec::new();

    if !prompt.is_empty() {
        messages.push(Message::user(prompt));
    }

    messages.extend_from_slice(examples);

    if !instruction.is_empty() {
        messages.push(Message::system(instruction));
    }

    messages
}

/// Folds the instruction into the user text for the server whose system role
/// is broken. Never emits a system message.
pub fn build_single_block(prompt: &str, examples: &[Message], instruction: &str) -> Vec<Message> {
    let mut messages = vec![Message::user(format!(
        "INSTRUCTION: {instruction} \nPROMPT: {prompt}"
    ))];

    messages.extend_from_slice(examples);

    messages
}
