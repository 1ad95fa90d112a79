use serde_json::Value;

use super::image::ImageTensor;
use super::messages::Message;

/// Which backend family a request should be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// The hosted chat API.
    Hosted,
    /// A self-hosted OpenAI-compatible server.
    OpenSource,
    /// A local web front-end exposing an HTTP completion endpoint.
    LocalFrontend,
    /// The hosted image-generation API.
    ImageGen,
    /// Reserved for future support.
    Anthropic,
}

impl std::fmt::Display for RequestMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestMode::Hosted => write!(f, "hosted"),
            RequestMode::OpenSource => write!(f, "open-source"),
            RequestMode::LocalFrontend => write!(f, "local-frontend"),
            RequestMode::ImageGen => write!(f, "image-gen"),
            RequestMode::Anthropic => write!(f, "anthropic"),
        }
    }
}

/// An image handed in by the host pipeline. The pipeline is dynamically
/// typed, so alongside the two usable shapes we keep an `Opaque` arm for
/// anything else it passes; adapters drop those with a warning instead of
/// failing the request.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Tensor(ImageTensor),
    Base64(String),
    Opaque(Value),
}

/// Everything the host pipeline supplies for one completion call.
///
/// Constructed per call and discarded with it; defaults mirror what the
/// pipeline sends when a control is left untouched.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    /// Sampling temperature.
    pub creative_latitude: f32,
    /// Max output tokens.
    pub tokens: u32,
    pub prompt: String,
    pub instruction: String,
    /// Optional extra text (typically a file's contents) appended to the prompt.
    pub file: String,
    pub image: Option<ImageSource>,
    /// Few-shot entries inserted verbatim between the user and system messages.
    pub example_list: Vec<Message>,
    pub request_type: RequestMode,
    /// Target endpoint for the HTTP adapters.
    pub url: Option<String>,
    pub image_size: Option<String>,
    pub image_quality: Option<String>,
    pub style: Option<String>,
    pub batch_size: u32,
}

impl Default for CompletionRequest {
    fn default() -> Self {
        Self {
            model: String::new(),
            creative_latitude: 0.7,
            tokens: 500,
            prompt: String::new(),
            instruction: String::new(),
            file: String::new(),
            image: None,
            example_list: Vec::new(),
            request_type: RequestMode::Hosted,
            url: None,
            image_size: None,
            image_quality: None,
            style: None,
            batch_size: 1,
        }
    }
}

/// The single result shape every adapter produces.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Text(String),
    Images { batch: ImageTensor, caption: String },
}

impl Completion {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Completion::Text(text) => Some(text),
            Completion::Images { .. } => None,
        }
    }
}

/// How an operator should perceive a logged event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}
