//! # promptrelay
//!
//! Dispatches text and image completion requests to one of several
//! interchangeable LLM backends (a hosted API, a self-hosted server, a local
//! web front-end, an image-generation API) and normalizes their divergent
//! wire formats into one result shape.
//!
//! The host pipeline picks a backend at runtime by installing an adapter into
//! a [`Dispatcher`]; the adapter builds the backend's payload, performs the
//! call, and returns either cleaned text or an image batch. Adapters are
//! fail-soft: every transport, authentication, or malformed-response problem
//! becomes a placeholder result plus a log entry, never a propagated error.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use promptrelay::{
//!     ApiChatAdapter, CompletionRequest, Dispatcher, RequestMode, TracingLog,
//! };
//! # use promptrelay::{ImageCodec, ImageMeta, ImageTensor, ProviderConfig, RequestError};
//! # struct HostConfig;
//! # impl ProviderConfig for HostConfig {
//! #     fn hosted_key(&self) -> Option<String> { std::env::var("OPENAI_API_KEY").ok() }
//! #     fn self_hosted_key(&self) -> Option<String> { None }
//! #     fn self_hosted_url(&self) -> Option<String> { None }
//! #     fn chat_models(&self, _: bool, fallback: &str) -> Vec<String> { vec![fallback.into()] }
//! # }
//! # struct HostCodec;
//! # impl ImageCodec for HostCodec {
//! #     fn tensor_to_base64(&self, _: &ImageTensor) -> Result<String, RequestError> { todo!() }
//! #     fn b64_to_tensor(&self, _: &str) -> Result<(ImageTensor, ImageMeta), RequestError> { todo!() }
//! # }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let log = Arc::new(TracingLog);
//! let adapter = ApiChatAdapter::new(Arc::new(HostConfig), Arc::new(HostCodec), log.clone())?;
//!
//! let mut dispatcher = Dispatcher::new(log);
//! dispatcher.set_adapter(Box::new(adapter));
//!
//! let result = dispatcher
//!     .execute(CompletionRequest {
//!         model: "gpt-4o-mini".to_string(),
//!         prompt: "Describe a rainy street at dusk.".to_string(),
//!         request_type: RequestMode::Hosted,
//!         ..Default::default()
//!     })
//!     .await;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod core;
pub mod dispatch;

pub use adapter::{
    AnthropicAdapter, ApiChatAdapter, ImageGenAdapter, LocalChatAdapter, WebChatAdapter,
};
pub use core::{
    Completion, CompletionRequest, ContentPart, ErrorKind, EventLog, ImageCodec, ImageMeta,
    ImageSource, ImageTensor, Message, MessageContent, ProviderConfig, RequestAdapter,
    RequestError, RequestMode, Role, Severity, TracingLog,
};
pub use dispatch::Dispatcher;
