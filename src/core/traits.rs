use async_trait::async_trait;

use super::error::RequestError;
use super::image::{ImageMeta, ImageTensor};
use super::types::{Completion, CompletionRequest, Severity};

/// The one capability every backend adapter implements.
///
/// Adapters are fail-soft: `execute` never surfaces an error. Every failure
/// path inside an adapter ends in a placeholder [`Completion`] plus a log
/// entry, so the host pipeline always receives a usable value.
#[async_trait]
pub trait RequestAdapter: Send + Sync {
    async fn execute(&self, request: CompletionRequest) -> Completion;
}

/// Credential and endpoint lookup, owned by the host.
///
/// Injected into adapters at construction so nothing in this crate reaches
/// for process-global configuration.
pub trait ProviderConfig: Send + Sync {
    /// API key for the hosted provider, if configured.
    fn hosted_key(&self) -> Option<String>;

    /// Base URL of the hosted provider's API.
    fn hosted_base_url(&self) -> String {
        "https://api.openai.com/v1".to_string()
    }

    /// API key for the self-hosted server, if it requires one.
    fn self_hosted_key(&self) -> Option<String>;

    /// Base URL of the self-hosted server, if one is running.
    fn self_hosted_url(&self) -> Option<String>;

    /// Chat models available on the hosted provider. `filter` restricts the
    /// listing to chat-capable models; `fallback` seeds the result when the
    /// listing is unavailable.
    fn chat_models(&self, filter: bool, fallback: &str) -> Vec<String>;
}

/// Conversion between the pipeline's tensor images and base64 PNG payloads.
/// The codec itself lives with the host pipeline.
pub trait ImageCodec: Send + Sync {
    fn tensor_to_base64(&self, image: &ImageTensor) -> Result<String, RequestError>;
    fn b64_to_tensor(&self, b64: &str) -> Result<(ImageTensor, ImageMeta), RequestError>;
}

/// Sink for operator-facing events. Fire-and-forget; implementations must
/// never influence control flow.
pub trait EventLog: Send + Sync {
    /// `trouble` marks events that should surface in the host's trouble
    /// report in addition to the ordinary log stream.
    fn log_event(&self, message: &str, severity: Severity, trouble: bool);
}

/// Production [`EventLog`] backed by `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl EventLog for TracingLog {
    fn log_event(&self, message: &str, severity: Severity, trouble: bool) {
        match severity {
            Severity::Info => tracing::info!(trouble, "{message}"),
            Severity::Warning => tracing::warn!(trouble, "{message}"),
            Severity::Error => tracing::error!(trouble, "{message}"),
        }
    }
}
