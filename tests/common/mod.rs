//! Shared fakes for the adapter integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use promptrelay::{
    EventLog, ImageCodec, ImageMeta, ImageSource, ImageTensor, ProviderConfig, RequestError,
    Severity,
};

static TRACING: Once = Once::new();

/// Routes the crate's `tracing` output through a subscriber so test runs
/// show transport diagnostics when `RUST_LOG` asks for them.
pub fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Captures log events so tests can assert on severity and wording.
#[derive(Default)]
pub struct MemoryLog {
    events: Mutex<Vec<(Severity, String)>>,
}

impl MemoryLog {
    pub fn new() -> Arc<Self> {
        init_tracing();
        Arc::new(Self::default())
    }

    pub fn has(&self, severity: Severity, needle: &str) -> bool {
        self.events
            .lock()
            .unwrap()
            .iter()
            .any(|(s, message)| *s == severity && message.contains(needle))
    }
}

impl EventLog for MemoryLog {
    fn log_event(&self, message: &str, severity: Severity, _trouble: bool) {
        self.events
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }
}

/// Codec standing in for the host pipeline's PNG converter.
pub struct FakeCodec;

impl ImageCodec for FakeCodec {
    fn tensor_to_base64(&self, _image: &ImageTensor) -> Result<String, RequestError> {
        Ok("dGVuc29y".to_string())
    }

    fn b64_to_tensor(&self, _b64: &str) -> Result<(ImageTensor, ImageMeta), RequestError> {
        let tensor = ImageTensor::new(1, 4, 4, 3, vec![0.5; 48]).expect("well-formed test frame");
        Ok((tensor, ImageMeta {
            width: 4,
            height: 4,
        }))
    }
}

/// Codec whose encoder always fails, for the drop-with-warning path.
pub struct BrokenCodec;

impl ImageCodec for BrokenCodec {
    fn tensor_to_base64(&self, _image: &ImageTensor) -> Result<String, RequestError> {
        Err(RequestError::Unknown("encoder exploded".to_string()))
    }

    fn b64_to_tensor(&self, _b64: &str) -> Result<(ImageTensor, ImageMeta), RequestError> {
        Err(RequestError::Unknown("decoder exploded".to_string()))
    }
}

/// Configurable stand-in for the host's credential/endpoint provider.
pub struct TestConfig {
    pub hosted_key: Option<String>,
    pub self_hosted_key: Option<String>,
    pub self_hosted_url: Option<String>,
    pub base_url: String,
    pub models: Vec<String>,
}

impl TestConfig {
    pub fn hosted(base_url: &str) -> Self {
        Self {
            hosted_key: Some("sk-test".to_string()),
            self_hosted_key: None,
            self_hosted_url: None,
            base_url: base_url.to_string(),
            models: vec!["gpt-4".to_string()],
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            hosted_key: None,
            self_hosted_key: None,
            self_hosted_url: None,
            base_url: "http://127.0.0.1:1".to_string(),
            models: Vec::new(),
        }
    }
}

impl ProviderConfig for TestConfig {
    fn hosted_key(&self) -> Option<String> {
        self.hosted_key.clone()
    }

    fn hosted_base_url(&self) -> String {
        self.base_url.clone()
    }

    fn self_hosted_key(&self) -> Option<String> {
        self.self_hosted_key.clone()
    }

    fn self_hosted_url(&self) -> Option<String> {
        self.self_hosted_url.clone()
    }

    fn chat_models(&self, _filter: bool, fallback: &str) -> Vec<String> {
        if self.models.is_empty() {
            vec![fallback.to_string()]
        } else {
            self.models.clone()
        }
    }
}

pub fn opaque_image() -> ImageSource {
    ImageSource::Opaque(serde_json::json!({"not": "an image"}))
}
