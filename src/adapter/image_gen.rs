//! Image-generation adapter for the hosted API.
//!
//! The backend cannot batch this use case server-side, so a batch is a
//! sequential loop of single-image calls with partial-failure semantics: one
//! bad item never aborts the batch, and only an all-failed batch degrades to
//! the zero placeholder.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::{ErrorKind, RequestError};
use crate::core::http::HttpClient;
use crate::core::image::ImageTensor;
use crate::core::traits::{EventLog, ImageCodec, ProviderConfig, RequestAdapter};
use crate::core::types::{Completion, CompletionRequest, Severity};
use crate::core::util::build_headers;

/// Caption substituted when no image in the batch could be produced.
const PLACEHOLDER_CAPTION: &str = "Image and mask could not be created";

/// Pause after a 429 before the next item, to respect backend throttling.
const RATE_LIMIT_PAUSE: Duration = Duration::from_millis(500);

#[derive(Debug, Serialize)]
struct ImageGenRequestBody {
    model: String,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<String>,
    n: u32,
    response_format: &'static str,
}

#[derive(Debug, Deserialize)]
struct ImageGenResponseBody {
    #[serde(default)]
    data: Vec<GeneratedImage>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    #[serde(default)]
    b64_json: Option<String>,
    #[serde(default)]
    revised_prompt: Option<String>,
}

pub struct ImageGenAdapter {
    config: Arc<dyn ProviderConfig>,
    codec: Arc<dyn ImageCodec>,
    log: Arc<dyn EventLog>,
    http: HttpClient,
}

impl ImageGenAdapter {
    pub fn new(
        config: Arc<dyn ProviderConfig>,
        codec: Arc<dyn ImageCodec>,
        log: Arc<dyn EventLog>,
    ) -> Result<Self, RequestError> {
        Ok(Self {
            config,
            codec,
            log,
            http: HttpClient::new()?,
        })
    }

    fn placeholder() -> Completion {
        Completion::Images {
            batch: ImageTensor::zeros(1024, 1024),
            caption: PLACEHOLDER_CAPTION.to_string(),
        }
    }

    /// One generation call; returns the decoded frame and any revised prompt
    /// the backend reported.
    async fn generate_one(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &ImageGenRequestBody,
    ) -> Result<(Option<ImageTensor>, Option<String>), RequestError> {
        let response: ImageGenResponseBody = self.http.post_json(url, headers, body).await?;

        if let Some(error) = response.error {
            return Err(RequestError::Protocol(format!(
                "backend reported an error: {error}"
            )));
        }

        let Some(item) = response.data.into_iter().next() else {
            return Err(RequestError::Protocol("response carried no image data".into()));
        };

        let frame = match item.b64_json {
            Some(b64) => {
                let (tensor, _meta) = self.codec.b64_to_tensor(&b64)?;
                Some(tensor)
            }
            None => None,
        };

        Ok((frame, item.revised_prompt))
    }
}

#[async_trait]
impl RequestAdapter for ImageGenAdapter {
    async fn execute(&self, request: CompletionRequest) -> Completion {
        let Some(key) = self.config.hosted_key().filter(|k| !k.is_empty()) else {
            self.log.log_event(
                "Hosted API key is missing or invalid. Key must be stored in an environment \
                 variable (see ReadMe). This node is not functional.",
                Severity::Warning,
                true,
            );
            return Self::placeholder();
        };

        let url = format!(
            "{}/images/generations",
            self.config.hosted_base_url().trim_end_matches('/')
        );
        let headers = build_headers(&key);

        self.log.log_event(
            &format!("Talking to image model: {}", request.model),
            Severity::Info,
            true,
        );

        let body = ImageGenRequestBody {
            model: request.model.clone(),
            prompt: request.prompt.clone(),
            size: request.image_size.clone(),
            quality: request.image_quality.clone(),
            style: request.style.clone(),
            n: 1,
            response_format: "b64_json",
        };

        let batch_size = request.batch_size;
        let mut frames = Vec::new();
        let mut caption: Option<String> = None;

        for _ in 0..batch_size {
            match self.generate_one(&url, &headers, &body).await {
                Ok((frame, revised_prompt)) => {
                    match frame {
                        Some(frame) => frames.push(frame),
                        None => self.log.log_event(
                            &format!(
                                "Backend could not process an image in your batch of: {batch_size}"
                            ),
                            Severity::Warning,
                            true,
                        ),
                    }
                    if caption.is_none() {
                        caption = revised_prompt;
                    }
                }
                Err(e) if e.kind() == ErrorKind::RateLimited => {
                    self.log.log_event(
                        &format!("RATE LIMIT error in an image in your batch of {batch_size}: {e}"),
                        Severity::Error,
                        true,
                    );
                    tokio::time::sleep(RATE_LIMIT_PAUSE).await;
                }
                Err(e) => {
                    self.log.log_event(
                        &format!("Error in an image in your batch of {batch_size}: {e}"),
                        Severity::Error,
                        true,
                    );
                }
            }
        }

        match ImageTensor::concat(&frames) {
            Some(batch) => {
                self.log.log_event(
                    &format!(
                        "{} images were processed successfully in your batch of: {batch_size}",
                        batch.batch
                    ),
                    Severity::Info,
                    true,
                );
                Completion::Images {
                    batch,
                    caption: caption.unwrap_or_else(|| PLACEHOLDER_CAPTION.to_string()),
                }
            }
            None => {
                self.log.log_event(
                    &format!("No images were processed in your batch of: {batch_size}"),
                    Severity::Warning,
                    true,
                );
                Self::placeholder()
            }
        }
    }
}
