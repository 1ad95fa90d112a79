//! Chat adapter for the configured API clients: the hosted provider or a
//! self-hosted OpenAI-compatible server, selected per request.

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::error::{ErrorKind, RequestError};
use crate::core::http::HttpClient;
use crate::core::messages::{build_multi, resolve_image};
use crate::core::traits::{EventLog, ImageCodec, ProviderConfig, RequestAdapter};
use crate::core::types::{Completion, CompletionRequest, RequestMode, Severity};
use crate::core::util::{build_headers, clean_response_text};

use super::{ChatRequestBody, ChatResponseBody, GENERIC_FAILURE, report_completion_info};

const MISSING_KEY: &str = "Invalid or missing API key. Keys must be stored in an environment \
                           variable (see: ReadMe). Request aborted";
const MISSING_SERVER: &str = "Unable to process request, make sure local server is running";

/// Substituted when the caller supplies neither prompt, image, nor
/// instruction; gives the pipeline something visibly wrong to render.
const EMPTY_REQUEST_PROMPT: &str = "Photograph of an stained empty box with 'NOTHING' printed \
     on its side in bold letters, small flying moths, dingy, gloomy, dim light rundown warehouse";

pub struct ApiChatAdapter {
    config: Arc<dyn ProviderConfig>,
    codec: Arc<dyn ImageCodec>,
    log: Arc<dyn EventLog>,
    http: HttpClient,
}

impl ApiChatAdapter {
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

    /// Picks the endpoint and credential for the requested mode, or explains
    /// why the request cannot proceed.
    fn select_client(&self, mode: RequestMode) -> Result<(String, String), &'static str> {
        if mode == RequestMode::OpenSource {
            match self.config.self_hosted_url() {
                Some(url) => {
                    self.log.log_event(
                        "Setting client to the open-source LLM server",
                        Severity::Info,
                        true,
                    );
                    Ok((url, self.config.self_hosted_key().unwrap_or_default()))
                }
                None => Err(MISSING_SERVER),
            }
        } else {
            match self.config.hosted_key() {
                Some(key) if !key.is_empty() => {
                    self.log.log_event(
                        "Setting client to the hosted chat API",
                        Severity::Info,
                        true,
                    );
                    Ok((self.config.hosted_base_url(), key))
                }
                _ => Err(MISSING_KEY),
            }
        }
    }

    /// The hosted provider needs a vision-capable model once an image is
    /// attached; substitute one from the live model listing. Self-hosted
    /// users pick their own model and are left alone.
    fn upgrade_for_vision(&self, model: &str) -> String {
        let models = self.config.chat_models(true, "gpt-4");
        let upgraded = if models.iter().any(|m| m == "gpt-4-turbo-2024-04-09") {
            "gpt-4-turbo"
        } else {
            "gpt-4-vision-preview"
        };
        if upgraded != model {
            self.log.log_event(
                &format!("Image attached: substituting vision model {upgraded} for {model}"),
                Severity::Info,
                true,
            );
        }
        upgraded.to_string()
    }

    fn log_failure(&self, error: &RequestError, mode: RequestMode, url: &str) {
        match error.kind() {
            ErrorKind::Transport => {
                self.log.log_event(
                    &format!("Server connection error: {error}"),
                    Severity::Error,
                    true,
                );
                if mode == RequestMode::OpenSource {
                    self.log.log_event(
                        &format!(
                            "Local server is not responding to the URL: {url}. Make sure your \
                             LLM front-end app is running and its local server is live."
                        ),
                        Severity::Warning,
                        true,
                    );
                }
            }
            ErrorKind::RateLimited => self.log.log_event(
                &format!("Server RATE LIMIT error: {error}"),
                Severity::Error,
                true,
            ),
            ErrorKind::Status => self.log.log_event(
                &format!("Server STATUS error: {error}. File may be too large."),
                Severity::Error,
                true,
            ),
            _ => self.log.log_event(
                &format!("An unexpected server error occurred: {error}"),
                Severity::Error,
                true,
            ),
        }
    }
}

#[async_trait]
impl RequestAdapter for ApiChatAdapter {
    async fn execute(&self, request: CompletionRequest) -> Completion {
        let mode = request.request_type;

        let (base_url, key) = match self.select_client(mode) {
            Ok(pair) => pair,
            Err(placeholder) => {
                self.log.log_event(placeholder, Severity::Warning, true);
                return Completion::Text(placeholder.to_string());
            }
        };

        let image_b64 = resolve_image(request.image, &self.codec, &self.log);

        let mut model = request.model.clone();
        if image_b64.is_some() && mode == RequestMode::Hosted {
            model = self.upgrade_for_vision(&model);
        }

        let mut prompt = request.prompt.clone();
        let file = request.file.trim();
        if !file.is_empty() {
            prompt = format!("{prompt}\n{file}");
        }

        if prompt.is_empty() && image_b64.is_none() && request.instruction.is_empty() {
            self.log.log_event(
                "No instruction and no prompt were provided, the node was only able to \
                 provide a 'Box of Nothing'",
                Severity::Warning,
                true,
            );
            return Completion::Text(EMPTY_REQUEST_PROMPT.to_string());
        }

        let messages = build_multi(
            &prompt,
            &request.instruction,
            &request.example_list,
            image_b64.as_deref(),
        );

        let body = ChatRequestBody {
            model,
            messages,
            temperature: request.creative_latitude,
            max_tokens: request.tokens,
            user_bio: None,
            user_name: None,
        };

        let url = format!("{}/chat/completions", base_url.trim_end_matches('/'));
        let headers = build_headers(&key);

        let response: ChatResponseBody = match self.http.post_json(&url, &headers, &body).await {
            Ok(response) => response,
            Err(e) => {
                self.log_failure(&e, mode, &url);
                return Completion::Text(GENERIC_FAILURE.to_string());
            }
        };

        if response.error.is_some() {
            self.log.log_event(
                "Server was unable to process this request.",
                Severity::Error,
                true,
            );
            return Completion::Text(GENERIC_FAILURE.to_string());
        }

        report_completion_info(&self.log, &response);

        match response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
        {
            Some(content) => Completion::Text(clean_response_text(content)),
            None => {
                self.log.log_event(
                    "Response contained no message content.",
                    Severity::Error,
                    true,
                );
                Completion::Text(GENERIC_FAILURE.to_string())
            }
        }
    }
}
