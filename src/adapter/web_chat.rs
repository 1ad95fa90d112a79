//! Raw-HTTP chat adapter: posts a chat-completions body straight to the
//! caller-supplied endpoint.

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::error::{ErrorKind, RequestError};
use crate::core::http::HttpClient;
use crate::core::messages::{build_multi, resolve_image};
use crate::core::traits::{EventLog, ImageCodec, ProviderConfig, RequestAdapter};
use crate::core::types::{Completion, CompletionRequest, RequestMode, Severity};
use crate::core::util::{build_headers, clean_response_text};

use super::{ChatRequestBody, ChatResponseBody, GENERIC_FAILURE, report_completion_info};

pub struct WebChatAdapter {
    config: Arc<dyn ProviderConfig>,
    codec: Arc<dyn ImageCodec>,
    log: Arc<dyn EventLog>,
    http: HttpClient,
}

impl WebChatAdapter {
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
}

/// Credential selection shared with the local-frontend adapter: the hosted
/// key only when the request is tagged for the hosted provider.
pub(crate) fn select_key(config: &Arc<dyn ProviderConfig>, mode: RequestMode) -> String {
    if mode == RequestMode::Hosted {
        config.hosted_key().unwrap_or_default()
    } else {
        config.self_hosted_key().unwrap_or_default()
    }
}

pub(crate) fn log_post_failure(log: &Arc<dyn EventLog>, error: &RequestError) {
    match error.kind() {
        ErrorKind::Status | ErrorKind::RateLimited => log.log_event(
            &format!("Server was unable to process the request. {error}"),
            Severity::Error,
            true,
        ),
        _ => log.log_event(
            &format!("Unable to send data to server. Error: {error}"),
            Severity::Error,
            true,
        ),
    }
}

/// The shared tail of both raw-HTTP adapters: reject bodies carrying an
/// `error` member, extract and clean the first choice, report model/usage.
pub(crate) fn finish_chat_response(
    log: &Arc<dyn EventLog>,
    response: ChatResponseBody,
) -> Completion {
    if let Some(error) = &response.error {
        log.log_event(
            &format!("Server was unable to process the response. Error: {error}"),
            Severity::Error,
            true,
        );
        return Completion::Text(GENERIC_FAILURE.to_string());
    }

    match response
        .choices
        .first()
        .and_then(|choice| choice.message.content.as_deref())
    {
        Some(content) => {
            let cleaned = clean_response_text(content);
            report_completion_info(log, &response);
            Completion::Text(cleaned)
        }
        None => {
            log.log_event(
                "Response contained no message content.",
                Severity::Error,
                true,
            );
            Completion::Text(GENERIC_FAILURE.to_string())
        }
    }
}

#[async_trait]
impl RequestAdapter for WebChatAdapter {
    async fn execute(&self, request: CompletionRequest) -> Completion {
        let Some(url) = request.url.clone() else {
            self.log.log_event(
                "No endpoint URL was provided for the HTTP request.",
                Severity::Error,
                true,
            );
            return Completion::Text(GENERIC_FAILURE.to_string());
        };

        let image_b64 = resolve_image(request.image, &self.codec, &self.log);

        let key = select_key(&self.config, request.request_type);
        let headers = build_headers(&key);

        let messages = build_multi(
            &request.prompt,
            &request.instruction,
            &request.example_list,
            image_b64.as_deref(),
        );

        let body = ChatRequestBody {
            model: request.model,
            messages,
            temperature: request.creative_latitude,
            max_tokens: request.tokens,
            user_bio: None,
            user_name: None,
        };

        match self.http.post_json(&url, &headers, &body).await {
            Ok(response) => finish_chat_response(&self.log, response),
            Err(e) => {
                log_post_failure(&self.log, &e);
                Completion::Text(GENERIC_FAILURE.to_string())
            }
        }
    }
}
