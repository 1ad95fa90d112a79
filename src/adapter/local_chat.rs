//! Raw-HTTP chat adapter for local web front-ends.
//!
//! Differs from [`WebChatAdapter`](super::WebChatAdapter) in three ways the
//! front-end servers force on us: the endpoint path is corrected before use,
//! images are refused outright, and the no-system-role server gets its
//! instruction folded into the user text plus two empty placeholder fields.

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::error::RequestError;
use crate::core::http::HttpClient;
use crate::core::messages::{build_basic, build_single_block};
use crate::core::traits::{EventLog, ImageCodec, ProviderConfig, RequestAdapter};
use crate::core::types::{Completion, CompletionRequest, RequestMode, Severity};
use crate::core::util::{CHAT_COMPLETIONS_PATH, build_headers, normalize_url};

use super::web_chat::{finish_chat_response, log_post_failure, select_key};
use super::{ChatRequestBody, GENERIC_FAILURE};

pub struct LocalChatAdapter {
    config: Arc<dyn ProviderConfig>,
    log: Arc<dyn EventLog>,
    http: HttpClient,
}

impl LocalChatAdapter {
    /// The codec parameter keeps the constructor signature uniform across
    /// adapters; this backend never transmits images.
    pub fn new(
        config: Arc<dyn ProviderConfig>,
        _codec: Arc<dyn ImageCodec>,
        log: Arc<dyn EventLog>,
    ) -> Result<Self, RequestError> {
        Ok(Self {
            config,
            log,
            http: HttpClient::new()?,
        })
    }
}

#[async_trait]
impl RequestAdapter for LocalChatAdapter {
    async fn execute(&self, request: CompletionRequest) -> Completion {
        let Some(raw_url) = request.url.clone() else {
            self.log.log_event(
                "No endpoint URL was provided for the HTTP request.",
                Severity::Error,
                true,
            );
            return Completion::Text(GENERIC_FAILURE.to_string());
        };

        let url = match normalize_url(&raw_url, CHAT_COMPLETIONS_PATH, &self.log) {
            Ok(url) => url,
            Err(e) => {
                self.log
                    .log_event(&format!("{e}"), Severity::Error, true);
                return Completion::Text(GENERIC_FAILURE.to_string());
            }
        };

        // None of the supported front-ends accept images over plain POST.
        if request.image.is_some() {
            self.log.log_event(
                "Images not supported in this mode at this time. Image not transmitted",
                Severity::Warning,
                true,
            );
        }

        let key = select_key(&self.config, request.request_type);
        let headers = build_headers(&key);

        let no_system_role = request.request_type == RequestMode::LocalFrontend;

        let messages = if no_system_role {
            self.log.log_event(
                &format!("Processing local front-end POST request with url: {url}"),
                Severity::Info,
                true,
            );
            build_single_block(&request.prompt, &request.example_list, &request.instruction)
        } else {
            build_basic(&request.prompt, &request.example_list, &request.instruction)
        };

        let body = ChatRequestBody {
            model: request.model,
            messages,
            temperature: request.creative_latitude,
            max_tokens: request.tokens,
            // Required by the no-system-role server's API shape, even empty.
            user_bio: no_system_role.then(String::new),
            user_name: no_system_role.then(String::new),
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
