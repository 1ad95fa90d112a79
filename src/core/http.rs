//! Shared HTTP transport for all adapters.
//!
//! One attempt per call: failures are reported to the caller as a classified
//! [`RequestError`], never retried here. Retry policy belongs to the host
//! pipeline if it wants one.

use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use super::error::RequestError;

/// Time allowed to establish a connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(12);
/// Time allowed for the whole exchange; local model servers can be slow.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, RequestError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("promptrelay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RequestError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// POST a JSON body and deserialize the 2xx response.
    ///
    /// Classification: send failure -> `Transport`, 429 -> `RateLimited`,
    /// other non-2xx -> `Status` (with the body captured for the log),
    /// unparseable 2xx body -> `Protocol`.
    #[tracing::instrument(name = "http_post_json", skip(self, headers, body), fields(url = %url))]
    pub async fn post_json<Req, Res>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<Res, RequestError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let mut req_builder = self.client.post(url).json(body);
        for (name, value) in headers {
            req_builder = req_builder.header(name, value);
        }

        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                RequestError::Transport(format!("request timed out: {e}"))
            } else {
                RequestError::Transport(format!("connection failed: {e}"))
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RequestError::Transport(format!("failed to read response body: {e}")))?;

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RequestError::RateLimited(text));
        }
        if !status.is_success() {
            return Err(RequestError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!(status = %status, "HTTP request successful");

        serde_json::from_str(&text)
            .map_err(|e| RequestError::Protocol(format!("failed to parse response as JSON: {e}")))
    }
}
