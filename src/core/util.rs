//! Small shared helpers: endpoint correction, transport headers, and
//! response-text cleanup.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use reqwest::Url;

use super::error::RequestError;
use super::traits::EventLog;
use super::types::Severity;

pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

static NEWLINE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+").expect("static pattern"));

/// Rewrites `raw` so its path is exactly `required_path`, keeping only scheme
/// and host/port when a correction is needed. Users routinely point the tool
/// at a bare host or at a UI page; this recovers the API endpoint. Query and
/// fragment are dropped on correction.
pub fn normalize_url(
    raw: &str,
    required_path: &str,
    log: &Arc<dyn EventLog>,
) -> Result<String, RequestError> {
    let parsed = Url::parse(raw)
        .map_err(|e| RequestError::Config(format!("endpoint URL '{raw}' is not valid: {e}")))?;

    let corrected = if parsed.path() == required_path {
        raw.to_string()
    } else {
        let mut rebuilt = parsed;
        rebuilt.set_path(required_path);
        rebuilt.set_query(None);
        rebuilt.set_fragment(None);
        rebuilt.to_string()
    };

    log.log_event(
        &format!("URL was validated and is being presented as: {corrected}"),
        Severity::Info,
        true,
    );

    Ok(corrected)
}

/// Transport headers for the raw-HTTP adapters. The bearer line is attached
/// only when a non-empty credential is supplied.
pub fn build_headers(credential: &str) -> Vec<(String, String)> {
    let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];

    if !credential.is_empty() {
        headers.push(("Authorization".to_string(), format!("Bearer {credential}")));
    }

    headers
}

/// Collapses runs of newlines/carriage returns into a single newline and
/// trims the ends. Idempotent.
pub fn clean_response_text(text: &str) -> String {
    NEWLINE_RUNS.replace_all(text, "\n").trim().to_string()
}
