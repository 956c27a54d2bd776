use anyhow::anyhow;
use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::{RequestBuilder, Response};
use reqwest::header::HeaderMap;
use sheet_core::error::SheetError;
use tracing::debug;

const BODY_SNIPPET_LIMIT: usize = 200;

/// Sends a request once. 429 becomes [`SheetError::RateLimited`]; retrying is the caller's job.
pub(crate) fn send_checked(builder: RequestBuilder, what: &str) -> Result<Response, SheetError> {
    let response = builder
        .send()
        .map_err(|err| anyhow!("send {what} request: {err}"))?;
    let status = response.status();
    if is_rate_limited(status) {
        if let Some(delay) = retry_after_seconds(response.headers()) {
            debug!(retry_after_secs = delay, what, "server suggested a retry delay");
        }
        return Err(SheetError::RateLimited);
    }
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(anyhow!("{what} failed with {status}: {}", error_summary(&body)).into());
    }
    Ok(response)
}

pub(crate) fn endpoint(host: &str, segments: &[&str]) -> anyhow::Result<Url> {
    let mut url = Url::parse(host).map_err(|err| anyhow!("invalid api host {host}: {err}"))?;
    url.path_segments_mut()
        .map_err(|_| anyhow!("api host {host} cannot carry a path"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn is_rate_limited(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
}

fn retry_after_seconds(headers: &HeaderMap) -> Option<u64> {
    headers
        .get("retry-after")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
}

fn error_summary(body: &str) -> String {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.pointer("/error/message")
                .and_then(|value| value.as_str())
                .map(str::to_string)
        });
    match message {
        Some(message) => message,
        None => body.trim().chars().take(BODY_SNIPPET_LIMIT).collect(),
    }
}
