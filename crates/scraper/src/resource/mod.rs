// ABOUTME: Resource handling module for fetching listing pages over HTTP.
// ABOUTME: Handles URL validation, content-length limits, status checks and charset decoding.

use std::collections::HashMap;

use bytes::Bytes;
use reqwest::header::{HeaderMap, CONTENT_LENGTH};

use crate::error::ScrapeError;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Options for fetching a resource.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub headers: HashMap<String, String>,
}

/// Result of a successful fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Decode the body as text, using the charset from the content-type header if any.
    pub fn text(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// Decode body bytes to a String using charset from content-type header or detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(ct) = content_type {
        if let Some(charset) = extract_charset(ct) {
            if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
                let (decoded, _, _) = encoding.decode(body);
                return decoded.into_owned();
            }
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract charset value from Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    for part in lower.split(';') {
        let trimmed = part.trim();
        if let Some(charset) = trimmed.strip_prefix("charset=") {
            let charset = charset.trim_matches('"').trim_matches('\'');
            return Some(charset.to_string());
        }
    }
    None
}

/// Validates that `url` is an absolute http(s) URL.
pub fn validate_url(url: &str, op: &str) -> Result<url::Url, ScrapeError> {
    if url.is_empty() {
        return Err(ScrapeError::invalid_url(url, op, None));
    }

    let parsed = url::Url::parse(url).map_err(|e| {
        ScrapeError::invalid_url(url, op, Some(anyhow::anyhow!("invalid URL: {}", e)))
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(ScrapeError::invalid_url(
            url,
            op,
            Some(anyhow::anyhow!("scheme must be http or https")),
        )),
    }
}

/// Body size announced by the server. Falls back to the raw header when
/// reqwest cannot report one (e.g. compressed responses).
fn declared_length(content_length: Option<u64>, headers: &HeaderMap) -> Option<u64> {
    content_length.or_else(|| {
        headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
    })
}

fn request_error(url: &str, stage: &str, e: reqwest::Error) -> ScrapeError {
    if e.is_timeout() {
        ScrapeError::timeout(url, "Fetch", Some(anyhow::anyhow!("{}: {}", stage, e)))
    } else {
        ScrapeError::fetch(url, "Fetch", Some(anyhow::anyhow!("{}: {}", stage, e)))
    }
}

/// Fetch a resource from the given URL.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    opts: &FetchOptions,
) -> Result<FetchResult, ScrapeError> {
    validate_url(url, "Fetch")?;

    let mut request = client.get(url);
    for (key, value) in &opts.headers {
        request = request.header(key, value);
    }

    tracing::debug!(url, "sending request");
    let response = request
        .send()
        .await
        .map_err(|e| request_error(url, "request failed", e))?;

    if let Some(len) = declared_length(response.content_length(), response.headers()) {
        if len as usize > MAX_CONTENT_LENGTH {
            return Err(ScrapeError::fetch(
                url,
                "Fetch",
                Some(anyhow::anyhow!("content too large")),
            ));
        }
    }

    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    let body = response
        .bytes()
        .await
        .map_err(|e| request_error(url, "failed to read body", e))?;

    if body.len() > MAX_CONTENT_LENGTH {
        return Err(ScrapeError::fetch(
            url,
            "Fetch",
            Some(anyhow::anyhow!("content too large")),
        ));
    }

    // Only error statuses are rejected; 2xx and unfollowed 3xx bodies are parsed.
    if status.is_client_error() || status.is_server_error() {
        return Err(ScrapeError::fetch(
            url,
            "Fetch",
            Some(anyhow::anyhow!("HTTP status {}", status.as_u16())),
        ));
    }

    tracing::debug!(url, status = status.as_u16(), bytes = body.len(), "fetched page");
    Ok(FetchResult {
        content_type,
        body,
    })
}
