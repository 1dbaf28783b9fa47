// ABOUTME: Error types for the listing scraper: FieldError for extraction, ScrapeError for the client.
// ABOUTME: ScrapeError carries an ErrorCode plus URL/op context and exposes boolean helpers.

use std::fmt;

/// A required listing field could not be extracted.
///
/// Optional fields never produce this error; they fall back to the
/// `"None"` sentinel instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The element carrying the field is not in the document.
    #[error("required field '{field}' is missing")]
    Missing { field: &'static str },

    /// The element exists but its raw value cannot be converted.
    #[error("required field '{field}' is malformed: '{value}'")]
    Malformed { field: &'static str, value: String },
}

impl FieldError {
    pub fn missing(field: &'static str) -> Self {
        FieldError::Missing { field }
    }

    pub fn malformed(field: &'static str, value: impl Into<String>) -> Self {
        FieldError::Malformed {
            field,
            value: value.into(),
        }
    }

    /// Name of the field that failed.
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::Missing { field } | FieldError::Malformed { field, .. } => field,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldError::Missing { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, FieldError::Malformed { .. })
    }
}

/// Error codes representing different categories of scrape failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidUrl,
    Fetch,
    Timeout,
    Extract,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidUrl => "invalid URL",
            ErrorCode::Fetch => "fetch error",
            ErrorCode::Timeout => "timeout",
            ErrorCode::Extract => "extraction error",
        };
        write!(f, "{}", s)
    }
}

/// The error returned by [`crate::Client`] operations.
#[derive(Debug, thiserror::Error)]
pub struct ScrapeError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "car-analyzer: {} {}: {}", self.op, self.url, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl ScrapeError {
    fn with_code(
        code: ErrorCode,
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create an InvalidUrl error.
    pub fn invalid_url(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::InvalidUrl, url, op, source)
    }

    /// Create a Fetch error.
    pub fn fetch(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Fetch, url, op, source)
    }

    /// Create a Timeout error.
    pub fn timeout(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::with_code(ErrorCode::Timeout, url, op, source)
    }

    /// Wrap a [`FieldError`] as an Extract error for `url`.
    pub fn extract(url: impl Into<String>, op: impl Into<String>, err: FieldError) -> Self {
        Self::with_code(ErrorCode::Extract, url, op, Some(anyhow::Error::new(err)))
    }

    /// The underlying field failure, if this is an Extract error.
    pub fn field_error(&self) -> Option<&FieldError> {
        self.source.as_ref()?.downcast_ref::<FieldError>()
    }

    pub fn is_invalid_url(&self) -> bool {
        self.code == ErrorCode::InvalidUrl
    }

    pub fn is_fetch(&self) -> bool {
        self.code == ErrorCode::Fetch
    }

    pub fn is_timeout(&self) -> bool {
        self.code == ErrorCode::Timeout
    }

    pub fn is_extract(&self) -> bool {
        self.code == ErrorCode::Extract
    }
}
