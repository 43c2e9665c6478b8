//! Closed error taxonomy for generator calls.
//!
//! Transport and API failures arrive as an optional HTTP status plus a
//! message. [`classify`] turns that pair into an [`ErrorKind`]; retry and
//! fallback logic only ever looks at the kind.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static QUOTA_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(quota|quota_exceeded|resource_exhausted)\b").expect("quota pattern is valid")
});

static RATE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b429\b|\brate[ _-]?limit").expect("rate pattern is valid")
});

static UNAVAILABLE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b503\b|overload|unavailable").expect("unavailable pattern is valid")
});

/// What went wrong with a generator call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    RateLimited,
    ServiceUnavailable,
    QuotaExceeded,
    Unknown,
}

impl ErrorKind {
    /// Everything except `Unknown` is worth another attempt.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// 429-family kinds. 503 is not a quota failure.
    #[must_use]
    pub const fn is_quota(self) -> bool {
        matches!(self, Self::RateLimited | Self::QuotaExceeded)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RateLimited => "rate_limited",
            Self::ServiceUnavailable => "service_unavailable",
            Self::QuotaExceeded => "quota_exceeded",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a failure from its HTTP status (if any) and message.
#[must_use]
pub fn classify(status: Option<u16>, message: &str) -> ErrorKind {
    match status {
        Some(429) if QUOTA_WORDS.is_match(message) => ErrorKind::QuotaExceeded,
        Some(429) => ErrorKind::RateLimited,
        Some(503) => ErrorKind::ServiceUnavailable,
        _ if QUOTA_WORDS.is_match(message) => ErrorKind::QuotaExceeded,
        _ if RATE_WORDS.is_match(message) => ErrorKind::RateLimited,
        _ if UNAVAILABLE_WORDS.is_match(message) => ErrorKind::ServiceUnavailable,
        _ => ErrorKind::Unknown,
    }
}

/// A failed generator call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("generator error ({kind}): {message}")]
pub struct GeneratorError {
    pub kind: ErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl GeneratorError {
    #[must_use]
    pub fn new(kind: ErrorKind, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
        }
    }

    /// Build from a raw status and message, classifying them.
    #[must_use]
    pub fn classified(status: Option<u16>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: classify(status, &message),
            status,
            message,
        }
    }

    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, None, message)
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    #[must_use]
    pub const fn is_quota(&self) -> bool {
        self.kind.is_quota()
    }
}

impl From<reqwest::Error> for GeneratorError {
    fn from(error: reqwest::Error) -> Self {
        Self::classified(error.status().map(|s| s.as_u16()), error.to_string())
    }
}

/// Whether the Plan stage should swap in its static fallback plan.
#[must_use]
pub const fn is_quota(error: &GeneratorError) -> bool {
    error.is_quota()
}
