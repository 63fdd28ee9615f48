//! Unified Error Type System
//!
//! Centralized error types for the whole crate.
//!
//! ## Propagation
//!
//! - `DiscoveryError` is the only failure a caller of the pipeline ever sees:
//!   a rejected URL or an input with no usable description.
//! - Everything else (`IntelError`) stays inside the pipeline and is converted
//!   into degraded output: the mock analysis report, a `"Crawling failed"`
//!   marker, or an empty candidate list.

use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Categories for backend failures, used for logging and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rate limited by the provider
    RateLimit,
    /// Authentication failed (bad or revoked key)
    Auth,
    /// Network/connectivity issues
    Network,
    /// Provider unavailable or server-side failure
    Unavailable,
    /// Invalid request (model id, payload)
    BadRequest,
    /// Response body did not have the expected shape
    ParseError,
    /// Unknown error
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::Auth => write!(f, "AUTH"),
            Self::Network => write!(f, "NETWORK"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::ParseError => write!(f, "PARSE_ERROR"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// =============================================================================
// LLM Error
// =============================================================================

/// Backend call failure with category and provider context
#[derive(Debug, Clone)]
pub struct LlmError {
    /// Error category
    pub category: ErrorCategory,
    /// Detailed error message
    pub message: String,
    /// Provider that produced the error
    pub provider: Option<String>,
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{}:{}] {}", provider, self.category, self.message)
        } else {
            write!(f, "[{}] {}", self.category, self.message)
        }
    }
}

impl std::error::Error for LlmError {}

impl LlmError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            provider: None,
        }
    }

    pub fn with_provider(
        category: ErrorCategory,
        message: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            provider: Some(provider.into()),
        }
    }
}

/// Maps transport-level failures onto error categories
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify an HTTP status code returned by a provider
    pub fn classify_http_status(status: u16, message: &str, provider: &str) -> LlmError {
        let category = match status {
            429 => ErrorCategory::RateLimit,
            401 | 403 => ErrorCategory::Auth,
            400 | 404 | 422 => ErrorCategory::BadRequest,
            500..=599 => ErrorCategory::Unavailable,
            _ => ErrorCategory::Unknown,
        };
        LlmError::with_provider(category, message, provider)
    }

    /// Classify a reqwest transport error
    pub fn classify_transport(err: &reqwest::Error, provider: &str) -> LlmError {
        let category = if err.is_timeout() || err.is_connect() {
            ErrorCategory::Network
        } else if err.is_decode() {
            ErrorCategory::ParseError
        } else {
            ErrorCategory::Unknown
        };
        LlmError::with_provider(category, format!("request failed: {}", err), provider)
    }
}

// =============================================================================
// Discovery Error
// =============================================================================

/// Input validation failures surfaced to the caller of discovery.
///
/// Both mean "no competitors": the caller gets no records back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error("Invalid URL '{0}': include http:// or https://")]
    InvalidInput(String),

    #[error("Cannot search for competitors without a description or URL")]
    InsufficientInput,
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum IntelError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Backend Errors
    // -------------------------------------------------------------------------
    #[error("LLM error: {0}")]
    Llm(LlmError),

    #[error("LLM backend not configured: {0}")]
    BackendUnconfigured(String),

    #[error("Could not parse analysis from response: {0}")]
    ResponseParse(String),

    #[error("Timeout after {duration:?}: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    // -------------------------------------------------------------------------
    // Collaborator Errors
    // -------------------------------------------------------------------------
    #[error("Crawl failed for {url}: {reason}")]
    Crawl { url: String, reason: String },

    #[error("Competitor search failed: {0}")]
    Search(String),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<LlmError> for IntelError {
    fn from(err: LlmError) -> Self {
        IntelError::Llm(err)
    }
}

pub type Result<T> = std::result::Result<T, IntelError>;

impl IntelError {
    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a crawl error
    pub fn crawl(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Crawl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Whether the failure came from the LLM backend call itself
    /// (transport, provider error or timeout) rather than its output
    pub fn is_backend_failure(&self) -> bool {
        matches!(self, Self::Llm(_) | Self::Timeout { .. })
    }
}
