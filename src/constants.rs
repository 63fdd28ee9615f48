//! Global Constants
//!
//! Centralized constants for configuration and tuning.

/// Discovery and enrichment constants
pub mod discovery {
    /// Competitors requested from the search collaborator
    pub const DEFAULT_COMPETITOR_COUNT: usize = 5;

    /// Per-candidate crawl timeout (seconds)
    pub const CRAWL_TIMEOUT_SECS: u64 = 30;

    /// Crawls in flight at once (1 = strictly sequential)
    pub const DEFAULT_CONCURRENCY: usize = 1;

    /// Summary attached when a candidate's crawl fails or times out
    pub const CRAWL_FAILED: &str = "Crawling failed";

    /// Summary attached when a candidate has no URL
    pub const NO_URL: &str = "No URL provided";
}

/// LLM backend constants
pub mod llm {
    /// Analysis request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    /// Maximum tokens to generate
    pub const DEFAULT_MAX_TOKENS: usize = 3072;

    /// Sampling temperature
    pub const DEFAULT_TEMPERATURE: f32 = 0.2;

    /// Default provider
    pub const DEFAULT_PROVIDER: &str = "openai";
}

/// Comparison table constants
pub mod report {
    /// Characters kept from description and summary before truncation
    pub const TRUNCATE_CHARS: usize = 100;

    /// Marker appended to truncated cells
    pub const ELLIPSIS: &str = "...";
}
