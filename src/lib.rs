//! rivalscope - Competitor Intelligence Reports
//!
//! Builds a competitor-intelligence report from a single company input
//! (website URL or free-text description).
//!
//! ## Pipeline
//!
//! - **Discovery**: search for similar companies, crawl each one, attach
//!   summary and metadata. Per-candidate failures are isolated.
//! - **Analysis**: one prompt over all competitors, sent to the configured
//!   LLM backend (OpenAI, Anthropic, Gemini, DeepSeek). Unusable output falls
//!   back to a fixed mock report; missing sections become `["N/A"]`.
//! - **Comparison**: fixed-column table view of the enriched records.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use rivalscope::{AnalysisClient, CompanyEnricher, ComparisonBuilder, ReportAssembler};
//! use rivalscope::discovery::{EnricherConfig, SampleCrawler, SampleSearch};
//! use rivalscope::ai::ProviderConfig;
//!
//! let enricher = CompanyEnricher::new(
//!     Arc::new(SampleCrawler::new()),
//!     Arc::new(SampleSearch::new()),
//!     EnricherConfig::default(),
//! );
//! let records = enricher.discover("https://example.com", true).await?;
//!
//! let client = AnalysisClient::new(&ProviderConfig::new("openai", api_key, "gpt-4o"));
//! let report = ReportAssembler::new(client, ComparisonBuilder::default())
//!     .assemble(records)
//!     .await;
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: LLM backends, model catalog, prompt, response validation
//! - [`discovery`]: crawl/search collaborators and the enrichment loop
//! - [`report`]: comparison table and report assembly
//! - [`config`]: layered configuration

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod report;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{DiscoveryError, ErrorCategory, IntelError, LlmError, Result};

// Data Model
pub use types::{
    AnalysisReport, CompanyMetadata, ComparisonTable, CompetitorRecord, IntelligenceReport, RowView,
};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use ai::{AnalysisClient, ChatBackend, ProviderConfig, ProviderRegistry, with_timeout};
pub use discovery::{CompanyEnricher, Crawler, ProgressEvent, SearchProvider};
pub use report::{ComparisonBuilder, ReportAssembler};
