//! Competitor Discovery
//!
//! Finds candidate competitors for one company input and enriches each with
//! crawled detail. The crawl and search services are collaborators behind the
//! `Crawler` and `SearchProvider` traits.

mod enricher;
mod progress;
mod sample;

pub use enricher::{CompanyEnricher, EnricherConfig};
pub use progress::{ProgressEvent, ProgressTracker};
pub use sample::{SampleCrawler, SampleSearch};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::types::{CompanyMetadata, Result};

/// One crawled page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlResult {
    pub url: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub metadata: CompanyMetadata,
}

/// One search hit; `url` may be absent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl Candidate {
    pub fn new(name: impl Into<String>, url: Option<&str>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.map(str::to_string),
            description: description.into(),
        }
    }
}

/// Website crawling collaborator
#[async_trait]
pub trait Crawler: Send + Sync {
    async fn crawl(&self, url: &str) -> Result<CrawlResult>;

    /// Condense crawled content into a short summary
    async fn summarize(&self, content: &str) -> Result<String>;
}

/// Similar-company search collaborator
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn find_similar(&self, description: &str, count: usize) -> Result<Vec<Candidate>>;
}

pub type SharedCrawler = Arc<dyn Crawler>;
pub type SharedSearch = Arc<dyn SearchProvider>;
