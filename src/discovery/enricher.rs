//! Company Enricher
//!
//! Discovery flow for one company input:
//!
//! 1. Resolve a description (URL input is crawled; text input is used as-is)
//! 2. Ask the search collaborator for similar companies
//! 3. Crawl each candidate and attach summary and metadata
//!
//! Per-candidate failures never abort the run: every candidate yields a
//! record, in input order. Crawls run one at a time unless `concurrency`
//! is raised; results and progress stay in input order either way.

use futures::StreamExt;
use std::time::Duration;
use tracing::{info, warn};

use super::{Candidate, ProgressTracker, SharedCrawler, SharedSearch};
use crate::ai::timeout::with_timeout;
use crate::constants::discovery;
use crate::types::{CompanyMetadata, CompetitorRecord, DiscoveryError, Result};

/// Enrichment settings
#[derive(Debug, Clone)]
pub struct EnricherConfig {
    /// Candidates requested from search
    pub competitor_count: usize,
    /// Deadline for each crawl, summarize and search call
    pub crawl_timeout: Duration,
    /// Crawls in flight at once
    pub concurrency: usize,
}

impl Default for EnricherConfig {
    fn default() -> Self {
        Self {
            competitor_count: discovery::DEFAULT_COMPETITOR_COUNT,
            crawl_timeout: Duration::from_secs(discovery::CRAWL_TIMEOUT_SECS),
            concurrency: discovery::DEFAULT_CONCURRENCY,
        }
    }
}

pub struct CompanyEnricher {
    crawler: SharedCrawler,
    search: SharedSearch,
    config: EnricherConfig,
    progress: ProgressTracker,
}

impl CompanyEnricher {
    pub fn new(crawler: SharedCrawler, search: SharedSearch, config: EnricherConfig) -> Self {
        Self {
            crawler,
            search,
            config,
            progress: ProgressTracker::new(),
        }
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    /// Discover and enrich competitors for a URL or free-text description
    pub async fn discover(
        &self,
        input: &str,
        is_url: bool,
    ) -> std::result::Result<Vec<CompetitorRecord>, DiscoveryError> {
        let description = if is_url {
            if !is_http_url(input) {
                warn!("Invalid URL provided: {}", input);
                return Err(DiscoveryError::InvalidInput(input.to_string()));
            }
            self.describe_site(input).await
        } else {
            input.to_string()
        };

        if description.trim().is_empty() {
            warn!("Cannot search for competitors without a description or URL");
            return Err(DiscoveryError::InsufficientInput);
        }

        let candidates = self.find_candidates(&description).await;
        Ok(self.enrich(candidates).await)
    }

    /// Enrich candidates in order; one record per candidate
    pub async fn enrich(&self, candidates: Vec<Candidate>) -> Vec<CompetitorRecord> {
        let total = candidates.len();
        self.progress.start();

        if total == 0 {
            self.progress.finish(0);
            return Vec::new();
        }

        let mut stream = futures::stream::iter(candidates)
            .map(|candidate| self.enrich_one(candidate))
            .buffered(self.config.concurrency.max(1));

        let mut records = Vec::with_capacity(total);
        while let Some(record) = stream.next().await {
            let name = if record.name.is_empty() {
                "Unknown"
            } else {
                record.name.as_str()
            };
            self.progress.advance(records.len() + 1, total, name);
            records.push(record);
        }

        self.progress.finish(total);
        info!("Enriched {} competitors", records.len());
        records
    }

    /// Description of the input site: its description, else its title.
    /// A failed crawl yields an empty description.
    async fn describe_site(&self, url: &str) -> String {
        match with_timeout(self.config.crawl_timeout, self.crawler.crawl(url), "crawl").await {
            Ok(page) => {
                if !page.description.trim().is_empty() {
                    page.description
                } else {
                    warn!("Could not extract description from website, using title");
                    page.title
                }
            }
            Err(e) => {
                warn!("Could not crawl input website {}: {}", url, e);
                String::new()
            }
        }
    }

    async fn find_candidates(&self, description: &str) -> Vec<Candidate> {
        let search = self.search.find_similar(description, self.config.competitor_count);
        match with_timeout(self.config.crawl_timeout, search, "competitor search").await {
            Ok(candidates) => {
                info!("Found {} candidate competitors", candidates.len());
                candidates
            }
            Err(e) => {
                warn!("Competitor search failed, continuing with no candidates: {}", e);
                Vec::new()
            }
        }
    }

    async fn enrich_one(&self, candidate: Candidate) -> CompetitorRecord {
        let mut record = CompetitorRecord::new(candidate.name, candidate.description);
        record.url = candidate.url;

        let Some(url) = record.url().map(str::to_string) else {
            return record
                .with_summary(discovery::NO_URL)
                .with_metadata(CompanyMetadata::empty());
        };

        match self.crawl_and_summarize(&url).await {
            Ok((summary, metadata)) => record.with_summary(summary).with_metadata(metadata),
            Err(e) => {
                warn!("Could not crawl {} ({}): {}", record.name, url, e);
                record
                    .with_summary(discovery::CRAWL_FAILED)
                    .with_metadata(CompanyMetadata::empty())
            }
        }
    }

    async fn crawl_and_summarize(&self, url: &str) -> Result<(String, CompanyMetadata)> {
        let timeout = self.config.crawl_timeout;
        let page = with_timeout(timeout, self.crawler.crawl(url), "crawl").await?;
        let summary = with_timeout(timeout, self.crawler.summarize(&page.content), "summarize").await?;
        Ok((summary, page.metadata))
    }
}

fn is_http_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}
