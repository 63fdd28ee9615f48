//! Deterministic in-process collaborators
//!
//! Fixed data standing in for a real crawl service and a real similarity
//! search, so the full pipeline runs offline.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::{Candidate, CrawlResult, Crawler, SearchProvider};
use crate::types::{CompanyMetadata, IntelError, Result};

const SAMPLE_COMPETITORS: &[(&str, &str, &str)] = &[
    ("CompetitorA", "https://competitora.com", "A leading provider in the industry"),
    ("CompetitorB", "https://competitorb.com", "An innovative startup disrupting the market"),
    ("CompetitorC", "https://competitorc.com", "A well-established player with global reach"),
    ("CompetitorD", "https://competitord.com", "A niche specialist with unique offerings"),
    ("CompetitorE", "https://competitore.com", "A fast-growing company with cutting-edge tech"),
];

const SAMPLE_CONTENT: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
     Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.";

const SAMPLE_SUMMARY: &str = "This company provides various products and services in the \
     technology sector, focusing on innovation and customer satisfaction.";

/// Crawler returning the same page shape for every URL
#[derive(Debug, Clone, Default)]
pub struct SampleCrawler;

impl SampleCrawler {
    pub fn new() -> Self {
        Self
    }

    /// `"Competitora"` for `https://competitora.com`
    fn site_name(url: &str) -> Result<String> {
        let parsed = Url::parse(url).map_err(|e| IntelError::crawl(url, e.to_string()))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| IntelError::crawl(url, "URL has no host"))?;
        let label = host.strip_prefix("www.").unwrap_or(host);
        let first = label.split('.').next().unwrap_or_default();

        let mut chars = first.chars();
        Ok(match chars.next() {
            Some(c) => c.to_uppercase().chain(chars).collect(),
            None => String::new(),
        })
    }
}

#[async_trait]
impl Crawler for SampleCrawler {
    async fn crawl(&self, url: &str) -> Result<CrawlResult> {
        debug!("Sample crawl: {}", url);
        let site = Self::site_name(url)?;

        Ok(CrawlResult {
            url: url.to_string(),
            title: format!("Website for {}", site),
            description: "A company specializing in services and products.".to_string(),
            content: SAMPLE_CONTENT.to_string(),
            metadata: CompanyMetadata {
                technologies: vec!["React".to_string(), "AWS".to_string(), "MongoDB".to_string()],
                team_size: "50-200".to_string(),
                founded: "2015".to_string(),
            },
        })
    }

    async fn summarize(&self, _content: &str) -> Result<String> {
        Ok(SAMPLE_SUMMARY.to_string())
    }
}

/// Search returning a fixed competitor list
#[derive(Debug, Clone, Default)]
pub struct SampleSearch;

impl SampleSearch {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SearchProvider for SampleSearch {
    async fn find_similar(&self, description: &str, count: usize) -> Result<Vec<Candidate>> {
        let preview: String = description.chars().take(50).collect();
        debug!("Sample search for: {}...", preview);

        Ok(SAMPLE_COMPETITORS
            .iter()
            .take(count)
            .map(|(name, url, about)| Candidate::new(*name, Some(*url), *about))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_crawl_derives_title_from_host() {
        let page = SampleCrawler::new().crawl("https://competitora.com").await.unwrap();
        assert_eq!(page.title, "Website for Competitora");
        assert_eq!(page.metadata.technologies, vec!["React", "AWS", "MongoDB"]);
        assert_eq!(page.metadata.founded, "2015");

        let page = SampleCrawler::new().crawl("http://www.acme.io/about").await.unwrap();
        assert_eq!(page.title, "Website for Acme");
    }

    #[tokio::test]
    async fn test_crawl_rejects_unparsable_url() {
        let err = SampleCrawler::new().crawl("not a url").await.unwrap_err();
        assert!(matches!(err, IntelError::Crawl { .. }));
    }

    #[tokio::test]
    async fn test_search_respects_count() {
        let search = SampleSearch::new();
        let all = search.find_similar("anything", 5).await.unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].name, "CompetitorA");
        assert_eq!(all[4].url.as_deref(), Some("https://competitore.com"));

        assert_eq!(search.find_similar("anything", 2).await.unwrap().len(), 2);
        assert_eq!(search.find_similar("anything", 50).await.unwrap().len(), 5);
    }
}
