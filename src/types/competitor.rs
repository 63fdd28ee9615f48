//! Competitor records produced by discovery and enrichment

use serde::{Deserialize, Serialize};

/// Company facts attached by the crawler during enrichment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyMetadata {
    pub technologies: Vec<String>,
    pub team_size: String,
    pub founded: String,
}

impl CompanyMetadata {
    /// Metadata attached when a candidate could not be crawled
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.technologies.is_empty() && self.team_size.is_empty() && self.founded.is_empty()
    }
}

/// A discovered competitor, enriched in place before it is handed to the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CompanyMetadata>,
}

impl CompetitorRecord {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
            description: description.into(),
            summary: None,
            metadata: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_metadata(mut self, metadata: CompanyMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// URL if present and non-blank
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_url_is_absent() {
        let record = CompetitorRecord::new("Acme", "Widgets").with_url("  ");
        assert_eq!(record.url(), None);

        let record = CompetitorRecord::new("Acme", "Widgets").with_url("https://acme.io");
        assert_eq!(record.url(), Some("https://acme.io"));
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let record = CompetitorRecord::new("Acme", "Widgets");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("url").is_none());
        assert!(json.get("summary").is_none());
        assert!(json.get("metadata").is_none());
    }

    #[test]
    fn test_empty_metadata() {
        assert!(CompanyMetadata::empty().is_empty());
        let metadata = CompanyMetadata {
            founded: "2015".to_string(),
            ..Default::default()
        };
        assert!(!metadata.is_empty());
    }
}
