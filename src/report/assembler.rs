//! Report Assembler
//!
//! Composes analysis and comparison over the same enriched records.

use tracing::info;

use super::ComparisonBuilder;
use crate::ai::{AnalysisClient, AnalysisSource};
use crate::types::{CompetitorRecord, IntelligenceReport};

pub struct ReportAssembler {
    client: AnalysisClient,
    comparison: ComparisonBuilder,
}

impl ReportAssembler {
    pub fn new(client: AnalysisClient, comparison: ComparisonBuilder) -> Self {
        Self { client, comparison }
    }

    pub fn client(&self) -> &AnalysisClient {
        &self.client
    }

    /// Build the report; never fails
    pub async fn assemble(&self, records: Vec<CompetitorRecord>) -> IntelligenceReport {
        self.assemble_detailed(records).await.0
    }

    /// Build the report and report where the analysis came from.
    /// `None` means no analysis was attempted (no competitors).
    pub async fn assemble_detailed(
        &self,
        records: Vec<CompetitorRecord>,
    ) -> (IntelligenceReport, Option<AnalysisSource>) {
        if records.is_empty() {
            info!("No competitors to analyze");
            return (IntelligenceReport::empty(), None);
        }

        let (analysis, source) = self.client.generate_detailed(&records).await;
        let comparison_table = self.comparison.build(&records);

        info!(
            "Report assembled for {} competitors ({})",
            records.len(),
            match &source {
                AnalysisSource::Model => "model analysis",
                AnalysisSource::Repaired { .. } => "partially repaired analysis",
                AnalysisSource::Mock { .. } => "mock analysis",
            }
        );

        (
            IntelligenceReport {
                competitors: records,
                analysis,
                comparison_table,
            },
            Some(source),
        )
    }
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new(
            AnalysisClient::unconfigured("no provider configured"),
            ComparisonBuilder::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ChatBackend;
    use crate::types::{AnalysisReport, PLACEHOLDER, Result};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingBackend {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ChatBackend for CountingBackend {
        async fn chat(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(r#"{"strengths":["Fast"],"recommendations":["Ship"]}"#.to_string())
        }

        fn name(&self) -> &str {
            "counting"
        }

        fn model(&self) -> &str {
            "counting-model"
        }
    }

    fn assembler(backend: Arc<CountingBackend>) -> ReportAssembler {
        ReportAssembler::new(
            AnalysisClient::with_backend(backend, Duration::from_secs(5)),
            ComparisonBuilder::default(),
        )
    }

    #[tokio::test]
    async fn test_empty_records_make_no_backend_calls() {
        let backend = Arc::new(CountingBackend {
            calls: AtomicUsize::new(0),
        });
        let (report, source) = assembler(backend.clone()).assemble_detailed(Vec::new()).await;

        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
        assert!(source.is_none());
        assert!(report.competitors.is_empty());
        assert!(report.comparison_table.is_empty());
        assert_eq!(report.analysis, AnalysisReport::placeholder());
        assert!(report.analysis.is_placeholder());
    }

    #[tokio::test]
    async fn test_assemble_composes_analysis_and_table() {
        let backend = Arc::new(CountingBackend {
            calls: AtomicUsize::new(0),
        });
        let records = vec![
            CompetitorRecord::new("Alpha", "First").with_url("https://alpha.io"),
            CompetitorRecord::new("Beta", "Second"),
        ];
        let report = assembler(backend.clone()).assemble(records.clone()).await;

        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
        assert_eq!(report.competitors, records);
        assert_eq!(report.comparison_table.rows.len(), 2);
        assert_eq!(report.comparison_table.rows[1].company, "Beta");
        assert_eq!(report.analysis.strengths, vec!["Fast"]);
        assert_eq!(report.analysis.weaknesses, vec![PLACEHOLDER]);
    }

    #[tokio::test]
    async fn test_unconfigured_assembler_uses_mock() {
        let records = vec![CompetitorRecord::new("Alpha", "First")];
        let (report, source) = ReportAssembler::default().assemble_detailed(records).await;
        assert_eq!(report.analysis, AnalysisReport::mock());
        assert!(source.unwrap().is_mock());
    }
}
