//! Analyze Command
//!
//! Runs discovery, enrichment and report assembly for one company input.
//!
//! Usage:
//!   rivalscope analyze --url https://example.com
//!   rivalscope analyze --description "..." [--provider anthropic] [--json]

use std::sync::Arc;
use tracing::info;

use crate::ai::{AnalysisClient, AnalysisSource, ClientState, ProviderRegistry};
use crate::cli::progress::ConsoleRenderer;
use crate::cli::ui::Output;
use crate::config::{Config, ConfigLoader};
use crate::discovery::{CompanyEnricher, SampleCrawler, SampleSearch};
use crate::report::{ComparisonBuilder, ReportAssembler};
use crate::types::{IntelError, IntelligenceReport, Result};

/// Company input: a website or a free-text description
#[derive(Debug, Clone)]
pub enum CompanyInput {
    Url(String),
    Description(String),
}

impl CompanyInput {
    fn as_parts(&self) -> (&str, bool) {
        match self {
            Self::Url(url) => (url, true),
            Self::Description(text) => (text, false),
        }
    }
}

/// Analyze command options (CLI overrides on top of loaded config)
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub input: CompanyInput,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub model_label: Option<String>,
    pub api_key: Option<String>,
    pub count: Option<usize>,
    pub concurrency: Option<usize>,
    pub json: bool,
}

impl AnalyzeOptions {
    /// Apply CLI overrides; highest priority in the resolution chain
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(provider) = &self.provider {
            if provider != &config.llm.provider {
                config.llm.model = None;
            }
            config.llm.provider = provider.clone();
        }

        if let Some(label) = &self.model_label {
            let model = ProviderRegistry::model_id_from_label(label)
                .ok_or_else(|| IntelError::Config(format!("Invalid model label: '{}'", label)))?;
            config.llm.model = Some(model);
        } else if let Some(model) = &self.model {
            config.llm.model = Some(model.clone());
        }

        if let Some(key) = &self.api_key {
            config.llm.api_key = Some(key.clone());
        }
        if let Some(count) = self.count {
            config.discovery.competitor_count = count;
        }
        if let Some(concurrency) = self.concurrency {
            config.discovery.concurrency = concurrency;
        }

        config.validate()
    }
}

pub async fn run(options: AnalyzeOptions) -> Result<()> {
    let mut config = ConfigLoader::load()?;
    options.apply(&mut config)?;

    let output = Output::new();
    let client = AnalysisClient::new(&config.llm.to_provider_config());
    match client.state() {
        ClientState::Ready(backend) => {
            output.info(&format!("Using {} model {}", backend.name(), backend.model()));
        }
        ClientState::Unconfigured { .. } => {
            output.warning("LLM provider not configured. Analysis will use mock data.");
        }
    }

    let enricher = CompanyEnricher::new(
        Arc::new(SampleCrawler::new()),
        Arc::new(SampleSearch::new()),
        config.discovery.to_enricher_config(),
    );
    let renderer = (!options.json).then(|| ConsoleRenderer::new().spawn(enricher.progress().subscribe()));

    let (input, is_url) = options.input.as_parts();
    let discovered = enricher.discover(input, is_url).await;
    drop(enricher);
    if let Some(handle) = renderer {
        let _ = handle.await;
    }

    let records = discovered?;

    let assembler = ReportAssembler::new(client, ComparisonBuilder::new(config.report.truncate_chars));
    let (report, source) = assembler.assemble_detailed(records).await;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&output, &report, source.as_ref());
    }

    info!("Analysis complete ({} competitors)", report.competitors.len());
    Ok(())
}

fn print_report(output: &Output, report: &IntelligenceReport, source: Option<&AnalysisSource>) {
    output.header("Competitor Intelligence Report");

    if report.competitors.is_empty() {
        output.warning("No competitors found.");
        return;
    }

    match source {
        Some(AnalysisSource::Mock { reason }) => {
            output.warning(&format!("Showing mock analysis ({})", reason));
        }
        Some(AnalysisSource::Repaired { missing }) => {
            output.warning(&format!(
                "Model response was missing sections: {}",
                missing.join(", ")
            ));
        }
        _ => {}
    }

    output.section("Competitor Comparison");
    output.table(&report.comparison_table);

    output.section("Analysis Insights");
    if report.analysis.is_placeholder() {
        output.warning("Analysis could not be generated. Check the LLM provider configuration.");
    } else {
        output.analysis(&report.analysis);
    }

    output.section("Detailed Competitor Information");
    for (i, record) in report.competitors.iter().enumerate() {
        output.competitor(i + 1, record);
    }

    println!();
    output.success(&format!("Analyzed {} competitors", report.competitors.len()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> AnalyzeOptions {
        AnalyzeOptions {
            input: CompanyInput::Description("widgets".to_string()),
            provider: None,
            model: None,
            model_label: None,
            api_key: None,
            count: None,
            concurrency: None,
            json: true,
        }
    }

    #[test]
    fn test_model_label_override() {
        let mut config = Config::default();
        let opts = AnalyzeOptions {
            provider: Some("anthropic".to_string()),
            model_label: Some("claude-3-haiku-20240307 (Fastest/Cheapest)".to_string()),
            ..options()
        };
        opts.apply(&mut config).unwrap();
        assert_eq!(config.llm.provider, "anthropic");
        assert_eq!(config.llm.model.as_deref(), Some("claude-3-haiku-20240307"));
    }

    #[test]
    fn test_provider_switch_clears_configured_model() {
        let mut config = Config::default();
        config.llm.model = Some("gpt-4-turbo".to_string());
        let opts = AnalyzeOptions {
            provider: Some("google".to_string()),
            ..options()
        };
        opts.apply(&mut config).unwrap();
        assert_eq!(
            config.llm.effective_model().as_deref(),
            Some("gemini-1.5-pro-latest")
        );
    }

    #[test]
    fn test_invalid_overrides_rejected() {
        let mut config = Config::default();
        let opts = AnalyzeOptions {
            model_label: Some("(Fast)".to_string()),
            ..options()
        };
        assert!(matches!(opts.apply(&mut config), Err(IntelError::Config(_))));

        let mut config = Config::default();
        let opts = AnalyzeOptions {
            count: Some(0),
            ..options()
        };
        assert!(opts.apply(&mut config).is_err());
    }

    #[test]
    fn test_input_parts() {
        assert_eq!(
            CompanyInput::Url("https://a.io".to_string()).as_parts(),
            ("https://a.io", true)
        );
        assert_eq!(
            CompanyInput::Description("text".to_string()).as_parts(),
            ("text", false)
        );
    }
}
