//! Analysis Client
//!
//! Produces an `AnalysisReport` from enriched competitor records through the
//! configured backend.
//!
//! ## States
//!
//! - `Unconfigured`: provider, key or model missing/unsupported, or the
//!   adapter could not be built. Every call returns the mock report without
//!   touching the network.
//! - `Ready`: a backend exists. A failed call never changes the state; that
//!   call alone falls back to the mock report.
//!
//! ## Fallback tiers
//!
//! - Full fallback: backend error, timeout, empty or unparsable reply → mock.
//! - Partial repair: parsed object with missing sections → missing sections
//!   become `["N/A"]`, the rest of the model output is kept.

use std::time::Duration;
use tracing::{info, warn};

use super::prompt::AnalysisPrompt;
use super::provider::{ProviderConfig, SharedBackend, create_backend};
use super::timeout::with_timeout;
use super::validation::{ValidatedAnalysis, validate_analysis};
use crate::types::{AnalysisReport, CompetitorRecord, Result};

/// Client state; `Ready` is never revalidated per call
#[derive(Clone)]
pub enum ClientState {
    Unconfigured { reason: String },
    Ready(SharedBackend),
}

impl std::fmt::Debug for ClientState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unconfigured { reason } => f
                .debug_struct("Unconfigured")
                .field("reason", reason)
                .finish(),
            Self::Ready(backend) => f
                .debug_struct("Ready")
                .field("provider", &backend.name())
                .field("model", &backend.model())
                .finish(),
        }
    }
}

/// Where a returned report came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisSource {
    /// Model output with every section present
    Model,
    /// Model output with the listed sections filled in
    Repaired { missing: Vec<&'static str> },
    /// Fixed mock report
    Mock { reason: String },
}

impl AnalysisSource {
    pub fn is_mock(&self) -> bool {
        matches!(self, Self::Mock { .. })
    }
}

/// Uniform analysis entry point over all backends
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    state: ClientState,
    timeout: Duration,
}

impl AnalysisClient {
    /// Build a client from configuration. Never fails: any configuration
    /// problem yields an `Unconfigured` client.
    pub fn new(config: &ProviderConfig) -> Self {
        let timeout = config.timeout();

        match create_backend(config) {
            Ok(backend) => {
                info!(
                    "Analysis backend ready (provider: {}, model: {})",
                    backend.name(),
                    backend.model()
                );
                Self::with_backend(backend, timeout)
            }
            Err(e) => {
                warn!(
                    "LLM provider not configured correctly ({}). Using mock analysis data.",
                    e
                );
                Self {
                    state: ClientState::Unconfigured {
                        reason: e.to_string(),
                    },
                    timeout,
                }
            }
        }
    }

    /// Client over an already constructed backend
    pub fn with_backend(backend: SharedBackend, timeout: Duration) -> Self {
        Self {
            state: ClientState::Ready(backend),
            timeout,
        }
    }

    /// Client that always serves the mock report
    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self {
            state: ClientState::Unconfigured {
                reason: reason.into(),
            },
            timeout: Duration::from_secs(crate::constants::llm::DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ClientState::Ready(_))
    }

    /// Generate an analysis report; always fully shaped
    pub async fn generate(&self, records: &[CompetitorRecord]) -> AnalysisReport {
        self.generate_detailed(records).await.0
    }

    /// Generate an analysis report and report which path produced it
    pub async fn generate_detailed(
        &self,
        records: &[CompetitorRecord],
    ) -> (AnalysisReport, AnalysisSource) {
        let backend = match &self.state {
            ClientState::Unconfigured { reason } => {
                warn!("Analysis backend unconfigured, using mock analysis data");
                return (
                    AnalysisReport::mock(),
                    AnalysisSource::Mock {
                        reason: reason.clone(),
                    },
                );
            }
            ClientState::Ready(backend) => backend,
        };

        let prompt = AnalysisPrompt::build(records);

        info!(
            "Generating analysis using {} model {} ({} competitors)",
            backend.name(),
            backend.model(),
            records.len()
        );

        let reply = with_timeout(self.timeout, backend.chat(&prompt), "analysis request").await;
        resolve_reply(backend.name(), reply)
    }
}

/// Turn a backend reply (or failure) into a report and its source
pub fn resolve_reply(provider: &str, reply: Result<String>) -> (AnalysisReport, AnalysisSource) {
    let raw = match reply {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Error generating analysis report with {}: {}", provider, e);
            return (
                AnalysisReport::mock(),
                AnalysisSource::Mock {
                    reason: e.to_string(),
                },
            );
        }
    };

    match validate_analysis(&raw) {
        Ok(ValidatedAnalysis::Complete(report)) => (report, AnalysisSource::Model),
        Ok(ValidatedAnalysis::Repaired { report, missing }) => {
            warn!(
                "{} response missing analysis keys {:?}; results might be incomplete",
                provider, missing
            );
            (report, AnalysisSource::Repaired { missing })
        }
        Err(e) => {
            warn!("Could not parse valid JSON from {} response: {}", provider, e);
            (
                AnalysisReport::mock(),
                AnalysisSource::Mock {
                    reason: e.to_string(),
                },
            )
        }
    }
}
