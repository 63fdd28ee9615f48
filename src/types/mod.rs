pub mod competitor;
pub mod error;
pub mod report;

pub use competitor::{CompanyMetadata, CompetitorRecord};
pub use error::{DiscoveryError, ErrorCategory, ErrorClassifier, IntelError, LlmError, Result};
pub use report::{
    ANALYSIS_KEYS, AnalysisReport, COMPARISON_COLUMNS, ComparisonTable, IntelligenceReport,
    PLACEHOLDER, RowView,
};
