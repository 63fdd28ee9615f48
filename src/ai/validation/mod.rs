//! AI Response Validation
//!
//! Turns raw model text into an `AnalysisReport`:
//! - JSON extraction (direct parse, then greedy brace span)
//! - Shape check (top-level value must be an object)
//! - Per-key repair for missing sections
//!
//! ## Outcomes
//! - `Complete`: every section present
//! - `Repaired`: parsed, some sections filled with `["N/A"]`
//! - Error: nothing usable; the caller substitutes the mock report

mod json_extract;

pub use json_extract::{brace_span, extract_json_from_response, extract_json_with_repair_status};

use serde_json::Value;

use crate::types::{AnalysisReport, IntelError, Result};

/// Result of validating one model reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAnalysis {
    /// All seven sections were present
    Complete(AnalysisReport),
    /// Sections listed in `missing` were filled with placeholders
    Repaired {
        report: AnalysisReport,
        missing: Vec<&'static str>,
    },
}

impl ValidatedAnalysis {
    pub fn into_report(self) -> AnalysisReport {
        match self {
            Self::Complete(report) => report,
            Self::Repaired { report, .. } => report,
        }
    }

    pub fn is_repaired(&self) -> bool {
        matches!(self, Self::Repaired { .. })
    }
}

/// Validate a raw model reply into a fully shaped report
pub fn validate_analysis(raw: &str) -> Result<ValidatedAnalysis> {
    if raw.trim().is_empty() {
        return Err(IntelError::ResponseParse("empty response".to_string()));
    }

    let value = extract_json_from_response(raw)?;

    let Value::Object(object) = value else {
        return Err(IntelError::ResponseParse(
            "response JSON is not an object".to_string(),
        ));
    };

    let (report, missing) = AnalysisReport::from_json_object(&object);
    if missing.is_empty() {
        Ok(ValidatedAnalysis::Complete(report))
    } else {
        Ok(ValidatedAnalysis::Repaired { report, missing })
    }
}
