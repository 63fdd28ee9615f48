//! Report types
//!
//! `AnalysisReport` always carries all seven sections. Every constructor in
//! this module upholds that, so callers never see a partially shaped report.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::CompetitorRecord;

/// Placeholder used for any section the model did not provide
pub const PLACEHOLDER: &str = "N/A";

/// Section keys, in prompt and display order
pub const ANALYSIS_KEYS: [&str; 7] = [
    "strengths",
    "weaknesses",
    "opportunities",
    "market_gaps",
    "pricing_strategies",
    "growth_opportunities",
    "recommendations",
];

/// Structured competitive analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub market_gaps: Vec<String>,
    pub pricing_strategies: Vec<String>,
    pub growth_opportunities: Vec<String>,
    pub recommendations: Vec<String>,
}

impl AnalysisReport {
    /// Fixed report returned whenever no usable model output exists
    pub fn mock() -> Self {
        fn items(values: &[&str]) -> Vec<String> {
            values.iter().map(|v| v.to_string()).collect()
        }

        Self {
            strengths: items(&[
                "Mock: Strong online presence",
                "Mock: Innovative product lineup",
            ]),
            weaknesses: items(&["Mock: Limited market reach", "Mock: Price point concerns"]),
            opportunities: items(&[
                "Mock: Expand to new markets",
                "Mock: Develop budget offerings",
            ]),
            market_gaps: items(&["Mock: Underserved budget segment"]),
            pricing_strategies: items(&["Mock: Consider freemium model"]),
            growth_opportunities: items(&["Mock: International expansion"]),
            recommendations: items(&["Mock: Develop a stronger social media presence"]),
        }
    }

    /// Report with every section set to `["N/A"]`
    pub fn placeholder() -> Self {
        let na = || vec![PLACEHOLDER.to_string()];
        Self {
            strengths: na(),
            weaknesses: na(),
            opportunities: na(),
            market_gaps: na(),
            pricing_strategies: na(),
            growth_opportunities: na(),
            recommendations: na(),
        }
    }

    /// Build a report from a parsed JSON object, filling missing sections.
    ///
    /// Returns the report and the keys that had to be filled with `["N/A"]`.
    /// A key counts as missing when it is absent, null, or yields no items.
    pub fn from_json_object(object: &Map<String, Value>) -> (Self, Vec<&'static str>) {
        let mut missing = Vec::new();
        let mut section = |key: &'static str| match object.get(key).map(section_items) {
            Some(items) if !items.is_empty() => items,
            _ => {
                missing.push(key);
                vec![PLACEHOLDER.to_string()]
            }
        };

        let report = Self {
            strengths: section("strengths"),
            weaknesses: section("weaknesses"),
            opportunities: section("opportunities"),
            market_gaps: section("market_gaps"),
            pricing_strategies: section("pricing_strategies"),
            growth_opportunities: section("growth_opportunities"),
            recommendations: section("recommendations"),
        };

        (report, missing)
    }

    /// Sections paired with their keys, in display order
    pub fn sections(&self) -> [(&'static str, &[String]); 7] {
        [
            (ANALYSIS_KEYS[0], self.strengths.as_slice()),
            (ANALYSIS_KEYS[1], self.weaknesses.as_slice()),
            (ANALYSIS_KEYS[2], self.opportunities.as_slice()),
            (ANALYSIS_KEYS[3], self.market_gaps.as_slice()),
            (ANALYSIS_KEYS[4], self.pricing_strategies.as_slice()),
            (ANALYSIS_KEYS[5], self.growth_opportunities.as_slice()),
            (ANALYSIS_KEYS[6], self.recommendations.as_slice()),
        ]
    }

    /// True when no section carries real content
    pub fn is_placeholder(&self) -> bool {
        self.sections().iter().all(|(_, items)| {
            items.is_empty() || (items.len() == 1 && items[0] == PLACEHOLDER)
        })
    }
}

/// Flatten one JSON section into display strings
fn section_items(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(value_to_text)
            .collect(),
        other => vec![value_to_text(other)],
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// =============================================================================
// Comparison Table
// =============================================================================

/// Column headers of the comparison table, in order
pub const COMPARISON_COLUMNS: [&str; 7] = [
    "Company",
    "Website",
    "Description",
    "Summary",
    "Technologies",
    "Team Size",
    "Founded",
];

/// One display row of the comparison table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowView {
    pub company: String,
    pub website: String,
    pub description: String,
    pub summary: String,
    pub technologies: String,
    pub team_size: String,
    pub founded: String,
}

impl RowView {
    /// Cells in `COMPARISON_COLUMNS` order
    pub fn cells(&self) -> [&str; 7] {
        [
            self.company.as_str(),
            self.website.as_str(),
            self.description.as_str(),
            self.summary.as_str(),
            self.technologies.as_str(),
            self.team_size.as_str(),
            self.founded.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub columns: Vec<String>,
    pub rows: Vec<RowView>,
}

impl ComparisonTable {
    /// Table with the fixed column set and no rows
    pub fn empty() -> Self {
        Self::with_rows(Vec::new())
    }

    pub fn with_rows(rows: Vec<RowView>) -> Self {
        Self {
            columns: COMPARISON_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Intelligence Report
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntelligenceReport {
    pub competitors: Vec<CompetitorRecord>,
    pub analysis: AnalysisReport,
    pub comparison_table: ComparisonTable,
}

impl IntelligenceReport {
    /// Report for an empty competitor list
    pub fn empty() -> Self {
        Self {
            competitors: Vec::new(),
            analysis: AnalysisReport::placeholder(),
            comparison_table: ComparisonTable::empty(),
        }
    }
}
