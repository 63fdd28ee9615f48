//! Comparison Table
//!
//! Flattens enriched records into display rows with fixed columns.
//! Long text cells are cut at a character (not byte) boundary.

use crate::constants::report;
use crate::types::{CompetitorRecord, ComparisonTable, PLACEHOLDER, RowView};

#[derive(Debug, Clone)]
pub struct ComparisonBuilder {
    truncate_chars: usize,
}

impl Default for ComparisonBuilder {
    fn default() -> Self {
        Self::new(report::TRUNCATE_CHARS)
    }
}

impl ComparisonBuilder {
    pub fn new(truncate_chars: usize) -> Self {
        Self { truncate_chars }
    }

    /// One row per record, in input order
    pub fn build(&self, records: &[CompetitorRecord]) -> ComparisonTable {
        ComparisonTable::with_rows(records.iter().map(|r| self.row(r)).collect())
    }

    fn row(&self, record: &CompetitorRecord) -> RowView {
        let metadata = record.metadata.as_ref();

        let technologies = metadata
            .map(|m| m.technologies.join(", "))
            .unwrap_or_default();
        let team_size = metadata.map(|m| m.team_size.as_str()).unwrap_or_default();
        let founded = metadata.map(|m| m.founded.as_str()).unwrap_or_default();

        RowView {
            company: non_empty_or(&record.name, "Unknown"),
            website: record.url().unwrap_or(PLACEHOLDER).to_string(),
            description: self.truncate(&non_empty_or(&record.description, PLACEHOLDER)),
            summary: self.truncate(&non_empty_or(record.summary.as_deref().unwrap_or_default(), PLACEHOLDER)),
            technologies: non_empty_or(&technologies, PLACEHOLDER),
            team_size: non_empty_or(team_size, PLACEHOLDER),
            founded: non_empty_or(founded, PLACEHOLDER),
        }
    }

    fn truncate(&self, text: &str) -> String {
        match text.char_indices().nth(self.truncate_chars) {
            Some((cut, _)) => format!("{}{}", &text[..cut], report::ELLIPSIS),
            None => text.to_string(),
        }
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{COMPARISON_COLUMNS, CompanyMetadata};
    use proptest::prelude::*;

    fn enriched() -> CompetitorRecord {
        CompetitorRecord::new("Acme", "Widgets for everyone")
            .with_url("https://acme.io")
            .with_summary("Makes widgets")
            .with_metadata(CompanyMetadata {
                technologies: vec!["React".to_string(), "AWS".to_string()],
                team_size: "50-200".to_string(),
                founded: "2015".to_string(),
            })
    }

    #[test]
    fn test_empty_input_keeps_columns() {
        let table = ComparisonBuilder::default().build(&[]);
        assert!(table.is_empty());
        assert_eq!(table.columns, COMPARISON_COLUMNS.to_vec());
    }

    #[test]
    fn test_full_row() {
        let table = ComparisonBuilder::default().build(&[enriched()]);
        assert_eq!(
            table.rows[0].cells(),
            [
                "Acme",
                "https://acme.io",
                "Widgets for everyone",
                "Makes widgets",
                "React, AWS",
                "50-200",
                "2015"
            ]
        );
    }

    #[test]
    fn test_absent_fields_render_placeholders() {
        let record = CompetitorRecord::new("", "").with_metadata(CompanyMetadata::empty());
        let row = &ComparisonBuilder::default().build(&[record]).rows[0];
        assert_eq!(row.company, "Unknown");
        assert_eq!(row.website, PLACEHOLDER);
        assert_eq!(row.description, PLACEHOLDER);
        assert_eq!(row.summary, PLACEHOLDER);
        assert_eq!(row.technologies, PLACEHOLDER);
        assert_eq!(row.team_size, PLACEHOLDER);
        assert_eq!(row.founded, PLACEHOLDER);
    }

    #[test]
    fn test_blank_summary_renders_placeholder() {
        let record = CompetitorRecord::new("Acme", "Widgets").with_summary("  ");
        let row = &ComparisonBuilder::default().build(&[record]).rows[0];
        assert_eq!(row.summary, PLACEHOLDER);
    }

    #[test]
    fn test_long_description_truncated() {
        let record = CompetitorRecord::new("Acme", "x".repeat(250));
        let row = &ComparisonBuilder::default().build(&[record]).rows[0];
        assert_eq!(row.description.chars().count(), 103);
        assert!(row.description.ends_with("..."));
    }

    #[test]
    fn test_exact_length_not_truncated() {
        let record = CompetitorRecord::new("Acme", "y".repeat(100));
        let row = &ComparisonBuilder::default().build(&[record]).rows[0];
        assert_eq!(row.description, "y".repeat(100));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let record = CompetitorRecord::new("Acme", "é".repeat(120)).with_summary("日本".repeat(60));
        let row = &ComparisonBuilder::new(10).build(&[record]).rows[0];
        assert_eq!(row.description, format!("{}...", "é".repeat(10)));
        assert_eq!(row.summary.chars().count(), 13);
    }

    proptest! {
        #[test]
        fn prop_cells_never_exceed_limit(text in ".{0,300}") {
            let record = CompetitorRecord::new("Acme", text.clone()).with_summary(text);
            let row = &ComparisonBuilder::default().build(&[record]).rows[0];
            prop_assert!(row.description.chars().count() <= 103);
            prop_assert!(row.summary.chars().count() <= 103);
        }
    }
}
