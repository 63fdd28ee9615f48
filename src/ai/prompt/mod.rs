//! Prompt Builder
//!
//! Section-based prompt construction. `AnalysisPrompt` assembles the single
//! competitor-analysis prompt: instruction header, one block per competitor in
//! index order, then the JSON output contract naming the seven section keys.

use crate::types::{ANALYSIS_KEYS, CompetitorRecord, PLACEHOLDER};

/// Prompt section types
#[derive(Debug, Clone)]
pub enum PromptSection {
    /// Lead sentence followed by a bulleted list
    Bullets { lead: String, items: Vec<String> },
    /// Raw text section
    Text(String),
    /// Labelled fields for one numbered entity
    Entity {
        title: String,
        fields: Vec<(String, String)>,
    },
}

/// Prompt builder for consistent prompt construction
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a lead sentence with bullet items
    pub fn bullets(mut self, lead: &str, items: &[&str]) -> Self {
        self.sections.push(PromptSection::Bullets {
            lead: lead.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    /// Add text section
    pub fn text(mut self, content: &str) -> Self {
        self.sections.push(PromptSection::Text(content.to_string()));
        self
    }

    /// Add an entity block
    pub fn entity(mut self, title: &str, fields: Vec<(String, String)>) -> Self {
        self.sections.push(PromptSection::Entity {
            title: title.to_string(),
            fields,
        });
        self
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        let mut prompt = String::new();

        for section in self.sections {
            match section {
                PromptSection::Bullets { lead, items } => {
                    prompt.push_str(&lead);
                    prompt.push('\n');
                    for item in items {
                        prompt.push_str(&format!("- {}\n", item));
                    }
                    prompt.push('\n');
                }
                PromptSection::Text(content) => {
                    prompt.push_str(&content);
                    prompt.push_str("\n\n");
                }
                PromptSection::Entity { title, fields } => {
                    prompt.push_str(&format!("{}:\n", title));
                    for (key, value) in fields {
                        prompt.push_str(&format!("  {}: {}\n", key, value));
                    }
                    prompt.push('\n');
                }
            }
        }

        prompt.trim_end().to_string()
    }
}

/// Competitor-analysis prompt
pub struct AnalysisPrompt;

impl AnalysisPrompt {
    pub fn build(records: &[CompetitorRecord]) -> String {
        let mut builder = PromptBuilder::new()
            .bullets(
                "Analyze the following competitor data and provide a detailed report including:",
                &[
                    "Strengths",
                    "Weaknesses",
                    "Opportunities",
                    "Market Gaps",
                    "Suggested Pricing Strategies",
                    "Potential Growth Opportunities",
                    "Actionable Recommendations",
                ],
            )
            .text("Competitor Data:");

        for (i, record) in records.iter().enumerate() {
            builder = builder.entity(&format!("Competitor {}", i + 1), Self::fields(record));
        }

        let keys = ANALYSIS_KEYS
            .iter()
            .map(|k| format!("'{}'", k))
            .collect::<Vec<_>>()
            .join(", ");

        builder
            .text(&format!(
                "Generate the analysis strictly in JSON format with keys: {}. \
                 Each key must map to a list of strings. \
                 Do not include any introductory text or explanations outside the JSON structure.",
                keys
            ))
            .build()
    }

    fn fields(record: &CompetitorRecord) -> Vec<(String, String)> {
        let or_na = |value: Option<&str>| value.unwrap_or(PLACEHOLDER).to_string();

        let mut fields = vec![
            ("Name".to_string(), record.name.clone()),
            ("URL".to_string(), or_na(record.url())),
            ("Description".to_string(), record.description.clone()),
            ("Summary".to_string(), or_na(record.summary.as_deref())),
        ];

        if let Some(metadata) = &record.metadata {
            let json = serde_json::to_string(metadata).unwrap_or_else(|_| "{}".to_string());
            fields.push(("Metadata".to_string(), json));
        }

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CompanyMetadata;

    #[test]
    fn test_builder_sections() {
        let prompt = PromptBuilder::new()
            .bullets("Lead:", &["one", "two"])
            .text("Body text")
            .entity("Item 1", vec![("Key".to_string(), "Value".to_string())])
            .build();

        assert!(prompt.starts_with("Lead:\n- one\n- two\n"));
        assert!(prompt.contains("- two\n\nBody text\n\nItem 1:"));
        assert!(prompt.ends_with("Item 1:\n  Key: Value"));
    }

    #[test]
    fn test_prompt_names_every_key() {
        let prompt = AnalysisPrompt::build(&[]);
        for key in ANALYSIS_KEYS {
            assert!(prompt.contains(&format!("'{}'", key)), "missing {}", key);
        }
        assert!(prompt.contains("strictly in JSON"));
    }

    #[test]
    fn test_competitor_blocks_in_order() {
        let records = vec![
            CompetitorRecord::new("Alpha", "First")
                .with_url("https://alpha.io")
                .with_summary("Alpha summary")
                .with_metadata(CompanyMetadata {
                    technologies: vec!["Rust".to_string()],
                    team_size: "10-50".to_string(),
                    founded: "2019".to_string(),
                }),
            CompetitorRecord::new("Beta", "Second"),
        ];

        let prompt = AnalysisPrompt::build(&records);
        let alpha = prompt.find("Competitor 1:\n  Name: Alpha").unwrap();
        let beta = prompt.find("Competitor 2:\n  Name: Beta").unwrap();
        assert!(alpha < beta);

        assert!(prompt.contains("URL: https://alpha.io"));
        assert!(prompt.contains(r#"Metadata: {"technologies":["Rust"],"team_size":"10-50","founded":"2019"}"#));
        assert!(prompt.contains("  URL: N/A\n  Description: Second\n  Summary: N/A"));
        assert_eq!(prompt.matches("Metadata:").count(), 1);
    }
}
