use console::{Alignment, measure_text_width, pad_str, style};

use crate::types::{AnalysisReport, ComparisonTable, CompetitorRecord, PLACEHOLDER};

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    pub fn table(&self, table: &ComparisonTable) {
        println!("{}", render_table(table));
    }

    /// Analysis sections as bulleted lists; recommendations are numbered
    pub fn analysis(&self, analysis: &AnalysisReport) {
        for (key, items) in analysis.sections() {
            println!("\n{}", style(section_title(key)).bold().cyan());
            for line in section_lines(key, items) {
                println!("  {}", line);
            }
        }
    }

    pub fn competitor(&self, index: usize, record: &CompetitorRecord) {
        println!("\n{} {}", style(format!("{}.", index)).dim(), style(&record.name).bold());
        println!("  Website:     {}", record.url().unwrap_or(PLACEHOLDER));
        println!("  Description: {}", record.description);
        println!(
            "  Summary:     {}",
            record.summary.as_deref().unwrap_or(PLACEHOLDER)
        );

        if let Some(metadata) = record.metadata.as_ref().filter(|m| !m.is_empty()) {
            println!("  Technologies: {}", metadata.technologies.join(", "));
            println!("  Team Size:    {}", metadata.team_size);
            println!("  Founded:      {}", metadata.founded);
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

/// Display title for an analysis key
pub fn section_title(key: &str) -> &'static str {
    match key {
        "strengths" => "Strengths",
        "weaknesses" => "Weaknesses",
        "opportunities" => "Opportunities",
        "market_gaps" => "Market Gaps",
        "pricing_strategies" => "Pricing Strategies",
        "growth_opportunities" => "Growth Opportunities",
        "recommendations" => "Recommendations",
        _ => "Other",
    }
}

/// Display lines for one analysis section
pub fn section_lines(key: &str, items: &[String]) -> Vec<String> {
    if key != "recommendations" {
        return items.iter().map(|item| format!("• {}", item)).collect();
    }

    let is_placeholder = items.iter().all(|item| item == PLACEHOLDER);
    if is_placeholder {
        return vec!["No specific recommendations generated.".to_string()];
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect()
}

/// Plain-text grid with a header row; columns sized to their widest cell
pub fn render_table(table: &ComparisonTable) -> String {
    let mut widths: Vec<usize> = table.columns.iter().map(|c| measure_text_width(c)).collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(measure_text_width(cell));
        }
    }

    let mut out = vec![
        render_line(&table.columns.iter().map(String::as_str).collect::<Vec<_>>(), &widths),
        widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─"),
    ];
    out.extend(table.rows.iter().map(|row| render_line(&row.cells(), &widths)));
    out.join("\n")
}

fn render_line(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad_str(cell, *width, Alignment::Left, None).into_owned())
        .collect::<Vec<_>>()
        .join(" │ ")
        .trim_end()
        .to_string()
}
