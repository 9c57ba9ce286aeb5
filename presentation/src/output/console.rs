//! Console output for prompts, queries and validation reports

use colored::Colorize;
use refiner_application::ValidationReport;
use refiner_domain::{DONE, NEXT, OutputFormat, Query, SKIP};

/// Formats session output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// A numbered option list under its title
    pub fn prompt(title: &str, options: &[String]) -> String {
        let mut output = format!("\n{}\n", title.cyan().bold());
        for (index, option) in options.iter().enumerate() {
            let label = if matches!(option.as_str(), NEXT | SKIP | DONE) {
                option.yellow().to_string()
            } else {
                option.to_string()
            };
            output.push_str(&format!("  {:>3}) {}\n", index + 1, label));
        }
        output
    }

    /// Finished queries, one per line
    pub fn queries(queries: &[(String, Query)]) -> String {
        let mut output = Self::section_header("Queries");
        if queries.is_empty() {
            output.push_str(&format!("  {}\n", "(none)".dimmed()));
        }
        for (attribute, query) in queries {
            output.push_str(&format!(
                "  {} {}  {}\n",
                format!("{}:", attribute).yellow().bold(),
                query.condition(),
                format!("[{}]", query.priority()).dimmed()
            ));
        }
        output
    }

    pub fn queries_json(queries: &[(String, Query)]) -> String {
        let items: Vec<_> = queries
            .iter()
            .map(|(attribute, query)| {
                serde_json::json!({
                    "attribute": attribute,
                    "condition": query.condition().to_string(),
                    "priority": query.priority().to_string(),
                    "question": query.render("{target}"),
                })
            })
            .collect();
        serde_json::to_string_pretty(&items).unwrap_or_else(|_| "[]".to_string())
    }

    /// Report in the requested format
    pub fn report(report: &ValidationReport, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format_full(report),
            OutputFormat::Titles => Self::format_titles(report),
            OutputFormat::Json => Self::format_json(report),
        }
    }

    /// Every surviving article with its accepted answers
    pub fn format_full(report: &ValidationReport) -> String {
        let mut output = Self::header(&format!("Validation: {}", report.category));
        output.push('\n');
        if report.is_empty() {
            output.push_str(&format!("\n{}\n", "No article matched every query.".yellow()));
        }
        for article in &report.articles {
            output.push_str(&format!(
                "\n{} {}\n",
                format!("── {} ──", article.title).green().bold(),
                format!("({})", article.id).dimmed()
            ));
            for (attribute, answers) in &article.answers {
                output.push_str(&format!(
                    "  {} {}\n",
                    format!("{}:", attribute).cyan(),
                    answers.join(", ")
                ));
            }
        }
        output.push_str(&Self::footer());
        output
    }

    /// Titles only (concise output)
    pub fn format_titles(report: &ValidationReport) -> String {
        let mut output = format!(
            "{} {}\n",
            "Matches:".cyan().bold(),
            report.articles.len()
        );
        for title in report.titles() {
            output.push_str(&format!("  * {}\n", title));
        }
        output
    }

    pub fn format_json(report: &ValidationReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
