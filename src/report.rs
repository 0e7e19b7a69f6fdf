/*!
 * Reporting functionality for digestfs
 *
 * Provides formatted console summaries of digest runs using the tabled
 * library for clean, consistent table rendering.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::render::ExtensionStats;
use crate::utils::{format_count, format_file_size};

/// Statistics for a digest run
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Output file path
    pub output_file: String,
    /// Time taken to scan and render
    pub duration: Duration,
    /// Number of files analyzed
    pub files_analyzed: usize,
    /// Combined size of the analyzed files in bytes
    pub total_size: u64,
    /// Token estimate for the artifact contents
    pub estimated_tokens: usize,
    /// Extension breakdown in artifact order
    pub extensions: Vec<(String, ExtensionStats)>,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
    // Other formats could be added in the future
    // JSON, HTML, etc.
}

/// Report generator for digest runs
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string based on run statistics
    pub fn generate_report(&self, report: &ScanReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
            // Additional formats could be added here
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &ScanReport) {
        println!("\n{}", self.generate_report(report));
    }

    // Create a summary table using the tabled crate
    fn create_summary_table(&self, report: &ScanReport) -> String {
        // Define the summary table data structure
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let rows = vec![
            SummaryRow {
                key: "📂 Output File".to_string(),
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📄 Files Analyzed".to_string(),
                value: format_count(report.files_analyzed),
            },
            SummaryRow {
                key: "💾 Total Size".to_string(),
                value: format_file_size(report.total_size),
            },
            SummaryRow {
                key: "📦 LLM Tokens".to_string(),
                value: format!(
                    "{} tokens (estimated)",
                    format_count(report.estimated_tokens)
                ),
            },
        ];

        // Create and style the table
        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    // Create an extensions table using the tabled crate
    fn create_extensions_table(&self, report: &ScanReport) -> String {
        // Define the extensions table data structure
        #[derive(Tabled)]
        struct ExtensionRow {
            #[tabled(rename = "Extension")]
            extension: String,

            #[tabled(rename = "Files")]
            files: String,

            #[tabled(rename = "Lines")]
            lines: String,
        }

        let rows: Vec<ExtensionRow> = report
            .extensions
            .iter()
            .map(|(extension, stats)| ExtensionRow {
                extension: extension.clone(),
                files: format_count(stats.files),
                lines: format_count(stats.lines),
            })
            .collect();

        // Create and style the table
        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    // Generate a console table report
    fn generate_console_report(&self, report: &ScanReport) -> String {
        let extensions_table = self.create_extensions_table(report);
        let summary_table = self.create_summary_table(report);

        let extensions_title = "📋  FILES BY EXTENSION";
        let summary_title = "✅  DIGEST COMPLETE";

        // Extension detail first, run summary last
        format!(
            "{}\n{}\n\n{}\n{}",
            extensions_title, extensions_table, summary_title, summary_table
        )
    }
}
