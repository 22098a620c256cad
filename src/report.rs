//! Console report. [`render`] is a pure function of the computed statistics,
//! so the wording can be tested without running the pipeline.

use std::fmt::Write as _;
use std::path::PathBuf;

use crate::data::model::RecordTable;
use crate::stats::grouping::GroupMean;
use crate::stats::missing::{DatasetOverview, MissingReport};

/// Preview cells longer than this are cut.
const PREVIEW_CELL_WIDTH: usize = 24;

const RECOMMENDATIONS: [&str; 8] = [
    "Strategic advice for the marketing team based on analysis results.",
    "Suggestions for crafting engaging Facebook posts.",
    "Analyze the correlation between different post types (e.g., link, photo, video) and their respective interaction rates. Allocate more resources to post types that have shown higher interaction rates.",
    "Experiment with different content formats (e.g., images, videos, text posts) to see which ones resonate best with the audience. Use A/B testing to compare engagement metrics across different content formats.",
    "Encourage user-generated content (UGC) by running contests, polls, or user submissions. UGC often leads to higher engagement as it fosters community participation and ownership.",
    "Leverage trending topics, events, or holidays to create timely and relevant content. Monitor social media trends and adapt your content strategy accordingly to capitalize on current interests.",
    "Invest in paid advertising to promote high-performing posts and reach a broader audience. Use targeting options to ensure that ads are shown to users who are most likely to engage with the content.",
    "Continuously monitor and analyze key performance metrics to track the effectiveness of your content strategy. Regularly iterate and optimize your approach based on data-driven insights.",
];

/// Row counts after each stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageCounts {
    pub loaded: usize,
    pub cleaned: usize,
    pub selected: usize,
    pub engineered: usize,
}

/// Everything the console report shows.
#[derive(Debug, Clone)]
pub struct Report {
    pub overview: DatasetOverview,
    pub missing_before: MissingReport,
    pub missing_after: MissingReport,
    pub counts: StageCounts,
    pub duplicates_removed: usize,
    pub rows_dropped: usize,
    pub unparsed_dates: usize,
    pub selected_columns: Vec<String>,
    pub selected_preview: RecordTable,
    pub new_features: Vec<String>,
    pub engineered_preview: RecordTable,
    pub correlation_ranking: Vec<(String, Option<f64>)>,
    pub interaction_by_type: Vec<GroupMean>,
    pub output_path: PathBuf,
}

/// Format the full report. Section order is fixed.
pub fn render(report: &Report) -> String {
    let mut out = String::new();
    overview_section(&mut out, report);
    processing_section(&mut out, report);
    methodology_section(&mut out);
    insights_section(&mut out, report);
    recommendations_section(&mut out);
    let _ = writeln!(out, "\nProcessed data written to {}", report.output_path.display());
    out
}

fn overview_section(out: &mut String, report: &Report) {
    let _ = writeln!(out, "1. Dataset Overview:");
    let _ = writeln!(out, "- Size of Dataset:");
    let _ = writeln!(out, "  Total entries: {}", report.overview.rows);
    let _ = writeln!(out, "  Total variables: {}", report.overview.columns.len());
    let _ = writeln!(out, "\n- Features:");
    let _ = writeln!(out, "{}", list(&report.overview.columns));
    let _ = writeln!(out, "\n- Missing Values:");
    missing_counts(out, &report.missing_before);
    let _ = writeln!(out, "\n- Percentage of Missing Values:");
    missing_percentages(out, &report.missing_before);
}

fn processing_section(out: &mut String, report: &Report) {
    let _ = writeln!(out, "\n2. Data Processing:");
    let _ = writeln!(out, "- Cleaning Steps:");
    let _ = writeln!(
        out,
        "  - Duplicates Removed: {} ({} rows remain).",
        report.duplicates_removed, report.counts.cleaned
    );
    let _ = writeln!(
        out,
        "  - Missing Values Handled: {} missing cells remain across {} columns.",
        report.missing_after.total(),
        report.missing_after.columns.len()
    );
    let _ = writeln!(out, "\n- Missing Values After Cleaning:");
    missing_percentages(out, &report.missing_after);

    let _ = writeln!(out);
    out.push_str(&preview(&report.selected_preview));
    let _ = writeln!(out, "Selected Features:");
    let _ = writeln!(out, "{}", list(&report.selected_columns));
    let _ = writeln!(out, "\nNew Features:");
    let _ = writeln!(out, "- Feature Engineering:");
    let _ = writeln!(out, "  - New Features Calculated:");
    for feature in &report.new_features {
        let _ = writeln!(out, "    - {feature}");
    }
    let _ = writeln!(
        out,
        "  - Rows dropped for missing interactions or followers: {}",
        report.rows_dropped
    );
    if report.unparsed_dates > 0 {
        let _ = writeln!(
            out,
            "  - Creation dates that could not be parsed: {}",
            report.unparsed_dates
        );
    }
    let _ = writeln!(out);
    out.push_str(&preview(&report.engineered_preview));
}

fn methodology_section(out: &mut String) {
    let _ = writeln!(out, "\n3. Analytical Methodology:");
    let _ = writeln!(
        out,
        "- Analysis Tools: This analysis was performed in Rust, reading and writing delimited data with csv, decoding with encoding_rs and parsing timestamps with chrono."
    );
    let _ = writeln!(
        out,
        "- Model Selection: Linear regression and other statistical models can be considered for evaluating the data, depending on the specific analysis goals and assumptions."
    );
    let _ = writeln!(
        out,
        "- Visualizations: The distribution of the engagement ratio is shown as a histogram with a kernel density curve, drawn with egui_plot."
    );
}

fn insights_section(out: &mut String, report: &Report) {
    let _ = writeln!(out, "\nKey Insights:");
    let _ = writeln!(out, "- Features ranked by correlation with Total Interactions:");
    let width = report
        .correlation_ranking
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);
    for (name, r) in &report.correlation_ranking {
        let _ = writeln!(out, "  {name:<width$}  {}", number(*r));
    }

    let _ = writeln!(
        out,
        "- Identification of post types, topics, or content that tend to receive higher interaction rates:"
    );
    let width = report
        .interaction_by_type
        .iter()
        .map(|g| g.key.chars().count())
        .max()
        .unwrap_or(0)
        .max("Type".len());
    let _ = writeln!(out, "  {:<width$}  Interaction Rate", "Type");
    for group in &report.interaction_by_type {
        let _ = writeln!(out, "  {:<width$}  {}", group.key, number(group.mean));
    }
}

fn recommendations_section(out: &mut String) {
    let _ = writeln!(out, "\nRecommendations:");
    for line in RECOMMENDATIONS {
        let _ = writeln!(out, "- {line}");
    }
}

// -- helpers --

fn list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| format!("'{s}'")).collect();
    format!("[{}]", quoted.join(", "))
}

fn number(v: Option<f64>) -> String {
    v.map_or_else(|| "NaN".to_owned(), |v| format!("{v:.6}"))
}

fn missing_counts(out: &mut String, missing: &MissingReport) {
    let width = name_width(missing);
    for c in &missing.columns {
        let _ = writeln!(out, "  {:<width$}  {}", c.column, c.count);
    }
}

fn missing_percentages(out: &mut String, missing: &MissingReport) {
    let width = name_width(missing);
    for c in &missing.columns {
        let _ = writeln!(out, "  {:<width$}  {:.2}%", c.column, c.pct);
    }
}

fn name_width(missing: &MissingReport) -> usize {
    missing
        .columns
        .iter()
        .map(|c| c.column.chars().count())
        .max()
        .unwrap_or(0)
}

/// Render the first rows of a table as aligned text, with a row number column.
pub fn preview(table: &RecordTable) -> String {
    let header: Vec<String> = table.columns().iter().map(|c| clip(c)).collect();
    let cells: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| row.iter().map(|v| clip(&v.to_string())).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let index_width = table.height().saturating_sub(1).to_string().len();

    let mut out = String::new();
    let _ = write!(out, "{:index_width$}", "");
    for (h, w) in header.iter().zip(&widths) {
        let _ = write!(out, "  {h:>w$}");
    }
    let _ = writeln!(out);
    for (i, row) in cells.iter().enumerate() {
        let _ = write!(out, "{i:<index_width$}");
        for (cell, w) in row.iter().zip(&widths) {
            let _ = write!(out, "  {cell:>w$}");
        }
        let _ = writeln!(out);
    }
    out
}

fn clip(s: &str) -> String {
    let s = s.replace(['\n', '\r'], " ");
    if s.chars().count() <= PREVIEW_CELL_WIDTH {
        s
    } else {
        let cut: String = s.chars().take(PREVIEW_CELL_WIDTH - 3).collect();
        format!("{cut}...")
    }
}
