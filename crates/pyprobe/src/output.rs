//! Output formatting for CLI commands.
//!
//! Provides consistent JSON/text output via the `OutputFormatter` trait.

use pyprobe_analyze::{AnalysisReport, EdgeCategory, FunctionInfo};
use serde::Serialize;
use std::io::IsTerminal;

/// Output format and display mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Compact text output (no colors).
    #[default]
    Compact,
    /// Pretty text output (human-friendly, with colors if available).
    Pretty { colors: bool },
    /// JSON output, same shape as the HTTP API.
    Json,
}

impl OutputFormat {
    /// Create from CLI flags. JSON takes precedence over pretty.
    pub fn from_cli(json: bool, pretty: bool) -> Self {
        if json {
            OutputFormat::Json
        } else if pretty {
            OutputFormat::Pretty {
                colors: use_colors(),
            }
        } else {
            OutputFormat::Compact
        }
    }
}

/// Colors only on a terminal, and never with NO_COLOR set.
fn use_colors() -> bool {
    std::env::var("NO_COLOR").is_err() && std::io::stdout().is_terminal()
}

pub trait OutputFormatter: Serialize + schemars::JsonSchema {
    /// Format as minimal text (default).
    fn format_text(&self) -> String;

    /// Format as pretty text (human-friendly with colors).
    /// Default implementation falls back to format_text().
    fn format_pretty(&self) -> String {
        self.format_text()
    }

    /// Render in the specified format.
    fn render(&self, format: &OutputFormat) -> String {
        match format {
            OutputFormat::Compact => self.format_text(),
            OutputFormat::Pretty { colors: true } => self.format_pretty(),
            OutputFormat::Pretty { colors: false } => self.format_text(),
            OutputFormat::Json => serde_json::to_string_pretty(self).unwrap_or_default(),
        }
    }

    /// Print to stdout in the specified format.
    fn print(&self, format: &OutputFormat) {
        println!("{}", self.render(format));
    }
}

fn case_counts(func: &FunctionInfo) -> (usize, usize) {
    let boundary = func
        .edge_cases
        .iter()
        .filter(|c| c.category == EdgeCategory::Boundary)
        .count();
    (boundary, func.edge_cases.len() - boundary)
}

fn signature(func: &FunctionInfo) -> String {
    let args: Vec<String> = func
        .args
        .iter()
        .map(|a| format!("{}: {}", a.name, a.type_name))
        .collect();
    format!("{}({}) -> {}", func.name, args.join(", "), func.returns)
}

impl OutputFormatter for AnalysisReport {
    fn format_text(&self) -> String {
        let Some(analysis) = self.analysis() else {
            return format!("Analysis failed: {}", self.error().unwrap_or_default());
        };

        let mut lines = Vec::new();
        lines.push("# Snippet Analysis".to_string());
        lines.push(String::new());
        lines.push(format!("Functions: {}", analysis.functions.len()));
        lines.push(format!(
            "Total complexity: {} ({})",
            analysis.metrics.total_complexity,
            analysis.metrics.complexity_rank.as_str()
        ));
        lines.push(format!("Lines: {}", analysis.metrics.total_lines));
        lines.push(format!("Halstead volume: {:.1}", analysis.halstead.volume));

        for func in &analysis.functions {
            lines.push(String::new());
            lines.push(format!("## {}", signature(func)));
            lines.push(format!("Complexity: {}", func.complexity));
            for suggestion in &func.suggestions {
                lines.push(format!("- {}", suggestion.message));
            }
            let (boundary, edge) = case_counts(func);
            lines.push(format!("Edge cases: {boundary} boundary, {edge} edge"));
        }

        lines.join("\n")
    }

    fn format_pretty(&self) -> String {
        use nu_ansi_term::{Color, Style};

        let Some(analysis) = self.analysis() else {
            return format!(
                "{}: {}",
                Color::Red.bold().paint("Analysis failed"),
                self.error().unwrap_or_default()
            );
        };

        let rank = analysis.metrics.complexity_rank.as_str();
        let rank_color = match rank {
            "High" => Color::Red,
            "Medium" => Color::Yellow,
            _ => Color::Green,
        };

        let mut lines = Vec::new();
        lines.push(Style::new().bold().paint("Snippet Analysis").to_string());
        lines.push(String::new());
        lines.push(format!(
            "{}: {}",
            Style::new().bold().paint("Functions"),
            analysis.functions.len()
        ));
        lines.push(format!(
            "{}: {} ({})",
            Style::new().bold().paint("Total complexity"),
            analysis.metrics.total_complexity,
            rank_color.bold().paint(rank)
        ));
        lines.push(format!(
            "{}: {}",
            Style::new().bold().paint("Lines"),
            analysis.metrics.total_lines
        ));
        lines.push(format!(
            "{}: {:.1}",
            Style::new().bold().paint("Halstead volume"),
            analysis.halstead.volume
        ));

        for func in &analysis.functions {
            lines.push(String::new());
            lines.push(Color::Cyan.bold().paint(signature(func)).to_string());
            lines.push(format!("  complexity {}", func.complexity));
            for suggestion in &func.suggestions {
                lines.push(format!(
                    "  {} {}",
                    Color::Yellow.paint("hint:"),
                    suggestion.message
                ));
            }
            let (boundary, edge) = case_counts(func);
            lines.push(format!(
                "  {} {boundary} boundary, {edge} edge",
                Style::new().dimmed().paint("edge cases:")
            ));
        }

        lines.join("\n")
    }
}
