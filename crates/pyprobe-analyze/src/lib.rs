//! Python snippet analysis.
//!
//! `pyprobe-analyze` takes a snippet of Python source and reports, for every
//! function definition, its parameters and annotations, its cyclomatic
//! complexity, style suggestions, and generated edge-case test skeletons.
//!
//! # Pipeline
//!
//! ```text
//! source ─> parse ─┬─> complexity blocks ─────────────┐
//!                  ├─> halstead totals (logged)       │
//!                  └─> function walk ─> FunctionInfo ─┴─> Analysis
//!                         ├─ args / returns
//!                         ├─ suggestions
//!                         └─ edge cases
//! ```
//!
//! # Example
//!
//! ```ignore
//! use pyprobe_analyze::{Analyzer, AnalysisReport};
//!
//! let report = AnalysisReport::from(Analyzer::new().analyze("def f(x: int):\n    return x\n"));
//! assert!(report.success);
//! ```

pub mod complexity;
pub mod edge_cases;
pub mod error;
pub mod export;
pub mod halstead;
pub mod parse;
pub mod python;
pub mod report;
pub mod suggest;

pub use complexity::{BlockKind, ComplexityBlock};
pub use error::AnalyzeError;
pub use export::{TestFramework, export_file_name, render_test_module};
pub use halstead::HalsteadMetrics;
pub use report::{
    Analysis, AnalysisReport, ArgInfo, ComplexityRank, EdgeCase, EdgeCategory, FunctionInfo,
    Metrics, Outcome, Suggestion, SuggestionKind,
};

use python::FunctionSyntax;
use tracing::{debug, trace};

/// Sentinel type for missing or non-trivial annotations.
pub const ANY_TYPE: &str = "Any";

/// Stateless analyzer; one call per snippet.
pub struct Analyzer {}

impl Analyzer {
    pub fn new() -> Self {
        Self {}
    }

    pub fn analyze(&self, code: &str) -> Result<Analysis, AnalyzeError> {
        let tree = parse::parse_python(code)?;
        let root = tree.root_node();

        let blocks = complexity::complexity_blocks(root, code);
        let halstead = halstead::halstead(root, code);
        for block in &blocks {
            trace!(
                name = %block.name,
                kind = ?block.kind,
                classname = block.classname.as_deref(),
                line = block.line,
                complexity = block.complexity,
                "complexity block"
            );
        }
        debug!(
            blocks = blocks.len(),
            volume = halstead.volume,
            difficulty = halstead.difficulty,
            "computed snippet metrics"
        );

        let functions: Vec<FunctionInfo> = python::function_definitions(root, code)
            .iter()
            .filter_map(|node| FunctionSyntax::from_node(node, code))
            .map(|syntax| Self::function_info(&syntax, &blocks))
            .collect();

        let total_complexity: usize = blocks.iter().map(|b| b.complexity).sum();
        let metrics = Metrics {
            total_complexity,
            total_lines: count_lines(code),
            complexity_rank: ComplexityRank::from_total(total_complexity),
        };
        debug!(
            functions = functions.len(),
            total_complexity,
            rank = metrics.complexity_rank.as_str(),
            "analyzed snippet"
        );

        Ok(Analysis {
            functions,
            metrics,
            halstead,
        })
    }

    fn function_info(syntax: &FunctionSyntax, blocks: &[ComplexityBlock]) -> FunctionInfo {
        let args: Vec<ArgInfo> = syntax
            .params
            .iter()
            .map(|p| ArgInfo {
                name: p.name.clone(),
                type_name: p.type_name.clone().unwrap_or_else(|| ANY_TYPE.to_string()),
            })
            .collect();

        FunctionInfo {
            name: syntax.name.clone(),
            returns: syntax
                .returns
                .clone()
                .unwrap_or_else(|| ANY_TYPE.to_string()),
            complexity: complexity::lookup(blocks, &syntax.name)
                .map(|b| b.complexity)
                .unwrap_or(0),
            suggestions: suggest::suggestions(syntax),
            edge_cases: edge_cases::synthesize(&syntax.name, &args),
            args,
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Line breaks plus one; the empty string is one line.
fn count_lines(code: &str) -> usize {
    code.matches('\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(""), 1);
        assert_eq!(count_lines("x = 1"), 1);
        assert_eq!(count_lines("x = 1\n"), 2);
        assert_eq!(count_lines("a\n\n\nb"), 4);
    }

    #[test]
    fn test_unknown_complexity_defaults_to_zero() {
        // Closures are not complexity blocks.
        let analysis = Analyzer::new()
            .analyze("def outer():\n    def inner():\n        pass\n    return inner\n")
            .unwrap();
        let inner = analysis.functions.iter().find(|f| f.name == "inner").unwrap();
        assert_eq!(inner.complexity, 0);
    }
}
