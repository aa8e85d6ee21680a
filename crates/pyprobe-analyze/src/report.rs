//! Report types returned by the analyzer.

use crate::error::AnalyzeError;
use crate::halstead::HalsteadMetrics;
use serde::Serialize;

/// Complexity classification for a whole snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, schemars::JsonSchema)]
pub enum ComplexityRank {
    /// Total complexity below 10
    Low,
    /// 10-19
    Medium,
    /// 20 and above
    High,
}

impl ComplexityRank {
    pub fn from_total(total: usize) -> Self {
        match total {
            0..10 => ComplexityRank::Low,
            10..20 => ComplexityRank::Medium,
            _ => ComplexityRank::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityRank::Low => "Low",
            ComplexityRank::Medium => "Medium",
            ComplexityRank::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Documentation,
    TypeHints,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, schemars::JsonSchema)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EdgeCategory {
    Boundary,
    Edge,
}

impl EdgeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeCategory::Boundary => "boundary",
            EdgeCategory::Edge => "edge",
        }
    }
}

/// A generated test skeleton for one parameter/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, schemars::JsonSchema)]
pub struct EdgeCase {
    pub category: EdgeCategory,
    pub description: String,
    /// Generated Python test function source.
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, schemars::JsonSchema)]
pub struct ArgInfo {
    pub name: String,
    /// Bare annotation identifier, or `Any`.
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Per-function analysis data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, schemars::JsonSchema)]
pub struct FunctionInfo {
    pub name: String,
    pub args: Vec<ArgInfo>,
    pub returns: String,
    pub complexity: usize,
    pub suggestions: Vec<Suggestion>,
    pub edge_cases: Vec<EdgeCase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, schemars::JsonSchema)]
pub struct Metrics {
    pub total_complexity: usize,
    pub total_lines: usize,
    pub complexity_rank: ComplexityRank,
}

/// Result of a successful analysis.
#[derive(Debug, Clone, Serialize, schemars::JsonSchema)]
pub struct Analysis {
    pub functions: Vec<FunctionInfo>,
    pub metrics: Metrics,
    /// Volume metrics; computed alongside complexity but not part of the
    /// wire report.
    #[serde(skip)]
    pub halstead: HalsteadMetrics,
}

impl Analysis {
    /// Every generated edge case, in function then parameter order.
    pub fn edge_cases(&self) -> impl Iterator<Item = &EdgeCase> {
        self.functions.iter().flat_map(|f| f.edge_cases.iter())
    }
}

/// Wire shape of an analysis: `{"success": true, functions, metrics}` or
/// `{"success": false, "error": ...}`.
#[derive(Debug, Clone, Serialize, schemars::JsonSchema)]
pub struct AnalysisReport {
    pub success: bool,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Serialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum Outcome {
    Analysis(Analysis),
    Failure { error: String },
}

impl AnalysisReport {
    pub fn analysis(&self) -> Option<&Analysis> {
        match &self.outcome {
            Outcome::Analysis(analysis) => Some(analysis),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Analysis(_) => None,
            Outcome::Failure { error } => Some(error),
        }
    }
}

impl From<Result<Analysis, AnalyzeError>> for AnalysisReport {
    fn from(result: Result<Analysis, AnalyzeError>) -> Self {
        match result {
            Ok(analysis) => AnalysisReport {
                success: true,
                outcome: Outcome::Analysis(analysis),
            },
            Err(err) => AnalysisReport {
                success: false,
                outcome: Outcome::Failure {
                    error: err.to_string(),
                },
            },
        }
    }
}
