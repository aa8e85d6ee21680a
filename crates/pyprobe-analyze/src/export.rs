//! Export generated edge-case tests as a single Python module.

use crate::report::Analysis;

/// Default export format name.
pub const DEFAULT_FORMAT: &str = "pytest";

/// Test framework selected by the export format name.
///
/// Only the import line differs; test bodies are plain functions either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestFramework {
    Pytest,
    Unittest,
}

impl TestFramework {
    /// `pytest` selects pytest; any other name selects unittest.
    pub fn from_format(format: &str) -> Self {
        if format == DEFAULT_FORMAT {
            TestFramework::Pytest
        } else {
            TestFramework::Unittest
        }
    }

    pub fn import_line(&self) -> &'static str {
        match self {
            TestFramework::Pytest => "import pytest",
            TestFramework::Unittest => "import unittest",
        }
    }
}

/// Render every edge case of `analysis` into one test module.
pub fn render_test_module(analysis: &Analysis, format: &str) -> String {
    let mut out = String::new();
    out.push_str(TestFramework::from_format(format).import_line());
    out.push_str("\n\n");
    for case in analysis.edge_cases() {
        out.push_str(&case.code);
        out.push_str("\n\n");
    }
    out
}

/// Download file name for an export in `format`.
pub fn export_file_name(format: &str) -> String {
    format!("test_cases.{format}.py")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Analyzer;

    #[test]
    fn test_framework_selection() {
        assert_eq!(TestFramework::from_format("pytest"), TestFramework::Pytest);
        assert_eq!(TestFramework::from_format("unittest"), TestFramework::Unittest);
        assert_eq!(TestFramework::from_format("nose"), TestFramework::Unittest);
    }

    #[test]
    fn test_no_params_exports_only_import() {
        let analysis = Analyzer::new().analyze("def f():\n    return 1\n").unwrap();
        assert_eq!(render_test_module(&analysis, "pytest"), "import pytest\n\n");
    }

    #[test]
    fn test_unittest_import() {
        let analysis = Analyzer::new().analyze("def f(n: list):\n    return n\n").unwrap();
        let module = render_test_module(&analysis, "unittest");
        assert!(module.starts_with("import unittest\n\n"));
        assert_eq!(module.matches("def test_f_").count(), 3);
        assert!(module.ends_with("pass  # Handle expected exceptions\n\n"));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(export_file_name("pytest"), "test_cases.pytest.py");
    }
}
