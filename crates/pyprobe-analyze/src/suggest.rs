//! Style suggestions for a single function.

use crate::python::FunctionSyntax;
use crate::report::{Suggestion, SuggestionKind};

pub const DOCUMENTATION_MESSAGE: &str =
    "Add docstring to document function purpose and parameters";
pub const TYPE_HINTS_MESSAGE: &str =
    "Add type hints to improve code clarity and enable static type checking";

/// Suggest a docstring when there is none, and type hints when any positional
/// parameter is unannotated.
pub fn suggestions(function: &FunctionSyntax) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if function.docstring.is_none() {
        suggestions.push(Suggestion {
            kind: SuggestionKind::Documentation,
            message: DOCUMENTATION_MESSAGE.to_string(),
        });
    }

    if function.params.iter().any(|p| p.annotation.is_none()) {
        suggestions.push(Suggestion {
            kind: SuggestionKind::TypeHints,
            message: TYPE_HINTS_MESSAGE.to_string(),
        });
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::python::Param;

    fn function(docstring: Option<&str>, annotations: &[Option<&str>]) -> FunctionSyntax {
        FunctionSyntax {
            name: "f".to_string(),
            params: annotations
                .iter()
                .enumerate()
                .map(|(i, a)| Param {
                    name: format!("p{i}"),
                    annotation: a.map(str::to_string),
                    type_name: None,
                })
                .collect(),
            returns: None,
            docstring: docstring.map(str::to_string),
        }
    }

    fn kinds(f: &FunctionSyntax) -> Vec<SuggestionKind> {
        suggestions(f).into_iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_fully_documented_function() {
        assert!(kinds(&function(Some("doc"), &[Some("int")])).is_empty());
    }

    #[test]
    fn test_missing_docstring() {
        assert_eq!(
            kinds(&function(None, &[])),
            vec![SuggestionKind::Documentation]
        );
    }

    #[test]
    fn test_any_unannotated_param() {
        assert_eq!(
            kinds(&function(None, &[Some("int"), None])),
            vec![SuggestionKind::Documentation, SuggestionKind::TypeHints]
        );
    }

    #[test]
    fn test_complex_annotation_counts_as_annotated() {
        assert!(kinds(&function(Some("doc"), &[Some("List[int]")])).is_empty());
    }
}
