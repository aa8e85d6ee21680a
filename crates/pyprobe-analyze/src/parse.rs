//! Tree-sitter based Python parsing.
//!
//! tree-sitter recovers from syntax errors by inserting `ERROR` and `MISSING`
//! nodes. The analyzer wants all-or-nothing parsing, so any such node turns
//! into an [`AnalyzeError`] pointing at the first offending position.
//!
//! The grammar is also more lenient than Python 3: it accepts Python 2
//! `print`/`exec` statements and defaulted parameters followed by plain ones.
//! Those are rejected after parsing.

use crate::error::AnalyzeError;
use tree_sitter::{Node, Parser, Tree};

/// Parse Python source, rejecting trees that contain recovered errors.
pub fn parse_python(source: &str) -> Result<Tree, AnalyzeError> {
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_python::language().into())
        .map_err(|err| AnalyzeError::Parse(err.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| AnalyzeError::Parse("failed to parse".into()))?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(first_error(root).unwrap_or(AnalyzeError::Syntax { line: 1, column: 1 }));
    }
    if let Some(err) = first_invalid(root) {
        return Err(err);
    }

    Ok(tree)
}

/// Locate the first `ERROR` or `MISSING` node in document order.
fn first_error(node: Node) -> Option<AnalyzeError> {
    let pos = node.start_position();
    if node.is_missing() {
        return Some(AnalyzeError::Missing {
            token: node.kind().to_string(),
            line: pos.row + 1,
            column: pos.column + 1,
        });
    }
    if node.is_error() {
        return Some(AnalyzeError::Syntax {
            line: pos.row + 1,
            column: pos.column + 1,
        });
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(err) = first_error(child) {
            return Some(err);
        }
    }
    None
}

/// Locate the first construct Python 3 rejects, in document order.
fn first_invalid(node: Node) -> Option<AnalyzeError> {
    let invalid = match node.kind() {
        "print_statement" => Some((node, "print statement")),
        "exec_statement" => Some((node, "exec statement")),
        "parameters" | "lambda_parameters" => non_default_after_default(&node)
            .map(|param| (param, "non-default argument follows default argument")),
        _ => None,
    };
    if let Some((at, construct)) = invalid {
        let pos = at.start_position();
        return Some(AnalyzeError::Invalid {
            construct,
            line: pos.row + 1,
            column: pos.column + 1,
        });
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if let Some(err) = first_invalid(child) {
            return Some(err);
        }
    }
    None
}

/// First plain positional parameter after a defaulted one. Keyword-only
/// parameters (after `*` or `*args`) may omit defaults.
fn non_default_after_default<'tree>(parameters: &Node<'tree>) -> Option<Node<'tree>> {
    let mut seen_default = false;
    let mut cursor = parameters.walk();
    for child in parameters.named_children(&mut cursor) {
        match child.kind() {
            "default_parameter" | "typed_default_parameter" => seen_default = true,
            "identifier" if seen_default => return Some(child),
            "typed_parameter" => {
                let splat = child
                    .named_child(0)
                    .is_some_and(|n| n.kind() != "identifier");
                if splat {
                    return None;
                }
                if seen_default {
                    return Some(child);
                }
            }
            "keyword_separator" | "list_splat_pattern" | "dictionary_splat_pattern" => {
                return None;
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_source() {
        let tree = parse_python("def f(x):\n    return x\n").unwrap();
        assert_eq!(tree.root_node().kind(), "module");
    }

    #[test]
    fn test_parse_empty_source() {
        assert!(parse_python("").is_ok());
    }

    #[test]
    fn test_parse_reports_error_position() {
        let err = parse_python("x = 1\ndef broken(:\n    pass\n").unwrap_err();
        match err {
            AnalyzeError::Syntax { line, .. } | AnalyzeError::Missing { line, .. } => {
                assert_eq!(line, 2)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_python2_statements_are_rejected() {
        for source in [
            "print \"hello\"",
            "exec \"x = 1\"",
            "print >>sys.stderr, \"x\"",
            "def f():\n    print \"hi\"\n",
        ] {
            match parse_python(source) {
                Err(AnalyzeError::Invalid { construct, .. }) => {
                    assert!(construct.ends_with("statement"), "{source:?}")
                }
                other => panic!("{source:?}: unexpected {other:?}"),
            }
        }
        assert!(parse_python("print(\"hello\")\n").is_ok());
    }

    #[test]
    fn test_non_default_after_default_is_rejected() {
        let err = parse_python("def f(a=1, b):\n    pass\n").unwrap_err();
        assert_eq!(
            err,
            AnalyzeError::Invalid {
                construct: "non-default argument follows default argument",
                line: 1,
                column: 12,
            }
        );
        assert!(parse_python("def f(a: int = 1, b: str):\n    pass\n").is_err());
        assert!(parse_python("g = lambda a=1, b: a\n").is_err());

        assert!(parse_python("def f(a, b=1, *args, c, **kw):\n    pass\n").is_ok());
        assert!(parse_python("def f(a=1, *, b):\n    pass\n").is_ok());
        assert!(parse_python("def f(a=1, /, b=2):\n    pass\n").is_ok());
    }

    #[test]
    fn test_error_message_is_not_empty() {
        let err = parse_python("def (").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
