//! Python syntax helpers over the tree-sitter CST.
//!
//! Everything here is shallow and textual: annotations are read as written,
//! never resolved.

use tree_sitter::Node;

/// Node kinds that are their own node in Python's abstract syntax tree and can
/// (transitively) contain a `def`. Used to recover AST depth from the CST,
/// where wrappers like `block` or `decorated_definition` add extra levels.
const AST_SCOPE_KINDS: &[&str] = &[
    "function_definition",
    "class_definition",
    "if_statement",
    "elif_clause",
    "for_statement",
    "while_statement",
    "try_statement",
    "except_clause",
    "except_group_clause",
    "with_statement",
    "match_statement",
    "case_clause",
];

/// A positional parameter of a function definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    /// Annotation source text, if any.
    pub annotation: Option<String>,
    /// Annotation text when it is a single bare identifier.
    pub type_name: Option<String>,
}

/// The parts of a `def` the analyzer cares about.
#[derive(Debug, Clone)]
pub struct FunctionSyntax {
    pub name: String,
    pub params: Vec<Param>,
    /// Return annotation when it is a single bare identifier.
    pub returns: Option<String>,
    pub docstring: Option<String>,
}

impl FunctionSyntax {
    pub fn from_node(node: &Node, content: &str) -> Option<Self> {
        if node.kind() != "function_definition" {
            return None;
        }
        let name = node_name(node, content)?;
        let params = node
            .child_by_field_name("parameters")
            .map(|p| positional_params(&p, content))
            .unwrap_or_default();
        let returns = node
            .child_by_field_name("return_type")
            .and_then(|r| simple_type_name(&r, content))
            .map(str::to_string);

        Some(Self {
            name: name.to_string(),
            params,
            returns,
            docstring: extract_docstring(node, content),
        })
    }
}

pub fn node_text<'a>(node: &Node, content: &'a str) -> &'a str {
    &content[node.byte_range()]
}

pub fn node_name<'a>(node: &Node, content: &'a str) -> Option<&'a str> {
    let name_node = node.child_by_field_name("name")?;
    Some(node_text(&name_node, content))
}

/// `async def` is a `function_definition` whose first token is `async`.
pub fn is_async(node: &Node, content: &str) -> bool {
    node.child(0)
        .map(|c| node_text(&c, content) == "async")
        .unwrap_or(false)
}

/// Collect plain positional-or-keyword parameters.
///
/// Positional-only parameters (before `/`), keyword-only parameters (after
/// `*` or `*args`) and the splats themselves are not included.
pub fn positional_params(parameters: &Node, content: &str) -> Vec<Param> {
    let mut params = Vec::new();
    let mut cursor = parameters.walk();

    for child in parameters.named_children(&mut cursor) {
        match child.kind() {
            "positional_separator" => params.clear(),
            "keyword_separator" | "list_splat_pattern" | "dictionary_splat_pattern" => break,
            "identifier" => params.push(Param {
                name: node_text(&child, content).to_string(),
                annotation: None,
                type_name: None,
            }),
            "default_parameter" => {
                if let Some(name) = child
                    .child_by_field_name("name")
                    .filter(|n| n.kind() == "identifier")
                {
                    params.push(Param {
                        name: node_text(&name, content).to_string(),
                        annotation: None,
                        type_name: None,
                    });
                }
            }
            "typed_parameter" => {
                let Some(name) = child.named_child(0) else {
                    continue;
                };
                if name.kind() != "identifier" {
                    // `*args: T` / `**kwargs: T`
                    break;
                }
                params.push(annotated_param(&child, node_text(&name, content), content));
            }
            "typed_default_parameter" => {
                if let Some(name) = child.child_by_field_name("name") {
                    params.push(annotated_param(&child, node_text(&name, content), content));
                }
            }
            _ => {}
        }
    }

    params
}

fn annotated_param(node: &Node, name: &str, content: &str) -> Param {
    let ty = node.child_by_field_name("type");
    Param {
        name: name.to_string(),
        annotation: ty.map(|t| node_text(&t, content).to_string()),
        type_name: ty
            .and_then(|t| simple_type_name(&t, content))
            .map(str::to_string),
    }
}

/// The identifier of an annotation, if the annotation is exactly one bare name.
///
/// Subscripts, attribute access, unions, strings and `None` all yield `None`.
pub fn simple_type_name<'a>(node: &Node, content: &'a str) -> Option<&'a str> {
    match node.kind() {
        "identifier" => Some(node_text(node, content)),
        "type" if node.named_child_count() == 1 => {
            let inner = node.named_child(0)?;
            (inner.kind() == "identifier").then(|| node_text(&inner, content))
        }
        _ => None,
    }
}

/// Extract a function's docstring, cleaned of surrounding whitespace.
///
/// Only a plain string literal as the first statement counts; bytes and
/// f-strings do not. An all-whitespace docstring is reported as absent.
pub fn extract_docstring(node: &Node, content: &str) -> Option<String> {
    let body = node.child_by_field_name("body")?;
    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|c| c.kind() != "comment")?;

    // Handle both grammar versions:
    // - expression_statement > string
    // - string directly
    let literal = match first.kind() {
        "string" | "concatenated_string" => first,
        "expression_statement" if first.named_child_count() == 1 => first
            .named_child(0)
            .filter(|n| matches!(n.kind(), "string" | "concatenated_string"))?,
        _ => return None,
    };

    let mut text = String::new();
    if literal.kind() == "concatenated_string" {
        let mut cursor = literal.walk();
        for part in literal.named_children(&mut cursor) {
            if part.kind() == "string" {
                text.push_str(&plain_string_content(&part, content)?);
            }
        }
    } else {
        text = plain_string_content(&literal, content)?;
    }

    let doc = text.trim();
    if doc.is_empty() {
        None
    } else {
        Some(doc.to_string())
    }
}

/// Contents of a `str` literal, or `None` for bytes and f-strings.
fn plain_string_content(string: &Node, content: &str) -> Option<String> {
    let mut text = String::new();
    let mut raw = false;
    let mut cursor = string.walk();
    for child in string.children(&mut cursor) {
        match child.kind() {
            "string_start" => {
                let prefix = node_text(&child, content).to_ascii_lowercase();
                if prefix.contains('b') || prefix.contains('f') {
                    return None;
                }
                raw = prefix.contains('r');
            }
            "string_content" => text.push_str(node_text(&child, content)),
            "escape_sequence" if raw => text.push_str(node_text(&child, content)),
            "escape_sequence" => text.push_str(&decode_escape(node_text(&child, content))),
            "interpolation" => return None,
            _ => {}
        }
    }
    Some(text)
}

/// Decode the simple escapes; anything else is kept as written.
fn decode_escape(escape: &str) -> String {
    match escape {
        "\\n" => "\n".to_string(),
        "\\t" => "\t".to_string(),
        "\\r" => "\r".to_string(),
        "\\f" => "\x0c".to_string(),
        "\\v" => "\x0b".to_string(),
        "\\\\" => "\\".to_string(),
        "\\'" => "'".to_string(),
        "\\\"" => "\"".to_string(),
        _ if escape.starts_with("\\\n") || escape.starts_with("\\\r") => String::new(),
        _ => escape.to_string(),
    }
}

/// Every synchronous `def` in the tree, in breadth-first order.
///
/// Python's own tree walk is breadth-first over the abstract syntax tree, so
/// nested definitions come after every definition at a shallower level. Depth
/// is counted in AST nodes (see [`AST_SCOPE_KINDS`]), ties broken by source
/// position.
pub fn function_definitions<'tree>(root: Node<'tree>, content: &str) -> Vec<Node<'tree>> {
    let mut found = Vec::new();
    collect_functions(root, content, 0, &mut found);
    found.sort_by_key(|(depth, node)| (*depth, node.start_byte()));
    found.into_iter().map(|(_, node)| node).collect()
}

fn collect_functions<'tree>(
    node: Node<'tree>,
    content: &str,
    depth: usize,
    out: &mut Vec<(usize, Node<'tree>)>,
) {
    let kind = node.kind();
    if kind == "function_definition" && !is_async(&node, content) {
        out.push((depth, node));
    }
    let child_depth = if AST_SCOPE_KINDS.contains(&kind) {
        depth + 1
    } else {
        depth
    };
    let mut cursor = node.walk();
    if kind == "if_statement" {
        // Each `elif` nests one level inside the previous branch, and a
        // trailing `else` belongs to the last `elif`.
        let mut branch_depth = child_depth;
        for child in node.named_children(&mut cursor) {
            let depth = match child.kind() {
                "elif_clause" => {
                    branch_depth += 1;
                    branch_depth - 1
                }
                "else_clause" => branch_depth,
                _ => child_depth,
            };
            collect_functions(child, content, depth, out);
        }
        return;
    }
    for child in node.named_children(&mut cursor) {
        collect_functions(child, content, child_depth, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_python;

    fn first_function(content: &str) -> FunctionSyntax {
        let tree = parse_python(content).unwrap();
        let node = function_definitions(tree.root_node(), content)[0];
        FunctionSyntax::from_node(&node, content).unwrap()
    }

    fn names(content: &str) -> Vec<String> {
        let tree = parse_python(content).unwrap();
        function_definitions(tree.root_node(), content)
            .iter()
            .filter_map(|n| node_name(n, content).map(str::to_string))
            .collect()
    }

    #[test]
    fn test_simple_annotations() {
        let f = first_function("def foo(x: int, y, z: List[int]) -> str:\n    pass\n");
        assert_eq!(f.name, "foo");
        assert_eq!(f.returns.as_deref(), Some("str"));
        let types: Vec<_> = f.params.iter().map(|p| p.type_name.as_deref()).collect();
        assert_eq!(types, vec![Some("int"), None, None]);
        assert_eq!(f.params[2].annotation.as_deref(), Some("List[int]"));
        assert_eq!(f.params[1].annotation, None);
    }

    #[test]
    fn test_complex_return_annotation_is_not_resolved() {
        let f = first_function("def foo() -> typing.Optional[int]:\n    pass\n");
        assert_eq!(f.returns, None);
        let f = first_function("def foo() -> None:\n    pass\n");
        assert_eq!(f.returns, None);
    }

    #[test]
    fn test_positional_params_skip_special_kinds() {
        let f = first_function(
            "def f(a, /, b, c: int = 1, d=2, *args, e, **kw):\n    pass\n",
        );
        let params: Vec<_> = f.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(params, vec!["b", "c", "d"]);
        assert_eq!(f.params[1].type_name.as_deref(), Some("int"));

        let f = first_function("def f(a, *, b):\n    pass\n");
        assert_eq!(f.params.len(), 1);
    }

    #[test]
    fn test_docstring_detection() {
        let f = first_function("def f():\n    \"\"\"Does things.\"\"\"\n    return 1\n");
        assert_eq!(f.docstring.as_deref(), Some("Does things."));

        let f = first_function("def f():\n    x = \"not a docstring\"\n");
        assert_eq!(f.docstring, None);

        let f = first_function("def f():\n    b\"bytes\"\n");
        assert_eq!(f.docstring, None);

        let f = first_function("def f():\n    f\"{x}\"\n");
        assert_eq!(f.docstring, None);

        let f = first_function("def f():\n    \"   \"\n");
        assert_eq!(f.docstring, None);

        let f = first_function("def f(x: int):\n    \"\"\"\\n\"\"\"\n");
        assert_eq!(f.docstring, None);

        let f = first_function("def f():\n    \"\\tTabbed.\\n\"\n");
        assert_eq!(f.docstring.as_deref(), Some("Tabbed."));

        let f = first_function("def f():\n    r\"\\n\"\n");
        assert_eq!(f.docstring.as_deref(), Some("\\n"));
    }

    #[test]
    fn test_async_functions_are_not_listed() {
        assert_eq!(
            names("async def a():\n    def inner():\n        pass\n\ndef b():\n    pass\n"),
            vec!["b", "inner"]
        );
    }

    #[test]
    fn test_breadth_first_order() {
        let content = "\
def outer():
    def inner():
        pass

class C:
    def method(self):
        pass

def later():
    pass
";
        assert_eq!(names(content), vec!["outer", "later", "inner", "method"]);
    }

    #[test]
    fn test_decorated_function_depth() {
        let content = "\
@decorator
def a():
    pass

if flag:
    def b():
        pass
elif other:
    def c():
        pass
";
        assert_eq!(names(content), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_elif_chain_depth() {
        let content = "\
if a:
    pass
elif b:
    def x():
        pass
else:
    def y():
        pass
";
        assert_eq!(names(content), vec!["x", "y"]);

        let content = "\
if a:
    pass
elif b:
    pass
elif c:
    def z():
        pass

def g():
    def h():
        def k():
            pass
";
        assert_eq!(names(content), vec!["g", "h", "k", "z"]);
    }

    #[test]
    fn test_else_without_elif_is_branch_depth() {
        let content = "\
if a:
    def x():
        pass
else:
    def y():
        pass

def g():
    def h():
        pass
";
        assert_eq!(names(content), vec!["g", "x", "y", "h"]);
    }
}
