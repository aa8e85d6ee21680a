//! Block-based cyclomatic complexity.
//!
//! A block is a function, a class, or a method. Each block starts at 1 and
//! gains one per decision point in its own body; nested definitions are scored
//! on their own (or not at all, for closures and inner classes) and never
//! leak into the enclosing block.

use crate::python::{node_name, node_text};
use serde::Serialize;
use tree_sitter::Node;

/// What kind of definition a block came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Function,
    Method,
    Class,
}

/// Complexity of a single block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, schemars::JsonSchema)]
pub struct ComplexityBlock {
    pub name: String,
    pub kind: BlockKind,
    pub classname: Option<String>,
    pub line: usize,
    pub complexity: usize,
}

const COMPREHENSION_KINDS: &[&str] = &[
    "list_comprehension",
    "set_comprehension",
    "dictionary_comprehension",
    "generator_expression",
];

/// Compute complexity blocks for a parsed module.
///
/// Order: module-level functions in source order, then each class followed
/// by its methods.
pub fn complexity_blocks(root: Node, content: &str) -> Vec<ComplexityBlock> {
    let mut visitor = BlockVisitor::new(content, None);
    visitor.visit(root);
    visitor.into_blocks()
}

/// First block with the given name, if any.
pub fn lookup<'a>(blocks: &'a [ComplexityBlock], name: &str) -> Option<&'a ComplexityBlock> {
    blocks.iter().find(|b| b.name == name)
}

struct FunctionBlock {
    name: String,
    classname: Option<String>,
    line: usize,
    complexity: usize,
}

struct ClassBlock {
    name: String,
    line: usize,
    methods: Vec<FunctionBlock>,
    real_complexity: usize,
}

impl ClassBlock {
    /// Average method complexity, plus one when there is more than one method.
    fn complexity(&self) -> usize {
        match self.methods.len() {
            0 => self.real_complexity,
            n => self.real_complexity / n + usize::from(n > 1),
        }
    }
}

impl FunctionBlock {
    fn into_block(self) -> ComplexityBlock {
        ComplexityBlock {
            kind: if self.classname.is_some() {
                BlockKind::Method
            } else {
                BlockKind::Function
            },
            name: self.name,
            classname: self.classname,
            line: self.line,
            complexity: self.complexity,
        }
    }
}

struct BlockVisitor<'a> {
    content: &'a str,
    classname: Option<String>,
    complexity: usize,
    functions: Vec<FunctionBlock>,
    classes: Vec<ClassBlock>,
}

impl<'a> BlockVisitor<'a> {
    fn new(content: &'a str, classname: Option<String>) -> Self {
        Self {
            content,
            classname,
            complexity: 0,
            functions: Vec::new(),
            classes: Vec::new(),
        }
    }

    fn into_blocks(self) -> Vec<ComplexityBlock> {
        let mut blocks: Vec<ComplexityBlock> =
            self.functions.into_iter().map(FunctionBlock::into_block).collect();
        for class in self.classes {
            blocks.push(ComplexityBlock {
                name: class.name.clone(),
                kind: BlockKind::Class,
                classname: None,
                line: class.line,
                complexity: class.complexity(),
            });
            blocks.extend(class.methods.into_iter().map(FunctionBlock::into_block));
        }
        blocks
    }

    fn visit(&mut self, node: Node) {
        match node.kind() {
            "function_definition" => self.visit_function(node),
            "class_definition" => self.visit_class(node),
            // Decorators are not part of any block.
            "decorated_definition" => {
                if let Some(definition) = node.child_by_field_name("definition") {
                    self.visit(definition);
                }
            }
            _ => {
                self.complexity += decision_weight(&node, self.content);
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    self.visit(child);
                }
            }
        }
    }

    fn visit_function(&mut self, node: Node) {
        let Some(name) = node_name(&node, self.content) else {
            return;
        };

        // Closures found here are dropped.
        let mut body = BlockVisitor::new(self.content, None);
        if let Some(block) = node.child_by_field_name("body") {
            let mut cursor = block.walk();
            for child in block.named_children(&mut cursor) {
                body.visit(child);
            }
        }

        self.functions.push(FunctionBlock {
            name: name.to_string(),
            classname: self.classname.clone(),
            line: node.start_position().row + 1,
            complexity: 1 + body.complexity,
        });
    }

    fn visit_class(&mut self, node: Node) {
        let Some(name) = node_name(&node, self.content) else {
            return;
        };

        // Inner classes found here are dropped.
        let mut body = BlockVisitor::new(self.content, Some(name.to_string()));
        if let Some(block) = node.child_by_field_name("body") {
            let mut cursor = block.walk();
            for child in block.named_children(&mut cursor) {
                body.visit(child);
            }
        }

        let methods_complexity: usize = body.functions.iter().map(|f| f.complexity).sum();
        let real_complexity = 1 + body.complexity + methods_complexity + body.functions.len();

        self.classes.push(ClassBlock {
            name: name.to_string(),
            line: node.start_position().row + 1,
            methods: body.functions,
            real_complexity,
        });
    }
}

/// Decision points contributed by a single node, excluding its children.
fn decision_weight(node: &Node, content: &str) -> usize {
    match node.kind() {
        "if_statement" | "elif_clause" | "conditional_expression" | "boolean_operator"
        | "assert_statement" | "for_in_clause" => 1,
        // Comprehension filters count, `case ... if guard` does not.
        "if_clause" => node
            .parent()
            .map(|p| usize::from(COMPREHENSION_KINDS.contains(&p.kind())))
            .unwrap_or(0),
        "for_statement" | "while_statement" => 1 + count_children(node, &["else_clause"]),
        "try_statement" => {
            count_children(node, &["except_clause", "except_group_clause"])
                + count_children(node, &["else_clause"]).min(1)
        }
        "match_statement" => match_weight(node, content),
        _ => 0,
    }
}

fn count_children(node: &Node, kinds: &[&str]) -> usize {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| kinds.contains(&c.kind()))
        .count()
}

/// Number of cases, minus one if any case is an irrefutable capture.
fn match_weight(node: &Node, content: &str) -> usize {
    let mut cases = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "case_clause" => cases.push(child),
            "block" => {
                let mut inner = child.walk();
                cases.extend(
                    child
                        .named_children(&mut inner)
                        .filter(|c| c.kind() == "case_clause"),
                );
            }
            _ => {}
        }
    }

    let has_wildcard = cases.iter().any(|case| is_irrefutable(case, content));
    cases.len().saturating_sub(usize::from(has_wildcard))
}

/// `case _:` or `case name:`, with or without a guard.
fn is_irrefutable(case: &Node, content: &str) -> bool {
    let mut cursor = case.walk();
    let patterns: Vec<Node> = case
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "case_pattern")
        .collect();
    match patterns.as_slice() {
        [pattern] => {
            let text = node_text(pattern, content).trim();
            !text.is_empty()
                && !matches!(text, "None" | "True" | "False")
                && !text.starts_with(|c: char| c.is_ascii_digit())
                && text.chars().all(|c| c == '_' || c.is_alphanumeric())
        }
        _ => false,
    }
}
