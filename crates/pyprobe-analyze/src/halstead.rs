//! Halstead volume metrics for a whole module.

use crate::python::node_text;
use serde::Serialize;
use std::collections::HashSet;
use tree_sitter::Node;

/// Halstead totals over every operator expression in a module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, schemars::JsonSchema)]
pub struct HalsteadMetrics {
    /// Distinct operators.
    pub h1: usize,
    /// Distinct operands.
    pub h2: usize,
    /// Total operators.
    pub n1: usize,
    /// Total operands.
    pub n2: usize,
    pub vocabulary: usize,
    pub length: usize,
    pub calculated_length: f64,
    pub volume: f64,
    pub difficulty: f64,
    pub effort: f64,
    pub time: f64,
    pub bugs: f64,
}

impl HalsteadMetrics {
    fn from_counts(h1: usize, h2: usize, n1: usize, n2: usize) -> Self {
        let vocabulary = h1 + h2;
        let length = n1 + n2;
        let calculated_length = log2_weighted(h1) + log2_weighted(h2);
        let volume = if vocabulary == 0 {
            0.0
        } else {
            length as f64 * (vocabulary as f64).log2()
        };
        let difficulty = if h2 == 0 {
            0.0
        } else {
            (h1 as f64 / 2.0) * (n2 as f64 / h2 as f64)
        };
        let effort = difficulty * volume;
        Self {
            h1,
            h2,
            n1,
            n2,
            vocabulary,
            length,
            calculated_length,
            volume,
            difficulty,
            effort,
            time: effort / 18.0,
            bugs: volume / 3000.0,
        }
    }
}

fn log2_weighted(n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        n as f64 * (n as f64).log2()
    }
}

/// Compute Halstead totals for a parsed module.
pub fn halstead(root: Node, content: &str) -> HalsteadMetrics {
    let mut counter = OperatorCounter::default();
    counter.visit(root, content);
    HalsteadMetrics::from_counts(
        counter.operators_seen.len(),
        counter.operands_seen.len(),
        counter.operators,
        counter.operands,
    )
}

#[derive(Default)]
struct OperatorCounter<'a> {
    operators: usize,
    operands: usize,
    operators_seen: HashSet<&'a str>,
    operands_seen: HashSet<&'a str>,
}

impl<'a> OperatorCounter<'a> {
    fn visit(&mut self, node: Node, content: &'a str) {
        match node.kind() {
            "binary_operator" | "boolean_operator" | "augmented_assignment" => {
                self.operator(node.child_by_field_name("operator"), content);
                self.operand(node.child_by_field_name("left"), content);
                self.operand(node.child_by_field_name("right"), content);
            }
            "unary_operator" => {
                self.operator(node.child_by_field_name("operator"), content);
                self.operand(node.child_by_field_name("argument"), content);
            }
            "not_operator" => {
                self.operators += 1;
                self.operators_seen.insert("not");
                self.operand(node.child_by_field_name("argument"), content);
            }
            "comparison_operator" => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    if child.is_named() {
                        self.operand(Some(child), content);
                    } else {
                        self.operator(Some(child), content);
                    }
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.visit(child, content);
        }
    }

    fn operator(&mut self, node: Option<Node>, content: &'a str) {
        if let Some(node) = node {
            self.operators += 1;
            self.operators_seen.insert(node_text(&node, content));
        }
    }

    fn operand(&mut self, node: Option<Node>, content: &'a str) {
        if let Some(node) = node {
            self.operands += 1;
            self.operands_seen.insert(node_text(&node, content));
        }
    }
}
