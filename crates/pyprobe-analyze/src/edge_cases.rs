//! Edge-case test synthesis.
//!
//! Each parameter with a recognized type gets a fixed set of literal values.
//! Every value becomes a small test function that calls the target with that
//! literal (and `None` for the other parameters), asserts the result is not
//! `None`, and accepts any exception.

use crate::report::{ArgInfo, EdgeCase, EdgeCategory};

/// A literal value to feed a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeValue {
    pub literal: &'static str,
    pub category: EdgeCategory,
}

const fn boundary(literal: &'static str) -> EdgeValue {
    EdgeValue {
        literal,
        category: EdgeCategory::Boundary,
    }
}

const fn edge(literal: &'static str) -> EdgeValue {
    EdgeValue {
        literal,
        category: EdgeCategory::Edge,
    }
}

const INT_VALUES: &[EdgeValue] = &[
    boundary("0"),
    boundary("-1"),
    edge("sys.maxsize"),
    edge("-sys.maxsize - 1"),
];

const STR_VALUES: &[EdgeValue] = &[
    boundary("\"\""),
    edge("\"a\" * 10000"),
    edge("\"!@#$%^&*()\""),
];

const LIST_VALUES: &[EdgeValue] = &[boundary("[]"), edge("[1] * 1000"), edge("[None]")];

/// Values for a declared type name; unknown types get none.
pub fn edge_values(type_name: &str) -> &'static [EdgeValue] {
    match type_name {
        "int" => INT_VALUES,
        "str" => STR_VALUES,
        "list" => LIST_VALUES,
        _ => &[],
    }
}

/// Synthesize edge cases for every parameter of `func_name`, in parameter order.
pub fn synthesize(func_name: &str, args: &[ArgInfo]) -> Vec<EdgeCase> {
    args.iter()
        .flat_map(|target| {
            edge_values(&target.type_name)
                .iter()
                .map(move |value| EdgeCase {
                    category: value.category,
                    description: format!(
                        "Test {} with {} = {}",
                        func_name, target.name, value.literal
                    ),
                    code: render_test(func_name, args, &target.name, value),
                })
        })
        .collect()
}

/// Render a test function for one parameter/value pair.
///
/// Parameters are matched by name, so every parameter named `target` gets the
/// literal.
pub fn render_test(func_name: &str, args: &[ArgInfo], target: &str, value: &EdgeValue) -> String {
    let call_args: Vec<&str> = args
        .iter()
        .map(|arg| {
            if arg.name == target {
                value.literal
            } else {
                "None"
            }
        })
        .collect();

    [
        format!("def test_{}_{}():", func_name, value.category.as_str()),
        "    try:".to_string(),
        format!("        result = {}({})", func_name, call_args.join(", ")),
        "        assert result is not None".to_string(),
        "    except Exception as e:".to_string(),
        "        pass  # Handle expected exceptions".to_string(),
    ]
    .join("\n")
}
