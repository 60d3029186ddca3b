//! Visualization of access-path trees
//!
//! Supports two output formats:
//! - ASCII tree (for terminal viewing)
//! - Mermaid diagrams (for markdown/web rendering)

use crate::ast::Expr;
use std::fmt::Write as FmtWrite;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualizationFormat {
    /// ASCII tree format (for terminal viewing)
    AsciiTree,
    /// Mermaid diagram format (renders in markdown, GitHub, etc.)
    Mermaid,
}

pub trait Visualize {
    fn visualize(&self, format: VisualizationFormat) -> String;
}

impl Visualize for Expr {
    fn visualize(&self, format: VisualizationFormat) -> String {
        match format {
            VisualizationFormat::AsciiTree => {
                let mut output = String::new();
                visit_ascii(self, "", "", &mut output);
                output
            }
            VisualizationFormat::Mermaid => {
                let mut output = String::from("graph TD\n");
                let mut counter = 0;
                visit_mermaid(self, &mut counter, None, &mut output);
                output
            }
        }
    }
}

fn node_label(node: &Expr) -> String {
    match node {
        Expr::Parameter { name } => format!("Parameter {}", name),
        Expr::Constant(value) => format!("Constant {}", value),
        Expr::Variable { name } => format!("Variable {}", name),
        Expr::Convert { target_type, .. } => format!("Convert ({})", target_type),
        Expr::Member {
            name,
            declaring_type,
            target,
        } => match target {
            Some(_) => format!("Member {}", name),
            None => format!("StaticMember {}::{}", declaring_type, name),
        },
        Expr::ArrayIndex { index, .. } => format!("ArrayIndex [{}]", index),
        Expr::Call { method, .. } => match node.as_indexer() {
            Some(_) => "IndexerCall".to_string(),
            None => format!("Call {}", method),
        },
        Expr::Binary { operator, .. } => format!("Binary {}", operator.symbol()),
        Expr::Negate { .. } => "Negate".to_string(),
        Expr::Lambda { parameter, .. } => format!("Lambda {} =>", parameter),
    }
}

fn children(node: &Expr) -> Vec<&Expr> {
    match node {
        Expr::Parameter { .. } | Expr::Constant(_) | Expr::Variable { .. } => vec![],
        Expr::Convert { operand, .. } | Expr::Negate { operand } => vec![operand.as_ref()],
        Expr::Member { target, .. } => target.iter().map(|t| t.as_ref()).collect(),
        Expr::ArrayIndex { array, .. } => vec![array.as_ref()],
        Expr::Call {
            target, arguments, ..
        } => target
            .iter()
            .map(|t| t.as_ref())
            .chain(arguments.iter())
            .collect(),
        Expr::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
        Expr::Lambda { body, .. } => vec![body.as_ref()],
    }
}

fn visit_ascii(node: &Expr, prefix: &str, child_prefix: &str, output: &mut String) {
    let _ = writeln!(output, "{}{}", prefix, node_label(node));
    let children = children(node);
    let count = children.len();
    for (i, child) in children.into_iter().enumerate() {
        let last = i + 1 == count;
        let (branch, continuation) = if last {
            ("└─ ", "   ")
        } else {
            ("├─ ", "│  ")
        };
        visit_ascii(
            child,
            &format!("{}{}", child_prefix, branch),
            &format!("{}{}", child_prefix, continuation),
            output,
        );
    }
}

fn visit_mermaid(node: &Expr, counter: &mut usize, parent_id: Option<usize>, output: &mut String) {
    let current_id = *counter;
    *counter += 1;

    let label = node_label(node).replace('"', "#quot;");
    let _ = writeln!(output, "    n{}[\"{}\"]", current_id, label);
    if let Some(parent) = parent_id {
        let _ = writeln!(output, "    n{} --> n{}", parent, current_id);
    }

    for child in children(node) {
        visit_mermaid(child, counter, Some(current_id), output);
    }
}
