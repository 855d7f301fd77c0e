//! Indented text rendering of a subtree, used by debug output and tests.

use crate::ast::Ast;
use crate::ids::NodeId;
use crate::node::{AstNode, ConstValue};
use std::fmt::Write;

impl Ast {
    /// Renders the subtree at `root`, one node per line, two spaces of
    /// indentation per level. A node reached again through its own descendants
    /// is printed with a `<cycle>` marker instead of being expanded.
    pub fn dump(&self, root: NodeId) -> String {
        let mut out = String::new();
        let mut path = Vec::new();
        self.dump_rec(root, 0, &mut path, &mut out);
        out
    }

    fn dump_rec(&self, id: NodeId, depth: usize, path: &mut Vec<NodeId>, out: &mut String) {
        let node = self.get(id);
        let _ = write!(out, "{:indent$}{}", "", describe(node), indent = depth * 2);
        if path.contains(&id) {
            out.push_str(" <cycle>\n");
            return;
        }
        out.push('\n');
        path.push(id);
        for &child in &node.children {
            self.dump_rec(child, depth + 1, path, out);
        }
        path.pop();
    }
}

fn describe(node: &AstNode) -> String {
    let mut line = node.kind.to_string();
    if !node.name.is_empty() {
        let _ = write!(line, " {}", node.name);
    }
    let flags = node.flags;
    for (set, text) in [
        (flags.is_input, "input"),
        (flags.is_output, "output"),
        (flags.is_reg, "reg"),
        (flags.is_logic, "logic"),
        (flags.is_signed, "signed"),
        (flags.is_custom_type, "custom_type"),
        (flags.is_string, "string"),
        (flags.is_unsized, "unsized"),
    ] {
        if set {
            let _ = write!(line, " [{text}]");
        }
    }
    if node.port_id != 0 {
        let _ = write!(line, " port={}", node.port_id);
    }
    match &node.value {
        Some(ConstValue::Bits(bits)) => {
            let _ = write!(line, " = {bits}");
        }
        Some(ConstValue::Real(r)) => {
            let _ = write!(line, " = {r}");
        }
        None => {}
    }
    for (key, value) in &node.attributes {
        let _ = write!(line, " ({key}={value})");
    }
    line
}
