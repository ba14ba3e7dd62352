//! Declarative mission text.
//!
//! ```text
//! mission "restart-web" {
//!   step "n1" {
//!     type = "action"
//!     label = "Restart web"
//!     action = "restart_service"
//!     next = ["n2"]
//!   }
//! }
//! ```

use std::fmt::Write;

use mf_graph::{MissionGraph, Node};

const INDENT: &str = "  ";

/// Render `graph` as declarative mission text.
///
/// Optional step fields are emitted only when set. Positions are layout
/// state and are not part of the export.
pub fn export_to_declarative(graph: &MissionGraph) -> String {
    let mut out = String::new();
    out.push_str(&format!("mission {} {{\n", quote(graph.name())));
    for (i, node) in graph.nodes().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_step(&mut out, node);
    }
    out.push_str("}\n");
    out
}

fn field(out: &mut String, key: &str, value: &str) {
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{INDENT}{INDENT}{key} = {value}");
}

fn write_step(out: &mut String, node: &Node) {
    let _ = writeln!(out, "{INDENT}step {} {{", quote(&node.id.to_string()));
    field(out, "type", &quote(node.kind.as_str()));
    field(out, "label", &quote(&node.label));

    let data = &node.data;
    if let Some(action) = &data.action {
        field(out, "action", &quote(action));
    }
    if let Some(timeout) = data.timeout_seconds {
        field(out, "timeout_seconds", &timeout.to_string());
    }
    if let Some(retries) = data.retries {
        field(out, "retries", &retries.to_string());
    }
    if !data.params.is_empty() {
        // BTreeMap keys serialize in sorted order.
        let params = serde_json::to_string(&data.params).unwrap_or_else(|_| "{}".to_string());
        field(out, "params", &params);
    }

    let next: Vec<String> = node.outgoing.iter().map(|id| quote(&id.to_string())).collect();
    field(out, "next", &format!("[{}]", next.join(", ")));
    let _ = writeln!(out, "{INDENT}}}");
}

/// JSON string quoting: escapes quotes, backslashes and control characters.
fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s.escape_default()))
}
