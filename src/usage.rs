//! Usage text for command groups
//!
//! Leaf usage is owned by each handler (see [`crate::commands::handler::Handler::usage`]);
//! this module only renders the listing of a group and everything below it.

use std::fmt::Write;

use crate::commands::tree::{NodeId, Tree};

/// Spaces added per level of nesting in the command listing
const INDENT: usize = 2;

/// Render the usage text of the group `id`.
///
/// The first lines carry the group description (if any), the `Usage:` line and a hint on
/// how to get help for a single command. The `Commands:` listing follows, one line per
/// descendant, and is always the last part of the text.
pub(crate) fn render_group(tree: &Tree, id: NodeId) -> String {
    let group = tree.node(id);
    let path = tree.path(id);

    let mut out = String::new();
    if let Some(description) = &group.description {
        let _ = writeln!(out, "{description}");
    }
    let _ = writeln!(out, "Usage: {path} [command] [options] [operands]");
    let _ = writeln!(
        out,
        "Run `{path} [command] --help` for help on a command."
    );
    out.push('\n');
    out.push_str("Commands:");
    for &child in group.children() {
        render_entry(tree, child, 1, &mut out);
    }
    out
}

fn render_entry(tree: &Tree, id: NodeId, depth: usize, out: &mut String) {
    let node = tree.node(id);
    let indent = " ".repeat(depth * INDENT);
    match &node.description {
        Some(description) => {
            let _ = write!(out, "\n{indent}{}: {description}", node.name);
        }
        None => {
            let _ = write!(out, "\n{indent}{}", node.name);
        }
    }
    for &child in node.children() {
        render_entry(tree, child, depth + 1, out);
    }
}
