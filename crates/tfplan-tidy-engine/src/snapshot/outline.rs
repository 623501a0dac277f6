use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::{Block, TreeNode};

/// Renders a tree as an indented outline for snapshot testing.
///
/// Each leaf is its operation symbol followed by a color-free preview of its
/// content. Each nested block is a `[op]` header with its children indented
/// two spaces below it. The root's own children start at column 0.
///
/// ```text
/// [~]
///   ~ tags = {
///   + "Owner" = "ops"
///   . }
/// ```
pub fn outline(root: &Block) -> String {
    let mut lines = Vec::new();
    let mut stack = vec![(root.children.iter(), 0usize)];
    while let Some((iter, level)) = stack.last_mut() {
        let level = *level;
        let Some(node) = iter.next() else {
            stack.pop();
            continue;
        };
        let pad = "  ".repeat(level);
        match node {
            TreeNode::Leaf(line) => {
                let text = preview(&line.content);
                if text.is_empty() {
                    lines.push(format!("{pad}{}", line.operation));
                } else {
                    lines.push(format!("{pad}{} {text}", line.operation));
                }
            }
            TreeNode::Block(block) => {
                lines.push(format!("{pad}[{}]", block.effective_operation()));
                stack.push((block.children.iter(), level + 1));
            }
        }
    }
    lines.join("\n")
}

/// Content with SGR color sequences removed and surrounding whitespace trimmed.
pub fn preview(content: &str) -> String {
    static SGR: OnceLock<Regex> = OnceLock::new();
    let sgr = SGR.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").expect("Invalid SGR regex"));
    sgr.replace_all(content, "").trim().to_string()
}
