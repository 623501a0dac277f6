use crate::parsing::{Block, BraceRole, ClassifiedLine, Operation, TreeNode};

/// Validates section tree invariants.
///
/// Asserts that:
/// - Every nested block is non-empty and starts with a leaf that opens a brace
/// - A closing leaf is only ever the last child of its block
/// - Every leaf's brace role agrees with its content
/// - A leaf has marker text exactly when it has an operation
///
/// Holds both for freshly built trees and for minimized ones.
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(root: &Block) {
    let mut stack = vec![(root, true)];
    while let Some((block, is_root)) = stack.pop() {
        if !is_root {
            let first = block.children.first().and_then(TreeNode::as_leaf);
            assert!(
                first.is_some_and(|line| line.brace_role == BraceRole::Open),
                "nested block does not start with an opening line: {:?}",
                block.children.first()
            );
        }

        let last = block.children.len().saturating_sub(1);
        for (i, child) in block.children.iter().enumerate() {
            match child {
                TreeNode::Leaf(line) => {
                    check_leaf(line);
                    assert!(
                        line.brace_role != BraceRole::Close || i == last,
                        "closing line {:?} is not the last child of its block",
                        line.content
                    );
                }
                TreeNode::Block(inner) => stack.push((inner, false)),
            }
        }
    }
}

fn check_leaf(line: &ClassifiedLine) {
    assert_eq!(
        line.brace_role,
        BraceRole::of(&line.content),
        "brace role disagrees with content {:?}",
        line.content
    );
    assert_eq!(
        line.operation == Operation::None,
        line.operation_marker_text.is_empty(),
        "marker text {:?} does not match operation {:?}",
        line.operation_marker_text,
        line.operation
    );
    assert_eq!(
        line.has_trailing_null_marker,
        !line.trailing_null_text.is_empty(),
        "trailing null flag disagrees with stripped text {:?}",
        line.trailing_null_text
    );
}
