//! Cancellation of spurious delete-then-add pairs.
//!
//! Plan renderers sometimes show an in-place update of a nested attribute as
//! the whole old value removed followed by an identical value added. Inside
//! every block whose effective operation is `Updated`, such adjacent
//! `Added`/`Removed` siblings with identical content are dropped.

use crate::parsing::{Block, Operation, TreeNode};

/// How far cancellation is pushed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Reduction {
    /// One top-down pass: each level is reduced, then its child blocks.
    #[default]
    SinglePass,
    /// Repeat the pass until it cancels nothing. Catches pairs that only become
    /// identical after their own descendants were reduced.
    FixedPoint,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Minimizer {
    reduction: Reduction,
}

impl Minimizer {
    pub fn new(reduction: Reduction) -> Self {
        Self { reduction }
    }

    /// Rewrites the tree in place and returns the number of pairs removed.
    pub fn minimize(&self, root: &mut Block) -> usize {
        match self.reduction {
            Reduction::SinglePass => minimize_pass(root),
            Reduction::FixedPoint => {
                let mut total = 0;
                loop {
                    let cancelled = minimize_pass(root);
                    if cancelled == 0 {
                        return total;
                    }
                    total += cancelled;
                    log::trace!("fixed-point pass cancelled {cancelled} pairs");
                }
            }
        }
    }
}

/// Single-pass minimization with the default settings.
pub fn minimize(root: &mut Block) -> usize {
    Minimizer::default().minimize(root)
}

/// True when two siblings are an `Added`/`Removed` pair with identical content.
#[must_use]
pub fn is_inverse_pair(a: &TreeNode, b: &TreeNode) -> bool {
    a.effective_operation()
        .is_inverse_of(b.effective_operation())
        && a.content_eq(b)
}

fn minimize_pass(root: &mut Block) -> usize {
    let mut cancelled = 0;
    let mut pending = vec![root];
    while let Some(block) = pending.pop() {
        cancelled += cancel_inverse_pairs(block);
        pending.extend(block.children.iter_mut().filter_map(|child| match child {
            TreeNode::Block(inner) => Some(inner),
            TreeNode::Leaf(_) => None,
        }));
    }
    cancelled
}

/// Reduces one level: children are appended to an output list and the last
/// two entries are dropped whenever they form an inverse pair. Only pairs
/// that are adjacent in that list cancel; nothing is re-scanned.
fn cancel_inverse_pairs(block: &mut Block) -> usize {
    if block.effective_operation() != Operation::Updated {
        return 0;
    }

    let mut kept: Vec<TreeNode> = Vec::with_capacity(block.children.len());
    let mut cancelled = 0;
    for child in std::mem::take(&mut block.children) {
        kept.push(child);
        if let [.., prev, last] = kept.as_slice()
            && is_inverse_pair(prev, last)
        {
            kept.truncate(kept.len() - 2);
            cancelled += 1;
        }
    }
    block.children = kept;
    cancelled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_section;
    use crate::render::render;
    use crate::snapshot::{invariants, outline};
    use crate::tests::{added, plain, removed, updated};
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn section(lines: &[String]) -> Block {
        parse_section(lines.iter().map(String::as_str)).root
    }

    #[test]
    fn cancels_identical_add_remove_pair() {
        let mut root = section(&[
            updated(2, "attr {"),
            added(4, "value \"a\""),
            removed(4, "value \"a\""),
            plain(2, "}"),
        ]);
        assert_eq!(minimize(&mut root), 1);
        invariants::check(&root);
        assert_eq!(render(&root), format!("{}\n{}\n", updated(2, "attr {"), plain(2, "}")));
    }

    #[test]
    fn cancels_remove_then_add() {
        let mut root = section(&[
            updated(2, "attr {"),
            removed(4, "value \"a\""),
            added(4, "value \"a\""),
            plain(2, "}"),
        ]);
        assert_eq!(minimize(&mut root), 1);
        assert_eq!(root.effective_content(), "\x1b[0m attr {}");
    }

    #[test]
    fn keeps_pair_with_different_content() {
        let lines = [
            updated(2, "attr {"),
            added(4, "value \"a\""),
            removed(4, "value \"b\""),
            plain(2, "}"),
        ];
        let mut root = section(&lines);
        let before = root.clone();
        assert_eq!(minimize(&mut root), 0);
        assert_eq!(root, before);
        assert_eq!(render(&root), lines.map(|l| l + "\n").concat());
    }

    #[rstest]
    #[case(added(4, "value \"a\""), added(4, "value \"a\""))]
    #[case(removed(4, "value \"a\""), removed(4, "value \"a\""))]
    #[case(updated(4, "value \"a\""), added(4, "value \"a\""))]
    #[case(plain(4, "value \"a\""), removed(4, "value \"a\""))]
    fn keeps_pairs_that_are_not_inverse(#[case] first: String, #[case] second: String) {
        let mut root = section(&[updated(2, "attr {"), first, second, plain(2, "}")]);
        let before = root.clone();
        assert_eq!(minimize(&mut root), 0);
        assert_eq!(root, before);
    }

    #[test]
    fn only_updated_blocks_cancel_their_children() {
        let lines = [
            added(2, "attr {"),
            added(4, "value \"a\""),
            removed(4, "value \"a\""),
            plain(2, "}"),
        ];
        let mut root = section(&lines);
        let before = root.clone();
        assert_eq!(minimize(&mut root), 0);
        assert_eq!(root, before);
    }

    #[test]
    fn cancels_whole_blocks_by_full_content() {
        let mut root = section(&[
            updated(2, "resource \"aws_security_group\" \"web\" {"),
            removed(6, "ingress {"),
            plain(10, "from_port = 443"),
            plain(10, "to_port   = 443"),
            plain(8, "}"),
            added(6, "ingress {"),
            plain(10, "from_port = 443"),
            plain(10, "to_port   = 443"),
            plain(8, "}"),
            plain(4, "}"),
        ]);
        assert_eq!(minimize(&mut root), 1);
        invariants::check(&root);
        assert_snapshot!(outline(&root), @r#"
[~]
  ~ resource "aws_security_group" "web" {
  . }
"#);
    }

    #[test]
    fn indentation_does_not_affect_equality() {
        let mut root = section(&[
            updated(2, "attr {"),
            added(4, "value \"a\""),
            removed(8, "value \"a\""),
            plain(2, "}"),
        ]);
        assert_eq!(minimize(&mut root), 1);
    }

    #[test]
    fn recurses_through_blocks_that_are_not_updated() {
        let mut root = section(&[
            plain(0, ""),
            plain(2, "# module.app.aws_instance.web will be updated in-place"),
            plain(2, "module \"app\" {"),
            updated(4, "resource \"aws_instance\" \"web\" {"),
            updated(8, "tags = {"),
            removed(12, "\"Team\" = \"core\""),
            added(12, "\"Team\" = \"core\""),
            added(12, "\"Owner\" = \"ops\""),
            plain(10, "}"),
            plain(6, "}"),
            plain(2, "}"),
        ]);
        assert_eq!(root.effective_operation(), Operation::None);
        assert_eq!(minimize(&mut root), 1);
        invariants::check(&root);
        assert_snapshot!(outline(&root), @r#"
.
. # module.app.aws_instance.web will be updated in-place
[.]
  . module "app" {
  [~]
    ~ resource "aws_instance" "web" {
    [~]
      ~ tags = {
      + "Owner" = "ops"
      . }
    . }
  . }
"#);
    }

    #[test]
    fn cancellation_uses_the_output_list_for_lookback() {
        // After the inner pair cancels, the outer pair becomes adjacent.
        let mut root = section(&[
            updated(2, "attr {"),
            added(4, "a"),
            added(4, "b"),
            removed(4, "b"),
            removed(4, "a"),
            plain(2, "}"),
        ]);
        assert_eq!(minimize(&mut root), 2);
        assert_eq!(root.effective_content(), "\x1b[0m attr {}");
    }

    #[test]
    fn does_not_pair_across_a_non_matching_sibling() {
        let mut root = section(&[
            updated(2, "attr {"),
            added(4, "a"),
            removed(4, "b"),
            removed(4, "a"),
            plain(2, "}"),
        ]);
        assert_eq!(minimize(&mut root), 0);
    }

    #[test]
    fn three_way_run_leaves_the_odd_one_out() {
        let mut root = section(&[
            updated(2, "attr {"),
            added(4, "a"),
            removed(4, "a"),
            added(4, "a"),
            plain(2, "}"),
        ]);
        assert_eq!(minimize(&mut root), 1);
        let ops: Vec<_> = root.leaves().map(|l| l.operation).collect();
        assert_eq!(ops, vec![Operation::Updated, Operation::Added, Operation::None]);
    }

    #[test]
    fn empty_root_is_left_alone() {
        let mut root = Block::new();
        assert_eq!(minimize(&mut root), 0);
        assert!(root.is_empty());
    }

    #[test]
    fn minimizing_twice_changes_nothing() {
        let mut root = section(&[
            updated(2, "resource \"x\" \"y\" {"),
            updated(6, "tags = {"),
            added(10, "a = 1"),
            removed(10, "a = 1"),
            removed(10, "b = 2"),
            plain(8, "}"),
            removed(6, "rule {"),
            plain(10, "port = 1"),
            plain(8, "}"),
            added(6, "rule {"),
            plain(10, "port = 1"),
            plain(8, "}"),
            plain(4, "}"),
        ]);
        assert_eq!(minimize(&mut root), 2);
        let once = root.clone();
        assert_eq!(minimize(&mut root), 0);
        assert_eq!(root, once);
    }

    /// Builds `~ outer { -inner{~x{+v -v}} +inner{~x{}} }`: the two `inner`
    /// blocks only match once the nested pair has been cancelled.
    fn needs_second_pass() -> Block {
        section(&[
            updated(2, "outer {"),
            removed(4, "inner {"),
            updated(6, "x {"),
            added(8, "v"),
            removed(8, "v"),
            plain(6, "}"),
            plain(4, "}"),
            added(4, "inner {"),
            updated(6, "x {"),
            plain(6, "}"),
            plain(4, "}"),
            plain(2, "}"),
        ])
    }

    #[test]
    fn single_pass_leaves_pairs_revealed_by_nested_cancellation() {
        let mut root = needs_second_pass();
        assert_eq!(Minimizer::new(Reduction::SinglePass).minimize(&mut root), 1);
        assert_eq!(root.children[0].as_block().unwrap().children.len(), 4);
    }

    #[test]
    fn fixed_point_reduces_pairs_revealed_by_nested_cancellation() {
        let mut root = needs_second_pass();
        assert_eq!(Minimizer::new(Reduction::FixedPoint).minimize(&mut root), 2);
        invariants::check(&root);
        assert_eq!(root.children[0].as_block().unwrap().children.len(), 2);
        assert_eq!(Minimizer::new(Reduction::FixedPoint).minimize(&mut root), 0);
    }
}
