use super::{
    classify::ClassifiedLine,
    tree::{Block, TreeNode},
    types::BraceRole,
};

/// Why a section stopped consuming lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionEnd {
    /// The end-of-section rule was seen.
    EndRule,
    /// A `}` arrived with no block open, closing the root level itself.
    UnbalancedClose,
    /// The line source ran dry.
    EndOfInput,
}

/// Result of feeding one line to the [`TreeBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    Continue,
    /// The section is finished; no further lines belong to it.
    Complete(SectionEnd),
}

/// Builds the block tree of one section from classified lines.
///
/// Keeps one frame per open brace on an explicit stack rather than the call
/// stack, so nesting depth is bounded only by memory. A block is attached to
/// its parent when it closes (or when the builder finishes), which yields the
/// same child order as attaching it up front.
pub struct TreeBuilder {
    root: Block,
    open: Vec<Block>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            root: Block::new(),
            open: vec![],
        }
    }

    /// Open levels including the root.
    pub fn depth(&self) -> usize {
        self.open.len() + 1
    }

    /// Feeds the next line. Once `Complete` is returned the caller must stop
    /// pushing and call [`TreeBuilder::finish`].
    pub fn push(&mut self, line: ClassifiedLine) -> BuildStep {
        if line.is_end_of_section() {
            self.current().push(line);
            return BuildStep::Complete(SectionEnd::EndRule);
        }

        match line.brace_role {
            BraceRole::Open => {
                self.open.push(Block::opened_by(line));
                BuildStep::Continue
            }
            BraceRole::None => {
                self.current().push(line);
                BuildStep::Continue
            }
            BraceRole::Close => {
                self.current().push(line);
                match self.open.pop() {
                    Some(block) => {
                        self.current().push(block);
                        BuildStep::Continue
                    }
                    None => BuildStep::Complete(SectionEnd::UnbalancedClose),
                }
            }
        }
    }

    /// Closes every level still open and returns the section root.
    pub fn finish(mut self) -> Block {
        while let Some(block) = self.open.pop() {
            self.current().push(TreeNode::Block(block));
        }
        self.root
    }

    fn current(&mut self) -> &mut Block {
        self.open.last_mut().unwrap_or(&mut self.root)
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
