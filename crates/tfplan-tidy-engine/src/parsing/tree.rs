use super::{classify::ClassifiedLine, types::Operation};

/// A node of the section tree: either one line or a brace-delimited block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Leaf(ClassifiedLine),
    Block(Block),
}

/// A brace-delimited region of a plan section.
///
/// The first child of every block except a section root is the leaf that
/// opened it, which is where the block takes its operation from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Leaf: its own operation. Block: the operation of its first child.
    #[must_use]
    pub fn effective_operation(&self) -> Operation {
        match self {
            TreeNode::Leaf(line) => line.operation,
            TreeNode::Block(block) => block.effective_operation(),
        }
    }

    /// Concatenated content of every leaf below this node, in document order.
    #[must_use]
    pub fn effective_content(&self) -> String {
        match self {
            TreeNode::Leaf(line) => line.content.clone(),
            TreeNode::Block(block) => block.effective_content(),
        }
    }

    /// Compares effective content without materialising either string.
    #[must_use]
    pub fn content_eq(&self, other: &TreeNode) -> bool {
        match (self, other) {
            (TreeNode::Leaf(a), TreeNode::Leaf(b)) => a.content == b.content,
            _ => content_bytes(self).eq(content_bytes(other)),
        }
    }

    #[must_use]
    pub fn as_block(&self) -> Option<&Block> {
        match self {
            TreeNode::Block(block) => Some(block),
            TreeNode::Leaf(_) => None,
        }
    }

    #[must_use]
    pub fn as_leaf(&self) -> Option<&ClassifiedLine> {
        match self {
            TreeNode::Leaf(line) => Some(line),
            TreeNode::Block(_) => None,
        }
    }
}

impl From<ClassifiedLine> for TreeNode {
    fn from(line: ClassifiedLine) -> Self {
        TreeNode::Leaf(line)
    }
}

impl From<Block> for TreeNode {
    fn from(block: Block) -> Self {
        TreeNode::Block(block)
    }
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    /// A block whose sole initial child is the line that opened it.
    pub fn opened_by(line: ClassifiedLine) -> Self {
        Self {
            children: vec![TreeNode::Leaf(line)],
        }
    }

    pub fn push(&mut self, node: impl Into<TreeNode>) {
        self.children.push(node.into());
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Operation of the first descendant leaf along the first-child chain.
    /// Empty blocks (only ever a section root) report `None`.
    #[must_use]
    pub fn effective_operation(&self) -> Operation {
        let mut block = self;
        loop {
            match block.children.first() {
                None => return Operation::None,
                Some(TreeNode::Leaf(line)) => return line.operation,
                Some(TreeNode::Block(inner)) => block = inner,
            }
        }
    }

    #[must_use]
    pub fn effective_content(&self) -> String {
        self.leaves().map(|line| line.content.as_str()).collect()
    }

    /// All leaves in document order (depth-first, left to right).
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            stack: vec![self.children.iter()],
        }
    }

    /// Nesting depth counting this block as 1. Leaves add no depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((block, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(
                block
                    .children
                    .iter()
                    .filter_map(TreeNode::as_block)
                    .map(|child| (child, level + 1)),
            );
        }
        deepest
    }
}

// Deeply nested sections would otherwise recurse once per level on drop.
impl Drop for Block {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let TreeNode::Block(mut block) = node {
                pending.append(&mut block.children);
            }
        }
    }
}

/// Iterator over the leaves of a block, see [`Block::leaves`].
pub struct Leaves<'a> {
    stack: Vec<std::slice::Iter<'a, TreeNode>>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a ClassifiedLine;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                None => {
                    self.stack.pop();
                }
                Some(TreeNode::Leaf(line)) => return Some(line),
                Some(TreeNode::Block(block)) => self.stack.push(block.children.iter()),
            }
        }
    }
}

fn content_bytes(node: &TreeNode) -> Box<dyn Iterator<Item = u8> + '_> {
    match node {
        TreeNode::Leaf(line) => Box::new(line.content.bytes()),
        TreeNode::Block(block) => Box::new(block.leaves().flat_map(|line| line.content.bytes())),
    }
}
