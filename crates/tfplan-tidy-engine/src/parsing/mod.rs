//! # Section Parsing
//!
//! Two-phase parsing of a single plan section.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line is classified into a
//!    `ClassifiedLine` containing local facts (indent, operation marker,
//!    brace role, trailing `-> null` annotation)
//!
//! 2. **Tree Construction** (`builder`): a `TreeBuilder` keeps a stack of open
//!    blocks and nests lines by brace role
//!
//! ## Modules
//!
//! - **`types`**: `Operation` and `BraceRole`
//! - **`markers`**: banner literals and the colored operation marker lookup
//! - **`classify`**: `DiffLineClassifier` produces a `ClassifiedLine` per line
//! - **`tree`**: `TreeNode` / `Block` and the effective operation/content queries
//! - **`builder`**: `TreeBuilder` state machine for tree construction
//!
//! ## Key Invariants
//!
//! - Nesting is driven by braces only; indentation is carried for output
//! - Every non-root block starts with the leaf that opened it
//! - Classification never fails

pub mod builder;
pub mod classify;
pub mod markers;
pub mod tree;
pub mod types;

pub use builder::{BuildStep, SectionEnd, TreeBuilder};
pub use classify::{ClassifiedLine, DiffLineClassifier};
pub use markers::{DRIFT_BANNER, END_OF_SECTION_RULE, PLAN_BANNER};
pub use tree::{Block, TreeNode};
pub use types::{BraceRole, Operation};

/// A section parsed from an in-memory list of lines.
#[derive(Debug)]
pub struct ParsedSection {
    pub root: Block,
    pub end: SectionEnd,
    /// Lines consumed, including the one that ended the section.
    pub consumed: usize,
}

/// Parses the lines following a start banner until the section ends.
///
/// Lines after the end of the section are left unread.
pub fn parse_section<'a>(lines: impl IntoIterator<Item = &'a str>) -> ParsedSection {
    let classifier = DiffLineClassifier;
    let mut builder = TreeBuilder::new();
    let mut consumed = 0;
    let mut end = SectionEnd::EndOfInput;

    for raw in lines {
        consumed += 1;
        if let BuildStep::Complete(reason) = builder.push(classifier.classify(raw)) {
            end = reason;
            break;
        }
    }

    ParsedSection {
        root: builder.finish(),
        end,
        consumed,
    }
}
