pub mod io;
pub mod minimize;
pub mod parsing;
pub mod render;
pub mod snapshot;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use io::{SectionKind, StreamError, StreamOptions, StreamSummary, Transducer};
pub use minimize::{Minimizer, Reduction, minimize};
pub use parsing::{Block, ClassifiedLine, Operation, TreeNode, parse_section};
pub use render::{RenderOptions, render, render_with};
