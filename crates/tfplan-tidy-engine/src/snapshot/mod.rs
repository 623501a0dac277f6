//! # Snapshot Testing Support
//!
//! Utilities for testing the tree builder and minimizer via snapshot
//! assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`outline`**: Renders a section tree as a stable, color-free outline for
//!   `insta` snapshots
//! - **`invariants`**: Runtime checks for tree well-formedness (blocks start
//!   with their opening line, closing lines come last, brace roles agree with
//!   content)

pub mod invariants;
pub mod outline;

pub use invariants::check as invariants;
pub use outline::{outline, preview};
