use std::sync::OnceLock;

use regex::Regex;

use super::{
    markers::{END_OF_SECTION_RULE, OperationMarker},
    types::{BraceRole, Operation},
};

/// Classification of a single plan line containing only local facts.
///
/// This is phase 1 of section parsing: each line is classified independently
/// without reference to surrounding context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    /// Leading spaces before any operation marker.
    pub indent: usize,
    /// Operation detected from the colored marker, if any.
    pub operation: Operation,
    /// Exact marker text including the color sequence in front of it.
    /// Empty when `operation` is `None`.
    pub operation_marker_text: String,
    /// Remaining text with indentation, marker and trailing-null annotation stripped.
    pub content: String,
    /// Derived from `content` after all stripping.
    pub brace_role: BraceRole,
    /// Whether a `-> null` annotation was stripped from the end of the line.
    pub has_trailing_null_marker: bool,
    /// The stripped annotation verbatim, empty when there was none.
    pub trailing_null_text: String,
}

impl ClassifiedLine {
    /// Whether this line carries the rule that terminates a section.
    #[must_use]
    pub fn is_end_of_section(&self) -> bool {
        self.content.contains(END_OF_SECTION_RULE)
    }
}

/// Classifies individual lines of a plan section.
pub struct DiffLineClassifier;

impl DiffLineClassifier {
    /// Classifies a line into a [`ClassifiedLine`].
    ///
    /// Never fails: anything that does not look like a marker or a brace is
    /// passed through as plain content.
    pub fn classify(&self, raw: &str) -> ClassifiedLine {
        let rest = raw.trim_start_matches(' ');
        let indent = raw.len() - rest.len();

        let (operation, marker_len) =
            OperationMarker::find(rest).unwrap_or((Operation::None, 0));
        let (marker, working) = rest.split_at(marker_len);
        let (content, trailing_null) = split_trailing_null(working);

        ClassifiedLine {
            indent,
            operation,
            operation_marker_text: marker.to_string(),
            content: content.to_string(),
            brace_role: BraceRole::of(content),
            has_trailing_null_marker: !trailing_null.is_empty(),
            trailing_null_text: trailing_null.to_string(),
        }
    }
}

/// Splits a trailing `-> null` annotation (with any surrounding whitespace
/// and SGR color sequences) off the end of `content`.
fn split_trailing_null(content: &str) -> (&str, &str) {
    static TRAILING_NULL: OnceLock<Regex> = OnceLock::new();
    let trailing_null = TRAILING_NULL.get_or_init(|| {
        Regex::new(r"(?:[ \t]|\x1b\[[0-9;]*m)*->(?:[ \t]|\x1b\[[0-9;]*m)*null(?:[ \t]|\x1b\[[0-9;]*m)*$")
            .expect("Invalid trailing null regex")
    });

    match trailing_null.find(content) {
        Some(m) => content.split_at(m.start()),
        None => (content, ""),
    }
}
