use std::fmt;

/// Edit operation attached to a line by its leading marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operation {
    /// No marker: context line, closing brace, comment, blank.
    #[default]
    None,
    /// `+`
    Added,
    /// `-`
    Removed,
    /// `~`
    Updated,
}

impl Operation {
    /// True for an `Added`/`Removed` combination in either order.
    #[must_use]
    pub fn is_inverse_of(self, other: Operation) -> bool {
        matches!(
            (self, other),
            (Operation::Added, Operation::Removed) | (Operation::Removed, Operation::Added)
        )
    }

    /// The glyph used in plan output, `.` for unmarked lines.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Operation::None => '.',
            Operation::Added => '+',
            Operation::Removed => '-',
            Operation::Updated => '~',
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Whether a line opens or closes a brace-delimited block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BraceRole {
    #[default]
    None,
    /// Content ends with `{`.
    Open,
    /// Content starts with `}`.
    Close,
}

impl BraceRole {
    /// Derives the role from fully stripped content. Opening wins when a line
    /// would match both (`} else {` style), so a line never does both.
    pub fn of(content: &str) -> Self {
        if content.ends_with('{') {
            BraceRole::Open
        } else if content.starts_with('}') {
            BraceRole::Close
        } else {
            BraceRole::None
        }
    }
}
