//! Line builders shared by the unit tests. They mimic terraform's colored
//! output: `<indent><sgr><op><reset> <text>`.

/// An unmarked line.
pub fn plain(indent: usize, text: &str) -> String {
    format!("{}{text}", " ".repeat(indent))
}

/// A line marked `+` in green.
pub fn added(indent: usize, text: &str) -> String {
    marked(indent, "\x1b[32m+", text)
}

/// A line marked `-` in red.
pub fn removed(indent: usize, text: &str) -> String {
    marked(indent, "\x1b[31m-", text)
}

/// A line marked `~` in yellow.
pub fn updated(indent: usize, text: &str) -> String {
    marked(indent, "\x1b[33m~", text)
}

fn marked(indent: usize, marker: &str, text: &str) -> String {
    format!("{}{marker}\x1b[0m {text}", " ".repeat(indent))
}
