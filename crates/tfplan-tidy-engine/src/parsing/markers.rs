//! Fixed literals of the terraform plan rendering that the parser keys on.

use super::types::Operation;

/// Line that opens the "changes made outside of Terraform" report.
pub const DRIFT_BANNER: &str = "last \"terraform apply\":";

/// Line that opens the planned-actions report.
pub const PLAN_BANNER: &str = "Terraform will perform the following actions:";

/// Horizontal rule that terminates either report.
pub const END_OF_SECTION_RULE: &str =
    "─────────────────────────────────────────────────────────────────────────────";

/// Start of an ANSI control sequence (`ESC [`).
pub const COLOR_INTRODUCER: &str = "\x1b[";

/// Markers only count when they start within this many bytes of the
/// post-indent text. Later `+`/`-` characters belong to the value.
pub const MARKER_WINDOW: usize = 12;

/// Operation markers in detection priority order.
const MARKERS: [(char, Operation); 3] = [
    ('+', Operation::Added),
    ('-', Operation::Removed),
    ('~', Operation::Updated),
];

/// Locates the colored operation marker at the start of a line.
pub struct OperationMarker;

impl OperationMarker {
    /// Returns the detected operation and the byte length of the marker text,
    /// i.e. everything up to and including the marker character.
    pub fn find(text: &str) -> Option<(Operation, usize)> {
        MARKERS.iter().find_map(|&(marker, op)| {
            let mut pattern = String::with_capacity(1 + COLOR_INTRODUCER.len());
            pattern.push(marker);
            pattern.push_str(COLOR_INTRODUCER);
            text.find(&pattern)
                .filter(|&idx| idx < MARKER_WINDOW)
                .map(|idx| (op, idx + marker.len_utf8()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("\x1b[32m+\x1b[0m name = \"a\"", Some((Operation::Added, 6)))]
    #[case("\x1b[31m-\x1b[0m name = \"a\"", Some((Operation::Removed, 6)))]
    #[case("\x1b[33m~\x1b[0m name = \"a\"", Some((Operation::Updated, 6)))]
    #[case("+\x1b[0m bare", Some((Operation::Added, 1)))]
    #[case("name = \"a\"", None)]
    #[case("+ uncolored", None)]
    #[case("12345678901+\x1b[0m", Some((Operation::Added, 12)))]
    #[case("123456789012+\x1b[0m", None)]
    #[case("12345678901~\x1b[0m", Some((Operation::Updated, 12)))]
    #[case("123456789012-\x1b[0m", None)]
    fn finds_marker(#[case] text: &str, #[case] expected: Option<(Operation, usize)>) {
        assert_eq!(OperationMarker::find(text), expected);
    }

    #[test]
    fn ignores_marker_outside_window() {
        let text = "description = \"x\x1b[32m+\x1b[0m\"";
        assert_eq!(OperationMarker::find(text), None);
    }

    #[test]
    fn added_wins_over_removed() {
        // Both markers inside the window; `+` has priority even though `-` comes first.
        let text = "-\x1b[0m+\x1b[0m";
        assert_eq!(OperationMarker::find(text), Some((Operation::Added, 6)));
    }

    #[test]
    fn end_rule_is_box_drawing() {
        assert_eq!(END_OF_SECTION_RULE.chars().count(), 77);
        assert!(END_OF_SECTION_RULE.chars().all(|c| c == '─'));
    }
}
