//! Serializes a section tree back into plan text.

use std::io::{self, Write};

use crate::parsing::{Block, ClassifiedLine};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Re-append the `-> null` annotation stripped during classification.
    /// Off by default: the reconstruction shows the value without it.
    pub restore_trailing_null: bool,
}

/// Renders every surviving leaf, depth-first, one line each.
pub fn render(root: &Block) -> String {
    render_with(root, RenderOptions::default())
}

pub fn render_with(root: &Block, options: RenderOptions) -> String {
    let mut out = String::new();
    for line in root.leaves() {
        push_line(&mut out, line, options);
    }
    out
}

/// Streams the rendering into `out` line by line.
pub fn write_rendered<W: Write>(root: &Block, options: RenderOptions, out: &mut W) -> io::Result<()> {
    let mut buf = String::new();
    for line in root.leaves() {
        buf.clear();
        push_line(&mut buf, line, options);
        out.write_all(buf.as_bytes())?;
    }
    Ok(())
}

fn push_line(out: &mut String, line: &ClassifiedLine, options: RenderOptions) {
    out.extend(std::iter::repeat_n(' ', line.indent));
    out.push_str(&line.operation_marker_text);
    out.push_str(&line.content);
    if options.restore_trailing_null {
        out.push_str(&line.trailing_null_text);
    }
    out.push('\n');
}
