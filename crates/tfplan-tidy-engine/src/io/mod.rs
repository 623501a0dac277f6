use std::fmt;
use std::borrow::Cow;
use std::io::{BufRead, Write};

use crate::minimize::{Minimizer, Reduction};
use crate::parsing::{
    BuildStep, DRIFT_BANNER, DiffLineClassifier, PLAN_BANNER, SectionEnd, TreeBuilder,
};
use crate::render::{RenderOptions, write_rendered};

#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("Failed to read input at line {line}: {source}")]
    Read {
        line: usize,
        source: std::io::Error,
    },
    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),
}

/// Which report a start banner introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Changes made outside of Terraform since the last apply.
    Drift,
    /// The actions Terraform will perform.
    Plan,
}

impl SectionKind {
    /// Banners are matched against the whole line.
    pub fn from_banner(line: &str) -> Option<Self> {
        match line {
            DRIFT_BANNER => Some(SectionKind::Drift),
            PLAN_BANNER => Some(SectionKind::Plan),
            _ => None,
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKind::Drift => write!(f, "drift"),
            SectionKind::Plan => write!(f, "plan"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamOptions {
    /// Cancel inverse pairs before rendering.
    pub minimize: bool,
    pub reduction: Reduction,
    pub render: RenderOptions,
    /// Echo drift sections but emit no reconstruction for them.
    pub skip_drift_reconstruction: bool,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            minimize: true,
            reduction: Reduction::default(),
            render: RenderOptions::default(),
            skip_drift_reconstruction: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// Input lines read.
    pub lines: usize,
    /// Sections whose reconstruction was written.
    pub sections: usize,
    /// Inverse pairs cancelled across all sections.
    pub cancelled_pairs: usize,
}

/// Echoes a line stream and appends a minimized reconstruction after every
/// drift or plan section.
///
/// Sections are processed one at a time as they are encountered; nothing is
/// carried from one section to the next apart from banner bookkeeping.
pub struct Transducer {
    options: StreamOptions,
    seen_drift: bool,
    seen_plan: bool,
    summary: StreamSummary,
}

impl Transducer {
    pub fn new(options: StreamOptions) -> Self {
        Self {
            options,
            seen_drift: false,
            seen_plan: false,
            summary: StreamSummary::default(),
        }
    }

    /// Runs until `input` is exhausted.
    ///
    /// A read failure aborts the section in progress (its partial tree is
    /// dropped without rendering) and ends the stream.
    pub fn run<R: BufRead, W: Write>(
        mut self,
        input: R,
        mut output: W,
    ) -> Result<StreamSummary, StreamError> {
        let mut source = LineSource::new(input);
        loop {
            let Some(raw) = source.next_line()? else {
                break;
            };
            echo(&mut output, raw)?;
            let banner = SectionKind::from_banner(&decode(raw));
            if let Some(kind) = banner {
                self.note_banner(kind, source.line_number());
                self.process_section(kind, &mut source, &mut output)
                    .inspect_err(|err| log::error!("Aborting {kind} section: {err}"))?;
            }
        }
        output.flush()?;
        self.summary.lines = source.line_number();
        Ok(self.summary)
    }

    fn note_banner(&mut self, kind: SectionKind, line: usize) {
        let seen = match kind {
            SectionKind::Drift => &mut self.seen_drift,
            SectionKind::Plan => &mut self.seen_plan,
        };
        if *seen {
            log::warn!("Encountered {kind} banner a second time at line {line}");
        }
        *seen = true;
    }

    fn process_section<R: BufRead, W: Write>(
        &mut self,
        kind: SectionKind,
        source: &mut LineSource<R>,
        output: &mut W,
    ) -> Result<(), StreamError> {
        let classifier = DiffLineClassifier;
        let mut builder = TreeBuilder::new();

        let end = loop {
            let Some(raw) = source.next_line()? else {
                break SectionEnd::EndOfInput;
            };
            echo(output, raw)?;
            let line = decode(raw).into_owned();
            if let Some(nested) = SectionKind::from_banner(&line) {
                log::warn!(
                    "{nested} banner inside {kind} section at line {}, treating it as content",
                    source.line_number()
                );
            }
            if let BuildStep::Complete(end) = builder.push(classifier.classify(&line)) {
                break end;
            }
        };

        let unclosed = builder.depth() - 1;
        match end {
            SectionEnd::UnbalancedClose => log::warn!(
                "Unbalanced closing brace ended {kind} section early at line {}",
                source.line_number()
            ),
            _ if unclosed > 0 => log::warn!(
                "{kind} section ended ({end:?}) with {unclosed} unclosed blocks at line {}",
                source.line_number()
            ),
            _ => {}
        }

        let mut root = builder.finish();
        if kind == SectionKind::Drift && self.options.skip_drift_reconstruction {
            log::debug!("Skipping reconstruction of drift section");
            return Ok(());
        }

        let cancelled = if self.options.minimize {
            Minimizer::new(self.options.reduction).minimize(&mut root)
        } else {
            0
        };
        write_rendered(&root, self.options.render, output)?;

        log::debug!(
            "Rendered {kind} section: {} leaves, depth {}, {cancelled} pairs cancelled",
            root.leaves().count(),
            root.depth()
        );
        self.summary.sections += 1;
        self.summary.cancelled_pairs += cancelled;
        Ok(())
    }
}

fn echo<W: Write>(output: &mut W, line: &[u8]) -> Result<(), StreamError> {
    output.write_all(line)?;
    output.write_all(b"\n")?;
    Ok(())
}

/// Text view of a raw line. Bytes that are not UTF-8 become U+FFFD, so
/// they can never look like a marker, brace or banner.
fn decode(raw: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(raw)
}

/// Byte-oriented line reader that remembers how far it got, for diagnostics.
///
/// Lines are returned without their `\n` or `\r\n` terminator. Their bytes are
/// passed on untouched, whatever the encoding.
struct LineSource<R> {
    input: R,
    buf: Vec<u8>,
    line_number: usize,
}

impl<R: BufRead> LineSource<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            buf: Vec::new(),
            line_number: 0,
        }
    }

    fn next_line(&mut self) -> Result<Option<&[u8]>, StreamError> {
        self.buf.clear();
        let read = self
            .input
            .read_until(b'\n', &mut self.buf)
            .map_err(|source| StreamError::Read {
                line: self.line_number + 1,
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        Ok(Some(&self.buf))
    }

    fn line_number(&self) -> usize {
        self.line_number
    }
}
