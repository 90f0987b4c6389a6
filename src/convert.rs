//! One conversion run
//!
//! [`Converter`] is the run context: it owns the scanner state, the scope
//! emitter and the page framing state, and pulls characters from a single
//! [`CharSource`]. Nothing outlives the run.

use std::io::Write;

use tracing::{debug, warn};

use crate::error::Result;
use crate::html::{page, ScopeEmitter};
use crate::input::CharSource;
use crate::parser::{self, Diagnostic, Effect, ScanEvent, Scanner, Terminator};

/// Summary of a finished conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Characters read from the input
    pub chars_read: u64,
    /// SGR sequences completed with `m`
    pub sequences: u64,
    /// Style scopes opened
    pub scopes_opened: u64,
    /// Recoverable anomalies, in input order
    pub diagnostics: Vec<Diagnostic>,
}

/// Converter from terminal output to an HTML page
#[derive(Debug)]
pub struct Converter<W: Write> {
    scanner: Scanner,
    emitter: ScopeEmitter<W>,
    title: String,
    /// Whether `<pre>` has been written
    body_started: bool,
    report: Report,
}

impl<W: Write> Converter<W> {
    pub fn new(out: W, title: impl Into<String>) -> Self {
        Self {
            scanner: Scanner::new(),
            emitter: ScopeEmitter::new(out),
            title: title.into(),
            body_started: false,
            report: Report::default(),
        }
    }

    /// Convert everything `source` yields
    ///
    /// On error the output is left as far as it got; no closing tags are
    /// written.
    pub fn run<S: CharSource + ?Sized>(mut self, source: &mut S) -> Result<Report> {
        page::write_header(self.emitter.writer(), &self.title)?;

        let mut source = Counted {
            inner: source,
            count: 0,
        };
        while let Some(c) = source.next_char()? {
            if !self.body_started {
                self.emitter.writer().write_all(page::BODY_START.as_bytes())?;
                self.body_started = true;
            }
            if let Some(event) = self.scanner.advance(c)? {
                self.dispatch(event, &mut source)?;
            }
        }
        self.report.chars_read = source.count;

        self.finish()?;
        Ok(self.report)
    }

    fn dispatch<S: CharSource + ?Sized>(&mut self, event: ScanEvent, source: &mut S) -> Result<()> {
        match event {
            ScanEvent::Print(c) => page::write_escaped(self.emitter.writer(), c)?,
            ScanEvent::Parameter { value, terminator } => {
                let outcome = parser::interpret(value, terminator, source)?;
                self.apply(outcome.effect)?;
                if outcome.terminator == Terminator::Final {
                    self.scanner.end_sequence();
                    if outcome.effect != Effect::Truncated {
                        self.report.sequences += 1;
                    }
                }
            }
            ScanEvent::Abandoned(diagnostic) => self.diagnose(diagnostic),
        }
        Ok(())
    }

    fn apply(&mut self, effect: Effect) -> Result<()> {
        match effect {
            Effect::Reset => {
                let closed = self.emitter.close_all()?;
                debug!(closed, "reset");
            }
            Effect::Open(style) => self.emitter.open(&style)?,
            Effect::Unmapped(value) => self.diagnose(Diagnostic::UnmappedParameter(value)),
            Effect::Truncated => self.diagnose(Diagnostic::TruncatedSequence),
        }
        Ok(())
    }

    fn diagnose(&mut self, diagnostic: Diagnostic) {
        warn!("{diagnostic}");
        self.report.diagnostics.push(diagnostic);
    }

    /// End of stream: close all scopes and the page
    fn finish(&mut self) -> Result<()> {
        if self.scanner.is_pending() {
            self.scanner.end_sequence();
            self.diagnose(Diagnostic::TruncatedSequence);
        }
        if self.body_started {
            self.emitter.close_all()?;
            let out = self.emitter.writer();
            out.write_all(page::BODY_END.as_bytes())?;
            page::write_footer(out)?;
        }
        self.report.scopes_opened = self.emitter.opened();
        self.emitter.flush()?;
        Ok(())
    }
}

/// Counts characters as they are pulled, including indexed color tails
/// read by the interpreter
struct Counted<'a, S: ?Sized> {
    inner: &'a mut S,
    count: u64,
}

impl<S: CharSource + ?Sized> CharSource for Counted<'_, S> {
    fn next_char(&mut self) -> Result<Option<char>> {
        let c = self.inner.next_char()?;
        if c.is_some() {
            self.count += 1;
        }
        Ok(c)
    }
}

/// Convert `source` into `out`
pub fn convert<S, W>(source: &mut S, out: W, title: &str) -> Result<Report>
where
    S: CharSource + ?Sized,
    W: Write,
{
    Converter::new(out, title).run(source)
}

/// Convert an in-memory string, returning the HTML page
pub fn convert_str(input: &str, title: &str) -> Result<String> {
    let mut out = Vec::with_capacity(input.len() * 2);
    convert(&mut input.chars(), &mut out, title)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
