//! Scope emitter
//!
//! Owns the output stream and the number of open `<span>` scopes. Scopes
//! are never closed one at a time: a reset or the end of the stream closes
//! all of them at once, so a plain counter is enough to keep the markup
//! balanced.

use std::io::{self, Write};

use crate::parser::SpanStyle;

/// Closing tag for one scope
pub const CLOSE_TAG: &str = "</span>";

/// Writer that tracks open style scopes
#[derive(Debug)]
pub struct ScopeEmitter<W> {
    out: W,
    /// Scopes currently open
    depth: usize,
    /// Scopes opened over the whole run
    opened: u64,
}

impl<W: Write> ScopeEmitter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            depth: 0,
            opened: 0,
        }
    }

    /// Number of scopes currently open
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of scopes opened since creation
    pub fn opened(&self) -> u64 {
        self.opened
    }

    /// Open one nested scope
    pub fn open(&mut self, style: &SpanStyle) -> io::Result<()> {
        write!(self.out, "<span style='{style}'>")?;
        self.depth += 1;
        self.opened += 1;
        Ok(())
    }

    /// Close every open scope, returning how many were closed
    pub fn close_all(&mut self) -> io::Result<usize> {
        let closed = self.depth;
        for _ in 0..closed {
            self.out.write_all(CLOSE_TAG.as_bytes())?;
        }
        self.depth = 0;
        Ok(closed)
    }

    /// The underlying writer, for text outside any tag bookkeeping
    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
