//! Terminal escape sequence parser
//!
//! A single-pass scanner that splits a character stream into literal text
//! and SGR parameters, plus the interpreter that maps each parameter to an
//! HTML style scope.

mod actions;
mod sgr;
mod state;

pub use actions::{Diagnostic, ScanEvent, Terminator};
pub use sgr::{interpret, Effect, Layer, Outcome, Sgr, SpanStyle, StyleFlag};
pub use state::{Scanner, State, ESCAPE_CHAR, MAX_ATTRIBUTES};
