//! Events produced by the escape scanner
//!
//! These are the only things the scanner ever hands to the converter:
//! a literal character, one finished SGR parameter, or a dropped sequence.

use std::fmt;

/// How a parameter was terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    /// `;` - more parameters follow in the same sequence
    Separator,
    /// `m` - the sequence is complete
    Final,
}

/// Events produced by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEvent {
    /// Literal character outside any escape sequence
    Print(char),

    /// One finished SGR parameter
    /// An empty parameter is reported as 0
    Parameter { value: u32, terminator: Terminator },

    /// The sequence was dropped; parsing resumes in the normal state
    Abandoned(Diagnostic),
}

/// Recoverable anomaly found in the input
///
/// Each one is logged as a warning and the conversion carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// ESC followed by something other than `[`
    UnknownEscape(char),
    /// Mode set/reset (`h` / `l`) instead of `m`
    UnsupportedAttribute(char),
    /// A non-SGR control sequence (cursor movement, erase, ...)
    UnsupportedSequence(char),
    /// SGR parameter with no HTML mapping
    UnmappedParameter(u32),
    /// Input ended inside an escape sequence
    TruncatedSequence,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownEscape(c) => {
                write!(f, "Unknown Escape sequence found: {}", u32::from(*c))
            }
            Diagnostic::UnsupportedAttribute(c) => {
                write!(f, "Unsupported attribute found: {}", u32::from(*c))
            }
            Diagnostic::UnsupportedSequence(c) => {
                write!(f, "Unsupported control sequence found: {c:?}")
            }
            Diagnostic::UnmappedParameter(p) => write!(f, "Unsupported SGR parameter: {p}"),
            Diagnostic::TruncatedSequence => write!(f, "Input ended inside an escape sequence"),
        }
    }
}
