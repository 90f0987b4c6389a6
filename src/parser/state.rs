//! Escape Scanner State Machine
//!
//! Recognizes SGR sequences (`ESC [ <params> m`) in a character stream.
//! Everything outside a sequence is passed through as [`ScanEvent::Print`].
//!
//! States:
//! - Normal: plain text
//! - SawEscape: after ESC, waiting for `[`
//! - InParameterList: collecting `;`-separated decimal parameters
//!
//! ESC restarts a sequence from any state. The scanner never reads ahead;
//! the indexed color sub-sequence is pulled by the attribute interpreter,
//! which then tells the scanner whether the outer sequence ended
//! ([`Scanner::end_sequence`]).

use super::actions::{Diagnostic, ScanEvent, Terminator};
use crate::error::{Error, Result};

/// The escape introducer
pub const ESCAPE_CHAR: char = '\x1b';

/// Maximum number of parameters in one sequence
pub const MAX_ATTRIBUTES: usize = 32;

/// Scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Normal,
    SawEscape,
    InParameterList,
}

/// The escape scanner
#[derive(Debug, Default)]
pub struct Scanner {
    state: State,
    /// Current parameter being built
    param: u32,
    /// Parameters finished in the current sequence
    param_count: usize,
}

impl Scanner {
    /// Create a new scanner in the normal state
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Whether a sequence has been started but not completed
    pub fn is_pending(&self) -> bool {
        self.state != State::Normal
    }

    /// Return to the normal state, dropping any partial sequence
    pub fn end_sequence(&mut self) {
        self.state = State::Normal;
        self.param = 0;
        self.param_count = 0;
    }

    /// Process a single character
    ///
    /// Fails only when a sequence carries more than [`MAX_ATTRIBUTES`]
    /// parameters.
    pub fn advance(&mut self, c: char) -> Result<Option<ScanEvent>> {
        if c == ESCAPE_CHAR {
            self.end_sequence();
            self.state = State::SawEscape;
            return Ok(None);
        }

        match self.state {
            State::Normal => Ok(Some(ScanEvent::Print(c))),
            State::SawEscape => {
                if c == '[' {
                    self.state = State::InParameterList;
                    Ok(None)
                } else {
                    self.end_sequence();
                    Ok(Some(ScanEvent::Abandoned(Diagnostic::UnknownEscape(c))))
                }
            }
            State::InParameterList => self.process_parameter_list(c),
        }
    }

    fn process_parameter_list(&mut self, c: char) -> Result<Option<ScanEvent>> {
        match c {
            '0'..='9' => {
                let digit = u32::from(c) - u32::from('0');
                self.param = self.param.saturating_mul(10).saturating_add(digit);
                Ok(None)
            }
            ';' => self.finish_param(Terminator::Separator).map(Some),
            'm' => {
                let event = self.finish_param(Terminator::Final)?;
                self.end_sequence();
                Ok(Some(event))
            }
            'h' | 'l' => {
                self.end_sequence();
                Ok(Some(ScanEvent::Abandoned(Diagnostic::UnsupportedAttribute(c))))
            }
            // Any other final byte belongs to a non-SGR control sequence
            '@'..='~' => {
                self.end_sequence();
                Ok(Some(ScanEvent::Abandoned(Diagnostic::UnsupportedSequence(c))))
            }
            // Private markers and intermediates are ignored
            _ => Ok(None),
        }
    }

    fn finish_param(&mut self, terminator: Terminator) -> Result<ScanEvent> {
        self.param_count += 1;
        if self.param_count > MAX_ATTRIBUTES {
            return Err(Error::TooManyAttributes {
                max: MAX_ATTRIBUTES,
            });
        }
        let value = std::mem::take(&mut self.param);
        Ok(ScanEvent::Parameter { value, terminator })
    }
}
