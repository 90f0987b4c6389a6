//! SGR attribute interpretation
//!
//! Maps one finished SGR parameter to its HTML effect. Parameter ranges are
//! classified into named categories first ([`Sgr::classify`]) and resolved
//! to an inline style second ([`interpret`]).
//!
//! The indexed color form `38;5;<n>` / `48;5;<n>` is the one place where
//! interpretation reads further input: the `5;<n>` tail is pulled straight
//! from the [`CharSource`], and its own terminator decides whether the
//! enclosing sequence has ended.

use std::fmt;

use super::actions::Terminator;
use crate::color::Palette;
use crate::error::{Error, Result};
use crate::input::CharSource;

/// Boolean text attributes that open a styled scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleFlag {
    Bold,
    Lighter,
    Italic,
    Underline,
    Blink,
    Strikethrough,
}

impl StyleFlag {
    /// Inline CSS declaration for this attribute
    pub fn css(self) -> &'static str {
        match self {
            StyleFlag::Bold => "font-weight:bold",
            StyleFlag::Lighter => "font-weight:lighter",
            StyleFlag::Italic => "font-style:italic;",
            StyleFlag::Underline => "text-decoration: underline;",
            StyleFlag::Blink => "text-decoration: blink;",
            StyleFlag::Strikethrough => "text-decoration: line-through;",
        }
    }
}

/// Text or background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Foreground,
    Background,
}

impl Layer {
    fn property(self) -> &'static str {
        match self {
            Layer::Foreground => "color",
            Layer::Background => "background-color",
        }
    }
}

/// Category of an SGR parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sgr {
    /// 0: close every open scope
    Reset,
    /// 1-6, 9
    Style(StyleFlag),
    /// 30-37, 40-47, 90-97, 100-107; carries the table index
    Color {
        layer: Layer,
        palette: Palette,
        index: usize,
    },
    /// 38 / 48: indexed color follows as a sub-sequence
    Indexed(Layer),
    /// Anything else
    Unmapped(u32),
}

impl Sgr {
    /// Classify a parameter value
    pub fn classify(param: u32) -> Self {
        let color = |layer, palette| Sgr::Color {
            layer,
            palette,
            index: (param % 10) as usize,
        };

        match param {
            0 => Sgr::Reset,
            1 => Sgr::Style(StyleFlag::Bold),
            2 => Sgr::Style(StyleFlag::Lighter),
            3 => Sgr::Style(StyleFlag::Italic),
            4 => Sgr::Style(StyleFlag::Underline),
            5 | 6 => Sgr::Style(StyleFlag::Blink),
            9 => Sgr::Style(StyleFlag::Strikethrough),
            30..=37 => color(Layer::Foreground, Palette::Standard),
            40..=47 => color(Layer::Background, Palette::Standard),
            90..=97 => color(Layer::Foreground, Palette::Bright),
            100..=107 => color(Layer::Background, Palette::Bright),
            38 => Sgr::Indexed(Layer::Foreground),
            48 => Sgr::Indexed(Layer::Background),
            other => Sgr::Unmapped(other),
        }
    }
}

/// The style carried by one open scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    Flag(StyleFlag),
    Color { layer: Layer, value: &'static str },
}

impl fmt::Display for SpanStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanStyle::Flag(flag) => f.write_str(flag.css()),
            SpanStyle::Color { layer, value } => write!(f, "{}:{}", layer.property(), value),
        }
    }
}

/// What a parameter does to the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Close all open scopes
    Reset,
    /// Open one new nested scope
    Open(SpanStyle),
    /// No mapping; nothing is emitted
    Unmapped(u32),
    /// Input ended inside an indexed color sub-sequence
    Truncated,
}

/// Result of interpreting one parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub effect: Effect,
    /// How the enclosing sequence continues after this parameter
    pub terminator: Terminator,
}

/// Interpret one finished parameter
///
/// For 38 and 48 the indexed color tail is read from `source`. An index
/// past the color table, a malformed tail, or 38/48 closing the sequence
/// outright are all fatal.
pub fn interpret<S: CharSource + ?Sized>(
    param: u32,
    terminator: Terminator,
    source: &mut S,
) -> Result<Outcome> {
    let effect = match Sgr::classify(param) {
        Sgr::Reset => Effect::Reset,
        Sgr::Style(flag) => Effect::Open(SpanStyle::Flag(flag)),
        Sgr::Color {
            layer,
            palette,
            index,
        } => Effect::Open(SpanStyle::Color {
            layer,
            value: lookup(palette, index as u32)?,
        }),
        Sgr::Unmapped(value) => Effect::Unmapped(value),
        Sgr::Indexed(layer) => {
            if terminator == Terminator::Final {
                return Err(Error::MissingIndexedColor { attribute: param });
            }
            return match read_indexed_color(source)? {
                Some((index, terminator)) => Ok(Outcome {
                    effect: Effect::Open(SpanStyle::Color {
                        layer,
                        value: lookup(Palette::Standard, index)?,
                    }),
                    terminator,
                }),
                None => Ok(Outcome {
                    effect: Effect::Truncated,
                    terminator: Terminator::Final,
                }),
            };
        }
    };

    Ok(Outcome { effect, terminator })
}

fn lookup(palette: Palette, index: u32) -> Result<&'static str> {
    usize::try_from(index)
        .ok()
        .and_then(|i| palette.get(i))
        .ok_or(Error::ColorOutOfRange { index })
}

/// Position inside the `5;<n>` tail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndexedState {
    Five,
    Separator,
    Digits,
}

/// Read `5 ; <digits>` terminated by `;` or `m`
///
/// Returns `None` if the input ends first.
fn read_indexed_color<S: CharSource + ?Sized>(
    source: &mut S,
) -> Result<Option<(u32, Terminator)>> {
    let mut state = IndexedState::Five;
    let mut index: u32 = 0;

    while let Some(c) = source.next_char()? {
        match (state, c) {
            (IndexedState::Five, '5') => state = IndexedState::Separator,
            (IndexedState::Separator, ';') => state = IndexedState::Digits,
            (IndexedState::Digits, ';') => return Ok(Some((index, Terminator::Separator))),
            (IndexedState::Digits, 'm') => return Ok(Some((index, Terminator::Final))),
            (IndexedState::Digits, '0'..='9') => {
                let digit = u32::from(c) - u32::from('0');
                index = index.saturating_mul(10).saturating_add(digit);
            }
            (_, found) => return Err(Error::MalformedIndexedColor { found }),
        }
    }

    Ok(None)
}
