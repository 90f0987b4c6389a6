//! Charset selection from labels and the locale environment

use std::env;
use std::fmt;

use encoding_rs::Encoding;

use crate::error::{Error, Result};

/// Labels for ISO-8859-1 proper, where byte `b` is always U+00`b`
const LATIN1_LABELS: &[&str] = &[
    "iso-8859-1",
    "iso8859-1",
    "iso_8859-1",
    "iso_8859-1:1987",
    "iso88591",
    "8859_1",
    "latin1",
    "l1",
    "iso-ir-100",
    "cp819",
    "ibm819",
    "csisolatin1",
];

/// Labels for 7-bit US-ASCII
const ASCII_LABELS: &[&str] = &[
    "us-ascii",
    "ascii",
    "ansi_x3.4-1968",
    "ansi_x3.4-1986",
    "iso646-us",
    "iso_646.irv:1991",
    "iso-ir-6",
    "us",
    "cp367",
    "ibm367",
    "csascii",
];

/// An input charset
///
/// `encoding_rs` follows the WHATWG label table, which reads ISO-8859-1 and
/// US-ASCII as windows-1252. Those two are kept apart here so that C1
/// controls survive as-is and non-ASCII bytes under US-ASCII are rejected.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// ISO-8859-1: every byte maps to the code point of the same value
    Latin1,
    /// US-ASCII: bytes above 0x7F are malformed
    Ascii,
    /// Anything else, decoded by `encoding_rs`
    Encoding(&'static Encoding),
}

impl Charset {
    /// Canonical name, used in logs and decode errors
    pub fn name(self) -> &'static str {
        match self {
            Charset::Latin1 => "ISO-8859-1",
            Charset::Ascii => "US-ASCII",
            Charset::Encoding(encoding) => encoding.name(),
        }
    }
}

impl From<&'static Encoding> for Charset {
    fn from(encoding: &'static Encoding) -> Self {
        Charset::Encoding(encoding)
    }
}

impl fmt::Debug for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve a charset label
///
/// ISO-8859-1 and US-ASCII labels are matched first, case-insensitively.
/// Every other label goes through the WHATWG Encoding Standard table, so
/// `"UTF-8"`, `"utf8"` and `"Shift_JIS"` are all accepted.
pub fn resolve_charset(label: &str) -> Result<Charset> {
    let label = label.trim();
    let is = |labels: &[&str]| labels.iter().any(|l| l.eq_ignore_ascii_case(label));

    if is(LATIN1_LABELS) {
        return Ok(Charset::Latin1);
    }
    if is(ASCII_LABELS) {
        return Ok(Charset::Ascii);
    }
    Encoding::for_label(label.as_bytes())
        .map(Charset::Encoding)
        .ok_or_else(|| Error::UnknownCharset(label.to_string()))
}

/// Charset named by the locale environment, if any
///
/// Looks at `LC_ALL`, `LC_CTYPE` and `LANG` in that order and takes the
/// codeset part of the first non-empty one (`en_US.UTF-8@euro` -> `UTF-8`).
pub fn locale_charset() -> Option<String> {
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.is_empty())
        .and_then(|locale| codeset(&locale).map(str::to_string))
}

/// Extract the codeset from a POSIX locale name
fn codeset(locale: &str) -> Option<&str> {
    let (_, rest) = locale.split_once('.')?;
    let set = rest.split('@').next().unwrap_or(rest);
    (!set.is_empty()).then_some(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codeset() {
        assert_eq!(codeset("en_US.UTF-8"), Some("UTF-8"));
        assert_eq!(codeset("de_DE.ISO-8859-15@euro"), Some("ISO-8859-15"));
        assert_eq!(codeset("C"), None);
        assert_eq!(codeset("POSIX"), None);
        assert_eq!(codeset("en_US."), None);
    }

    #[test]
    fn test_resolve_charset() {
        assert_eq!(resolve_charset("UTF-8").unwrap(), Charset::Encoding(encoding_rs::UTF_8));
        assert_eq!(resolve_charset("utf8").unwrap(), Charset::Encoding(encoding_rs::UTF_8));
        assert_eq!(
            resolve_charset("ISO-8859-15").unwrap(),
            Charset::Encoding(encoding_rs::ISO_8859_15)
        );
        assert!(resolve_charset("bogus").is_err());
    }

    #[test]
    fn test_resolve_latin1_and_ascii() {
        assert_eq!(resolve_charset(" latin1 ").unwrap(), Charset::Latin1);
        assert_eq!(resolve_charset("ISO-8859-1").unwrap(), Charset::Latin1);
        assert_eq!(resolve_charset("ISO8859-1").unwrap(), Charset::Latin1);
        assert_eq!(resolve_charset("US-ASCII").unwrap(), Charset::Ascii);
        assert_eq!(resolve_charset("ANSI_X3.4-1968").unwrap(), Charset::Ascii);
        // windows-1252 is still its own charset
        assert_eq!(
            resolve_charset("cp1252").unwrap(),
            Charset::Encoding(encoding_rs::WINDOWS_1252)
        );
    }
}
