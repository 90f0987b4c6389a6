//! Input decoding
//!
//! Turns a byte stream in some charset into a forward-only stream of
//! Unicode scalar values. The escape scanner and the attribute interpreter
//! both pull from the same [`CharSource`], so an indexed color
//! sub-sequence can be read mid-attribute without buffering.

mod charset;

use std::io::{ErrorKind, Read};

use encoding_rs::{Decoder, DecoderResult};

use crate::error::{Error, Result};

pub use charset::{locale_charset, resolve_charset, Charset};

/// Size of the raw byte buffer refilled from the reader
const READ_CHUNK: usize = 8192;

/// A forward-only stream of characters
pub trait CharSource {
    /// Next character, `None` at end of stream
    fn next_char(&mut self) -> Result<Option<char>>;
}

impl CharSource for std::str::Chars<'_> {
    fn next_char(&mut self) -> Result<Option<char>> {
        Ok(self.next())
    }
}

/// Streaming charset decoder over a byte reader
///
/// Malformed input is an error, never replaced with U+FFFD.
pub struct CharDecoder<R> {
    reader: R,
    charset: Charset,
    /// Only set for charsets decoded by `encoding_rs`
    decoder: Option<Decoder>,
    /// Raw bytes read but not yet decoded
    buf: Vec<u8>,
    /// Decoded text waiting to be handed out
    pending: String,
    pos: usize,
    /// Bytes consumed by the decoder so far
    offset: u64,
    finished: bool,
}

impl<R: Read> CharDecoder<R> {
    /// Create a decoder for `charset`
    ///
    /// A byte order mark is not stripped; it decodes to U+FEFF like any
    /// other character.
    pub fn new(reader: R, charset: impl Into<Charset>) -> Self {
        let charset = charset.into();
        let decoder = match charset {
            Charset::Encoding(encoding) => Some(encoding.new_decoder_without_bom_handling()),
            Charset::Latin1 | Charset::Ascii => None,
        };
        Self {
            reader,
            charset,
            decoder,
            buf: vec![0; READ_CHUNK],
            pending: String::with_capacity(READ_CHUNK),
            pos: 0,
            offset: 0,
            finished: false,
        }
    }

    /// Create a decoder from a charset label such as `"UTF-8"` or `"latin1"`
    pub fn for_label(reader: R, label: &str) -> Result<Self> {
        Ok(Self::new(reader, resolve_charset(label)?))
    }

    /// Refill `pending` from the reader, returning false at end of stream
    fn fill(&mut self) -> Result<bool> {
        while !self.finished {
            let n = match self.reader.read(&mut self.buf) {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            let last = n == 0;

            self.pending.clear();
            self.pos = 0;

            let input = &self.buf[..n];
            match &mut self.decoder {
                Some(decoder) => decode_chunk(
                    decoder,
                    self.charset,
                    input,
                    last,
                    &mut self.pending,
                    &mut self.offset,
                )?,
                None => decode_single_byte(self.charset, input, &mut self.pending, &mut self.offset)?,
            }

            if last {
                self.finished = true;
            }
            if !self.pending.is_empty() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Decode one chunk through `encoding_rs`, carrying partial sequences over
fn decode_chunk(
    decoder: &mut Decoder,
    charset: Charset,
    mut input: &[u8],
    last: bool,
    out: &mut String,
    offset: &mut u64,
) -> Result<()> {
    loop {
        if let Some(needed) = decoder.max_utf8_buffer_length_without_replacement(input.len()) {
            out.reserve(needed);
        }
        let (result, read) = decoder.decode_to_string_without_replacement(input, out, last);
        input = &input[read..];
        *offset += read as u64;

        match result {
            DecoderResult::InputEmpty => return Ok(()),
            DecoderResult::OutputFull => continue,
            DecoderResult::Malformed(_, _) => {
                return Err(Error::Decode {
                    charset: charset.name(),
                    offset: *offset,
                });
            }
        }
    }
}

/// Decode ISO-8859-1 or US-ASCII bytes
fn decode_single_byte(charset: Charset, input: &[u8], out: &mut String, offset: &mut u64) -> Result<()> {
    out.reserve(input.len());
    for &b in input {
        *offset += 1;
        if charset == Charset::Ascii && !b.is_ascii() {
            return Err(Error::Decode {
                charset: charset.name(),
                offset: *offset,
            });
        }
        out.push(char::from(b));
    }
    Ok(())
}

impl<R: Read> CharSource for CharDecoder<R> {
    fn next_char(&mut self) -> Result<Option<char>> {
        if self.pos >= self.pending.len() && !self.fill()? {
            return Ok(None);
        }
        let c = self.pending[self.pos..].chars().next();
        if let Some(c) = c {
            self.pos += c.len_utf8();
        }
        Ok(c)
    }
}

impl<R> std::fmt::Debug for CharDecoder<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharDecoder")
            .field("charset", &self.charset)
            .field("offset", &self.offset)
            .field("finished", &self.finished)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<S: CharSource>(source: &mut S) -> Result<String> {
        let mut out = String::new();
        while let Some(c) = source.next_char()? {
            out.push(c);
        }
        Ok(out)
    }

    /// Reader that hands out one byte per read call
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.0.split_first() {
                Some((&b, rest)) if !buf.is_empty() => {
                    buf[0] = b;
                    self.0 = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    #[test]
    fn test_decode_utf8() {
        let mut dec = CharDecoder::new("Hello 世界".as_bytes(), encoding_rs::UTF_8);
        assert_eq!(collect(&mut dec).unwrap(), "Hello 世界");
        assert_eq!(dec.next_char().unwrap(), None);
    }

    #[test]
    fn test_decode_chunk_boundary() {
        // UTF-8 for '世' is E4 B8 96, split over three reads
        let bytes = "a世b".as_bytes();
        let mut dec = CharDecoder::new(Trickle(bytes), encoding_rs::UTF_8);
        assert_eq!(collect(&mut dec).unwrap(), "a世b");
    }

    #[test]
    fn test_decode_latin1_label() {
        let mut dec = CharDecoder::for_label(&[0x63, 0x61, 0x66, 0xE9][..], "latin1").unwrap();
        assert_eq!(collect(&mut dec).unwrap(), "café");
    }

    #[test]
    fn test_decode_latin1_c1_controls() {
        // C1 bytes stay C1 code points, not windows-1252 punctuation
        let mut dec = CharDecoder::for_label(&b"\x80\x9b\xff"[..], "ISO-8859-1").unwrap();
        assert_eq!(collect(&mut dec).unwrap(), "\u{80}\u{9b}\u{ff}");
    }

    #[test]
    fn test_decode_ascii() {
        let mut dec = CharDecoder::for_label(&b"plain\x1b[1m"[..], "US-ASCII").unwrap();
        assert_eq!(collect(&mut dec).unwrap(), "plain\x1b[1m");
    }

    #[test]
    fn test_decode_ascii_rejects_high_bytes() {
        let mut dec = CharDecoder::for_label(&b"a\xe9"[..], "US-ASCII").unwrap();
        let err = collect(&mut dec).unwrap_err();
        assert!(matches!(
            err,
            Error::Decode {
                charset: "US-ASCII",
                offset: 2
            }
        ));
    }

    #[test]
    fn test_decode_keeps_bom() {
        let mut dec = CharDecoder::new(&b"\xEF\xBB\xBFx"[..], encoding_rs::UTF_8);
        assert_eq!(collect(&mut dec).unwrap(), "\u{FEFF}x");
    }

    #[test]
    fn test_decode_malformed_is_error() {
        let mut dec = CharDecoder::new(&b"ok\xFF"[..], encoding_rs::UTF_8);
        let err = collect(&mut dec).unwrap_err();
        assert!(matches!(err, Error::Decode { charset: "UTF-8", .. }));
    }

    #[test]
    fn test_decode_truncated_sequence_is_error() {
        let mut dec = CharDecoder::new(&b"ab\xE4\xB8"[..], encoding_rs::UTF_8);
        assert!(collect(&mut dec).is_err());
    }

    #[test]
    fn test_unknown_label() {
        let err = CharDecoder::for_label(&b""[..], "no-such-charset").unwrap_err();
        assert!(matches!(err, Error::UnknownCharset(_)));
    }

    #[test]
    fn test_chars_source() {
        let mut chars = "ab".chars();
        assert_eq!(chars.next_char().unwrap(), Some('a'));
        assert_eq!(chars.next_char().unwrap(), Some('b'));
        assert_eq!(chars.next_char().unwrap(), None);
    }
}
