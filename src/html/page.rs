//! HTML page framing and text escaping

use std::io::{self, Write};

/// Opens the body once the first input character arrives
pub const BODY_START: &str = "<pre style='font-family:monospace'>\n";

/// Closes the body at end of stream
pub const BODY_END: &str = "\n  </pre>\n";

/// Write the document head, up to and including `<body>`
pub fn write_header<W: Write + ?Sized>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(
        out,
        "<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01//EN\"\n \"http://www.w3.org/TR/html4/strict.dtd\">"
    )?;
    writeln!(out, "<html>\n <head>")?;
    writeln!(out, "  <title>{}</title>", escape_text(title))?;
    writeln!(
        out,
        "  <meta http-equiv='Content-Type' content='text/html; charset=UTF-8'>"
    )?;
    writeln!(out, " </head>\n <body>")
}

/// Write the closing paragraph and the end of the document
pub fn write_footer<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    write!(
        out,
        " <p><i>Generated by <b>{}</b> version {}.",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(out, " Copyright: {}</i></p>", env!("CARGO_PKG_AUTHORS"))?;
    write!(out, " </body>\n</html>")
}

/// Entity for a markup character, `None` for anything written as-is
fn entity(c: char) -> Option<&'static str> {
    match c {
        '"' => Some("&quot;"),
        '\'' => Some("&#039;"),
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        _ => None,
    }
}

/// Write one literal character, escaped for HTML
///
/// The five markup characters become entities, the rest of ASCII is written
/// as-is, and everything above ASCII becomes a decimal character reference.
pub fn write_escaped<W: Write + ?Sized>(out: &mut W, c: char) -> io::Result<()> {
    match entity(c) {
        Some(entity) => out.write_all(entity.as_bytes()),
        None if c.is_ascii() => out.write_all(&[c as u8]),
        None => write!(out, "&#{};", u32::from(c)),
    }
}

/// Escape a whole string with the same policy as [`write_escaped`]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match entity(c) {
            Some(entity) => out.push_str(entity),
            None if c.is_ascii() => out.push(c),
            None => out.push_str(&format!("&#{};", u32::from(c))),
        }
    }
    out
}
