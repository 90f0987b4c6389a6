//! out2html
//!
//! Converts terminal output with ANSI SGR escape sequences (bold, italic,
//! underline, 8/16-color and indexed color) into an HTML page that looks the
//! same, using nested inline-styled `<span>` elements.
//!
//! - `input`: charset decoding into a character stream
//! - `parser`: SGR escape scanner and attribute interpreter
//! - `html`: page framing, escaping and scope nesting
//! - `convert`: one conversion run
//! - `app`: configuration and the file-level driver
//!
//! ```
//! let html = out2html::convert_str("\x1b[1mbold\x1b[0m plain", "demo").unwrap();
//! assert!(html.contains("<span style='font-weight:bold'>bold</span> plain"));
//! ```

pub mod app;
pub mod color;
pub mod convert;
pub mod error;
pub mod html;
pub mod input;
pub mod parser;

pub use convert::{convert, convert_str, Converter, Report};
pub use error::{ConfigError, Error, Result};
pub use parser::Diagnostic;
