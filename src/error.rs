//! Error types for the conversion

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Conversion error type
///
/// Every variant is fatal: the run stops and the document is left as far
/// as it got. Recoverable anomalies are reported as
/// [`Diagnostic`](crate::Diagnostic) values instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input file could not be opened
    #[error("Failed to open: {}: {source}", .path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Output file could not be created
    #[error("Failed to open: {}: {source}", .path.display())]
    OpenOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Charset label not known to the decoder
    #[error("Failed to set input encoding: unknown charset '{0}'")]
    UnknownCharset(String),

    /// Input bytes are not valid in the configured charset
    #[error("Failed to read input character: invalid {charset} sequence near byte {offset}")]
    Decode { charset: &'static str, offset: u64 },

    /// More parameters in one escape sequence than supported
    #[error("Max number of supported attributes reached ({max})")]
    TooManyAttributes { max: usize },

    /// Indexed color outside the color table
    #[error("Invalid color code element: {index}")]
    ColorOutOfRange { index: u32 },

    /// Unexpected character inside an indexed color sub-sequence
    #[error("Invalid 256 color code: {found:?}")]
    MalformedIndexedColor { found: char },

    /// Indexed color introducer (38/48) closed the sequence before its index
    #[error("Invalid 256 color code: sequence ended after {attribute}")]
    MissingIndexedColor { attribute: u32 },

    /// Configuration could not be loaded or is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Configuration error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    /// Config file is not valid TOML for [`Config`](crate::app::Config)
    #[error("Failed to parse config file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// A field holds an unusable value
    #[error("Config error in '{field}': {message}")]
    Invalid { field: &'static str, message: String },
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::TooManyAttributes { max: 32 };
        assert_eq!(err.to_string(), "Max number of supported attributes reached (32)");

        let err = Error::ColorOutOfRange { index: 9 };
        assert_eq!(err.to_string(), "Invalid color code element: 9");

        let err = Error::UnknownCharset("klingon".to_string());
        assert!(err.to_string().contains("klingon"));
    }

    #[test]
    fn test_config_error_converts() {
        let err: Error = ConfigError::Invalid {
            field: "title",
            message: "must not be empty".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Config error in 'title': must not be empty");
    }
}
