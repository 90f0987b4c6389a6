//! Configuration for a conversion run
//!
//! Sources, highest priority first:
//! - CLI arguments
//! - Environment variables (`OUT2HTML_CHARSET`, `OUT2HTML_TITLE`)
//! - Config file given with `--config`
//! - Defaults

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;
use tracing::warn;

use crate::error::{ConfigError, Error, Result};
use crate::input::{locale_charset, resolve_charset, Charset};

/// Default document title
pub const DEFAULT_TITLE: &str = "out2html";

/// CLI arguments
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "out2html")]
#[command(version)]
#[command(about = "Converts program output (and colors) to HTML")]
#[command(
    long_about = "A simple program to convert program output (f.e. from git diff) to a html file."
)]
pub struct CliArgs {
    /// Input file (default stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file (default stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Set the charset of the input (default: from the locale)
    #[arg(short, long, value_name = "CHARSET")]
    pub charset: Option<String>,

    /// Set the title of the HTML file
    #[arg(short, long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Path to a TOML config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Conversion configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input path, stdin if unset or `-`
    pub input: Option<PathBuf>,
    /// Output path, stdout if unset or `-`
    pub output: Option<PathBuf>,
    /// Input charset label, locale charset if unset
    pub charset: Option<String>,
    /// Document title
    pub title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            charset: None,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration with full precedence:
    /// CLI args > environment variables > config file > defaults
    pub fn load_with_args(args: &CliArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load_from_file(path)?,
            None => Config::default(),
        };

        config.apply_env(|name| env::var(name).ok());
        config.apply_cli_args(args);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| {
            Error::from(ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        })
    }

    /// Apply environment overrides through `lookup`
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("OUT2HTML_CHARSET") {
            self.charset = Some(val);
        }
        if let Some(val) = lookup("OUT2HTML_TITLE") {
            self.title = val;
        }
    }

    /// Apply CLI arguments to config
    fn apply_cli_args(&mut self, args: &CliArgs) {
        if let Some(input) = &args.input {
            self.input = Some(input.clone());
        }
        if let Some(output) = &args.output {
            self.output = Some(output.clone());
        }
        if let Some(charset) = &args.charset {
            self.charset = Some(charset.clone());
        }
        if let Some(title) = &args.title {
            self.title = title.clone();
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() {
            return Err(ConfigError::Invalid {
                field: "title",
                message: "must not be empty".to_string(),
            }
            .into());
        }
        if let Some(label) = &self.charset {
            if resolve_charset(label).is_err() {
                return Err(ConfigError::Invalid {
                    field: "charset",
                    message: format!("unknown charset '{label}'"),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Input path, `None` for stdin
    pub fn input_path(&self) -> Option<&Path> {
        self.input.as_deref().filter(|p| *p != Path::new("-"))
    }

    /// Output path, `None` for stdout
    pub fn output_path(&self) -> Option<&Path> {
        self.output.as_deref().filter(|p| *p != Path::new("-"))
    }

    /// The input charset
    ///
    /// An explicit charset must be known. A locale charset that is not
    /// known falls back to UTF-8 with a warning.
    pub fn input_charset(&self) -> Result<Charset> {
        if let Some(label) = &self.charset {
            return resolve_charset(label);
        }
        match locale_charset() {
            Some(label) => resolve_charset(&label).or_else(|_| {
                warn!("Unknown locale charset '{}', using UTF-8", label);
                Ok(Charset::Encoding(encoding_rs::UTF_8))
            }),
            None => Ok(Charset::Encoding(encoding_rs::UTF_8)),
        }
    }
}
