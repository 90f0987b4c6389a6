//! Application glue module
//!
//! Configuration and the file-level driver used by the binary.

mod config;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};

use tracing::{debug, info};

pub use config::{CliArgs, Config, DEFAULT_TITLE};

use crate::convert::{convert, Report};
use crate::error::{Error, Result};
use crate::input::CharDecoder;

/// Run one conversion as described by `config`
///
/// Input and output files are opened here and closed when this returns,
/// on success and on error alike. Whatever was written before an error is
/// flushed.
pub fn run(config: &Config) -> Result<Report> {
    let charset = config.input_charset()?;
    debug!(charset = charset.name(), "input charset");

    let input: Box<dyn Read> = match config.input_path() {
        Some(path) => {
            let file = File::open(path).map_err(|source| Error::OpenInput {
                path: path.to_path_buf(),
                source,
            })?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let output: Box<dyn Write> = match config.output_path() {
        Some(path) => {
            let file = File::create(path).map_err(|source| Error::OpenOutput {
                path: path.to_path_buf(),
                source,
            })?;
            Box::new(file)
        }
        None => Box::new(io::stdout().lock()),
    };
    let mut output = BufWriter::new(output);

    let mut source = CharDecoder::new(input, charset);
    let result = convert(&mut source, &mut output, &config.title);
    let flushed = output.flush();

    let report = result?;
    flushed?;
    info!(
        chars = report.chars_read,
        sequences = report.sequences,
        scopes = report.scopes_opened,
        diagnostics = report.diagnostics.len(),
        "conversion finished"
    );
    Ok(report)
}
