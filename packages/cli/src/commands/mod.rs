pub mod fmt;
pub mod get;
pub mod validate;

pub use fmt::{fmt, FmtArgs};
pub use get::{get, GetArgs};
pub use validate::{validate, ValidateArgs};

use anyhow::{Context, Result};
use colored::Colorize;
use pxshot_json::error::pretty::format_error;
use pxshot_json::{parse_bytes_with, ParseError, ParseOptions, Value};
use std::path::Path;

/// Every input parsed, or the lookup found a value
pub const EXIT_OK: i32 = 0;

/// Some input was malformed, or the lookup found nothing
pub const EXIT_INVALID: i32 = 1;

/// The command could not run at all (unreadable file, bad config)
pub const EXIT_FAILURE: i32 = 2;

/// Outcome of reading one input file
pub enum Document {
    Valid(Value),
    Malformed { source: String, error: ParseError },
}

impl Document {
    /// Read and parse `path`. Only I/O problems are errors; malformed JSON,
    /// invalid UTF-8 included, comes back as [`Document::Malformed`] so it
    /// can be reported.
    pub fn load(path: &Path, options: ParseOptions) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("Cannot read {}", path.display()))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "parsing");

        Ok(match parse_bytes_with(&bytes, options) {
            Ok(value) => Document::Valid(value),
            Err(error) => Document::Malformed {
                // Invalid sequences show up as U+FFFD in the report
                source: String::from_utf8_lossy(&bytes).into_owned(),
                error,
            },
        })
    }

    /// The parsed value, or print a report and give up on this file
    pub fn into_value(self, path: &Path) -> Option<Value> {
        match self {
            Document::Valid(value) => Some(value),
            Document::Malformed { source, error } => {
                report(path, &source, &error);
                None
            }
        }
    }
}

fn report(path: &Path, source: &str, error: &ParseError) {
    eprintln!("{} {}", "✗".red(), path.display());
    eprint!("{}", format_error(error, &path.to_string_lossy(), source));
}
