use super::{Document, EXIT_INVALID, EXIT_OK};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use pxshot_json::ParseOptions;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct FmtArgs {
    /// JSON file to reformat
    pub file: PathBuf,

    /// Print without any insignificant whitespace
    #[arg(long, conflicts_with = "indent")]
    pub compact: bool,

    /// Indent string (overrides config)
    #[arg(long)]
    pub indent: Option<String>,
}

pub fn fmt(args: FmtArgs, options: ParseOptions, config: &Config) -> Result<i32> {
    let Some(value) = Document::load(&args.file, options)?.into_value(&args.file) else {
        return Ok(EXIT_INVALID);
    };

    let mut serializer = config.serializer(args.compact, args.indent.as_deref());
    println!("{}", serializer.serialize(&value)?);
    Ok(EXIT_OK)
}
