use super::{Document, EXIT_INVALID, EXIT_OK};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pxshot_json::ParseOptions;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON files, or directories to search for .json files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Only print failures
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn validate(args: ValidateArgs, options: ParseOptions) -> Result<i32> {
    let mut files = Vec::new();
    for input in &args.inputs {
        if input.is_dir() {
            files.extend(find_json_files(input));
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(anyhow!("Input path does not exist: {}", input.display()));
        }
    }

    let mut malformed = 0;
    for file in &files {
        match Document::load(file, options)?.into_value(file) {
            Some(_) if !args.quiet => println!("{} {}", "✓".green(), file.display()),
            Some(_) => {}
            None => malformed += 1,
        }
    }

    if !args.quiet {
        println!();
        println!("   Files checked: {}", files.len());
        if malformed > 0 {
            println!("   {} {}", "Malformed:".red(), malformed);
        }
    }

    Ok(if malformed > 0 { EXIT_INVALID } else { EXIT_OK })
}

fn find_json_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false))
        .collect();
    files.sort();
    files
}
