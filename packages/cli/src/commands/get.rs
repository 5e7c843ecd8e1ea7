use super::{Document, EXIT_INVALID, EXIT_OK};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pxshot_json::{print, ParseOptions, Value};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// JSON file to read
    pub file: PathBuf,

    /// Dot-separated member path, e.g. `data.items.0.url`
    pub path: String,

    /// Print strings without quotes
    #[arg(short, long)]
    pub raw: bool,
}

pub fn get(args: GetArgs, options: ParseOptions) -> Result<i32> {
    let Some(value) = Document::load(&args.file, options)?.into_value(&args.file) else {
        return Ok(EXIT_INVALID);
    };

    match lookup(&value, &args.path, args.raw)? {
        Some(text) => {
            println!("{}", text);
            Ok(EXIT_OK)
        }
        None => {
            eprintln!("{} no value at {}", "✗".red(), args.path.bold());
            Ok(EXIT_INVALID)
        }
    }
}

fn lookup(value: &Value, path: &str, raw: bool) -> Result<Option<String>> {
    let Some(found) = value.get_path(path) else {
        return Ok(None);
    };
    match found.as_str() {
        Some(s) if raw => Ok(Some(s.to_string())),
        _ => Ok(Some(print(found)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pxshot_json::parse;

    #[test]
    fn test_lookup() {
        let value = parse(r#"{"data":{"items":[{"url":"https://x"}],"count":1}}"#).unwrap();

        assert_eq!(lookup(&value, "data.count", false).unwrap().as_deref(), Some("1"));
        assert_eq!(
            lookup(&value, "data.items.0.url", false).unwrap().as_deref(),
            Some("\"https://x\"")
        );
        assert_eq!(
            lookup(&value, "data.items.0.url", true).unwrap().as_deref(),
            Some("https://x")
        );
        assert_eq!(
            lookup(&value, "data.items", true).unwrap().as_deref(),
            Some(r#"[{"url":"https://x"}]"#)
        );
        assert_eq!(lookup(&value, "data.items.3", false).unwrap(), None);
    }
}
