mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{fmt, get, validate, FmtArgs, GetArgs, ValidateArgs, EXIT_FAILURE};
use config::Config;

/// pxjson - check, reformat and query JSON the way the Pxshot SDK reads it
#[derive(Parser, Debug)]
#[command(name = "pxjson")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Reject anything after the first complete value
    #[arg(long, global = true)]
    strict: bool,

    /// Deepest array/object nesting accepted (overrides config)
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// Log what is being read and parsed
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that files parse
    Validate(ValidateArgs),

    /// Parse a file and print it back out
    Fmt(FmtArgs),

    /// Print the value at a dot-separated path
    Get(GetArgs),
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| Config::load(&cwd))
        .and_then(|config| {
            let options = config.parse_options(cli.strict, cli.max_depth);
            tracing::debug!(?options, "parse options");

            match cli.command {
                Command::Validate(args) => validate(args, options),
                Command::Fmt(args) => fmt(args, options, &config),
                Command::Get(args) => get(args, options),
            }
        });

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!();
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            eprintln!();
            std::process::exit(EXIT_FAILURE);
        }
    }
}
