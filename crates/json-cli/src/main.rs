//! `jsonfmt` CLI: validate, reformat, and query JSON documents.
//!
//! ## Usage
//!
//! ```sh
//! # Pretty-print (4-space indent) from stdin to stdout
//! echo '{"name":"Alice","scores":[1,2]}' | jsonfmt format
//!
//! # Compact, file to file
//! jsonfmt format --compact -i data.json -o data.min.json
//!
//! # Indent with tabs or a custom width
//! jsonfmt format --tab -i data.json
//! jsonfmt format --indent 2 -i data.json
//!
//! # Validate
//! jsonfmt check -i data.json
//!
//! # Look up a nested value by dotted path
//! jsonfmt get servers.0.host -i config.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use json_core::{FormatOptions, JsonError, Value};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jsonfmt", version, about = "Validate, format and query JSON documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log parser and file activity to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and write it back out with the chosen layout
    Format {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Indent nested levels by this many spaces
        #[arg(long, conflicts_with_all = ["tab", "compact"])]
        indent: Option<usize>,
        /// Indent nested levels with one tab each
        #[arg(long, conflicts_with = "compact")]
        tab: bool,
        /// Write everything on a single line
        #[arg(long)]
        compact: bool,
    },
    /// Check that a document is well-formed JSON
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the value at a dotted path such as `servers.0.host`
    Get {
        /// Dotted path; numeric segments index into arrays
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Format {
            input,
            output,
            indent,
            tab,
            compact,
        } => {
            let value = parse_input(input.as_deref())?;
            let options = format_options(indent, tab, compact);
            write_output(output.as_deref(), &value, &options)?;
        }
        Commands::Check { input } => {
            parse_input(input.as_deref())?;
            println!("valid");
        }
        Commands::Get { path, input } => {
            let value = parse_input(input.as_deref())?;
            let found = lookup(&value, &path)?;
            println!("{found}");
        }
    }

    Ok(())
}

/// `RUST_LOG` wins when set; otherwise each `-v` lowers the threshold.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn format_options(indent: Option<usize>, tab: bool, compact: bool) -> FormatOptions {
    if compact {
        FormatOptions::compact()
    } else if tab {
        FormatOptions::new("\t", "\n")
    } else if let Some(width) = indent {
        FormatOptions::new(" ".repeat(width), "\n")
    } else {
        FormatOptions::pretty()
    }
}

/// Walk `path` one dot-separated segment at a time. Segments that parse as
/// an index address arrays; everything else is an object key.
fn lookup<'a>(value: &'a Value, path: &str) -> Result<&'a Value> {
    let mut current = value;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        current = match (current, segment.parse::<usize>()) {
            (Value::Array(_), Ok(index)) => current.at_index(index),
            _ => current.at(segment),
        }
        .with_context(|| format!("Failed to resolve '{segment}' in path '{path}'"))?;
    }
    Ok(current)
}

fn parse_input(path: Option<&str>) -> Result<Value> {
    let Some(path) = path else {
        let text = read_stdin()?;
        tracing::debug!(source = "<stdin>", bytes = text.len(), "parsing input");
        return json_core::parse(&text).context("Invalid JSON in <stdin>");
    };
    tracing::debug!(source = path, "parsing input");
    json_core::parse_file(path).map_err(|err| {
        let context = match &err {
            JsonError::Io { .. } => format!("Failed to read file: {path}"),
            _ => format!("Invalid JSON in {path}"),
        };
        anyhow::Error::new(err).context(context)
    })
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read from stdin")?;
    Ok(buf)
}

/// Files get exactly the serialized document; stdout gets a trailing newline.
fn write_output(path: Option<&str>, value: &Value, options: &FormatOptions) -> Result<()> {
    match path {
        Some(path) => {
            json_core::write_file(path, value, options)
                .with_context(|| format!("Failed to write file: {path}"))?;
        }
        None => {
            println!("{}", json_core::to_string_with(value, options));
        }
    }
    Ok(())
}
