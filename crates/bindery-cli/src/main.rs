//! `bindery` CLI — validate report binding documents and convert them to IR.
//!
//! ## Usage
//!
//! ```sh
//! # Convert YAML from stdin to pretty IR JSON on stdout
//! cat bindings.yaml | bindery convert
//!
//! # Convert from file to file, compact output
//! bindery convert -i bindings.json -o report.ir.json --compact
//!
//! # Accept empty arrays as empty sequences
//! bindery convert -i bindings.yaml --allow-empty-arrays
//!
//! # Read converter options from a file
//! bindery convert -i bindings.yaml --config bindery.yaml
//!
//! # Validate only
//! bindery check -i bindings.yaml
//! ```
//!
//! Logging goes to stderr and honours `RUST_LOG`; `--verbose` lowers the
//! default level from `warn` to `debug`.

use anyhow::{Context, Result};
use bindery_core::{ConvertOptions, Document, EmptyArrayPolicy};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bindery",
    version,
    about = "Validate report binding documents and convert them to IR"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a binding document to IR JSON
    Convert {
        #[command(flatten)]
        source: SourceArgs,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Emit single-line JSON instead of pretty-printed JSON
        #[arg(long)]
        compact: bool,
    },
    /// Validate a binding document without writing IR
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Input format (defaults to JSON for .json files, YAML otherwise)
    #[arg(long, value_enum)]
    format: Option<Format>,
    /// Converter options file (YAML or JSON)
    #[arg(long)]
    config: Option<String>,
    /// Convert empty arrays to [] instead of rejecting them
    #[arg(long)]
    allow_empty_arrays: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Convert {
            source,
            output,
            compact,
        } => {
            let ir = load_and_convert(&source)?;
            let rendered = if compact {
                serde_json::to_string(&ir)?
            } else {
                serde_json::to_string_pretty(&ir)?
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Check { source } => {
            load_and_convert(&source)?;
            println!("ok");
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Read, build and convert the document named by `source`.
fn load_and_convert(source: &SourceArgs) -> Result<serde_json::Value> {
    let options = build_options(source)?;
    let text = read_input(source.input.as_deref())?;
    let format = source
        .format
        .unwrap_or_else(|| detect_format(source.input.as_deref()));
    tracing::debug!(?format, input = ?source.input, "loading binding document");

    let document = match format {
        Format::Yaml => Document::from_yaml_str(&text),
        Format::Json => Document::from_json_str(&text),
    }
    .context("Failed to build binding document")?;

    document
        .convert(&options)
        .context("Failed to convert binding document")
}

/// Options from `--config`, then command-line flags on top.
fn build_options(source: &SourceArgs) -> Result<ConvertOptions> {
    let mut options = match source.config.as_deref() {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            serde_yaml::from_str(&raw)
                .with_context(|| format!("Invalid config file: {}", path))?
        }
        None => ConvertOptions::default(),
    };
    if source.allow_empty_arrays {
        options.empty_arrays = EmptyArrayPolicy::Allow;
    }
    Ok(options)
}

/// `.json` files are JSON; everything else, stdin included, is read as YAML
/// (which also accepts JSON).
fn detect_format(path: Option<&str>) -> Format {
    let ext = path
        .and_then(|p| Path::new(p).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("json") => Format::Json,
        _ => Format::Yaml,
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
