use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fin_dispatch::{dispatch, dispatch_wrapped, iter_function_specs, Envelope};
use serde_json::Value;
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "finfn")]
#[command(about = "Evaluate spreadsheet-style financial functions from JSON requests.")]
struct Cli {
    /// Log verbosity (`off`, `error`, `warn`, `info`, `debug`, `trace`). Logs go to stderr.
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "info")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate one function against a JSON object of arguments.
    Call(CallArgs),
    /// Evaluate a `{"function_name": ..., "args": {...}}` request.
    Wrapped(InputArgs),
    /// List the supported functions and their required fields.
    List,
}

#[derive(Debug, Parser)]
struct CallArgs {
    /// Catalog name, e.g. `npv` or `xirr`. Names are case-sensitive.
    function: String,

    /// Arguments as a JSON object. If omitted, the object is read from `--input` or stdin.
    #[arg(long, conflicts_with = "input")]
    args: Option<String>,

    #[command(flatten)]
    source: InputArgs,
}

#[derive(Debug, Parser)]
struct InputArgs {
    /// Optional input file path. If omitted, reads from stdin.
    #[arg(long)]
    input: Option<PathBuf>,
}

fn init_logging(level: LevelFilter) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_all_input(input: &Option<PathBuf>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn parse_request(text: &str, origin: &str) -> Result<Value> {
    serde_json::from_str(text).with_context(|| format!("{origin} is not valid JSON"))
}

/// Writes `text` and a newline to stdout. A closed pipe on the reading side is not an error.
fn emit(text: &str) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    match writeln!(handle, "{text}").and_then(|()| handle.flush()) {
        Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        other => other.context("failed to write to stdout"),
    }
}

fn emit_envelope(envelope: &Envelope) -> Result<()> {
    emit(&envelope.to_json().to_string())
}

fn list_functions() -> Result<()> {
    for spec in iter_function_specs() {
        let required: Vec<String> = spec
            .schema
            .required
            .iter()
            .map(|set| set.join(", "))
            .collect();
        emit(&format!("{}\t{}", spec.name, required.join(" | ")))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match cli.command {
        Command::Call(call) => {
            let request = match &call.args {
                Some(text) => parse_request(text, "--args")?,
                None => parse_request(&read_all_input(&call.source.input)?, "input")?,
            };
            log::debug!("dispatching {} from the command line", call.function);
            emit_envelope(&dispatch(&call.function, &request, &()))
        }
        Command::Wrapped(source) => {
            let request = parse_request(&read_all_input(&source.input)?, "input")?;
            emit_envelope(&dispatch_wrapped(&request, &()))
        }
        Command::List => list_functions(),
    }
}
