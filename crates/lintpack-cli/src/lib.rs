// lintpack-cli: shared utilities for CLI tools.

use std::path::Path;
use std::process;

use lintpack_core::{UnpackOptions, UnpackedLint, unpack_json};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter, e.g. `LINTPACK_LOG=debug`.
pub const LOG_ENV: &str = "LINTPACK_LOG";

/// Install a stderr `tracing` subscriber filtered by `LINTPACK_LOG`
/// (default: `warn`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Read the text the lints were computed against.
pub fn load_text(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("failed to read {}: {}", path.display(), e))
}

/// Read a JSON file holding one lint object or an array of them and unpack
/// it with `options`.
pub fn load_lints(path: &Path, options: &UnpackOptions) -> Result<Vec<UnpackedLint>, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| format!("{} is not valid JSON: {}", path.display(), e))?;
    let lints = unpack_json(&value, options).map_err(|e| format!("{}: {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), lints = lints.len(), "loaded lints");
    Ok(lints)
}

/// Remove a `--name=VALUE`, `--name VALUE` or `-s VALUE` option from `args`.
///
/// Returns `(value, remaining_args)`. A trailing option without a value is
/// an error.
pub fn take_option(
    args: &[String],
    long: &str,
    short: Option<&str>,
) -> Result<(Option<String>, Vec<String>), String> {
    let prefix = format!("{long}=");
    let mut value = None;
    let mut remaining = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if let Some(v) = arg.strip_prefix(&prefix) {
            value = Some(v.to_string());
        } else if arg == long || short == Some(arg.as_str()) {
            match iter.next() {
                Some(v) => value = Some(v.clone()),
                None => return Err(format!("{arg} requires a value")),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    Ok((value, remaining))
}

/// Remove a boolean `--flag` from `args`, returning whether it was present.
pub fn take_flag(args: &[String], flag: &str) -> (bool, Vec<String>) {
    let present = args.iter().any(|a| a == flag);
    let remaining = args.iter().filter(|a| *a != flag).cloned().collect();
    (present, remaining)
}

/// Parse a non-negative integer option value.
pub fn parse_count(name: &str, value: &str) -> Result<usize, String> {
    value
        .parse()
        .map_err(|_| format!("{name} expects a non-negative integer, got `{value}`"))
}

/// Reject leftover `-x`/`--xyz` arguments that no tool option consumed.
pub fn reject_unknown_options(args: &[String]) -> Result<(), String> {
    match args.iter().find(|a| a.starts_with('-') && a.len() > 1) {
        Some(a) => Err(format!("unknown option {a}")),
        None => Ok(()),
    }
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

/// The chars of `text` covered by `[start, end)`.
pub fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end.saturating_sub(start)).collect()
}

/// 1-based line and column of char offset `pos`.
pub fn line_col(text: &str, pos: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for c in text.chars().take(pos) {
        if c == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}
