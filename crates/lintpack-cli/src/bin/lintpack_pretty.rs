// lintpack-pretty: Pretty-print lints against the text they were computed on.
//
// Prints every lint in a human-readable, diff-able format:
//
//   L1:1 Spelling (0..3)
//   E: Did you mean to spell “Teh” this way?
//   E: "Teh"
//   S:  Replace with “The”  =>  "The cat sat"
//   =================================================
//
// Usage:
//   lintpack-pretty [OPTIONS] TEXT_FILE LINTS_JSON
//
// Options:
//   --max-suggestions N   Show at most N suggestions per lint
//   --no-preview          Do not show the line with each suggestion applied
//   -h, --help            Print help

use std::io::{self, Write};
use std::path::Path;

use lintpack_core::{UnpackOptions, UnpackedLint, apply_suggestion};

const SEPARATOR: &str = "=================================================";

/// The full line of `text` containing char offset `pos`, as
/// `(line_start, line_text)`.
fn line_around(text: &str, pos: usize) -> (usize, String) {
    let chars: Vec<char> = text.chars().collect();
    let pos = pos.min(chars.len());
    let start = chars[..pos]
        .iter()
        .rposition(|&c| c == '\n')
        .map_or(0, |i| i + 1);
    let end = chars[pos..]
        .iter()
        .position(|&c| c == '\n')
        .map_or(chars.len(), |i| pos + i);
    (start, chars[start..end].iter().collect())
}

fn print_lint(
    text: &str,
    lint: &UnpackedLint,
    preview: bool,
    out: &mut impl Write,
) -> io::Result<()> {
    let (line, col) = lintpack_cli::line_col(text, lint.span.start);
    writeln!(out, "L{line}:{col} {} ({})", lint.lint_kind_pretty, lint.span)?;
    writeln!(out, "E: {}", lint.message)?;

    let actual = lintpack_cli::char_slice(text, lint.span.start, lint.span.end);
    if actual == lint.problem_text {
        writeln!(out, "E: \"{actual}\"")?;
    } else {
        writeln!(out, "E: \"{actual}\" (reported as \"{}\")", lint.problem_text)?;
    }

    for suggestion in &lint.suggestions {
        if !preview {
            writeln!(out, "S:  {suggestion}")?;
            continue;
        }
        match apply_suggestion(text, lint.span, suggestion) {
            Ok(fixed) => {
                let (_, fixed_line) = line_around(&fixed, lint.span.start);
                writeln!(out, "S:  {suggestion}  =>  \"{fixed_line}\"")?;
            }
            Err(e) => writeln!(out, "S:  {suggestion}  !!  {e}")?,
        }
    }
    if lint.suggestions.is_empty() {
        writeln!(out, "S:  (none)")?;
    }
    writeln!(out, "{SEPARATOR}")
}

fn run(args: &[String]) -> Result<(), String> {
    let (max_suggestions, args) = lintpack_cli::take_option(args, "--max-suggestions", None)?;
    let (no_preview, args) = lintpack_cli::take_flag(&args, "--no-preview");
    lintpack_cli::reject_unknown_options(&args)?;

    let [text_path, lints_path] = args.as_slice() else {
        return Err("expected TEXT_FILE and LINTS_JSON (see --help)".to_string());
    };

    let mut options = UnpackOptions::default();
    if let Some(v) = max_suggestions {
        options.set_max_suggestions(Some(lintpack_cli::parse_count("--max-suggestions", &v)?));
    }

    let text = lintpack_cli::load_text(Path::new(text_path))?;
    let mut lints = lintpack_cli::load_lints(Path::new(lints_path), &options)?;
    lints.sort_by_key(|l| (l.span.start, l.span.end));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    for lint in &lints {
        print_lint(&text, lint, !no_preview, &mut out).map_err(|e| e.to_string())?;
    }
    out.flush().map_err(|e| e.to_string())
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if lintpack_cli::wants_help(&args) {
        println!("lintpack-pretty: Pretty-print lints against their text.");
        println!();
        println!("Usage: lintpack-pretty [OPTIONS] TEXT_FILE LINTS_JSON");
        println!();
        println!("Options:");
        println!("  --max-suggestions N   Show at most N suggestions per lint");
        println!("  --no-preview          Do not show each suggestion applied");
        println!("  -h, --help            Print this help");
        return;
    }

    lintpack_cli::init_logging();
    if let Err(e) = run(&args) {
        lintpack_cli::fatal(&e);
    }
}
