// lintpack-apply: apply lint suggestions to a text file.
//
// Reads the text a checker ran on and the lints it reported (JSON), applies
// one suggestion per lint in a single batch and prints the corrected text.
//
// Usage:
//   lintpack-apply [OPTIONS] TEXT_FILE LINTS_JSON
//
// Options:
//   --pick N               Apply suggestion N of each lint (default 0, the preferred one)
//   --strict               Fail on Replace/InsertAfter suggestions without text
//   --max-suggestions N    Ignore all but the first N suggestions of each lint
//   -o, --output PATH      Write the result to PATH instead of stdout
//   -h, --help             Print help
//
// Logging goes to stderr; set LINTPACK_LOG=debug for details.

use std::io::{self, Write};
use std::path::Path;

use lintpack_core::{UnpackOptions, apply_suggestions, pick_edits};

fn print_help() {
    println!("lintpack-apply: Apply lint suggestions to a text file.");
    println!();
    println!("Usage: lintpack-apply [OPTIONS] TEXT_FILE LINTS_JSON");
    println!();
    println!("Applies one suggestion of every lint in LINTS_JSON to TEXT_FILE and");
    println!("prints the corrected text. Lints without the chosen suggestion are");
    println!("left alone. Overlapping edits abort without output.");
    println!();
    println!("Options:");
    println!("  --pick N               Suggestion to apply per lint (default 0)");
    println!("  --strict               Reject suggestions with empty replacement text");
    println!("  --max-suggestions N    Keep only the first N suggestions per lint");
    println!("  -o, --output PATH      Write to PATH instead of stdout");
    println!("  -h, --help             Print this help");
}

fn run(args: &[String]) -> Result<(), String> {
    let (pick, args) = lintpack_cli::take_option(args, "--pick", None)?;
    let (max_suggestions, args) = lintpack_cli::take_option(&args, "--max-suggestions", None)?;
    let (output, args) = lintpack_cli::take_option(&args, "--output", Some("-o"))?;
    let (strict, args) = lintpack_cli::take_flag(&args, "--strict");
    lintpack_cli::reject_unknown_options(&args)?;

    let [text_path, lints_path] = args.as_slice() else {
        return Err("expected TEXT_FILE and LINTS_JSON (see --help)".to_string());
    };

    let pick = match pick {
        Some(v) => lintpack_cli::parse_count("--pick", &v)?,
        None => 0,
    };
    let mut options = if strict {
        UnpackOptions::strict()
    } else {
        UnpackOptions::default()
    };
    if let Some(v) = max_suggestions {
        options.set_max_suggestions(Some(lintpack_cli::parse_count("--max-suggestions", &v)?));
    }

    let text = lintpack_cli::load_text(Path::new(text_path))?;
    let lints = lintpack_cli::load_lints(Path::new(lints_path), &options)?;
    let edits = pick_edits(&lints, pick);
    tracing::info!(
        lints = lints.len(),
        edits = edits.len(),
        pick,
        "applying suggestions"
    );

    let fixed = apply_suggestions(&text, &edits).map_err(|e| e.to_string())?;

    match output {
        Some(path) => {
            std::fs::write(&path, fixed).map_err(|e| format!("failed to write {path}: {e}"))
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            out.write_all(fixed.as_bytes())
                .and_then(|_| out.flush())
                .map_err(|e| format!("failed to write stdout: {e}"))
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if lintpack_cli::wants_help(&args) {
        print_help();
        return;
    }

    lintpack_cli::init_logging();
    if let Err(e) = run(&args) {
        lintpack_cli::fatal(&e);
    }
}
