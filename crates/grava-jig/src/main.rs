//! grava-jig: step through a stick-length manifest at the cutting jig.
//!
//! Prints one manifest line at a time and waits for Enter before the
//! next, so the operator can cut each stick with both hands free.
//! Progress persists in a `<stem>_line.txt` marker beside the
//! manifest; an interrupted session resumes at the first line that was
//! not acknowledged.
//!
//! # Usage
//!
//! ```text
//! grava-jig portrait_stick_length.txt
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use grava_export::write_atomic;

/// Step through stick-length manifests one line at a time, with a
/// persisted resume marker.
#[derive(Parser)]
#[command(name = "grava-jig", version)]
struct Cli {
    /// Stick-length manifest files produced by grava.
    #[arg(required = true)]
    manifests: Vec<PathBuf>,

    /// Zero-based line to start from, overriding the resume marker.
    #[arg(short, long)]
    start_line: Option<usize>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    let mut failures = 0usize;
    for manifest in &cli.manifests {
        if let Err(msg) = run_manifest(
            manifest,
            cli.start_line,
            &mut stdin.lock(),
            &mut stdout.lock(),
        ) {
            eprintln!("Error paging {}: {msg}", manifest.display());
            failures += 1;
        }
    }

    if failures > 0 {
        eprintln!("{failures} manifest(s) failed");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Resume marker beside the manifest: `<stem>_line.txt`.
fn marker_path(manifest: &Path) -> PathBuf {
    let stem = manifest
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("manifest");
    manifest.with_file_name(format!("{stem}_line.txt"))
}

/// Read the resume marker; a missing or unparsable marker restarts
/// from the top.
fn resume_line(marker: &Path) -> usize {
    std::fs::read_to_string(marker)
        .ok()
        .and_then(|text| text.trim().parse().ok())
        .unwrap_or(0)
}

/// Page through one manifest, persisting the marker after each
/// acknowledged line.
///
/// Lines before the starting line are skipped. Each remaining line is
/// printed and held until `input` yields a line; end-of-input stops
/// the session without advancing the marker, so the unacknowledged
/// line shows again next run.
fn run_manifest(
    manifest: &Path,
    start_override: Option<usize>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<(), String> {
    let marker = marker_path(manifest);
    let start = start_override.unwrap_or_else(|| resume_line(&marker));
    let text = std::fs::read_to_string(manifest).map_err(|e| e.to_string())?;

    eprintln!("{}: starting at line {start}", manifest.display());

    for (index, line) in text.lines().enumerate().skip(start) {
        writeln!(output, "{line}").map_err(|e| e.to_string())?;
        output.flush().map_err(|e| e.to_string())?;

        let mut ack = String::new();
        let read = input.read_line(&mut ack).map_err(|e| e.to_string())?;
        if read == 0 {
            break;
        }

        write_atomic(&marker, &format!("{}\n", index + 1)).map_err(|e| e.to_string())?;
    }
    Ok(())
}
