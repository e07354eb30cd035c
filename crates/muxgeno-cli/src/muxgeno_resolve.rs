//! Multiplexed genotyping resolution CLI
//!
//! Usage: muxgeno_resolve [-i <INPUT>] [-o <OUTPUT>] [--strict] [--parallel] [--summary]
//!
//! Reads comma-separated pool records (`MUT,1,2` / `NORM,3,4`), one experiment
//! per blank-line separated block, and writes one report block per experiment.
//!
//! Example:
//!   muxgeno_resolve -i pools.csv -o calls.txt --summary
//!   cat pools.csv | muxgeno_resolve

use clap::{CommandFactory, Parser};
use muxgeno_deduce::{ResolveOptions, RunSummary, UnknownStatePolicy, resolve_stream};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "muxgeno_resolve",
    version,
    about = "Resolve per-sample genotype calls from multiplexed pooled-testing experiments"
)]
struct Cli {
    /// Input file [stdin]
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Output file [stdout]
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Fail on records whose state is neither MUT nor NORM instead of skipping them.
    #[arg(long)]
    strict: bool,
    /// Resolve experiments in parallel (reads the whole input first).
    #[arg(long)]
    parallel: bool,
    /// Print a run summary to stderr.
    #[arg(long)]
    summary: bool,
}

fn open_input(path: Option<&Path>) -> io::Result<Box<dyn BufRead>> {
    match path {
        Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn open_output(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

fn print_summary(summary: &RunSummary, elapsed_secs: f64) {
    eprintln!("Experiments: {}", summary.experiments);
    eprintln!("  Resolved:     {}", summary.resolved);
    eprintln!("  NONUNIQUE:    {}", summary.nonunique);
    eprintln!("  INCONSISTENT: {}", summary.inconsistent);
    eprintln!("Completed in {:.3} seconds.", elapsed_secs);
}

fn main() {
    let cli = Cli::parse();

    // Nothing piped in and no file given: show usage instead of blocking on the terminal.
    if cli.input.is_none() && io::stdin().is_terminal() {
        let _ = Cli::command().print_help();
        std::process::exit(1);
    }

    let input = match open_input(cli.input.as_deref()) {
        Ok(r) => r,
        Err(e) => {
            let name = cli.input.as_deref().unwrap_or(Path::new("<stdin>"));
            eprintln!("Error: cannot open input '{}': {}", name.display(), e);
            std::process::exit(1);
        }
    };

    let mut output = match open_output(cli.output.as_deref()) {
        Ok(w) => w,
        Err(e) => {
            let name = cli.output.as_deref().unwrap_or(Path::new("<stdout>"));
            eprintln!("Error: cannot create output '{}': {}", name.display(), e);
            std::process::exit(1);
        }
    };

    let policy = if cli.strict {
        UnknownStatePolicy::Reject
    } else {
        UnknownStatePolicy::Skip
    };
    let options = ResolveOptions::default()
        .with_policy(policy)
        .with_parallel(cli.parallel);

    let start = Instant::now();
    let summary = match resolve_stream(input, &mut output, options) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if summary.skipped_records > 0 {
        eprintln!(
            "Warning: skipped {} record(s) with a state other than MUT or NORM (use --strict to reject them).",
            summary.skipped_records
        );
    }

    if cli.summary {
        print_summary(&summary, start.elapsed().as_secs_f64());
    }
}
