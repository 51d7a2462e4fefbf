//! Tailorbird - DNA sequence text editor
//!
//! ## Usage
//!
//! ```bash
//! tailorbird                          # empty editor
//! tailorbird seqs.txt --layout in-place
//! tailorbird seqs.txt --apply reverse-complement -o -   # batch mode
//! ```
//!
//! ## Keys
//!
//! - Type or paste sequences, one per line
//! - `F2`-`F8`: upper, lower, reverse, complement, reverse complement,
//!   add head, add tail; `F9`: copy output to input
//! - `Esc` then `:q`: quit

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use tailorbird::batch::run_batch;
use tailorbird::config::Config;
use tailorbird::controller::run_app;
use tailorbird::logging::init_file_logging;
use tailorbird::model::Layout;
use tailorbird::ops::{Affixes, Operation};

/// Result placement for the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    /// Separate input and output boxes
    Split,
    /// Results overwrite the input box
    InPlace,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Split => Layout::Split,
            LayoutArg::InPlace => Layout::InPlace,
        }
    }
}

/// Operation names for batch mode
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OperationArg {
    Upper,
    Lower,
    Reverse,
    Complement,
    ReverseComplement,
    AddHead,
    AddTail,
}

impl From<OperationArg> for Operation {
    fn from(arg: OperationArg) -> Self {
        match arg {
            OperationArg::Upper => Operation::Upper,
            OperationArg::Lower => Operation::Lower,
            OperationArg::Reverse => Operation::Reverse,
            OperationArg::Complement => Operation::Complement,
            OperationArg::ReverseComplement => Operation::ReverseComplement,
            OperationArg::AddHead => Operation::AddHead,
            OperationArg::AddTail => Operation::AddTail,
        }
    }
}

/// Tailorbird - edit DNA sequences line by line in the terminal
///
/// Without --apply, opens the interactive editor.
/// With --apply, runs one operation and writes the result to -o/--output.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text file to load into the input box (one sequence per line)
    file: Option<PathBuf>,

    /// Where results are written
    #[arg(short = 'L', long = "layout", value_enum, default_value = "split")]
    layout: LayoutArg,

    /// Text to prepend with "add head"
    #[arg(long = "head", default_value = "")]
    head: String,

    /// Text to append with "add tail"
    #[arg(long = "tail", default_value = "")]
    tail: String,

    /// Run one operation without the editor (reads FILE or stdin)
    #[arg(short = 'a', long = "apply", value_enum)]
    apply: Option<OperationArg>,

    /// Output file for --apply. Use "-" for stdout.
    #[arg(short = 'o', long = "output", default_value = "-", requires = "apply")]
    output: String,

    /// Write a log file to the system temp directory
    #[arg(long = "log")]
    log: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = if args.log {
        Some(init_file_logging(&std::env::temp_dir())?)
    } else {
        None
    };
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "tailorbird starting");

    if let Some(op) = args.apply {
        // Batch mode: no terminal UI
        run_batch(
            args.file.as_deref(),
            &args.output,
            op.into(),
            Affixes::new(&args.head, &args.tail),
        )?;
    } else {
        let config = Config {
            layout: args.layout.into(),
            head: args.head,
            tail: args.tail,
            input: String::new(),
        }
        .with_preload(args.file.as_deref())?;

        run_app(config.into_state())?;
    }

    if let Some(path) = log_path {
        eprintln!("Log written to {}", path.display());
    }

    Ok(())
}
