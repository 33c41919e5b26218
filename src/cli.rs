//! Command-line front end: print every prime up to a bound, one per line.
//!
//! Command functions return `CliResult<T>`; only `run()` prints errors and exits.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;
use std::io::{self, BufWriter, Write};
use std::process;

use clap::{Parser, ValueEnum};
use tracing::info;

use crate::error::SieveError;
use crate::reference::DEFAULT_BOUND;
use crate::segment::{compute_primes_parallel, DEFAULT_SEGMENT_LEN};
use crate::sieve::{compute_primes_with, Layout};

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// User-facing error message plus the exit code to return to the shell.
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn failure(message: impl Into<String>) -> Self {
        CliError {
            message: message.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<SieveError> for CliError {
    fn from(error: SieveError) -> Self {
        CliError::failure(format!("error: {}", error))
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// One bit per number
    Packed,
    /// One byte per number
    Bytes,
}

impl From<LayoutArg> for Layout {
    fn from(layout: LayoutArg) -> Layout {
        match layout {
            LayoutArg::Packed => Layout::Packed,
            LayoutArg::Bytes => Layout::Bytes,
        }
    }
}

/// Print every prime up to BOUND with the Sieve of Eratosthenes
#[derive(Parser, Debug)]
#[command(name = "eratosthenes", version, long_about = None)]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// Inclusive upper bound; bounds below 2 print nothing
    #[arg(value_name = "BOUND", default_value_t = DEFAULT_BOUND)]
    pub bound: i64,

    /// Memory layout of the composite flags (sequential sieve only)
    #[arg(long, value_enum, default_value_t = LayoutArg::Packed, conflicts_with = "parallel")]
    pub layout: LayoutArg,

    /// Sieve segments above sqrt(BOUND) in parallel, always with packed flags
    #[arg(long)]
    pub parallel: bool,

    /// Numbers per segment; requires --parallel
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_SEGMENT_LEN,
        requires = "parallel"
    )]
    pub segment_len: usize,

    /// Print only the number of primes
    #[arg(long)]
    pub count: bool,
}

/// Parse arguments, sieve, print, and exit.
pub fn run() {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if let Err(error) = execute(&cli, &mut out) {
        eprintln!("{}", error);
        process::exit(error.exit_code.0);
    }
}

/// Sieve per the parsed arguments and write the result to out.
pub fn execute<W: Write>(cli: &Cli, out: &mut W) -> CliResult<()> {
    let primes = if cli.parallel {
        compute_primes_parallel(cli.bound, cli.segment_len)?
    } else {
        compute_primes_with(cli.bound, cli.layout.into())?
    };
    info!(bound = cli.bound, primes = primes.len(), "sieve finished");

    let written = if cli.count {
        writeln!(out, "{}", primes.len()).and_then(|_| out.flush())
    } else {
        write_primes(out, &primes)
    };
    match written {
        // A closed pipe (e.g. `| head`) means the reader has everything it wants.
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(error) => Err(CliError::failure(format!(
            "error: cannot write output: {}",
            error
        ))),
        Ok(()) => Ok(()),
    }
}

fn write_primes<W: Write>(out: &mut W, primes: &[u64]) -> io::Result<()> {
    for p in primes {
        writeln!(out, "{}", p)?;
    }
    out.flush()
}
