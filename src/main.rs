//! seqsplit - Fixed-length FASTA splitter
//!
//! Splits the sequence in a FASTA-like file into chunks of a given length.
//!
//! ## Usage
//!
//! ```bash
//! seqsplit <input_file> <chunk_length>
//! seqsplit -m 10 chr1.fa 1000   # Only the first 10 chunks
//! ```
//!
//! The result is written next to the input as `<input_file>_split_<chunk_length>.fa`
//! (`<input_file>_split_<chunk_length>x<max>.fa` with `--max-splits`).
//!
//! Set `RUST_LOG=debug` for progress messages.

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use seqsplit::split::{parse_chunk_length, parse_max_splits, run_split, SplitOptions};

/// seqsplit - Split a sequence file into fixed-length FASTA records
///
/// Header lines, whitespace, digits and N/n are removed from the input; the
/// remaining sequence is cut into chunks of CHUNK_LENGTH characters, each
/// written as a ">offset" record wrapped at 70 columns.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sequence file to split (FASTA-like text)
    input: PathBuf,

    /// Number of sequence characters per output record
    #[arg(value_parser = parse_chunk_length, allow_negative_numbers = true)]
    chunk_length: NonZeroUsize,

    /// Write at most this many records
    #[arg(short = 'm', long = "max-splits", value_parser = parse_max_splits)]
    max_splits: Option<NonZeroUsize>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let options = SplitOptions::new(args.input, args.chunk_length).with_max_splits(args.max_splits);

    run_split(&options)?;

    Ok(())
}
