//! Split orchestration.
//!
//! Ties the filter and the chunk emitter together:
//! 1. read and filter the whole input file
//! 2. write the records into a temporary file next to the destination
//! 3. persist the temporary file under the final name
//!
//! The final file only appears once every record has been written, so a
//! failed run never leaves a truncated file under the output name.

use std::ffi::OsString;
use std::io::{self, BufWriter};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use log::{debug, info};
use tempfile::Builder;
use thiserror::Error;

use crate::chunker::write_chunks;
use crate::filter::filter_file;

/// Errors that can occur while splitting a sequence file.
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("chunk length must be a positive integer (got '{0}')")]
    ChunkLength(String),

    #[error("--max-splits must be a positive integer (got '{0}')")]
    MaxSplits(String),

    #[error("Failed to read input file {}: {source}", .path.display())]
    InputIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write output file {}: {source}", .path.display())]
    OutputIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for split operations.
pub type SplitResult<T> = Result<T, SplitError>;

/// Parses the chunk length argument.
///
/// Surrounding whitespace and a leading `+` are accepted; zero, negative
/// numbers and anything non-numeric are rejected.
pub fn parse_chunk_length(value: &str) -> SplitResult<NonZeroUsize> {
    parse_positive(value).ok_or_else(|| SplitError::ChunkLength(value.to_string()))
}

/// Parses the `--max-splits` argument, with the same rules as the chunk length.
pub fn parse_max_splits(value: &str) -> SplitResult<NonZeroUsize> {
    parse_positive(value).ok_or_else(|| SplitError::MaxSplits(value.to_string()))
}

fn parse_positive(value: &str) -> Option<NonZeroUsize> {
    value.trim().parse().ok()
}

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOptions {
    /// Sequence file to read
    pub input: PathBuf,
    /// Characters per output record
    pub chunk_len: NonZeroUsize,
    /// Emit at most this many records
    pub max_splits: Option<NonZeroUsize>,
}

impl SplitOptions {
    /// Creates options that emit every chunk.
    pub fn new(input: impl Into<PathBuf>, chunk_len: NonZeroUsize) -> Self {
        Self {
            input: input.into(),
            chunk_len,
            max_splits: None,
        }
    }

    /// Caps the number of emitted records.
    pub fn with_max_splits(mut self, max_splits: Option<NonZeroUsize>) -> Self {
        self.max_splits = max_splits;
        self
    }

    /// Destination path: `<input>_split_<len>.fa`, or
    /// `<input>_split_<len>x<max>.fa` when the record count is capped.
    ///
    /// The suffix is appended to the input path as a string, so any
    /// directory part of the input is kept as-is.
    pub fn output_path(&self) -> PathBuf {
        let mut name = OsString::from(self.input.as_os_str());
        name.push(format!("_split_{}", self.chunk_len));
        if let Some(max) = self.max_splits {
            name.push(format!("x{}", max));
        }
        name.push(".fa");
        PathBuf::from(name)
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSummary {
    /// File the records were written to
    pub output: PathBuf,
    /// Length of the cleaned sequence, in characters
    pub sequence_len: usize,
    /// Number of records written
    pub chunks_written: usize,
}

/// Runs the whole split: filter the input, then write the records.
pub fn run_split(options: &SplitOptions) -> SplitResult<SplitSummary> {
    let sequence = filter_file(&options.input)?;
    let output = options.output_path();
    debug!(
        "Splitting {} residues into chunks of {} -> {}",
        sequence.len(),
        options.chunk_len,
        output.display()
    );

    let output_err = |source| SplitError::OutputIo {
        path: output.clone(),
        source,
    };

    let mut tmp = output_builder()
        .tempfile_in(parent_dir(&output))
        .map_err(output_err)?;
    let chunks_written = write_chunks(
        &sequence,
        options.chunk_len,
        options.max_splits,
        BufWriter::new(tmp.as_file_mut()),
    )
    .map_err(output_err)?;
    tmp.as_file().sync_all().map_err(output_err)?;
    tmp.persist(&output).map_err(|e| output_err(e.error))?;

    info!(
        "Wrote {} chunks ({} residues) to {}",
        chunks_written,
        sequence.len(),
        output.display()
    );

    Ok(SplitSummary {
        output,
        sequence_len: sequence.len(),
        chunks_written,
    })
}

/// Temp file builder for the output.
///
/// Temporary files default to owner-only; on unix request 0666 instead, which
/// `open(2)` narrows by the process umask just like `File::create`.
#[cfg(unix)]
fn output_builder() -> Builder<'static, 'static> {
    use std::os::unix::fs::PermissionsExt;
    let mut builder = Builder::new();
    builder.permissions(std::fs::Permissions::from_mode(0o666));
    builder
}

#[cfg(not(unix))]
fn output_builder() -> Builder<'static, 'static> {
    Builder::new()
}

/// Directory that will hold `path`; the current directory for bare names.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
