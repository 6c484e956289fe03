//! Input filter.
//!
//! Turns a FASTA-like text file into one `CleanedSequence` by dropping:
//! - header lines (lines starting with `>`)
//! - spaces, tabs and line breaks (`\n`, `\r\n` and a lone `\r`)
//! - decimal digits
//! - ambiguous bases `N` and `n`
//!
//! Everything else is kept as-is, in order and case. No check is made that
//! the surviving characters are valid nucleotides.
//!
//! ## Example
//!
//! ```text
//! >chr1
//! ACGT
//! NNAC10GT
//! ```
//!
//! becomes `ACGTACGT`.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::model::{CleanedSequence, RECORD_MARKER};
use crate::split::{SplitError, SplitResult};

/// Lines between two progress log records.
const PROGRESS_EVERY: usize = 100_000;

/// Character filter applied to every input line.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceFilter;

impl SequenceFilter {
    /// Creates the filter.
    pub fn new() -> Self {
        Self
    }

    /// Returns true if `c` belongs in the cleaned sequence.
    pub fn keeps(&self, c: char) -> bool {
        !matches!(c, ' ' | '\t' | '\n' | 'N' | 'n') && !c.is_ascii_digit()
    }

    /// Appends the surviving characters of one input line to `out`.
    ///
    /// `line` may or may not include its terminator. A `\r` is a line break
    /// on its own (old Mac files) as well as inside `\r\n`, so one call may
    /// see several lines. Header lines contribute nothing.
    pub fn filter_line(&self, line: &str, out: &mut String) {
        let line = line.strip_suffix('\n').unwrap_or(line);
        if line.contains('\r') {
            for segment in line.split('\r') {
                self.filter_segment(segment, out);
            }
        } else {
            self.filter_segment(line, out);
        }
    }

    /// Filters one line that holds no line break.
    fn filter_segment(&self, line: &str, out: &mut String) {
        if line.starts_with(RECORD_MARKER) {
            return;
        }

        // Fast append: most sequence lines have nothing to remove
        if line.chars().all(|c| self.keeps(c)) {
            out.push_str(line);
        } else {
            out.extend(line.chars().filter(|&c| self.keeps(c)));
        }
    }

    /// Filters every line of `reader` into a cleaned sequence.
    pub fn filter_reader<R: BufRead>(&self, reader: R) -> io::Result<CleanedSequence> {
        let mut data = String::new();
        let mut line_number = 0;

        for line_result in reader.lines() {
            let line = line_result?;
            self.filter_line(&line, &mut data);

            line_number += 1;
            if line_number % PROGRESS_EVERY == 0 {
                debug!("Filtered {} lines ({} residues kept)", line_number, data.len());
            }
        }

        data.shrink_to_fit();
        Ok(CleanedSequence::new(data))
    }

    /// Filters in-memory content.
    ///
    /// Useful for testing or processing data that is already loaded.
    pub fn filter_str(&self, content: &str) -> CleanedSequence {
        let mut data = String::with_capacity(content.len());
        for line in content.lines() {
            self.filter_line(line, &mut data);
        }
        CleanedSequence::new(data)
    }
}

/// Reads and filters the file at `path`.
///
/// Open failures and read failures (including invalid UTF-8) are reported as
/// `SplitError::InputIo` carrying the path.
pub fn filter_file<P: AsRef<Path>>(path: P) -> SplitResult<CleanedSequence> {
    let path = path.as_ref();
    let input_err = |source| SplitError::InputIo {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(input_err)?;
    let reader = BufReader::with_capacity(1024 * 1024, file); // 1MB buffer
    let sequence = SequenceFilter::new().filter_reader(reader).map_err(input_err)?;

    debug!(
        "Read {}: {} residues after filtering",
        path.display(),
        sequence.len()
    );
    Ok(sequence)
}
