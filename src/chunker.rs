//! Chunk emitter.
//!
//! Writes a `CleanedSequence` as FASTA-like records, one per chunk:
//!
//! ```text
//! >0
//! ACGT...            (70 characters per line)
//! >4
//! ACGT
//! ```
//!
//! The header holds the chunk's 0-based start offset in the cleaned
//! sequence. Chunk boundaries depend only on the sequence length and the
//! chunk length; the wrap width is always `WRAP_WIDTH`.

use std::io::{self, Write};
use std::num::NonZeroUsize;

use crate::model::{Chunk, CleanedSequence};

/// Writes one chunk: its header line, then its wrapped body.
pub fn write_chunk<W: Write>(chunk: &Chunk<'_>, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", chunk.header())?;
    for line in chunk.lines() {
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Writes the chunks of `sequence` in ascending offset order.
///
/// At most `limit` chunks are written when a limit is given. Returns the
/// number of chunks written. The writer is flushed before returning.
pub fn write_chunks<W: Write>(
    sequence: &CleanedSequence,
    chunk_len: NonZeroUsize,
    limit: Option<NonZeroUsize>,
    mut out: W,
) -> io::Result<usize> {
    let max = limit.map_or(usize::MAX, NonZeroUsize::get);
    let mut written = 0;

    for chunk in sequence.chunks(chunk_len).take(max) {
        write_chunk(&chunk, &mut out)?;
        written += 1;
    }

    out.flush()?;
    Ok(written)
}

/// Renders the records to a string.
///
/// Useful for testing or small in-memory inputs.
pub fn render_chunks(
    sequence: &CleanedSequence,
    chunk_len: NonZeroUsize,
    limit: Option<NonZeroUsize>,
) -> io::Result<String> {
    let mut buf = Vec::new();
    write_chunks(sequence, chunk_len, limit, &mut buf)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::SequenceFilter;
    use crate::model::WRAP_WIDTH;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    /// Splits rendered output back into (header offset, body) records.
    fn parse_records(output: &str) -> Vec<(usize, Vec<&str>)> {
        let mut records: Vec<(usize, Vec<&str>)> = Vec::new();
        for line in output.lines() {
            if let Some(offset) = line.strip_prefix('>') {
                records.push((offset.parse().unwrap(), Vec::new()));
            } else {
                records.last_mut().unwrap().1.push(line);
            }
        }
        records
    }

    #[test]
    fn test_scenario_two_chunks() {
        let seq = SequenceFilter::new().filter_str(">chr1\nACGT\nNNAC10GT\n");
        assert_eq!(render_chunks(&seq, nz(4), None).unwrap(), ">0\nACGT\n>4\nACGT\n");
    }

    #[test]
    fn test_scenario_short_last_chunk() {
        let seq = SequenceFilter::new().filter_str(">h\nAAAAA\n");
        assert_eq!(
            render_chunks(&seq, nz(2), None).unwrap(),
            ">0\nAA\n>2\nAA\n>4\nA\n"
        );
    }

    #[test]
    fn test_empty_sequence_writes_nothing() {
        let seq = CleanedSequence::default();
        let mut buf = Vec::new();
        let written = write_chunks(&seq, nz(5), None, &mut buf).unwrap();
        assert_eq!(written, 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_round_trip_and_sizes() {
        let bases = ['A', 'C', 'G', 'T'];
        let data: String = (0..1234).map(|i| bases[(i * 7 + i / 3) % 4]).collect();
        let seq = CleanedSequence::new(data.clone());

        for len in [1, 3, 69, 70, 71, 140, 500, 1234, 5000] {
            let output = render_chunks(&seq, nz(len), None).unwrap();
            let records = parse_records(&output);

            assert_eq!(records.len(), data.len().div_ceil(len), "L={}", len);

            let mut rebuilt = String::new();
            for (i, (offset, body)) in records.iter().enumerate() {
                assert_eq!(*offset, i * len, "header of chunk {} for L={}", i, len);

                let chunk: String = body.concat();
                if i + 1 < records.len() {
                    assert_eq!(chunk.len(), len);
                } else {
                    let expected_last = match data.len() % len {
                        0 => len,
                        rem => rem,
                    };
                    assert_eq!(chunk.len(), expected_last);
                }

                for (j, line) in body.iter().enumerate() {
                    if j + 1 < body.len() {
                        assert_eq!(line.len(), WRAP_WIDTH);
                    } else {
                        assert!(!line.is_empty() && line.len() <= WRAP_WIDTH);
                    }
                }
                rebuilt.push_str(&chunk);
            }
            assert_eq!(rebuilt, data, "round trip for L={}", len);
        }
    }

    #[test]
    fn test_limit_truncates_records() {
        let seq = CleanedSequence::new("ACGTACGTAC");
        let mut buf = Vec::new();
        let written = write_chunks(&seq, nz(2), Some(nz(3)), &mut buf).unwrap();

        assert_eq!(written, 3);
        assert_eq!(String::from_utf8(buf).unwrap(), ">0\nAC\n>2\nGT\n>4\nAC\n");
    }

    #[test]
    fn test_limit_above_chunk_count() {
        let seq = CleanedSequence::new("ACG");
        let output = render_chunks(&seq, nz(2), Some(nz(10))).unwrap();
        assert_eq!(output, ">0\nAC\n>2\nG\n");
    }

    #[test]
    fn test_render_non_ascii_records() {
        let seq = CleanedSequence::new("AéGé");
        let output = render_chunks(&seq, nz(3), None).unwrap();
        assert_eq!(output, ">0\nAéG\n>3\né\n");
    }

    #[test]
    fn test_write_error_is_propagated() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let seq = CleanedSequence::new("ACGT");
        let err = write_chunks(&seq, nz(2), None, Broken).unwrap_err();
        assert_eq!(err.to_string(), "disk full");
    }
}
