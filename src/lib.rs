//! # seqsplit - Fixed-length FASTA splitter
//!
//! Reformats a DNA sequence file into fixed-length, labeled records.
//!
//! ## Architecture
//!
//! The pipeline runs in two explicit passes:
//! - `filter`: strip headers, whitespace, digits and `N`/`n` into one cleaned sequence
//! - `chunker`: cut the cleaned sequence into chunks and write each as a
//!   `>offset` record wrapped at 70 columns
//! - `model`: the cleaned sequence and chunk views shared by both passes
//! - `split`: argument parsing, output naming, atomic write and errors
//!
//! ## Example
//!
//! ```
//! use std::num::NonZeroUsize;
//! use seqsplit::chunker::render_chunks;
//! use seqsplit::filter::SequenceFilter;
//!
//! let sequence = SequenceFilter::new().filter_str(">chr1\nACGT\nNNAC10GT\n");
//! let records = render_chunks(&sequence, NonZeroUsize::new(4).unwrap(), None).unwrap();
//! assert_eq!(records, ">0\nACGT\n>4\nACGT\n");
//! ```

pub mod chunker;
pub mod filter;
pub mod model;
pub mod split;
