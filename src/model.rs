//! Data model for the sequence splitter.
//!
//! This module contains the data structures shared by the filter and the
//! chunker:
//! - `CleanedSequence`: the whole input after filtering
//! - `Chunk`: a borrowed, fixed-length window into that sequence
//!
//! Lengths and offsets are counted in characters. For plain ASCII sequence
//! data this is the same as counting bytes.

use std::num::NonZeroUsize;

/// Character that starts a header line, both in the input and in the output.
pub const RECORD_MARKER: char = '>';

/// Column width used to wrap the body of every emitted chunk.
pub const WRAP_WIDTH: usize = 70;

/// The input sequence with headers, whitespace, digits and `N`/`n` removed.
///
/// Built once by the filter and never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedSequence {
    data: String,
    char_len: usize,
}

impl CleanedSequence {
    /// Wraps an already-filtered buffer.
    pub fn new(data: impl Into<String>) -> Self {
        let data = data.into();
        let char_len = data.chars().count();
        Self { data, char_len }
    }

    /// Returns the length of the sequence, in characters.
    pub fn len(&self) -> usize {
        self.char_len
    }

    /// Returns true if nothing survived filtering.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the sequence as a string slice.
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Number of chunks of `chunk_len` characters needed to cover the sequence.
    pub fn chunk_count(&self, chunk_len: NonZeroUsize) -> usize {
        self.char_len.div_ceil(chunk_len.get())
    }

    /// Splits the sequence into consecutive chunks of `chunk_len` characters.
    ///
    /// The last chunk may be shorter. An empty sequence yields no chunks.
    pub fn chunks(&self, chunk_len: NonZeroUsize) -> Chunks<'_> {
        Chunks {
            rest: &self.data,
            offset: 0,
            chunk_len: chunk_len.get(),
            ascii: self.is_ascii(),
        }
    }

    /// True when every character is one byte, i.e. offsets are byte indices.
    fn is_ascii(&self) -> bool {
        self.char_len == self.data.len()
    }
}

/// One output record: a window of the cleaned sequence and where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// 0-based character offset of the first character in the cleaned sequence
    pub offset: usize,
    /// The chunk's characters
    pub text: &'a str,
    ascii: bool,
}

impl<'a> Chunk<'a> {
    /// Creates a chunk view starting at `offset`.
    pub fn new(offset: usize, text: &'a str) -> Self {
        Self {
            offset,
            text,
            ascii: text.is_ascii(),
        }
    }

    /// Returns the length of the chunk, in characters.
    pub fn len(&self) -> usize {
        if self.ascii {
            self.text.len()
        } else {
            self.text.chars().count()
        }
    }

    /// Returns true if the chunk holds no characters.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Header line for this chunk, without the line terminator.
    pub fn header(&self) -> String {
        format!("{}{}", RECORD_MARKER, self.offset)
    }

    /// The chunk body broken into lines of `WRAP_WIDTH` characters.
    pub fn lines(&self) -> WrappedLines<'a> {
        WrappedLines {
            rest: self.text,
            width: WRAP_WIDTH,
            ascii: self.ascii,
        }
    }
}

/// Iterator over the chunks of a `CleanedSequence`.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    rest: &'a str,
    offset: usize,
    chunk_len: usize,
    ascii: bool,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let (text, rest) = split_at_chars(self.rest, self.chunk_len, self.ascii);
        let chunk = Chunk {
            offset: self.offset,
            text,
            ascii: self.ascii,
        };
        self.rest = rest;
        self.offset += self.chunk_len;
        Some(chunk)
    }
}

/// Iterator over the fixed-width display lines of a chunk.
#[derive(Debug, Clone)]
pub struct WrappedLines<'a> {
    rest: &'a str,
    width: usize,
    ascii: bool,
}

impl<'a> Iterator for WrappedLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let (line, rest) = split_at_chars(self.rest, self.width, self.ascii);
        self.rest = rest;
        Some(line)
    }
}

/// Splits `s` after its first `n` characters (or at the end if shorter).
///
/// With `ascii` set the cut is a byte index; otherwise only the first `n`
/// characters are walked, never the whole of `s`.
fn split_at_chars(s: &str, n: usize, ascii: bool) -> (&str, &str) {
    if ascii {
        return s.split_at(n.min(s.len()));
    }
    match s.char_indices().nth(n) {
        Some((idx, _)) => s.split_at(idx),
        None => (s, ""),
    }
}
