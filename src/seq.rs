//! Nucleotide sequence transforms.
//!
//! Complementation uses a fixed table that pairs `A`/`T` and `G`/`C` in both
//! cases. Any other character (`N`, `U`, IUPAC codes, gaps, whitespace, ...)
//! passes through unchanged, so every transform preserves length.
//!
//! ```
//! use tailorbird::seq::{complement, reverse_complement};
//!
//! assert_eq!(complement("ATGC"), "TACG");
//! assert_eq!(reverse_complement("ATGC"), "GCAT");
//! ```

use std::fmt;
use std::str::Utf8Error;

use thiserror::Error;

/// Errors raised when raw input cannot be treated as a sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Sequence should be string")]
    NotText(#[from] Utf8Error),
}

/// Result type for sequence operations.
pub type SequenceResult<T> = Result<T, SequenceError>;

/// Returns the pairing partner of a single symbol.
///
/// Only `A`, `T`, `G`, `C` and their lowercase forms are mapped.
pub fn complement_base(c: char) -> char {
    match c {
        'A' => 'T',
        'T' => 'A',
        'G' => 'C',
        'C' => 'G',
        'a' => 't',
        't' => 'a',
        'g' => 'c',
        'c' => 'g',
        other => other,
    }
}

/// Complements every symbol of `sequence`, preserving order.
pub fn complement(sequence: &str) -> String {
    sequence.chars().map(complement_base).collect()
}

/// Complements `sequence` and reverses it (the opposite strand read 5' to 3').
pub fn reverse_complement(sequence: &str) -> String {
    sequence.chars().rev().map(complement_base).collect()
}

/// Checked [`complement`] for raw bytes.
pub fn try_complement(raw: &[u8]) -> SequenceResult<String> {
    Ok(complement(std::str::from_utf8(raw)?))
}

/// Checked [`reverse_complement`] for raw bytes.
pub fn try_reverse_complement(raw: &[u8]) -> SequenceResult<String> {
    Ok(reverse_complement(std::str::from_utf8(raw)?))
}

/// A sequence known to be text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    data: String,
}

impl Sequence {
    /// Creates a new sequence.
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }

    /// Returns the number of symbols.
    pub fn len(&self) -> usize {
        self.data.chars().count()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.data
    }

    pub fn complement(&self) -> Sequence {
        Sequence::new(complement(&self.data))
    }

    pub fn reverse_complement(&self) -> Sequence {
        Sequence::new(reverse_complement(&self.data))
    }
}

impl TryFrom<&[u8]> for Sequence {
    type Error = SequenceError;

    fn try_from(raw: &[u8]) -> SequenceResult<Self> {
        Ok(Sequence::new(std::str::from_utf8(raw)?))
    }
}

impl TryFrom<Vec<u8>> for Sequence {
    type Error = SequenceError;

    fn try_from(raw: Vec<u8>) -> SequenceResult<Self> {
        String::from_utf8(raw)
            .map(Sequence::new)
            .map_err(|e| SequenceError::NotText(e.utf8_error()))
    }
}

impl From<&str> for Sequence {
    fn from(data: &str) -> Self {
        Sequence::new(data)
    }
}

impl From<String> for Sequence {
    fn from(data: String) -> Self {
        Sequence { data }
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}
