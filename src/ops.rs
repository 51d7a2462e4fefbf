//! Buffer operations.
//!
//! A buffer is newline-delimited text holding one sequence per line. Every
//! operation strips trailing whitespace from the whole buffer, splits it on
//! `\n`, transforms each line on its own and joins the results back with `\n`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::seq::{complement, reverse_complement};

/// An edit applied to every line of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Upper,
    Lower,
    Reverse,
    Complement,
    ReverseComplement,
    /// Prepend the head text
    AddHead,
    /// Append the tail text
    AddTail,
}

/// Literal text used by [`Operation::AddHead`] and [`Operation::AddTail`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Affixes<'a> {
    pub head: &'a str,
    pub tail: &'a str,
}

impl<'a> Affixes<'a> {
    pub fn new(head: &'a str, tail: &'a str) -> Self {
        Self { head, tail }
    }
}

/// Error returned when an operation name is not recognized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown operation: {0}")]
pub struct ParseOperationError(pub String);

impl Operation {
    /// All operations, in button order.
    pub const ALL: [Operation; 7] = [
        Operation::Upper,
        Operation::Lower,
        Operation::Reverse,
        Operation::Complement,
        Operation::ReverseComplement,
        Operation::AddHead,
        Operation::AddTail,
    ];

    /// Short label for buttons and status messages.
    pub fn label(self) -> &'static str {
        match self {
            Operation::Upper => "Upper",
            Operation::Lower => "Lower",
            Operation::Reverse => "Reverse",
            Operation::Complement => "Complement",
            Operation::ReverseComplement => "Rev-comp",
            Operation::AddHead => "Add head",
            Operation::AddTail => "Add tail",
        }
    }

    /// Transforms a single line.
    pub fn apply_line(self, line: &str, affixes: Affixes<'_>) -> String {
        match self {
            Operation::Upper => line.to_uppercase(),
            Operation::Lower => line.to_lowercase(),
            Operation::Reverse => line.chars().rev().collect(),
            Operation::Complement => complement(line),
            Operation::ReverseComplement => reverse_complement(line),
            Operation::AddHead => format!("{}{}", affixes.head, line),
            Operation::AddTail => format!("{}{}", line, affixes.tail),
        }
    }

    /// Transforms a whole buffer line by line.
    pub fn apply(self, text: &str, affixes: Affixes<'_>) -> String {
        split_lines(text)
            .map(|line| self.apply_line(line, affixes))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Upper => "upper",
            Operation::Lower => "lower",
            Operation::Reverse => "reverse",
            Operation::Complement => "complement",
            Operation::ReverseComplement => "reverse-complement",
            Operation::AddHead => "add-head",
            Operation::AddTail => "add-tail",
        };
        f.write_str(name)
    }
}

impl FromStr for Operation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upper" => Ok(Operation::Upper),
            "lower" => Ok(Operation::Lower),
            "rev" | "reverse" => Ok(Operation::Reverse),
            "comp" | "complement" => Ok(Operation::Complement),
            "revcomp" | "reverse-complement" | "rc" => Ok(Operation::ReverseComplement),
            "head" | "add-head" => Ok(Operation::AddHead),
            "tail" | "add-tail" => Ok(Operation::AddTail),
            _ => Err(ParseOperationError(s.to_string())),
        }
    }
}

/// Converts `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Splits a buffer into its lines after stripping trailing whitespace.
///
/// An empty buffer yields a single empty line.
pub fn split_lines(text: &str) -> std::str::Split<'_, char> {
    text.trim_end().split('\n')
}

/// Number of lines an operation would touch.
pub fn line_count(text: &str) -> usize {
    split_lines(text).count()
}
