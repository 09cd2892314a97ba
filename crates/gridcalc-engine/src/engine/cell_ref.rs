//! Cell reference parsing and formatting.
//!
//! Bidirectional conversion between spreadsheet-style cell references
//! (e.g., "A1", "B2", "AA100") and zero-indexed column/row coordinates.
//! This is the caller-side encoding of a cell identity; the dependency
//! graph itself keys cells by equality and hash alone and never inspects
//! these coordinates.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A reference to a cell by column and row indices (0-indexed).
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a cell reference from spreadsheet notation (e.g., "A1", "AA10").
    /// Returns None if the input is invalid or the coordinates overflow.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<CellRef> {
        let caps = a1_re().captures(name)?;

        let mut col_acc = 0usize;
        for letter in caps["letters"].to_ascii_uppercase().bytes() {
            let digit = (letter - b'A') as usize + 1;
            col_acc = col_acc.checked_mul(26)?.checked_add(digit)?;
        }
        let col = col_acc.checked_sub(1)?;

        let row = caps["numbers"].parse::<usize>().ok()?.checked_sub(1)?;

        Some(CellRef::new(col, row))
    }

    /// Convert a column index to spreadsheet letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut letters = Vec::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            letters.push(b'A' + (n % 26) as u8);
            n /= 26;
        }
        letters.reverse();
        String::from_utf8(letters).expect("column letters are ASCII")
    }
}

fn a1_re() -> &'static Regex {
    static A1_RE: OnceLock<Regex> = OnceLock::new();
    A1_RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$")
            .expect("cell reference regex must compile")
    })
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CellRef::from_str(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::CellRef;

    #[test]
    fn test_parse_multi_letter_column() {
        let cell = CellRef::from_str("AA10").unwrap();
        assert_eq!(cell.col, 26);
        assert_eq!(cell.row, 9);
        assert_eq!(cell.to_string(), "AA10");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(CellRef::from_str("b3"), Some(CellRef::new(1, 2)));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(CellRef::from_str("").is_none());
        assert!(CellRef::from_str("A").is_none());
        assert!(CellRef::from_str("12").is_none());
        assert!(CellRef::from_str("A1B").is_none());
        assert!(CellRef::from_str("A0").is_none());
    }

    #[test]
    fn test_parse_overflow_returns_none() {
        let huge = format!("{}1", "Z".repeat(40));
        assert!(CellRef::from_str(&huge).is_none());
    }
}
