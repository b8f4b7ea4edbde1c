use std::fmt;

use crate::{ModelError, Result};

/// A column reference in A1 notation, stored as a 0-based index.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ColumnRef(usize);

impl ColumnRef {
    /// Parse a column letter such as `A` or `AB` (case insensitive).
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.len() > 3 {
            return Err(ModelError::InvalidColumnRef(value.to_string()));
        }
        let mut index = 0usize;
        for ch in trimmed.chars() {
            if !ch.is_ascii_alphabetic() {
                return Err(ModelError::InvalidColumnRef(value.to_string()));
            }
            index = index * 26 + (ch.to_ascii_uppercase() as usize - 'A' as usize + 1);
        }
        Ok(Self(index - 1))
    }

    /// Parse a comma-separated list of column letters, e.g. `A, C`.
    pub fn parse_list(value: &str) -> Result<Vec<Self>> {
        value.split(',').map(Self::parse).collect()
    }

    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }

    /// The column letter, e.g. index 0 -> `A`, index 27 -> `AB`.
    pub fn letter(self) -> String {
        let mut n = self.0 + 1;
        let mut letters = Vec::new();
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push((b'A' + rem as u8) as char);
            n = (n - 1) / 26;
        }
        letters.iter().rev().collect()
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.letter())
    }
}

/// A single cell address. `row` is 1-based; row 1 is the header.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CellRef {
    pub column: ColumnRef,
    pub row: usize,
}

impl CellRef {
    pub fn new(column: ColumnRef, row: usize) -> Result<Self> {
        if row == 0 {
            return Err(ModelError::InvalidRowIndex(row));
        }
        Ok(Self { column, row })
    }

    /// Parse an A1-style address such as `B12`.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let split = trimmed
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| ModelError::InvalidCellRef(value.to_string()))?;
        let column = ColumnRef::parse(&trimmed[..split])
            .map_err(|_| ModelError::InvalidCellRef(value.to_string()))?;
        let row: usize = trimmed[split..]
            .parse()
            .map_err(|_| ModelError::InvalidCellRef(value.to_string()))?;
        Self::new(column, row).map_err(|_| ModelError::InvalidCellRef(value.to_string()))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

/// A rectangular cell range such as `A2:C50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RangeRef {
    pub start: CellRef,
    pub end: CellRef,
}

impl RangeRef {
    pub fn parse(value: &str) -> Result<Self> {
        let (start, end) = value
            .split_once(':')
            .ok_or_else(|| ModelError::InvalidCellRef(value.to_string()))?;
        let start = CellRef::parse(start)?;
        let end = CellRef::parse(end)?;
        if end.row < start.row || end.column < start.column {
            return Err(ModelError::InvalidCellRef(value.to_string()));
        }
        Ok(Self { start, end })
    }

    pub fn columns(&self) -> impl Iterator<Item = ColumnRef> + '_ {
        (self.start.column.index()..=self.end.column.index()).map(ColumnRef::from_index)
    }
}

impl fmt::Display for RangeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}
