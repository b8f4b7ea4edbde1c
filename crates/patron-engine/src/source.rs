//! The tabular data source capability.
//!
//! The engine never talks to a concrete host spreadsheet API. It reads
//! a whole column as a snapshot, computes outcomes against that
//! snapshot, and writes back only changed cells in batched operations.
//! [`InMemoryTable`] is the reference implementation used by the CLI
//! and by every test.

use patron_model::{CellRef, CellValue, ColumnRef};

use crate::error::{EngineError, Result};

/// Read/write access to an ordered collection of named columns.
///
/// Row 1 is the header; rows >= 2 are data. All mutation entry points
/// are batched so an aborted pass never leaves a half-written column.
pub trait TabularSource {
    /// Number of rows, including the header row.
    fn row_count(&self) -> usize;

    /// Number of columns.
    fn column_count(&self) -> usize;

    /// Snapshot of an entire column, header included at index 0.
    fn column_values(&self, column: ColumnRef) -> Result<Vec<CellValue>>;

    /// Write a batch of cell values in one operation.
    fn set_cells(&mut self, changes: &[(CellRef, CellValue)]) -> Result<()>;

    /// Clear a batch of cell addresses in one operation.
    fn clear_cells(&mut self, cells: &[CellRef]) -> Result<()>;

    /// Delete one row by 1-based index, shifting later rows up.
    fn delete_row(&mut self, row: usize) -> Result<()>;
}

/// A plain in-memory table, row-major.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTable {
    rows: Vec<Vec<CellValue>>,
    width: usize,
}

impl InMemoryTable {
    /// Build a table from row-major cell data. Short rows are padded
    /// with empty cells so every column has the same height.
    pub fn new(mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, CellValue::Empty);
        }
        Self { rows, width }
    }

    /// Convenience constructor from string data (tests, CSV ingest).
    pub fn from_strings(rows: Vec<Vec<&str>>) -> Self {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(CellValue::from).collect())
                .collect(),
        )
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn cell(&self, cell: CellRef) -> Result<&CellValue> {
        let row = self.row_slot(cell.row)?;
        self.rows[row]
            .get(cell.column.index())
            .ok_or(EngineError::ColumnOutOfBounds(cell.column))
    }

    fn row_slot(&self, row: usize) -> Result<usize> {
        if row == 0 || row > self.rows.len() {
            return Err(EngineError::RowOutOfBounds(row));
        }
        Ok(row - 1)
    }
}

impl TabularSource for InMemoryTable {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.width
    }

    fn column_values(&self, column: ColumnRef) -> Result<Vec<CellValue>> {
        if column.index() >= self.width {
            return Err(EngineError::ColumnOutOfBounds(column));
        }
        Ok(self
            .rows
            .iter()
            .map(|row| row[column.index()].clone())
            .collect())
    }

    fn set_cells(&mut self, changes: &[(CellRef, CellValue)]) -> Result<()> {
        // Validate the whole batch first; a bad address must not leave
        // a partially applied write behind.
        for (cell, _) in changes {
            self.cell(*cell)?;
        }
        for (cell, value) in changes {
            let row = cell.row - 1;
            self.rows[row][cell.column.index()] = value.clone();
        }
        Ok(())
    }

    fn clear_cells(&mut self, cells: &[CellRef]) -> Result<()> {
        for cell in cells {
            self.cell(*cell)?;
        }
        for cell in cells {
            self.rows[cell.row - 1][cell.column.index()] = CellValue::Empty;
        }
        Ok(())
    }

    fn delete_row(&mut self, row: usize) -> Result<()> {
        let slot = self.row_slot(row)?;
        self.rows.remove(slot);
        Ok(())
    }
}
