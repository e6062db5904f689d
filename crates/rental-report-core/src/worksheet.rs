//! Worksheet type

use crate::cell::{CellAddress, CellRange, CellStorage, CellValue};
use crate::error::Result;

/// A worksheet (single named sheet in a workbook)
///
/// A worksheet is loaded once, either from row-major data
/// ([`Worksheet::from_rows`]) or from addressed cells
/// ([`Worksheet::from_cells`]), and is read-only afterwards.
#[derive(Debug, Clone)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Cell storage
    cells: CellStorage,
}

impl Worksheet {
    /// Create a new empty worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
        }
    }

    /// Load a worksheet from row-major data.
    ///
    /// Row and column indices are taken from the position in the input.
    /// Values converting to [`CellValue::Empty`] are skipped: nothing is
    /// stored and the used range is not widened for them, so a trailing
    /// all-empty row does not show up in [`Worksheet::used_range`].
    pub fn from_rows<S, I, R, V>(name: S, rows: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let mut sheet = Self::new(name);
        for (row_idx, row) in rows.into_iter().enumerate() {
            for (col_idx, value) in row.into_iter().enumerate() {
                let value = value.into();
                if value.is_empty() {
                    continue;
                }
                let addr = CellAddress::checked(row_idx as u64, col_idx as u64)?;
                sheet.cells.insert(addr, value);
            }
        }
        Ok(sheet)
    }

    /// Load a worksheet from individually addressed cells.
    pub fn from_cells<S, I>(name: S, cells: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = (CellAddress, CellValue)>,
    {
        let mut sheet = Self::new(name);
        for (addr, value) in cells {
            let addr = CellAddress::checked(addr.row as u64, addr.col as u64)?;
            sheet.cells.insert(addr, value);
        }
        Ok(sheet)
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Cell Access ===

    /// Get a cell value by address string (e.g., "A1")
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Get cell value by indices
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cells.get(row, col).cloned().unwrap_or_default()
    }

    /// Borrow a stored cell value, `None` for empty cells
    pub fn value_at(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.cells.get(row, col)
    }

    /// Bounding range of all non-empty cells, `None` when the sheet is empty
    pub fn used_range(&self) -> Option<CellRange> {
        self.cells.bounds()
    }

    /// Number of stored (non-empty) cells
    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    /// Check if the sheet holds no values
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over all stored cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellValue)> {
        self.cells.iter()
    }

    /// Dense rows covering the used range, blanks filled with
    /// [`CellValue::Empty`]. An empty sheet yields no rows.
    pub fn rows(&self) -> Vec<Vec<CellValue>> {
        let Some(range) = self.used_range() else {
            return Vec::new();
        };

        (range.start.row..=range.end.row)
            .map(|row| {
                (range.start.col..=range.end.col)
                    .map(|col| self.get_value_at(row, col))
                    .collect()
            })
            .collect()
    }
}
