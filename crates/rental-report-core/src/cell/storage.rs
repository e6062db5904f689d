//! Cell storage implementation
//!
//! Sparse storage for worksheet cells. Only non-empty cells are stored, in a
//! row-based BTreeMap so iteration is always row-major.

use std::collections::BTreeMap;

use super::{CellAddress, CellRange, CellValue};

/// Sparse row-based storage for worksheet cells
///
/// Structure: `BTreeMap<row_index, BTreeMap<col_index, CellValue>>`.
///
/// The bounding range is grown on every insertion and never shrinks. It stays
/// `None` until the first non-empty value arrives, so an untouched top-left
/// corner is never reported as part of the range.
#[derive(Debug, Clone, Default)]
pub struct CellStorage {
    /// Row index → column map
    rows: BTreeMap<u32, BTreeMap<u16, CellValue>>,
    /// Bounding range of every stored cell
    bounds: Option<CellRange>,
    /// Number of stored cells
    len: usize,
}

impl CellStorage {
    /// Create a new empty cell storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cell value
    pub fn get(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Store a value, widening the bounds to cover it.
    ///
    /// Empty values are not stored and leave the bounds untouched. Returns
    /// whether anything was stored.
    pub fn insert(&mut self, addr: CellAddress, value: CellValue) -> bool {
        if value.is_empty() {
            return false;
        }

        let previous = self.rows.entry(addr.row).or_default().insert(addr.col, value);
        if previous.is_none() {
            self.len += 1;
        }

        match self.bounds.as_mut() {
            Some(bounds) => bounds.expand_to(addr),
            None => self.bounds = Some(CellRange::single(addr)),
        }
        true
    }

    /// Bounding range of the stored cells, `None` when nothing is stored
    pub fn bounds(&self) -> Option<CellRange> {
        self.bounds
    }

    /// Get the number of stored cells
    pub fn cell_count(&self) -> usize {
        self.len
    }

    /// Check if the storage is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over all cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u16, &CellValue)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, value)| (row, col, value)))
    }

    /// Iterate over cells in a specific row
    pub fn iter_row(&self, row: u32) -> impl Iterator<Item = (u16, &CellValue)> {
        self.rows
            .get(&row)
            .into_iter()
            .flat_map(|cols| cols.iter().map(|(&col, value)| (col, value)))
    }
}
