//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellAddress`] - A cell's location (e.g., "A1") and the A1 codec
//! - [`CellRange`] - A rectangular block of cells (e.g., "A1:C10")
//! - [`CellValue`] - The value stored in a cell
//! - [`CellStorage`] - Sparse row-major storage with bounds tracking

mod address;
mod storage;
mod value;

pub use address::{decode_address, decode_range, encode_address, encode_range, CellAddress, CellRange};
pub use storage::CellStorage;
pub use value::CellValue;
