use serde::{Deserialize, Serialize};

/// A reference to a single cell within a worksheet.
///
/// Rows and columns are **0-indexed**, matching both Luckysheet keys (`"0_0"` is `A1`) and the
/// Univer range model.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellRef {
    /// 0-indexed row.
    pub row: u32,
    /// 0-indexed column.
    pub col: u32,
}

impl CellRef {
    /// Construct a new [`CellRef`].
    #[inline]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// A rectangular, inclusive cell range in the Univer `IRange` shape.
///
/// The range is always normalized such that `start_row <= end_row` and
/// `start_column <= end_column`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRange {
    pub start_row: u32,
    pub start_column: u32,
    pub end_row: u32,
    pub end_column: u32,
}

impl CellRange {
    /// Construct a new range, normalizing coordinates if needed.
    pub const fn new(a: CellRef, b: CellRef) -> Self {
        let start_row = if a.row <= b.row { a.row } else { b.row };
        let end_row = if a.row <= b.row { b.row } else { a.row };
        let start_col = if a.col <= b.col { a.col } else { b.col };
        let end_col = if a.col <= b.col { b.col } else { a.col };
        Self {
            start_row,
            start_column: start_col,
            end_row,
            end_column: end_col,
        }
    }

    /// A degenerate range covering exactly `cell`.
    #[inline]
    pub const fn cell(cell: CellRef) -> Self {
        Self::new(cell, cell)
    }
}
