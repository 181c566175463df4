use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::CellRange;

/// Univer's numeric boolean (`0` / `1`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum BooleanNumber {
    False,
    True,
}

impl From<u8> for BooleanNumber {
    fn from(value: u8) -> Self {
        if value == 0 {
            BooleanNumber::False
        } else {
            BooleanNumber::True
        }
    }
}

impl From<BooleanNumber> for u8 {
    fn from(value: BooleanNumber) -> Self {
        match value {
            BooleanNumber::False => 0,
            BooleanNumber::True => 1,
        }
    }
}

impl From<bool> for BooleanNumber {
    fn from(value: bool) -> Self {
        if value {
            BooleanNumber::True
        } else {
            BooleanNumber::False
        }
    }
}

/// Univer `CellValueType`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CellValueType {
    String,
    Number,
    Boolean,
    /// Text that must not be coerced to a number (`@` format).
    ForceString,
}

impl TryFrom<u8> for CellValueType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CellValueType::String),
            2 => Ok(CellValueType::Number),
            3 => Ok(CellValueType::Boolean),
            4 => Ok(CellValueType::ForceString),
            other => Err(format!("unknown cell value type {other}")),
        }
    }
}

impl From<CellValueType> for u8 {
    fn from(value: CellValueType) -> Self {
        match value {
            CellValueType::String => 1,
            CellValueType::Number => 2,
            CellValueType::Boolean => 3,
            CellValueType::ForceString => 4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellScalar {
    Boolean(bool),
    Number(f64),
    String(String),
}

/// A cell in the Univer `cellData` matrix.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CellData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<CellScalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<CellValueType>,
    /// Formula text including the leading `=`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f: Option<String>,
}

impl CellData {
    pub fn is_empty(&self) -> bool {
        self.v.is_none() && self.f.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RowData {
    /// Height in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hd: Option<BooleanNumber>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnData {
    /// Width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hd: Option<BooleanNumber>,
}

/// Frozen panes. An axis that is not frozen has a split of `0` and a start of `-1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Freeze {
    pub x_split: u32,
    pub y_split: u32,
    pub start_row: i64,
    pub start_column: i64,
}

impl Freeze {
    /// Freeze the first `rows` rows and `cols` columns.
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            x_split: cols,
            y_split: rows,
            start_row: if rows == 0 { -1 } else { i64::from(rows) },
            start_column: if cols == 0 { -1 } else { i64::from(cols) },
        }
    }
}

/// Per-sheet snapshot (`IWorksheetData`).
///
/// Every field except `id` is optional: unset fields defer to the target application's own
/// defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetData {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<BooleanNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freeze: Option<Freeze>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_column_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_row_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_gridlines: Option<BooleanNumber>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merge_data: Vec<CellRange>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub cell_data: BTreeMap<u32, BTreeMap<u32, CellData>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub row_data: BTreeMap<u32, RowData>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub column_data: BTreeMap<u32, ColumnData>,
}

impl WorksheetData {
    /// Store `cell` at `(row, col)`, replacing any previous content.
    pub fn set_cell(&mut self, row: u32, col: u32, cell: CellData) {
        self.cell_data.entry(row).or_default().insert(col, cell);
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&CellData> {
        self.cell_data.get(&row).and_then(|cols| cols.get(&col))
    }

    pub fn cell_count(&self) -> usize {
        self.cell_data.values().map(BTreeMap::len).sum()
    }
}
