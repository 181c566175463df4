//! Luckysheet export model (input side).
//!
//! Only the fields the converters read are modelled; everything else in an export is ignored
//! during deserialization. Luckysheet persists many numbers and flags loosely (`1`, `"1"`,
//! `true`), so such fields are kept as [`serde_json::Value`] and interpreted by the converters.

mod condition_format;
mod validation;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

pub use condition_format::{LegacyConditionFormat, LegacyConditionRule};
pub use validation::{LegacyValidation, LegacyValidationCell};

/// A full Luckysheet document (`luckysheet.toJson()`).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LegacyWorkbook {
    #[serde(default)]
    pub info: Option<LegacyInfo>,
    #[serde(default)]
    pub sheets: Vec<LegacySheet>,
}

impl From<Vec<LegacySheet>> for LegacyWorkbook {
    fn from(sheets: Vec<LegacySheet>) -> Self {
        Self { info: None, sheets }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LegacyInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub appversion: Option<String>,
}

/// One sheet of a Luckysheet document.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySheet {
    #[serde(default)]
    pub name: Option<String>,
    /// Sheet identifier; numeric or string depending on the exporting version.
    #[serde(default)]
    pub index: Option<Value>,
    #[serde(default)]
    pub order: Option<Value>,
    /// `0` visible, `1` hidden.
    #[serde(default)]
    pub hide: Option<Value>,
    /// Tab colour.
    #[serde(default)]
    pub color: Option<String>,
    /// Number of rows.
    #[serde(default)]
    pub row: Option<u32>,
    /// Number of columns.
    #[serde(default)]
    pub column: Option<u32>,
    #[serde(default)]
    pub zoom_ratio: Option<f64>,
    #[serde(default)]
    pub scroll_left: Option<f64>,
    #[serde(default)]
    pub scroll_top: Option<f64>,
    #[serde(default)]
    pub default_row_height: Option<f64>,
    #[serde(default)]
    pub default_col_width: Option<f64>,
    #[serde(default)]
    pub show_grid_lines: Option<Value>,
    #[serde(default)]
    pub frozen: Option<LegacyFrozen>,
    #[serde(default)]
    pub config: Option<LegacySheetConfig>,
    /// Sparse cells (`[{r, c, v}]`).
    #[serde(default)]
    pub celldata: Option<Vec<LegacyCellEntry>>,
    /// Dense cell matrix; used when `celldata` is absent.
    #[serde(default)]
    pub data: Option<Vec<Vec<Option<LegacyCellContent>>>>,
    /// Per-cell validation keyed by `"<row>_<column>"`, in document order.
    #[serde(default)]
    pub data_verification: Option<IndexMap<String, LegacyValidationCell>>,
    #[serde(default, rename = "luckysheet_conditionformat_save")]
    pub condition_formats: Option<Vec<LegacyConditionFormat>>,
}

/// `config`: merges and per-row/column overrides.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LegacySheetConfig {
    #[serde(default)]
    pub merge: Option<IndexMap<String, LegacyMerge>>,
    /// Row heights keyed by row index.
    #[serde(default)]
    pub rowlen: Option<IndexMap<String, f64>>,
    /// Column widths keyed by column index.
    #[serde(default)]
    pub columnlen: Option<IndexMap<String, f64>>,
    #[serde(default)]
    pub rowhidden: Option<IndexMap<String, Value>>,
    #[serde(default)]
    pub colhidden: Option<IndexMap<String, Value>>,
}

/// Merge anchored at `(r, c)` spanning `rs` rows and `cs` columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct LegacyMerge {
    pub r: u32,
    pub c: u32,
    pub rs: u32,
    pub cs: u32,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LegacyFrozen {
    /// `row`, `column`, `both`, `rangeRow`, `rangeColumn`, `rangeBoth` or `cancel`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub range: Option<LegacyFrozenRange>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct LegacyFrozenRange {
    #[serde(default)]
    pub row_focus: Option<u32>,
    #[serde(default)]
    pub column_focus: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LegacyCellEntry {
    pub r: u32,
    pub c: u32,
    #[serde(default)]
    pub v: Option<LegacyCellContent>,
}

/// A cell is either a full cell object or, in older exports, a bare scalar.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LegacyCellContent {
    Cell(LegacyCell),
    Scalar(Value),
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LegacyCell {
    /// Raw value.
    #[serde(default)]
    pub v: Option<Value>,
    /// Formatted display text.
    #[serde(default)]
    pub m: Option<Value>,
    /// Formula, including the leading `=`.
    #[serde(default)]
    pub f: Option<String>,
    /// Cell type / number format.
    #[serde(default)]
    pub ct: Option<LegacyCellType>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LegacyCellType {
    /// Number format (`General`, `@`, `0.00`, ...).
    #[serde(default)]
    pub fa: Option<String>,
    /// `g` general, `n` number, `s` string, `d` date, `inlineStr` rich text.
    #[serde(default)]
    pub t: Option<String>,
    /// Rich-text runs when `t == "inlineStr"`.
    #[serde(default)]
    pub s: Option<Vec<LegacyInlineRun>>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LegacyInlineRun {
    #[serde(default)]
    pub v: Option<String>,
}
