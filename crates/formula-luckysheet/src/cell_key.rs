//! Decoding of Luckysheet `"<row>_<column>"` position keys.
//!
//! Keys are validated: a half that is not a base-10 integer is an error rather than a `NaN`
//! coordinate. Callers decide whether a bad key skips an entry or aborts.

use thiserror::Error;

use crate::model::CellRef;

/// Errors raised when decoding a `"<row>_<column>"` key.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CellKeyError {
    #[error("cell key `{0}` has no `_` separator")]
    MissingSeparator(String),
    #[error("cell key `{key}` has an invalid row `{part}`")]
    InvalidRow { key: String, part: String },
    #[error("cell key `{key}` has an invalid column `{part}`")]
    InvalidColumn { key: String, part: String },
}

/// Decode a `"<row>_<column>"` key into a 0-indexed [`CellRef`].
///
/// The key is split on the first `_`; surrounding whitespace around either half is ignored.
pub fn parse_cell_key(key: &str) -> Result<CellRef, CellKeyError> {
    let Some((row, col)) = key.split_once('_') else {
        return Err(CellKeyError::MissingSeparator(key.to_string()));
    };
    let row = row.trim().parse::<u32>().map_err(|_| CellKeyError::InvalidRow {
        key: key.to_string(),
        part: row.to_string(),
    })?;
    let col = col.trim().parse::<u32>().map_err(|_| CellKeyError::InvalidColumn {
        key: key.to_string(),
        part: col.to_string(),
    })?;
    Ok(CellRef::new(row, col))
}

/// Decode a single-axis key (`config.rowlen`, `config.columnlen`, ...).
pub(crate) fn parse_axis_key(key: &str) -> Option<u32> {
    key.trim().parse::<u32>().ok()
}
