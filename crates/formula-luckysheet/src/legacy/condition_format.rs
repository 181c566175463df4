use serde::Deserialize;
use serde_json::Value;

use crate::model::{CellRange, CellRef};

/// One entry of a sheet's `luckysheet_conditionformat_save` list.
///
/// The meaning of Luckysheet's `format` field depends on `type` (a colour pair for highlight
/// rules, a colour list for bars and scales, an icon descriptor for icon sets); deserialization
/// resolves it into [`LegacyConditionRule`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "RawConditionFormat")]
pub struct LegacyConditionFormat {
    pub ranges: Vec<CellRange>,
    pub rule: LegacyConditionRule,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LegacyConditionRule {
    /// `type: "default"`: style cells satisfying `conditionName`.
    Highlight {
        condition_name: String,
        values: Vec<Value>,
        text_color: Option<String>,
        cell_color: Option<String>,
    },
    /// `type: "dataBar"`: `format` lists the bar colour (and gradient end colour).
    DataBar { colors: Vec<String> },
    /// `type: "colorGradation"`: `format` lists colours from the highest value to the lowest.
    ColorGradation { colors: Vec<String> },
    /// `type: "icons"`: `format` addresses a row of Luckysheet's icon sprite.
    Icons {
        len: u32,
        left_min: u32,
        top: u32,
    },
    Other { type_name: String },
}

impl LegacyConditionRule {
    pub fn type_name(&self) -> &str {
        match self {
            LegacyConditionRule::Highlight { .. } => "default",
            LegacyConditionRule::DataBar { .. } => "dataBar",
            LegacyConditionRule::ColorGradation { .. } => "colorGradation",
            LegacyConditionRule::Icons { .. } => "icons",
            LegacyConditionRule::Other { type_name } => type_name,
        }
    }
}

/// `{row: [r1, r2], column: [c1, c2]}`
#[derive(Clone, Debug, Deserialize)]
struct RawCellRange {
    row: [u32; 2],
    column: [u32; 2],
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConditionFormat {
    #[serde(rename = "type", default)]
    type_: Option<String>,
    #[serde(default)]
    cellrange: Vec<RawCellRange>,
    #[serde(default)]
    format: Value,
    #[serde(default)]
    condition_name: Option<String>,
    #[serde(default)]
    condition_value: Option<Vec<Value>>,
}

impl From<RawConditionFormat> for LegacyConditionFormat {
    fn from(raw: RawConditionFormat) -> Self {
        let ranges = raw
            .cellrange
            .iter()
            .map(|r| {
                CellRange::new(
                    CellRef::new(r.row[0], r.column[0]),
                    CellRef::new(r.row[1], r.column[1]),
                )
            })
            .collect();

        let type_name = raw.type_.unwrap_or_default();
        let rule = match type_name.as_str() {
            "default" => LegacyConditionRule::Highlight {
                condition_name: raw.condition_name.unwrap_or_default(),
                values: raw.condition_value.unwrap_or_default(),
                text_color: string_field(&raw.format, "textColor"),
                cell_color: string_field(&raw.format, "cellColor"),
            },
            "dataBar" => LegacyConditionRule::DataBar {
                colors: color_list(&raw.format),
            },
            "colorGradation" => LegacyConditionRule::ColorGradation {
                colors: color_list(&raw.format),
            },
            "icons" => LegacyConditionRule::Icons {
                len: u32_field(&raw.format, "len").unwrap_or(0),
                left_min: u32_field(&raw.format, "leftMin").unwrap_or(0),
                top: u32_field(&raw.format, "top").unwrap_or(0),
            },
            _ => LegacyConditionRule::Other { type_name },
        };

        LegacyConditionFormat { ranges, rule }
    }
}

fn string_field(format: &Value, key: &str) -> Option<String> {
    format
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn u32_field(format: &Value, key: &str) -> Option<u32> {
    format
        .get(key)
        .and_then(crate::js::js_number_value)
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32)
}

fn color_list(format: &Value) -> Vec<String> {
    format
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
