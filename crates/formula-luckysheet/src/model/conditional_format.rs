use serde::{Deserialize, Serialize};

use crate::model::CellRange;

/// A conditional-formatting rule (`IConditionFormattingRule`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalFormatRule {
    pub cf_id: String,
    pub ranges: Vec<CellRange>,
    #[serde(default)]
    pub stop_if_true: bool,
    pub rule: CfRuleConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CfRuleConfig {
    HighlightCell(HighlightCellRule),
    DataBar(DataBarRule),
    ColorScale(ColorScaleRule),
    IconSet(IconSetRule),
}

/// Style a matching cell (`subType` selects the condition).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HighlightCellRule {
    #[serde(flatten)]
    pub condition: HighlightCondition,
    #[serde(default)]
    pub style: CfStyle,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "subType", rename_all = "camelCase")]
pub enum HighlightCondition {
    Number {
        operator: NumberOperator,
        value: NumberOperand,
    },
    Text {
        operator: TextOperator,
        value: String,
    },
    DuplicateValues,
    UniqueValues,
    Rank {
        #[serde(rename = "isBottom")]
        is_bottom: bool,
        #[serde(rename = "isPercent")]
        is_percent: bool,
        value: u32,
    },
    Average {
        operator: NumberOperator,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberOperator {
    Between,
    NotBetween,
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextOperator {
    BeginsWith,
    EndsWith,
    ContainsText,
    NotContainsText,
    Equal,
    NotEqual,
}

/// A single threshold, or the `[low, high]` pair used by `between`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOperand {
    Single(f64),
    Pair([f64; 2]),
}

/// Partial style applied by a highlight rule; `None` leaves the cell style untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CfStyle {
    /// Font colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cl: Option<ColorStyle>,
    /// Background colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<ColorStyle>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorStyle {
    pub rgb: String,
}

impl ColorStyle {
    pub fn new(rgb: impl Into<String>) -> Self {
        Self { rgb: rgb.into() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CfValueType {
    Num,
    Min,
    Max,
    Percent,
    Percentile,
    Formula,
}

/// A value object (`IValueConfig`) anchoring a data bar, colour scale point or icon threshold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CfValueConfig {
    #[serde(rename = "type")]
    pub kind: CfValueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl CfValueConfig {
    pub const fn min() -> Self {
        Self {
            kind: CfValueType::Min,
            value: None,
        }
    }

    pub const fn max() -> Self {
        Self {
            kind: CfValueType::Max,
            value: None,
        }
    }

    pub const fn percent(value: f64) -> Self {
        Self {
            kind: CfValueType::Percent,
            value: Some(value),
        }
    }

    pub const fn percentile(value: f64) -> Self {
        Self {
            kind: CfValueType::Percentile,
            value: Some(value),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataBarRule {
    pub is_show_value: bool,
    pub config: DataBarConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataBarConfig {
    pub min: CfValueConfig,
    pub max: CfValueConfig,
    pub is_gradient: bool,
    pub positive_color: String,
    pub native_color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorScaleRule {
    pub config: Vec<ColorScalePoint>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorScalePoint {
    pub index: u32,
    pub color: String,
    pub value: CfValueConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconSetRule {
    pub is_show_value: bool,
    pub config: Vec<IconSetThreshold>,
}

/// One icon of an icon set: cells satisfying `operator value` get icon `icon_id` of `icon_type`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconSetThreshold {
    pub operator: NumberOperator,
    pub value: CfValueConfig,
    pub icon_type: String,
    pub icon_id: String,
}
