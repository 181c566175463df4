use serde::{Deserialize, Serialize};

use crate::model::CellRange;

/// Univer `DataValidationType`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataValidationType {
    Any,
    Decimal,
    Whole,
    TextLength,
    Date,
    Time,
    List,
    ListMultiple,
    Checkbox,
    Custom,
}

impl DataValidationType {
    /// Kinds constrained by a comparison operator and one or two operand formulas.
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            DataValidationType::Decimal
                | DataValidationType::Whole
                | DataValidationType::TextLength
                | DataValidationType::Date
                | DataValidationType::Time
        )
    }

    /// Kinds whose `formula1` is a list source.
    pub const fn is_list(self) -> bool {
        matches!(
            self,
            DataValidationType::List | DataValidationType::ListMultiple
        )
    }
}

/// Univer `DataValidationOperator`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataValidationOperator {
    Between,
    NotBetween,
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
}

/// Univer `DataValidationErrorStyle`, a numeric enum on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DataValidationErrorStyle {
    Info,
    Stop,
    Warning,
}

impl TryFrom<u8> for DataValidationErrorStyle {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DataValidationErrorStyle::Info),
            1 => Ok(DataValidationErrorStyle::Stop),
            2 => Ok(DataValidationErrorStyle::Warning),
            other => Err(format!("unknown data validation error style {other}")),
        }
    }
}

impl From<DataValidationErrorStyle> for u8 {
    fn from(value: DataValidationErrorStyle) -> Self {
        match value {
            DataValidationErrorStyle::Info => 0,
            DataValidationErrorStyle::Stop => 1,
            DataValidationErrorStyle::Warning => 2,
        }
    }
}

/// A sheet data-validation rule (`ISheetDataValidationRule`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataValidationRule {
    pub uid: String,
    #[serde(rename = "type")]
    pub kind: DataValidationType,
    pub ranges: Vec<CellRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<DataValidationOperator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula2: Option<String>,
    /// Input prompt shown when the cell is selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_input_message: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_style: Option<DataValidationErrorStyle>,
}

impl DataValidationRule {
    /// A rule with no operator, formulas or prompt.
    pub fn new(uid: impl Into<String>, kind: DataValidationType, range: CellRange) -> Self {
        Self {
            uid: uid.into(),
            kind,
            ranges: vec![range],
            operator: None,
            formula1: None,
            formula2: None,
            prompt: None,
            show_input_message: None,
            error_style: None,
        }
    }
}
