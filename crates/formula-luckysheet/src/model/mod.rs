//! Target (Univer-style) document model.
//!
//! Types serialize to the JSON shapes Univer accepts as `IWorkbookData` snapshots: camelCase
//! keys, numeric booleans, and unset optional fields omitted.

mod conditional_format;
mod data_validation;
mod range;
mod workbook;
mod worksheet;

pub use conditional_format::{
    CfRuleConfig, CfStyle, CfValueConfig, CfValueType, ColorScalePoint, ColorScaleRule,
    ColorStyle, ConditionalFormatRule, DataBarConfig, DataBarRule, HighlightCellRule,
    HighlightCondition, IconSetRule, IconSetThreshold, NumberOperand, NumberOperator,
    TextOperator,
};
pub use data_validation::{
    DataValidationErrorStyle, DataValidationOperator, DataValidationRule, DataValidationType,
};
pub use range::{CellRange, CellRef};
pub use workbook::{
    Resource, WorkbookData, CONDITIONAL_FORMATTING_RESOURCE, DATA_VALIDATION_RESOURCE,
};
pub use worksheet::{
    BooleanNumber, CellData, CellScalar, CellValueType, ColumnData, Freeze, RowData,
    WorksheetData,
};
