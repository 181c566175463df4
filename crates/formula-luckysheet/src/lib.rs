//! Luckysheet → Univer workbook migration.
//!
//! Luckysheet exports (`luckysheet.toJson()`) are deserialized into the [`legacy`] model and
//! converted into the Univer-style snapshot types of [`model`]: sheet identity and geometry,
//! cell contents, merges, frozen panes, data validation and conditional formatting.
//!
//! Migration is best-effort. Legacy entries without a target equivalent are skipped and listed
//! in a [`MigrationReport`]; [`MigrationOptions::strict`] turns a non-empty report into an
//! error instead.
//!
//! ```
//! use formula_luckysheet::{migrate_json_str, MigrationOptions, SequentialIdGenerator};
//!
//! let input = r#"{"sheets": [{"name": "Sheet1", "index": 5, "row": 100, "column": 26}]}"#;
//! let migration =
//!     migrate_json_str(input, &MigrationOptions::default(), &mut SequentialIdGenerator::new())
//!         .unwrap();
//! assert_eq!(migration.workbook.sheet_order, vec!["5"]);
//! assert!(migration.report.is_empty());
//! ```

pub mod cell_key;
pub mod cli;
pub mod convert;
mod error;
pub mod id;
mod js;
pub mod legacy;
pub mod mapping;
pub mod model;
mod options;
mod report;

pub use cell_key::{parse_cell_key, CellKeyError};
pub use convert::{
    convert_cells, convert_conditional_formats, convert_data_validations, convert_sheet_view,
    convert_worksheet, convert_worksheet_properties, migrate_json_str, migrate_json_value,
    migrate_workbook, ConvertedSheet, Migration, MigrationContext, SheetRules,
};
pub use error::MigrateError;
pub use id::{IdGenerator, RandomIdGenerator, SequentialIdGenerator, DEFAULT_ID_LEN};
pub use options::{MigrationOptions, OperatorFallback};
pub use report::{Issue, MigrationReport, ReportEntry, Section};
