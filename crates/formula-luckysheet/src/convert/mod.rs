//! Luckysheet → Univer converters.
//!
//! Every converter is a synchronous transform over borrowed legacy data. Shared state is
//! limited to the [`MigrationContext`]: the injected id source, the set of ids already handed
//! out, and the report of dropped entries.

mod cells;
mod conditional_format;
mod data_validation;
mod workbook;
mod worksheet;

use std::collections::HashSet;

use crate::id::IdGenerator;
use crate::report::{Issue, MigrationReport, ReportEntry, Section};
use crate::MigrationOptions;

pub use cells::convert_cells;
pub use conditional_format::convert_conditional_formats;
pub use data_validation::convert_data_validations;
pub use workbook::{migrate_json_str, migrate_json_value, migrate_workbook, Migration};
pub use worksheet::{
    convert_sheet_view, convert_worksheet, convert_worksheet_properties, ConvertedSheet,
    SheetRules,
};

/// Collisions tolerated before accepting a repeated id from a degenerate generator.
const MAX_ID_ATTEMPTS: usize = 64;

/// Per-workbook conversion state.
pub struct MigrationContext<'a> {
    options: &'a MigrationOptions,
    ids: &'a mut dyn IdGenerator,
    issued: HashSet<String>,
    report: MigrationReport,
    sheet: Option<String>,
}

impl<'a> MigrationContext<'a> {
    pub fn new(options: &'a MigrationOptions, ids: &'a mut dyn IdGenerator) -> Self {
        Self {
            options,
            ids,
            issued: HashSet::new(),
            report: MigrationReport::default(),
            sheet: None,
        }
    }

    pub fn options(&self) -> &MigrationOptions {
        self.options
    }

    /// A fresh id that has not been handed out (or claimed) in this conversion.
    pub fn next_id(&mut self) -> String {
        let len = self.options.id_len;
        let mut id = self.ids.generate(len);
        for _ in 1..MAX_ID_ATTEMPTS {
            if !self.issued.contains(&id) {
                break;
            }
            id = self.ids.generate(len);
        }
        if !self.issued.insert(id.clone()) {
            log::warn!("id generator keeps returning `{id}`; reusing it");
        }
        id
    }

    /// Reserve an externally supplied id. Returns false if it was already taken.
    pub fn claim_id(&mut self, id: &str) -> bool {
        self.issued.insert(id.to_string())
    }

    /// Label subsequent report entries with `sheet`.
    pub fn enter_sheet(&mut self, sheet: Option<String>) {
        self.sheet = sheet;
    }

    pub(crate) fn record(&mut self, section: Section, key: impl Into<String>, issue: Issue) {
        let entry = ReportEntry {
            sheet: self.sheet.clone(),
            section,
            key: key.into(),
            issue,
        };
        log::warn!("{entry}");
        self.report.push(entry);
    }

    pub fn report(&self) -> &MigrationReport {
        &self.report
    }

    pub fn into_report(self) -> MigrationReport {
        self.report
    }
}
