use core::fmt;

/// Legacy constructs that were dropped or degraded during a migration.
///
/// Migration is best-effort: unsupported entries are skipped rather than rejected. The report
/// makes those losses visible (and lets strict mode refuse them).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MigrationReport {
    pub entries: Vec<ReportEntry>,
}

impl MigrationReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter()
    }

    pub(crate) fn push(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReportEntry {
    /// Name (or position) of the sheet the entry belongs to, if any.
    pub sheet: Option<String>,
    pub section: Section,
    /// Locator within the section: a `"row_col"` key, a list index, or a field name.
    pub key: String,
    pub issue: Issue,
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sheet) = &self.sheet {
            write!(f, "[{sheet}] ")?;
        }
        write!(f, "{} {}: {}", self.section, self.key, self.issue)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Sheet,
    Cells,
    Merge,
    Rows,
    HiddenRows,
    Columns,
    HiddenColumns,
    Freeze,
    DataValidation,
    ConditionalFormat,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::Sheet => "sheet",
            Section::Cells => "celldata",
            Section::Merge => "config.merge",
            Section::Rows => "config.rowlen",
            Section::HiddenRows => "config.rowhidden",
            Section::Columns => "config.columnlen",
            Section::HiddenColumns => "config.colhidden",
            Section::Freeze => "frozen",
            Section::DataValidation => "dataVerification",
            Section::ConditionalFormat => "luckysheet_conditionformat_save",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Issue {
    /// The legacy type has no target equivalent; the entry was skipped.
    UnmappedType(String),
    /// A highlight rule's `conditionName` has no target equivalent; the entry was skipped.
    UnmappedCondition(String),
    /// A position key could not be decoded; the entry was skipped.
    InvalidKey(String),
    /// The operator code is unknown; the rule was kept without an operator.
    UnknownOperator(String),
    /// A required operand is missing or not numeric; the entry was skipped.
    InvalidOperand(String),
    /// The entry covers no cells; it was skipped.
    EmptyRange,
    /// The sheet id was already taken; a fresh id was generated.
    DuplicateSheetId(String),
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::UnmappedType(t) => write!(f, "unsupported type `{t}` (skipped)"),
            Issue::UnmappedCondition(c) => write!(f, "unsupported condition `{c}` (skipped)"),
            Issue::InvalidKey(reason) => write!(f, "{reason} (skipped)"),
            Issue::UnknownOperator(op) => write!(f, "unknown operator `{op}` (operator dropped)"),
            Issue::InvalidOperand(reason) => write!(f, "{reason} (skipped)"),
            Issue::EmptyRange => f.write_str("no cell range (skipped)"),
            Issue::DuplicateSheetId(id) => write!(f, "duplicate sheet id `{id}` (regenerated)"),
        }
    }
}
