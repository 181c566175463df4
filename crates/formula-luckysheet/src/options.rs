use crate::id::DEFAULT_ID_LEN;

/// Knobs for a migration run.
#[derive(Clone, Debug)]
pub struct MigrationOptions {
    /// Length of generated rule, sheet and workbook ids.
    pub id_len: usize,
    /// Workbook locale written to the snapshot (e.g. `enUS`, `zhCN`).
    pub locale: String,
    /// What a comparison validation gets when its operator code is missing or empty.
    pub operator_fallback: OperatorFallback,
    /// Fail the migration instead of dropping entries that have no target equivalent.
    pub strict: bool,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            id_len: DEFAULT_ID_LEN,
            locale: "enUS".to_string(),
            operator_fallback: OperatorFallback::default(),
            strict: false,
        }
    }
}

/// Operator assigned to a comparison validation without an operator code.
///
/// "Without" covers a missing, `null` or empty `type2`. An unrecognised code is reported and
/// left without an operator under either setting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OperatorFallback {
    /// Look up the `"eq"` key, i.e. `equal`.
    #[default]
    Equal,
    /// Leave the operator unset.
    Omit,
}
