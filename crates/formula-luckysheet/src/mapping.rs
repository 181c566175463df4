//! Lookup tables from Luckysheet vocabulary to target kinds.
//!
//! Tables are partial on purpose: a missing entry means "no target equivalent", and callers
//! skip the legacy entry instead of failing.

use crate::model::{DataValidationOperator, DataValidationType, NumberOperator, TextOperator};

/// `dataVerification[*].type` (after dropdown multi-select resolution) to validation type.
pub const VALIDATION_TYPES: &[(&str, DataValidationType)] = &[
    ("number", DataValidationType::Decimal),
    ("number_integer", DataValidationType::Whole),
    ("number_decimal", DataValidationType::Decimal),
    ("text_length", DataValidationType::TextLength),
    ("date", DataValidationType::Date),
    ("dropdown", DataValidationType::List),
    ("dropdown_multiple", DataValidationType::ListMultiple),
];

/// `dataVerification[*].type2` operator codes to validation operators.
///
/// `bf`/`nbf`/`af`/`naf` are the date-only "before" / "not before" / "after" / "not after".
pub const VALIDATION_OPERATORS: &[(&str, DataValidationOperator)] = &[
    ("bw", DataValidationOperator::Between),
    ("nb", DataValidationOperator::NotBetween),
    ("eq", DataValidationOperator::Equal),
    ("ne", DataValidationOperator::NotEqual),
    ("gt", DataValidationOperator::GreaterThan),
    ("gte", DataValidationOperator::GreaterThanOrEqual),
    ("lt", DataValidationOperator::LessThan),
    ("lte", DataValidationOperator::LessThanOrEqual),
    ("bf", DataValidationOperator::LessThan),
    ("nbf", DataValidationOperator::GreaterThanOrEqual),
    ("af", DataValidationOperator::GreaterThan),
    ("naf", DataValidationOperator::LessThanOrEqual),
];

/// Key consulted when a comparison validation carries no operator code.
///
/// Luckysheet itself only reaches this key for an empty code: a missing code stringifies to
/// `"undefined"` and misses the table. Here a missing or `null` code is treated like an empty
/// one (see [`OperatorFallback`](crate::OperatorFallback)). Unknown non-empty codes never fall
/// back.
pub const OPERATOR_FALLBACK_KEY: &str = "eq";

/// Operator codes whose rules carry both `formula1` and `formula2`.
pub const TWO_OPERAND_CODES: &[&str] = &["bw", "nb"];

pub fn validation_type(token: &str) -> Option<DataValidationType> {
    lookup(VALIDATION_TYPES, token)
}

pub fn validation_operator(token: &str) -> Option<DataValidationOperator> {
    lookup(VALIDATION_OPERATORS, token)
}

/// Target shape of a Luckysheet highlight (`type: "default"`) condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightKind {
    /// Compare against `conditionValue[0]`.
    Number(NumberOperator),
    /// Inclusive range `conditionValue[0]..=conditionValue[1]`.
    Between,
    Text(TextOperator),
    /// `conditionValue[0]`: `0` duplicates, `1` unique values.
    DuplicateOrUnique,
    Rank { is_bottom: bool, is_percent: bool },
    Average(NumberOperator),
}

/// `conditionName` to highlight kind.
///
/// `occurrenceDate` is absent: Luckysheet stores it as a literal date span which has no
/// counterpart among the target's relative time periods.
pub const HIGHLIGHT_CONDITIONS: &[(&str, HighlightKind)] = &[
    ("greaterThan", HighlightKind::Number(NumberOperator::GreaterThan)),
    ("lessThan", HighlightKind::Number(NumberOperator::LessThan)),
    ("equal", HighlightKind::Number(NumberOperator::Equal)),
    ("betweenness", HighlightKind::Between),
    ("textContains", HighlightKind::Text(TextOperator::ContainsText)),
    ("duplicateValue", HighlightKind::DuplicateOrUnique),
    (
        "top10",
        HighlightKind::Rank {
            is_bottom: false,
            is_percent: false,
        },
    ),
    (
        "top10%",
        HighlightKind::Rank {
            is_bottom: false,
            is_percent: true,
        },
    ),
    (
        "last10",
        HighlightKind::Rank {
            is_bottom: true,
            is_percent: false,
        },
    ),
    (
        "last10%",
        HighlightKind::Rank {
            is_bottom: true,
            is_percent: true,
        },
    ),
    ("AboveAverage", HighlightKind::Average(NumberOperator::GreaterThan)),
    ("SubAverage", HighlightKind::Average(NumberOperator::LessThan)),
];

pub fn highlight_kind(condition_name: &str) -> Option<HighlightKind> {
    lookup(HIGHLIGHT_CONDITIONS, condition_name)
}

/// Icon count to target icon set name.
pub const ICON_SETS: &[(u32, &str)] = &[(3, "3Arrows"), (4, "4Arrows"), (5, "5Arrows")];

pub fn icon_set_type(len: u32) -> Option<&'static str> {
    ICON_SETS
        .iter()
        .find(|(count, _)| *count == len)
        .map(|(_, name)| *name)
}

fn lookup<T: Copy>(table: &[(&str, T)], token: &str) -> Option<T> {
    table
        .iter()
        .find(|(key, _)| *key == token)
        .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_table_covers_the_legacy_vocabulary() {
        assert_eq!(validation_type("number"), Some(DataValidationType::Decimal));
        assert_eq!(validation_type("number_integer"), Some(DataValidationType::Whole));
        assert_eq!(validation_type("dropdown_multiple"), Some(DataValidationType::ListMultiple));
        assert_eq!(validation_type("checkbox"), None);
        assert_eq!(validation_type("text_content"), None);
        assert_eq!(validation_type(""), None);
    }

    #[test]
    fn operator_fallback_key_is_registered() {
        assert_eq!(
            validation_operator(OPERATOR_FALLBACK_KEY),
            Some(DataValidationOperator::Equal)
        );
        assert_eq!(validation_operator("true"), None);
    }

    #[test]
    fn tables_have_unique_keys() {
        fn assert_unique<T>(table: &[(&str, T)]) {
            let mut keys: Vec<&str> = table.iter().map(|(k, _)| *k).collect();
            keys.sort_unstable();
            let len = keys.len();
            keys.dedup();
            assert_eq!(keys.len(), len);
        }
        assert_unique(VALIDATION_TYPES);
        assert_unique(VALIDATION_OPERATORS);
        assert_unique(HIGHLIGHT_CONDITIONS);
    }

    #[test]
    fn icon_sets_by_count() {
        assert_eq!(icon_set_type(3), Some("3Arrows"));
        assert_eq!(icon_set_type(2), None);
    }
}
