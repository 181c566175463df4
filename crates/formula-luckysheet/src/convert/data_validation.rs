use crate::cell_key::parse_cell_key;
use crate::convert::MigrationContext;
use crate::js::js_string;
use crate::legacy::{LegacySheet, LegacyValidation, LegacyValidationCell};
use crate::mapping::{self, OPERATOR_FALLBACK_KEY, TWO_OPERAND_CODES};
use crate::model::{
    CellRange, DataValidationErrorStyle, DataValidationOperator, DataValidationRule,
};
use crate::report::{Issue, Section};
use crate::OperatorFallback;

/// Convert a sheet's `dataVerification` map into validation rules, in key order.
///
/// Returns `None` when the sheet has no `dataVerification` section at all, and `Some` (possibly
/// empty) otherwise. Entries with an unmapped type or an undecodable key are skipped.
pub fn convert_data_validations(
    sheet: &LegacySheet,
    ctx: &mut MigrationContext<'_>,
) -> Option<Vec<DataValidationRule>> {
    let section = sheet.data_verification.as_ref()?;

    let mut rules = Vec::with_capacity(section.len());
    for (key, cell) in section {
        if let Some(rule) = convert_cell(key, cell, ctx) {
            rules.push(rule);
        }
    }
    Some(rules)
}

fn convert_cell(
    key: &str,
    cell: &LegacyValidationCell,
    ctx: &mut MigrationContext<'_>,
) -> Option<DataValidationRule> {
    let origin_type = cell.rule.origin_type();
    let Some(kind) = mapping::validation_type(origin_type) else {
        ctx.record(
            Section::DataValidation,
            key,
            Issue::UnmappedType(origin_type.to_string()),
        );
        return None;
    };

    let cell_ref = match parse_cell_key(key) {
        Ok(cell_ref) => cell_ref,
        Err(err) => {
            ctx.record(Section::DataValidation, key, Issue::InvalidKey(err.to_string()));
            return None;
        }
    };

    let mut rule = DataValidationRule::new(ctx.next_id(), kind, CellRange::cell(cell_ref));

    match &cell.rule {
        LegacyValidation::Compare {
            operator,
            value1,
            value2,
            ..
        } if kind.is_comparison() => {
            rule.operator = resolve_operator(key, operator.as_deref(), ctx);
            rule.formula1 = Some(js_string(value1.as_ref()));
            if operator
                .as_deref()
                .is_some_and(|code| TWO_OPERAND_CODES.contains(&code))
            {
                rule.formula2 = Some(js_string(value2.as_ref()));
            }
        }
        legacy if kind.is_list() => {
            rule.formula1 = Some(js_string(legacy.first_operand()));
        }
        _ => {}
    }

    rule.prompt = cell.hint_text.clone();
    rule.show_input_message = cell.hint_show;
    rule.error_style = cell.prohibit_input.map(|prohibit| {
        if prohibit {
            DataValidationErrorStyle::Stop
        } else {
            DataValidationErrorStyle::Warning
        }
    });

    Some(rule)
}

/// Map an operator code; a missing or empty code falls back per [`OperatorFallback`].
fn resolve_operator(
    key: &str,
    code: Option<&str>,
    ctx: &mut MigrationContext<'_>,
) -> Option<DataValidationOperator> {
    let token = match code {
        Some(code) if !code.is_empty() => code,
        _ => match ctx.options().operator_fallback {
            OperatorFallback::Equal => OPERATOR_FALLBACK_KEY,
            OperatorFallback::Omit => return None,
        },
    };

    let operator = mapping::validation_operator(token);
    if operator.is_none() {
        ctx.record(
            Section::DataValidation,
            key,
            Issue::UnknownOperator(token.to_string()),
        );
    }
    operator
}
