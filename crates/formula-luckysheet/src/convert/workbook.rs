use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::convert::{convert_worksheet, ConvertedSheet, MigrationContext};
use crate::error::MigrateError;
use crate::id::IdGenerator;
use crate::js::js_number_value;
use crate::legacy::{LegacySheet, LegacyWorkbook};
use crate::model::{
    Resource, WorkbookData, CONDITIONAL_FORMATTING_RESOURCE, DATA_VALIDATION_RESOURCE,
};
use crate::{MigrationOptions, MigrationReport};

/// Result of a successful migration.
#[derive(Clone, Debug, PartialEq)]
pub struct Migration {
    pub workbook: WorkbookData,
    /// Legacy entries that were dropped or degraded. Always empty in strict mode.
    pub report: MigrationReport,
}

/// Convert a whole Luckysheet document into a workbook snapshot.
///
/// Data-validation and conditional-formatting rules are attached as plugin resources whose
/// `data` maps sheet id to rule list; sheets without the corresponding legacy section are not
/// listed.
pub fn migrate_workbook(
    legacy: &LegacyWorkbook,
    options: &MigrationOptions,
    ids: &mut dyn IdGenerator,
) -> Result<Migration, MigrateError> {
    let mut ctx = MigrationContext::new(options, ids);
    let workbook_id = ctx.next_id();

    let mut sheet_order = Vec::with_capacity(legacy.sheets.len());
    let mut sheets = IndexMap::with_capacity(legacy.sheets.len());
    let mut validations = IndexMap::new();
    let mut conditional_formats = IndexMap::new();

    for sheet in ordered(&legacy.sheets) {
        let ConvertedSheet { worksheet, rules } = convert_worksheet(sheet, &mut ctx);
        let id = worksheet.id.clone();
        if let Some(rules) = rules.data_validations {
            validations.insert(id.clone(), rules);
        }
        if let Some(rules) = rules.conditional_formats {
            conditional_formats.insert(id.clone(), rules);
        }
        sheet_order.push(id.clone());
        sheets.insert(id, worksheet);
    }
    ctx.enter_sheet(None);

    let mut resources = Vec::new();
    if !validations.is_empty() {
        resources.push(resource(DATA_VALIDATION_RESOURCE, &validations)?);
    }
    if !conditional_formats.is_empty() {
        resources.push(resource(CONDITIONAL_FORMATTING_RESOURCE, &conditional_formats)?);
    }

    let report = ctx.into_report();
    if options.strict && !report.is_empty() {
        return Err(MigrateError::Rejected(report));
    }
    log::debug!(
        "migrated workbook {workbook_id}: {} sheets, {} report entries",
        sheet_order.len(),
        report.len()
    );

    let info = legacy.info.as_ref();
    let workbook = WorkbookData {
        id: workbook_id,
        name: info.and_then(|i| i.name.clone()).unwrap_or_default(),
        app_version: info.and_then(|i| i.appversion.clone()),
        locale: options.locale.clone(),
        styles: IndexMap::new(),
        sheet_order,
        sheets,
        resources,
    };
    Ok(Migration { workbook, report })
}

/// Parse a Luckysheet document (an object with `sheets`, or a bare sheet array) and migrate it.
pub fn migrate_json_value(
    value: Value,
    options: &MigrationOptions,
    ids: &mut dyn IdGenerator,
) -> Result<Migration, MigrateError> {
    let legacy = match value {
        Value::Array(_) => LegacyWorkbook::from(serde_json::from_value::<Vec<LegacySheet>>(value)?),
        other => serde_json::from_value(other)?,
    };
    migrate_workbook(&legacy, options, ids)
}

pub fn migrate_json_str(
    input: &str,
    options: &MigrationOptions,
    ids: &mut dyn IdGenerator,
) -> Result<Migration, MigrateError> {
    migrate_json_value(serde_json::from_str(input)?, options, ids)
}

/// Sheets sorted by `order` when every sheet has a numeric one, in array order otherwise.
fn ordered(sheets: &[LegacySheet]) -> Vec<&LegacySheet> {
    let keyed: Option<Vec<(f64, &LegacySheet)>> = sheets
        .iter()
        .map(|sheet| {
            let order = sheet.order.as_ref().and_then(js_number_value)?;
            Some((order, sheet))
        })
        .collect();

    match keyed {
        Some(mut keyed) => {
            keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
            keyed.into_iter().map(|(_, sheet)| sheet).collect()
        }
        None => sheets.iter().collect(),
    }
}

fn resource<T: Serialize>(name: &str, rules: &T) -> Result<Resource, MigrateError> {
    Ok(Resource {
        name: name.to_string(),
        data: serde_json::to_string(rules)?,
    })
}
