use serde_json::Value;

use crate::convert::{
    convert_cells, convert_conditional_formats, convert_data_validations, MigrationContext,
};
use crate::js::{js_flag, js_string};
use crate::legacy::{LegacyFrozen, LegacySheet};
use crate::model::{
    BooleanNumber, ConditionalFormatRule, DataValidationRule, Freeze, WorksheetData,
};
use crate::report::{Issue, Section};

/// Rules produced for one sheet. `None` means the legacy sheet had no such section.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SheetRules {
    pub data_validations: Option<Vec<DataValidationRule>>,
    pub conditional_formats: Option<Vec<ConditionalFormatRule>>,
}

/// A fully converted sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvertedSheet {
    pub worksheet: WorksheetData,
    pub rules: SheetRules,
}

/// Copy a sheet's identity and geometry onto `worksheet`, then convert its rules.
///
/// The legacy `index` becomes the worksheet id; a sheet without one (a `null` index counts as
/// missing) or whose id is already taken in this workbook gets a fresh id. `zoomRatio`, `row`,
/// `column`, `name`, `scrollLeft` and `scrollTop` are copied only when present.
pub fn convert_worksheet_properties(
    sheet: &LegacySheet,
    worksheet: &mut WorksheetData,
    ctx: &mut MigrationContext<'_>,
) -> SheetRules {
    worksheet.id = sheet_id(sheet.index.as_ref(), ctx);

    if let Some(zoom_ratio) = sheet.zoom_ratio {
        worksheet.zoom_ratio = Some(zoom_ratio);
    }
    if let Some(row) = sheet.row {
        worksheet.row_count = Some(row);
    }
    if let Some(column) = sheet.column {
        worksheet.column_count = Some(column);
    }
    if let Some(name) = &sheet.name {
        worksheet.name = Some(name.clone());
    }
    if let Some(scroll_left) = sheet.scroll_left {
        worksheet.scroll_left = Some(scroll_left);
    }
    if let Some(scroll_top) = sheet.scroll_top {
        worksheet.scroll_top = Some(scroll_top);
    }

    SheetRules {
        data_validations: convert_data_validations(sheet, ctx),
        conditional_formats: convert_conditional_formats(sheet, ctx),
    }
}

fn sheet_id(index: Option<&Value>, ctx: &mut MigrationContext<'_>) -> String {
    let id = match index {
        None | Some(Value::Null) => return ctx.next_id(),
        Some(index) => js_string(Some(index)),
    };
    if !id.is_empty() && ctx.claim_id(&id) {
        return id;
    }

    let fresh = ctx.next_id();
    ctx.record(Section::Sheet, "index", Issue::DuplicateSheetId(id));
    fresh
}

/// Copy visibility, tab colour, default sizes, gridlines and frozen panes.
pub fn convert_sheet_view(
    sheet: &LegacySheet,
    worksheet: &mut WorksheetData,
    ctx: &mut MigrationContext<'_>,
) {
    if let Some(hidden) = sheet.hide.as_ref().and_then(js_flag) {
        worksheet.hidden = Some(BooleanNumber::from(hidden));
    }
    if let Some(color) = sheet.color.as_deref().map(str::trim) {
        if !color.is_empty() {
            worksheet.tab_color = Some(color.to_string());
        }
    }
    if let Some(height) = sheet.default_row_height {
        worksheet.default_row_height = Some(height);
    }
    if let Some(width) = sheet.default_col_width {
        worksheet.default_column_width = Some(width);
    }
    if let Some(show) = sheet.show_grid_lines.as_ref().and_then(js_flag) {
        worksheet.show_gridlines = Some(BooleanNumber::from(show));
    }
    if let Some(frozen) = &sheet.frozen {
        worksheet.freeze = convert_frozen(frozen, ctx);
    }
}

fn convert_frozen(frozen: &LegacyFrozen, ctx: &mut MigrationContext<'_>) -> Option<Freeze> {
    let focus = frozen.range.as_ref();
    // Range freezes include the focus row/column.
    let rows = focus.and_then(|r| r.row_focus).map(|r| r.saturating_add(1));
    let cols = focus.and_then(|r| r.column_focus).map(|c| c.saturating_add(1));

    let freeze = match (frozen.kind.as_str(), rows, cols) {
        ("cancel", _, _) => return None,
        ("row", _, _) => Freeze::new(1, 0),
        ("column", _, _) => Freeze::new(0, 1),
        ("both", _, _) => Freeze::new(1, 1),
        ("rangeRow", Some(rows), _) => Freeze::new(rows, 0),
        ("rangeColumn", _, Some(cols)) => Freeze::new(0, cols),
        ("rangeBoth", Some(rows), Some(cols)) => Freeze::new(rows, cols),
        ("rangeRow" | "rangeColumn" | "rangeBoth", _, _) => {
            ctx.record(
                Section::Freeze,
                "range",
                Issue::InvalidOperand(format!("`{}` without a focus cell", frozen.kind)),
            );
            return None;
        }
        (other, _, _) => {
            ctx.record(Section::Freeze, "type", Issue::UnmappedType(other.to_string()));
            return None;
        }
    };
    Some(freeze)
}

/// Convert one legacy sheet: properties, view settings, cells and rules.
pub fn convert_worksheet(sheet: &LegacySheet, ctx: &mut MigrationContext<'_>) -> ConvertedSheet {
    ctx.enter_sheet(sheet.name.clone());

    let mut worksheet = WorksheetData::default();
    let rules = convert_worksheet_properties(sheet, &mut worksheet, ctx);
    convert_sheet_view(sheet, &mut worksheet, ctx);
    convert_cells(sheet, &mut worksheet, ctx);

    log::debug!(
        "converted sheet {} ({}): {} cells, {} merges, {} validations, {} conditional formats",
        worksheet.id,
        worksheet.name.as_deref().unwrap_or("<unnamed>"),
        worksheet.cell_count(),
        worksheet.merge_data.len(),
        rules.data_validations.as_ref().map_or(0, Vec::len),
        rules.conditional_formats.as_ref().map_or(0, Vec::len),
    );

    ConvertedSheet { worksheet, rules }
}
