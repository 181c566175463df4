use serde_json::Value;

use crate::cell_key::parse_axis_key;
use crate::convert::MigrationContext;
use crate::js::js_string;
use crate::legacy::{LegacyCell, LegacyCellContent, LegacySheet, LegacySheetConfig};
use crate::model::{
    BooleanNumber, CellData, CellRange, CellRef, CellScalar, CellValueType, WorksheetData,
};
use crate::report::{Issue, Section};

/// Number format that forces text.
const TEXT_FORMAT: &str = "@";

/// Copy cell contents, merges and row/column overrides onto `worksheet`.
///
/// Cells come from `celldata` when present and from the dense `data` matrix otherwise. Empty
/// cells are omitted.
pub fn convert_cells(
    sheet: &LegacySheet,
    worksheet: &mut WorksheetData,
    ctx: &mut MigrationContext<'_>,
) {
    if let Some(celldata) = &sheet.celldata {
        for entry in celldata {
            let Some(content) = &entry.v else { continue };
            if let Some(cell) = convert_content(entry.r, entry.c, content, ctx) {
                worksheet.set_cell(entry.r, entry.c, cell);
            }
        }
    } else if let Some(rows) = &sheet.data {
        for (r, row) in rows.iter().enumerate() {
            let Ok(r) = u32::try_from(r) else { break };
            for (c, content) in row.iter().enumerate() {
                let Ok(c) = u32::try_from(c) else { break };
                let Some(content) = content else { continue };
                if let Some(cell) = convert_content(r, c, content, ctx) {
                    worksheet.set_cell(r, c, cell);
                }
            }
        }
    }

    if let Some(config) = &sheet.config {
        convert_config(config, worksheet, ctx);
    }
}

fn convert_content(
    r: u32,
    c: u32,
    content: &LegacyCellContent,
    ctx: &mut MigrationContext<'_>,
) -> Option<CellData> {
    let cell = match content {
        LegacyCellContent::Cell(cell) => convert_cell(cell),
        LegacyCellContent::Scalar(value) => reject_structured(value).map(|()| {
            let v = scalar(value, false);
            CellData {
                t: v.as_ref().map(value_type),
                v,
                f: None,
            }
        }),
    };
    let cell = match cell {
        Ok(cell) => cell,
        Err(kind) => {
            ctx.record(
                Section::Cells,
                format!("{r}_{c}"),
                Issue::InvalidOperand(format!("cell value is an {kind}")),
            );
            return None;
        }
    };
    (!cell.is_empty()).then_some(cell)
}

fn convert_cell(cell: &LegacyCell) -> Result<CellData, &'static str> {
    let ct = cell.ct.as_ref();
    let f = cell
        .f
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string);

    if let Some(runs) = ct.and_then(|ct| ct.s.as_ref()) {
        if ct.and_then(|ct| ct.t.as_deref()) == Some("inlineStr") {
            let text: String = runs.iter().filter_map(|run| run.v.as_deref()).collect();
            return Ok(CellData {
                v: Some(CellScalar::String(text)),
                t: Some(CellValueType::String),
                f,
            });
        }
    }

    // Some exports only persist the display text.
    let raw = match (&cell.v, &cell.m) {
        (Some(v), _) if !v.is_null() => v,
        (_, Some(m)) => m,
        _ => {
            return Ok(CellData { v: None, t: None, f });
        }
    };
    reject_structured(raw)?;

    let force_text = ct.and_then(|ct| ct.fa.as_deref()) == Some(TEXT_FORMAT);
    let numeric = ct.and_then(|ct| ct.t.as_deref()) == Some("n");
    let v = if force_text {
        Some(CellScalar::String(js_string(Some(raw))))
    } else {
        scalar(raw, numeric)
    };
    let t = v.as_ref().map(|v| {
        if force_text {
            CellValueType::ForceString
        } else {
            value_type(v)
        }
    });
    Ok(CellData { v, t, f })
}

fn reject_structured(value: &Value) -> Result<(), &'static str> {
    match value {
        Value::Array(_) => Err("array"),
        Value::Object(_) => Err("object"),
        _ => Ok(()),
    }
}

/// `numeric` parses numeric strings (cells typed `n`).
fn scalar(value: &Value, numeric: bool) -> Option<CellScalar> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(CellScalar::Boolean(*b)),
        Value::Number(n) => n.as_f64().map(CellScalar::Number),
        Value::String(s) if numeric => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Some(CellScalar::Number(n)),
            _ => Some(CellScalar::String(s.clone())),
        },
        Value::String(s) => Some(CellScalar::String(s.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn value_type(value: &CellScalar) -> CellValueType {
    match value {
        CellScalar::Boolean(_) => CellValueType::Boolean,
        CellScalar::Number(_) => CellValueType::Number,
        CellScalar::String(_) => CellValueType::String,
    }
}

fn convert_config(
    config: &LegacySheetConfig,
    worksheet: &mut WorksheetData,
    ctx: &mut MigrationContext<'_>,
) {
    for (key, merge) in config.merge.iter().flatten() {
        if merge.rs == 0 || merge.cs == 0 {
            ctx.record(Section::Merge, key.as_str(), Issue::EmptyRange);
            continue;
        }
        worksheet.merge_data.push(CellRange::new(
            CellRef::new(merge.r, merge.c),
            CellRef::new(
                merge.r.saturating_add(merge.rs - 1),
                merge.c.saturating_add(merge.cs - 1),
            ),
        ));
    }

    for (key, height) in config.rowlen.iter().flatten() {
        match parse_axis_key(key) {
            Some(row) => worksheet.row_data.entry(row).or_default().h = Some(*height),
            None => record_axis_key(ctx, Section::Rows, key),
        }
    }
    for key in config.rowhidden.iter().flat_map(|hidden| hidden.keys()) {
        match parse_axis_key(key) {
            Some(row) => worksheet.row_data.entry(row).or_default().hd = Some(BooleanNumber::True),
            None => record_axis_key(ctx, Section::HiddenRows, key),
        }
    }

    for (key, width) in config.columnlen.iter().flatten() {
        match parse_axis_key(key) {
            Some(col) => worksheet.column_data.entry(col).or_default().w = Some(*width),
            None => record_axis_key(ctx, Section::Columns, key),
        }
    }
    for key in config.colhidden.iter().flat_map(|hidden| hidden.keys()) {
        match parse_axis_key(key) {
            Some(col) => {
                worksheet.column_data.entry(col).or_default().hd = Some(BooleanNumber::True)
            }
            None => record_axis_key(ctx, Section::HiddenColumns, key),
        }
    }
}

fn record_axis_key(ctx: &mut MigrationContext<'_>, section: Section, key: &str) {
    ctx.record(
        section,
        key,
        Issue::InvalidKey(format!("`{key}` is not a row or column index")),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIdGenerator;
    use crate::model::{ColumnData, RowData};
    use crate::MigrationOptions;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn convert(value: Value) -> (WorksheetData, crate::MigrationReport) {
        let sheet: LegacySheet = serde_json::from_value(value).unwrap();
        let options = MigrationOptions::default();
        let mut ids = SequentialIdGenerator::new();
        let mut ctx = MigrationContext::new(&options, &mut ids);
        let mut worksheet = WorksheetData::default();
        convert_cells(&sheet, &mut worksheet, &mut ctx);
        (worksheet, ctx.into_report())
    }

    fn cell(v: CellScalar, t: CellValueType) -> CellData {
        CellData {
            v: Some(v),
            t: Some(t),
            f: None,
        }
    }

    #[test]
    fn celldata_values_and_types() {
        let (worksheet, report) = convert(json!({"celldata": [
            {"r": 0, "c": 0, "v": {"v": 12, "m": "12", "ct": {"fa": "General", "t": "n"}}},
            {"r": 0, "c": 1, "v": {"v": "3.5", "ct": {"fa": "General", "t": "n"}}},
            {"r": 0, "c": 2, "v": {"v": "007", "ct": {"fa": "@", "t": "s"}}},
            {"r": 1, "c": 0, "v": {"v": true, "ct": {"fa": "General", "t": "b"}}},
            {"r": 1, "c": 1, "v": {"v": 3, "f": "=1+2"}},
            {"r": 1, "c": 2, "v": {"m": "shown"}},
            {"r": 2, "c": 0, "v": {"ct": {"fa": "General", "t": "g"}}},
            {"r": 2, "c": 1, "v": null}
        ]}));
        assert!(report.is_empty());

        assert_eq!(
            worksheet.cell(0, 0),
            Some(&cell(CellScalar::Number(12.0), CellValueType::Number))
        );
        assert_eq!(
            worksheet.cell(0, 1),
            Some(&cell(CellScalar::Number(3.5), CellValueType::Number))
        );
        assert_eq!(
            worksheet.cell(0, 2),
            Some(&cell(
                CellScalar::String("007".to_string()),
                CellValueType::ForceString
            ))
        );
        assert_eq!(
            worksheet.cell(1, 0),
            Some(&cell(CellScalar::Boolean(true), CellValueType::Boolean))
        );
        assert_eq!(worksheet.cell(1, 1).unwrap().f.as_deref(), Some("=1+2"));
        assert_eq!(
            worksheet.cell(1, 2),
            Some(&cell(
                CellScalar::String("shown".to_string()),
                CellValueType::String
            ))
        );
        assert_eq!(worksheet.cell(2, 0), None);
        assert_eq!(worksheet.cell_count(), 6);
    }

    #[test]
    fn inline_rich_text_is_flattened() {
        let (worksheet, _) = convert(json!({"celldata": [
            {"r": 3, "c": 4, "v": {"ct": {"fa": "General", "t": "inlineStr", "s": [
                {"v": "Hello, ", "bl": 1},
                {"v": "world", "it": 1}
            ]}}}
        ]}));
        assert_eq!(
            worksheet.cell(3, 4),
            Some(&cell(
                CellScalar::String("Hello, world".to_string()),
                CellValueType::String
            ))
        );
    }

    #[test]
    fn dense_matrix_is_used_without_celldata() {
        let (worksheet, _) = convert(json!({"data": [
            [null, {"v": "a"}],
            [7, null]
        ]}));
        assert_eq!(worksheet.cell_count(), 2);
        assert_eq!(
            worksheet.cell(1, 0),
            Some(&cell(CellScalar::Number(7.0), CellValueType::Number))
        );

        let (worksheet, _) = convert(json!({"celldata": [], "data": [[1]]}));
        assert_eq!(worksheet.cell_count(), 0);
    }

    #[test]
    fn structured_values_are_reported() {
        let (worksheet, report) = convert(json!({"celldata": [
            {"r": 0, "c": 0, "v": {"v": {"nested": true}}}
        ]}));
        assert_eq!(worksheet.cell_count(), 0);
        assert_eq!(report.entries[0].key, "0_0");
        assert_eq!(report.entries[0].section, Section::Cells);
    }

    #[test]
    fn merges_and_axis_overrides() {
        let (worksheet, report) = convert(json!({"config": {
            "merge": {
                "0_0": {"r": 0, "c": 0, "rs": 2, "cs": 3},
                "5_5": {"r": 5, "c": 5, "rs": 0, "cs": 1}
            },
            "rowlen": {"0": 30, "x": 10},
            "columnlen": {"2": 120.5},
            "rowhidden": {"4": 0},
            "colhidden": {"1": 0}
        }}));

        assert_eq!(
            worksheet.merge_data,
            vec![CellRange::new(CellRef::new(0, 0), CellRef::new(1, 2))]
        );
        assert_eq!(
            worksheet.row_data.get(&0),
            Some(&RowData {
                h: Some(30.0),
                hd: None
            })
        );
        assert_eq!(worksheet.row_data[&4].hd, Some(BooleanNumber::True));
        assert_eq!(
            worksheet.column_data.get(&2),
            Some(&ColumnData {
                w: Some(120.5),
                hd: None
            })
        );
        assert_eq!(worksheet.column_data[&1].hd, Some(BooleanNumber::True));

        let sections: Vec<Section> = report.iter().map(|e| e.section).collect();
        assert_eq!(sections, vec![Section::Merge, Section::Rows]);
    }

    #[test]
    fn bad_hidden_keys_report_their_own_section() {
        let (worksheet, report) = convert(json!({"config": {
            "rowhidden": {"r1": 0, "2": 0},
            "colhidden": {"c": 0}
        }}));
        assert_eq!(worksheet.row_data[&2].hd, Some(BooleanNumber::True));

        let lines: Vec<String> = report.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "config.rowhidden r1: `r1` is not a row or column index (skipped)",
                "config.colhidden c: `c` is not a row or column index (skipped)",
            ]
        );
    }
}
