use serde_json::Value;

use crate::convert::MigrationContext;
use crate::js::{js_number_value, js_string};
use crate::legacy::{LegacyConditionFormat, LegacyConditionRule, LegacySheet};
use crate::mapping::{self, HighlightKind};
use crate::model::{
    CfRuleConfig, CfStyle, CfValueConfig, ColorScalePoint, ColorScaleRule, ColorStyle,
    ConditionalFormatRule, DataBarConfig, DataBarRule, HighlightCellRule, HighlightCondition,
    IconSetRule, IconSetThreshold, NumberOperand, NumberOperator,
};
use crate::report::{Issue, Section};

/// Luckysheet's default data bar colour.
const DEFAULT_BAR_COLOR: &str = "#638ec6";

/// Convert a sheet's `luckysheet_conditionformat_save` list into conditional-format rules.
///
/// Returns `None` when the section is absent. Entries are skipped (and reported) when their
/// type or condition has no target equivalent, their operands are unusable, or they cover no
/// cells.
pub fn convert_conditional_formats(
    sheet: &LegacySheet,
    ctx: &mut MigrationContext<'_>,
) -> Option<Vec<ConditionalFormatRule>> {
    let section = sheet.condition_formats.as_ref()?;

    let mut rules = Vec::with_capacity(section.len());
    for (index, entry) in section.iter().enumerate() {
        if let Some(rule) = convert_entry(&index.to_string(), entry, ctx) {
            rules.push(rule);
        }
    }
    Some(rules)
}

fn convert_entry(
    key: &str,
    entry: &LegacyConditionFormat,
    ctx: &mut MigrationContext<'_>,
) -> Option<ConditionalFormatRule> {
    let rule = match &entry.rule {
        LegacyConditionRule::Highlight {
            condition_name,
            values,
            text_color,
            cell_color,
        } => {
            let condition = highlight_condition(key, condition_name, values, ctx)?;
            CfRuleConfig::HighlightCell(HighlightCellRule {
                condition,
                style: CfStyle {
                    cl: text_color.as_deref().map(|c| ColorStyle::new(normalize_color(c))),
                    bg: cell_color.as_deref().map(|c| ColorStyle::new(normalize_color(c))),
                },
            })
        }
        LegacyConditionRule::DataBar { colors } => CfRuleConfig::DataBar(data_bar(colors)),
        LegacyConditionRule::ColorGradation { colors } => {
            CfRuleConfig::ColorScale(color_scale(key, colors, ctx)?)
        }
        LegacyConditionRule::Icons {
            len,
            left_min,
            top,
        } => {
            let Some(icon_type) = mapping::icon_set_type(*len) else {
                ctx.record(
                    Section::ConditionalFormat,
                    key,
                    Issue::UnmappedType(format!("icons ({len} icons)")),
                );
                return None;
            };
            log::debug!("icon sprite ({left_min}, {top}) mapped to {icon_type}");
            CfRuleConfig::IconSet(icon_set(*len, icon_type))
        }
        LegacyConditionRule::Other { type_name } => {
            ctx.record(
                Section::ConditionalFormat,
                key,
                Issue::UnmappedType(type_name.clone()),
            );
            return None;
        }
    };

    if entry.ranges.is_empty() {
        ctx.record(Section::ConditionalFormat, key, Issue::EmptyRange);
        return None;
    }

    Some(ConditionalFormatRule {
        cf_id: ctx.next_id(),
        ranges: entry.ranges.clone(),
        stop_if_true: false,
        rule,
    })
}

fn highlight_condition(
    key: &str,
    condition_name: &str,
    values: &[Value],
    ctx: &mut MigrationContext<'_>,
) -> Option<HighlightCondition> {
    let Some(kind) = mapping::highlight_kind(condition_name) else {
        ctx.record(
            Section::ConditionalFormat,
            key,
            Issue::UnmappedCondition(condition_name.to_string()),
        );
        return None;
    };

    let condition = match kind {
        HighlightKind::Number(operator) => HighlightCondition::Number {
            operator,
            value: NumberOperand::Single(number_operand(key, values, 0, ctx)?),
        },
        HighlightKind::Between => {
            let low = number_operand(key, values, 0, ctx)?;
            let high = number_operand(key, values, 1, ctx)?;
            HighlightCondition::Number {
                operator: NumberOperator::Between,
                value: NumberOperand::Pair([low, high]),
            }
        }
        HighlightKind::Text(operator) => {
            let text = js_string(values.first());
            if text.is_empty() {
                ctx.record(
                    Section::ConditionalFormat,
                    key,
                    Issue::InvalidOperand("conditionValue[0] is empty".to_string()),
                );
                return None;
            }
            HighlightCondition::Text {
                operator,
                value: text,
            }
        }
        HighlightKind::DuplicateOrUnique => match js_string(values.first()).as_str() {
            "1" => HighlightCondition::UniqueValues,
            _ => HighlightCondition::DuplicateValues,
        },
        HighlightKind::Rank {
            is_bottom,
            is_percent,
        } => {
            let rank = number_operand(key, values, 0, ctx)?;
            if rank < 1.0 || rank.fract() != 0.0 || rank > f64::from(u32::MAX) {
                ctx.record(
                    Section::ConditionalFormat,
                    key,
                    Issue::InvalidOperand(format!("rank {rank} is not a positive integer")),
                );
                return None;
            }
            HighlightCondition::Rank {
                is_bottom,
                is_percent,
                value: rank as u32,
            }
        }
        HighlightKind::Average(operator) => HighlightCondition::Average { operator },
    };
    Some(condition)
}

fn number_operand(
    key: &str,
    values: &[Value],
    index: usize,
    ctx: &mut MigrationContext<'_>,
) -> Option<f64> {
    let value = values.get(index).and_then(js_number_value);
    if value.is_none() {
        ctx.record(
            Section::ConditionalFormat,
            key,
            Issue::InvalidOperand(format!("conditionValue[{index}] is not a number")),
        );
    }
    value
}

fn data_bar(colors: &[String]) -> DataBarRule {
    let color = colors
        .first()
        .map(|c| normalize_color(c))
        .unwrap_or_else(|| DEFAULT_BAR_COLOR.to_string());
    DataBarRule {
        is_show_value: true,
        config: DataBarConfig {
            min: CfValueConfig::min(),
            max: CfValueConfig::max(),
            // Gradient bars list their fade-out colour second.
            is_gradient: colors.len() > 1,
            positive_color: color.clone(),
            native_color: color,
        },
    }
}

fn color_scale(
    key: &str,
    colors: &[String],
    ctx: &mut MigrationContext<'_>,
) -> Option<ColorScaleRule> {
    if colors.len() < 2 {
        ctx.record(
            Section::ConditionalFormat,
            key,
            Issue::InvalidOperand(format!("colour scale with {} colours", colors.len())),
        );
        return None;
    }

    let last = colors.len() - 1;
    let config = colors
        .iter()
        .rev()
        .enumerate()
        .map(|(index, color)| ColorScalePoint {
            index: index as u32,
            color: normalize_color(color),
            value: if index == 0 {
                CfValueConfig::min()
            } else if index == last {
                CfValueConfig::max()
            } else {
                CfValueConfig::percentile((100.0 * index as f64 / last as f64).round())
            },
        })
        .collect();
    Some(ColorScaleRule { config })
}

fn icon_set(len: u32, icon_type: &str) -> IconSetRule {
    let threshold = |i: u32| (100.0 * f64::from(len - 1 - i) / f64::from(len)).round();
    let config = (0..len)
        .map(|i| {
            let (operator, value) = if i + 1 < len {
                (NumberOperator::GreaterThanOrEqual, threshold(i))
            } else {
                (NumberOperator::LessThan, threshold(i - 1))
            };
            IconSetThreshold {
                operator,
                value: CfValueConfig::percent(value),
                icon_type: icon_type.to_string(),
                icon_id: i.to_string(),
            }
        })
        .collect();
    IconSetRule {
        is_show_value: true,
        config,
    }
}

/// Normalize `rgb(r, g, b)` / `rgba(r, g, b, a)` to `#rrggbb`; other colours pass through.
fn normalize_color(color: &str) -> String {
    let trimmed = color.trim();
    let lower = trimmed.to_ascii_lowercase();
    let body = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'));
    let Some(body) = body else {
        return trimmed.to_string();
    };

    let channels: Vec<u8> = body
        .split(',')
        .take(3)
        .filter_map(|part| part.trim().parse::<f64>().ok())
        .map(|n| n.round().clamp(0.0, 255.0) as u8)
        .collect();
    match channels.as_slice() {
        [r, g, b] => format!("#{r:02x}{g:02x}{b:02x}"),
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIdGenerator;
    use crate::model::{CellRange, CellRef, TextOperator};
    use crate::MigrationOptions;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn run(entries: Value) -> (Option<Vec<ConditionalFormatRule>>, crate::MigrationReport) {
        let sheet: LegacySheet =
            serde_json::from_value(json!({ "luckysheet_conditionformat_save": entries })).unwrap();
        let options = MigrationOptions::default();
        let mut ids = SequentialIdGenerator::new();
        let mut ctx = MigrationContext::new(&options, &mut ids);
        let rules = convert_conditional_formats(&sheet, &mut ctx);
        (rules, ctx.into_report())
    }

    fn range() -> Value {
        json!([{"row": [0, 4], "column": [1, 1]}])
    }

    fn highlight(name: &str, values: Value) -> Value {
        json!({
            "type": "default",
            "cellrange": range(),
            "format": {"textColor": "#9c0006", "cellColor": "rgb(255, 199, 206)"},
            "conditionName": name,
            "conditionValue": values
        })
    }

    fn only_condition(entry: Value) -> HighlightCondition {
        let (rules, report) = run(json!([entry]));
        assert!(report.is_empty(), "{report:?}");
        match rules.unwrap().remove(0).rule {
            CfRuleConfig::HighlightCell(rule) => rule.condition,
            other => panic!("expected highlight rule, got {other:?}"),
        }
    }

    #[test]
    fn greater_than_becomes_number_highlight() {
        let (rules, _) = run(json!([highlight("greaterThan", json!(["5"]))]));
        assert_eq!(
            rules.unwrap(),
            vec![ConditionalFormatRule {
                cf_id: "000001".to_string(),
                ranges: vec![CellRange::new(CellRef::new(0, 1), CellRef::new(4, 1))],
                stop_if_true: false,
                rule: CfRuleConfig::HighlightCell(HighlightCellRule {
                    condition: HighlightCondition::Number {
                        operator: NumberOperator::GreaterThan,
                        value: NumberOperand::Single(5.0),
                    },
                    style: CfStyle {
                        cl: Some(ColorStyle::new("#9c0006")),
                        bg: Some(ColorStyle::new("#ffc7ce")),
                    },
                }),
            }]
        );
    }

    #[test]
    fn highlight_vocabulary() {
        assert_eq!(
            only_condition(highlight("betweenness", json!([1, 9]))),
            HighlightCondition::Number {
                operator: NumberOperator::Between,
                value: NumberOperand::Pair([1.0, 9.0]),
            }
        );
        assert_eq!(
            only_condition(highlight("textContains", json!(["abc"]))),
            HighlightCondition::Text {
                operator: TextOperator::ContainsText,
                value: "abc".to_string(),
            }
        );
        assert_eq!(
            only_condition(highlight("duplicateValue", json!(["0"]))),
            HighlightCondition::DuplicateValues
        );
        assert_eq!(
            only_condition(highlight("duplicateValue", json!(["1"]))),
            HighlightCondition::UniqueValues
        );
        assert_eq!(
            only_condition(highlight("last10%", json!([20]))),
            HighlightCondition::Rank {
                is_bottom: true,
                is_percent: true,
                value: 20,
            }
        );
        assert_eq!(
            only_condition(highlight("SubAverage", json!([]))),
            HighlightCondition::Average {
                operator: NumberOperator::LessThan
            }
        );
    }

    #[test]
    fn unusable_entries_are_skipped_and_reported() {
        let (rules, report) = run(json!([
            highlight("occurrenceDate", json!(["2024/01/01-2024/01/31"])),
            highlight("greaterThan", json!(["many"])),
            highlight("top10", json!([0])),
            {"type": "default", "cellrange": [], "conditionName": "equal", "conditionValue": [1]},
            {"type": "sparkline", "cellrange": range()},
            {"type": "colorGradation", "cellrange": range(), "format": ["#ff0000"]},
            {"type": "icons", "cellrange": range(), "format": {"len": 7}}
        ]));
        assert_eq!(rules, Some(vec![]));

        let issues: Vec<&Issue> = report.iter().map(|e| &e.issue).collect();
        assert_eq!(issues.len(), 7);
        assert_eq!(
            issues[0],
            &Issue::UnmappedCondition("occurrenceDate".to_string())
        );
        assert!(matches!(issues[1], Issue::InvalidOperand(_)));
        assert!(matches!(issues[2], Issue::InvalidOperand(_)));
        assert_eq!(issues[3], &Issue::EmptyRange);
        assert_eq!(issues[4], &Issue::UnmappedType("sparkline".to_string()));
        assert!(matches!(issues[5], Issue::InvalidOperand(_)));
        assert!(matches!(issues[6], Issue::UnmappedType(_)));
        assert!(report
            .iter()
            .all(|e| e.section == Section::ConditionalFormat));
    }

    #[test]
    fn data_bar_gradient_follows_colour_count() {
        let (rules, _) = run(json!([
            {"type": "dataBar", "cellrange": range(), "format": ["#638ec6", "#ffffff"]},
            {"type": "dataBar", "cellrange": range(), "format": []}
        ]));
        let rules = rules.unwrap();
        let CfRuleConfig::DataBar(gradient) = &rules[0].rule else {
            panic!("expected data bar");
        };
        assert!(gradient.config.is_gradient);
        assert_eq!(gradient.config.positive_color, "#638ec6");
        let CfRuleConfig::DataBar(solid) = &rules[1].rule else {
            panic!("expected data bar");
        };
        assert!(!solid.config.is_gradient);
        assert_eq!(solid.config.positive_color, DEFAULT_BAR_COLOR);
    }

    #[test]
    fn colour_gradation_is_reordered_from_min_to_max() {
        let (rules, _) = run(json!([{
            "type": "colorGradation",
            "cellrange": range(),
            "format": ["rgb(99, 190, 123)", "rgb(255, 235, 132)", "rgb(248, 105, 107)"]
        }]));
        let rules = rules.unwrap();
        assert_eq!(
            rules[0].rule,
            CfRuleConfig::ColorScale(ColorScaleRule {
                config: vec![
                    ColorScalePoint {
                        index: 0,
                        color: "#f8696b".to_string(),
                        value: CfValueConfig::min(),
                    },
                    ColorScalePoint {
                        index: 1,
                        color: "#ffeb84".to_string(),
                        value: CfValueConfig::percentile(50.0),
                    },
                    ColorScalePoint {
                        index: 2,
                        color: "#63be7b".to_string(),
                        value: CfValueConfig::max(),
                    },
                ]
            })
        );
    }

    #[test]
    fn icon_sets_split_evenly() {
        let (rules, _) = run(json!([
            {"type": "icons", "cellrange": range(), "format": {"len": 3, "leftMin": 0, "top": 0}}
        ]));
        let rules = rules.unwrap();
        let CfRuleConfig::IconSet(icons) = &rules[0].rule else {
            panic!("expected icon set");
        };
        let summary: Vec<(NumberOperator, Option<f64>, &str)> = icons
            .config
            .iter()
            .map(|t| (t.operator, t.value.value, t.icon_id.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (NumberOperator::GreaterThanOrEqual, Some(67.0), "0"),
                (NumberOperator::GreaterThanOrEqual, Some(33.0), "1"),
                (NumberOperator::LessThan, Some(33.0), "2"),
            ]
        );
        assert!(icons.config.iter().all(|t| t.icon_type == "3Arrows"));
    }

    #[test]
    fn serializes_to_univer_shape() {
        let (rules, _) = run(json!([highlight("equal", json!([3]))]));
        assert_eq!(
            serde_json::to_value(&rules.unwrap()[0]).unwrap(),
            json!({
                "cfId": "000001",
                "ranges": [{"startRow": 0, "startColumn": 1, "endRow": 4, "endColumn": 1}],
                "stopIfTrue": false,
                "rule": {
                    "type": "highlightCell",
                    "subType": "number",
                    "operator": "equal",
                    "value": 3.0,
                    "style": {"cl": {"rgb": "#9c0006"}, "bg": {"rgb": "#ffc7ce"}}
                }
            })
        );
    }

    #[test]
    fn colours_normalize() {
        assert_eq!(normalize_color("rgb(0, 128, 255)"), "#0080ff");
        assert_eq!(normalize_color("RGBA(1,2,3,0.5)"), "#010203");
        assert_eq!(normalize_color(" #abc "), "#abc");
        assert_eq!(normalize_color("rgb(nope)"), "rgb(nope)");
    }

    #[test]
    fn absent_section_yields_none() {
        let sheet = LegacySheet::default();
        let options = MigrationOptions::default();
        let mut ids = SequentialIdGenerator::new();
        let mut ctx = MigrationContext::new(&options, &mut ids);
        assert_eq!(convert_conditional_formats(&sheet, &mut ctx), None);
    }
}
