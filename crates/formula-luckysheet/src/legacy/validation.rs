use serde::Deserialize;
use serde_json::Value;

use crate::js::{js_flag, js_string};

/// One entry of a sheet's `dataVerification` map.
///
/// Luckysheet overloads `type2`: for `dropdown` it is the multi-select flag, for every other
/// type it is a comparison operator code. Deserialization resolves that overload into
/// [`LegacyValidation`] so converters match on variants instead of inspecting `type2`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "RawValidationCell")]
pub struct LegacyValidationCell {
    pub rule: LegacyValidation,
    /// `hintText`: prompt shown when the cell is selected.
    pub hint_text: Option<String>,
    /// `hintShow`
    pub hint_show: Option<bool>,
    /// `prohibitInput`: reject (rather than warn about) invalid input.
    pub prohibit_input: Option<bool>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LegacyValidation {
    /// `type: "dropdown"`; `value1` holds the comma-separated options.
    Dropdown {
        multiple: bool,
        source: Option<Value>,
    },
    /// Every other `type`: an operator code plus up to two operands.
    Compare {
        type_name: String,
        operator: Option<String>,
        value1: Option<Value>,
        value2: Option<Value>,
    },
}

impl LegacyValidation {
    /// The legacy type token used for mapping; multi-select dropdowns become
    /// `dropdown_multiple`.
    pub fn origin_type(&self) -> &str {
        match self {
            LegacyValidation::Dropdown { multiple: true, .. } => "dropdown_multiple",
            LegacyValidation::Dropdown { multiple: false, .. } => "dropdown",
            LegacyValidation::Compare { type_name, .. } => type_name,
        }
    }

    /// `value1`, whichever variant carries it.
    pub fn first_operand(&self) -> Option<&Value> {
        match self {
            LegacyValidation::Dropdown { source, .. } => source.as_ref(),
            LegacyValidation::Compare { value1, .. } => value1.as_ref(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawValidationCell {
    #[serde(rename = "type", default)]
    type_: Option<String>,
    #[serde(default)]
    type2: Option<Value>,
    #[serde(default)]
    value1: Option<Value>,
    #[serde(default)]
    value2: Option<Value>,
    #[serde(default)]
    hint_text: Option<String>,
    #[serde(default)]
    hint_show: Option<Value>,
    #[serde(default)]
    prohibit_input: Option<Value>,
}

impl From<RawValidationCell> for LegacyValidationCell {
    fn from(raw: RawValidationCell) -> Self {
        let type_name = raw.type_.unwrap_or_default();
        let rule = if type_name == "dropdown" {
            LegacyValidation::Dropdown {
                multiple: matches!(raw.type2, Some(Value::Bool(true))),
                source: raw.value1,
            }
        } else {
            LegacyValidation::Compare {
                type_name,
                operator: match raw.type2 {
                    None | Some(Value::Null) => None,
                    Some(Value::String(code)) => Some(code),
                    Some(other) => Some(js_string(Some(&other))),
                },
                value1: raw.value1,
                value2: raw.value2,
            }
        };

        LegacyValidationCell {
            rule,
            hint_text: raw.hint_text,
            hint_show: raw.hint_show.as_ref().and_then(js_flag),
            prohibit_input: raw.prohibit_input.as_ref().and_then(js_flag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cell(value: Value) -> LegacyValidationCell {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn dropdown_flag_selects_multiple() {
        let multi = cell(json!({"type": "dropdown", "type2": true, "value1": "A,B"}));
        assert_eq!(
            multi.rule,
            LegacyValidation::Dropdown {
                multiple: true,
                source: Some(json!("A,B"))
            }
        );
        assert_eq!(multi.rule.origin_type(), "dropdown_multiple");

        // Only a literal `true` turns on multi-select.
        let single = cell(json!({"type": "dropdown", "type2": "true", "value1": "A"}));
        assert_eq!(single.rule.origin_type(), "dropdown");
    }

    #[test]
    fn comparison_operator_codes_are_stringified() {
        let between = cell(json!({"type": "number", "type2": "bw", "value1": 1, "value2": 10}));
        assert_eq!(
            between.rule,
            LegacyValidation::Compare {
                type_name: "number".to_string(),
                operator: Some("bw".to_string()),
                value1: Some(json!(1)),
                value2: Some(json!(10)),
            }
        );

        let flagged = cell(json!({"type": "date", "type2": true}));
        assert!(matches!(
            flagged.rule,
            LegacyValidation::Compare { operator: Some(ref op), .. } if op == "true"
        ));

        let missing = cell(json!({"type": "number", "type2": null}));
        assert!(matches!(
            missing.rule,
            LegacyValidation::Compare { operator: None, .. }
        ));
    }

    #[test]
    fn hint_fields_are_optional() {
        let c = cell(json!({"type": "text_length", "hintText": "short", "hintShow": 1}));
        assert_eq!(c.hint_text.as_deref(), Some("short"));
        assert_eq!(c.hint_show, Some(true));
        assert_eq!(c.prohibit_input, None);

        let untyped = cell(json!({}));
        assert_eq!(untyped.rule.origin_type(), "");
    }
}
