//! Rendering of loosely-typed Luckysheet JSON scalars.
//!
//! Luckysheet is a browser application, so every value it persists was produced (and will be
//! re-read) by JavaScript. Operands and sheet indices are rendered with `String(value)`
//! semantics so that `1` stays `"1"` instead of becoming `"1.0"`.

use serde_json::Value;

/// Render an optional JSON value the way JavaScript's `String(value)` does.
///
/// Absent and `null` values render as the empty string.
pub(crate) fn js_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(value) => render(value),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                n.as_f64().map(js_number).unwrap_or_default()
            }
        }
        Value::String(s) => s.clone(),
        // `[1, [2, 3]].toString()` flattens with commas; `null` members become empty.
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => render(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn js_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        // `String(-0) === "0"`.
        return "0".to_string();
    }
    let abs = n.abs();
    if !(1e-6..1e21).contains(&abs) {
        return js_exponent(n);
    }
    if n.fract() == 0.0 {
        return format!("{n:.0}");
    }
    n.to_string()
}

/// `1e-7`, `1.5e+21`: shortest digits, explicit exponent sign.
fn js_exponent(n: f64) -> String {
    let formatted = format!("{n:e}");
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => formatted,
    }
}

/// Interpret a Luckysheet flag (`0`/`1`, `"0"`/`"1"`, `true`/`false`) as a boolean.
pub(crate) fn js_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => match s.trim() {
            "1" | "true" => Some(true),
            "0" | "false" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Interpret a Luckysheet number that may have been persisted as a string.
pub(crate) fn js_number_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_render_like_javascript() {
        assert_eq!(js_string(Some(&json!(1))), "1");
        assert_eq!(js_string(Some(&json!(10.0))), "10");
        assert_eq!(js_string(Some(&json!(-3.25))), "-3.25");
        assert_eq!(js_string(Some(&json!(-0.0))), "0");
        assert_eq!(js_string(Some(&json!(1e20))), "100000000000000000000");
        assert_eq!(js_string(Some(&json!(0.000001))), "0.000001");
    }

    #[test]
    fn exponent_range_numbers_render_like_javascript() {
        assert_eq!(js_string(Some(&json!(1e-7))), "1e-7");
        assert_eq!(js_string(Some(&json!(-2.5e-8))), "-2.5e-8");
        assert_eq!(js_string(Some(&json!(1e21))), "1e+21");
        assert_eq!(js_string(Some(&json!(1.5e300))), "1.5e+300");
    }

    #[test]
    fn non_numeric_scalars() {
        assert_eq!(js_string(None), "");
        assert_eq!(js_string(Some(&Value::Null)), "");
        assert_eq!(js_string(Some(&json!(true))), "true");
        assert_eq!(js_string(Some(&json!("A,B,C"))), "A,B,C");
        assert_eq!(js_string(Some(&json!([1, [2, null], "x"]))), "1,2,,x");
        assert_eq!(js_string(Some(&json!({"a": 1}))), "[object Object]");
    }

    #[test]
    fn flags_accept_numbers_strings_and_booleans() {
        assert_eq!(js_flag(&json!(1)), Some(true));
        assert_eq!(js_flag(&json!(0)), Some(false));
        assert_eq!(js_flag(&json!("1")), Some(true));
        assert_eq!(js_flag(&json!(false)), Some(false));
        assert_eq!(js_flag(&json!("maybe")), None);
        assert_eq!(js_flag(&json!(null)), None);
    }

    #[test]
    fn numeric_strings_parse() {
        assert_eq!(js_number_value(&json!(" 2.5 ")), Some(2.5));
        assert_eq!(js_number_value(&json!(7)), Some(7.0));
        assert_eq!(js_number_value(&json!("abc")), None);
        assert_eq!(js_number_value(&json!(true)), None);
    }
}
