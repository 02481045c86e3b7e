use super::super::entities::{SettingError, SettingEdits, SettingsValidation};
use serde_json::Value;
use std::collections::BTreeMap;

pub const INCORRECT_JSON_MESSAGE: &str = "Incorrectly formatted JSON";

/// Best-effort validation and repair of free-text setting values
///
/// Every value must parse as JSON. A bare word that is not JSON is wrapped in
/// quotes when that makes it parse; the repaired text replaces the edit but the
/// bag is still reported invalid for this pass, so the user sees the change.
pub struct SettingsJsonValidator;

impl SettingsJsonValidator {
    pub fn validate(edits: &SettingEdits) -> SettingsValidation {
        let mut errors = Vec::new();
        let mut edited_settings = edits.clone();

        for (key, raw) in edits {
            if serde_json::from_str::<Value>(raw).is_ok() {
                continue;
            }

            errors.push(SettingError {
                key: key.clone(),
                message: INCORRECT_JSON_MESSAGE.to_string(),
            });

            if !matches!(raw.chars().next(), Some('{') | Some('[') | Some('\'')) {
                let quoted = format!("\"{}\"", raw);
                if serde_json::from_str::<Value>(&quoted).is_ok() {
                    edited_settings.insert(key.clone(), quoted);
                }
            }
        }

        SettingsValidation {
            is_valid: errors.is_empty(),
            errors,
            edited_settings,
        }
    }

    /// Turn edits into the JSON values sent to the server
    ///
    /// Numeric-looking text stays a string, other text is parsed as JSON when
    /// it can be and sent verbatim otherwise.
    pub fn parse_array_or_object_values(edits: &SettingEdits) -> BTreeMap<String, Value> {
        edits
            .iter()
            .map(|(key, raw)| {
                let value = if looks_numeric(raw) {
                    Value::String(raw.clone())
                } else {
                    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.clone()))
                };
                (key.clone(), value)
            })
            .collect()
    }
}

/// Text a browser would coerce to a number, blank included
fn looks_numeric(raw: &str) -> bool {
    let text = raw.trim();
    if text.is_empty() {
        return true;
    }

    let unsigned = text.trim_start_matches(['+', '-']);
    if unsigned == "Infinity" {
        return true;
    }

    let lower = text.to_ascii_lowercase();
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(digits) = lower.strip_prefix(prefix) {
            return !digits.is_empty() && u64::from_str_radix(digits, radix).is_ok();
        }
    }

    // Rust accepts "inf" and "nan", which are not numbers here
    let only_numeric_chars = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    only_numeric_chars && text.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn edits(pairs: &[(&str, &str)]) -> SettingEdits {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_valid_json_object() {
        let result = SettingsJsonValidator::validate(&edits(&[("key", "{ \"key\": \"value\" }")]));
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_incorrect_json_reports_error() {
        let result = SettingsJsonValidator::validate(&edits(&[("setting", "{incorrectJSON")]));
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![SettingError {
                key: "setting".to_string(),
                message: INCORRECT_JSON_MESSAGE.to_string(),
            }]
        );
        assert_eq!(result.edited_settings["setting"], "{incorrectJSON");
    }

    #[test]
    fn test_bare_word_is_quoted_but_still_invalid() {
        let result = SettingsJsonValidator::validate(&edits(&[("setting", "hello")]));
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.edited_settings["setting"], "\"hello\"");

        let second_pass = SettingsJsonValidator::validate(&result.edited_settings);
        assert!(second_pass.is_valid);
    }

    #[test]
    fn test_incorrect_json_word_is_quoted() {
        let result = SettingsJsonValidator::validate(&edits(&[("setting", "incorrectJSON")]));
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].key, "setting");
        assert_eq!(result.edited_settings["setting"], "\"incorrectJSON\"");
    }

    #[test]
    fn test_single_quoted_text_is_not_repaired() {
        let result = SettingsJsonValidator::validate(&edits(&[("setting", "'hello'")]));
        assert!(!result.is_valid);
        assert_eq!(result.edited_settings["setting"], "'hello'");
    }

    #[test]
    fn test_text_with_inner_quote_cannot_be_repaired() {
        let result = SettingsJsonValidator::validate(&edits(&[("setting", "say \"hi")]));
        assert!(!result.is_valid);
        assert_eq!(result.edited_settings["setting"], "say \"hi");
    }

    #[test]
    fn test_one_bad_value_invalidates_the_bag() {
        let result = SettingsJsonValidator::validate(&edits(&[
            ("good", "[1, 2]"),
            ("bad", "[1, 2"),
        ]));
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].key, "bad");
    }

    #[test]
    fn test_parse_values_for_submission() {
        let parsed = SettingsJsonValidator::parse_array_or_object_values(&edits(&[
            ("key1", "123"),
            ("key2", "{\"name\":\"John\"}"),
            ("key3", "John"),
            ("key4", "true"),
            ("key5", "[\"a\"]"),
        ]));
        assert_eq!(parsed["key1"], json!("123"));
        assert_eq!(parsed["key2"], json!({"name": "John"}));
        assert_eq!(parsed["key3"], json!("John"));
        assert_eq!(parsed["key4"], json!(true));
        assert_eq!(parsed["key5"], json!(["a"]));
    }

    #[test]
    fn test_numeric_detection() {
        for numeric in ["1", "-2.5", "1e3", "", "  ", "0x1F", "Infinity"] {
            assert!(looks_numeric(numeric), "{:?} should be numeric", numeric);
        }
        for text in ["abc", "NaN", "inf", "1,000", "0x", "\"1\""] {
            assert!(!looks_numeric(text), "{:?} should not be numeric", text);
        }
    }
}
