//! Diff generation for audit logging
//!
//! Summarizes which top-level fields changed between two serialized states.

use serde_json::Value;

/// Fields that change on every write and would only add noise
const IGNORED_FIELDS: [&str; 1] = ["updated_at"];

/// Generate a human-readable diff between two JSON values
///
/// Only top-level fields are compared. Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes: Vec<String> = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                if IGNORED_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!("{}: {} -> (removed)", key, format_value(before_val))),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) && !IGNORED_FIELDS.contains(&key.as_str()) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            changes
        }
        _ if before != after => vec![format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_fields_only() {
        let before = json!({"title": "Networking Night", "cost": 1500});
        let after = json!({"title": "Networking Night", "cost": 2000});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "cost: 1500 -> 2000");
    }

    #[test]
    fn test_updated_at_is_ignored() {
        let before = json!({"cost": 1500, "updated_at": "2026-01-01T00:00:00Z"});
        let after = json!({"cost": 1500, "updated_at": "2026-02-01T00:00:00Z"});

        assert!(generate_diff(&before, &after).is_none());
    }

    #[test]
    fn test_added_and_removed() {
        let before = json!({"location": "Lab A"});
        let after = json!({"description": "Hands-on"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("location: \"Lab A\" -> (removed)"));
        assert!(diff.contains("description: (added) -> \"Hands-on\""));
    }

    #[test]
    fn test_long_strings_are_truncated() {
        let before = json!({"description": "x".repeat(80)});
        let after = json!({"description": "short"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("...\" -> \"short\""));
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(
            generate_diff(&json!(1), &json!(2)).as_deref(),
            Some("1 -> 2")
        );
        assert!(generate_diff(&json!(null), &json!(null)).is_none());
    }
}
