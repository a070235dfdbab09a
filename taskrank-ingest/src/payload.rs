//! JSON task payloads.
//!
//! Two shapes are accepted: a bare array of task objects, or an object with a
//! `tasks` array. Field-level problems (a non-numeric importance, a garbled
//! due date) are not errors here; the scorer falls back to defaults for them.

use serde_json::Value;
use taskrank_core::Task;

use crate::errors::PayloadError;

/// Parse a request body into tasks.
pub fn parse_payload(body: &str) -> Result<Vec<Task>, PayloadError> {
    let value: Value = serde_json::from_str(body)?;
    tasks_from_value(value)
}

/// Extract tasks from an already-decoded JSON value.
pub fn tasks_from_value(value: Value) -> Result<Vec<Task>, PayloadError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("tasks") {
            Some(Value::Array(items)) => items,
            _ => return Err(PayloadError::UnexpectedShape),
        },
        _ => return Err(PayloadError::UnexpectedShape),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(PayloadError::NotAnObject { index });
            }
            serde_json::from_value(item).map_err(|source| PayloadError::InvalidTask { index, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskrank_core::TaskId;

    #[test]
    fn test_bare_array() {
        let tasks = parse_payload(r#"[{"id": "a", "dependencies": ["b"]}, {"id": "b"}]"#).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].dependencies, vec![TaskId::from("b")]);
    }

    #[test]
    fn test_wrapped_object() {
        let tasks = parse_payload(r#"{"tasks": [{"title": "Fix login", "importance": "9"}]}"#).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title.as_deref(), Some("Fix login"));
        assert_eq!(tasks[0].importance, Some(9));
        assert_eq!(tasks[0].id, None);
    }

    #[test]
    fn test_lenient_fields_do_not_fail() {
        let tasks = parse_payload(
            r#"[{"id": 1, "due_date": "whenever", "importance": null, "estimated_hours": "lots"}]"#,
        )
        .unwrap();
        assert_eq!(tasks[0].id, Some(TaskId::Int(1)));
        assert_eq!(tasks[0].due_date.as_deref(), Some("whenever"));
        assert_eq!(tasks[0].importance, None);
        assert_eq!(tasks[0].estimated_hours, None);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(parse_payload("[{"), Err(PayloadError::InvalidJson(_))));
        assert!(matches!(parse_payload(""), Err(PayloadError::InvalidJson(_))));
    }

    #[test]
    fn test_unexpected_shapes() {
        for body in [r#"{"items": []}"#, r#"{"tasks": "nope"}"#, "42", r#""tasks""#] {
            assert!(
                matches!(parse_payload(body), Err(PayloadError::UnexpectedShape)),
                "{body} should be rejected"
            );
        }
    }

    #[test]
    fn test_non_object_element() {
        let err = parse_payload(r#"[{"id": "ok"}, "not a task"]"#).unwrap_err();
        assert!(matches!(err, PayloadError::NotAnObject { index: 1 }));
    }

    #[test]
    fn test_malformed_dependency_elements_are_skipped() {
        let tasks =
            parse_payload(r#"[{"id": "a", "dependencies": ["b", null, 2.5]}, {"id": "b"}]"#).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].dependencies, vec![TaskId::from("b")]);
    }

    #[test]
    fn test_unusable_id_falls_back_to_title() {
        let tasks = parse_payload(r#"[{"id": 1.5, "title": "x"}, {"id": ["nested"]}]"#).unwrap();
        assert_eq!(tasks[0].id, None);
        assert_eq!(tasks[1].id, None);

        let ranked = taskrank_core::analyze(&tasks, None);
        let ids: Vec<String> = ranked.sorted.iter().map(|t| t.id.to_string()).collect();
        assert_eq!(ids, vec!["x", "__idx_1"]);
    }
}
