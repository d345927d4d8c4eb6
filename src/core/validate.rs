//! Knowledge base structure validation
//!
//! Key-presence checks over an untyped YAML document, so files written by
//! hand or by other tools report every missing field in one pass instead of
//! failing on the first decode error. Types, ranges and counter consistency
//! are not checked.

use serde_yaml::Value;

/// Required top-level keys, in reporting order
pub const REQUIRED_FIELDS: [&str; 11] = [
    "version",
    "last_updated",
    "versioning_preference",
    "created_date",
    "project_path",
    "questions_answered",
    "decisions",
    "capabilities",
    "conflicts_resolved",
    "context_snapshots",
    "statistics",
];

/// Required keys of `capabilities`
pub const CAPABILITIES_FIELDS: [&str; 4] = [
    "last_checked",
    "tools_available",
    "extensions_available",
    "workspace_type",
];

/// Required keys of `statistics`
pub const STATISTICS_FIELDS: [&str; 4] = [
    "total_conversations",
    "total_questions",
    "total_decisions",
    "total_conflicts",
];

/// Validate a knowledge base document. An empty result means valid.
pub fn validate_knowledge_base(document: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    for field in REQUIRED_FIELDS {
        if !has_key(document, field) {
            errors.push(format!("Missing required field: {}", field));
        }
    }

    if let Some(capabilities) = document.get("capabilities") {
        for field in CAPABILITIES_FIELDS {
            if !has_key(capabilities, field) {
                errors.push(format!("Missing capabilities field: {}", field));
            }
        }
    }

    if let Some(statistics) = document.get("statistics") {
        for field in STATISTICS_FIELDS {
            if !has_key(statistics, field) {
                errors.push(format!("Missing statistics field: {}", field));
            }
        }
    }

    errors
}

/// Non-mappings have no keys
fn has_key(value: &Value, key: &str) -> bool {
    value
        .as_mapping()
        .map(|m| m.contains_key(key))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_empty_document() {
        let errors = validate_knowledge_base(&parse("{}"));

        assert_eq!(errors.len(), 11);
        assert!(errors.iter().all(|e| e.starts_with("Missing required field: ")));
        assert_eq!(errors[0], "Missing required field: version");
        assert_eq!(errors[10], "Missing required field: statistics");
    }

    #[test]
    fn test_non_mapping_document() {
        assert_eq!(validate_knowledge_base(&parse("- a\n- b\n")).len(), 11);
        assert_eq!(validate_knowledge_base(&Value::Null).len(), 11);
    }

    #[test]
    fn test_nested_fields_checked_when_present() {
        let doc = parse(
            r#"
version: "1.0.0"
last_updated: "2025-01-01T00:00:00Z"
versioning_preference: internal
created_date: "2025-01-01T00:00:00Z"
project_path: /tmp/p
questions_answered: []
decisions: []
capabilities:
  last_checked: "2025-01-01T00:00:00Z"
  workspace_type: unknown
conflicts_resolved: []
context_snapshots: []
statistics:
  total_conversations: 0
  total_questions: 0
"#,
        );

        let errors = validate_knowledge_base(&doc);
        assert_eq!(
            errors,
            vec![
                "Missing capabilities field: tools_available",
                "Missing capabilities field: extensions_available",
                "Missing statistics field: total_decisions",
                "Missing statistics field: total_conflicts",
            ]
        );
    }

    #[test]
    fn test_missing_nested_object_skips_sub_checks() {
        let doc = parse(
            r#"
version: "1.0.0"
last_updated: x
versioning_preference: internal
created_date: x
project_path: /tmp/p
questions_answered: []
decisions: []
conflicts_resolved: []
context_snapshots: []
statistics:
  total_conversations: 0
  total_questions: 0
  total_decisions: 0
  total_conflicts: 0
"#,
        );

        let errors = validate_knowledge_base(&doc);
        assert_eq!(errors, vec!["Missing required field: capabilities"]);
    }

    #[test]
    fn test_scalar_nested_object_reports_all_sub_fields() {
        let doc = parse("capabilities: none\nstatistics: 3\n");
        let errors = validate_knowledge_base(&doc);

        // 9 top-level fields missing, plus 4 + 4 sub-fields
        assert_eq!(errors.len(), 17);
    }

    #[test]
    fn test_values_are_not_type_checked() {
        let doc = parse(
            r#"
version: 7
last_updated: null
versioning_preference: anything
created_date: null
project_path: 0
questions_answered: nope
decisions: {}
capabilities:
  last_checked: 1
  tools_available: 2
  extensions_available: 3
  workspace_type: 4
conflicts_resolved: 5
context_snapshots: 6
statistics:
  total_conversations: -1
  total_questions: "many"
  total_decisions: []
  total_conflicts: {}
"#,
        );

        assert!(validate_knowledge_base(&doc).is_empty());
    }
}
