use super::{IssueSeverity, StructuredIssue};
use crate::FieldPath;

#[test]
fn issues_are_sorted_stably() {
    let mut issues = vec![
        StructuredIssue {
            kind: "schema_error".to_string(),
            severity: IssueSeverity::Warning,
            field_path: FieldPath::root().key("layout"),
            message: "second".to_string(),
            reference: None,
        },
        StructuredIssue::error("schema_error", FieldPath::root(), "first"),
    ];

    StructuredIssue::sort_stable(&mut issues);

    assert_eq!(issues[0].severity, IssueSeverity::Error);
    assert_eq!(issues[1].severity, IssueSeverity::Warning);
}

#[test]
fn display_prefixes_field_path() {
    let issue = StructuredIssue::error(
        "schema_error",
        FieldPath::root().key("components").index(0).key("type"),
        "\"Script\" is not one of the allowed kinds",
    )
    .with_reference("json_schema.validation");

    assert_eq!(
        issue.to_string(),
        "$.components[0].type: \"Script\" is not one of the allowed kinds"
    );
    assert_eq!(issue.reference.as_deref(), Some("json_schema.validation"));
}
