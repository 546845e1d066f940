//! Tests for sfnorm-model types.

use sfnorm_model::{Dialect, NormalizeError, Operation};

#[test]
fn operation_parses_camel_case_names() {
    assert_eq!(Operation::from("describeSObjects"), Operation::DescribeSObjects);
    assert_eq!(
        Operation::from("findDuplicatesByIds"),
        Operation::FindDuplicatesByIds
    );
    assert_eq!(Operation::from("delete"), Operation::Delete);
}

#[test]
fn unknown_operation_passes_through() {
    let op = Operation::from("convertLead");
    assert_eq!(op, Operation::Other("convertLead".to_string()));
    assert_eq!(op.to_string(), "convertLead");
    assert!(!op.requires_identifier());
}

#[test]
fn operation_names_are_case_sensitive() {
    assert_eq!(
        Operation::from("Delete"),
        Operation::Other("Delete".to_string())
    );
}

#[test]
fn identifier_requirement_matches_addressing_operations() {
    let required: Vec<_> = [
        "create",
        "update",
        "upsert",
        "delete",
        "retrieve",
        "describeSObjects",
        "findDuplicatesByIds",
        "search",
    ]
    .into_iter()
    .map(Operation::from)
    .filter(Operation::requires_identifier)
    .map(|op| op.to_string())
    .collect();
    assert_eq!(required, ["update", "upsert", "delete", "findDuplicatesByIds"]);
}

#[test]
fn operation_serializes_as_plain_string() {
    let json = serde_json::to_string(&Operation::DescribeSObjects).expect("serialize");
    assert_eq!(json, "\"describeSObjects\"");
    let round: Operation = serde_json::from_str("\"search\"").expect("deserialize");
    assert_eq!(round, Operation::Search);
}

#[test]
fn dialect_serializes_with_wire_names() {
    let json = serde_json::to_string(&Dialect::Bulk2).expect("serialize");
    assert_eq!(json, "\"Bulk 2.0\"");
}

#[test]
fn missing_identifier_message_lists_columns() {
    let err = NormalizeError::MissingIdentifier {
        operation: "delete".to_string(),
        columns: vec!["Name".to_string(), "Industry".to_string()],
    };
    let message = err.to_string();
    assert!(message.contains("delete"));
    assert!(message.contains("Name, Industry"));
}

#[test]
fn coercion_error_names_operation() {
    let err = NormalizeError::coercion("bad shape").for_operation(Operation::Delete);
    assert_eq!(
        err.to_string(),
        "cannot coerce input into a record table: bad shape (operation 'delete')"
    );
    let err = NormalizeError::unsupported_dialect(Dialect::Metadata, "repair")
        .for_operation(Operation::Delete);
    assert!(matches!(err, NormalizeError::UnsupportedDialect { .. }));
}
