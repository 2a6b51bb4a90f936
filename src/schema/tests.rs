//! Tests for the schema module

use super::*;
use crate::schema::types::{FieldType, SchemaNode};
use pretty_assertions::assert_eq;
use test_case::test_case;

// ============================================================================
// Type Tag Tests
// ============================================================================

#[test_case("STRING", FieldType::String)]
#[test_case("INTEGER", FieldType::Integer)]
#[test_case("BOOLEAN", FieldType::Boolean)]
#[test_case("FLOAT", FieldType::Float)]
#[test_case("string", FieldType::String; "lowercase tag")]
#[test_case("TIMESTAMP", FieldType::Passthrough; "unknown tag passes through")]
fn test_field_type_from_tag(tag: &str, expected: FieldType) {
    assert_eq!(FieldType::from_tag(tag), expected);
}

// ============================================================================
// Parsing Tests
// ============================================================================

#[test]
fn test_parse_flat_schema() {
    let schema = parse_schema(
        r"
fields:
  _id: STRING
  time_stamp: INTEGER
  recommendation: BOOLEAN
",
    )
    .unwrap();

    assert_eq!(schema.len(), 3);
    assert_eq!(
        schema.field("_id").unwrap().node,
        SchemaNode::Scalar(FieldType::String)
    );
    assert_eq!(
        schema.field("time_stamp").unwrap().node,
        SchemaNode::Scalar(FieldType::Integer)
    );
}

#[test]
fn test_parse_preserves_declaration_order() {
    let schema = parse_schema(
        r"
fields:
  zeta: STRING
  alpha: INTEGER
  mid: BOOLEAN
",
    )
    .unwrap();

    let names: Vec<&str> = schema.fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_parse_repeated_record() {
    let schema = parse_schema(
        r"
fields:
  cart_products:
    repeated: true
    fields:
      amount: INTEGER
      price: STRING
",
    )
    .unwrap();

    let field = schema.field("cart_products").unwrap();
    assert!(field.node.is_repeated());
    match &field.node {
        SchemaNode::Record { fields, repeated } => {
            assert!(*repeated);
            assert_eq!(fields.len(), 2);
            assert_eq!(fields[0].name, "amount");
        }
        SchemaNode::Scalar(_) => panic!("expected record node"),
    }
}

#[test]
fn test_parse_non_repeated_record() {
    let schema = parse_schema(
        r"
fields:
  location:
    fields:
      country: STRING
      city: STRING
",
    )
    .unwrap();

    let field = schema.field("location").unwrap();
    assert!(!field.node.is_repeated());
    assert!(!field.node.is_scalar());
}

#[test]
fn test_parse_bare_mapping_without_fields_key() {
    let schema = parse_schema("_id: STRING\nip: STRING\n").unwrap();
    assert_eq!(schema.len(), 2);
}

#[test]
fn test_parse_record_missing_fields_is_error() {
    let err = parse_schema(
        r"
fields:
  broken:
    repeated: true
",
    )
    .unwrap_err();
    assert!(err.to_string().contains("missing 'fields'"));
}

#[test]
fn test_parse_rejects_non_mapping() {
    assert!(parse_schema("- STRING\n- INTEGER\n").is_err());
}

// ============================================================================
// Built-in Summary Schema Tests
// ============================================================================

#[test]
fn test_summary_schema_loads() {
    let schema = summary_schema();

    // 29 scalars + 2 repeated records
    assert_eq!(schema.len(), 31);
    assert_eq!(schema.fields()[0].name, "_id");
    assert_eq!(
        schema.field("api_version").unwrap().node,
        SchemaNode::Scalar(FieldType::String)
    );
    assert!(schema.field("cart_products").unwrap().node.is_repeated());
    assert!(schema.field("option").unwrap().node.is_repeated());
}

#[test]
fn test_summary_schema_depth_is_three() {
    // cart_products -> option -> scalars
    assert_eq!(summary_schema().depth(), 3);
}

#[test]
fn test_summary_schema_nested_option_fields() {
    let schema = summary_schema();
    let SchemaNode::Record { fields, .. } = &schema.field("cart_products").unwrap().node else {
        panic!("cart_products must be a record");
    };
    let option = fields.iter().find(|f| f.name == "option").unwrap();
    assert!(option.node.is_repeated());
    let SchemaNode::Record { fields, .. } = &option.node else {
        panic!("option must be a record");
    };
    assert_eq!(fields.len(), 5);
}
