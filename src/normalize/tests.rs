//! Tests for the normalize module

use super::*;
use crate::schema::{parse_schema, summary_schema, FieldType};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

// ============================================================================
// Coercion Tests
// ============================================================================

#[test_case(FieldType::String)]
#[test_case(FieldType::Integer)]
#[test_case(FieldType::Boolean)]
#[test_case(FieldType::Float)]
#[test_case(FieldType::Passthrough)]
fn test_coerce_null_is_null_for_every_tag(field_type: FieldType) {
    assert_eq!(coerce(&Value::Null, field_type), Value::Null);
}

#[test]
fn test_coerce_string() {
    assert_eq!(coerce(&json!("abc"), FieldType::String), json!("abc"));
    assert_eq!(coerce(&json!(2), FieldType::String), json!("2"));
    assert_eq!(coerce(&json!(2.5), FieldType::String), json!("2.5"));
    assert_eq!(coerce(&json!(true), FieldType::String), json!("true"));
    // Structured values have no scalar string form
    assert_eq!(coerce(&json!({"a": 1}), FieldType::String), Value::Null);
    assert_eq!(coerce(&json!([1, 2]), FieldType::String), Value::Null);
}

#[test]
fn test_coerce_integer_from_number() {
    assert_eq!(coerce(&json!(42), FieldType::Integer), json!(42));
    assert_eq!(coerce(&json!(2.7), FieldType::Integer), json!(2));
    assert_eq!(coerce(&json!(-2.7), FieldType::Integer), json!(-2));
}

#[test]
fn test_coerce_integer_from_text_returns_null_not_error() {
    assert_eq!(coerce(&json!("42"), FieldType::Integer), json!(42));
    assert_eq!(coerce(&json!(" 7 "), FieldType::Integer), json!(7));
    // Non-numeric and fractional text both fail to null
    assert_eq!(coerce(&json!("abc"), FieldType::Integer), Value::Null);
    assert_eq!(coerce(&json!("2.7"), FieldType::Integer), Value::Null);
    assert_eq!(coerce(&json!(""), FieldType::Integer), Value::Null);
}

#[test]
fn test_coerce_integer_from_bool() {
    assert_eq!(coerce(&json!(true), FieldType::Integer), json!(1));
    assert_eq!(coerce(&json!(false), FieldType::Integer), json!(0));
}

#[test]
fn test_coerce_boolean() {
    assert_eq!(coerce(&json!(true), FieldType::Boolean), json!(true));
    assert_eq!(coerce(&json!(0), FieldType::Boolean), json!(false));
    assert_eq!(coerce(&json!(3), FieldType::Boolean), json!(true));
    assert_eq!(coerce(&json!("true"), FieldType::Boolean), json!(true));
    assert_eq!(coerce(&json!("False"), FieldType::Boolean), json!(false));
    assert_eq!(coerce(&json!("yes"), FieldType::Boolean), Value::Null);
    assert_eq!(coerce(&json!([]), FieldType::Boolean), Value::Null);
}

#[test]
fn test_coerce_float() {
    assert_eq!(coerce(&json!(2.5), FieldType::Float), json!(2.5));
    assert_eq!(coerce(&json!(3), FieldType::Float), json!(3.0));
    assert_eq!(coerce(&json!("2.5"), FieldType::Float), json!(2.5));
    assert_eq!(coerce(&json!("abc"), FieldType::Float), Value::Null);
}

#[test]
fn test_coerce_passthrough_is_unchanged() {
    let v = json!({"nested": [1, "two"]});
    assert_eq!(coerce(&v, FieldType::Passthrough), v);
}

#[test]
fn test_object_id_as_string() {
    assert_eq!(
        object_id_as_string(&json!({"$oid": "64b8f0a2c9e77a0001a1b2c3"})),
        Some("64b8f0a2c9e77a0001a1b2c3".to_string())
    );
    assert_eq!(object_id_as_string(&json!("plain")), None);
    assert_eq!(object_id_as_string(&json!({"$oid": "x", "extra": 1})), None);
    assert_eq!(object_id_as_string(&json!({"other": "x"})), None);
}

// ============================================================================
// Override Table Tests
// ============================================================================

#[test]
fn test_default_overrides_pin_api_version() {
    let overrides = FieldOverrides::default();
    assert!(overrides.is_forced_string("api_version"));
    assert!(!overrides.is_forced_string("time_stamp"));
}

#[test]
fn test_api_version_always_string() {
    let normalizer = Normalizer::new(summary_schema());

    // Numeric source value
    let out = normalizer.normalize(&json!({"api_version": 2}));
    assert_eq!(out["api_version"], json!("2"));

    // Identifier source value
    let out = normalizer.normalize(&json!({"api_version": {"$oid": "abc123"}}));
    assert_eq!(out["api_version"], json!("abc123"));

    // Already a string
    let out = normalizer.normalize(&json!({"api_version": "3"}));
    assert_eq!(out["api_version"], json!("3"));
}

#[test]
fn test_custom_override_forces_string_over_declared_type() {
    let schema = parse_schema("fields:\n  count: INTEGER\n").unwrap();
    let normalizer = Normalizer::new(schema)
        .with_overrides(FieldOverrides::none().force_string("count"));

    let out = normalizer.normalize(&json!({"count": 7}));
    assert_eq!(out["count"], json!("7"));
}

// ============================================================================
// Normalizer Structure Tests
// ============================================================================

fn cart_schema() -> crate::schema::Schema {
    parse_schema(
        r"
fields:
  _id: STRING
  total: INTEGER
  cart_products:
    repeated: true
    fields:
      amount: INTEGER
      price: STRING
  location:
    fields:
      country: STRING
      city: STRING
",
    )
    .unwrap()
}

#[test]
fn test_missing_scalar_becomes_null() {
    let out = Normalizer::new(cart_schema()).normalize(&json!({"_id": "a"}));
    assert_eq!(out["total"], Value::Null);
}

#[test]
fn test_object_id_scalar_becomes_string() {
    let out = Normalizer::new(cart_schema())
        .normalize(&json!({"_id": {"$oid": "64b8f0a2c9e77a0001a1b2c3"}}));
    assert_eq!(out["_id"], json!("64b8f0a2c9e77a0001a1b2c3"));
}

#[test]
fn test_absent_repeated_field_is_empty_array_never_null() {
    let out = Normalizer::new(cart_schema()).normalize(&json!({"_id": "a"}));
    assert_eq!(out["cart_products"], json!([]));
}

#[test]
fn test_null_repeated_field_is_empty_array() {
    let out = Normalizer::new(cart_schema()).normalize(&json!({"cart_products": null}));
    assert_eq!(out["cart_products"], json!([]));
}

#[test]
fn test_single_object_wraps_into_sequence() {
    let out = Normalizer::new(cart_schema())
        .normalize(&json!({"cart_products": {"amount": 1, "price": "9.99"}}));
    assert_eq!(out["cart_products"], json!([{"amount": 1, "price": "9.99"}]));
}

#[test]
fn test_non_object_repeated_elements_are_skipped() {
    let out = Normalizer::new(cart_schema()).normalize(&json!({
        "cart_products": [{"amount": 1}, "garbage", 42, {"amount": 2}]
    }));
    let products = out["cart_products"].as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["amount"], json!(1));
    assert_eq!(products[1]["amount"], json!(2));
}

#[test]
fn test_warn_policy_still_drops_elements() {
    let normalizer = Normalizer::new(cart_schema())
        .with_unknown_element_policy(crate::types::UnknownElementPolicy::Warn);
    let out = normalizer.normalize(&json!({"cart_products": ["garbage"]}));
    assert_eq!(out["cart_products"], json!([]));
}

#[test]
fn test_non_object_record_collapses_to_null() {
    let normalizer = Normalizer::new(cart_schema());

    // Scalar where a record was declared
    let out = normalizer.normalize(&json!({"location": "hamburg"}));
    assert_eq!(out["location"], Value::Null);

    // Absent record
    let out = normalizer.normalize(&json!({}));
    assert_eq!(out["location"], Value::Null);
}

#[test]
fn test_present_record_recurses() {
    let out = Normalizer::new(cart_schema())
        .normalize(&json!({"location": {"country": "DE", "ignored": 1}}));
    assert_eq!(out["location"], json!({"country": "DE", "city": null}));
}

#[test]
fn test_unknown_source_fields_dropped() {
    let out = Normalizer::new(cart_schema()).normalize(&json!({
        "_id": "a",
        "not_in_schema": 123
    }));
    assert!(out.get("not_in_schema").is_none());
}

#[test]
fn test_every_schema_field_present_in_output() {
    let out = Normalizer::new(cart_schema()).normalize(&json!({}));
    let obj = out.as_object().unwrap();
    assert_eq!(obj.len(), 4);
    for name in ["_id", "total", "cart_products", "location"] {
        assert!(obj.contains_key(name), "missing field {name}");
    }
}

#[test]
fn test_output_follows_schema_order() {
    let out = Normalizer::new(cart_schema()).normalize(&json!({
        "location": {"country": "DE"},
        "_id": "a"
    }));
    let names: Vec<&String> = out.as_object().unwrap().keys().collect();
    assert_eq!(names, vec!["_id", "total", "cart_products", "location"]);
}

#[test]
fn test_non_object_document_yields_schema_shape() {
    let out = Normalizer::new(cart_schema()).normalize(&json!("not a document"));
    assert_eq!(out["_id"], Value::Null);
    assert_eq!(out["cart_products"], json!([]));
    assert_eq!(out["location"], Value::Null);
}

#[test]
fn test_normalize_is_deterministic() {
    let normalizer = Normalizer::new(summary_schema());
    let doc = json!({
        "_id": {"$oid": "64b8f0a2c9e77a0001a1b2c3"},
        "api_version": 2,
        "time_stamp": "1700000000",
        "cart_products": [{"amount": "3", "option": [{"option_id": 7}]}],
        "stray": true
    });

    let first = serde_json::to_string(&normalizer.normalize(&doc)).unwrap();
    let second = serde_json::to_string(&normalizer.normalize(&doc)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_nested_repeated_recursion() {
    let normalizer = Normalizer::new(summary_schema());
    let out = normalizer.normalize(&json!({
        "cart_products": [{
            "amount": 2,
            "product_id": "991",
            "option": [{"option_id": "12", "value_label": "gold"}, "junk"]
        }]
    }));

    let product = &out["cart_products"][0];
    assert_eq!(product["amount"], json!(2));
    assert_eq!(product["product_id"], json!(991));
    let options = product["option"].as_array().unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0]["option_id"], json!(12));
    assert_eq!(options[0]["value_label"], json!("gold"));
    assert_eq!(options[0]["raw"], Value::Null);
}

#[test]
fn test_corrupt_document_never_aborts() {
    let normalizer = Normalizer::new(summary_schema());
    // Every field the wrong shape
    let out = normalizer.normalize(&json!({
        "_id": [1, 2, 3],
        "time_stamp": {"nested": true},
        "recommendation": "maybe",
        "cart_products": "not an array",
        "option": 7
    }));

    assert_eq!(out["_id"], Value::Null);
    assert_eq!(out["time_stamp"], Value::Null);
    assert_eq!(out["recommendation"], Value::Null);
    // Bare non-object values wrap then get skipped
    assert_eq!(out["cart_products"], json!([]));
    assert_eq!(out["option"], json!([]));
}
