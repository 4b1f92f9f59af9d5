/* src/cli/schema/src/tests.rs */

use serde_json::{Value, json};

use super::*;

fn schema_of(input: &str) -> Value {
  let text = generate_schema(input, true).unwrap();
  serde_json::from_str(&text).unwrap()
}

#[test]
fn integer_property() {
  let schema = schema_of(r#"{"a": 5}"#);
  assert_eq!(schema["properties"]["a"], json!({ "type": "integer" }));
}

#[test]
fn fractional_number_property() {
  let schema = schema_of(r#"{"a": 5.5}"#);
  assert_eq!(schema["properties"]["a"], json!({ "type": "number" }));
}

#[test]
fn float_with_zero_fraction_stays_number() {
  let schema = schema_of(r#"{"a": 5.0, "b": 1e3, "c": -7}"#);
  assert_eq!(schema["properties"]["a"]["type"], "number");
  assert_eq!(schema["properties"]["b"]["type"], "number");
  assert_eq!(schema["properties"]["c"]["type"], "integer");
}

#[test]
fn integer_beyond_i64_is_number() {
  let schema = schema_of(r#"{"big": 18446744073709551615}"#);
  assert_eq!(schema["properties"]["big"]["type"], "number");
}

#[test]
fn scalar_types() {
  let schema = schema_of(r#"{"s": "x", "b": true, "n": null}"#);
  assert_eq!(schema["properties"]["s"], json!({ "type": "string" }));
  assert_eq!(schema["properties"]["b"], json!({ "type": "boolean" }));
  assert_eq!(schema["properties"]["n"], json!({ "type": "null" }));
}

#[test]
fn empty_array_has_no_items() {
  let schema = schema_of(r#"{"a": []}"#);
  assert_eq!(schema["properties"]["a"], json!({ "type": "array" }));
}

#[test]
fn array_items_come_from_first_element() {
  let schema = schema_of(r#"{"a": [1, "x"]}"#);
  assert_eq!(schema["properties"]["a"], json!({ "type": "array", "items": { "type": "integer" } }));
}

#[test]
fn array_of_objects() {
  let schema = schema_of(r#"{"users": [{"id": 1, "name": "a"}, {"other": true}]}"#);
  assert_eq!(
    schema["properties"]["users"],
    json!({
      "type": "array",
      "items": {
        "type": "object",
        "properties": { "id": { "type": "integer" }, "name": { "type": "string" } },
        "required": ["id", "name"]
      }
    })
  );
}

#[test]
fn nested_object() {
  let schema = schema_of(r#"{"a": {"b": 1}}"#);
  assert_eq!(
    schema["properties"]["a"],
    json!({ "type": "object", "properties": { "b": { "type": "integer" } }, "required": ["b"] })
  );
}

#[test]
fn empty_nested_object_omits_required() {
  let schema = schema_of(r#"{"a": {}}"#);
  assert_eq!(schema["properties"]["a"], json!({ "type": "object", "properties": {} }));
}

#[test]
fn root_metadata_and_required() {
  let schema = schema_of(r#"{"zeta": 1, "alpha": "x"}"#);
  assert_eq!(schema["$schema"], SCHEMA_URI);
  assert_eq!(schema["title"], SCHEMA_TITLE);
  assert_eq!(schema["type"], "object");
  assert_eq!(schema["required"], json!(["alpha", "zeta"]));
}

#[test]
fn every_object_node_lists_its_properties() {
  fn check(node: &Value) {
    assert!(node.get("type").is_some());
    if node["type"] == "object" {
      let props = node["properties"].as_object().unwrap();
      if let Some(required) = node.get("required") {
        let keys: Vec<&str> = props.keys().map(String::as_str).collect();
        let required: Vec<&str> = required.as_array().unwrap().iter().filter_map(Value::as_str).collect();
        assert_eq!(keys, required);
      }
      for child in props.values() {
        check(child);
      }
    }
    if let Some(items) = node.get("items") {
      check(items);
    }
  }

  let schema = schema_of(r#"{"a": {"b": [{"c": 1.5, "d": [[true]]}], "e": null}, "f": "g"}"#);
  for child in schema["properties"].as_object().unwrap().values() {
    check(child);
  }
}

#[test]
fn root_array_is_still_object_typed() {
  let schema = schema_of("[1, 2, 3]");
  assert_eq!(schema["type"], "object");
  assert_eq!(schema["properties"], Value::Null);
  assert_eq!(schema["required"], Value::Null);
}

#[test]
fn root_scalar_is_still_object_typed() {
  let schema = schema_of(r#""just a string""#);
  assert_eq!(schema["type"], "object");
  assert_eq!(schema["properties"], Value::Null);
}

#[test]
fn empty_root_object() {
  let schema = schema_of("{}");
  assert_eq!(schema["properties"], json!({}));
  assert_eq!(schema["required"], Value::Null);
}

#[test]
fn output_is_deterministic() {
  let input = r#"{"c": 1, "a": {"z": [1], "y": false}, "b": "s"}"#;
  let first = generate_schema(input, false).unwrap();
  let second = generate_schema(input, false).unwrap();
  assert_eq!(first, second);
}

#[test]
fn flat_output_is_single_line_with_sorted_keys() {
  let text = generate_schema(r#"{"a": 1}"#, true).unwrap();
  assert_eq!(
    text,
    r#"{"$schema":"https://json-schema.org/draft/2020-12/schema","properties":{"a":{"type":"integer"}},"required":["a"],"title":"Generated schema from jellyfaas","type":"object"}"#
  );
}

#[test]
fn indented_output_uses_two_spaces() {
  let text = generate_schema(r#"{"a": true}"#, false).unwrap();
  let expected = r#"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "properties": {
    "a": {
      "type": "boolean"
    }
  },
  "required": [
    "a"
  ],
  "title": "Generated schema from jellyfaas",
  "type": "object"
}"#;
  assert_eq!(text, expected);
}

#[test]
fn trailing_text_after_first_value_is_ignored() {
  let schema = schema_of(r#"{"a": 1} {"b": 2}"#);
  assert_eq!(schema["required"], json!(["a"]));
}

#[test]
fn invalid_json_is_a_parse_error() {
  let err = generate_schema(r#"{"a": "#, true).unwrap_err();
  assert!(matches!(err, SchemaError::Parse(_)));
}

#[test]
fn empty_input_is_rejected() {
  let err = generate_schema("   ", false).unwrap_err();
  assert!(matches!(err, SchemaError::Empty));
}

#[test]
fn infer_returns_required_keys() {
  let (node, required) = infer(&json!({ "b": 1, "a": 2 }));
  assert_eq!(required, vec!["a".to_string(), "b".to_string()]);
  assert_eq!(node.required, required);
  assert_eq!(node.schema_type, SchemaType::Object);
}

#[test]
fn negative_zero_is_integer() {
  let schema = schema_of(r#"{"z": -0}"#);
  assert_eq!(schema["properties"]["z"]["type"], "integer");
}

#[test]
fn huge_exponent_is_number() {
  let schema = schema_of(r#"{"big": 1e400}"#);
  assert_eq!(schema["properties"]["big"]["type"], "number");
}

fn nested_arrays(depth: usize) -> String {
  format!(r#"{{"a": {}1{}}}"#, "[".repeat(depth), "]".repeat(depth))
}

#[test]
fn deep_nesting_within_recursion_limit() {
  let schema = schema_of(&nested_arrays(60));
  assert_eq!(schema["properties"]["a"]["type"], "array");
}

#[test]
fn nesting_past_recursion_limit_is_a_parse_error() {
  let err = generate_schema(&nested_arrays(200), true).unwrap_err();
  assert!(matches!(err, SchemaError::Parse(_)));
}
