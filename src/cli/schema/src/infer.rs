/* src/cli/schema/src/infer.rs */

use std::collections::BTreeMap;

use serde_json::Value;

use crate::node::{RootSchema, SCHEMA_TITLE, SCHEMA_URI, SchemaNode, SchemaType};

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
  #[error("invalid JSON: {0}")]
  Parse(#[source] serde_json::Error),
  #[error("invalid JSON: no value found in input")]
  Empty,
  #[error("failed to serialize schema: {0}")]
  Serialize(#[source] serde_json::Error),
}

/// Map a decoded value to its JSON-Schema type name.
/// Numbers whose literal text parses as an i64 are integers, everything else is
/// a number. Numbers keep their source text (`arbitrary_precision`), so `-0`
/// is an integer and `1e400` is a number rather than a range error.
fn schema_type_of(value: &Value) -> SchemaType {
  match value {
    Value::Null => SchemaType::Null,
    Value::Bool(_) => SchemaType::Boolean,
    Value::Number(n) if n.as_str().parse::<i64>().is_ok() => SchemaType::Integer,
    Value::Number(_) => SchemaType::Number,
    Value::String(_) => SchemaType::String,
    Value::Array(_) => SchemaType::Array,
    Value::Object(_) => SchemaType::Object,
  }
}

/// Infer the schema of `value`, returning the node and the keys it requires.
///
/// Every key of an object is required. Arrays take their `items` schema from
/// the first element only; empty arrays carry no `items`.
pub fn infer(value: &Value) -> (SchemaNode, Vec<String>) {
  let mut node = SchemaNode::typed(schema_type_of(value));
  let mut required = Vec::new();

  match value {
    Value::Object(map) => {
      let mut properties = BTreeMap::new();
      for (key, child) in map {
        let (child_node, _) = infer(child);
        properties.insert(key.clone(), child_node);
        required.push(key.clone());
      }
      // serde_json may be built with preserve_order elsewhere in the graph
      required.sort();
      node.properties = Some(properties);
      node.required.clone_from(&required);
    }
    Value::Array(items) => {
      if let Some(first) = items.first() {
        let (item_node, _) = infer(first);
        node.items = Some(Box::new(item_node));
      }
    }
    _ => {}
  }

  (node, required)
}

/// Wrap the inferred schema of `value` in the root document.
/// The root type is always `object`, whatever the example's own type is.
pub fn root_schema(value: &Value) -> RootSchema {
  let (node, required) = infer(value);
  RootSchema {
    schema_uri: SCHEMA_URI,
    properties: node.properties,
    required: if required.is_empty() { None } else { Some(required) },
    title: SCHEMA_TITLE,
    schema_type: SchemaType::Object,
  }
}

/// Parse `json_text` and render its schema, compact when `flat` is set,
/// otherwise indented by two spaces.
///
/// Only the first JSON value in the text is read; anything after it is ignored.
/// Nesting deeper than serde_json's recursion limit (128 levels) is a parse error.
pub fn generate_schema(json_text: &str, flat: bool) -> Result<String, SchemaError> {
  let value = serde_json::Deserializer::from_str(json_text)
    .into_iter::<Value>()
    .next()
    .ok_or(SchemaError::Empty)?
    .map_err(SchemaError::Parse)?;

  let root = root_schema(&value);
  let out =
    if flat { serde_json::to_string(&root) } else { serde_json::to_string_pretty(&root) };
  out.map_err(SchemaError::Serialize)
}
