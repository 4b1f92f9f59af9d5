/* src/cli/schema/src/node.rs */

use std::collections::BTreeMap;

use serde::Serialize;

pub const SCHEMA_URI: &str = "https://json-schema.org/draft/2020-12/schema";
pub const SCHEMA_TITLE: &str = "Generated schema from jellyfaas";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
  Object,
  Array,
  Integer,
  Number,
  Boolean,
  String,
  Null,
}

/// Shape of one value. Fields are declared in key order so the serialized
/// form is stable: `items`, `properties`, `required`, `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaNode {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub items: Option<Box<SchemaNode>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub properties: Option<BTreeMap<String, SchemaNode>>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub required: Vec<String>,
  #[serde(rename = "type")]
  pub schema_type: SchemaType,
}

impl SchemaNode {
  pub fn typed(schema_type: SchemaType) -> Self {
    Self { items: None, properties: None, required: Vec::new(), schema_type }
  }
}

/// Top-level document. `properties` and `required` serialize as `null`
/// when the example root is not an object or has no keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RootSchema {
  #[serde(rename = "$schema")]
  pub schema_uri: &'static str,
  pub properties: Option<BTreeMap<String, SchemaNode>>,
  pub required: Option<Vec<String>>,
  pub title: &'static str,
  #[serde(rename = "type")]
  pub schema_type: SchemaType,
}
