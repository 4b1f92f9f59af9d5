/* src/cli/schema/src/lib.rs */

mod infer;
mod node;

#[cfg(test)]
mod tests;

pub use infer::{SchemaError, generate_schema, infer, root_schema};
pub use node::{RootSchema, SCHEMA_TITLE, SCHEMA_URI, SchemaNode, SchemaType};
