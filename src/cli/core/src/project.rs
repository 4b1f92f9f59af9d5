/* src/cli/core/src/project.rs */

// `jellyspec.json` handling shared by `create` and `zip`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const SPEC_FILE: &str = "jellyspec.json";

/// Only `shortname` is interpreted; every other field round-trips untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JellySpec {
  #[serde(rename = "shortname", default)]
  pub short_name: String,
  #[serde(flatten)]
  pub rest: Map<String, Value>,
}

/// Names used for archives and deploy ids carry no spaces or underscores.
pub fn normalize_short_name(name: &str) -> String {
  name.chars().filter(|c| *c != ' ' && *c != '_').collect()
}

pub fn read_spec(project_dir: &Path) -> Result<JellySpec> {
  let path = project_dir.join(SPEC_FILE);
  let content = std::fs::read_to_string(&path).with_context(|| {
    format!("{SPEC_FILE} not found in {} (did you supply the right folder?)", project_dir.display())
  })?;
  serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn write_spec(project_dir: &Path, spec: &JellySpec) -> Result<()> {
  let path = project_dir.join(SPEC_FILE);
  let json = serde_json::to_string_pretty(spec)?;
  std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))
}

/// Point a freshly copied template at its new function name.
pub fn rename_spec(project_dir: &Path, function_name: &str) -> Result<JellySpec> {
  let mut spec = read_spec(project_dir)?;
  spec.short_name = normalize_short_name(function_name);
  write_spec(project_dir, &spec)?;
  Ok(spec)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn normalize_strips_spaces_and_underscores() {
    assert_eq!(normalize_short_name("my_cool function"), "mycoolfunction");
    assert_eq!(normalize_short_name("plain"), "plain");
  }

  #[test]
  fn rename_keeps_other_fields() {
    let tmp = tempfile::tempdir().unwrap();
    let original = json!({
      "name": "Template",
      "shortname": "template",
      "runtime": "python312",
      "requirements": { "requestType": "POST", "inputType": "JSON" },
      "tags": ["demo"]
    });
    std::fs::write(tmp.path().join(SPEC_FILE), original.to_string()).unwrap();

    let spec = rename_spec(tmp.path(), "hello_world fn").unwrap();
    assert_eq!(spec.short_name, "helloworldfn");

    let written: Value =
      serde_json::from_str(&std::fs::read_to_string(tmp.path().join(SPEC_FILE)).unwrap()).unwrap();
    assert_eq!(written["shortname"], "helloworldfn");
    assert_eq!(written["runtime"], "python312");
    assert_eq!(written["requirements"]["requestType"], "POST");
    assert_eq!(written["tags"], json!(["demo"]));
  }

  #[test]
  fn missing_spec_mentions_folder() {
    let tmp = tempfile::tempdir().unwrap();
    let err = read_spec(tmp.path()).unwrap_err();
    assert!(err.to_string().contains(SPEC_FILE));
  }
}
