/* src/cli/core/src/library.rs */

// Rendering for `library`, `builds` and `user list` responses.

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;

use crate::api::{BadBuild, FileSchema, LibraryItem, LibraryItemDetails, UserDetails, VersionDetails};
use crate::codec;
use crate::config::ServiceSection;
use crate::ui::{self, BOLD, DIM, RED, RESET, YELLOW};

/// Date part of an RFC 3339 timestamp.
fn short_date(ts: &str) -> &str {
  ts.get(..10).unwrap_or(ts)
}

pub fn library_table(items: &[LibraryItem]) -> Table {
  let mut table = Table::new();
  table.load_preset(UTF8_FULL);
  table.set_header(vec!["Name", "Id", "Owner", "Versions", "Created", "Latest Change", "Description"]);
  for item in items {
    table.add_row(vec![
      item.name.clone(),
      item.function_id.clone(),
      item.owner.clone(),
      item.versions.to_string(),
      short_date(&item.created_at).to_string(),
      short_date(&item.last_release).to_string(),
      item.description.clone(),
    ]);
  }
  table
}

pub fn users_table(users: &[UserDetails]) -> Table {
  let mut table = Table::new();
  table.load_preset(UTF8_FULL);
  table.set_header(vec!["Name", "Email", "Created", "Updated"]);
  for user in users {
    table.add_row(vec![&user.name, &user.email, &user.created_at, &user.updated_at]);
  }
  table
}

pub fn render_bad_builds(builds: &[BadBuild]) -> String {
  let mut out = String::new();
  for build in builds {
    push_field(&mut out, 2, "Build Id", &build.build_id);
    push_field(&mut out, 2, "Created At", &build.created_at);
    push_field(&mut out, 2, "Name", &build.name);
    push_field(&mut out, 2, "Function ID", &build.function_id);
    push_field(&mut out, 2, "Error Message", format!("{BOLD}{YELLOW}{}{RESET}", build.error_message));
    out.push('\n');
  }
  out
}

/// Rendered details page plus the latest version's decoded README, if any.
pub struct DetailsView {
  pub text: String,
  pub readme: Option<String>,
}

pub fn render_details(item: &LibraryItemDetails, service: &ServiceSection) -> DetailsView {
  let mut out = String::new();
  let mut readme = None;

  push_field(&mut out, 0, "Function Name", &item.name);
  push_field(&mut out, 0, "Function ID", &item.function_id);
  push_field(&mut out, 0, "Owner", &item.owner);
  push_field(&mut out, 0, "Owner Description", &item.owner_description);
  push_field(&mut out, 0, "Published", item.published);
  if !item.tags.is_empty() {
    push_field(&mut out, 0, "Tags", item.tags.join(", "));
  }
  push_field(&mut out, 0, "Version Count", item.version_count);
  push_field(&mut out, 0, "Created At", &item.created_at);
  push_field(&mut out, 0, "Updated At", &item.updated_at);
  out.push_str(&ui::field("Versions", ""));
  out.push('\n');

  for version in &item.versions {
    render_version(&mut out, item, version, service);
    if version.latest {
      readme = decode_text(&version.readme_encoded);
      render_latest(&mut out, version);
    }
    out.push('\n');
  }

  DetailsView { text: out, readme }
}

fn render_version(out: &mut String, item: &LibraryItemDetails, version: &VersionDetails, service: &ServiceSection) {
  push_field(out, 2, "Version", version.version);
  push_field(out, 2, "Latest", version.latest);
  push_field(out, 2, "Description", &version.description);
  push_field(out, 2, "Entry Point", &version.entry_point);
  push_field(out, 2, "Release Date", &version.release_date);
  push_field(out, 2, "Runtime", &version.runtime);
  for size in &version.sizes {
    out.push_str(&format!("    {DIM}[{}]{RESET}\n", size.size));
    push_field(out, 6, "Function ID", &size.function_id);
    push_field(out, 6, "Function URL", format!("{}{}", service.web_ui, item.function_id));
    push_field(out, 6, "URL", format!("{}{}/{}", service.endpoint, size.function_id, item.function_id));
  }
}

fn render_latest(out: &mut String, version: &VersionDetails) {
  let found = |encoded: &str| if encoded.is_empty() { "Not found" } else { "Found" };
  push_field(out, 2, "Readme File", found(&version.readme_encoded));
  push_field(out, 2, "ChangeLog File", found(&version.change_log_encoded));

  let req = &version.requirements;
  out.push('\n');
  push_field(out, 2, "Requirements", "");
  push_field(out, 4, "Request Type", &req.request_type);
  if let Some(input_type) = &req.input_type {
    push_field(out, 4, "Input Type", input_type);
  }
  if let Some(output_type) = &req.output_type {
    push_field(out, 4, "Output Type", output_type);
  }
  for param in &req.query_params {
    let mut line = format!("{}, Required: {}", param.name, param.required);
    if !param.description.is_empty() {
      line.push_str(&format!(" {DIM}({}){RESET}", param.description));
    }
    push_field(out, 4, "Query Param", line);
  }

  push_encoded(out, "Input Schema", req.input_json_schema_encoded.as_deref());
  push_encoded(out, "Input JSON Example", req.input_json_example.as_deref());
  if let Some(schema) = &req.input_file_schema {
    push_file_schema(out, "Input", schema);
  }
  push_encoded(out, "Output Schema", req.output_json_schema_encoded.as_deref());
  push_encoded(out, "Output JSON Example", req.output_json_example.as_deref());
  if let Some(schema) = &req.output_file_schema {
    push_file_schema(out, "Output", schema);
  }
}

fn push_file_schema(out: &mut String, direction: &str, schema: &FileSchema) {
  push_field(out, 4, &format!("{direction} File Description"), &schema.description);
  push_field(out, 4, &format!("{direction} File Required"), schema.required);
  push_field(out, 4, &format!("{direction} File Extensions"), schema.extensions.join(", "));
}

/// Base64 payloads from the service; an undecodable one is shown as an error line.
fn push_encoded(out: &mut String, label: &str, encoded: Option<&str>) {
  let Some(encoded) = encoded.filter(|e| !e.is_empty()) else {
    return;
  };
  match decode_text(encoded) {
    Some(text) => push_field(out, 4, label, text),
    None => out.push_str(&format!("    {RED}{label}: could not be decoded, please contact support{RESET}\n")),
  }
}

fn decode_text(encoded: &str) -> Option<String> {
  if encoded.is_empty() {
    return None;
  }
  codec::decode(encoded).ok()
}

fn push_field(out: &mut String, indent: usize, label: &str, value: impl std::fmt::Display) {
  out.push_str(&" ".repeat(indent));
  out.push_str(&ui::field(label, value));
  out.push('\n');
}
