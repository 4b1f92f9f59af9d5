/* src/cli/core/src/api/types.rs */

// Wire types for the core and auth services. Timestamps stay as the
// server's RFC 3339 strings; they are only ever displayed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
  #[serde(default)]
  pub error_id: String,
  #[serde(default)]
  pub error_message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserRequest<'a> {
  #[serde(rename = "type")]
  pub kind: &'a str,
  pub name: &'a str,
  pub email: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserResponse {
  #[serde(default)]
  pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub created_at: String,
  #[serde(default)]
  pub updated_at: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityList {
  #[serde(default)]
  pub entities: Vec<UserDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
  #[serde(default)]
  pub token: String,
  #[serde(default)]
  pub expiry: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadBuild {
  #[serde(default)]
  pub created_at: String,
  #[serde(default)]
  pub build_id: String,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub function_id: String,
  #[serde(default, rename = "errorDetails")]
  pub error_message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadBuildResponse {
  #[serde(default)]
  pub count: u64,
  #[serde(default)]
  pub bad_builds: Vec<BadBuild>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadBuildCleanResponse {
  #[serde(default)]
  pub build_id: String,
  #[serde(default)]
  pub functions: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryResponse {
  #[serde(default)]
  pub count: u64,
  #[serde(default)]
  pub library_item: Vec<LibraryItem>,
  #[serde(default)]
  pub bad_builds: Vec<BadBuild>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryItem {
  #[serde(default)]
  pub created_at: String,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub owner: String,
  #[serde(default)]
  pub function_id: String,
  #[serde(default)]
  pub versions: u64,
  #[serde(default)]
  pub last_release: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryItemDetails {
  #[serde(default)]
  pub created_at: String,
  #[serde(default)]
  pub updated_at: String,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub function_id: String,
  #[serde(default)]
  pub owner: String,
  #[serde(default)]
  pub owner_description: String,
  #[serde(default)]
  pub version_count: u64,
  #[serde(default)]
  pub versions: Vec<VersionDetails>,
  #[serde(default)]
  pub published: bool,
  #[serde(default)]
  pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDetails {
  #[serde(default)]
  pub version: u64,
  #[serde(default)]
  pub latest: bool,
  #[serde(default)]
  pub release_date: String,
  #[serde(default)]
  pub runtime: String,
  #[serde(default)]
  pub requirements: FunctionRequirement,
  #[serde(default)]
  pub sizes: Vec<VersionSize>,
  #[serde(default, rename = "changeLog")]
  pub change_log_encoded: String,
  #[serde(default, rename = "readmeFile")]
  pub readme_encoded: String,
  #[serde(default)]
  pub entry_point: String,
  #[serde(default)]
  pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSize {
  #[serde(default)]
  pub size: String,
  #[serde(default)]
  pub function_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRequirement {
  #[serde(default)]
  pub request_type: String,
  pub input_type: Option<String>,
  pub output_type: Option<String>,
  #[serde(default)]
  pub query_params: Vec<QueryParam>,
  pub input_json_schema_encoded: Option<String>,
  pub input_json_example: Option<String>,
  pub output_json_schema_encoded: Option<String>,
  pub output_json_example: Option<String>,
  pub input_file_schema: Option<FileSchema>,
  pub output_file_schema: Option<FileSchema>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParam {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub required: bool,
  #[serde(default)]
  pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileSchema {
  #[serde(default)]
  pub extensions: Vec<String>,
  #[serde(default)]
  pub required: bool,
  #[serde(default)]
  pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistsResponse {
  #[serde(default)]
  pub function_name: String,
  #[serde(default)]
  pub exists: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployedFunctionResponse {
  #[serde(default)]
  pub function: String,
  #[serde(default, rename = "function_id")]
  pub function_id: String,
  #[serde(default)]
  pub deployed_details: Vec<DeployedDetails>,
  #[serde(default)]
  pub current_version: u64,
  #[serde(default)]
  pub deploying_version: u64,
  #[serde(default)]
  pub new: bool,
}

impl DeployedFunctionResponse {
  pub fn operation_ids(&self) -> Vec<String> {
    self.deployed_details.iter().map(|d| d.opid.clone()).collect()
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeployedDetails {
  #[serde(default, alias = "Size")]
  pub size: String,
  #[serde(default)]
  pub opid: String,
  #[serde(default, rename = "urlLocation")]
  pub function_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OperationStatus {
  #[serde(default)]
  pub status: String,
}
