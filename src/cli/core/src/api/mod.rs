/* src/cli/core/src/api/mod.rs */

mod types;


use std::path::Path;

use anyhow::{Context, Result, bail};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::ServiceSection;
use crate::credentials::Credentials;
use crate::deploy::poll::{StatusError, StatusSource};

pub use types::*;

pub const API_KEY_HEADER: &str = "x-jf-apikey";

/// Authenticated client for the core and auth services.
pub struct ApiClient {
  http: reqwest::Client,
  core: String,
  auth: String,
  api_key: String,
}

impl ApiClient {
  pub fn new(service: &ServiceSection, creds: &Credentials) -> Result<Self> {
    let http = reqwest::Client::builder()
      .user_agent(concat!("jellyfaas-cli/", env!("CARGO_PKG_VERSION")))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self {
      http,
      core: service.core.trim_end_matches('/').to_string(),
      auth: service.auth.trim_end_matches('/').to_string(),
      api_key: creds.api_key.clone(),
    })
  }

  fn core_url(&self, path: &str) -> String {
    format!("{}{path}", self.core)
  }

  /// Base for operation status URLs: `{base}/{operation_id}/{function_id}`.
  pub fn upload_status_base(&self) -> String {
    self.core_url("/upload")
  }

  fn request(&self, method: Method, url: &str) -> RequestBuilder {
    self.http.request(method, url).header(API_KEY_HEADER, &self.api_key)
  }

  async fn send(&self, builder: RequestBuilder, what: &str) -> Result<Response> {
    let req = builder.build().with_context(|| format!("failed to build {what} request"))?;
    let (method, url) = (req.method().clone(), req.url().to_string());
    let resp = self
      .http
      .execute(req)
      .await
      .with_context(|| format!("failed to call the {what} service at {url}"))?;
    tracing::debug!(%method, %url, status = %resp.status(), "{what}");
    ensure_success(resp, what).await
  }

  async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder, what: &str) -> Result<T> {
    let resp = self.send(builder, what).await?;
    resp.json().await.with_context(|| format!("failed to parse {what} response"))
  }

  pub async fn validate_token(&self) -> Result<TokenResponse> {
    let url = format!("{}/validate", self.auth);
    self.send_json(self.request(Method::GET, &url), "token").await
  }

  pub async fn create_user(&self, name: &str, email: &str) -> Result<UserResponse> {
    let body = UserRequest { kind: "user", name, email };
    let builder = self.request(Method::POST, &self.core_url("/entity")).json(&body);
    self.send_json(builder, "create user").await
  }

  pub async fn list_users(&self) -> Result<EntityList> {
    self.send_json(self.request(Method::GET, &self.core_url("/entity")), "list users").await
  }

  pub async fn library(&self) -> Result<LibraryResponse> {
    self.send_json(self.request(Method::GET, &self.core_url("/library")), "library").await
  }

  pub async fn library_item(&self, function_id: &str) -> Result<LibraryItemDetails> {
    let url = self.core_url(&format!("/library/{function_id}"));
    self
      .send_json(self.request(Method::GET, &url), "library item")
      .await
      .with_context(|| format!("cannot find library item \"{function_id}\", is the id correct?"))
  }

  pub async fn set_published(&self, function_id: &str, published: bool) -> Result<LibraryItemDetails> {
    let action = if published { "publish" } else { "withdraw" };
    let url = self.core_url(&format!("/library/{action}/{function_id}"));
    self.send_json(self.request(Method::PUT, &url), action).await
  }

  pub async fn bad_builds(&self) -> Result<BadBuildResponse> {
    self.send_json(self.request(Method::GET, &self.core_url("/badbuilds")), "bad builds").await
  }

  pub async fn clean_bad_build(&self, build_id: &str) -> Result<BadBuildCleanResponse> {
    let url = with_query(&self.core_url("/badbuilds"), "id", build_id)?;
    self.send_json(self.request(Method::DELETE, &url), "clean bad build").await
  }

  pub async fn exists(&self, name: &str) -> Result<ExistsResponse> {
    let url = with_query(&self.core_url("/exists"), "name", name)?;
    self.send_json(self.request(Method::GET, &url), "exists").await
  }

  /// Upload a packaged function archive as multipart field `file`.
  pub async fn upload(&self, archive: &Path) -> Result<DeployedFunctionResponse> {
    let bytes = tokio::fs::read(archive)
      .await
      .with_context(|| format!("failed to read {}", archive.display()))?;
    let file_name = archive
      .file_name()
      .and_then(|n| n.to_str())
      .with_context(|| format!("invalid archive name {}", archive.display()))?
      .to_string();
    let part = reqwest::multipart::Part::bytes(bytes)
      .file_name(file_name)
      .mime_str("application/zip")
      .context("invalid archive mime type")?;
    let form = reqwest::multipart::Form::new().part("file", part);
    let builder = self.request(Method::POST, &self.core_url("/upload")).multipart(form);
    self.send_json(builder, "upload").await
  }
}

impl StatusSource for ApiClient {
  async fn fetch_status(&self, url: &str) -> Result<String, StatusError> {
    let resp = self
      .request(Method::GET, url)
      .send()
      .await
      .map_err(|e| StatusError::Transport(e.to_string()))?;
    let status = resp.status();
    tracing::debug!(%url, %status, "operation status");
    if !status.is_success() {
      return Err(StatusError::Http(status.as_u16()));
    }
    let body: OperationStatus =
      resp.json().await.map_err(|e| StatusError::Transport(e.to_string()))?;
    Ok(body.status)
  }
}

fn with_query(base: &str, key: &str, value: &str) -> Result<String> {
  let url = reqwest::Url::parse_with_params(base, &[(key, value)])
    .with_context(|| format!("invalid service URL {base}"))?;
  Ok(url.into())
}

/// Turn a non-2xx response into an error carrying the service's support id, when present.
async fn ensure_success(resp: Response, what: &str) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let body = resp.text().await.unwrap_or_default();
  match serde_json::from_str::<ErrorDetails>(&body) {
    Ok(details) if !details.error_id.is_empty() || !details.error_message.is_empty() => {
      bail!(
        "{what} failed: HTTP {status}\nsupport id: {}\nerror: {}",
        details.error_id,
        details.error_message
      )
    }
    _ => bail!("{what} failed: HTTP {status}"),
  }
}
