/* src/cli/core/src/config/types.rs */

use std::time::Duration;

use anyhow::{Result, bail};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CliConfig {
  #[serde(default)]
  pub service: ServiceSection,
  #[serde(default)]
  pub templates: TemplatesSection,
  #[serde(default)]
  pub deploy: DeploySection,
  #[serde(default)]
  pub package: PackageSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSection {
  #[serde(default = "default_core")]
  pub core: String,
  #[serde(default = "default_auth")]
  pub auth: String,
  #[serde(default = "default_web_ui")]
  pub web_ui: String,
  #[serde(default = "default_endpoint")]
  pub endpoint: String,
}

impl Default for ServiceSection {
  fn default() -> Self {
    Self {
      core: default_core(),
      auth: default_auth(),
      web_ui: default_web_ui(),
      endpoint: default_endpoint(),
    }
  }
}

impl ServiceSection {
  pub fn is_development(&self) -> bool {
    self.core.contains("localhost")
  }
}

fn default_core() -> String {
  "https://api.jellyfaas.com/core-service/v1".to_string()
}

fn default_auth() -> String {
  "https://api.jellyfaas.com/auth-service/v1".to_string()
}

fn default_web_ui() -> String {
  "https://app.jellyfaas.com/function/".to_string()
}

fn default_endpoint() -> String {
  "https://api.jellyfaas.com/".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesSection {
  #[serde(default = "default_templates_repo")]
  pub repo: String,
}

impl Default for TemplatesSection {
  fn default() -> Self {
    Self { repo: default_templates_repo() }
  }
}

fn default_templates_repo() -> String {
  "https://github.com/Platform48/jellyfaas_public_templates.git".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeploySection {
  #[serde(default = "default_max_rounds")]
  pub max_rounds: u32,
  #[serde(default = "default_poll_interval_secs")]
  pub poll_interval_secs: u64,
}

impl Default for DeploySection {
  fn default() -> Self {
    Self { max_rounds: default_max_rounds(), poll_interval_secs: default_poll_interval_secs() }
  }
}

impl DeploySection {
  pub fn poll_interval(&self) -> Duration {
    Duration::from_secs(self.poll_interval_secs)
  }
}

fn default_max_rounds() -> u32 {
  10
}

fn default_poll_interval_secs() -> u64 {
  30
}

#[derive(Debug, Clone, Deserialize)]
pub struct PackageSection {
  #[serde(default = "default_exclude")]
  pub exclude: Vec<String>,
}

impl Default for PackageSection {
  fn default() -> Self {
    Self { exclude: default_exclude() }
  }
}

fn default_exclude() -> Vec<String> {
  [".git", ".idea", "vendor", "node_modules", ".temp-repo"].map(String::from).to_vec()
}

impl CliConfig {
  pub fn validate(&self) -> Result<()> {
    for (name, url) in [
      ("service.core", &self.service.core),
      ("service.auth", &self.service.auth),
      ("service.web_ui", &self.service.web_ui),
      ("service.endpoint", &self.service.endpoint),
      ("templates.repo", &self.templates.repo),
    ] {
      if url.trim().is_empty() {
        bail!("{name} must not be empty");
      }
    }
    if self.deploy.max_rounds == 0 {
      bail!("deploy.max_rounds must be at least 1");
    }
    Ok(())
  }
}
