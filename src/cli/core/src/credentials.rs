/* src/cli/core/src/credentials.rs */

// Secret key storage in `~/.jellyfaas` (YAML: `apikey`, `env`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

pub const CREDENTIALS_FILE: &str = ".jellyfaas";
pub const DEFAULT_ENV: &str = "jellyfaas";
const MIN_SECRET_LEN: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
  #[serde(rename = "apikey")]
  pub api_key: String,
  #[serde(default)]
  pub env: String,
}

impl Credentials {
  pub fn new(api_key: String) -> Self {
    Self { api_key, env: DEFAULT_ENV.to_string() }
  }
}

pub fn credentials_path() -> Result<PathBuf> {
  let home = dirs::home_dir().context("could not determine home directory")?;
  Ok(home.join(CREDENTIALS_FILE))
}

pub fn load_credentials(path: &Path) -> Result<Credentials> {
  let content = std::fs::read_to_string(path).with_context(|| {
    format!("failed to read {} -- run `jellyfaas secret` to store your secret key", path.display())
  })?;
  let creds: Credentials = serde_yaml::from_str(&content)
    .with_context(|| format!("failed to parse {}", path.display()))?;
  if creds.api_key.trim().is_empty() {
    bail!("{} has an empty apikey -- run `jellyfaas secret` again", path.display());
  }
  Ok(creds)
}

pub fn save_credentials(path: &Path, creds: &Credentials) -> Result<()> {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  let yaml = serde_yaml::to_string(creds).context("failed to serialize credentials")?;
  std::fs::write(path, yaml).with_context(|| format!("failed to write {}", path.display()))?;
  restrict_permissions(path)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
  use std::os::unix::fs::PermissionsExt;
  std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
    .with_context(|| format!("failed to set permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
  Ok(())
}

/// Reject obviously truncated pastes before they are written to disk.
pub fn validate_secret(secret: &str) -> Result<()> {
  if secret.trim().chars().count() < MIN_SECRET_LEN {
    bail!("secret key too short, are you sure you entered the correct key?");
  }
  Ok(())
}
