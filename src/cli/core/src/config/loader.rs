/* src/cli/core/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::CliConfig;

pub const CONFIG_FILE: &str = "jellyfaas.toml";

/// Walk upward from `start` looking for `jellyfaas.toml`.
pub fn find_cli_config(start: &Path) -> Option<PathBuf> {
  let mut dir = start.canonicalize().ok()?;
  loop {
    let candidate = dir.join(CONFIG_FILE);
    if candidate.is_file() {
      return Some(candidate);
    }
    if !dir.pop() {
      return None;
    }
  }
}

pub fn load_cli_config(path: &Path) -> Result<CliConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let config: CliConfig =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  config.validate().with_context(|| format!("invalid config {}", path.display()))?;
  Ok(config)
}

/// Explicit path wins, then `jellyfaas.toml` found upward from `cwd`, then built-in defaults.
pub fn resolve_cli_config(explicit: Option<&Path>, cwd: &Path) -> Result<CliConfig> {
  if let Some(path) = explicit {
    return load_cli_config(path);
  }
  match find_cli_config(cwd) {
    Some(path) => {
      tracing::debug!(path = %path.display(), "using config file");
      load_cli_config(&path)
    }
    None => Ok(CliConfig::default()),
  }
}
