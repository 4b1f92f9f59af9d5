/* src/cli/core/src/shell.rs */

// External program helpers (git for template checkout).

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};

use crate::ui::{self, DIM, RESET};

/// Run a program with arguments, bail on failure (shows both stdout and stderr on error).
pub(crate) fn run_program(base_dir: &Path, program: &str, args: &[&str], label: &str) -> Result<()> {
  ui::detail(&format!("{DIM}{program} {}{RESET}", args.join(" ")));
  tracing::debug!(program, ?args, dir = %base_dir.display(), "spawning");
  let output = Command::new(program)
    .args(args)
    .current_dir(base_dir)
    .output()
    .with_context(|| format!("failed to run {label}"))?;
  if !output.status.success() {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let mut msg = format!("{label} exited with status {}", output.status);
    if !stderr.is_empty() {
      msg.push('\n');
      msg.push_str(&stderr);
    }
    if !stdout.is_empty() {
      msg.push('\n');
      msg.push_str(&stdout);
    }
    bail!("{msg}");
  }
  Ok(())
}

/// Shallow-clone `repo` into `dest`.
pub(crate) fn git_clone(repo: &str, dest: &Path) -> Result<()> {
  if !which_exists("git") {
    bail!("git not found on PATH -- it is required to fetch project templates");
  }
  let dest_str = dest.to_str().with_context(|| format!("non UTF-8 path {}", dest.display()))?;
  run_program(Path::new("."), "git", &["clone", "--depth", "1", "--quiet", repo, dest_str], "git clone")
}

/// Check if a command exists on PATH.
pub(crate) fn which_exists(cmd: &str) -> bool {
  Command::new("which")
    .arg(cmd)
    .stdout(std::process::Stdio::null())
    .stderr(std::process::Stdio::null())
    .status()
    .map(|s| s.success())
    .unwrap_or(false)
}
