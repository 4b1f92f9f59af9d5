/* src/cli/core/src/scaffold.rs */

// `jellyfaas create`: new function project from the public template repo.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use walkdir::WalkDir;

use crate::project::rename_spec;
use crate::shell;
use crate::ui::{self, BOLD, RESET};

const TEMP_REPO: &str = ".temp-repo";

/// Template directory inside the template repo for a language name or alias.
pub fn template_dir_for(language: &str) -> Option<&'static str> {
  let dir = match language.to_ascii_lowercase().as_str() {
    "go" | "golang" => "go-template",
    "python" => "python-template",
    "php" => "php-template",
    "nodejs" | "javascript" | "js" | "node.js" | "node" => "node-template",
    "ruby" => "ruby-template",
    "java" => "java-template",
    "dotnet" | "csharp" | "c#" | "dn" => "dotnet-template",
    _ => return None,
  };
  Some(dir)
}

/// Removes the checkout on drop, including on early return.
struct TempCheckout(PathBuf);

impl Drop for TempCheckout {
  fn drop(&mut self) {
    if self.0.exists()
      && let Err(e) = std::fs::remove_dir_all(&self.0)
    {
      tracing::warn!(path = %self.0.display(), error = %e, "failed to remove template checkout");
    }
  }
}

pub fn run_create(name: &str, language: &str, destination: &Path, always: bool, repo: &str) -> Result<PathBuf> {
  let template = template_dir_for(language)
    .with_context(|| format!("language is not supported: {language}"))?;
  let final_path = destination.join(name);

  if final_path.exists() && !always {
    bail!("folder already exists: {} (pass --always to reuse it)", final_path.display());
  }
  std::fs::create_dir_all(&final_path)
    .with_context(|| format!("failed to create directory {}", final_path.display()))?;

  ui::step(1, 3, "fetching templates");
  let checkout = TempCheckout(destination.join(TEMP_REPO));
  if checkout.0.exists() {
    std::fs::remove_dir_all(&checkout.0)
      .with_context(|| format!("failed to clear stale {}", checkout.0.display()))?;
  }
  shell::git_clone(repo, &checkout.0)?;

  ui::step(2, 3, &format!("copying {template}"));
  let copied = copy_dir(&checkout.0.join(template), &final_path)?;
  ui::detail(&format!("{copied} files"));

  ui::step(3, 3, "updating jellyspec.json");
  let spec = rename_spec(&final_path, name)?;
  ui::detail(&ui::field("shortname", &spec.short_name));

  ui::blank();
  ui::ok(&format!("project {BOLD}{name}{RESET} created at {}", final_path.display()));
  ui::arrow("read the README.md to get started");
  Ok(final_path)
}

/// Recursively copy `src` into `dst`, creating directories as needed. Returns files copied.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<usize> {
  if !src.is_dir() {
    bail!("template directory {} not found", src.display());
  }
  let mut files = 0;
  for entry in WalkDir::new(src) {
    let entry = entry.with_context(|| format!("failed to walk {}", src.display()))?;
    let rel = entry.path().strip_prefix(src)?;
    let target = dst.join(rel);
    if entry.file_type().is_dir() {
      std::fs::create_dir_all(&target)
        .with_context(|| format!("failed to create {}", target.display()))?;
    } else if entry.file_type().is_file() {
      std::fs::copy(entry.path(), &target)
        .with_context(|| format!("failed to copy {}", entry.path().display()))?;
      files += 1;
    }
  }
  Ok(files)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn language_aliases() {
    assert_eq!(template_dir_for("golang"), Some("go-template"));
    assert_eq!(template_dir_for("Python"), Some("python-template"));
    assert_eq!(template_dir_for("node.js"), Some("node-template"));
    assert_eq!(template_dir_for("js"), Some("node-template"));
    assert_eq!(template_dir_for("c#"), Some("dotnet-template"));
    assert_eq!(template_dir_for("dn"), Some("dotnet-template"));
    assert_eq!(template_dir_for("cobol"), None);
  }

  #[test]
  fn copy_dir_recurses() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(src.path().join("a/b")).unwrap();
    std::fs::write(src.path().join("top.txt"), "1").unwrap();
    std::fs::write(src.path().join("a/b/deep.txt"), "2").unwrap();

    let copied = copy_dir(src.path(), &dst.path().join("out")).unwrap();
    assert_eq!(copied, 2);
    assert_eq!(std::fs::read_to_string(dst.path().join("out/a/b/deep.txt")).unwrap(), "2");
    assert_eq!(std::fs::read_to_string(dst.path().join("out/top.txt")).unwrap(), "1");
  }

  #[test]
  fn copy_dir_missing_template() {
    let tmp = tempfile::tempdir().unwrap();
    let err = copy_dir(&tmp.path().join("go-template"), tmp.path()).unwrap_err();
    assert!(err.to_string().contains("not found"));
  }

  #[test]
  fn existing_project_is_refused() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::create_dir(tmp.path().join("taken")).unwrap();
    let err = run_create("taken", "python", tmp.path(), false, "unused").unwrap_err();
    assert!(err.to_string().contains("already exists"));
  }

  #[test]
  fn unknown_language_is_refused_before_anything_is_created() {
    let tmp = tempfile::tempdir().unwrap();
    let err = run_create("fresh", "cobol", tmp.path(), false, "unused").unwrap_err();
    assert!(err.to_string().contains("not supported"));
    assert!(!tmp.path().join("fresh").exists());
  }

  #[test]
  fn checkout_guard_removes_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join(TEMP_REPO);
    std::fs::create_dir_all(dir.join("nested")).unwrap();
    drop(TempCheckout(dir.clone()));
    assert!(!dir.exists());
  }
}
