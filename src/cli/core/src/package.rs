/* src/cli/core/src/package.rs */

// `jellyfaas zip`: pack a project directory into `<shortname>.zip` (spaces and
// underscores dropped), entries rooted at the shortname exactly as jellyspec.json
// spells it, skipping excluded path components.

use std::fs::File;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, bail};
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::project::{SPEC_FILE, normalize_short_name, read_spec};

#[derive(Debug)]
pub struct Packaged {
  pub archive: PathBuf,
  pub files: usize,
  pub bytes: u64,
}

pub fn package_project(source: &Path, out_dir: &Path, overwrite: bool, exclude: &[String]) -> Result<Packaged> {
  let spec = read_spec(source)?;
  let short_name = normalize_short_name(&spec.short_name);
  if short_name.is_empty() {
    bail!("{SPEC_FILE} in {} has no shortname", source.display());
  }

  let archive = out_dir.join(format!("{short_name}.zip"));
  validate_paths(source, &archive, overwrite)?;

  let files = zip_directory(source, &archive, &spec.short_name, exclude)?;
  let bytes = std::fs::metadata(&archive)
    .with_context(|| format!("failed to stat {}", archive.display()))?
    .len();
  Ok(Packaged { archive, files, bytes })
}

/// Source must be a directory; an existing archive is an error unless `overwrite` removes it.
pub fn validate_paths(source: &Path, target: &Path, overwrite: bool) -> Result<()> {
  let meta = std::fs::metadata(source)
    .with_context(|| format!("source directory {} does not exist", source.display()))?;
  if !meta.is_dir() {
    bail!("source {} is not a directory", source.display());
  }
  if target.exists() {
    if !overwrite {
      bail!("target zip file {} already exists (pass --overwrite to replace it)", target.display());
    }
    std::fs::remove_file(target)
      .with_context(|| format!("failed to remove {}", target.display()))?;
  }
  Ok(())
}

fn is_excluded(rel: &Path, exclude: &[String]) -> bool {
  rel.components().any(|c| match c {
    Component::Normal(name) => exclude.iter().any(|e| name.to_str() == Some(e.as_str())),
    _ => false,
  })
}

fn entry_name(root: &str, rel: &Path) -> String {
  let mut name = root.to_string();
  for part in rel.components() {
    name.push('/');
    name.push_str(&part.as_os_str().to_string_lossy());
  }
  name
}

/// Write `source` into a deflated zip at `target`. Returns the number of files stored.
pub fn zip_directory(source: &Path, target: &Path, root: &str, exclude: &[String]) -> Result<usize> {
  let file =
    File::create(target).with_context(|| format!("failed to create {}", target.display()))?;
  // the archive may live inside the directory being packed
  let target_abs = target.canonicalize()?;
  let mut zip = ZipWriter::new(file);
  let mut files = 0;

  let walker = WalkDir::new(source).sort_by_file_name().into_iter().filter_entry(|e| {
    let rel = e.path().strip_prefix(source).unwrap_or(e.path());
    !is_excluded(rel, exclude)
  });

  for entry in walker {
    let entry = entry.with_context(|| format!("failed to walk {}", source.display()))?;
    let path = entry.path();
    if path.canonicalize().is_ok_and(|p| p == target_abs) {
      continue;
    }
    let rel = path.strip_prefix(source)?;
    let name = entry_name(root, rel);
    let options = entry_options(&entry)?;

    if entry.file_type().is_dir() {
      zip.add_directory(format!("{name}/"), options)?;
    } else if entry.file_type().is_file() {
      zip.start_file(name, options)?;
      let mut input =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
      std::io::copy(&mut input, &mut zip)
        .with_context(|| format!("failed to compress {}", path.display()))?;
      files += 1;
    } else {
      tracing::debug!(path = %path.display(), "skipping non-regular file");
    }
  }

  zip.finish().with_context(|| format!("failed to finish {}", target.display()))?;
  Ok(files)
}

#[cfg(unix)]
fn entry_options(entry: &walkdir::DirEntry) -> Result<SimpleFileOptions> {
  use std::os::unix::fs::PermissionsExt;
  let mode = entry.metadata()?.permissions().mode();
  Ok(SimpleFileOptions::default().compression_method(CompressionMethod::Deflated).unix_permissions(mode))
}

#[cfg(not(unix))]
fn entry_options(_entry: &walkdir::DirEntry) -> Result<SimpleFileOptions> {
  Ok(SimpleFileOptions::default().compression_method(CompressionMethod::Deflated))
}
