/* src/cli/core/src/config/tests/discovery.rs */

use super::*;

#[test]
fn finds_config_in_parent_directory() {
  let tmp = tempfile::tempdir().unwrap();
  std::fs::write(tmp.path().join(CONFIG_FILE), "[deploy]\nmax_rounds = 2\n").unwrap();
  let nested = tmp.path().join("functions/hello");
  std::fs::create_dir_all(&nested).unwrap();

  let found = find_cli_config(&nested).unwrap();
  assert_eq!(found, tmp.path().canonicalize().unwrap().join(CONFIG_FILE));

  let config = resolve_cli_config(None, &nested).unwrap();
  assert_eq!(config.deploy.max_rounds, 2);
}

#[test]
fn explicit_path_wins() {
  let tmp = tempfile::tempdir().unwrap();
  std::fs::write(tmp.path().join(CONFIG_FILE), "[deploy]\nmax_rounds = 2\n").unwrap();
  let explicit = tmp.path().join("other.toml");
  std::fs::write(&explicit, "[deploy]\nmax_rounds = 7\n").unwrap();

  let config = resolve_cli_config(Some(&explicit), tmp.path()).unwrap();
  assert_eq!(config.deploy.max_rounds, 7);
}

#[test]
fn missing_explicit_path_is_an_error() {
  let tmp = tempfile::tempdir().unwrap();
  let err = resolve_cli_config(Some(&tmp.path().join("nope.toml")), tmp.path()).unwrap_err();
  assert!(err.to_string().contains("failed to read"));
}

#[test]
fn invalid_config_reports_path() {
  let tmp = tempfile::tempdir().unwrap();
  let path = tmp.path().join(CONFIG_FILE);
  std::fs::write(&path, "[deploy]\nmax_rounds = 0\n").unwrap();
  let err = load_cli_config(&path).unwrap_err();
  assert!(format!("{err:#}").contains("deploy.max_rounds"));
}
