/* src/cli/core/src/config/tests/parsing.rs */

use std::time::Duration;

use super::*;

#[test]
fn parse_empty_config_uses_defaults() {
  let config: CliConfig = toml::from_str("").unwrap();
  assert_eq!(config.service.core, "https://api.jellyfaas.com/core-service/v1");
  assert_eq!(config.service.auth, "https://api.jellyfaas.com/auth-service/v1");
  assert_eq!(config.service.web_ui, "https://app.jellyfaas.com/function/");
  assert_eq!(config.service.endpoint, "https://api.jellyfaas.com/");
  assert_eq!(config.deploy.max_rounds, 10);
  assert_eq!(config.deploy.poll_interval(), Duration::from_secs(30));
  assert_eq!(config.package.exclude, vec![".git", ".idea", "vendor", "node_modules", ".temp-repo"]);
  assert!(!config.service.is_development());
  assert!(config.validate().is_ok());
}

#[test]
fn parse_full_config() {
  let toml_str = r#"
[service]
core = "http://localhost:8080/core-service/v1"
auth = "http://localhost:8081/auth-service/v1"
web_ui = "http://localhost:3000/function/"
endpoint = "http://localhost:8082/"

[templates]
repo = "https://example.com/templates.git"

[deploy]
max_rounds = 3
poll_interval_secs = 5

[package]
exclude = ["target", ".git"]
"#;
  let config: CliConfig = toml::from_str(toml_str).unwrap();
  assert_eq!(config.service.core, "http://localhost:8080/core-service/v1");
  assert!(config.service.is_development());
  assert_eq!(config.templates.repo, "https://example.com/templates.git");
  assert_eq!(config.deploy.max_rounds, 3);
  assert_eq!(config.deploy.poll_interval(), Duration::from_secs(5));
  assert_eq!(config.package.exclude, vec!["target", ".git"]);
}

#[test]
fn partial_section_keeps_other_defaults() {
  let config: CliConfig = toml::from_str("[deploy]\nmax_rounds = 4\n").unwrap();
  assert_eq!(config.deploy.max_rounds, 4);
  assert_eq!(config.deploy.poll_interval_secs, 30);
  assert_eq!(config.templates.repo, "https://github.com/Platform48/jellyfaas_public_templates.git");
}

#[test]
fn zero_rounds_rejected() {
  let config: CliConfig = toml::from_str("[deploy]\nmax_rounds = 0\n").unwrap();
  let err = config.validate().unwrap_err();
  assert!(err.to_string().contains("deploy.max_rounds"));
}

#[test]
fn empty_service_url_rejected() {
  let config: CliConfig = toml::from_str("[service]\ncore = \"  \"\n").unwrap();
  let err = config.validate().unwrap_err();
  assert!(err.to_string().contains("service.core"));
}
