/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use loader::resolve_cli_config;
pub use types::{CliConfig, DeploySection, ServiceSection};
