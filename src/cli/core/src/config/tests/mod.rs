/* src/cli/core/src/config/tests/mod.rs */

use super::loader::{CONFIG_FILE, find_cli_config, load_cli_config, resolve_cli_config};
use super::types::CliConfig;

mod discovery;
mod parsing;
