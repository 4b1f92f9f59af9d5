/* src/cli/core/src/main.rs */

mod api;
mod codec;
mod config;
mod credentials;
mod deploy;
mod library;
mod markdown;
mod package;
mod project;
mod scaffold;
mod shell;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use api::ApiClient;
use config::CliConfig;
use credentials::Credentials;
use ui::{BOLD, DIM, RESET};

#[derive(Parser)]
#[command(name = "jellyfaas", about = "JellyFaaS CLI", version)]
struct Cli {
  /// Path to jellyfaas.toml (searched upward from the current directory if omitted)
  #[arg(short, long, global = true, env = "JELLYFAAS_CONFIG")]
  config: Option<PathBuf>,
  /// Debug logging to stderr (overrides JELLYFAAS_LOG)
  #[arg(short, long, global = true)]
  verbose: bool,
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Store your secret key in ~/.jellyfaas
  Secret,
  /// Exchange the secret key for an access token
  Token,
  /// Manage users in your organisation
  User {
    #[command(subcommand)]
    action: UserAction,
  },
  /// Browse the function library
  Library {
    /// Show details of one function
    #[arg(short, long, value_name = "ID")]
    details: Option<String>,
    /// Render the latest README (with --details)
    #[arg(short, long, requires = "details")]
    readme: bool,
  },
  /// Upload a packaged function
  Deploy {
    /// Zip archive produced by `jellyfaas zip`
    #[arg(short, long)]
    zipfile: PathBuf,
    /// Wait until every size is deployed
    #[arg(short, long)]
    wait: bool,
  },
  /// Publish or withdraw a function from the public library
  Publish {
    /// Function id
    #[arg(short, long)]
    id: String,
    /// true to publish, false to withdraw
    #[arg(short, long, action = ArgAction::Set)]
    state: bool,
  },
  /// Generate a JSON schema from an example JSON document
  Spec {
    /// JSON text to convert
    #[arg(short, long)]
    json: String,
    /// Print only the schema, for piping
    #[arg(short, long)]
    raw: bool,
    /// Compact single-line output
    #[arg(short, long)]
    flat: bool,
  },
  /// Inspect and clean failed builds
  Builds {
    #[command(subcommand)]
    action: BuildsAction,
  },
  /// Create a function project from a template
  Create {
    /// Function name
    #[arg(short, long)]
    name: String,
    /// Template language (go, python, php, node, ruby, java, dotnet)
    #[arg(short, long)]
    language: String,
    /// Directory the project folder is created in
    #[arg(short, long)]
    destination: PathBuf,
    /// Reuse the project folder if it already exists
    #[arg(short, long)]
    always: bool,
  },
  /// Package a project directory as `<shortname>.zip`
  Zip {
    /// Project directory containing jellyspec.json
    #[arg(short, long, default_value = ".")]
    source: PathBuf,
    /// Replace an existing archive
    #[arg(short, long)]
    overwrite: bool,
    /// Deploy the archive once written
    #[arg(short, long)]
    deploy: bool,
    /// Wait for the deployment (with --deploy)
    #[arg(short, long, requires = "deploy")]
    wait: bool,
  },
  /// Check whether a function name is taken
  Exists {
    #[arg(short, long)]
    name: String,
  },
  /// Encode or decode standard base64
  Base64 {
    #[arg(short, long, conflicts_with = "decode", required_unless_present = "decode")]
    encode: Option<String>,
    #[arg(short, long)]
    decode: Option<String>,
  },
  /// Print the CLI version
  Version,
}

#[derive(Subcommand)]
enum UserAction {
  /// Create a user and print their one-time password
  Create {
    #[arg(short, long)]
    email: String,
    #[arg(short, long)]
    name: String,
  },
  /// List users
  List,
  /// Delete a user
  Delete {
    #[arg(short, long)]
    email: String,
  },
}

#[derive(Subcommand)]
enum BuildsAction {
  /// List failed builds
  List,
  /// Remove a failed build
  Clean {
    #[arg(short, long = "build-id", alias = "buildId")]
    build_id: String,
  },
}

fn init_tracing(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_env("JELLYFAAS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
  };
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn load_credentials() -> Result<Credentials> {
  let path = credentials::credentials_path()?;
  let creds = credentials::load_credentials(&path)?;
  tracing::debug!(path = %path.display(), env = %creds.env, "loaded credentials");
  Ok(creds)
}

fn api_client(config: &CliConfig) -> Result<ApiClient> {
  ApiClient::new(&config.service, &load_credentials()?)
}

#[tokio::main]
#[allow(clippy::too_many_lines)]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  if matches!(cli.command, Command::Version) {
    println!("JellyFaaS CLI v{}", ui::VERSION);
    return Ok(());
  }

  ui::banner();
  let cwd = std::env::current_dir().context("failed to get cwd")?;
  let config = config::resolve_cli_config(cli.config.as_deref(), &cwd)?;
  if config.service.is_development() {
    ui::warn(&format!("running in development mode against {}", config.service.core));
  }

  match cli.command {
    Command::Secret => {
      let secret = dialoguer::Password::new()
        .with_prompt("Enter (or paste from your UI profile page) your secret key")
        .interact()
        .context("failed to read secret key")?;
      credentials::validate_secret(&secret)?;
      let path = credentials::credentials_path()?;
      credentials::save_credentials(&path, &Credentials::new(secret.trim().to_string()))?;
      ui::ok(&format!("secret key written to {}", path.display()));
    }
    Command::Token => {
      let token = api_client(&config)?.validate_token().await?;
      println!("{}\n{}\n", ui::field("Token", ""), token.token);
      println!("{}", ui::field("Expiry", &token.expiry));
    }
    Command::User { action } => run_user(&config, action).await?,
    Command::Library { details, readme } => {
      let client = api_client(&config)?;
      match details {
        Some(id) => {
          let item = client.library_item(&id).await?;
          let view = library::render_details(&item, &config.service);
          print!("{}", view.text);
          if readme {
            match view.readme {
              Some(md) => print!("\n{}", markdown::render_markdown(&md)),
              None => ui::warn("latest version has no README"),
            }
          }
        }
        None => {
          let resp = client.library().await?;
          println!("{}", library::library_table(&resp.library_item));
          ui::detail(&format!("{DIM}{} functions{RESET}", resp.count));
          if !resp.bad_builds.is_empty() {
            println!("\n  {BOLD}Bad Builds:{RESET}");
            print!("{}", library::render_bad_builds(&resp.bad_builds));
          }
        }
      }
    }
    Command::Deploy { zipfile, wait } => {
      deploy::run_deploy(&api_client(&config)?, &config, &zipfile, wait).await?;
    }
    Command::Publish { id, state } => {
      let item = api_client(&config)?.set_published(&id, state).await?;
      let verb = if item.published { "published" } else { "withdrawn" };
      ui::ok(&format!("function {BOLD}{}{RESET} {verb}", item.name));
    }
    Command::Spec { json, raw, flat } => {
      let schema = jellyfaas_schema::generate_schema(&json, flat).context("failed to generate schema")?;
      if raw {
        println!("{schema}");
      } else {
        println!("Json Schema (basic):\n------------------------------\n");
        println!("{schema}");
        println!("\n------------------------------");
      }
    }
    Command::Builds { action } => run_builds(&config, action).await?,
    Command::Create { name, language, destination, always } => {
      load_credentials()?;
      scaffold::run_create(&name, &language, &destination, always, &config.templates.repo)?;
    }
    Command::Zip { source, overwrite, deploy, wait } => {
      run_zip(&config, &source, &cwd, overwrite, deploy, wait).await?;
    }
    Command::Exists { name } => {
      let resp = api_client(&config)?.exists(&name).await?;
      let shown = if resp.function_name.is_empty() { name.as_str() } else { resp.function_name.as_str() };
      ui::arrow(&format!("function {BOLD}{shown}{RESET} exists: {}", resp.exists));
    }
    Command::Base64 { encode, decode } => match (encode, decode) {
      (Some(text), _) => println!("{}", codec::encode(&text)),
      (None, Some(text)) => println!("{}", codec::decode(&text)?),
      (None, None) => bail!("pass --encode or --decode"),
    },
    Command::Version => {}
  }

  Ok(())
}

async fn run_user(config: &CliConfig, action: UserAction) -> Result<()> {
  match action {
    UserAction::Create { email, name } => {
      let client = api_client(config)?;
      ui::arrow(&format!("creating user {email}"));
      let user = client.create_user(&name, &email).await?;
      ui::ok(&format!("user created, password: {BOLD}{}{RESET}", user.password));
      ui::warn("this password cannot be retrieved again, note it down");
    }
    UserAction::List => {
      let users = api_client(config)?.list_users().await?;
      println!("{}", library::users_table(&users.entities));
    }
    UserAction::Delete { email } => {
      bail!("cannot delete {email}: user deletion is not available from the CLI, use the web UI");
    }
  }
  Ok(())
}

async fn run_builds(config: &CliConfig, action: BuildsAction) -> Result<()> {
  let client = api_client(config)?;
  match action {
    BuildsAction::List => {
      let resp = client.bad_builds().await?;
      ui::arrow(&format!("{} bad builds", resp.count));
      if !resp.bad_builds.is_empty() {
        ui::blank();
        print!("{}", library::render_bad_builds(&resp.bad_builds));
      }
    }
    BuildsAction::Clean { build_id } => {
      let resp = client.clean_bad_build(&build_id).await?;
      ui::ok("bad build cleaned");
      ui::detail(&ui::field("Build ID", &resp.build_id));
      for function_id in &resp.functions {
        ui::detail(&ui::field("Function ID", function_id));
      }
    }
  }
  Ok(())
}

async fn run_zip(
  config: &CliConfig,
  source: &Path,
  out_dir: &Path,
  overwrite: bool,
  deploy: bool,
  wait: bool,
) -> Result<()> {
  // fail before packaging if a deploy is going to need credentials
  let client = if deploy { Some(api_client(config)?) } else { None };

  ui::step(1, 2, &format!("packaging {}", source.display()));
  let packaged = package::package_project(source, out_dir, overwrite, &config.package.exclude)?;
  ui::step(2, 2, "archive written");
  ui::detail(&format!(
    "{} {DIM}({} files, {}){RESET}",
    packaged.archive.display(),
    packaged.files,
    ui::format_size(packaged.bytes)
  ));
  ui::ok("ready for deploy");

  if let Some(client) = client {
    ui::blank();
    deploy::run_deploy(&client, config, &packaged.archive, wait).await?;
    ui::arrow("deploys usually take a few minutes, `jellyfaas builds list` shows failed builds");
  }
  Ok(())
}
