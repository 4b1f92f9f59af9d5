/* src/cli/core/src/deploy/mod.rs */

// `jellyfaas deploy`: upload an archive and optionally wait for every size to
// finish deploying.

pub mod poll;


use std::cell::RefCell;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::api::{ApiClient, DeployedFunctionResponse};
use crate::config::CliConfig;
use crate::ui::{self, BOLD, DIM, RESET};
use poll::{PollConfig, PollEvent, WaitOutcome, wait_for_completion};

pub async fn run_deploy(client: &ApiClient, config: &CliConfig, archive: &Path, wait: bool) -> Result<()> {
  ui::arrow(&format!("deploying function {}", archive.display()));

  let resp = client.upload(archive).await.context(
    "deployment rejected -- this normally happens when an upgrade is already in progress",
  )?;
  print_deployment(&resp, archive, &config.service.web_ui);

  if !wait {
    return Ok(());
  }

  ui::blank();
  ui::arrow("waiting for function to be ready");
  let poll_config = PollConfig::new(client.upload_status_base(), &config.deploy);
  let operation_ids = resp.operation_ids();
  let deployed = RefCell::new(Vec::new());
  let waiting =
    wait_for_completion(client, &poll_config, &resp.function_id, &operation_ids, |event| {
      if let PollEvent::Deployed { operation_id, .. } = &event {
        deployed.borrow_mut().push(operation_id.to_string());
      }
      report_event(event);
    });

  let outcome = tokio::select! {
    res = waiting => res?,
    _ = tokio::signal::ctrl_c() => {
      let done = deployed.borrow();
      let pending: Vec<&str> =
        operation_ids.iter().filter(|id| !done.contains(*id)).map(String::as_str).collect();
      ui::warn(&format!("still deploying: {}", pending.join(", ")));
      bail!("interrupted -- the deployment continues in the background, see `jellyfaas builds list`")
    }
  };

  match outcome {
    WaitOutcome::Deployed { rounds } => {
      ui::ok(&format!("operation complete, function(s) ready to be used ({rounds} checks)"));
      Ok(())
    }
    WaitOutcome::Exhausted { rounds, pending } => {
      ui::fail(&format!("still deploying after {rounds} checks: {}", pending.join(", ")));
      bail!(
        "gave up waiting for deployment -- run `jellyfaas builds list` to check for a failed build"
      )
    }
  }
}

fn print_deployment(resp: &DeployedFunctionResponse, archive: &Path, web_ui: &str) {
  let function_name = archive.file_stem().and_then(|s| s.to_str()).unwrap_or(&resp.function);
  ui::ok(&format!("uploaded {BOLD}{}{RESET} {DIM}({}){RESET}", resp.function, resp.function_id));
  for detail in &resp.deployed_details {
    ui::detail(&format!("{DIM}[{}]{RESET}", detail.size));
    ui::detail(&ui::field("Function URL", format!("{web_ui}{function_name}")));
    ui::detail(&ui::field("API Endpoint", &detail.function_url));
  }
  if resp.new {
    ui::arrow("function is new and is currently deploying");
  } else {
    ui::arrow(&format!(
      "function upgrading, current version is {}, new version will be {}",
      resp.current_version, resp.deploying_version
    ));
  }
}

fn report_event(event: PollEvent<'_>) {
  match event {
    PollEvent::Pending { round, max_rounds, operation_id, status } => ui::detail(&format!(
      "{round}/{max_rounds}: operation {operation_id} not complete, status: {status}"
    )),
    PollEvent::Deployed { round, operation_id } => {
      ui::detail_ok(&format!("{round}: operation {operation_id} deployed"));
    }
    PollEvent::Waiting { round, interval } => {
      ui::detail(&format!("{DIM}round {round} done, checking again in {}s{RESET}", interval.as_secs()));
    }
  }
}
