/* src/cli/core/src/deploy/poll/mod.rs */

// Deployment completion polling. `PollSession` holds the pure state
// (which operations are done); `wait_for_completion` drives it against a
// `StatusSource` with a fixed round budget and reports progress through a
// callback instead of printing.

use std::future::Future;
use std::time::Duration;

use crate::config::DeploySection;


/// Status value that marks an operation as finished.
pub const DEPLOYED: &str = "DEPLOYED";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
  #[error("transport error: {0}")]
  Transport(String),
  #[error("service returned HTTP {0}")]
  Http(u16),
}

/// Anything that can report the status string of an operation URL.
pub trait StatusSource {
  fn fetch_status(&self, url: &str) -> impl Future<Output = Result<String, StatusError>>;
}

#[derive(Debug, thiserror::Error)]
pub enum WaitError {
  #[error("checking operation {operation_id} failed in round {round}: {source}")]
  Aborted { round: u32, operation_id: String, source: StatusError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome {
  /// Every operation reported `DEPLOYED`.
  Deployed { rounds: u32 },
  /// The round budget ran out; `pending` lists the unfinished operation ids.
  Exhausted { rounds: u32, pending: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollEvent<'a> {
  Pending { round: u32, max_rounds: u32, operation_id: &'a str, status: &'a str },
  Deployed { round: u32, operation_id: &'a str },
  Waiting { round: u32, interval: Duration },
}

#[derive(Debug, Clone)]
pub struct PollConfig {
  pub base_url: String,
  pub max_rounds: u32,
  pub interval: Duration,
}

impl PollConfig {
  pub fn new(base_url: impl Into<String>, deploy: &DeploySection) -> Self {
    Self { base_url: base_url.into(), max_rounds: deploy.max_rounds, interval: deploy.poll_interval() }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationHandle {
  pub operation_id: String,
  pub function_id: String,
  pub url: String,
  complete: bool,
}

/// Fixed set of operations for one wait. Handles are never added or removed;
/// `complete` only moves from false to true.
#[derive(Debug, Clone)]
pub struct PollSession {
  handles: Vec<OperationHandle>,
}

impl PollSession {
  pub fn new(base_url: &str, function_id: &str, operation_ids: &[String]) -> Self {
    let base = base_url.trim_end_matches('/');
    let handles = operation_ids
      .iter()
      .map(|op| OperationHandle {
        operation_id: op.clone(),
        function_id: function_id.to_string(),
        url: format!("{base}/{op}/{function_id}"),
        complete: false,
      })
      .collect();
    Self { handles }
  }

  /// Indices of unfinished handles, in creation order.
  pub fn pending(&self) -> Vec<usize> {
    self.handles.iter().enumerate().filter(|(_, h)| !h.complete).map(|(i, _)| i).collect()
  }

  /// Apply a status reading. Returns true when it completes the handle;
  /// an unknown index is ignored.
  pub fn record(&mut self, index: usize, status: &str) -> bool {
    match self.handles.get_mut(index) {
      Some(handle) if status == DEPLOYED => {
        handle.complete = true;
        true
      }
      _ => false,
    }
  }

  pub fn is_complete(&self) -> bool {
    self.handles.iter().all(|h| h.complete)
  }

  pub fn pending_ids(&self) -> Vec<String> {
    self.handles.iter().filter(|h| !h.complete).map(|h| h.operation_id.clone()).collect()
  }
}

/// Poll every operation until all are deployed or `max_rounds` is used up.
///
/// A failed status request aborts the whole wait at once. Rounds are separated
/// by `interval`; no pause happens after the final round or once everything
/// is deployed.
pub async fn wait_for_completion<S: StatusSource>(
  source: &S,
  config: &PollConfig,
  function_id: &str,
  operation_ids: &[String],
  mut report: impl FnMut(PollEvent<'_>),
) -> Result<WaitOutcome, WaitError> {
  let mut session = PollSession::new(&config.base_url, function_id, operation_ids);

  for round in 1..=config.max_rounds {
    let pending = session.pending();
    tracing::debug!(round, pending = pending.len(), "poll round");

    for index in pending {
      let handle = &session.handles[index];
      tracing::debug!(operation = %handle.operation_id, function = %handle.function_id, "checking status");
      let url = handle.url.clone();
      let status = match source.fetch_status(&url).await {
        Ok(status) => status,
        Err(source) => {
          let operation_id = session.handles[index].operation_id.clone();
          return Err(WaitError::Aborted { round, operation_id, source });
        }
      };
      let operation_id = session.handles[index].operation_id.clone();
      if session.record(index, &status) {
        report(PollEvent::Deployed { round, operation_id: &operation_id });
      } else {
        report(PollEvent::Pending {
          round,
          max_rounds: config.max_rounds,
          operation_id: &operation_id,
          status: &status,
        });
      }
    }

    if session.is_complete() {
      return Ok(WaitOutcome::Deployed { rounds: round });
    }
    if round < config.max_rounds {
      report(PollEvent::Waiting { round, interval: config.interval });
      tokio::time::sleep(config.interval).await;
    }
  }

  Ok(WaitOutcome::Exhausted { rounds: config.max_rounds, pending: session.pending_ids() })
}
