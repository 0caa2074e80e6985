use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info};

use crate::config::StressConfig;
use crate::dns::{DnsExchange, FloodDispatcher};
use crate::error::{AppError, AppResult, ValidationError};
use crate::metrics::{IntervalReport, RunTotals, setup_stats_collector};
use crate::shutdown::ShutdownSender;

use super::Worker;
use super::worker::{WorkerContext, spawn_worker};

/// How long stopped workers get to unwind before they are aborted.
const WORKER_SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Handles of a running engine.
pub struct StressRun {
    workers: Vec<JoinHandle<()>>,
    collector: JoinHandle<RunTotals>,
    flood: Option<FloodDispatcher>,
}

/// Starts the collector and `config.concurrency` workers.
///
/// Worker `i` is bound to `domains[i % domains.len()]`. Every domain is
/// validated before the first task is spawned. Must be called from within a
/// tokio runtime.
///
/// # Errors
///
/// Returns `ValidationError::MissingDomains` for an empty list and
/// `ValidationError::InvalidDomain` when a domain cannot be packed.
pub fn launch(
    config: Arc<StressConfig>,
    domains: &[String],
    transport: Arc<dyn DnsExchange>,
    shutdown_tx: &ShutdownSender,
    report_tx: Option<mpsc::UnboundedSender<IntervalReport>>,
) -> AppResult<StressRun> {
    if domains.is_empty() {
        return Err(AppError::validation(ValidationError::MissingDomains));
    }

    let mut workers = Vec::with_capacity(config.concurrency);
    for id in 0..config.concurrency {
        let domain = assigned_domain(domains, id)
            .ok_or_else(|| AppError::validation(ValidationError::MissingDomains))?;
        workers.push(Worker::new(id, domain, &config)?);
    }

    let flood = config
        .flood
        .then(|| FloodDispatcher::new(Arc::clone(&transport), config.flood_limit));
    let (batch_tx, batch_rx) = mpsc::channel(config.concurrency.max(1));
    let collector = setup_stats_collector(&config, shutdown_tx, batch_rx, report_tx);

    let destination = config.destination.to_string();
    let context = WorkerContext {
        config,
        transport,
        flood: flood.clone(),
        batch_tx,
    };
    let handles = workers
        .into_iter()
        .map(|worker| spawn_worker(worker, context.clone(), shutdown_tx.subscribe()))
        .collect::<Vec<_>>();

    info!("Started {} workers against {}", handles.len(), destination);
    Ok(StressRun {
        workers: handles,
        collector,
        flood,
    })
}

/// Domain worker `id` queries: `domains[id % domains.len()]`.
pub(crate) fn assigned_domain(domains: &[String], id: usize) -> Option<&str> {
    id.checked_rem(domains.len())
        .and_then(|index| domains.get(index))
        .map(String::as_str)
}

impl StressRun {
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// The flood dispatcher, when running in flood mode.
    #[must_use]
    pub const fn flood_dispatcher(&self) -> Option<&FloodDispatcher> {
        self.flood.as_ref()
    }

    /// Waits for shutdown, then for every worker to stop.
    ///
    /// # Errors
    ///
    /// Returns an error when the collector or a worker panicked.
    pub async fn wait(self) -> AppResult<RunTotals> {
        let totals = match self.collector.await {
            Ok(totals) => totals,
            Err(err) => {
                for handle in &self.workers {
                    handle.abort();
                }
                return Err(err.into());
            }
        };
        join_workers(self.workers, WORKER_SHUTDOWN_GRACE).await?;
        Ok(totals)
    }
}

/// Joins every worker, aborting those still running after `grace`.
///
/// All handles are visited before the first join error is returned.
pub(crate) async fn join_workers(
    workers: Vec<JoinHandle<()>>,
    grace: Duration,
) -> Result<(), JoinError> {
    let mut first_error = None;
    for mut handle in workers {
        let outcome = match tokio::time::timeout(grace, &mut handle).await {
            Ok(result) => result,
            Err(_elapsed) => {
                debug!("Worker did not stop in time, aborting");
                handle.abort();
                match handle.await {
                    Err(err) if err.is_cancelled() => Ok(()),
                    other => other,
                }
            }
        };
        if let Err(err) = outcome
            && first_error.is_none()
        {
            first_error = Some(err);
        }
    }
    first_error.map_or(Ok(()), Err)
}
