use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::config::StressConfig;
use crate::dns::{DnsExchange, FloodDispatcher, QueryTemplate};
use crate::error::{AppError, AppResult, TransportError, ValidationError};
use crate::metrics::BatchSummary;
use crate::shutdown::ShutdownReceiver;

use super::BatchRecorder;

/// Everything a worker shares with the rest of the run.
#[derive(Clone)]
pub(crate) struct WorkerContext {
    pub(crate) config: Arc<StressConfig>,
    pub(crate) transport: Arc<dyn DnsExchange>,
    /// Present only in flood mode.
    pub(crate) flood: Option<FloodDispatcher>,
    pub(crate) batch_tx: mpsc::Sender<BatchSummary>,
}

/// One load generator bound to a single domain for its whole life.
#[derive(Debug)]
pub struct Worker {
    id: usize,
    domain: String,
    template: QueryTemplate,
}

impl Worker {
    /// Builds the worker and packs its question.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidDomain` when `domain` is not a valid
    /// DNS name.
    pub fn new(id: usize, domain: &str, config: &StressConfig) -> AppResult<Self> {
        let template = QueryTemplate::new(domain, config.record_type, config.recursion_desired())
            .map_err(|err| match err {
                TransportError::InvalidName { name, reason } => {
                    debug!("Rejected domain {}: {}", name, reason);
                    AppError::validation(ValidationError::InvalidDomain { value: name })
                }
                other => AppError::transport(other),
            })?;
        Ok(Self {
            id,
            domain: domain.to_owned(),
            template,
        })
    }

    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Runs batches until shutdown or until the collector goes away.
    ///
    /// Shutdown is observed while a batch is in flight and while the summary
    /// waits for room in the channel; an unfinished batch is dropped.
    pub(crate) async fn run(mut self, context: &WorkerContext, shutdown_rx: &mut ShutdownReceiver) {
        debug!(worker = self.id, domain = %self.domain, "Worker started");
        let mut recorder = BatchRecorder::new();
        loop {
            let stop = tokio::select! {
                _ = shutdown_rx.recv() => true,
                stop = self.run_batch(context, &mut recorder) => stop,
            };
            if stop {
                break;
            }
        }
        debug!(worker = self.id, domain = %self.domain, "Worker stopped");
    }

    /// Returns `true` when the worker should stop.
    async fn run_batch(&mut self, context: &WorkerContext, recorder: &mut BatchRecorder) -> bool {
        let config = &context.config;
        for _ in 0..config.batch_size {
            if config.random_ids {
                self.template.randomize_id();
            }

            if let Some(dispatcher) = context.flood.as_ref() {
                dispatcher.dispatch(self.template.as_bytes().to_vec()).await;
                continue;
            }

            let start = Instant::now();
            let result = context.transport.exchange(self.template.as_bytes()).await;
            let elapsed = start.elapsed();
            if let Err(err) = &result
                && config.verbose
            {
                warn!("{} error: {}", self.domain, err);
            }
            recorder.record(elapsed, result.is_ok());
        }

        if context.flood.is_some() {
            tokio::task::yield_now().await;
            return false;
        }

        let summary = recorder.finish();
        context.batch_tx.send(summary).await.is_err()
    }
}

pub(crate) fn spawn_worker(
    worker: Worker,
    context: WorkerContext,
    mut shutdown_rx: ShutdownReceiver,
) -> JoinHandle<()> {
    tokio::spawn(async move { worker.run(&context, &mut shutdown_rx).await })
}
