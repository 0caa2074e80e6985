use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Semaphore;
use tracing::trace;

use super::DnsExchange;

/// Fire-and-forget submission of exchanges.
///
/// Every dispatch becomes a detached task whose outcome is dropped. Without a
/// limit the number of outstanding exchanges is unbounded; with one, dispatch
/// waits for a permit before spawning.
#[derive(Clone)]
pub struct FloodDispatcher {
    transport: Arc<dyn DnsExchange>,
    limit: Option<Arc<Semaphore>>,
    dispatched: Arc<AtomicU64>,
}

impl FloodDispatcher {
    #[must_use]
    pub fn new(transport: Arc<dyn DnsExchange>, limit: Option<usize>) -> Self {
        Self {
            transport,
            limit: limit.map(|permits| Arc::new(Semaphore::new(permits))),
            dispatched: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Spawns one detached exchange for `query`.
    pub async fn dispatch(&self, query: Vec<u8>) {
        let permit = match self.limit.as_ref() {
            Some(semaphore) => match Arc::clone(semaphore).acquire_owned().await {
                Ok(permit) => Some(permit),
                Err(_closed) => return,
            },
            None => None,
        };

        let transport = Arc::clone(&self.transport);
        self.dispatched.fetch_add(1, Ordering::Relaxed);
        drop(tokio::spawn(async move {
            let _permit = permit;
            if let Err(err) = transport.exchange(&query).await {
                trace!("flood exchange failed: {}", err);
            }
        }));
    }

    /// Exchanges submitted so far, finished or not.
    #[must_use]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }
}
