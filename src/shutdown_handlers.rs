use std::time::Duration;

use crate::shutdown::{ShutdownSender, request_shutdown};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Fires shutdown on Ctrl+C or SIGTERM; exits quietly once shutdown has been
/// requested by anyone else.
pub fn setup_signal_shutdown_handler(shutdown_tx: &ShutdownSender) -> tokio::task::JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    let mut shutdown_rx = shutdown_tx.subscribe();
    tokio::spawn(async move {
        #[cfg(unix)]
        let mut term_signal = match signal(SignalKind::terminate()) {
            Ok(signal) => Some(signal),
            Err(err) => {
                tracing::warn!("Failed to register SIGTERM handler: {}", err);
                None
            }
        };

        #[cfg(unix)]
        {
            tokio::select! {
                _ = shutdown_rx.recv() => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::debug!("Ctrl+C received, stopping workers");
                    request_shutdown(&shutdown_tx);
                }
                () = async {
                    if let Some(signal) = term_signal.as_mut() {
                        signal.recv().await;
                    } else {
                        std::future::pending::<()>().await;
                    }
                } => {
                    tracing::debug!("SIGTERM received, stopping workers");
                    request_shutdown(&shutdown_tx);
                }
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                _ = shutdown_rx.recv() => {}
                _ = tokio::signal::ctrl_c() => {
                    request_shutdown(&shutdown_tx);
                }
            }
        }
    })
}

/// Fires shutdown once `run_duration` has elapsed.
pub fn setup_deadline_shutdown(
    shutdown_tx: &ShutdownSender,
    run_duration: Duration,
) -> tokio::task::JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    let mut shutdown_rx = shutdown_tx.subscribe();
    tokio::spawn(async move {
        tokio::select! {
            _ = shutdown_rx.recv() => {}
            () = tokio::time::sleep(run_duration) => {
                tracing::debug!("Run duration of {:?} reached", run_duration);
                request_shutdown(&shutdown_tx);
            }
        }
    })
}
