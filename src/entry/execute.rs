use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::config::StressConfig;
use crate::display::{ConsoleStyle, spawn_report_printer};
use crate::dns::{DnsExchange, Transport};
use crate::engine::{launch, preflight};
use crate::error::AppResult;
use crate::shutdown::{request_shutdown, shutdown_channel};
use crate::shutdown_handlers::{setup_deadline_shutdown, setup_signal_shutdown_handler};

/// Header, pre-flight, engine, summary.
pub(super) async fn run_stress(config: StressConfig, domains: Vec<String>) -> AppResult<()> {
    let style = ConsoleStyle::detect(config.no_color);
    style.print_banner();
    style.print_header(&config, &domains);

    let transport = Transport::from_config(&config)?;
    debug!("Using {} transport", transport.protocol_name());
    let transport: Arc<dyn DnsExchange> = Arc::new(transport);

    let failures = preflight(&config, &domains, transport.as_ref()).await;
    if !failures.is_empty() {
        style.print_preflight_warning();
    }

    let (shutdown_tx, _) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);
    let deadline_handle = config
        .run_duration
        .map(|run_duration| setup_deadline_shutdown(&shutdown_tx, run_duration));

    let (report_tx, report_rx) = mpsc::unbounded_channel();
    let printer = spawn_report_printer(style, report_rx);

    let config = Arc::new(config);
    let run = match launch(
        Arc::clone(&config),
        &domains,
        transport,
        &shutdown_tx,
        Some(report_tx),
    ) {
        Ok(run) => run,
        Err(err) => {
            request_shutdown(&shutdown_tx);
            return Err(err);
        }
    };
    style.print_started(run.worker_count(), config.flood);

    let flood = run.flood_dispatcher().cloned();
    let totals = run.wait().await?;
    printer.await?;
    signal_handle.await?;
    if let Some(handle) = deadline_handle {
        handle.await?;
    }

    style.print_summary(
        &config,
        &totals,
        flood.map(|dispatcher| dispatcher.dispatched()),
    );
    Ok(())
}
