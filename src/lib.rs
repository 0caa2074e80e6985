//! Core library for the `dnsstress` CLI.
//!
//! The crate is split the way a run flows: CLI arguments and config files
//! produce an immutable run configuration, the engine spreads workers over
//! the target domains, each worker sends queries through a UDP or DOH
//! transport, and a single collector folds batch summaries into interval
//! reports for the console. The `dnsstress` binary is the primary
//! interface; library APIs may evolve with it.
pub mod args;
pub mod config;
pub mod display;
pub mod dns;
pub mod engine;
pub mod entry;
pub mod error;
pub mod logger;
pub mod metrics;
pub mod shutdown;
pub mod shutdown_handlers;
