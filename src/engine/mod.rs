//! Worker pool, batch accounting and the pre-flight check.
mod batch;
mod preflight;
mod run;
mod worker;


pub use batch::BatchRecorder;
pub use preflight::{PreflightFailure, preflight};
pub use run::{StressRun, launch};
pub use worker::Worker;
