//! Console output: startup header, interval lines and the final summary.
mod console;
mod format;

#[cfg(test)]
mod tests;

pub use console::{ConsoleStyle, spawn_report_printer};
pub use format::{
    destination_line, domains_line, format_fixed_x100, format_latency, format_optional_latency,
    report_line, started_line, summary_lines,
};
