use std::io::IsTerminal;

use crossterm::style::{Color, Stylize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::StressConfig;
use crate::metrics::{IntervalReport, RunTotals};

use super::format::{destination_line, domains_line, report_line, started_line, summary_lines};

const TITLE_RGB: (u8, u8, u8) = (0x3a, 0xa9, 0xff);

/// Whether console output is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleStyle {
    color: bool,
}

impl ConsoleStyle {
    /// Colors only when stdout is a terminal and colors were not disabled.
    #[must_use]
    pub fn detect(no_color: bool) -> Self {
        Self {
            color: !no_color && std::io::stdout().is_terminal(),
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self { color: false }
    }

    #[must_use]
    pub const fn color_enabled(self) -> bool {
        self.color
    }

    pub fn print_banner(self) {
        let title = format!(
            "dnsstress v{} | {} | DNS stress testing",
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_LICENSE")
        );
        if self.color {
            println!(
                "{}",
                title.with(Color::Rgb {
                    r: TITLE_RGB.0,
                    g: TITLE_RGB.1,
                    b: TITLE_RGB.2
                })
            );
        } else {
            println!("{title}");
        }
        println!();
    }

    pub fn print_header(self, config: &StressConfig, domains: &[String]) {
        let destination = destination_line(&config.destination);
        if self.color {
            println!("{}", destination.bold());
        } else {
            println!("{destination}");
        }
        println!("{}", domains_line(domains));
        println!();
    }

    pub fn print_preflight_warning(self) {
        let message = "Could not resolve some domains you provided, you may receive only errors.";
        if self.color {
            println!("{} {}", " WARNING ".black().on_yellow(), message);
        } else {
            println!("[WARNING] {message}");
        }
    }

    pub fn print_started(self, workers: usize, flood: bool) {
        let line = started_line(workers);
        if self.color {
            println!("{}", line.dim());
        } else {
            println!("{line}");
        }
        if flood {
            println!("Flooding mode, nothing will be printed.");
        }
    }

    pub fn print_report(self, report: &IntervalReport) {
        let line = report_line(report);
        if self.color && report.errors > 0 {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }

    pub fn print_summary(
        self,
        config: &StressConfig,
        totals: &RunTotals,
        flood_dispatched: Option<u64>,
    ) {
        println!();
        for line in summary_lines(config, totals, flood_dispatched) {
            println!("{line}");
        }
    }
}

/// Prints every interval report until the collector drops its sender.
#[must_use]
pub fn spawn_report_printer(
    style: ConsoleStyle,
    mut report_rx: mpsc::UnboundedReceiver<IntervalReport>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(report) = report_rx.recv().await {
            style.print_report(&report);
        }
    })
}
