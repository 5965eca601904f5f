//! Result reporting with colored output and expected/actual diffs.

use difference::Changeset;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::host::{CaseReport, CaseStatus};

// Color constants for terminal output
const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";

/// Configuration for report rendering.
pub struct ReportConfig {
    pub use_colors: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stderr),
        }
    }
}

impl ReportConfig {
    /// Apply color formatting to text if colors are enabled.
    pub fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }
}

/// Partition reports by outcome: (passed, failed, skipped).
pub fn partition_reports(reports: &[CaseReport]) -> (usize, usize, usize) {
    let passed = reports
        .iter()
        .filter(|r| matches!(r.status, CaseStatus::Pass))
        .count();
    let failed = reports
        .iter()
        .filter(|r| matches!(r.status, CaseStatus::Fail(_)))
        .count();
    let skipped = reports
        .iter()
        .filter(|r| matches!(r.status, CaseStatus::Skipped(_)))
        .count();
    (passed, failed, skipped)
}

/// Print every report plus a summary line; failures go to stderr with a
/// diff when the assertion captured both sides.
pub fn report_results(reports: &[CaseReport], config: &ReportConfig) {
    for report in reports {
        match &report.status {
            CaseStatus::Pass => println!(
                "{}: {} [{}]",
                config.colorize("PASS", GREEN),
                report.name,
                report.group
            ),
            CaseStatus::Fail(_) => print_failure(report, config),
            CaseStatus::Skipped(reason) => println!(
                "{}: {} [{}] ({})",
                config.colorize("SKIP", YELLOW),
                report.name,
                report.group,
                reason
            ),
        }
    }

    let (passed, failed, skipped) = partition_reports(reports);
    println!(
        "\nCase summary: total {}, {} {}, {} {}, {} {}",
        reports.len(),
        config.colorize("passed", GREEN),
        passed,
        config.colorize("failed", RED),
        failed,
        config.colorize("skipped", YELLOW),
        skipped,
    );

    if failed > 0 {
        eprintln!("\nFailed cases:");
        for report in reports {
            if matches!(report.status, CaseStatus::Fail(_)) {
                eprintln!("  - {}", report.name);
            }
        }
    }
}

/// Print detailed failure information for a single report.
pub fn print_failure(report: &CaseReport, config: &ReportConfig) {
    let CaseStatus::Fail(error) = &report.status else {
        return;
    };
    eprintln!(
        "{}: {} [{}]",
        config.colorize("FAIL", RED),
        report.name,
        report.group
    );
    eprintln!("  Error: {}", error);
    if let Some((expected, actual)) = error.expected_actual() {
        eprintln!("  Diff:");
        print_diff(expected, actual, config);
    }
}

fn print_diff(expected: &str, actual: &str, config: &ReportConfig) {
    let choice = if config.use_colors {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(choice);
    let changeset = Changeset::new(expected, actual, "\n");
    for diff in &changeset.diffs {
        match diff {
            difference::Difference::Same(ref x) => {
                let _ = stderr.reset();
                eprintln!("   {}", x);
            }
            difference::Difference::Rem(ref x) => {
                let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
                eprintln!("  -{}", x);
            }
            difference::Difference::Add(ref x) => {
                let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                eprintln!("  +{}", x);
            }
        }
    }
    let _ = stderr.reset();
}
