//! Terminal output helpers
//!
//! Thin formatting layer over the `console` crate. All user-facing status
//! output goes through here so the pipeline itself stays print-free.

use crate::boundary::BoundaryWarning;
use crate::generator::{BuildOutcome, Mode};
use console::style;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

pub fn display_boundary_warning(warning: &BoundaryWarning) {
    println!("{} {}", style("WARNING:").yellow().bold(), warning);
}

/// One-line summary of what a run produced.
pub fn display_run_summary(outcome: &BuildOutcome, output_file: &str) {
    match outcome.mode {
        Mode::Full => display_success(&format!(
            "Generated {} ({} released version{}, {} unreleased commit{})",
            output_file,
            outcome.version_count,
            plural(outcome.version_count),
            outcome.new_commit_count,
            plural(outcome.new_commit_count),
        )),
        Mode::Incremental => display_success(&format!(
            "Updated {} ({} new commit{})",
            output_file,
            outcome.new_commit_count,
            plural(outcome.new_commit_count),
        )),
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
