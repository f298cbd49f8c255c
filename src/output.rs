//! # Output Module
//!
//! This module centralizes the user-facing lines copywriter prints besides
//! diffs: the closing summary and per-file errors.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::processor::RunTotals;

/// Formats a count with `,` between groups of three digits.
pub fn format_count(count: usize) -> String {
  let digits = count.to_string();
  let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

  for (i, digit) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(digit);
  }

  grouped
}

/// Builds the closing summary line.
///
/// - In dry-run mode: "Would have made N replacements in M files."
/// - Otherwise: "Made N replacements in M files."
pub fn summary_line(totals: &RunTotals, dry_run: bool) -> String {
  format!(
    "{} {} replacements in {} files.",
    if dry_run { "Would have made" } else { "Made" },
    format_count(totals.replacements),
    format_count(totals.files_changed)
  )
}

/// Print the closing summary line to stdout.
pub fn print_summary(totals: &RunTotals, dry_run: bool) {
  println!("{}", summary_line(totals, dry_run));
}

/// Print an error for a file that could not be processed to stderr.
///
/// The full cause chain is shown so the underlying I/O or parse error is
/// visible.
pub fn print_file_error(path: &Path, error: &anyhow::Error) {
  eprintln!(
    "{} {}: {:#}",
    "Error processing".if_supports_color(Stream::Stderr, |s| s.red()),
    path.display(),
    error
  );
}
