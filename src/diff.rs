//! # Diff Module
//!
//! This module renders word-level diffs of copyright changes. File tasks send
//! [`DiffRecord`]s to a single [`DiffPrinter`] task which owns stdout, so
//! blocks from different files never interleave.

use std::fmt::Write as _;
use std::path::PathBuf;

use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::output::format_count;

/// A single copyright change, ready to be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRecord {
  /// File the change was made in
  pub path: PathBuf,

  /// 1-based line on which the changed element or attribute starts
  pub line: usize,

  /// Text before the change
  pub old: String,

  /// Text after the change
  pub new: String,
}

/// Channel end used by file tasks to hand diffs to the printer.
pub type DiffSender = mpsc::UnboundedSender<DiffRecord>;

/// Renders a diff block: a `path:line` header, the word diff, and a blank
/// separator line.
///
/// Removed words are red and added words green when stdout supports color.
pub fn render_diff(record: &DiffRecord) -> String {
  let mut block = String::new();
  let _ = writeln!(block, "{}:{}", record.path.display(), format_count(record.line));

  let diff = TextDiff::from_words(record.old.as_str(), record.new.as_str());
  for change in diff.iter_all_changes() {
    let word = change.value();
    match change.tag() {
      ChangeTag::Delete => {
        let _ = write!(block, "{}", word.if_supports_color(Stream::Stdout, |w| w.red()));
      }
      ChangeTag::Insert => {
        let _ = write!(block, "{}", word.if_supports_color(Stream::Stdout, |w| w.green()));
      }
      ChangeTag::Equal => {
        let _ = write!(block, "{}", word.if_supports_color(Stream::Stdout, |w| w.bright_black()));
      }
    }
  }

  block.push_str("\n\n");
  block
}

/// The task that prints diff blocks in the order they are received.
pub struct DiffPrinter {
  handle: JoinHandle<()>,
}

impl DiffPrinter {
  /// Spawns the printer and returns the sender file tasks use to reach it.
  ///
  /// With `quiet` set, records are received and dropped.
  pub fn spawn(quiet: bool) -> (DiffSender, Self) {
    let (sender, mut receiver) = mpsc::unbounded_channel::<DiffRecord>();

    let handle = tokio::spawn(async move {
      while let Some(record) = receiver.recv().await {
        if !quiet {
          print!("{}", render_diff(&record));
        }
      }
    });

    (sender, Self { handle })
  }

  /// Waits until every record has been printed.
  ///
  /// This returns once all senders have been dropped and the channel drains.
  pub async fn finish(self) {
    if let Err(e) = self.handle.await {
      warn!("Diff printer stopped unexpectedly: {}", e);
    }
  }

  /// Stops printing immediately, discarding records not yet printed.
  pub fn abort(self) {
    self.handle.abort();
  }
}
