//! # Processor Module
//!
//! This module contains the core functionality for finding project files and
//! rewriting the year in their copyright strings.
//!
//! The module is organized into several submodules:
//! - [`file_collector`] - Directory traversal and file classification
//! - [`file_handler`] - The read, rewrite, report and write pipeline for one file
//! - [`project_file`] - `<Copyright>` elements in `.csproj` files
//! - [`assembly_info`] - `AssemblyCopyright` attributes in `AssemblyInfo.cs` files
//! - [`copyright_policy`] - Owner filters and year substitution
//! - [`file_io`] - Cancellation-aware file reading and writing
//! - [`cancellation`] - The cancellation signal shared by file tasks
//!
//! The [`Processor`] struct is the main entry point, fanning out one task per
//! file and folding their outcomes into [`RunTotals`].

pub mod assembly_info;
pub mod cancellation;
pub mod copyright_policy;
pub mod file_collector;
mod file_handler;
pub mod file_io;
pub mod project_file;
pub mod rewrite;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
pub use cancellation::Cancellation;
pub use copyright_policy::CopyrightPolicy;
pub use file_collector::{FileCollector, ProjectFileKind};
use file_handler::FileHandler;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::diff::DiffSender;
use crate::output::print_file_error;

/// Marker error for a run that was stopped by the cancellation signal.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("operation cancelled")]
pub struct Cancelled;

/// What happened to a single file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileOutcome {
  /// Number of copyright strings whose year changed
  pub replacements: usize,

  /// Whether the file was (or in dry-run mode, would have been) rewritten
  pub changed: bool,
}

/// Totals for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTotals {
  pub replacements: usize,
  pub files_changed: usize,
  pub files_failed: usize,
}

impl RunTotals {
  fn record(&mut self, outcome: FileOutcome) {
    self.replacements += outcome.replacements;
    if outcome.changed {
      self.files_changed += 1;
    }
  }
}

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub root: PathBuf,
  pub policy: CopyrightPolicy,

  // Traversal
  pub max_depth: usize,
  pub excluded_dirs: Vec<String>,

  // Behavior flags
  pub dry_run: bool,

  // Optional components
  pub diff_sender: Option<DiffSender>,
  pub cancellation: Cancellation,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and defaults for the
  /// rest: no recursion, no excluded directories, writes enabled, diffs
  /// discarded.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     dry_run: true,
  ///     ..ProcessorConfig::new(root, policy)
  /// }
  /// ```
  pub fn new(root: PathBuf, policy: CopyrightPolicy) -> Self {
    Self {
      root,
      policy,
      max_depth: 0,
      excluded_dirs: vec![],
      dry_run: false,
      diff_sender: None,
      cancellation: Cancellation::new(),
    }
  }
}

/// Processor for updating copyright years in project files.
///
/// The `Processor` is responsible for:
/// - Finding `.csproj` and `AssemblyInfo.cs` files under a root directory
/// - Processing every file concurrently, one task per file
/// - Reporting per-file failures without stopping other files
/// - Stopping promptly when the cancellation signal fires
pub struct Processor {
  /// File collector for directory traversal
  file_collector: FileCollector,

  /// Pipeline shared by all file tasks
  handler: Arc<FileHandler>,

  /// Signal shared with all file tasks
  cancellation: Cancellation,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  pub fn new(config: ProcessorConfig) -> Self {
    let file_collector = FileCollector::new(config.root, config.max_depth, &config.excluded_dirs);
    let handler = FileHandler::new(
      config.policy,
      config.dry_run,
      config.diff_sender,
      config.cancellation.clone(),
    );

    Self {
      file_collector,
      handler: Arc::new(handler),
      cancellation: config.cancellation,
    }
  }

  /// Collects the files a run would process, sorted by path.
  pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
    self.file_collector.collect()
  }

  /// Finds and processes every project file under the root.
  ///
  /// # Errors
  ///
  /// Returns an error if the root cannot be searched, or [`Cancelled`] if the
  /// run was cancelled. Failures of individual files are printed and counted
  /// in [`RunTotals::files_failed`] instead.
  pub async fn process(&self) -> Result<RunTotals> {
    let files = self.collect_files()?;
    self.process_files(files).await
  }

  /// Processes the given files concurrently, one task per file.
  ///
  /// Files that were already written when the run is cancelled keep their
  /// new content.
  pub async fn process_files(&self, files: Vec<PathBuf>) -> Result<RunTotals> {
    debug!(
      "Processing {} files under {}",
      files.len(),
      self.file_collector.root().display()
    );
    let process_start = std::time::Instant::now();

    let mut tasks = JoinSet::new();
    for path in files {
      let handler = Arc::clone(&self.handler);
      tasks.spawn(async move {
        let result = handler.process_file(&path).await;
        (path, result)
      });
    }

    let mut totals = RunTotals::default();
    let mut cancelled = false;

    while let Some(joined) = tasks.join_next().await {
      match joined {
        Ok((_, Ok(outcome))) => totals.record(outcome),
        Ok((_, Err(e))) if e.is::<Cancelled>() => cancelled = true,
        Ok((path, Err(e))) => {
          print_file_error(&path, &e);
          totals.files_failed += 1;
        }
        Err(e) => {
          warn!("File task stopped unexpectedly: {}", e);
          totals.files_failed += 1;
        }
      }
    }

    debug!(
      "Processed files in {}ms: {:?}",
      process_start.elapsed().as_millis(),
      totals
    );

    if cancelled || self.cancellation.is_cancelled() {
      return Err(Cancelled.into());
    }

    Ok(totals)
  }

  /// Processes a single file, dispatching on its name.
  pub async fn process_file(&self, path: &Path) -> Result<FileOutcome> {
    self.handler.process_file(path).await
  }
}
