//! # File Handler Module
//!
//! Runs one project file through read, rewrite, report and write.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, trace};

use super::assembly_info::rewrite_assembly_info;
use super::cancellation::Cancellation;
use super::copyright_policy::CopyrightPolicy;
use super::file_collector::ProjectFileKind;
use super::file_io::{FileIO, SourceText};
use super::project_file::rewrite_project_file;
use super::rewrite::Rewrite;
use super::{Cancelled, FileOutcome};
use crate::diff::{DiffRecord, DiffSender};

/// Per-file pipeline shared by every file task of a run.
pub struct FileHandler {
  /// Owner filters and target year
  policy: CopyrightPolicy,

  /// Whether to skip writing changed files
  dry_run: bool,

  /// Where diffs of changes are sent, if anywhere
  diff_sender: Option<DiffSender>,

  /// Signal checked before reading, parsing and writing
  cancellation: Cancellation,
}

impl FileHandler {
  pub const fn new(
    policy: CopyrightPolicy,
    dry_run: bool,
    diff_sender: Option<DiffSender>,
    cancellation: Cancellation,
  ) -> Self {
    Self {
      policy,
      dry_run,
      diff_sender,
      cancellation,
    }
  }

  /// Processes a single file.
  ///
  /// Files that are neither a project file nor an assembly info file are
  /// skipped with an empty outcome. In dry-run mode nothing is written, but
  /// every change is still computed and reported.
  ///
  /// # Errors
  ///
  /// Returns [`Cancelled`] if the run is cancelled at a check point, or an
  /// error if the file cannot be read, parsed or written.
  pub async fn process_file(&self, path: &Path) -> Result<FileOutcome> {
    let Some(kind) = ProjectFileKind::from_path(path) else {
      trace!("Skipping: {} (not a project file)", path.display());
      return Ok(FileOutcome::default());
    };

    let source = FileIO::read(path, &self.cancellation).await?;
    let rewrite = self.rewrite(kind, &source.text)?;

    if !rewrite.is_changed() {
      trace!("No changes: {}", path.display());
      return Ok(FileOutcome::default());
    }

    self.report(path, &rewrite);

    if self.dry_run {
      debug!("Dry run, not writing: {}", path.display());
    } else {
      let updated = SourceText {
        text: rewrite.content,
        has_bom: source.has_bom,
      };
      FileIO::write(path, &updated, &self.cancellation).await?;
      debug!("Updated: {}", path.display());
    }

    Ok(FileOutcome {
      replacements: rewrite.changes.len(),
      changed: true,
    })
  }

  fn rewrite(&self, kind: ProjectFileKind, text: &str) -> Result<Rewrite> {
    match kind {
      ProjectFileKind::BuildDescriptor => {
        if self.cancellation.is_cancelled() {
          return Err(Cancelled.into());
        }
        rewrite_project_file(text, &self.policy).context("Failed to parse project file")
      }
      ProjectFileKind::AssemblyInfo => Ok(rewrite_assembly_info(text, &self.policy)),
    }
  }

  fn report(&self, path: &Path, rewrite: &Rewrite) {
    let Some(sender) = &self.diff_sender else {
      return;
    };

    for change in &rewrite.changes {
      let record = DiffRecord {
        path: path.to_path_buf(),
        line: change.line,
        old: change.old.clone(),
        new: change.new.clone(),
      };
      if sender.send(record).is_err() {
        trace!("Diff printer closed, dropping diff for {}", path.display());
      }
    }
  }
}
