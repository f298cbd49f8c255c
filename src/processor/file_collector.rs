//! # File Collector Module
//!
//! This module finds the project files under a root directory and decides
//! which handler each one belongs to.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// Extension of MSBuild project files.
const PROJECT_FILE_EXTENSION: &str = "csproj";

/// File name of assembly metadata source files.
const ASSEMBLY_INFO_FILE_NAME: &str = "AssemblyInfo.cs";

/// The kinds of file that carry a copyright string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFileKind {
  /// A `.csproj` file with `<Copyright>` elements
  BuildDescriptor,
  /// An `AssemblyInfo.cs` file with `AssemblyCopyright` attributes
  AssemblyInfo,
}

impl ProjectFileKind {
  /// Classifies `path` by its extension or file name, ignoring ASCII case.
  ///
  /// Returns `None` for any other file.
  pub fn from_path(path: &Path) -> Option<Self> {
    if path
      .extension()
      .and_then(|ext| ext.to_str())
      .is_some_and(|ext| ext.eq_ignore_ascii_case(PROJECT_FILE_EXTENSION))
    {
      return Some(Self::BuildDescriptor);
    }

    if path
      .file_name()
      .and_then(|name| name.to_str())
      .is_some_and(|name| name.eq_ignore_ascii_case(ASSEMBLY_INFO_FILE_NAME))
    {
      return Some(Self::AssemblyInfo);
    }

    None
  }
}

/// File collector for a single root directory.
///
/// The `FileCollector` handles:
/// - Limiting how many levels of subdirectories are visited
/// - Pruning subdirectories whose name is excluded
/// - Keeping only files that a handler can process
pub struct FileCollector {
  /// Directory to search
  root: PathBuf,

  /// Levels of subdirectories to descend into; 0 searches only `root`
  max_depth: usize,

  /// Directory names to skip, lowercased
  excluded_dirs: Vec<String>,
}

impl FileCollector {
  /// Creates a new FileCollector.
  ///
  /// # Parameters
  ///
  /// * `root` - The directory to search
  /// * `max_depth` - Levels of subdirectories to search below `root`
  /// * `excluded_dirs` - Directory names to skip, compared case-insensitively against each directory below `root`
  pub fn new(root: PathBuf, max_depth: usize, excluded_dirs: &[String]) -> Self {
    Self {
      root,
      max_depth,
      excluded_dirs: excluded_dirs.iter().map(|name| name.to_lowercase()).collect(),
    }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Collects every project file under the root, sorted by path.
  ///
  /// Symbolic links to directories are not followed, but symbolic links to
  /// files are returned. Directories that cannot be read are skipped with a
  /// warning.
  ///
  /// # Errors
  ///
  /// Returns an error if the root does not exist or is not a directory.
  pub fn collect(&self) -> Result<Vec<PathBuf>> {
    if !self.root.is_dir() {
      bail!("Directory not found: {}", self.root.display());
    }

    debug!("Scanning directory: {}", self.root.display());
    let start_time = std::time::Instant::now();

    let walker = WalkDir::new(&self.root)
      .min_depth(1)
      .max_depth(self.max_depth.saturating_add(1))
      .follow_links(false)
      .sort_by_file_name()
      .into_iter()
      .filter_entry(|entry| !self.is_excluded_dir(entry));

    let mut files = Vec::new();
    for entry in walker {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          warn!("Skipping unreadable entry: {}", e);
          continue;
        }
      };

      // Symlinks to files are candidates; symlinks to directories are never entered.
      let is_file = entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file());
      if !is_file {
        continue;
      }

      if ProjectFileKind::from_path(entry.path()).is_some() {
        trace!("Found project file: {}", entry.path().display());
        files.push(entry.into_path());
      }
    }

    files.sort();

    debug!(
      "Found {} project files in {}ms",
      files.len(),
      start_time.elapsed().as_millis()
    );

    Ok(files)
  }

  fn is_excluded_dir(&self, entry: &DirEntry) -> bool {
    if self.excluded_dirs.is_empty() || entry.depth() == 0 || !entry.file_type().is_dir() {
      return false;
    }

    let Some(name) = entry.file_name().to_str() else {
      return false;
    };

    let excluded = self.excluded_dirs.contains(&name.to_lowercase());
    if excluded {
      trace!("Skipping excluded directory: {}", entry.path().display());
    }
    excluded
  }
}
