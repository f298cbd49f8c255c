//! Result types shared by the project-file and assembly-info handlers.

/// One copyright string whose year was rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyrightChange {
  /// 1-based line on which the element or attribute starts
  pub line: usize,

  /// The text before the rewrite
  pub old: String,

  /// The text after the rewrite
  pub new: String,
}

/// The outcome of running a handler over a file's content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewrite {
  /// The full file content with every change applied
  pub content: String,

  /// Changes in document order
  pub changes: Vec<CopyrightChange>,
}

impl Rewrite {
  /// Whether any copyright string changed.
  pub const fn is_changed(&self) -> bool {
    !self.changes.is_empty()
  }
}

/// Returns the 1-based line number of byte `offset` in `text`.
pub fn line_number_at(text: &str, offset: usize) -> usize {
  text.as_bytes()[..offset.min(text.len())]
    .iter()
    .filter(|&&b| b == b'\n')
    .count()
    + 1
}
