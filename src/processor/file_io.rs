//! # File I/O Module
//!
//! This module provides the asynchronous, cancellation-aware file reads and
//! writes used by the processor.

use std::path::Path;

use anyhow::{Context, Result};

use super::Cancelled;
use super::cancellation::Cancellation;

/// The UTF-8 byte order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decoded file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
  /// Content without the byte order mark
  pub text: String,

  /// Whether the file started with a UTF-8 byte order mark
  pub has_bom: bool,
}

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Reads a file as UTF-8, remembering and stripping a leading byte order
  /// mark.
  ///
  /// The read races the cancellation signal.
  ///
  /// # Errors
  ///
  /// Returns [`Cancelled`] if the run is cancelled before or during the read,
  /// or an error if the file cannot be read or is not valid UTF-8.
  pub async fn read(path: &Path, cancellation: &Cancellation) -> Result<SourceText> {
    if cancellation.is_cancelled() {
      return Err(Cancelled.into());
    }

    let bytes = tokio::select! {
      biased;
      () = cancellation.cancelled() => return Err(Cancelled.into()),
      bytes = tokio::fs::read(path) => bytes.with_context(|| format!("Failed to read file: {}", path.display()))?,
    };

    decode(bytes).with_context(|| format!("Failed to decode file as UTF-8: {}", path.display()))
  }

  /// Writes `source` back to `path`, restoring its byte order mark.
  ///
  /// # Errors
  ///
  /// Returns [`Cancelled`] if the run was cancelled before the write started.
  /// A write that has started is allowed to finish.
  pub async fn write(path: &Path, source: &SourceText, cancellation: &Cancellation) -> Result<()> {
    if cancellation.is_cancelled() {
      return Err(Cancelled.into());
    }

    let mut bytes = Vec::with_capacity(source.text.len() + UTF8_BOM.len());
    if source.has_bom {
      bytes.extend_from_slice(UTF8_BOM);
    }
    bytes.extend_from_slice(source.text.as_bytes());

    tokio::fs::write(path, bytes)
      .await
      .with_context(|| format!("Failed to write file: {}", path.display()))
  }
}

fn decode(mut bytes: Vec<u8>) -> Result<SourceText, std::string::FromUtf8Error> {
  let has_bom = bytes.starts_with(UTF8_BOM);
  if has_bom {
    bytes.drain(..UTF8_BOM.len());
  }

  Ok(SourceText {
    text: String::from_utf8(bytes)?,
    has_bom,
  })
}
