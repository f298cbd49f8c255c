//! # Project File Module
//!
//! Rewrites `<Copyright>` elements in MSBuild project files (`.csproj`).
//!
//! The document is parsed with `quick-xml` to locate elements and to reject
//! malformed markup, but the rewrite itself splices new values into the
//! original text. Everything outside a changed value, including the presence
//! of an XML declaration, indentation and line endings, is kept byte-for-byte.

use std::ops::Range;

use quick_xml::Reader;
use quick_xml::escape::{partial_escape, resolve_predefined_entity, unescape};
use quick_xml::events::{BytesRef, Event};

use super::copyright_policy::CopyrightPolicy;
use super::rewrite::{CopyrightChange, Rewrite, line_number_at};

const COPYRIGHT_ELEMENT: &[u8] = b"Copyright";
const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";

/// Error type for project files that are not well-formed XML.
#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
  /// The XML parser rejected the document.
  #[error("malformed XML at byte {position}: {message}")]
  Syntax { position: usize, message: String },

  /// Character data inside a `<Copyright>` element has a bad entity reference.
  #[error("invalid character data in <Copyright> on line {line}: {message}")]
  CharacterData { line: usize, message: String },

  /// An entity reference is neither predefined nor a valid character reference.
  #[error("undefined entity reference '&{name};' on line {line}")]
  UnknownEntity { line: usize, name: String },

  /// The element structure is incomplete.
  #[error("malformed XML: {0}")]
  Structure(&'static str),
}

/// How the first child of a `<Copyright>` element is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharacterData {
  /// Text, possibly with entity or character references
  Text { escaped: bool },
  /// The inside of a CDATA section
  CData,
}

/// The first child of a `<Copyright>` element, when it is character data.
#[derive(Debug)]
struct CopyrightNode {
  line: usize,
  span: Range<usize>,
  value: String,
  kind: CharacterData,
}

/// Rewrites the year of every editable `<Copyright>` element in `document`.
///
/// # Errors
///
/// Returns a [`MarkupError`] if `document` is not well-formed. In that case no
/// element is rewritten.
pub fn rewrite_project_file(document: &str, policy: &CopyrightPolicy) -> Result<Rewrite, MarkupError> {
  let nodes = find_copyright_nodes(document)?;

  let mut content = String::with_capacity(document.len());
  let mut changes = Vec::new();
  let mut cursor = 0;

  for node in nodes {
    if !policy.is_editable(&node.value) {
      continue;
    }

    let new_value = policy.replace_year(&node.value);
    if new_value == node.value.as_str() {
      continue;
    }

    content.push_str(&document[cursor..node.span.start]);
    match node.kind {
      CharacterData::Text { escaped: true } => content.push_str(&partial_escape(&*new_value)),
      CharacterData::Text { escaped: false } | CharacterData::CData => content.push_str(&new_value),
    }
    cursor = node.span.end;

    changes.push(CopyrightChange {
      line: node.line,
      old: node.value.clone(),
      new: new_value.into_owned(),
    });
  }

  content.push_str(&document[cursor..]);

  Ok(Rewrite { content, changes })
}

/// Parses the whole document and collects the character data that starts each
/// `<Copyright>` element.
fn find_copyright_nodes(document: &str) -> Result<Vec<CopyrightNode>, MarkupError> {
  let mut reader = Reader::from_str(document);
  let mut nodes = Vec::new();
  let mut depth = 0usize;
  let mut seen_root = false;

  loop {
    let event = reader.read_event().map_err(|e| MarkupError::Syntax {
      position: reader.error_position() as usize,
      message: e.to_string(),
    })?;

    match event {
      Event::Start(start) => {
        if depth == 0 && seen_root {
          return Err(MarkupError::Structure("multiple root elements"));
        }
        seen_root = true;
        depth += 1;

        if start.name().as_ref() == COPYRIGHT_ELEMENT {
          let tag_end = reader.buffer_position() as usize;
          if let Some(node) = first_character_data(document, tag_end)? {
            nodes.push(node);
          }
        }
      }
      Event::Empty(_) => {
        if depth == 0 && seen_root {
          return Err(MarkupError::Structure("multiple root elements"));
        }
        seen_root = true;
      }
      Event::End(_) => {
        depth = depth.saturating_sub(1);
      }
      Event::Text(text) if depth == 0 => {
        if !text.iter().all(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n')) {
          return Err(MarkupError::Structure("text outside the root element"));
        }
      }
      Event::CData(_) if depth == 0 => {
        return Err(MarkupError::Structure("CDATA section outside the root element"));
      }
      Event::GeneralRef(reference) => {
        if depth == 0 {
          return Err(MarkupError::Structure("entity reference outside the root element"));
        }
        check_reference(document, reader.buffer_position() as usize, &reference)?;
      }
      Event::Eof => break,
      _ => {}
    }
  }

  if !seen_root {
    return Err(MarkupError::Structure("root element is missing"));
  }
  if depth != 0 {
    return Err(MarkupError::Structure("unexpected end of document inside an element"));
  }

  Ok(nodes)
}

/// Accepts the five predefined entities and character references that name a
/// valid character. Documents cannot declare their own entities here.
fn check_reference(document: &str, end: usize, reference: &BytesRef<'_>) -> Result<(), MarkupError> {
  let known = match reference.resolve_char_ref() {
    Ok(Some(_)) => true,
    Ok(None) => std::str::from_utf8(reference)
      .ok()
      .and_then(resolve_predefined_entity)
      .is_some(),
    Err(_) => false,
  };

  if known {
    return Ok(());
  }

  Err(MarkupError::UnknownEntity {
    line: line_number_at(document, end),
    name: String::from_utf8_lossy(reference).into_owned(),
  })
}

/// Reads the character data that immediately follows a start tag ending at
/// `tag_end`.
///
/// Returns `None` when the element's first child is not character data, for
/// example a comment, a nested element, or the end tag of an empty element.
fn first_character_data(document: &str, tag_end: usize) -> Result<Option<CopyrightNode>, MarkupError> {
  let tag_start = document[..tag_end].rfind('<').unwrap_or(0);
  let line = line_number_at(document, tag_start);
  let rest = &document[tag_end..];

  if rest.starts_with(CDATA_OPEN) {
    let start = tag_end + CDATA_OPEN.len();
    let Some(len) = document[start..].find(CDATA_CLOSE) else {
      return Err(MarkupError::Structure("unterminated CDATA section"));
    };
    return Ok(Some(CopyrightNode {
      line,
      span: start..start + len,
      value: document[start..start + len].to_string(),
      kind: CharacterData::CData,
    }));
  }

  let text_len = rest.find('<').unwrap_or(rest.len());
  if text_len == 0 {
    return Ok(None);
  }

  let raw = &rest[..text_len];
  let value = unescape(raw).map_err(|e| MarkupError::CharacterData {
    line,
    message: e.to_string(),
  })?;

  Ok(Some(CopyrightNode {
    line,
    span: tag_end..tag_end + text_len,
    value: value.into_owned(),
    kind: CharacterData::Text {
      escaped: raw.contains('&'),
    },
  }))
}
