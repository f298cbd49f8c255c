//! # Assembly Info Module
//!
//! Rewrites `[assembly: AssemblyCopyright("...")]` attributes in
//! `AssemblyInfo.cs` source files.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::copyright_policy::CopyrightPolicy;
use super::rewrite::{CopyrightChange, Rewrite, line_number_at};

/// Matches an assembly-level copyright attribute, which may be split across
/// lines and may use the fully-qualified `System.Reflection` name.
static ATTRIBUTE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r#"(?s)(?P<prefix>\[\s*assembly\s*:\s*(?:System\s*\.\s*Reflection\s*\.\s*)?AssemblyCopyright\s*\(\s*")(?P<value>.*?)(?P<suffix>"\s*\)\s*\])"#,
  )
  .expect("assembly copyright regex must compile")
});

/// Rewrites the year of every editable `AssemblyCopyright` attribute in
/// `source`.
///
/// The text around each string literal is copied through untouched, and all
/// offsets refer to the original `source`, so the rewrite is a single pass.
pub fn rewrite_assembly_info(source: &str, policy: &CopyrightPolicy) -> Rewrite {
  let mut content = String::with_capacity(source.len());
  let mut changes = Vec::new();
  let mut cursor = 0;

  for caps in ATTRIBUTE_REGEX.captures_iter(source) {
    let Some(whole) = caps.get(0) else {
      continue;
    };
    let old_value = &caps["value"];

    content.push_str(&source[cursor..whole.start()]);
    cursor = whole.end();

    if !policy.is_editable(old_value) {
      content.push_str(whole.as_str());
      continue;
    }

    let new_value = policy.replace_year(old_value);
    if new_value == old_value {
      content.push_str(whole.as_str());
      continue;
    }

    let replacement = rebuild_attribute(&caps, &new_value);
    changes.push(CopyrightChange {
      line: line_number_at(source, whole.start()),
      old: whole.as_str().to_string(),
      new: replacement.clone(),
    });
    content.push_str(&replacement);
  }

  content.push_str(&source[cursor..]);

  Rewrite { content, changes }
}

fn rebuild_attribute(caps: &Captures<'_>, value: &str) -> String {
  format!("{}{}{}", &caps["prefix"], value, &caps["suffix"])
}

#[cfg(test)]
mod tests {
  use super::*;

  fn policy() -> CopyrightPolicy {
    CopyrightPolicy::new(2025, vec![], vec![])
  }

  #[test]
  fn test_rewrite_simple_attribute() {
    let source = "using System.Reflection;\n\n[assembly: AssemblyCopyright(\"Copyright © 2020 Acme\")]\n";
    let rewrite = rewrite_assembly_info(source, &policy());

    assert_eq!(
      rewrite.content,
      "using System.Reflection;\n\n[assembly: AssemblyCopyright(\"Copyright © 2025 Acme\")]\n"
    );
    assert_eq!(rewrite.changes.len(), 1);
    assert_eq!(rewrite.changes[0].line, 3);
    assert_eq!(
      rewrite.changes[0].old,
      "[assembly: AssemblyCopyright(\"Copyright © 2020 Acme\")]"
    );
    assert_eq!(
      rewrite.changes[0].new,
      "[assembly: AssemblyCopyright(\"Copyright © 2025 Acme\")]"
    );
  }

  #[test]
  fn test_rewrite_qualified_multiline_attribute() {
    let source = "[ assembly :\r\n    System . Reflection . AssemblyCopyright (\r\n  \"(c) 2019 Acme\" ) ]\r\n";
    let rewrite = rewrite_assembly_info(source, &policy());

    assert_eq!(
      rewrite.content,
      "[ assembly :\r\n    System . Reflection . AssemblyCopyright (\r\n  \"(c) 2025 Acme\" ) ]\r\n"
    );
    assert_eq!(rewrite.changes[0].line, 1);
  }

  #[test]
  fn test_rewrite_multiple_attributes_in_one_pass() {
    let source = concat!(
      "[assembly: AssemblyTitle(\"Demo\")]\n",
      "[assembly: AssemblyCopyright(\"© 2018 Acme\")]\n",
      "#if DEBUG\n",
      "[assembly: AssemblyCopyright(\"© 2019 Acme Debug\")]\n",
      "#endif\n",
    );
    let rewrite = rewrite_assembly_info(source, &policy());

    assert_eq!(
      rewrite.content,
      concat!(
        "[assembly: AssemblyTitle(\"Demo\")]\n",
        "[assembly: AssemblyCopyright(\"© 2025 Acme\")]\n",
        "#if DEBUG\n",
        "[assembly: AssemblyCopyright(\"© 2025 Acme Debug\")]\n",
        "#endif\n",
      )
    );
    let lines: Vec<usize> = rewrite.changes.iter().map(|c| c.line).collect();
    assert_eq!(lines, vec![2, 4]);
  }

  #[test]
  fn test_only_changed_attributes_are_reported() {
    let source = "[assembly: AssemblyCopyright(\"© 2025 Acme\")]\n[assembly: AssemblyCopyright(\"© 2020 Acme\")]\n";
    let rewrite = rewrite_assembly_info(source, &policy());

    assert_eq!(rewrite.changes.len(), 1);
    assert_eq!(rewrite.changes[0].line, 2);
  }

  #[test]
  fn test_excluded_owner_is_left_alone() {
    let policy = CopyrightPolicy::new(2025, vec!["Acme".to_string()], vec![]);
    let source = "[assembly: AssemblyCopyright(\"© 2020 Acme\")]";
    let rewrite = rewrite_assembly_info(source, &policy);

    assert!(!rewrite.is_changed());
    assert_eq!(rewrite.content, source);
  }

  #[test]
  fn test_no_attribute_returns_source() {
    let source = "[assembly: AssemblyVersion(\"1.0.2020.0\")]\n";
    let rewrite = rewrite_assembly_info(source, &policy());

    assert!(!rewrite.is_changed());
    assert_eq!(rewrite.content, source);
  }

  #[test]
  fn test_empty_literal_is_unchanged() {
    let source = "[assembly: AssemblyCopyright(\"\")]";
    let rewrite = rewrite_assembly_info(source, &policy());

    assert!(!rewrite.is_changed());
    assert_eq!(rewrite.content, source);
  }
}
