//! # Copyright Policy Module
//!
//! This module decides whether a copyright string may be edited and computes
//! its updated text. Both handlers share one [`CopyrightPolicy`] so a
//! `<Copyright>` element and an `AssemblyCopyright` attribute are treated the
//! same way.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Matches a standalone run of four digits.
static YEAR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{4}\b").expect("year regex must compile"));

/// Owner-name filters and the target year for one run.
#[derive(Debug, Clone)]
pub struct CopyrightPolicy {
  /// The year written over the rightmost year in a copyright string
  year: String,

  /// If any of these occur in the copyright string, it is left alone
  excluded_names: Vec<String>,

  /// If non-empty, at least one of these must occur in the copyright string
  included_names: Vec<String>,
}

impl CopyrightPolicy {
  /// Creates a policy that rewrites years to `year`.
  ///
  /// # Parameters
  ///
  /// * `year` - The target year
  /// * `excluded_names` - Owner-name substrings that forbid editing
  /// * `included_names` - Owner-name substrings required for editing; an empty list allows every owner
  pub fn new(year: u32, excluded_names: Vec<String>, included_names: Vec<String>) -> Self {
    Self {
      year: year.to_string(),
      excluded_names,
      included_names,
    }
  }

  /// Checks whether the owner filters allow `copyright` to be edited.
  ///
  /// Matching is a case-sensitive substring search. An excluded name always
  /// wins over an included one.
  pub fn is_editable(&self, copyright: &str) -> bool {
    if self.excluded_names.iter().any(|name| copyright.contains(name.as_str())) {
      return false;
    }

    self.included_names.is_empty() || self.included_names.iter().any(|name| copyright.contains(name.as_str()))
  }

  /// Replaces the rightmost four-digit year in `copyright` with the target
  /// year.
  ///
  /// Earlier years, such as the start of a `2015-2023` range, are kept. Text
  /// without a four-digit run is returned borrowed and unchanged.
  pub fn replace_year<'a>(&self, copyright: &'a str) -> Cow<'a, str> {
    let Some(last) = YEAR_REGEX.find_iter(copyright).last() else {
      return Cow::Borrowed(copyright);
    };

    if last.as_str() == self.year {
      return Cow::Borrowed(copyright);
    }

    let mut updated = String::with_capacity(copyright.len());
    updated.push_str(&copyright[..last.start()]);
    updated.push_str(&self.year);
    updated.push_str(&copyright[last.end()..]);
    Cow::Owned(updated)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn policy(excluded: &[&str], included: &[&str]) -> CopyrightPolicy {
    CopyrightPolicy::new(
      2024,
      excluded.iter().map(|s| s.to_string()).collect(),
      included.iter().map(|s| s.to_string()).collect(),
    )
  }

  #[test]
  fn test_replace_single_year() {
    let policy = policy(&[], &[]);
    assert_eq!(
      policy.replace_year("Copyright © 2019 Ben Hutchison"),
      "Copyright © 2024 Ben Hutchison"
    );
  }

  #[test]
  fn test_replace_only_rightmost_year() {
    let policy = policy(&[], &[]);
    assert_eq!(policy.replace_year("© 2015-2019 Acme, est. 1999"), "© 2015-2019 Acme, est. 2024");
    assert_eq!(policy.replace_year("Copyright 2015-2019 Acme"), "Copyright 2015-2024 Acme");
  }

  #[test]
  fn test_no_year_is_unchanged() {
    let policy = policy(&[], &[]);
    let text = "Copyright Acme Corporation";
    let updated = policy.replace_year(text);
    assert!(matches!(updated, Cow::Borrowed(_)));
    assert_eq!(updated, text);
  }

  #[test]
  fn test_longer_digit_runs_are_not_years() {
    let policy = policy(&[], &[]);
    assert_eq!(policy.replace_year("Build 123456 by Acme"), "Build 123456 by Acme");
    assert_eq!(policy.replace_year("v20191 (c) 2020"), "v20191 (c) 2024");
  }

  #[test]
  fn test_year_already_current_borrows() {
    let policy = policy(&[], &[]);
    let updated = policy.replace_year("Copyright 2024 Acme");
    assert!(matches!(updated, Cow::Borrowed(_)));
  }

  #[test]
  fn test_year_adjacent_to_symbol() {
    let policy = policy(&[], &[]);
    assert_eq!(policy.replace_year("©2020 Acme"), "©2024 Acme");
  }

  #[test]
  fn test_editable_without_filters() {
    assert!(policy(&[], &[]).is_editable("Copyright © 2019 Ben Hutchison"));
  }

  #[test]
  fn test_excluded_name_forbids_edit() {
    let policy = policy(&["Ben Hutchison"], &[]);
    assert!(!policy.is_editable("Copyright © 2019 Ben Hutchison"));
    assert!(policy.is_editable("Copyright © 2019 Acme"));
  }

  #[test]
  fn test_included_name_required() {
    let policy = policy(&[], &["Acme", "Initech"]);
    assert!(policy.is_editable("Copyright 2019 Initech"));
    assert!(!policy.is_editable("Copyright 2019 Ben Hutchison"));
  }

  #[test]
  fn test_exclusion_wins_over_inclusion() {
    let policy = policy(&["Subsidiary"], &["Acme"]);
    assert!(!policy.is_editable("Copyright 2019 Acme Subsidiary"));
  }

  #[test]
  fn test_name_matching_is_case_sensitive() {
    let policy = policy(&["acme"], &[]);
    assert!(policy.is_editable("Copyright 2019 Acme"));
  }
}
