//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing.

mod update;

use std::sync::LazyLock;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
pub use update::{UpdateArgs, run_update};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Version with the commit it was built from, when known.
static LONG_VERSION: LazyLock<String> = LazyLock::new(|| {
  let version = env!("CARGO_PKG_VERSION");
  match (option_env!("GIT_HASH"), option_env!("GIT_DATE")) {
    (Some(hash), Some(date)) if !hash.is_empty() => format!("{version} ({hash} {date})"),
    _ => version.to_string(),
  }
});

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  name = "copywriter",
  author,
  version,
  long_version = LONG_VERSION.as_str(),
  about = "Update copyright years in project sources. Handles .NET SDK-style .csproj files and .NET AssemblyInfo.cs files.",
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Update copyright year for the .csproj file in the current directory
  copywriter

  # Preview changes, but don't write them
  copywriter --dry-run

  # Update copyright year in the current directory and 2 levels of subdirectories
  copywriter --max-depth 2

  # Update all projects with a copyright owner of Ben Hutchison
  copywriter -d 3 --include-name \"Ben Hutchison\" ~/Documents/Projects

  # Skip build output and vendored code
  copywriter -d 5 --exclude-dir bin --exclude-dir obj --exclude-dir vendor
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub update_args: UpdateArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_parse_all_options() {
    let cli = Cli::try_parse_from([
      "copywriter",
      "-n",
      "-d",
      "3",
      "-y",
      "2031",
      "--exclude-dir",
      "bin",
      "--exclude-dir",
      "obj",
      "--exclude-name",
      "Contoso",
      "--include-name",
      "Ben Hutchison",
      "projects",
    ])
    .expect("arguments should parse");

    let args = cli.update_args;
    assert!(args.dry_run);
    assert_eq!(args.max_depth, Some(3));
    assert_eq!(args.year, Some(2031));
    assert_eq!(args.exclude_dir, vec!["bin", "obj"]);
    assert_eq!(args.exclude_name, vec!["Contoso"]);
    assert_eq!(args.include_name, vec!["Ben Hutchison"]);
    assert_eq!(args.dir.as_deref(), Some(std::path::Path::new("projects")));
  }

  #[test]
  fn test_defaults() {
    let cli = Cli::try_parse_from(["copywriter"]).expect("no arguments should parse");

    let args = cli.update_args;
    assert!(!args.dry_run);
    assert_eq!(args.max_depth, None);
    assert_eq!(args.year, None);
    assert!(args.dir.is_none());
    assert_eq!(args.verbose, 0);
  }

  #[test]
  fn test_unknown_flag_is_rejected() {
    assert!(Cli::try_parse_from(["copywriter", "--frobnicate"]).is_err());
  }

  #[test]
  fn test_year_must_have_four_digits() {
    assert!(Cli::try_parse_from(["copywriter", "--year", "99"]).is_err());
    assert!(Cli::try_parse_from(["copywriter", "--year", "20245"]).is_err());
  }

  #[test]
  fn test_negative_depth_is_rejected() {
    assert!(Cli::try_parse_from(["copywriter", "--max-depth", "-1"]).is_err());
  }
}
