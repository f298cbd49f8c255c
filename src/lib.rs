//! # copywriter
//!
//! A tool that updates the year in the copyright strings of .NET projects.
//!
//! `copywriter` searches a directory, optionally down to a fixed number of
//! subdirectory levels, for two kinds of file:
//!
//! * `.csproj` project files, where it rewrites `<Copyright>` elements
//! * `AssemblyInfo.cs` files, where it rewrites `[assembly: AssemblyCopyright("...")]` attributes
//!
//! In each copyright string the rightmost four-digit year is replaced. Owner
//! names can be used to include or exclude copyright strings, a dry run shows
//! what would change without writing anything, and every change is printed
//! as a colored word diff.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use copywriter::processor::{CopyrightPolicy, Processor, ProcessorConfig};
//! use std::path::PathBuf;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let policy = CopyrightPolicy::new(2025, vec![], vec!["Acme".to_string()]);
//!
//!     let processor = Processor::new(ProcessorConfig {
//!         max_depth: 2,
//!         dry_run: true,
//!         ..ProcessorConfig::new(PathBuf::from("."), policy)
//!     });
//!
//!     let totals = processor.process().await?;
//!     println!("{} replacements in {} files", totals.replacements, totals.files_changed);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Finding project files and rewriting their copyright strings
//! * [`config`] - Run configuration and the optional configuration file
//! * [`diff`] - Word diffs of each change
//! * [`output`] - Summary and error lines
//! * [`logging`] - Logging utilities for verbose output
//!
//! [`processor`]: crate::processor
//! [`config`]: crate::config
//! [`diff`]: crate::diff
//! [`output`]: crate::output
//! [`logging`]: crate::logging

pub mod config;
pub mod diff;
pub mod logging;
pub mod output;
pub mod processor;
