//! # Update Command
//!
//! This module implements the only command: find project files and bring the
//! year in their copyright strings up to date.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Args;
use copywriter::config::{CliValues, RunConfig, load_config};
use copywriter::diff::DiffPrinter;
use copywriter::logging::{ColorMode, init_tracing, is_quiet, set_quiet, set_verbose};
use copywriter::output::print_summary;
use copywriter::processor::{Cancellation, Cancelled, CopyrightPolicy, Processor, ProcessorConfig, RunTotals};
use copywriter::verbose_log;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Arguments for the update command
#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
  /// Directory in which to look for project files. Defaults to current
  /// working directory.
  #[arg(value_name = "DIR")]
  pub dir: Option<PathBuf>,

  /// Preview but don't write changes to any files.
  #[arg(short = 'n', long)]
  pub dry_run: bool,

  /// Levels of recursion for subdirectories. Defaults to only using DIR and
  /// not its subdirectories.
  #[arg(short = 'd', long, value_name = "N")]
  pub max_depth: Option<usize>,

  /// New year to set. Defaults to current year.
  #[arg(short = 'y', long, value_name = "Y", value_parser = clap::value_parser!(u32).range(1000..=9999))]
  pub year: Option<u32>,

  /// Subdirectories to ignore. Can be passed multiple times.
  #[arg(long, value_name = "D")]
  pub exclude_dir: Vec<String>,

  /// If this name appears in the copyright line, don't update the year. Can
  /// be passed multiple times.
  #[arg(long, value_name = "N")]
  pub exclude_name: Vec<String>,

  /// Only update the year if the copyright line contains one of these
  /// strings. Can be passed multiple times.
  #[arg(long, value_name = "N")]
  pub include_name: Vec<String>,

  /// Path to config file (default: .copywriter.toml in DIR)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Increase diagnostic output (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
  pub verbose: u8,

  /// Don't print diffs, only the summary
  #[arg(short, long)]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Run the update command with the given arguments
pub async fn run_update(args: UpdateArgs) -> Result<()> {
  // Initialize tracing subscriber for structured logging
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let config = resolve_config(args)?;
  debug!("Run configuration: {:?}", config);

  let cancellation = Cancellation::new();
  let interrupt_listener = listen_for_interrupt(cancellation.clone());

  let (diff_sender, diff_printer) = DiffPrinter::spawn(is_quiet());
  let processor = Processor::new(ProcessorConfig {
    root: config.root.clone(),
    policy: CopyrightPolicy::new(config.year, config.excluded_names.clone(), config.included_names.clone()),
    max_depth: config.max_depth,
    excluded_dirs: config.excluded_dirs.clone(),
    dry_run: config.dry_run,
    diff_sender: Some(diff_sender),
    cancellation,
  });

  let result = processor.process().await;
  // The printer stops once the processor's sender is gone.
  drop(processor);
  interrupt_listener.abort();

  let totals: RunTotals = match result {
    Ok(totals) => totals,
    Err(e) if e.is::<Cancelled>() => {
      diff_printer.abort();
      debug!("Run cancelled, exiting without summary");
      return Ok(());
    }
    Err(e) => {
      diff_printer.abort();
      return Err(e);
    }
  };

  diff_printer.finish().await;
  print_summary(&totals, config.dry_run);

  if totals.files_failed > 0 {
    verbose_log!("{} files could not be processed", totals.files_failed);
    process::exit(1);
  }

  Ok(())
}

/// Combines the arguments with the configuration file into a [`RunConfig`].
fn resolve_config(args: UpdateArgs) -> Result<RunConfig> {
  let dir = args.dir.unwrap_or_else(|| PathBuf::from("."));
  let root = std::path::absolute(&dir).with_context(|| format!("Failed to resolve directory: {}", dir.display()))?;

  let file_config = load_config(args.config.as_deref(), &root, args.no_config)?;

  let year = match args.year {
    Some(year) => year,
    None => current_year()?,
  };

  let cli = CliValues {
    dry_run: args.dry_run,
    root,
    max_depth: args.max_depth,
    year,
    excluded_dirs: args.exclude_dir,
    excluded_names: args.exclude_name,
    included_names: args.include_name,
  };

  Ok(RunConfig::merge(cli, file_config)?)
}

fn current_year() -> Result<u32> {
  let year = chrono::Local::now().year();
  u32::try_from(year).with_context(|| format!("Current year is out of range: {year}"))
}

/// Cancels the run when Ctrl-C is pressed.
fn listen_for_interrupt(cancellation: Cancellation) -> JoinHandle<()> {
  tokio::spawn(async move {
    match tokio::signal::ctrl_c().await {
      Ok(()) => {
        debug!("Interrupt received, cancelling");
        cancellation.cancel();
      }
      Err(e) => warn!("Unable to listen for Ctrl-C: {}", e),
    }
  })
}
