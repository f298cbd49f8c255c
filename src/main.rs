//! # copywriter
//!
//! A tool that brings the year in .NET project copyright strings up to date.

mod cli;

use anyhow::Result;

use crate::cli::{Cli, run_update};

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run_update(cli.update_args).await
}
