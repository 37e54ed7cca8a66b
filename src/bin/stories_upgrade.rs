// Copyright (C) Brian G. Milnes 2025

//! Upgrade stories definitions to the new library API
//!
//! Moves keyword arguments of `return Success(...)` / `return Skip(...)` into
//! `ctx.<name> = <value>` assignments placed right before the return.
//!
//! Binary: stories-upgrade

use clap::Parser;
use codemods::args::args::existing_file;
use codemods::{run_main, StoriesUpgrade};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "stories-upgrade")]
#[command(about = "Upgrade classes with stories definitions to the new version of the library API", long_about = None)]
#[command(version)]
struct Args {
    /// Python files to upgrade in place
    #[arg(value_parser = existing_file)]
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    run_main(&StoriesUpgrade, &args.files)
}
