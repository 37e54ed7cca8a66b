// Copyright (C) Brian G. Milnes 2025

//! Upgrade dependencies injectors to the new library API
//!
//! Rewrites contrib imports to their framework-native replacements and turns
//! decorated `Injector` classes into plain framework view classes.
//!
//! Binary: dependencies-upgrade

use clap::Parser;
use codemods::args::args::existing_file;
use codemods::{run_main, DependenciesUpgrade};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dependencies-upgrade")]
#[command(about = "Upgrade imports and view classes with dependencies definitions to the new version of the library API", long_about = None)]
#[command(version)]
struct Args {
    /// Python files to upgrade in place
    #[arg(value_parser = existing_file)]
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    run_main(&DependenciesUpgrade, &args.files)
}
