// Copyright (C) Brian G. Milnes 2025

//! Tool runner infrastructure for the upgrade binaries
//!
//! Provides the wrapper both tools share:
//! - Sequential, in-place upgrade of every file argument
//! - `Update <path>` lines and the final `N file(s) updated` summary
//! - Optional logging to files
//! - Exit status: 0 unchanged, 1 files updated, 2 failure

pub mod tool_runner {
    use std::fs;
    use std::io::{self, Write};
    use std::path::{Path, PathBuf};
    use std::process::ExitCode;

    use anyhow::{Context, Result};

    use crate::args::args::pluralize_files;
    use crate::fixer::fixer::Fixer;
    use crate::logging::logging::ToolLogger;

    /// Configuration for a tool run
    pub struct ToolConfig {
        /// Name of the tool (for logging directory)
        pub tool_name: String,
        /// Whether to enable file logging
        pub enable_logging: bool,
        /// Directory that receives `logs/`
        pub log_root: PathBuf,
    }

    impl ToolConfig {
        pub fn new(tool_name: &str) -> Self {
            ToolConfig {
                tool_name: tool_name.to_string(),
                enable_logging: false, // Disabled by default
                log_root: PathBuf::from("."),
            }
        }

        /// Enable file logging under `root`
        pub fn with_log_root(mut self, root: impl Into<PathBuf>) -> Self {
            self.enable_logging = true;
            self.log_root = root.into();
            self
        }
    }

    /// Upgrade `files` in argument order, reporting to `out`
    ///
    /// Returns the number of files rewritten. The first failing file aborts the
    /// run; files already rewritten stay rewritten, the failing one is untouched.
    pub fn run_tool<W: Write>(
        config: &ToolConfig,
        fixer: &dyn Fixer,
        files: &[PathBuf],
        out: W,
    ) -> Result<usize> {
        let mut logger = if config.enable_logging {
            ToolLogger::new(out, &config.tool_name, &config.log_root)
        } else {
            ToolLogger::new_disabled(out)
        };

        let mut modified = 0;
        for file in files {
            let changed = upgrade_file(file, fixer, &mut logger)
                .with_context(|| file.display().to_string())?;
            if changed {
                modified += 1;
            }
        }

        if modified > 0 {
            logger.log("").context("Failed to write output")?;
            logger
                .log(&format!("{} updated", pluralize_files(modified)))
                .context("Failed to write output")?;
        }

        if config.enable_logging {
            logger.finalize(&format!(
                "Summary: {} checked, {} updated",
                pluralize_files(files.len()),
                pluralize_files(modified)
            ));
        }

        Ok(modified)
    }

    /// Upgrade one file in place; true when its content changed
    pub fn upgrade_file<W: Write>(path: &Path, fixer: &dyn Fixer, logger: &mut ToolLogger<W>) -> Result<bool> {
        let source = fs::read_to_string(path).context("Failed to read file")?;
        let outcome = fixer.fix(&source)?;

        for note in &outcome.notes {
            logger.log_silent(&format!("{}:{note}", path.display()));
        }
        if !outcome.changed(&source) {
            return Ok(false);
        }

        fs::write(path, &outcome.output).context("Failed to write file")?;
        logger
            .log(&format!("Update {}", path.display()))
            .context("Failed to write output")?;
        Ok(true)
    }

    /// Entry point body shared by the binaries
    pub fn run_main(fixer: &dyn Fixer, files: &[PathBuf]) -> ExitCode {
        let config = ToolConfig::new(fixer.tool_name());
        let stdout = io::stdout();

        match run_tool(&config, fixer, files, stdout.lock()) {
            Ok(0) => ExitCode::SUCCESS,
            Ok(_) => ExitCode::from(1),
            Err(e) => {
                eprintln!("Error: {e:#}");
                ExitCode::from(2)
            }
        }
    }
}
