// Copyright (C) Brian G. Milnes 2025

//! Logging infrastructure for the upgrade tools
//!
//! Every user-visible line goes to the logger's output sink (stdout for the
//! binaries). When file logging is enabled the same lines, plus diagnostics
//! that never reach stdout, are also written to:
//! - <root>/logs/<tool-name>/<date>/run-<timestamp>.log

pub mod logging {
    use std::fs;
    use std::io::{self, Write};
    use std::path::{Path, PathBuf};

    use anyhow::Result;
    use chrono::{DateTime, Local};

    /// Logger for an upgrade tool
    pub struct ToolLogger<W: Write> {
        out: W,
        log_file: Option<fs::File>,
        log_path: Option<PathBuf>,
        start_time: DateTime<Local>,
    }

    impl<W: Write> ToolLogger<W> {
        /// Create a logger that only writes to `out`
        pub fn new_disabled(out: W) -> Self {
            ToolLogger {
                out,
                log_file: None,
                log_path: None,
                start_time: Local::now(),
            }
        }

        /// Create a logger that also writes a run log under `root`
        ///
        /// If log creation fails, continues without the file (degrades gracefully)
        pub fn new(out: W, tool_name: &str, root: &Path) -> Self {
            let start_time = Local::now();

            let (log_file, log_path) = match Self::create_log_file(tool_name, root, &start_time) {
                Ok((file, path)) => (Some(file), Some(path)),
                Err(e) => {
                    eprintln!("Warning: Could not create log file: {e}");
                    eprintln!("Continuing without logging...");
                    (None, None)
                }
            };

            ToolLogger {
                out,
                log_file,
                log_path,
                start_time,
            }
        }

        fn create_log_file(
            tool_name: &str,
            root: &Path,
            start_time: &DateTime<Local>,
        ) -> Result<(fs::File, PathBuf)> {
            let date_str = start_time.format("%Y-%m-%d").to_string();
            let time_str = start_time.format("%H-%M-%S").to_string();

            let log_dir = root.join("logs").join(tool_name).join(&date_str);
            fs::create_dir_all(&log_dir)?;

            let log_path = log_dir.join(format!("run-{time_str}.log"));
            let log_file = fs::File::create(&log_path)?;

            Ok((log_file, log_path))
        }

        /// Log a message to both the output sink and the log file
        ///
        /// Only output sink failures are reported; the log file is best effort
        pub fn log(&mut self, message: &str) -> io::Result<()> {
            writeln!(self.out, "{message}")?;
            self.log_silent(message);
            Ok(())
        }

        /// Log to the log file only
        pub fn log_silent(&mut self, message: &str) {
            if let Some(ref mut file) = self.log_file {
                let _ = writeln!(file, "{message}");
            }
        }

        pub fn log_path(&self) -> Option<&Path> {
            self.log_path.as_deref()
        }

        /// Close the log with summary information; never touches the output sink
        pub fn finalize(&mut self, summary: &str) {
            let end_time = Local::now();
            let duration = end_time.signed_duration_since(self.start_time);

            self.log_silent("");
            self.log_silent("=== Run Summary ===");
            self.log_silent(summary);
            self.log_silent(&format!("Started: {}", self.start_time.format("%Y-%m-%d %H:%M:%S")));
            self.log_silent(&format!("Ended: {}", end_time.format("%Y-%m-%d %H:%M:%S")));
            self.log_silent(&format!("Duration: {}ms", duration.num_milliseconds()));
        }
    }

    impl<W: Write> Drop for ToolLogger<W> {
        fn drop(&mut self) {
            let _ = self.out.flush();
            if let Some(ref mut file) = self.log_file {
                let _ = file.flush();
            }
        }
    }
}
