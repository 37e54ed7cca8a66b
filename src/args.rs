// Copyright (C) Brian G. Milnes 2025

//! Command-line argument helpers shared by the upgrade binaries

pub mod args {
    use std::path::PathBuf;

    /// clap value parser: accept only paths naming an existing regular file
    pub fn existing_file(value: &str) -> Result<PathBuf, String> {
        let path = PathBuf::from(value);
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Ok(path),
            Ok(_) => Err(format!("File '{value}' is a directory.")),
            Err(_) => Err(format!("File '{value}' does not exist.")),
        }
    }

    /// `1 file` / `2 files`
    pub fn pluralize_files(count: usize) -> String {
        let suffix = if count == 1 { "" } else { "s" };
        format!("{count} file{suffix}")
    }
}
