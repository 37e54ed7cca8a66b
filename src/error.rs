// Copyright (C) Brian G. Milnes 2025

//! Error taxonomy shared by both upgrade tools

pub mod error {
    use thiserror::Error;

    /// Why an upgrade could not produce output for a file
    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    pub enum UpgradeError {
        /// Input is not valid Python; the file is left untouched
        #[error("syntax error at {line}:{column}: {message}")]
        Parse {
            line: usize,
            column: usize,
            message: String,
        },

        #[error("parser initialization failed: {0}")]
        ParserInit(String),

        /// A structural assumption of the engine broke. Never user-correctable.
        #[error("internal invariant violated: {0}")]
        InternalInvariant(String),
    }

    impl UpgradeError {
        pub fn invariant(message: impl Into<String>) -> Self {
            UpgradeError::InternalInvariant(message.into())
        }
    }

    pub type UpgradeResult<T> = Result<T, UpgradeError>;
}
