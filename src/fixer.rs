// Copyright (C) Brian G. Milnes 2025

//! Fixer seam shared by the upgrade binaries

pub mod fixer {
    use crate::error::error::UpgradeResult;

    /// Upgraded source plus diagnostics for the tool log
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Outcome {
        pub output: String,
        pub notes: Vec<String>,
    }

    impl Outcome {
        pub fn new(output: String) -> Self {
            Outcome {
                output,
                notes: Vec::new(),
            }
        }

        pub fn changed(&self, source: &str) -> bool {
            self.output != source
        }
    }

    /// A whole-file source upgrade
    pub trait Fixer {
        /// Name used for the log directory and diagnostics
        fn tool_name(&self) -> &'static str;

        fn fix(&self, source: &str) -> UpgradeResult<Outcome>;
    }

    /// Moves `Success(...)`/`Skip(...)` keyword arguments onto `ctx`
    pub struct StoriesUpgrade;

    impl Fixer for StoriesUpgrade {
        fn tool_name(&self) -> &'static str {
            "stories-upgrade"
        }

        fn fix(&self, source: &str) -> UpgradeResult<Outcome> {
            crate::stories::stories::upgrade_with_notes(source)
        }
    }

    /// Migrates contrib imports and injector view classes
    pub struct DependenciesUpgrade;

    impl Fixer for DependenciesUpgrade {
        fn tool_name(&self) -> &'static str {
            "dependencies-upgrade"
        }

        fn fix(&self, source: &str) -> UpgradeResult<Outcome> {
            crate::dependencies::dependencies::upgrade_with_notes(source)
        }
    }
}
