// Copyright (C) Brian G. Milnes 2025

//! Codemods - token-preserving Python source upgrades
//!
//! Two tools share this library:
//! - `stories-upgrade` moves `Success(...)`/`Skip(...)` keyword arguments onto
//!   the step context as explicit assignments
//! - `dependencies-upgrade` migrates contrib imports and injector view classes
//!
//! Both locate edits with a tree-sitter syntax tree and edit the original text,
//! so files without matches come back byte-identical.

pub mod error;
pub mod parser;
pub mod ast_utils;
pub mod tokens;
pub mod braces;
pub mod arguments;
pub mod locator;
pub mod splice;
pub mod stories;
pub mod dependencies;
pub mod fixer;
pub mod args;
pub mod logging;
pub mod tool_runner;

// Re-export commonly used items
pub use error::error::{UpgradeError, UpgradeResult};
pub use parser::parser::parse_source;
pub use tokens::tokens::{src_to_tokens, tokens_to_src, Offset, Token, TokenKind};
pub use braces::braces::{find_call_parens, find_closing_brace};
pub use arguments::arguments::{split_arguments, ArgumentGroup};
pub use locator::locator::{locate, ReturnSite};
pub use splice::splice::mutate_found;
pub use fixer::fixer::{DependenciesUpgrade, Fixer, Outcome, StoriesUpgrade};
pub use tool_runner::tool_runner::{run_main, run_tool, ToolConfig};
pub use ast_utils::ast_utils::*;
