// Copyright (C) Brian G. Milnes 2025

//! Stories upgrade: move result keyword arguments onto the step context
//!
//! ```text
//! def one(self, ctx):            def one(self, ctx):
//!     return Success(foo=1)  =>      ctx.foo = 1
//!                                    return Success()
//! ```
//!
//! The syntax tree says *where* to edit; the token sequence is what gets
//! edited, so everything outside the rewritten sites is preserved byte for byte.

pub mod stories {
    use crate::error::error::{UpgradeError, UpgradeResult};
    use crate::fixer::fixer::Outcome;
    use crate::locator::locator::locate;
    use crate::parser::parser::parse_source;
    use crate::splice::splice::mutate_found;
    use crate::tokens::tokens::{src_to_tokens, tokens_to_src};

    /// Upgrade one file's source text
    pub fn upgrade(source: &str) -> UpgradeResult<String> {
        Ok(upgrade_with_notes(source)?.output)
    }

    pub fn upgrade_with_notes(source: &str) -> UpgradeResult<Outcome> {
        let tree = parse_source(source)?;
        let found = locate(&tree, source);

        let mut outcome = Outcome::new(source.to_string());
        outcome.notes.extend(
            found
                .skipped
                .iter()
                .map(|offset| format!("{offset}: return shares its line with another statement, left as is")),
        );
        if found.sites.is_empty() {
            return Ok(outcome);
        }

        let mut tokens = src_to_tokens(source)?;
        if tokens_to_src(&tokens) != source {
            return Err(UpgradeError::invariant("token sequence does not reproduce the source"));
        }

        let rewritten = mutate_found(&mut tokens, &found.sites)?;
        outcome.output = tokens_to_src(&tokens);
        outcome.notes.push(format!("rewrote {rewritten} return site(s)"));
        Ok(outcome)
    }
}
