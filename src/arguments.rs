// Copyright (C) Brian G. Milnes 2025

//! Splitting a call's argument tokens into keyword arguments

pub mod arguments {
    use crate::braces::braces::{find_closing_brace, is_opening};
    use crate::error::error::{UpgradeError, UpgradeResult};
    use crate::tokens::tokens::{tokens_to_src, Token, TokenKind};

    /// One `name=value` argument borrowed from the token sequence
    #[derive(Debug, Clone, Copy)]
    pub struct ArgumentGroup<'a> {
        pub name: &'a [Token],
        pub value: &'a [Token],
    }

    impl ArgumentGroup<'_> {
        pub fn name_text(&self) -> String {
            tokens_to_src(self.name)
        }

        pub fn value_text(&self) -> String {
            tokens_to_src(self.value)
        }

        /// True when the value only parses inside its enclosing parentheses,
        /// i.e. it breaks lines or carries a comment outside any bracket of its own
        pub fn needs_parentheses(&self) -> bool {
            let mut i = 0;
            while i < self.value.len() {
                let token = &self.value[i];
                if is_opening(token) {
                    // Spans are balanced: split_arguments already closed every bracket
                    i = find_closing_brace(self.value, i).unwrap_or(self.value.len());
                    continue;
                }
                if matches!(
                    token.kind,
                    TokenKind::Newline | TokenKind::Comment | TokenKind::Continuation
                ) {
                    return true;
                }
                i += 1;
            }
            false
        }
    }

    /// Drop insignificant tokens from both ends
    pub fn strip_insignificant(tokens: &[Token]) -> &[Token] {
        let start = tokens
            .iter()
            .position(|token| !token.kind.is_insignificant())
            .unwrap_or(tokens.len());
        let end = tokens
            .iter()
            .rposition(|token| !token.kind.is_insignificant())
            .map_or(start, |last| last + 1);
        &tokens[start..end]
    }

    /// Split the tokens strictly between a call's parentheses into top-level
    /// keyword arguments, in source order
    pub fn split_arguments(tokens: &[Token]) -> UpgradeResult<Vec<ArgumentGroup<'_>>> {
        let mut groups = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < tokens.len() {
            let token = &tokens[i];
            if is_opening(token) {
                i = find_closing_brace(tokens, i)?;
                continue;
            }
            if token.is_op(",") {
                push_group(&tokens[start..i], &mut groups)?;
                start = i + 1;
            }
            i += 1;
        }
        push_group(&tokens[start..], &mut groups)?;

        Ok(groups)
    }

    fn push_group<'a>(chunk: &'a [Token], groups: &mut Vec<ArgumentGroup<'a>>) -> UpgradeResult<()> {
        // Trailing comma or comment-only tail
        if chunk.iter().all(|token| token.kind.is_insignificant()) {
            return Ok(());
        }
        groups.push(split_assign(chunk)?);
        Ok(())
    }

    /// Split one argument at its first top-level `=`
    fn split_assign(chunk: &[Token]) -> UpgradeResult<ArgumentGroup<'_>> {
        let mut i = 0;
        while i < chunk.len() {
            if is_opening(&chunk[i]) {
                i = find_closing_brace(chunk, i)?;
                continue;
            }
            if chunk[i].is_op("=") {
                let group = ArgumentGroup {
                    name: strip_insignificant(&chunk[..i]),
                    value: strip_insignificant(&chunk[i + 1..]),
                };
                let named = matches!(group.name, [token] if token.kind == TokenKind::Name);
                if !named || group.value.is_empty() {
                    return Err(UpgradeError::invariant(format!(
                        "malformed keyword argument `{}`",
                        tokens_to_src(strip_insignificant(chunk))
                    )));
                }
                return Ok(group);
            }
            i += 1;
        }

        Err(UpgradeError::invariant(format!(
            "argument `{}` is not a keyword argument",
            tokens_to_src(strip_insignificant(chunk))
        )))
    }
}
