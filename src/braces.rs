// Copyright (C) Brian G. Milnes 2025

//! Matching bracket search over a token sequence
//!
//! Only `Op` tokens count as delimiters, so brackets inside strings and
//! comments are never mistaken for structure.

pub mod braces {
    use crate::error::error::{UpgradeError, UpgradeResult};
    use crate::tokens::tokens::{Token, TokenKind};

    pub const BRACES: [(&str, &str); 3] = [("(", ")"), ("[", "]"), ("{", "}")];

    fn closing_for(token: &Token) -> Option<&'static str> {
        if token.kind != TokenKind::Op {
            return None;
        }
        BRACES
            .iter()
            .find(|(open, _)| *open == token.text)
            .map(|(_, close)| *close)
    }

    fn is_closing(token: &Token) -> bool {
        token.kind == TokenKind::Op && BRACES.iter().any(|(_, close)| *close == token.text)
    }

    pub fn is_opening(token: &Token) -> bool {
        closing_for(token).is_some()
    }

    /// Index one past the delimiter that closes the one at `open`
    pub fn find_closing_brace(tokens: &[Token], open: usize) -> UpgradeResult<usize> {
        let first = tokens
            .get(open)
            .ok_or_else(|| UpgradeError::invariant(format!("no token at index {open}")))?;
        let outer = closing_for(first).ok_or_else(|| {
            UpgradeError::invariant(format!("`{}` at index {open} is not an opening delimiter", first.text))
        })?;

        let mut stack = vec![outer];
        let mut j = open + 1;
        while let Some(&expected) = stack.last() {
            let token = tokens.get(j).ok_or_else(|| {
                UpgradeError::invariant(format!("`{}` at index {open} is never closed", first.text))
            })?;
            j += 1;

            if token.kind != TokenKind::Op {
                continue;
            }
            if token.text == expected {
                stack.pop();
            } else if let Some(close) = closing_for(token) {
                stack.push(close);
            } else if is_closing(token) {
                return Err(UpgradeError::invariant(format!(
                    "expected `{expected}` but found `{}` at index {}",
                    token.text,
                    j - 1
                )));
            }
        }

        Ok(j)
    }

    /// Parenthesis span of the call whose callee name sits at `callee`
    ///
    /// Returns `(open, end)` where `tokens[open]` is `(` and `end` is one past `)`.
    /// Blanks, newlines and comments between the name and `(` are skipped.
    pub fn find_call_parens(tokens: &[Token], callee: usize) -> UpgradeResult<(usize, usize)> {
        let open = tokens
            .iter()
            .enumerate()
            .skip(callee + 1)
            .find(|(_, token)| !token.kind.is_insignificant())
            .map(|(i, _)| i)
            .filter(|i| tokens[*i].is_op("("))
            .ok_or_else(|| {
                UpgradeError::invariant(format!("no `(` follows the callee at index {callee}"))
            })?;

        let end = find_closing_brace(tokens, open)?;
        Ok((open, end))
    }
}
