// Copyright (C) Brian G. Milnes 2025

//! Rewrites located return sites in the token sequence
//!
//! For every site, `ctx.<name> = <value>` lines are inserted before the
//! `return` and the call's keyword arguments are removed. Sites are handled
//! bottom-up: an edit only shifts tokens at or after its own return, so every
//! site above it keeps its original indices.

pub mod splice {
    use std::collections::HashMap;

    use crate::arguments::arguments::{split_arguments, ArgumentGroup};
    use crate::braces::braces::find_call_parens;
    use crate::error::error::{UpgradeError, UpgradeResult};
    use crate::locator::locator::ReturnSite;
    use crate::tokens::tokens::{Offset, Token, TokenKind};

    /// Object that receives the moved keyword arguments
    pub const CONTEXT_NAME: &str = "ctx";

    /// Apply every site to `tokens`; returns the number of sites rewritten
    pub fn mutate_found(tokens: &mut Vec<Token>, sites: &[ReturnSite]) -> UpgradeResult<usize> {
        let index = index_by_offset(tokens);
        let newline = newline_text(tokens);

        let mut ordered: Vec<&ReturnSite> = sites.iter().collect();
        ordered.sort_by(|a, b| b.statement.cmp(&a.statement));
        ordered.dedup();

        // Lowest index touched so far; everything below it is still pristine
        let mut floor = tokens.len();
        for site in &ordered {
            let return_start = lookup(&index, site.statement, "return statement")?;
            let callee = lookup(&index, site.callee, "callee")?;
            if tokens[return_start].kind != TokenKind::Name || tokens[return_start].text != "return" {
                return Err(UpgradeError::invariant(format!(
                    "expected `return` at {}, found `{}`",
                    site.statement, tokens[return_start].text
                )));
            }

            let (brace_start, brace_end) = find_call_parens(tokens, callee)?;
            if !(return_start < brace_start && brace_start < brace_end) {
                return Err(UpgradeError::invariant(format!(
                    "call at {} is not inside the return at {}",
                    site.callee, site.statement
                )));
            }
            if brace_end > floor {
                return Err(UpgradeError::invariant(format!(
                    "return at {} overlaps an already rewritten site",
                    site.statement
                )));
            }

            let inserted = process_ctx_returned(tokens, return_start, brace_start, brace_end, &newline)?;
            process_ctx_kwargs(tokens, brace_start + inserted, brace_end + inserted);
            floor = return_start;
        }

        Ok(ordered.len())
    }

    fn index_by_offset(tokens: &[Token]) -> HashMap<Offset, usize> {
        tokens
            .iter()
            .enumerate()
            .filter_map(|(i, token)| token.offset.map(|offset| (offset, i)))
            .collect()
    }

    fn lookup(index: &HashMap<Offset, usize>, offset: Offset, what: &str) -> UpgradeResult<usize> {
        index
            .get(&offset)
            .copied()
            .ok_or_else(|| UpgradeError::invariant(format!("no token starts at {what} position {offset}")))
    }

    /// Line ending used by the file, so `\r\n` sources stay `\r\n`
    fn newline_text(tokens: &[Token]) -> String {
        tokens
            .iter()
            .find(|token| token.kind == TokenKind::Newline)
            .map_or_else(|| "\n".to_string(), |token| token.text.clone())
    }

    /// Insert one assignment line per keyword argument before the `return`;
    /// returns how many tokens were inserted
    fn process_ctx_returned(
        tokens: &mut Vec<Token>,
        return_start: usize,
        brace_start: usize,
        brace_end: usize,
        newline: &str,
    ) -> UpgradeResult<usize> {
        let indent = return_start
            .checked_sub(1)
            .map(|i| &tokens[i])
            .filter(|token| token.kind == TokenKind::Indent)
            .map(|token| token.text.clone());

        let patch = {
            let groups = split_arguments(&tokens[brace_start + 1..brace_end - 1])?;
            let mut patch = Vec::new();
            for group in &groups {
                assignment(group, newline, indent.as_deref(), &mut patch);
            }
            patch
        };

        let inserted = patch.len();
        tokens.splice(return_start..return_start, patch);
        Ok(inserted)
    }

    /// `ctx.<name> = <value>` followed by a newline and the return's indentation
    fn assignment(group: &ArgumentGroup<'_>, newline: &str, indent: Option<&str>, patch: &mut Vec<Token>) {
        let wrap = group.needs_parentheses();

        patch.push(Token::synthetic(TokenKind::Name, CONTEXT_NAME));
        patch.push(Token::synthetic(TokenKind::Op, "."));
        patch.extend(group.name.iter().map(Token::detached));
        patch.push(Token::synthetic(TokenKind::Whitespace, " "));
        patch.push(Token::synthetic(TokenKind::Op, "="));
        patch.push(Token::synthetic(TokenKind::Whitespace, " "));
        if wrap {
            patch.push(Token::synthetic(TokenKind::Op, "("));
        }
        patch.extend(group.value.iter().map(Token::detached));
        if wrap {
            patch.push(Token::synthetic(TokenKind::Op, ")"));
        }
        patch.push(Token::synthetic(TokenKind::Newline, newline));
        if let Some(indent) = indent {
            patch.push(Token::synthetic(TokenKind::Indent, indent));
        }
    }

    /// Remove everything strictly between the call's parentheses
    fn process_ctx_kwargs(tokens: &mut Vec<Token>, brace_start: usize, brace_end: usize) {
        tokens.drain(brace_start + 1..brace_end - 1);
    }
}
