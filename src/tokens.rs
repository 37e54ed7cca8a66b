// Copyright (C) Brian G. Milnes 2025

//! Lossless token store for Python source
//!
//! `src_to_tokens` splits source into tokens that keep every byte, whitespace
//! and comments included, so `tokens_to_src` of an untouched sequence returns
//! the original text exactly. Each lexed token records its (line, byte column)
//! offset, the same coordinates the syntax tree reports, which is how tree
//! matches are correlated back to tokens.

pub mod tokens {
    use std::fmt;

    use crate::error::error::{UpgradeError, UpgradeResult};

    /// A source position: 1-indexed line and byte offset within that line
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Offset {
        pub line: usize,
        pub utf8_byte_offset: usize,
    }

    impl Offset {
        pub fn new(line: usize, utf8_byte_offset: usize) -> Self {
            Offset { line, utf8_byte_offset }
        }
    }

    impl fmt::Display for Offset {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}:{}", self.line, self.utf8_byte_offset)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum TokenKind {
        Name,
        Number,
        String,
        Op,
        Comment,
        Newline,
        /// Blanks that do not start a line
        Whitespace,
        /// Blanks at column 0, a line's indentation
        Indent,
        /// Backslash line continuation
        Continuation,
        Other,
    }

    impl TokenKind {
        /// Tokens that can be dropped from either end of an expression
        pub fn is_insignificant(self) -> bool {
            matches!(
                self,
                TokenKind::Whitespace
                    | TokenKind::Indent
                    | TokenKind::Newline
                    | TokenKind::Comment
                    | TokenKind::Continuation
            )
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Token {
        pub kind: TokenKind,
        pub text: String,
        /// `None` for tokens that were not lexed from the original source
        pub offset: Option<Offset>,
    }

    impl Token {
        pub fn synthetic(kind: TokenKind, text: impl Into<String>) -> Self {
            Token {
                kind,
                text: text.into(),
                offset: None,
            }
        }

        /// Copy of this token with its source position dropped
        pub fn detached(&self) -> Self {
            Token::synthetic(self.kind, self.text.clone())
        }

        pub fn is_op(&self, text: &str) -> bool {
            self.kind == TokenKind::Op && self.text == text
        }
    }

    /// Longest operators first so `==` never lexes as two `=`
    const OPERATORS: &[&str] = &[
        "**=", "//=", ">>=", "<<=", "...", "!=", "==", "<=", ">=", "->", ":=", "**", "//",
        "<<", ">>", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "@=", "(", ")", "[",
        "]", "{", "}", ",", ":", ";", ".", "+", "-", "*", "/", "%", "&", "|", "^", "~", "<",
        ">", "=", "@", "!",
    ];

    const STRING_PREFIXES: &[&str] = &["r", "u", "b", "f", "t", "br", "rb", "fr", "rf", "tr", "rt"];

    /// Tokenize source text; fails only on unterminated string literals
    pub fn src_to_tokens(source: &str) -> UpgradeResult<Vec<Token>> {
        Lexer::new(source).run()
    }

    /// Concatenate token texts back into source
    pub fn tokens_to_src(tokens: &[Token]) -> String {
        tokens.iter().map(|token| token.text.as_str()).collect()
    }

    struct Lexer<'s> {
        source: &'s str,
        pos: usize,
        line: usize,
        column: usize,
        tokens: Vec<Token>,
    }

    impl<'s> Lexer<'s> {
        fn new(source: &'s str) -> Self {
            Lexer {
                source,
                pos: 0,
                line: 1,
                column: 0,
                tokens: Vec::new(),
            }
        }

        fn run(mut self) -> UpgradeResult<Vec<Token>> {
            while self.pos < self.source.len() {
                let (kind, len) = self.scan(&self.source[self.pos..])?;
                self.push(kind, len);
            }
            Ok(self.tokens)
        }

        fn push(&mut self, kind: TokenKind, len: usize) {
            let text = &self.source[self.pos..self.pos + len];
            let kind = if kind == TokenKind::Whitespace && self.column == 0 {
                TokenKind::Indent
            } else {
                kind
            };

            self.tokens.push(Token {
                kind,
                text: text.to_string(),
                offset: Some(Offset::new(self.line, self.column)),
            });

            match text.rfind('\n') {
                Some(last) => {
                    self.line += text.matches('\n').count();
                    self.column = text.len() - last - 1;
                }
                None => self.column += text.len(),
            }
            self.pos += len;
        }

        /// Kind and byte length of the token at the start of `rest`
        fn scan(&self, rest: &str) -> UpgradeResult<(TokenKind, usize)> {
            let bytes = rest.as_bytes();
            let first = match rest.chars().next() {
                Some(c) => c,
                None => return Err(UpgradeError::invariant("lexer scanned past end of input")),
            };

            let token = match first {
                '\n' => (TokenKind::Newline, 1),
                '\r' if rest.starts_with("\r\n") => (TokenKind::Newline, 2),
                '\\' if rest[1..].starts_with('\n') => (TokenKind::Continuation, 2),
                '\\' if rest[1..].starts_with("\r\n") => (TokenKind::Continuation, 3),
                ' ' | '\t' | '\x0c' => {
                    let len = bytes
                        .iter()
                        .take_while(|b| matches!(**b, b' ' | b'\t' | b'\x0c'))
                        .count();
                    (TokenKind::Whitespace, len)
                }
                '#' => (TokenKind::Comment, comment_len(rest)),
                '0'..='9' => (TokenKind::Number, number_len(rest)),
                '.' if bytes.get(1).is_some_and(u8::is_ascii_digit) => {
                    (TokenKind::Number, number_len(rest))
                }
                '\'' | '"' => (TokenKind::String, self.string_len(rest, 0)?),
                c if is_name_start(c) => {
                    let len = name_len(rest);
                    if matches!(bytes.get(len), Some(b'\'' | b'"')) && is_string_prefix(&rest[..len]) {
                        (TokenKind::String, self.string_len(rest, len)?)
                    } else {
                        (TokenKind::Name, len)
                    }
                }
                c => match OPERATORS.iter().find(|op| rest.starts_with(**op)) {
                    Some(op) => (TokenKind::Op, op.len()),
                    None => (TokenKind::Other, c.len_utf8()),
                },
            };
            Ok(token)
        }

        /// Length of a string literal whose prefix occupies `rest[..prefix_len]`
        fn string_len(&self, rest: &str, prefix_len: usize) -> UpgradeResult<usize> {
            let prefix = rest[..prefix_len].to_ascii_lowercase();
            let formatted = prefix.contains('f') || prefix.contains('t');
            let bytes = rest.as_bytes();
            let quote = bytes[prefix_len];
            let triple = bytes.len() >= prefix_len + 3
                && bytes[prefix_len + 1] == quote
                && bytes[prefix_len + 2] == quote;
            let body_start = prefix_len + if triple { 3 } else { 1 };

            let mut i = body_start;
            while i < bytes.len() {
                match bytes[i] {
                    b'\\' if rest[i + 1..].starts_with("\r\n") => i += 3,
                    // A backslash keeps the next byte from closing the literal, raw or not
                    b'\\' => i += 2,
                    b'\n' if !triple => break,
                    b if b == quote => {
                        if !triple {
                            return Ok(i + 1);
                        }
                        if bytes[i..].starts_with(&[quote, quote, quote]) {
                            return Ok(i + 3);
                        }
                        i += 1;
                    }
                    b'{' if formatted => {
                        if bytes.get(i + 1) == Some(&b'{') {
                            i += 2;
                        } else {
                            i = self.replacement_field(rest, i + 1)?;
                        }
                    }
                    _ => i += 1,
                }
            }
            Err(self.unterminated())
        }

        /// Skip an f-string `{...}` field starting just after its `{`; returns the index past `}`
        fn replacement_field(&self, text: &str, mut i: usize) -> UpgradeResult<usize> {
            let bytes = text.as_bytes();
            let mut depth = 0usize;
            while i < bytes.len() {
                match bytes[i] {
                    b'(' | b'[' | b'{' => {
                        depth += 1;
                        i += 1;
                    }
                    b'}' if depth == 0 => return Ok(i + 1),
                    b')' | b']' | b'}' => {
                        depth = depth.saturating_sub(1);
                        i += 1;
                    }
                    b':' if depth == 0 => return self.format_spec(text, i + 1),
                    b'\'' | b'"' => i += self.string_len(&text[i..], 0)?,
                    b if b.is_ascii_alphabetic() || b == b'_' => {
                        let run = name_len(&text[i..]);
                        let after = i + run;
                        if matches!(bytes.get(after), Some(b'\'' | b'"'))
                            && is_string_prefix(&text[i..after])
                        {
                            i += self.string_len(&text[i..], run)?;
                        } else {
                            i = after;
                        }
                    }
                    _ => i += 1,
                }
            }
            Err(self.unterminated())
        }

        /// Format spec after `:`; may hold nested fields such as `{x:>{width}}`
        fn format_spec(&self, text: &str, mut i: usize) -> UpgradeResult<usize> {
            let bytes = text.as_bytes();
            while i < bytes.len() {
                match bytes[i] {
                    b'{' => i = self.replacement_field(text, i + 1)?,
                    b'}' => return Ok(i + 1),
                    _ => i += 1,
                }
            }
            Err(self.unterminated())
        }

        fn unterminated(&self) -> UpgradeError {
            UpgradeError::Parse {
                line: self.line,
                column: self.column,
                message: "unterminated string literal".to_string(),
            }
        }
    }

    fn is_name_start(c: char) -> bool {
        c == '_' || c.is_alphabetic() || (!c.is_ascii() && !c.is_whitespace())
    }

    fn is_name_continue(c: char) -> bool {
        c == '_' || c.is_alphanumeric() || (!c.is_ascii() && !c.is_whitespace())
    }

    fn name_len(rest: &str) -> usize {
        rest.char_indices()
            .find(|(_, c)| !is_name_continue(*c))
            .map_or(rest.len(), |(i, _)| i)
    }

    fn is_string_prefix(word: &str) -> bool {
        STRING_PREFIXES.contains(&word.to_ascii_lowercase().as_str())
    }

    /// A comment runs up to, not including, the line ending
    fn comment_len(rest: &str) -> usize {
        match rest.find('\n') {
            Some(i) if rest[..i].ends_with('\r') => i - 1,
            Some(i) => i,
            None => rest.len(),
        }
    }

    fn number_len(rest: &str) -> usize {
        let bytes = rest.as_bytes();
        let radix = bytes.len() > 1
            && bytes[0] == b'0'
            && matches!(bytes[1], b'x' | b'X' | b'o' | b'O' | b'b' | b'B');

        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            let exponent_sign =
                matches!(b, b'+' | b'-') && !radix && i > 0 && matches!(bytes[i - 1], b'e' | b'E');
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || exponent_sign {
                i += 1;
            } else {
                break;
            }
        }
        i
    }
}
