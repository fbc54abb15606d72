// This file is part of RazzShell.
// Copyright (C) 2026 The RazzShell authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Byte-stream lexer: turns one line of shell source into a token stream.
//!
//! The lexer is a pull model: [`Lexer::next_token`] yields one [`Token`] at a
//! time. It does not look ahead beyond what is needed to recognize an
//! operator, and it does not process escapes or expansions — those are the
//! executor's job. See `spec.md` §4.1 for the exact recognition rules this
//! module implements.

use crate::token::{Token, TokenKind};

/// Operators recognized by the lexer, longest match first.
///
/// Order matters: `"2>"` must be tried before a bare digit is folded into a
/// word, and multi-byte operators must be tried before their single-byte
/// prefixes (`"||"` before `"|"`, `"<<-"` before `"<<"` before `"<"`).
const MULTI_BYTE_OPERATORS: &[(&str, TokenKind)] = &[
    ("||", TokenKind::Or),
    ("&&", TokenKind::And),
    (">>", TokenKind::RedirAppend),
    ("<<-", TokenKind::HereDocStrip),
    ("<<", TokenKind::HereDoc),
    ("&>", TokenKind::RedirBoth),
    ("2>", TokenKind::RedirErr),
    ("[[", TokenKind::DblBracketL),
    ("]]", TokenKind::DblBracketR),
    ("$(", TokenKind::SubstStart),
];

fn single_byte_operator(b: u8) -> Option<TokenKind> {
    match b {
        b'|' => Some(TokenKind::Pipe),
        b'&' => Some(TokenKind::Background),
        b';' => Some(TokenKind::Semicolon),
        b'<' => Some(TokenKind::RedirIn),
        b'>' => Some(TokenKind::RedirOut),
        b'(' => Some(TokenKind::LParen),
        b')' => Some(TokenKind::RParen),
        b'{' => Some(TokenKind::LBrace),
        b'}' => Some(TokenKind::RBrace),
        b'[' => Some(TokenKind::LBracket),
        b']' => Some(TokenKind::RBracket),
        b'`' => Some(TokenKind::Backtick),
        b'$' => Some(TokenKind::Dollar),
        b'=' => Some(TokenKind::Assign),
        _ => None,
    }
}

/// True for a byte that can never be part of an unquoted word: whitespace,
/// an operator-starting byte, or a quote character (quotes are consumed by
/// the dedicated quote-scanning loop in [`Lexer::read_word`]).
fn breaks_word(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'\'' | b'"' | b'\\')
        || single_byte_operator(b).is_some()
}

/// Pull-model lexer over one line (or multi-line buffer, for here-document
/// collection) of shell source.
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    line: u32,
    column: u32,
    /// Byte ranges (start, end) of here-document bodies the parser has
    /// already consumed directly from `source`. The main token loop jumps
    /// over any such range it walks into, so the body text is never
    /// re-tokenized as ordinary command syntax.
    skip_ranges: Vec<(usize, usize)>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            pos: 0,
            line: 1,
            column: 1,
            skip_ranges: Vec::new(),
        }
    }

    /// The full source this lexer was built from.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Current byte offset into `source()`.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Registers `[start, end)` as here-document content already claimed by
    /// the parser, to be skipped over once ordinary tokenizing reaches it.
    pub fn register_skip(&mut self, start: usize, end: usize) {
        if end > start {
            self.skip_ranges.push((start, end));
        }
    }

    /// Jumps straight to `pos`, recomputing line/column from scratch.
    fn seek(&mut self, pos: usize) {
        let pos = pos.min(self.source.len());
        let mut line = 1u32;
        let mut column = 1u32;
        for b in self.source[..pos].bytes() {
            if b == b'\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        self.pos = pos;
        self.line = line;
        self.column = column;
    }

    fn apply_skips(&mut self) {
        loop {
            let hit = self
                .skip_ranges
                .iter()
                .find(|(s, e)| self.pos >= *s && self.pos < *e)
                .copied();
            match hit {
                Some((_, end)) => self.seek(end),
                None => break,
            }
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek_byte(&self) -> Option<u8> {
        self.rest().as_bytes().first().copied()
    }

    fn advance_byte(&mut self) -> Option<u8> {
        let b = self.peek_byte()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(b)
    }

    fn skip_comment(&mut self) {
        while let Some(b) = self.peek_byte() {
            if b == b'\n' {
                break;
            }
            self.advance_byte();
        }
    }

    /// Produces the next token, or `None` once the lexer has already
    /// returned an `Eof`/`Error` token and should not be called again.
    pub fn next_token(&mut self) -> Token {
        self.apply_skips();
        loop {
            self.apply_skips();
            match self.peek_byte() {
                None => return Token::new(TokenKind::Eof, "", self.line, self.column),
                Some(b' ') | Some(b'\t') | Some(b'\r') => {
                    self.advance_byte();
                    continue;
                }
                Some(b'#') => {
                    self.skip_comment();
                    continue;
                }
                _ => break,
            }
        }

        let start_line = self.line;
        let start_column = self.column;

        if self.peek_byte() == Some(b'\n') {
            self.advance_byte();
            return Token::new(TokenKind::Newline, "\n", start_line, start_column);
        }

        for (text, kind) in MULTI_BYTE_OPERATORS {
            if self.rest().as_bytes().starts_with(text.as_bytes()) {
                for _ in 0..text.len() {
                    self.advance_byte();
                }
                return Token::new(*kind, *text, start_line, start_column);
            }
        }

        if let Some(b) = self.peek_byte() {
            if let Some(kind) = single_byte_operator(b) {
                self.advance_byte();
                return Token::new(kind, (b as char).to_string(), start_line, start_column);
            }
            if b == b'\'' || b == b'"' || b == b'\\' || b.is_ascii_graphic() {
                return self.read_word(start_line, start_column);
            }
            // An unrecognized control byte: not whitespace, not an operator,
            // not printable ASCII that could start a word.
            self.advance_byte();
            return Token::new(
                TokenKind::Error,
                format!("unexpected byte 0x{b:02x}"),
                start_line,
                start_column,
            );
        }

        Token::new(TokenKind::Eof, "", start_line, start_column)
    }

    /// Reads a maximal run of non-operator, non-whitespace bytes, absorbing
    /// quoted segments (which may themselves contain whitespace and
    /// operator characters) into the word.
    fn read_word(&mut self, start_line: u32, start_column: u32) -> Token {
        let start = self.pos;
        loop {
            match self.peek_byte() {
                Some(q @ b'\'') | Some(q @ b'"') => {
                    if let Err(message) = self.skip_quoted(q) {
                        return Token::new(TokenKind::Error, message, start_line, start_column);
                    }
                }
                Some(b'\\') => {
                    // Inside an unquoted word, `\<any>` consumes two bytes
                    // verbatim; both stay in the lexeme for the executor to
                    // interpret later.
                    self.advance_byte();
                    if self.peek_byte().is_some() {
                        self.advance_byte();
                    }
                }
                Some(b) if !breaks_word(b) => {
                    self.advance_byte();
                }
                _ => break,
            }
        }
        let lexeme = &self.source[start..self.pos];
        Token::new(TokenKind::Word, lexeme, start_line, start_column)
    }

    /// Consumes a quoted segment starting at the opening quote `quote`,
    /// leaving `self.pos` just past the matching closing quote. The only
    /// escape recognized inside quotes is `\<quote>`, so a quoted string may
    /// embed its own delimiter.
    fn skip_quoted(&mut self, quote: u8) -> Result<(), String> {
        self.advance_byte(); // opening quote
        loop {
            match self.peek_byte() {
                None => {
                    return Err(format!(
                        "unterminated {} quote",
                        if quote == b'\'' { "single" } else { "double" }
                    ));
                }
                Some(b) if b == quote => {
                    self.advance_byte();
                    return Ok(());
                }
                Some(b'\\') if self.rest().as_bytes().get(1) == Some(&quote) => {
                    self.advance_byte();
                    self.advance_byte();
                }
                Some(_) => {
                    self.advance_byte();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(src);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token();
            let done = matches!(tok.kind, TokenKind::Eof | TokenKind::Error);
            out.push(tok);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn reproduces_input_by_concatenating_lexemes() {
        // Property 1: concatenating lexemes with original whitespace
        // reproduces the input. We check the simpler invariant that every
        // token's lexeme is a verbatim substring of the input, in order.
        let src = "echo 'hi there' | cat >> out.txt && true";
        let toks = tokens(src);
        let mut cursor = 0;
        for tok in &toks {
            if tok.kind == TokenKind::Eof {
                continue;
            }
            let idx = src[cursor..].find(&tok.lexeme).map(|i| i + cursor).unwrap();
            cursor = idx + tok.lexeme.len();
        }
    }

    #[test]
    fn multi_byte_operators_are_single_tokens() {
        for (text, kind) in MULTI_BYTE_OPERATORS {
            let toks = tokens(text);
            assert_eq!(toks[0].kind, *kind, "{text} did not lex as one token");
            assert_eq!(toks[0].lexeme, *text);
        }
    }

    #[test]
    fn bare_digit_before_redirect_is_not_fd_redirect() {
        let toks = tokens("2 > out");
        assert_eq!(toks[0].kind, TokenKind::Word);
        assert_eq!(toks[0].lexeme, "2");
        assert_eq!(toks[1].kind, TokenKind::RedirOut);
    }

    #[test]
    fn fd_two_redirect_is_recognized() {
        let toks = tokens("2>err.log");
        assert_eq!(toks[0].kind, TokenKind::RedirErr);
    }

    #[test]
    fn unterminated_quote_yields_one_error_then_stops() {
        let toks = tokens("echo 'unterminated");
        assert_eq!(toks.last().unwrap().kind, TokenKind::Error);
        assert_eq!(toks.len(), 2);
    }

    #[test]
    fn quoted_segment_absorbs_whitespace_and_operators() {
        let toks = tokens("echo 'a | b'");
        assert_eq!(toks[1].kind, TokenKind::Word);
        assert_eq!(toks[1].lexeme, "'a | b'");
    }

    #[test]
    fn embedded_quote_escape_keeps_word_open() {
        let toks = tokens(r#"echo 'it'\''s'"#);
        assert_eq!(toks[1].kind, TokenKind::Word);
        assert_eq!(toks[1].lexeme, r#"'it'\''s'"#);
    }

    #[test]
    fn assign_is_its_own_token() {
        let toks = tokens("FOO=bar");
        assert_eq!(
            toks.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![TokenKind::Word, TokenKind::Assign, TokenKind::Word, TokenKind::Eof]
        );
    }

    #[test]
    fn comment_runs_to_end_of_line() {
        let toks = tokens("echo hi # comment\ntrue");
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::Newline,
                TokenKind::Word,
                TokenKind::Eof,
            ]
        );
    }
}
