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

//! Token types produced by the [lexer](crate::lexer).

use std::fmt;

/// Closed enumeration of token kinds the lexer can produce.
///
/// The lexer always recognizes the longest matching operator first; see
/// [`crate::lexer::Lexer`] for the exact precedence of multi-byte operators.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenKind {
    Word,
    Pipe,
    RedirIn,
    RedirOut,
    RedirAppend,
    RedirErr,
    RedirBoth,
    Background,
    Semicolon,
    And,
    Or,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    DblBracketL,
    DblBracketR,
    HereDoc,
    HereDocStrip,
    SubstStart,
    Backtick,
    Dollar,
    Assign,
    Newline,
    Eof,
    Error,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Word => "word",
            TokenKind::Pipe => "`|`",
            TokenKind::RedirIn => "`<`",
            TokenKind::RedirOut => "`>`",
            TokenKind::RedirAppend => "`>>`",
            TokenKind::RedirErr => "`2>`",
            TokenKind::RedirBoth => "`&>`",
            TokenKind::Background => "`&`",
            TokenKind::Semicolon => "`;`",
            TokenKind::And => "`&&`",
            TokenKind::Or => "`||`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::DblBracketL => "`[[`",
            TokenKind::DblBracketR => "`]]`",
            TokenKind::HereDoc => "`<<`",
            TokenKind::HereDocStrip => "`<<-`",
            TokenKind::SubstStart => "`$(`",
            TokenKind::Backtick => "`` ` ``",
            TokenKind::Dollar => "`$`",
            TokenKind::Assign => "`=`",
            TokenKind::Newline => "newline",
            TokenKind::Eof => "end of input",
            TokenKind::Error => "lexical error",
        };
        f.write_str(s)
    }
}

/// A single lexical token.
///
/// `lexeme` is the exact source slice: quote characters are retained and
/// escape sequences are left unprocessed, since word expansion is deferred to
/// the executor (`razzshell-semantics`). `line`/`column` are 1-based and
/// always point into the original input line, even for the synthetic `Eof`
/// token appended after the last real one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32, column: u32) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    /// True for the tokens a parser treats as "nothing more to read here":
    /// end of input or a bare newline.
    pub fn is_line_end(&self) -> bool {
        matches!(self.kind, TokenKind::Eof | TokenKind::Newline)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}
