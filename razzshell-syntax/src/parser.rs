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

//! Recursive-descent parser: turns a token stream into a [`Node`] tree.
//!
//! The parser keeps two tokens of lookahead (`current`, `peek`), which is
//! exactly enough to decide whether a leading `WORD` starts an assignment
//! (`peek` is `=`) or a plain command word, without backtracking.
//!
//! On the first syntax error, parsing stops and the partial tree built so
//! far is discarded; [`ParseError`] carries enough position information for
//! a caller to render a line/column diagnostic.

use crate::ast::syntax::{
    AstError, Assignment, Command, HereDoc, Node, Pipeline, RedirKind, Redirection,
};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use std::fmt;

/// Everything that can go wrong while turning tokens into a [`Node`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub line: u32,
    pub column: u32,
    pub len: usize,
    pub kind: ParseErrorKind,
}

/// Distinguishes the one error a REPL driver should treat specially (read
/// another line and retry) from every other, terminal, syntax error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseErrorKind {
    /// A here-document's closing delimiter was never found in the buffer
    /// handed to the parser. An interactive driver may append one more
    /// line to the source and re-parse from the top; a parser fed a fixed
    /// string (as in tests) should treat it as terminal.
    UnterminatedHereDoc,
    Syntax,
}

impl ParseError {
    fn new(message: impl Into<String>, line: u32, column: u32, len: usize) -> Self {
        ParseError {
            message: message.into(),
            line,
            column,
            len: len.max(1),
            kind: ParseErrorKind::Syntax,
        }
    }

    fn unterminated_heredoc(delimiter: &str, line: u32, column: u32) -> Self {
        ParseError {
            message: format!("unterminated here-document (`{delimiter}` not found)"),
            line,
            column,
            len: 1,
            kind: ParseErrorKind::UnterminatedHereDoc,
        }
    }

    /// Renders a line/column diagnostic with a caret under the offending
    /// text, in the style `spec.md` §7 asks for syntax errors.
    pub fn render(&self, source: &str) -> String {
        use annotate_snippets::{Level, Renderer, Snippet};

        let line_text = source.lines().nth((self.line.saturating_sub(1)) as usize).unwrap_or("");
        let start = (self.column.saturating_sub(1)) as usize;
        let end = (start + self.len).min(line_text.len().max(start));
        let message = Level::Error.title(&self.message).snippet(
            Snippet::source(line_text)
                .line_start(self.line as usize)
                .annotation(Level::Error.span(start..end)),
        );
        Renderer::plain().render(message).to_string()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<AstError> for ParseError {
    fn from(err: AstError) -> Self {
        // AST construction errors surface without useful position context by
        // the time they reach here; callers that need a location attach one
        // with `ParseError::new` at the call site instead.
        ParseError::new(err.to_string(), 0, 0, 1)
    }
}

/// Computes the absolute byte offset of `(line, column)` in `source`,
///1-based on both axes, matching [`Token`]'s coordinate system.
fn offset_of(source: &str, line: u32, column: u32) -> usize {
    let mut offset = 0usize;
    let mut cur_line = 1u32;
    if line > 1 {
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                cur_line += 1;
                if cur_line == line {
                    offset = i + 1;
                    break;
                }
            }
        }
    }
    offset + (column.saturating_sub(1)) as usize
}

fn adjacent(prev: &Token, next: &Token) -> bool {
    prev.line == next.line && next.column == prev.column + prev.lexeme.len() as u32
}

pub struct Parser<'a> {
    source: &'a str,
    lexer: Lexer<'a>,
    current: Token,
    peek: Token,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Parser {
            source,
            lexer,
            current,
            peek,
        }
    }

    /// Parses every command line in the buffer, stopping at the first error.
    pub fn parse_program(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut lines = Vec::new();
        loop {
            self.skip_separators();
            if self.current.kind == TokenKind::Eof {
                break;
            }
            match self.parse_line()? {
                Some(node) => lines.push(node),
                None => break,
            }
        }
        Ok(lines)
    }

    /// Parses one `line` production (`spec.md` §4.3): a chain of pipelines
    /// joined by `;`, `&&`, or `||`, left-associative regardless of which
    /// operator joins which pair. Returns `None` for a blank line.
    pub fn parse_line(&mut self) -> Result<Option<Node>, ParseError> {
        self.skip_blank_separators();
        if self.current.is_line_end() {
            return Ok(None);
        }

        let mut items = vec![self.parse_pipeline()?];
        loop {
            match self.current.kind {
                TokenKind::Semicolon => {
                    self.advance();
                    self.skip_blank_separators();
                    if self.current.is_line_end() {
                        break;
                    }
                    items.push(self.parse_pipeline()?);
                }
                TokenKind::And => {
                    self.advance();
                    self.skip_newlines();
                    let rhs = self.parse_pipeline()?;
                    let lhs = items.pop().expect("items always has at least one element");
                    items.push(Node::AndList(Box::new(lhs), Box::new(rhs)));
                }
                TokenKind::Or => {
                    self.advance();
                    self.skip_newlines();
                    let rhs = self.parse_pipeline()?;
                    let lhs = items.pop().expect("items always has at least one element");
                    items.push(Node::OrList(Box::new(lhs), Box::new(rhs)));
                }
                _ => break,
            }
        }

        Ok(Some(if items.len() == 1 {
            items.into_iter().next().unwrap()
        } else {
            Node::List(items)
        }))
    }

    fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        let old_current = std::mem::replace(&mut self.current, std::mem::replace(&mut self.peek, next));
        old_current
    }

    fn skip_newlines(&mut self) {
        while self.current.kind == TokenKind::Newline {
            self.advance();
        }
    }

    /// Skips newlines and stray semicolons between commands (a blank line,
    /// or `;;` typed by mistake, is not itself an error).
    fn skip_blank_separators(&mut self) {
        while matches!(self.current.kind, TokenKind::Newline | TokenKind::Semicolon) {
            self.advance();
        }
    }

    fn skip_separators(&mut self) {
        self.skip_blank_separators();
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(
            message,
            self.current.line,
            self.current.column,
            self.current.lexeme.len(),
        )
    }

    fn parse_pipeline(&mut self) -> Result<Node, ParseError> {
        let mut stages = vec![self.parse_command()?];
        while self.current.kind == TokenKind::Pipe {
            self.advance();
            self.skip_newlines();
            stages.push(self.parse_command()?);
        }
        if stages.len() == 1 {
            Ok(stages.into_iter().next().unwrap())
        } else {
            Ok(Node::Pipeline(Pipeline::new(stages, false)?))
        }
    }

    fn parse_command(&mut self) -> Result<Node, ParseError> {
        match self.current.kind {
            TokenKind::LParen => self.parse_subshell(),
            TokenKind::DblBracketL => self.parse_test(),
            TokenKind::Word if self.peek.kind == TokenKind::Assign => self.parse_assignments_then_command(),
            TokenKind::Word => Ok(Node::Command(self.parse_simple_body()?)),
            _ => Err(self.error(format!("expected a command, found {}", self.current.kind))),
        }
    }

    fn parse_subshell(&mut self) -> Result<Node, ParseError> {
        self.advance(); // (
        self.skip_newlines();
        if self.current.kind == TokenKind::RParen {
            return Err(self.error("a subshell cannot be empty"));
        }
        let inner = self
            .parse_line()?
            .ok_or_else(|| self.error("a subshell cannot be empty"))?;
        self.skip_newlines();
        if self.current.kind != TokenKind::RParen {
            return Err(self.error(format!("expected `)`, found {}", self.current.kind)));
        }
        self.advance();
        Ok(Node::Subshell(Box::new(inner)))
    }

    fn parse_test(&mut self) -> Result<Node, ParseError> {
        self.advance(); // [[
        let mut tokens = Vec::new();
        while self.current.kind != TokenKind::DblBracketR {
            if self.current.is_line_end() {
                return Err(self.error("unterminated `[[ ... ]]` test expression"));
            }
            tokens.push(self.current.lexeme.clone());
            self.advance();
        }
        self.advance(); // ]]
        Ok(Node::Test(crate::ast::syntax::Test { tokens }))
    }

    /// Consumes one or more leading `WORD = WORD?` assignments. If a
    /// non-assignment command word follows, the assignments attach to that
    /// [`Command`]; otherwise a single assignment stands alone as
    /// [`Node::Assignment`], and more than one with no following command
    /// collapses into a [`Node::List`] of standalone assignments — the
    /// grammar names only the single-assignment case, so this is this
    /// parser's own extension of it to the multi-assignment edge case.
    fn parse_assignments_then_command(&mut self) -> Result<Node, ParseError> {
        let mut assignments = Vec::new();
        while self.current.kind == TokenKind::Word && self.peek.kind == TokenKind::Assign {
            assignments.push(self.parse_one_assignment()?);
        }

        let starts_command = matches!(
            self.current.kind,
            TokenKind::Word
                | TokenKind::RedirIn
                | TokenKind::RedirOut
                | TokenKind::RedirAppend
                | TokenKind::RedirErr
                | TokenKind::RedirBoth
                | TokenKind::HereDoc
                | TokenKind::HereDocStrip
        );

        if starts_command {
            let mut command = self.parse_simple_body()?;
            command.assignments = assignments;
            Ok(Node::Command(command))
        } else if assignments.len() == 1 {
            Ok(Node::Assignment(assignments.into_iter().next().unwrap()))
        } else {
            Ok(Node::List(assignments.into_iter().map(Node::Assignment).collect()))
        }
    }

    fn parse_one_assignment(&mut self) -> Result<Assignment, ParseError> {
        let name_tok = self.advance(); // WORD
        self.advance(); // =
        let value = if self.current.kind == TokenKind::Word {
            self.advance().lexeme
        } else {
            String::new()
        };
        Ok(Assignment::new(name_tok.lexeme, value)?)
    }

    fn parse_simple_body(&mut self) -> Result<Command, ParseError> {
        let mut argv: Vec<String> = Vec::new();
        let mut redirections = Vec::new();
        let mut background = false;

        loop {
            match self.current.kind {
                TokenKind::Word => {
                    let word_tok = self.advance();
                    let mut text = word_tok.lexeme.clone();
                    let mut last = word_tok;
                    // Once the command name itself has been read, a later
                    // `WORD = WORD` triple with no intervening whitespace is
                    // an ordinary argument (e.g. `env NAME=value cmd` keeps
                    // `NAME=value` as one word), not a fresh assignment.
                    if !argv.is_empty() {
                        while self.current.kind == TokenKind::Assign && adjacent(&last, &self.current) {
                            let eq_tok = self.advance();
                            text.push('=');
                            last = eq_tok;
                            if self.current.kind == TokenKind::Word && adjacent(&last, &self.current) {
                                let next_word = self.advance();
                                text.push_str(&next_word.lexeme);
                                last = next_word;
                            }
                        }
                    }
                    argv.push(text);
                }
                TokenKind::RedirIn
                | TokenKind::RedirOut
                | TokenKind::RedirAppend
                | TokenKind::RedirErr
                | TokenKind::RedirBoth => {
                    redirections.push(self.parse_redirection()?);
                }
                TokenKind::HereDoc | TokenKind::HereDocStrip => {
                    redirections.push(self.parse_heredoc_redirection()?);
                }
                TokenKind::Background => {
                    self.advance();
                    background = true;
                    break;
                }
                _ => break,
            }
        }

        let mut command = Command::new(argv)?;
        command.redirections = redirections;
        command.background = background;
        Ok(command)
    }

    fn parse_redirection(&mut self) -> Result<Redirection, ParseError> {
        let op = self.advance();
        let kind = match op.kind {
            TokenKind::RedirIn => RedirKind::Input,
            TokenKind::RedirOut => RedirKind::Output,
            TokenKind::RedirAppend => RedirKind::Append,
            TokenKind::RedirErr => RedirKind::Error,
            TokenKind::RedirBoth => RedirKind::Both,
            _ => unreachable!("parse_redirection only called on a redirection token"),
        };
        if self.current.kind != TokenKind::Word {
            return Err(self.error(format!(
                "expected a filename after {}, found {}",
                op.kind, self.current.kind
            )));
        }
        let target = self.advance().lexeme;
        Ok(Redirection::new(kind, target))
    }

    fn parse_heredoc_redirection(&mut self) -> Result<Redirection, ParseError> {
        let op = self.advance(); // << or <<-
        let strip = op.kind == TokenKind::HereDocStrip;
        if self.current.kind != TokenKind::Word {
            return Err(self.error(format!(
                "expected a here-document delimiter after {}, found {}",
                op.kind, self.current.kind
            )));
        }
        let delim_tok = self.advance();
        let delimiter = delim_tok
            .lexeme
            .trim_matches(|c| c == '\'' || c == '"')
            .to_string();

        let (content, body_end) = self.capture_heredoc_body(&delim_tok, &delimiter, strip)?;
        self.lexer.register_skip(
            offset_of(self.source, delim_tok.line, delim_tok.column) + delim_tok.lexeme.len(),
            body_end,
        );

        let kind = if strip {
            RedirKind::HereDocStrip
        } else {
            RedirKind::HereDoc
        };
        Ok(Redirection::here_doc(kind, delimiter, content))
    }

    /// Scans `self.source` directly (independent of the token stream, which
    /// may already be one or two tokens past the delimiter) for the
    /// here-document body: everything from the end of the line containing
    /// the operator up to a line consisting of exactly `delimiter`.
    ///
    /// Returns the captured text and the absolute offset just past the
    /// terminator line, which the caller registers as a skip range so the
    /// main tokenizer passes over it untouched.
    fn capture_heredoc_body(
        &self,
        delim_tok: &Token,
        delimiter: &str,
        strip: bool,
    ) -> Result<(String, usize), ParseError> {
        let delim_end = offset_of(self.source, delim_tok.line, delim_tok.column) + delim_tok.lexeme.len();
        let body_start = match self.source[delim_end..].find('\n') {
            Some(rel) => delim_end + rel + 1,
            None => {
                return Err(ParseError::unterminated_heredoc(
                    delimiter,
                    delim_tok.line,
                    delim_tok.column,
                ));
            }
        };

        let mut content = String::new();
        let mut cursor = body_start;
        loop {
            if cursor >= self.source.len() {
                return Err(ParseError::unterminated_heredoc(
                    delimiter,
                    delim_tok.line,
                    delim_tok.column,
                ));
            }
            let rest = &self.source[cursor..];
            let line_end = rest.find('\n').map(|i| cursor + i + 1).unwrap_or(self.source.len());
            let raw_line = &self.source[cursor..line_end];
            let trimmed = raw_line.trim_end_matches('\n');
            let compare = if strip { trimmed.trim_start_matches('\t') } else { trimmed };
            if compare == delimiter {
                return Ok((content, line_end));
            }
            let body_line = if strip { trimmed.trim_start_matches('\t') } else { trimmed };
            content.push_str(body_line);
            content.push('\n');
            cursor = line_end;
        }
    }
}

/// Parses a standalone here-document's redirection together with its
/// captured content into the statement-level [`HereDoc`] node `spec.md` §3
/// describes, for callers that model a bare here-document as its own
/// statement rather than always attached to a command.
pub fn heredoc_statement(redir: &Redirection) -> Option<HereDoc> {
    if !matches!(redir.kind, RedirKind::HereDoc | RedirKind::HereDocStrip) {
        return None;
    }
    Some(HereDoc {
        delimiter: redir.target.clone(),
        content: redir.content.clone().unwrap_or_default(),
        strip_tabs: redir.kind == RedirKind::HereDocStrip,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(src: &str) -> Node {
        Parser::new(src)
            .parse_line()
            .expect("parse should succeed")
            .expect("line should not be blank")
    }

    #[test]
    fn simple_command_parses_argv() {
        let node = parse_one("echo hello world");
        match node {
            Node::Command(c) => assert_eq!(c.argv, vec!["echo", "hello", "world"]),
            other => panic!("expected a command, got {other:?}"),
        }
    }

    #[test]
    fn pipeline_collects_stages_left_to_right() {
        let node = parse_one("ls -l | grep foo | wc -l");
        match node {
            Node::Pipeline(p) => assert_eq!(p.stages.len(), 3),
            other => panic!("expected a pipeline, got {other:?}"),
        }
    }

    #[test]
    fn and_or_chain_is_left_associative() {
        // Property: `a && b || c` groups as `(a && b) || c`.
        let node = parse_one("a && b || c");
        match node {
            Node::OrList(lhs, rhs) => {
                assert!(matches!(*lhs, Node::AndList(_, _)));
                assert!(matches!(*rhs, Node::Command(_)));
            }
            other => panic!("expected an OR_LIST at the root, got {other:?}"),
        }
    }

    #[test]
    fn semicolon_list_collects_every_statement() {
        let node = parse_one("a; b; c");
        match node {
            Node::List(items) => assert_eq!(items.len(), 3),
            other => panic!("expected a list, got {other:?}"),
        }
    }

    #[test]
    fn leading_assignment_attaches_to_following_command() {
        let node = parse_one("FOO=bar echo hi");
        match node {
            Node::Command(c) => {
                assert_eq!(c.assignments, vec![Assignment::new("FOO", "bar").unwrap()]);
                assert_eq!(c.argv, vec!["echo", "hi"]);
            }
            other => panic!("expected a command, got {other:?}"),
        }
    }

    #[test]
    fn standalone_assignment_with_no_command_is_its_own_node() {
        let node = parse_one("FOO=bar");
        assert_eq!(node, Node::Assignment(Assignment::new("FOO", "bar").unwrap()));
    }

    #[test]
    fn mid_command_word_equals_word_is_one_argument() {
        let node = parse_one("env FOO=bar");
        match node {
            Node::Command(c) => assert_eq!(c.argv, vec!["env", "FOO=bar"]),
            other => panic!("expected a command, got {other:?}"),
        }
    }

    #[test]
    fn redirections_attach_to_the_command() {
        let node = parse_one("sort < in.txt > out.txt");
        match node {
            Node::Command(c) => {
                assert_eq!(c.redirections.len(), 2);
                assert_eq!(c.redirections[0].kind, RedirKind::Input);
                assert_eq!(c.redirections[1].kind, RedirKind::Output);
            }
            other => panic!("expected a command, got {other:?}"),
        }
    }

    #[test]
    fn background_flag_is_recognized() {
        let node = parse_one("sleep 10 &");
        match node {
            Node::Command(c) => assert!(c.background),
            other => panic!("expected a command, got {other:?}"),
        }
    }

    #[test]
    fn subshell_wraps_its_inner_line() {
        let node = parse_one("(a; b)");
        match node {
            Node::Subshell(inner) => assert!(matches!(*inner, Node::List(_))),
            other => panic!("expected a subshell, got {other:?}"),
        }
    }

    #[test]
    fn test_expression_captures_raw_tokens() {
        let node = parse_one("[[ -f foo.txt ]]");
        match node {
            Node::Test(t) => assert_eq!(t.tokens, vec!["-f", "foo.txt"]),
            other => panic!("expected a test, got {other:?}"),
        }
    }

    #[test]
    fn here_doc_body_is_captured_up_to_delimiter_line() {
        let src = "cat <<EOF\nline one\nline two\nEOF\n";
        let node = parse_one(src);
        match node {
            Node::Command(c) => {
                assert_eq!(c.redirections.len(), 1);
                assert_eq!(
                    c.redirections[0].content.as_deref(),
                    Some("line one\nline two\n")
                );
            }
            other => panic!("expected a command, got {other:?}"),
        }
    }

    #[test]
    fn here_doc_strip_removes_leading_tabs() {
        let src = "cat <<-EOF\n\t\tindented\nEOF\n";
        let node = parse_one(src);
        match node {
            Node::Command(c) => {
                assert_eq!(c.redirections[0].content.as_deref(), Some("indented\n"));
            }
            other => panic!("expected a command, got {other:?}"),
        }
    }

    #[test]
    fn here_doc_followed_by_more_tokens_on_same_line() {
        let src = "cat <<EOF | wc -l\nbody\nEOF\n";
        let node = parse_one(src);
        match node {
            Node::Pipeline(p) => {
                assert_eq!(p.stages.len(), 2);
                match &p.stages[0] {
                    Node::Command(c) => {
                        assert_eq!(c.redirections[0].content.as_deref(), Some("body\n"));
                    }
                    other => panic!("expected a command stage, got {other:?}"),
                }
            }
            other => panic!("expected a pipeline, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_here_doc_is_reported() {
        let mut parser = Parser::new("cat <<EOF\nbody\n");
        let err = parser.parse_line().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedHereDoc);
    }

    #[test]
    fn unknown_operator_position_reports_line_and_column() {
        let mut parser = Parser::new("echo hi |\n| more");
        let err = parser.parse_line().unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn round_trip_through_display_preserves_shape() {
        let node = parse_one("a | b && c; d");
        let rendered = node.to_string();
        // Property 4: a pretty-printed tree names every node kind the
        // original parse produced, at the right nesting.
        assert!(rendered.contains("LIST"));
        assert!(rendered.contains("AND_LIST"));
        assert!(rendered.contains("PIPELINE"));
    }

    #[test]
    fn blank_line_parses_to_nothing() {
        let mut parser = Parser::new("   \n");
        assert_eq!(parser.parse_line().unwrap(), None);
    }

    #[test]
    fn program_parses_every_line_in_a_multiline_buffer() {
        let mut parser = Parser::new("a\nb\nc\n");
        let lines = parser.parse_program().unwrap();
        assert_eq!(lines.len(), 3);
    }
}
