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

//! Lexer, abstract syntax tree and parser for the RazzShell command language.
//!
//! This crate is a pure value layer: it has no knowledge of processes, file
//! descriptors, or the environment. Given a line of input it produces a
//! [`syntax::Node`], the root of an AST, which a consumer such as
//! `razzshell-semantics` walks to execute the line.
//!
//! ## Pipeline
//!
//! ```text
//! &str -> Lexer -> Token stream -> Parser -> syntax::Node
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::syntax;
pub use lexer::Lexer;
pub use parser::{ParseError, ParseErrorKind, Parser};
pub use token::{Token, TokenKind};
