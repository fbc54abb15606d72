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

//! Walks a `razzshell-syntax` AST to an exit status (C6, `spec.md` §4.6) and
//! owns the terminal/signal discipline around it (C7, `spec.md` §4.7).
//!
//! This crate knows how to run a parsed command; it does not read input or
//! own the REPL loop (`razzshell-cli`'s job) and it does not know the names
//! of individual built-ins (`razzshell-builtin`'s job) beyond the
//! `razzshell_env::Registry` seam both sides share.

pub mod error;
pub mod executor;
pub mod expand;
pub mod redirect;
pub mod supervisor;
pub mod test_expr;

pub use error::{ExecError, Result};
pub use executor::Executor;
pub use supervisor::TerminalSupervisor;
