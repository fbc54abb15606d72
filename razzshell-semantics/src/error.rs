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

//! Errors the executor can raise (`spec.md` §7's taxonomy, minus syntax
//! errors, which belong to `razzshell-syntax::ParseError`).

use razzshell_env::SystemError;

/// Everything that can go wrong while walking an AST to an exit status.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("{0}: unbound variable")]
    UnsetVariable(String),
    #[error("unterminated command substitution")]
    UnterminatedSubstitution,
    #[error("{target}: {source}")]
    Redirection {
        target: String,
        #[source]
        source: SystemError,
    },
    #[error("fork failed: {0}")]
    ForkFailed(#[source] SystemError),
    #[error(transparent)]
    System(#[from] SystemError),
    #[error("{0}: command not found")]
    CommandNotFound(String),
    #[error("{0}: permission denied")]
    NotExecutable(String),
    #[error("job table is full")]
    JobTableFull(#[from] razzshell_env::job::JobTableFull),
    #[error("no such job: {0}")]
    NoSuchJob(usize),
    #[error("malformed `[[ ... ]]` test expression: {0}")]
    MalformedTest(String),
    #[error("{0} is reserved but not implemented by this shell")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, ExecError>;
