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

//! Shell configuration, command registry, job table, and the `System` trait
//! that abstracts the OS primitives `razzshell-semantics` drives.
//!
//! This crate knows nothing about the AST or how it is executed; it only
//! defines the state C4/C5 of `spec.md` §4 describe and the seam
//! (`System`/`UnixSystem`/`FakeSystem`) that lets the executor be exercised
//! without forking real processes.

pub mod config;
pub mod context;
pub mod history;
pub mod job;
pub mod posix_compat;
pub mod registry;
pub mod system;
pub mod terminal;

pub use config::{Mode, ShellConfig, ShellFlags};
pub use context::ShellContext;
pub use history::History;
pub use job::{Job, JobState, JobTable, MAX_JOBS};
pub use registry::{
    BuiltinEntry, BuiltinHandler, PluginEntry, PluginEntryPoint, Registry, RegistryError,
    Resolution, MAX_ALIASES, MAX_PLUGINS,
};
pub use system::{
    set_self_pipe_write_fd, to_cstring, FakeSystem, ForkOutcome, RecordedCall, ScriptedWait,
    SignalAction, System, SystemError, UnixSystem,
};
pub use terminal::{NullTerminalControl, TerminalControl};
