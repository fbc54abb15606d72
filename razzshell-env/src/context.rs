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

//! [`ShellContext`]: the bundle of state a built-in handler or the
//! executor threads through a command's execution.
//!
//! `spec.md` §9 calls for grouping the shell's global state into "an
//! explicit `ShellState` value threaded by reference through the
//! executor"; `ShellContext` is that value, borrowed rather than owned so
//! both the executor and `razzshell-builtin`'s handlers can reach the same
//! `System`, `Registry` and `JobTable` without cloning them.

use crate::config::ShellConfig;
use crate::history::History;
use crate::job::JobTable;
use crate::registry::Registry;
use crate::system::System;
use crate::terminal::TerminalControl;
use nix::unistd::Pid;

/// Everything a built-in (or the executor step that invokes one) needs.
///
/// Built-ins run in-process with the shell's file descriptors already
/// redirected by the executor's save/restore stack (`spec.md` §4.6), so
/// they read/write through ordinary `std::io::stdin()/stdout()/stderr()`
/// rather than anything on this struct.
pub struct ShellContext<'a> {
    pub system: &'a mut dyn System,
    pub config: &'a mut ShellConfig,
    pub jobs: &'a mut JobTable,
    pub registry: &'a mut Registry,
    pub history: &'a mut History,
    /// Terminal ownership transfer for `fg`/`bg`, implemented by
    /// `razzshell-semantics::TerminalSupervisor`.
    pub terminal: &'a mut dyn TerminalControl,
    /// PID of the shell process itself (also its process-group ID at rest).
    pub shell_pid: Pid,
    /// The exit status of the most recently completed command, consulted
    /// by built-ins like `exit` with no explicit argument.
    pub last_status: i32,
    /// Set by the `exit`/`quit` built-in to request that the REPL tear
    /// down after this command returns; `None` means "keep looping".
    pub exit_requested: Option<i32>,
}

impl<'a> ShellContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        system: &'a mut dyn System,
        config: &'a mut ShellConfig,
        jobs: &'a mut JobTable,
        registry: &'a mut Registry,
        history: &'a mut History,
        terminal: &'a mut dyn TerminalControl,
        shell_pid: Pid,
        last_status: i32,
    ) -> Self {
        ShellContext {
            system,
            config,
            jobs,
            registry,
            history,
            terminal,
            shell_pid,
            last_status,
            exit_requested: None,
        }
    }
}
