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

//! A [`ShellContext`] is all borrows, so no test can own one directly; this
//! holds the owned pieces a test needs and lends out a context built on top
//! of them, the way `razzshell-cli`'s REPL loop does for the real thing.

use nix::unistd::Pid;
use razzshell_env::{
    FakeSystem, History, JobTable, Mode, NullTerminalControl, Registry, ShellConfig, ShellContext,
};

pub struct Harness {
    pub system: FakeSystem,
    pub config: ShellConfig,
    pub jobs: JobTable,
    pub registry: Registry,
    pub history: History,
    pub terminal: NullTerminalControl,
    pub shell_pid: Pid,
    pub last_status: i32,
}

impl Harness {
    pub fn context(&mut self) -> ShellContext<'_> {
        ShellContext::new(
            &mut self.system,
            &mut self.config,
            &mut self.jobs,
            &mut self.registry,
            &mut self.history,
            &mut self.terminal,
            self.shell_pid,
            self.last_status,
        )
    }
}

/// A fresh harness in `Mode::Native` with an empty job table, registry, and
/// history — every built-in test starts from this and mutates what it needs.
pub fn ctx_harness() -> Harness {
    Harness {
        system: FakeSystem::new(),
        config: ShellConfig::new(Mode::Native),
        jobs: JobTable::new(),
        registry: Registry::new(),
        history: History::new(),
        terminal: NullTerminalControl,
        shell_pid: Pid::from_raw(1),
        last_status: 0,
    }
}
