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

//! Seam between `razzshell-builtin`'s `fg`/`bg` handlers and the terminal
//! supervisor that actually owns `tcsetpgrp` (`razzshell-semantics::
//! TerminalSupervisor`).
//!
//! This crate cannot depend on `razzshell-semantics` (that crate already
//! depends on this one), so the dependency is inverted the same way the
//! `System` trait inverts process primitives: this crate defines the
//! trait, `razzshell-semantics` implements it, and [`ShellContext`]
//! carries a `dyn TerminalControl` so a built-in can transfer terminal
//! ownership without knowing who implements the transfer.

use crate::system::System;
use nix::unistd::Pid;

/// What a job-control built-in (`fg`, `bg`) needs from the terminal
/// supervisor: handing the terminal to a job's process group for a
/// foreground wait, and reclaiming it afterward (`spec.md` §4.6/§4.7).
pub trait TerminalControl {
    fn hand_to(&mut self, system: &mut dyn System, pgrp: Pid);
    fn reclaim(&mut self, system: &mut dyn System);
}

/// A no-op implementation for contexts with no real terminal to manage
/// (unit tests that never route through a `TerminalSupervisor`).
pub struct NullTerminalControl;

impl TerminalControl for NullTerminalControl {
    fn hand_to(&mut self, _system: &mut dyn System, _pgrp: Pid) {}
    fn reclaim(&mut self, _system: &mut dyn System) {}
}
