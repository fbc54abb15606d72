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

//! Signal & Terminal Supervisor (C7, `spec.md` §4.7).
//!
//! At startup: become our own process group leader, take the controlling
//! terminal's foreground group, and save its modes. Install the fixed
//! handler set (`SIGINT` caught via a self-pipe so the REPL observes it
//! synchronously rather than mutating state from async-signal context,
//! per `spec.md` §9; `SIGTSTP`/`SIGTTOU`/`SIGQUIT` ignored in the shell
//! itself). On every foreground wait, re-assert terminal ownership to the
//! shell once the child is done, on every code path (`spec.md` §4.6).

use nix::sys::signal::Signal;
use nix::sys::termios::Termios;
use nix::unistd::Pid;
use razzshell_env::{SignalAction, System, TerminalControl};
use std::os::unix::io::RawFd;

/// File descriptor the supervisor treats as "the controlling terminal";
/// conventionally fd 0 (stdin), matching an interactive shell reading its
/// own input from the terminal.
const TERMINAL_FD: RawFd = 0;

pub struct TerminalSupervisor {
    shell_pgrp: Pid,
    saved_modes: Option<Termios>,
    self_pipe_read: Option<RawFd>,
}

impl TerminalSupervisor {
    /// Establishes the shell as its own process group and takes the
    /// terminal, saving its current modes if fd 0 is actually a tty
    /// (tests running under `FakeSystem` report `isatty` true but have no
    /// real terminal to save modes from, so mode-saving is best-effort).
    pub fn start(system: &mut dyn System) -> razzshell_env::system::Result<Self> {
        let own_pid = system.getpid();
        system.setpgid(own_pid, own_pid)?;
        let shell_pgrp = system.getpgrp();
        if system.isatty(TERMINAL_FD) {
            let _ = system.tcsetpgrp(TERMINAL_FD, shell_pgrp);
        }
        let saved_modes = if system.isatty(TERMINAL_FD) {
            nix::sys::termios::tcgetattr(unsafe {
                std::os::fd::BorrowedFd::borrow_raw(TERMINAL_FD)
            })
            .ok()
        } else {
            None
        };

        let mut supervisor = TerminalSupervisor {
            shell_pgrp,
            saved_modes,
            self_pipe_read: None,
        };
        supervisor.install_handlers(system)?;
        Ok(supervisor)
    }

    fn install_handlers(&mut self, system: &mut dyn System) -> razzshell_env::system::Result<()> {
        if let Ok((read_fd, write_fd)) = system.pipe() {
            // The read end must be non-blocking: `poll_sigint` drains it
            // opportunistically and must never block when nothing has
            // arrived (the write end stays open for the process lifetime,
            // so a blocking read would never see EOF either).
            let _ = system.set_nonblocking(read_fd);
            razzshell_env::set_self_pipe_write_fd(write_fd);
            self.self_pipe_read = Some(read_fd);
        }
        system.set_signal_action(Signal::SIGINT, SignalAction::Catch)?;
        system.set_signal_action(Signal::SIGTSTP, SignalAction::Ignore)?;
        system.set_signal_action(Signal::SIGTTOU, SignalAction::Ignore)?;
        system.set_signal_action(Signal::SIGQUIT, SignalAction::Ignore)?;
        Ok(())
    }

    /// The shell's own, stable process group, used by every caller that
    /// needs to hand the terminal back after a foreground wait.
    pub fn shell_pgrp(&self) -> Pid {
        self.shell_pgrp
    }

    /// Non-blocking check for whether `SIGINT` has arrived since the last
    /// call, by draining the self-pipe. The REPL (C8) calls this between
    /// reading a line and parsing it, so `SIGINT` at the prompt can clear
    /// the partial line rather than terminating anything.
    pub fn poll_sigint(&self) -> bool {
        let Some(read_fd) = self.self_pipe_read else {
            return false;
        };
        let mut buf = [0u8; 16];
        let mut saw_any = false;
        loop {
            match nix::unistd::read(read_fd, &mut buf) {
                Ok(0) => break,
                Ok(_) => saw_any = true,
                Err(nix::Error::EAGAIN) => break,
                Err(_) => break,
            }
        }
        saw_any
    }

    /// Transfers terminal ownership to `pgrp` (a foreground job's process
    /// group) for the duration of a foreground wait.
    pub fn hand_terminal_to(&self, system: &mut dyn System, pgrp: Pid) {
        if system.isatty(TERMINAL_FD) {
            let _ = system.tcsetpgrp(TERMINAL_FD, pgrp);
        }
    }

    /// Re-asserts that the shell's own process group owns the terminal.
    /// Called on every path out of a foreground wait, including early
    /// returns, per `spec.md` §4.6's "parent always restores terminal
    /// ownership... on every path" invariant.
    pub fn reclaim_terminal(&self, system: &mut dyn System) {
        if system.isatty(TERMINAL_FD) {
            let _ = system.tcsetpgrp(TERMINAL_FD, self.shell_pgrp);
        }
    }

    /// Restores the terminal's saved modes, e.g. on clean shutdown.
    pub fn restore_terminal_modes(&self, _system: &mut dyn System) {
        if let Some(modes) = &self.saved_modes {
            let fd = unsafe { std::os::fd::BorrowedFd::borrow_raw(TERMINAL_FD) };
            let _ = nix::sys::termios::tcsetattr(
                fd,
                nix::sys::termios::SetArg::TCSANOW,
                modes,
            );
        }
    }
}

/// Lets `razzshell-builtin`'s `fg`/`bg` handlers drive terminal ownership
/// through [`ShellContext::terminal`](razzshell_env::ShellContext)
/// without depending on this crate directly.
impl TerminalControl for TerminalSupervisor {
    fn hand_to(&mut self, system: &mut dyn System, pgrp: Pid) {
        TerminalSupervisor::hand_terminal_to(self, system, pgrp);
    }

    fn reclaim(&mut self, system: &mut dyn System) {
        TerminalSupervisor::reclaim_terminal(self, system);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use razzshell_env::FakeSystem;

    #[test]
    fn start_sets_own_pgrp_and_installs_handlers() {
        let mut system = FakeSystem::new();
        let supervisor = TerminalSupervisor::start(&mut system).unwrap();
        assert!(system
            .calls
            .iter()
            .any(|c| matches!(c, razzshell_env::RecordedCall::SetPgid { .. })));
        assert!(system.calls.iter().any(|c| matches!(
            c,
            razzshell_env::RecordedCall::SetSignalAction {
                signal: Signal::SIGINT,
                action: SignalAction::Catch
            }
        )));
        assert_eq!(supervisor.shell_pgrp(), system.getpgrp());
    }

    #[test]
    fn reclaim_terminal_sets_pgrp_back_to_shell() {
        let mut system = FakeSystem::new();
        let supervisor = TerminalSupervisor::start(&mut system).unwrap();
        supervisor.hand_terminal_to(&mut system, Pid::from_raw(4242));
        assert_eq!(system.tcgetpgrp(0).unwrap(), Pid::from_raw(4242));
        supervisor.reclaim_terminal(&mut system);
        assert_eq!(system.tcgetpgrp(0).unwrap(), supervisor.shell_pgrp());
    }
}
