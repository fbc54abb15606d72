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

//! The `System` trait: every OS primitive `razzshell-semantics` needs,
//! behind a seam so the executor can be driven in tests without spawning
//! real processes.
//!
//! [`UnixSystem`] is the production implementation, backed by `nix`/`libc`.
//! [`FakeSystem`] is an in-memory test double: it never actually forks or
//! execs, but records every call it receives so tests can assert the
//! *sequence* of pipe/dup2/setpgid/waitpid calls the executor issues is
//! correct (`spec.md` §4.6/§5's pipeline fan-out and job-control discipline)
//! without needing a real child process to observe.

mod fake;
mod unix;

pub use fake::{FakeSystem, RecordedCall, ScriptedWait};
pub use unix::{set_self_pipe_write_fd, to_cstring, UnixSystem};

use nix::fcntl::OFlag;
use nix::sys::signal::Signal;
use nix::sys::stat::Mode as FileMode;
use nix::sys::wait::WaitStatus;
use nix::unistd::Pid;
use std::ffi::{CString, OsString};
use std::os::unix::io::RawFd;
use std::path::PathBuf;

/// Every error a `System` method can raise: a thin wrapper over `nix`'s
/// `errno`-based error so callers get `Display`/`Error` without caring
/// which libc call underneath produced it.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct SystemError(#[from] pub nix::Error);

pub type Result<T> = std::result::Result<T, SystemError>;

/// Outcome of [`System::fork`]: which side of the fork we are.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ForkOutcome {
    /// We are the parent; the argument is the new child's PID.
    Parent(Pid),
    /// We are the (possibly simulated) child.
    Child,
}

/// The OS primitives `spec.md` §4.6/§4.7/§5 name: process creation and
/// exec, pipe/dup2/fd plumbing, job control (`setpgid`/`tcsetpgrp`), and
/// waiting.
pub trait System {
    /// Forks the process. In the child branch (`ForkOutcome::Child`), the
    /// caller is expected to finish setting up redirections/process group
    /// and call [`System::execve`] or exit; it must never return to the
    /// caller's normal control flow on that branch in `UnixSystem`.
    ///
    /// # Safety
    /// Forking a multi-threaded process is undefined behavior if the child
    /// does anything beyond async-signal-safe calls before `exec`/`_exit`;
    /// callers must keep the child path limited to that.
    unsafe fn fork(&mut self) -> Result<ForkOutcome>;

    /// Replaces the current process image. Only returns on error (a
    /// successful `execve` never returns, matching the POSIX contract);
    /// `UnixSystem` loops internally past `EINTR`.
    fn execve(&mut self, path: &CString, args: &[CString], envp: &[CString]) -> Result<()>;

    fn pipe(&mut self) -> Result<(RawFd, RawFd)>;
    fn dup2(&mut self, oldfd: RawFd, newfd: RawFd) -> Result<RawFd>;
    fn close(&mut self, fd: RawFd) -> Result<()>;
    fn open(&mut self, path: &std::path::Path, flags: OFlag, mode: FileMode) -> Result<RawFd>;

    /// Sets `O_NONBLOCK` on an already-open descriptor. The terminal
    /// supervisor uses this on the self-pipe's read end so `poll_sigint`
    /// can drain it without blocking when no signal has arrived
    /// (`spec.md` §9's self-pipe note).
    fn set_nonblocking(&mut self, fd: RawFd) -> Result<()>;

    fn waitpid(&mut self, pid: Pid, block: bool, untraced: bool) -> Result<WaitStatus>;

    fn getpid(&self) -> Pid;
    fn getpgrp(&self) -> Pid;
    fn setpgid(&mut self, pid: Pid, pgid: Pid) -> Result<()>;

    fn tcgetpgrp(&self, fd: RawFd) -> Result<Pid>;
    fn tcsetpgrp(&mut self, fd: RawFd, pgid: Pid) -> Result<()>;

    fn kill(&mut self, pid: Pid, signal: Signal) -> Result<()>;
    /// Installs a handler (or `SIG_IGN`/`SIG_DFL`) for `signal`, returning
    /// the previously installed disposition's raw representation for
    /// diagnostics/tests; `razzshell-semantics` only ever installs a small
    /// fixed set (`spec.md` §4.7).
    fn set_signal_action(&mut self, signal: Signal, handler: SignalAction) -> Result<()>;

    fn chdir(&mut self, path: &std::path::Path) -> Result<()>;
    fn getcwd(&self) -> Result<PathBuf>;

    fn isatty(&self, fd: RawFd) -> bool;

    fn getenv(&self, name: &str) -> Option<OsString>;
    fn setenv(&mut self, name: &str, value: &str);
    fn unsetenv(&mut self, name: &str);

    /// The full environment as `(name, value)` pairs, in whatever order
    /// the underlying store iterates them. Used by `printenv` and by the
    /// executor to build a forked child's `execve` envp.
    fn environ(&self) -> Vec<(String, String)>;

    /// Searches `$PATH` for an executable named `name`, the way the
    /// executor resolves the final "external executable" tier of
    /// `spec.md` §4.5's priority order.
    fn find_in_path(&self, name: &str) -> Option<PathBuf>;
}

/// The small, fixed vocabulary of signal dispositions the supervisor
/// installs (`spec.md` §4.7): ignore, default, or "handle and let the REPL
/// observe it" (realized with a self-pipe in `razzshell-semantics`, per
/// `spec.md` §9's note on handler safety).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SignalAction {
    Ignore,
    Default,
    Catch,
}
