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

//! [`FakeSystem`]: an in-memory [`System`] double that never forks or
//! execs for real. It records every call in order so a test can assert the
//! executor issued the right sequence of pipe/dup2/setpgid/waitpid calls
//! for a given AST, without a real kernel underneath.

use super::{ForkOutcome, Result, SignalAction, System, SystemError};
use nix::fcntl::OFlag;
use nix::sys::signal::Signal;
use nix::sys::stat::Mode as FileMode;
use nix::sys::wait::WaitStatus;
use nix::unistd::Pid;
use std::collections::HashMap;
use std::ffi::{CString, OsString};
use std::os::unix::io::RawFd;
use std::path::{Path, PathBuf};

/// One call `FakeSystem` observed, in the order it was made.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RecordedCall {
    Fork,
    Execve { path: String, args: Vec<String> },
    Pipe,
    Dup2 { oldfd: RawFd, newfd: RawFd },
    Close(RawFd),
    Open { path: PathBuf, flags: OFlag },
    WaitPid { pid: Pid, block: bool },
    SetPgid { pid: Pid, pgid: Pid },
    TcSetPgrp { pgid: Pid },
    Kill { pid: Pid, signal: Signal },
    SetSignalAction { signal: Signal, action: SignalAction },
    Chdir(PathBuf),
    SetNonblocking(RawFd),
}

/// Queued response for the next [`System::waitpid`] call, since a test
/// typically wants to script "this child exited with status N" without a
/// real process to wait on.
#[derive(Clone, Copy, Debug)]
pub enum ScriptedWait {
    Exited(Pid, i32),
    Signaled(Pid, Signal),
    Stopped(Pid, Signal),
    StillAlive,
}

/// In-memory test double for [`System`].
///
/// Every fd-producing call hands out a synthetic descriptor from an
/// internal counter starting at 100 (comfortably above stdio's 0-2) so
/// assertions can check "did this dup2 target fd 1" without colliding with
/// real descriptors in the test process.
pub struct FakeSystem {
    pub calls: Vec<RecordedCall>,
    next_fd: RawFd,
    next_pid: i32,
    cwd: PathBuf,
    env: HashMap<String, String>,
    foreground_pgrp: Pid,
    own_pgrp: Pid,
    scripted_waits: Vec<ScriptedWait>,
    path_entries: HashMap<String, PathBuf>,
}

impl FakeSystem {
    pub fn new() -> Self {
        FakeSystem {
            calls: Vec::new(),
            next_fd: 100,
            next_pid: 1000,
            cwd: PathBuf::from("/"),
            env: HashMap::new(),
            foreground_pgrp: Pid::from_raw(1),
            own_pgrp: Pid::from_raw(1),
            scripted_waits: Vec::new(),
            path_entries: HashMap::new(),
        }
    }

    /// Queues the result of the next `waitpid` call (FIFO order).
    pub fn script_wait(&mut self, outcome: ScriptedWait) {
        self.scripted_waits.push(outcome);
    }

    /// Registers `name` as "found on $PATH" at `path`, for
    /// [`System::find_in_path`] tests that don't want to touch the real
    /// filesystem.
    pub fn register_path_entry(&mut self, name: &str, path: impl Into<PathBuf>) {
        self.path_entries.insert(name.to_string(), path.into());
    }

    fn alloc_fd(&mut self) -> RawFd {
        let fd = self.next_fd;
        self.next_fd += 1;
        fd
    }
}

impl Default for FakeSystem {
    fn default() -> Self {
        FakeSystem::new()
    }
}

impl System for FakeSystem {
    unsafe fn fork(&mut self) -> Result<ForkOutcome> {
        self.calls.push(RecordedCall::Fork);
        let pid = self.next_pid;
        self.next_pid += 1;
        Ok(ForkOutcome::Parent(Pid::from_raw(pid)))
    }

    fn execve(&mut self, path: &CString, args: &[CString], _envp: &[CString]) -> Result<()> {
        self.calls.push(RecordedCall::Execve {
            path: path.to_string_lossy().into_owned(),
            args: args
                .iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect(),
        });
        // A fake `execve` never succeeds in replacing the (nonexistent)
        // child image; it always reports as if the executable could not
        // be found, which is the only sensible fake outcome here.
        Err(SystemError(nix::Error::ENOENT))
    }

    fn pipe(&mut self) -> Result<(RawFd, RawFd)> {
        self.calls.push(RecordedCall::Pipe);
        Ok((self.alloc_fd(), self.alloc_fd()))
    }

    fn dup2(&mut self, oldfd: RawFd, newfd: RawFd) -> Result<RawFd> {
        self.calls.push(RecordedCall::Dup2 { oldfd, newfd });
        Ok(newfd)
    }

    fn close(&mut self, fd: RawFd) -> Result<()> {
        self.calls.push(RecordedCall::Close(fd));
        Ok(())
    }

    fn open(&mut self, path: &Path, flags: OFlag, _mode: FileMode) -> Result<RawFd> {
        self.calls.push(RecordedCall::Open {
            path: path.to_path_buf(),
            flags,
        });
        Ok(self.alloc_fd())
    }

    fn set_nonblocking(&mut self, fd: RawFd) -> Result<()> {
        self.calls.push(RecordedCall::SetNonblocking(fd));
        Ok(())
    }

    fn waitpid(&mut self, pid: Pid, block: bool, _untraced: bool) -> Result<WaitStatus> {
        self.calls.push(RecordedCall::WaitPid { pid, block });
        match self.scripted_waits.first().copied() {
            Some(outcome) => {
                self.scripted_waits.remove(0);
                Ok(match outcome {
                    ScriptedWait::Exited(p, code) => WaitStatus::Exited(p, code),
                    ScriptedWait::Signaled(p, sig) => WaitStatus::Signaled(p, sig, false),
                    ScriptedWait::Stopped(p, sig) => WaitStatus::Stopped(p, sig),
                    ScriptedWait::StillAlive => WaitStatus::StillAlive,
                })
            }
            None => Ok(WaitStatus::Exited(pid, 0)),
        }
    }

    fn getpid(&self) -> Pid {
        Pid::from_raw(self.next_pid - 1)
    }

    fn getpgrp(&self) -> Pid {
        self.own_pgrp
    }

    fn setpgid(&mut self, pid: Pid, pgid: Pid) -> Result<()> {
        self.calls.push(RecordedCall::SetPgid { pid, pgid });
        Ok(())
    }

    fn tcgetpgrp(&self, _fd: RawFd) -> Result<Pid> {
        Ok(self.foreground_pgrp)
    }

    fn tcsetpgrp(&mut self, _fd: RawFd, pgid: Pid) -> Result<()> {
        self.calls.push(RecordedCall::TcSetPgrp { pgid });
        self.foreground_pgrp = pgid;
        Ok(())
    }

    fn kill(&mut self, pid: Pid, signal: Signal) -> Result<()> {
        self.calls.push(RecordedCall::Kill { pid, signal });
        Ok(())
    }

    fn set_signal_action(&mut self, signal: Signal, action: SignalAction) -> Result<()> {
        self.calls.push(RecordedCall::SetSignalAction { signal, action });
        Ok(())
    }

    fn chdir(&mut self, path: &Path) -> Result<()> {
        self.calls.push(RecordedCall::Chdir(path.to_path_buf()));
        self.cwd = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        };
        Ok(())
    }

    fn getcwd(&self) -> Result<PathBuf> {
        Ok(self.cwd.clone())
    }

    fn isatty(&self, _fd: RawFd) -> bool {
        true
    }

    fn getenv(&self, name: &str) -> Option<OsString> {
        self.env.get(name).map(OsString::from)
    }

    fn setenv(&mut self, name: &str, value: &str) {
        self.env.insert(name.to_string(), value.to_string());
    }

    fn unsetenv(&mut self, name: &str) {
        self.env.remove(name);
    }

    fn environ(&self) -> Vec<(String, String)> {
        self.env.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    fn find_in_path(&self, name: &str) -> Option<PathBuf> {
        self.path_entries.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipe_hands_out_increasing_fds_above_stdio() {
        let mut sys = FakeSystem::new();
        let (r, w) = sys.pipe().unwrap();
        assert!(r > 2 && w > 2 && w != r);
    }

    #[test]
    fn scripted_wait_reports_the_queued_outcome() {
        let mut sys = FakeSystem::new();
        let pid = Pid::from_raw(42);
        sys.script_wait(ScriptedWait::Exited(pid, 7));
        let status = sys.waitpid(pid, true, false).unwrap();
        assert_eq!(status, WaitStatus::Exited(pid, 7));
    }

    #[test]
    fn tcsetpgrp_updates_foreground_group() {
        let mut sys = FakeSystem::new();
        sys.tcsetpgrp(0, Pid::from_raw(55)).unwrap();
        assert_eq!(sys.tcgetpgrp(0).unwrap(), Pid::from_raw(55));
    }

    #[test]
    fn calls_are_recorded_in_order() {
        let mut sys = FakeSystem::new();
        sys.pipe().unwrap();
        sys.setpgid(Pid::from_raw(1), Pid::from_raw(1)).unwrap();
        assert_eq!(sys.calls.len(), 2);
        assert!(matches!(sys.calls[0], RecordedCall::Pipe));
        assert!(matches!(sys.calls[1], RecordedCall::SetPgid { .. }));
    }

    #[test]
    fn env_vars_round_trip() {
        let mut sys = FakeSystem::new();
        sys.setenv("FOO", "bar");
        assert_eq!(sys.getenv("FOO").unwrap(), OsString::from("bar"));
        sys.unsetenv("FOO");
        assert!(sys.getenv("FOO").is_none());
    }
}
