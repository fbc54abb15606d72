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

//! Production [`System`] implementation, backed directly by `nix`/`libc`.

use super::{ForkOutcome, Result, SignalAction, System, SystemError};
use nix::fcntl::OFlag;
use nix::sys::signal::{SigAction, SigHandler, SigSet, Signal};
use nix::sys::stat::Mode as FileMode;
use nix::sys::wait::{WaitPidFlag, WaitStatus};
use nix::unistd::Pid;
use std::ffi::{CString, OsString};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::RawFd;
use std::path::{Path, PathBuf};

/// The real, one-per-process system. `spec.md` §9 calls out that only one
/// instance should exist per process (forking twice from two instances
/// would race on process-wide state like the controlling terminal).
pub struct UnixSystem {
    _private: (),
}

impl UnixSystem {
    /// # Safety
    /// The caller must ensure at most one `UnixSystem` exists in the
    /// process, since `fork` and signal-handler installation are
    /// process-wide state.
    pub unsafe fn new() -> Self {
        UnixSystem { _private: () }
    }
}

impl Default for UnixSystem {
    fn default() -> Self {
        // SAFETY: constructing the default instance is the documented
        // single-instance-per-process use; callers who need more control
        // use `UnixSystem::new` directly.
        unsafe { UnixSystem::new() }
    }
}

impl System for UnixSystem {
    unsafe fn fork(&mut self) -> Result<ForkOutcome> {
        match nix::unistd::fork()? {
            nix::unistd::ForkResult::Parent { child } => Ok(ForkOutcome::Parent(child)),
            nix::unistd::ForkResult::Child => Ok(ForkOutcome::Child),
        }
    }

    fn execve(&mut self, path: &CString, args: &[CString], envp: &[CString]) -> Result<()> {
        loop {
            let err = nix::unistd::execve(path, args, envp).unwrap_err();
            if err != nix::Error::EINTR {
                return Err(SystemError(err));
            }
        }
    }

    fn pipe(&mut self) -> Result<(RawFd, RawFd)> {
        use std::os::fd::IntoRawFd;
        let (r, w) = nix::unistd::pipe()?;
        Ok((r.into_raw_fd(), w.into_raw_fd()))
    }

    fn dup2(&mut self, oldfd: RawFd, newfd: RawFd) -> Result<RawFd> {
        Ok(nix::unistd::dup2(oldfd, newfd)?)
    }

    fn close(&mut self, fd: RawFd) -> Result<()> {
        Ok(nix::unistd::close(fd)?)
    }

    fn set_nonblocking(&mut self, fd: RawFd) -> Result<()> {
        use nix::fcntl::{fcntl, FcntlArg};
        let current = OFlag::from_bits_truncate(fcntl(fd, FcntlArg::F_GETFL)?);
        fcntl(fd, FcntlArg::F_SETFL(current | OFlag::O_NONBLOCK))?;
        Ok(())
    }

    fn open(&mut self, path: &Path, flags: OFlag, mode: FileMode) -> Result<RawFd> {
        Ok(nix::fcntl::open(path, flags, mode)?)
    }

    fn waitpid(&mut self, pid: Pid, block: bool, untraced: bool) -> Result<WaitStatus> {
        let mut flags = WaitPidFlag::empty();
        if !block {
            flags |= WaitPidFlag::WNOHANG;
        }
        if untraced {
            flags |= WaitPidFlag::WUNTRACED;
        }
        flags |= WaitPidFlag::WCONTINUED;
        Ok(nix::sys::wait::waitpid(pid, Some(flags))?)
    }

    fn getpid(&self) -> Pid {
        nix::unistd::getpid()
    }

    fn getpgrp(&self) -> Pid {
        nix::unistd::getpgrp()
    }

    fn setpgid(&mut self, pid: Pid, pgid: Pid) -> Result<()> {
        Ok(nix::unistd::setpgid(pid, pgid)?)
    }

    fn tcgetpgrp(&self, fd: RawFd) -> Result<Pid> {
        use std::os::fd::BorrowedFd;
        // SAFETY: `fd` is a valid, open descriptor for the lifetime of this call.
        let borrowed = unsafe { BorrowedFd::borrow_raw(fd) };
        Ok(nix::unistd::tcgetpgrp(borrowed)?)
    }

    fn tcsetpgrp(&mut self, fd: RawFd, pgid: Pid) -> Result<()> {
        use std::os::fd::BorrowedFd;
        // SAFETY: see `tcgetpgrp`.
        let borrowed = unsafe { BorrowedFd::borrow_raw(fd) };
        Ok(nix::unistd::tcsetpgrp(borrowed, pgid)?)
    }

    fn kill(&mut self, pid: Pid, signal: Signal) -> Result<()> {
        Ok(nix::sys::signal::kill(pid, signal)?)
    }

    fn set_signal_action(&mut self, signal: Signal, handler: SignalAction) -> Result<()> {
        let action = match handler {
            SignalAction::Ignore => SigAction::new(
                SigHandler::SigIgn,
                nix::sys::signal::SaFlags::empty(),
                SigSet::empty(),
            ),
            SignalAction::Default => SigAction::new(
                SigHandler::SigDfl,
                nix::sys::signal::SaFlags::empty(),
                SigSet::empty(),
            ),
            SignalAction::Catch => SigAction::new(
                SigHandler::Handler(self_pipe_handler),
                nix::sys::signal::SaFlags::empty(),
                SigSet::empty(),
            ),
        };
        // SAFETY: the handler is either a libc-provided disposition or the
        // crate's own async-signal-safe no-op, which only records that a
        // signal arrived (via a self-pipe in the real supervisor) rather
        // than touching shared state directly.
        unsafe { nix::sys::signal::sigaction(signal, &action)? };
        Ok(())
    }

    fn chdir(&mut self, path: &Path) -> Result<()> {
        Ok(nix::unistd::chdir(path)?)
    }

    fn getcwd(&self) -> Result<PathBuf> {
        Ok(nix::unistd::getcwd()?)
    }

    fn isatty(&self, fd: RawFd) -> bool {
        nix::unistd::isatty(fd).unwrap_or(false)
    }

    fn getenv(&self, name: &str) -> Option<OsString> {
        std::env::var_os(name)
    }

    fn setenv(&mut self, name: &str, value: &str) {
        std::env::set_var(name, value);
    }

    fn unsetenv(&mut self, name: &str) {
        std::env::remove_var(name);
    }

    fn environ(&self) -> Vec<(String, String)> {
        std::env::vars().collect()
    }

    fn find_in_path(&self, name: &str) -> Option<PathBuf> {
        if name.contains('/') {
            let path = PathBuf::from(name);
            return is_executable(&path).then_some(path);
        }
        let path_var = std::env::var_os("PATH")?;
        for dir in std::env::split_paths(&path_var) {
            let candidate = dir.join(name);
            if is_executable(&candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

/// A minimal async-signal-safe handler: writes one byte to the
/// supervisor's self-pipe write end, if installed, and does nothing else.
/// `spec.md` §9 flags raw signal handlers mutating shared state as unsafe;
/// this keeps the handler itself inert and lets `razzshell-semantics`'
/// terminal supervisor observe the signal synchronously by reading the
/// pipe between `waitpid`/`read` calls.
use std::sync::atomic::{AtomicI32, Ordering};

/// Write end of the self-pipe the supervisor reads to learn a caught
/// signal arrived; -1 until [`set_self_pipe_write_fd`] is called.
static SELF_PIPE_WRITE_FD: AtomicI32 = AtomicI32::new(-1);

/// Registers the write end of the self-pipe `self_pipe_handler` writes to.
/// Called once by the terminal supervisor during startup, before any
/// signal whose action is [`SignalAction::Catch`] is installed.
pub fn set_self_pipe_write_fd(fd: RawFd) {
    SELF_PIPE_WRITE_FD.store(fd, Ordering::Relaxed);
}

extern "C" fn self_pipe_handler(_signo: i32) {
    let fd = SELF_PIPE_WRITE_FD.load(Ordering::Relaxed);
    if fd >= 0 {
        let byte = [1u8];
        // SAFETY: `write` is async-signal-safe; a short write is fine since
        // the reader only cares that *a* byte arrived.
        unsafe {
            libc::write(fd, byte.as_ptr() as *const libc::c_void, 1);
        }
    }
}

fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Converts a `&str` argv entry to a `CString`, used by the executor when
/// building the `execve` argument vector.
pub fn to_cstring(s: &str) -> CString {
    CString::new(OsString::from(s).as_bytes()).unwrap_or_default()
}
