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

//! Redirection discipline (`spec.md` §4.6): applied left-to-right, later
//! redirections `dup2` over earlier ones. For built-ins run in-process,
//! the affected descriptors are saved before opening the new targets and
//! restored afterward; a forked child applies them permanently since the
//! process exits right after.

use crate::error::{ExecError, Result};
use enumset::{EnumSet, EnumSetType};
use nix::fcntl::OFlag;
use nix::sys::stat::Mode as FileMode;
use razzshell_syntax::syntax::{RedirKind, Redirection};
use razzshell_env::System;
use std::os::unix::io::RawFd;

/// The three standard descriptors a redirection can target, tracked as a
/// set so a save/restore pass touches each real fd at most once even if a
/// command's redirection list mentions it more than once (`spec.md` says
/// "duplicate targets are re-opened, not shared", but we only ever need to
/// remember the *original* value once per fd to restore it correctly).
#[derive(Debug, EnumSetType)]
pub enum StdFd {
    Stdin,
    Stdout,
    Stderr,
}

impl StdFd {
    fn raw(self) -> RawFd {
        match self {
            StdFd::Stdin => 0,
            StdFd::Stdout => 1,
            StdFd::Stderr => 2,
        }
    }
}

/// A saved copy of one standard descriptor's original target, to be
/// `dup2`'d back into place once a built-in returns.
struct SavedFd {
    which: StdFd,
    saved_copy: RawFd,
}

/// The save/restore stack `spec.md` §4.6 describes for built-ins run
/// in-process.
#[derive(Default)]
pub struct RedirectGuard {
    saved: Vec<SavedFd>,
    touched: EnumSet<StdFd>,
}

impl RedirectGuard {
    fn save_once(&mut self, system: &mut dyn System, which: StdFd) -> Result<()> {
        if self.touched.contains(which) {
            return Ok(());
        }
        self.touched |= which;
        // `dup` the descriptor aside via `dup2` onto a scratch fd the
        // kernel chooses for us is not available through this crate's
        // `System` surface (no bare `dup`), so we `dup2` onto a fixed
        // high scratch fd per standard stream; redirections never target
        // those fds themselves since they only ever name 0/1/2.
        let scratch = 90 + which as RawFd;
        system.dup2(which.raw(), scratch)?;
        self.saved.push(SavedFd {
            which,
            saved_copy: scratch,
        });
        Ok(())
    }

    /// Restores every descriptor this guard touched, in reverse order.
    pub fn restore(self, system: &mut dyn System) {
        for saved in self.saved.into_iter().rev() {
            let _ = system.dup2(saved.saved_copy, saved.which.raw());
            let _ = system.close(saved.saved_copy);
        }
    }
}

fn std_fd_for(kind: RedirKind) -> (StdFd, Option<StdFd>) {
    match kind {
        RedirKind::Input | RedirKind::HereDoc | RedirKind::HereDocStrip => (StdFd::Stdin, None),
        RedirKind::Output | RedirKind::Append => (StdFd::Stdout, None),
        RedirKind::Error => (StdFd::Stderr, None),
        RedirKind::Both => (StdFd::Stdout, Some(StdFd::Stderr)),
    }
}

/// Applies one already-target-expanded redirection to the process's
/// descriptor table. `guard` is `Some` when running a built-in in-process
/// (so the original descriptor is saved first); `None` in a forked child,
/// where there is nothing to restore.
pub fn apply_one(
    system: &mut dyn System,
    redir: &Redirection,
    target: &str,
    guard: Option<&mut RedirectGuard>,
) -> Result<()> {
    let (primary, secondary) = std_fd_for(redir.kind);
    if let Some(guard) = guard {
        guard.save_once(system, primary)?;
        if let Some(secondary) = secondary {
            guard.save_once(system, secondary)?;
        }
    }

    let fd = match redir.kind {
        RedirKind::Input => open_target(system, target, OFlag::O_RDONLY)?,
        RedirKind::Output => open_target(
            system,
            target,
            OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC,
        )?,
        RedirKind::Append => open_target(
            system,
            target,
            OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_APPEND,
        )?,
        RedirKind::Error => open_target(
            system,
            target,
            OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC,
        )?,
        RedirKind::Both => open_target(
            system,
            target,
            OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC,
        )?,
        RedirKind::HereDoc | RedirKind::HereDocStrip => {
            write_heredoc_pipe(system, redir.content.as_deref().unwrap_or(""))?
        }
    };

    system
        .dup2(fd, primary.raw())
        .map_err(|e| ExecError::Redirection {
            target: target.to_string(),
            source: e,
        })?;
    if let Some(secondary) = secondary {
        system
            .dup2(fd, secondary.raw())
            .map_err(|e| ExecError::Redirection {
                target: target.to_string(),
                source: e,
            })?;
    }
    if fd != primary.raw() && secondary.map(|s| fd != s.raw()).unwrap_or(true) {
        let _ = system.close(fd);
    }
    Ok(())
}

fn open_target(system: &mut dyn System, target: &str, flags: OFlag) -> Result<RawFd> {
    let mode = FileMode::S_IRUSR | FileMode::S_IWUSR | FileMode::S_IRGRP | FileMode::S_IROTH;
    system
        .open(std::path::Path::new(target), flags, mode)
        .map_err(|e| ExecError::Redirection {
            target: target.to_string(),
            source: e,
        })
}

/// Writes a here-document's captured body to a pipe and returns the read
/// end, which the caller `dup2`s onto fd 0.
fn write_heredoc_pipe(system: &mut dyn System, content: &str) -> Result<RawFd> {
    let (read_fd, write_fd) = system.pipe()?;
    // SAFETY: `write_fd` was just created by `system.pipe()` and is not
    // otherwise in use; taking ownership here to write and close it is
    // sound, and a real `UnixSystem` pipe fd is a plain OS descriptor.
    use std::io::Write;
    use std::os::unix::io::FromRawFd;
    let mut writer = unsafe { std::fs::File::from_raw_fd(write_fd) };
    let _ = writer.write_all(content.as_bytes());
    drop(writer); // closes write_fd, signaling EOF to the reader
    Ok(read_fd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use razzshell_env::FakeSystem;

    #[test]
    fn output_redirection_targets_stdout_and_truncates() {
        let mut system = FakeSystem::new();
        let redir = Redirection::new(RedirKind::Output, "out.txt");
        apply_one(&mut system, &redir, "out.txt", None).unwrap();
        let opened = system
            .calls
            .iter()
            .find_map(|c| match c {
                razzshell_env::RecordedCall::Open { path, flags } => Some((path.clone(), *flags)),
                _ => None,
            })
            .unwrap();
        assert_eq!(opened.0, std::path::PathBuf::from("out.txt"));
        assert!(opened.1.contains(OFlag::O_TRUNC));
    }

    #[test]
    fn guard_saves_stdout_once_even_with_two_redirections_targeting_it() {
        let mut system = FakeSystem::new();
        let mut guard = RedirectGuard::default();
        let r1 = Redirection::new(RedirKind::Output, "a.txt");
        let r2 = Redirection::new(RedirKind::Output, "b.txt");
        apply_one(&mut system, &r1, "a.txt", Some(&mut guard)).unwrap();
        apply_one(&mut system, &r2, "b.txt", Some(&mut guard)).unwrap();
        assert_eq!(guard.saved.len(), 1);
        guard.restore(&mut system);
    }

    #[test]
    fn both_redirection_touches_stdout_and_stderr() {
        let mut system = FakeSystem::new();
        let mut guard = RedirectGuard::default();
        let r = Redirection::new(RedirKind::Both, "log.txt");
        apply_one(&mut system, &r, "log.txt", Some(&mut guard)).unwrap();
        assert_eq!(guard.saved.len(), 2);
    }
}
