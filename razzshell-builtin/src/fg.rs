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

//! `fg [id]` (`spec.md` §6, §4.6): resumes a stopped or backgrounded job in
//! the foreground. Transfers terminal ownership to the job's process group,
//! sends `SIGCONT`, waits (`WUNTRACED` so a second stop is observed rather
//! than missed), then reclaims the terminal on every exit path.

use nix::sys::signal::Signal;
use nix::sys::wait::WaitStatus;
use razzshell_env::{JobState, ShellContext};

fn resolve_job_id(ctx: &ShellContext<'_>, args: &[String]) -> Option<usize> {
    match args.get(1) {
        Some(raw) => raw.parse().ok(),
        None => ctx.jobs.iter().map(|j| j.id).max(),
    }
}

pub fn main(ctx: &mut ShellContext<'_>, args: &[String]) -> i32 {
    let Some(id) = resolve_job_id(ctx, args) else {
        eprintln!("fg: no current job");
        return 1;
    };
    let Some(pid) = ctx.jobs.get(id).map(|j| j.pid) else {
        eprintln!("fg: {id}: no such job");
        return 1;
    };

    let _ = ctx.system.kill(pid, Signal::SIGCONT);
    if let Some(job) = ctx.jobs.get_mut(id) {
        job.state = JobState::Running;
    }

    ctx.terminal.hand_to(ctx.system, pid);
    let status = loop {
        match ctx.system.waitpid(pid, true, true) {
            Ok(WaitStatus::Exited(p, code)) if p == pid => {
                ctx.jobs.remove(id);
                break code;
            }
            Ok(WaitStatus::Signaled(p, sig, _)) if p == pid => {
                ctx.jobs.remove(id);
                break 128 + sig as i32;
            }
            Ok(WaitStatus::Stopped(p, sig)) if p == pid => {
                if let Some(job) = ctx.jobs.get_mut(id) {
                    job.state = JobState::Stopped;
                }
                break 128 + sig as i32;
            }
            Ok(_) => continue,
            Err(_) => break 1,
        }
    };
    ctx.terminal.reclaim(ctx.system);
    status
}
