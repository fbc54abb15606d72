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

//! `kill <pid>` (`spec.md` §5, §6): sends `SIGTERM` to a named PID — the
//! only user-level cancellation of a background job beyond job-control
//! signals. A leading `%` names a job ID instead of a raw PID.

use nix::sys::signal::Signal;
use nix::unistd::Pid;
use razzshell_env::ShellContext;

pub fn main(ctx: &mut ShellContext<'_>, args: &[String]) -> i32 {
    let Some(raw) = args.get(1) else {
        eprintln!("kill: usage: kill <pid>");
        return 1;
    };

    let pid = if let Some(job_id) = raw.strip_prefix('%') {
        match job_id.parse::<usize>().ok().and_then(|id| ctx.jobs.get(id)) {
            Some(job) => job.pid,
            None => {
                eprintln!("kill: {raw}: no such job");
                return 1;
            }
        }
    } else {
        match raw.parse::<i32>() {
            Ok(n) => Pid::from_raw(n),
            Err(_) => {
                eprintln!("kill: {raw}: arguments must be process or job IDs");
                return 1;
            }
        }
    };

    match ctx.system.kill(pid, Signal::SIGTERM) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("kill: ({pid}): {e}");
            1
        }
    }
}
