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

//! `bg [id]` (`spec.md` §6, §4.6): resumes a stopped job in the
//! background. Unlike `fg`, the terminal stays with the shell and the
//! builtin returns immediately without waiting.

use nix::sys::signal::Signal;
use razzshell_env::{JobState, ShellContext};

fn resolve_job_id(ctx: &ShellContext<'_>, args: &[String]) -> Option<usize> {
    match args.get(1) {
        Some(raw) => raw.parse().ok(),
        None => ctx.jobs.iter().map(|j| j.id).max(),
    }
}

pub fn main(ctx: &mut ShellContext<'_>, args: &[String]) -> i32 {
    let Some(id) = resolve_job_id(ctx, args) else {
        eprintln!("bg: no current job");
        return 1;
    };
    let Some(pid) = ctx.jobs.get(id).map(|j| j.pid) else {
        eprintln!("bg: {id}: no such job");
        return 1;
    };

    if let Err(e) = ctx.system.kill(pid, Signal::SIGCONT) {
        eprintln!("bg: {id}: {e}");
        return 1;
    }
    if let Some(job) = ctx.jobs.get_mut(id) {
        job.state = JobState::Running;
        job.background = true;
        println!("[{}]  {}", job.id, job.command_text);
    }
    0
}
