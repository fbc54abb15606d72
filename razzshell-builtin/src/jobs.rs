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

//! `jobs` (`spec.md` §6): lists the job table. A background job is
//! reported here until it reaches `JobState::Reaped`, per `spec.md` §8
//! property 11 — the REPL drains reaped jobs right before the next prompt,
//! so by the time `jobs` runs again a terminated job is simply gone.

use razzshell_env::{JobState, ShellContext};

pub fn main(ctx: &mut ShellContext<'_>, _args: &[String]) -> i32 {
    for job in ctx.jobs.iter() {
        let state = match job.state {
            JobState::Running => "Running",
            JobState::Stopped => "Stopped",
            JobState::Reaped => "Done",
        };
        let suffix = if job.background { " &" } else { "" };
        println!("[{}]  {}  {}{}", job.id, state, job.command_text, suffix);
    }
    0
}
