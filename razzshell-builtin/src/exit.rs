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

//! `exit [status]` (`spec.md` §6): requests REPL teardown. With no
//! argument, the last command's exit status propagates; an explicit
//! argument must parse as an integer.

use razzshell_env::ShellContext;

pub fn main(ctx: &mut ShellContext<'_>, args: &[String]) -> i32 {
    let status = match args.get(1) {
        Some(raw) => match raw.parse::<i32>() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("exit: {raw}: numeric argument required");
                ctx.exit_requested = Some(2);
                return 2;
            }
        },
        None => ctx.last_status,
    };
    ctx.exit_requested = Some(status);
    status
}
