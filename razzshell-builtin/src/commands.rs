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

//! `commands` (`spec.md` §6): lists the command history, oldest first,
//! numbered from 1. This is also the POSIX-translated target of `history`
//! (`spec.md` §4.5).

use razzshell_env::ShellContext;

pub fn main(ctx: &mut ShellContext<'_>, _args: &[String]) -> i32 {
    for (i, line) in ctx.history.iter().enumerate() {
        println!("{:>5}  {}", i + 1, line);
    }
    0
}
