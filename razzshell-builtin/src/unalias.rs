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

//! `unalias <name> ...` (`spec.md` §6): removes one or more aliases.

use razzshell_env::ShellContext;

pub fn main(ctx: &mut ShellContext<'_>, args: &[String]) -> i32 {
    if args.len() == 1 {
        eprintln!("unalias: usage: unalias <name> ...");
        return 1;
    }
    let mut status = 0;
    for name in &args[1..] {
        if let Err(e) = ctx.registry.remove_alias(name) {
            eprintln!("unalias: {e}");
            status = 1;
        }
    }
    status
}
