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

//! `alias [name=expansion ...]` (`spec.md` §3, §6): defines an alias. With
//! no arguments, lists every alias (same output as the `aliases` builtin).

use razzshell_env::ShellContext;

pub fn main(ctx: &mut ShellContext<'_>, args: &[String]) -> i32 {
    if args.len() == 1 {
        return crate::aliases::main(ctx, args);
    }

    let mut status = 0;
    for arg in &args[1..] {
        match arg.split_once('=') {
            Some((name, expansion)) => {
                if let Err(e) = ctx.registry.set_alias(name, expansion) {
                    eprintln!("alias: {e}");
                    status = 1;
                }
            }
            None => match ctx.registry.aliases().find(|(n, _)| *n == arg) {
                Some((name, expansion)) => println!("{name}={expansion}"),
                None => {
                    eprintln!("alias: {arg}: not found");
                    status = 1;
                }
            },
        }
    }
    status
}
