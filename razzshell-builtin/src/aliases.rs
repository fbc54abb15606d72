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

//! `aliases` (`spec.md` §6): lists every registered alias, sorted by name
//! so output is deterministic regardless of the registry's internal
//! (hash-ordered) iteration.

use razzshell_env::ShellContext;

pub fn main(ctx: &mut ShellContext<'_>, _args: &[String]) -> i32 {
    let mut entries: Vec<(&str, &str)> = ctx.registry.aliases().collect();
    entries.sort_unstable_by_key(|(name, _)| *name);
    for (name, expansion) in entries {
        println!("{name}={expansion}");
    }
    0
}
