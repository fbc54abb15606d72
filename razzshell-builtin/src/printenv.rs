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

//! `printenv [NAME]` (`spec.md` §6): with no argument, prints every
//! `NAME=VALUE` pair sorted by name for deterministic output; with a name,
//! prints only that variable's value.

use razzshell_env::ShellContext;

pub fn main(ctx: &mut ShellContext<'_>, args: &[String]) -> i32 {
    if let Some(name) = args.get(1) {
        return match ctx.system.getenv(name) {
            Some(value) => {
                println!("{}", value.to_string_lossy());
                0
            }
            None => 1,
        };
    }
    let mut entries = ctx.system.environ();
    entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    for (name, value) in entries {
        println!("{name}={value}");
    }
    0
}
