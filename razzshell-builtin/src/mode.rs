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

//! `mode [razzshell|posix|bash]` (`spec.md` §4.4, §6): shows or changes the
//! shell's interpretation mode. Changing it updates the published
//! `RAZZSHELL_MODE` environment variable (`spec.md` §6) and prints the exact
//! confirmation line `original_source/src/shell_config.c`'s `shell_set_mode`
//! prints for each mode (`SPEC_FULL.md` §2).

use razzshell_env::{Mode, ShellContext};

fn confirmation_line(mode: Mode) -> &'static str {
    match mode {
        Mode::Native => "Switched to RazzShell native mode",
        Mode::Posix => "Switched to POSIX mode",
        Mode::Bash => "Switched to Bash compatibility mode",
    }
}

pub fn main(ctx: &mut ShellContext<'_>, args: &[String]) -> i32 {
    let Some(raw) = args.get(1) else {
        println!("{}", ctx.config.mode);
        return 0;
    };
    let Some(new_mode) = Mode::parse(raw) else {
        eprintln!("mode: {raw}: no such mode (expected razzshell, posix, or bash)");
        return 1;
    };
    ctx.config.mode = new_mode;
    ctx.system.setenv("RAZZSHELL_MODE", new_mode.as_str());
    println!("{}", confirmation_line(new_mode));
    0
}
