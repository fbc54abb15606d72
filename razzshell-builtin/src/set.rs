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

//! `set [-euvx] [+euvx] [-o name] [+o name]` (`spec.md` §4.4, §6): toggles
//! the shell's option flags. `-o`/`+o` take a long option name
//! (currently only `pipefail`) as the following argument. With no
//! arguments, prints the current flag state.

use razzshell_env::ShellContext;

pub fn main(ctx: &mut ShellContext<'_>, args: &[String]) -> i32 {
    if args.len() == 1 {
        print_flags(ctx);
        return 0;
    }

    let mut status = 0;
    let mut iter = args[1..].iter();
    while let Some(token) = iter.next() {
        let Some(sign) = token.chars().next() else { continue };
        let on = match sign {
            '-' => true,
            '+' => false,
            _ => {
                eprintln!("set: {token}: invalid option");
                status = 1;
                continue;
            }
        };
        let rest = &token[1..];
        if rest == "o" {
            let Some(name) = iter.next() else {
                eprintln!("set: -o: option name required");
                status = 1;
                break;
            };
            if !ctx.config.apply_long_option(name, on) {
                eprintln!("set: {name}: no such option");
                status = 1;
            }
            continue;
        }
        for letter in rest.chars() {
            if !ctx.config.apply_flag(letter, on) {
                eprintln!("set: -{letter}: invalid option");
                status = 1;
            }
        }
    }
    status
}

fn print_flags(ctx: &ShellContext<'_>) {
    let flags = ctx.config.flags;
    println!("errexit  {}", on_off(flags.errexit));
    println!("pipefail {}", on_off(flags.pipefail));
    println!("nounset  {}", on_off(flags.nounset));
    println!("verbose  {}", on_off(flags.verbose));
    println!("xtrace   {}", on_off(flags.xtrace));
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
